use crate::error::FetchError;
use async_trait::async_trait;

mod chrome;
mod request;
mod wordpress;

pub use chrome::ChromeFetcher;
pub use request::RequestFetcher;
pub use wordpress::WordPressFetcher;

/// Raw markup obtained for a URL.
///
/// Kept as a string so it can cross await points; parsing happens once the
/// fetch is complete.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub body: String,
}

/// Obtains the markup an adapter will query.
#[async_trait]
pub trait Fetcher: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}
