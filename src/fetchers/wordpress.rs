use super::{FetchedPage, Fetcher, RequestFetcher};
use crate::error::FetchError;
use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

#[derive(Deserialize)]
struct Post {
    content: Rendered,
}

#[derive(Deserialize)]
struct Rendered {
    rendered: String,
}

/// Reads a WordPress post through the public REST API.
///
/// The post slug is the last non-empty path segment of the page URL. The
/// post body arrives as rendered HTML inside `content.rendered`.
pub struct WordPressFetcher {
    request: RequestFetcher,
    fallback: bool,
}

impl WordPressFetcher {
    /// `fallback` fetches the page HTML directly when the API call fails.
    pub fn new(request: RequestFetcher, fallback: bool) -> Self {
        Self { request, fallback }
    }

    /// `https://site/2024/01/slug/` -> `https://site/wp-json/wp/v2/posts?slug=slug`
    pub fn api_url(page_url: &str) -> Option<String> {
        let page = Url::parse(page_url).ok()?;
        let slug = page
            .path_segments()?
            .filter(|segment| !segment.is_empty())
            .last()?
            .to_string();

        let mut api = page.join("/wp-json/wp/v2/posts").ok()?;
        api.set_query(Some(&format!("slug={slug}")));
        Some(api.to_string())
    }

    async fn fetch_post(&self, api_url: &str) -> Result<String, FetchError> {
        let payload = self.request.get_json(api_url).await?;
        rendered_content(payload)
    }
}

/// Pull `content.rendered` out of a post, or out of the first post of a list.
fn rendered_content(payload: Value) -> Result<String, FetchError> {
    let post = match payload {
        Value::Array(posts) => posts
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::MalformedResponse("no post matches the slug".to_string()))?,
        other => other,
    };

    serde_json::from_value::<Post>(post)
        .map(|post| post.content.rendered)
        .map_err(|e| FetchError::MalformedResponse(format!("missing content.rendered: {e}")))
}

#[async_trait]
impl Fetcher for WordPressFetcher {
    fn name(&self) -> &'static str {
        "wordpress"
    }

    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let Some(api_url) = Self::api_url(url) else {
            debug!("No post slug in {}, fetching page directly", url);
            return self.request.fetch(url).await;
        };

        match self.fetch_post(&api_url).await {
            Ok(body) => Ok(FetchedPage {
                url: url.to_string(),
                body,
            }),
            Err(err) if self.fallback => {
                warn!("WordPress API failed for {}: {}. Falling back to page HTML", url, err);
                self.request.fetch(url).await
            }
            Err(err) => Err(err),
        }
    }
}
