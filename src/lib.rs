pub mod adapters;
pub mod builder;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod fetchers;
pub mod model;
pub mod normalizer;

// Re-export commonly used types
pub use crate::builder::{IngredientExtractor, IngredientExtractorBuilder, UrlResult};
pub use crate::config::{ExtractConfig, RenderConfig};
pub use crate::dispatcher::{SourceDescriptor, SourceTable};
pub use crate::error::{ErrorBody, ErrorKind, ExtractError, FetchError};
pub use crate::model::{IngredientRow, RawPair};

/// Extract the ingredient list from a supported recipe page.
///
/// Configuration is read from `config.toml` and `RECIPE_INGREDIENTS__*`
/// environment variables.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let rows = recipe_ingredients::extract("https://cookpad.com/jp/recipes/123").await?;
/// for row in rows {
///     println!("{}\t{}", row.ingredient, row.amount);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn extract(url: &str) -> Result<Vec<IngredientRow>, ExtractError> {
    IngredientExtractor::from_env()?.extract(url).await
}

/// Extract several recipe pages concurrently; results keep the input order.
pub async fn extract_all<I, S>(urls: I) -> Result<Vec<UrlResult>, ExtractError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Ok(IngredientExtractor::from_env()?.extract_all(urls).await)
}
