use std::time::Duration;

use futures::future::join_all;
use log::error;

use crate::adapters::SiteAdapter;
use crate::config::ExtractConfig;
use crate::dispatcher::SourceTable;
use crate::error::ExtractError;
use crate::fetchers::Fetcher;
use crate::model::IngredientRow;

/// Outcome of extracting one URL out of a batch
#[derive(Debug)]
pub struct UrlResult {
    pub url: String,
    pub result: Result<Vec<IngredientRow>, ExtractError>,
}

/// Entry point for callers: wraps the source table and reports failures
/// uniformly.
pub struct IngredientExtractor {
    sources: SourceTable,
}

impl IngredientExtractor {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use recipe_ingredients::IngredientExtractor;
    ///
    /// let builder = IngredientExtractor::builder();
    /// ```
    pub fn builder() -> IngredientExtractorBuilder {
        IngredientExtractorBuilder::default()
    }

    /// Build an extractor from `config.toml` and `RECIPE_INGREDIENTS__*` variables
    pub fn from_env() -> Result<Self, ExtractError> {
        Self::builder().config(ExtractConfig::load()?).build()
    }

    pub fn sources(&self) -> &SourceTable {
        &self.sources
    }

    /// Extract the ingredient list of one recipe page.
    ///
    /// Returns either a non-empty list or an error; there is no partial success.
    pub async fn extract(&self, url: &str) -> Result<Vec<IngredientRow>, ExtractError> {
        self.sources.dispatch(url).await.inspect_err(|err| {
            error!("Extraction failed for {} ({:?}): {}", url, err.kind(), err);
        })
    }

    /// Extract several URLs concurrently; results keep the input order.
    pub async fn extract_all<I, S>(&self, urls: I) -> Vec<UrlResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let urls: Vec<String> = urls.into_iter().map(Into::into).collect();
        let results = join_all(urls.iter().map(|url| self.extract(url))).await;

        urls.into_iter()
            .zip(results)
            .map(|(url, result)| UrlResult { url, result })
            .collect()
    }
}

struct CustomSource {
    host: String,
    fetcher: Box<dyn Fetcher>,
    adapter: Box<dyn SiteAdapter>,
}

/// Builder for configuring an [`IngredientExtractor`]
#[derive(Default)]
pub struct IngredientExtractorBuilder {
    config: Option<ExtractConfig>,
    timeout: Option<Duration>,
    render_hosts: Vec<String>,
    custom: Vec<CustomSource>,
    only_custom: bool,
}

impl IngredientExtractorBuilder {
    /// Use an explicit configuration instead of the defaults
    pub fn config(mut self, config: ExtractConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a timeout for static HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_ingredients::IngredientExtractor;
    /// use std::time::Duration;
    ///
    /// let builder = IngredientExtractor::builder()
    ///     .timeout(Duration::from_secs(5));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Use the browser-rendered variant for `host`
    pub fn render_host(mut self, host: impl Into<String>) -> Self {
        self.render_hosts.push(host.into());
        self
    }

    /// Bind an additional host to a fetch strategy and adapter
    pub fn source(
        mut self,
        host: impl Into<String>,
        fetcher: impl Fetcher + 'static,
        adapter: impl SiteAdapter + 'static,
    ) -> Self {
        self.custom.push(CustomSource {
            host: host.into(),
            fetcher: Box::new(fetcher),
            adapter: Box::new(adapter),
        });
        self
    }

    /// Leave out the built-in sites; only hosts added with [`Self::source`] are served
    pub fn without_builtin_sources(mut self) -> Self {
        self.only_custom = true;
        self
    }

    pub fn build(self) -> Result<IngredientExtractor, ExtractError> {
        let mut config = self.config.unwrap_or_default();
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        config.render_hosts.extend(self.render_hosts);

        let mut sources = if self.only_custom {
            SourceTable::new()
        } else {
            SourceTable::from_config(&config)?
        };
        for custom in self.custom {
            sources.register_boxed(custom.host, custom.fetcher, custom.adapter);
        }

        Ok(IngredientExtractor { sources })
    }
}
