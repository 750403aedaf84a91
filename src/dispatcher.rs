use crate::adapters::{
    BazurecipeAdapter, CookienAdapter, CookienCopyTextAdapter, CookpadAdapter,
    DelishKitchenAdapter, Document, SiteAdapter,
};
use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::fetchers::{ChromeFetcher, Fetcher, RequestFetcher, WordPressFetcher};
use crate::model::IngredientRow;
use crate::normalizer;
use log::{debug, warn};
use std::collections::HashMap;
use url::Url;

pub const BAZURECIPE: &str = "bazurecipe.com";
pub const COOKIEN: &str = "cookien.com";
pub const DELISH_KITCHEN: &str = "delishkitchen.tv";
pub const COOKPAD: &str = "cookpad.com";

const BAZURECIPE_MARKER: &str = "section.content";

/// A supported host bound to how it is fetched and how it is read.
pub struct SourceDescriptor {
    pub host: String,
    pub fetcher: Box<dyn Fetcher>,
    pub adapter: Box<dyn SiteAdapter>,
}

/// Host → (fetch strategy, adapter) lookup, built once and then read-only.
#[derive(Default)]
pub struct SourceTable {
    sources: HashMap<String, SourceDescriptor>,
}

fn host_key(host: &str) -> String {
    let host = host.to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(bare) => bare.to_string(),
        None => host,
    }
}

impl SourceTable {
    /// An empty table; every URL is unsupported until sources are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in sites, with fetch strategies chosen from `config`.
    pub fn from_config(config: &ExtractConfig) -> Result<Self, ExtractError> {
        let request = RequestFetcher::new(config.timeout()).map_err(ExtractError::Fetch)?;
        let mut table = Self::new();

        if config.renders(BAZURECIPE) {
            table.register(
                BAZURECIPE,
                ChromeFetcher::new(config.render_config(), BAZURECIPE_MARKER),
                BazurecipeAdapter,
            );
        } else {
            table.register(
                BAZURECIPE,
                WordPressFetcher::new(request.clone(), config.wordpress_fallback),
                BazurecipeAdapter,
            );
        }

        if config.renders(COOKIEN) {
            table.register(
                COOKIEN,
                ChromeFetcher::new(config.render_config(), CookienCopyTextAdapter::MARKER),
                CookienCopyTextAdapter,
            );
        } else {
            table.register(COOKIEN, request.clone(), CookienAdapter);
        }

        for host in [DELISH_KITCHEN, COOKPAD] {
            if config.renders(host) {
                warn!("{} has no rendered variant, using a static fetch", host);
            }
        }
        table.register(DELISH_KITCHEN, request.clone(), DelishKitchenAdapter);
        table.register(COOKPAD, request, CookpadAdapter);

        Ok(table)
    }

    /// Bind `host` to a fetch strategy and adapter, replacing any earlier binding.
    pub fn register(
        &mut self,
        host: impl Into<String>,
        fetcher: impl Fetcher + 'static,
        adapter: impl SiteAdapter + 'static,
    ) {
        self.register_boxed(host, Box::new(fetcher), Box::new(adapter));
    }

    pub fn register_boxed(
        &mut self,
        host: impl Into<String>,
        fetcher: Box<dyn Fetcher>,
        adapter: Box<dyn SiteAdapter>,
    ) {
        let host = host.into();
        self.sources.insert(
            host_key(&host),
            SourceDescriptor {
                host,
                fetcher,
                adapter,
            },
        );
    }

    pub fn lookup(&self, host: &str) -> Option<&SourceDescriptor> {
        self.sources.get(&host_key(host))
    }

    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.sources.values().map(|s| s.host.as_str())
    }

    /// Fetch, adapt and normalize one URL.
    ///
    /// An empty result is never returned as success: it is reported as
    /// `NoIngredientsFound`, since it cannot be told apart from a markup change.
    pub async fn dispatch(&self, url: &str) -> Result<Vec<IngredientRow>, ExtractError> {
        let parsed =
            Url::parse(url).map_err(|e| ExtractError::InvalidUrl(format!("{url}: {e}")))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| ExtractError::InvalidUrl(format!("{url}: no host")))?;

        let source = self
            .lookup(host)
            .ok_or_else(|| ExtractError::UnsupportedSource(host.to_string()))?;
        debug!(
            "Extracting {} with {} fetcher and {} adapter",
            url,
            source.fetcher.name(),
            source.adapter.name()
        );

        let page = source.fetcher.fetch(parsed.as_str()).await?;
        let rows = extract_rows(source.adapter.as_ref(), &page.url, &page.body);

        if rows.is_empty() {
            return Err(ExtractError::NoIngredientsFound(url.to_string()));
        }
        debug!("Extracted {} ingredients from {}", rows.len(), url);
        Ok(rows)
    }
}

/// Parse `body`, run the adapter, and keep the rows that survive normalization.
pub fn extract_rows(adapter: &dyn SiteAdapter, url: &str, body: &str) -> Vec<IngredientRow> {
    let document = Document::parse(url, body);
    adapter
        .extract(&document)
        .into_iter()
        .filter_map(normalizer::finish)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_hosts() {
        let table = SourceTable::from_config(&ExtractConfig::default()).unwrap();
        let mut hosts: Vec<_> = table.hosts().collect();
        hosts.sort();
        assert_eq!(hosts, vec![BAZURECIPE, COOKIEN, COOKPAD, DELISH_KITCHEN]);
    }

    #[test]
    fn test_lookup_ignores_www_and_case() {
        let table = SourceTable::from_config(&ExtractConfig::default()).unwrap();
        assert!(table.lookup("www.cookpad.com").is_some());
        assert!(table.lookup("Cookpad.com").is_some());
        assert!(table.lookup("example.com").is_none());
        assert!(table.lookup("evilcookpad.com").is_none());
    }

    #[test]
    fn test_strategy_follows_config() {
        let static_table = SourceTable::from_config(&ExtractConfig::default()).unwrap();
        assert_eq!(static_table.lookup(BAZURECIPE).unwrap().fetcher.name(), "wordpress");
        assert_eq!(static_table.lookup(COOKIEN).unwrap().adapter.name(), "cookien");

        let config = ExtractConfig {
            render_hosts: vec![COOKIEN.to_string(), COOKPAD.to_string()],
            ..ExtractConfig::default()
        };
        let rendered = SourceTable::from_config(&config).unwrap();
        let cookien = rendered.lookup(COOKIEN).unwrap();
        assert_eq!(cookien.fetcher.name(), "chrome");
        assert_eq!(cookien.adapter.name(), "cookien-copy-text");
        assert_eq!(rendered.lookup(COOKPAD).unwrap().fetcher.name(), "request");
    }

    #[tokio::test]
    async fn test_unknown_host_is_unsupported() {
        let table = SourceTable::from_config(&ExtractConfig::default()).unwrap();
        let err = table.dispatch("https://example.com/recipe/1").await.unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedSource(ref h) if h == "example.com"));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let table = SourceTable::new();
        let err = table.dispatch("cookpad.com/recipe").await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidUrl(_)));
    }

    #[test]
    fn test_extract_rows_sequence() {
        let body = "<div id='r_contents'><p>◎塩<span>少々</span></p><p>水<span></span></p></div>";
        let rows = extract_rows(&CookienAdapter, "https://cookien.com/1/", body);
        assert_eq!(rows, vec![IngredientRow::new("塩", "少々")]);
    }
}
