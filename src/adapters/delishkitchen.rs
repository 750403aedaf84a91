use super::{child_text, Document, SiteAdapter};
use crate::model::RawPair;
use scraper::Selector;

/// `ul.ingredient-list > li` with `.ingredient-name` and `.ingredient-serving` children.
pub struct DelishKitchenAdapter;

impl SiteAdapter for DelishKitchenAdapter {
    fn name(&self) -> &'static str {
        "delishkitchen"
    }

    fn extract(&self, document: &Document) -> Vec<RawPair> {
        let (Ok(items), Ok(name), Ok(serving)) = (
            Selector::parse("ul.ingredient-list > li"),
            Selector::parse(".ingredient-name"),
            Selector::parse(".ingredient-serving"),
        ) else {
            return Vec::new();
        };

        document
            .html
            .select(&items)
            .map(|li| RawPair::new(child_text(li, &name), child_text(li, &serving)))
            .collect()
    }
}
