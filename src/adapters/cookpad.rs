use super::{child_text, Document, SiteAdapter};
use crate::model::RawPair;
use scraper::Selector;

const HEADLINE_CLASS: &str = "headline";

/// Ordered ingredient list; group titles carry the `headline` class.
///
/// ```html
/// <li class="justified-quantity-and-name not-headline">
///   <span>鶏もも肉</span> <bdi class="font-semibold">1枚（300g）</bdi>
/// </li>
/// ```
pub struct CookpadAdapter;

impl SiteAdapter for CookpadAdapter {
    fn name(&self) -> &'static str {
        "cookpad"
    }

    fn extract(&self, document: &Document) -> Vec<RawPair> {
        let (Ok(items), Ok(name), Ok(quantity)) = (
            Selector::parse("#ingredients > div.ingredient-list > ol > li"),
            Selector::parse("span"),
            Selector::parse("bdi"),
        ) else {
            return Vec::new();
        };

        document
            .html
            .select(&items)
            .filter(|li| !li.value().classes().any(|c| c == HEADLINE_CLASS))
            .map(|li| RawPair::new(child_text(li, &name), child_text(li, &quantity)))
            .collect()
    }
}
