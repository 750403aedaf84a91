use crate::model::RawPair;
use scraper::{ElementRef, Html, Node, Selector};

mod bazurecipe;
mod cookien;
mod cookpad;
mod delishkitchen;

pub use bazurecipe::BazurecipeAdapter;
pub use cookien::{CookienAdapter, CookienCopyTextAdapter};
pub use cookpad::CookpadAdapter;
pub use delishkitchen::DelishKitchenAdapter;

/// A parsed page (or page fragment) ready for structural queries.
pub struct Document {
    pub url: String,
    pub html: Html,
}

impl Document {
    pub fn parse(url: impl Into<String>, body: &str) -> Self {
        Self {
            url: url.into(),
            html: Html::parse_document(body),
        }
    }
}

/// Knows one site's ingredient markup.
///
/// Implementations never fail: an entry with a missing name or quantity is
/// emitted with that side empty and dropped later by the normalizer, and a
/// missing container simply yields no pairs.
pub trait SiteAdapter: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, document: &Document) -> Vec<RawPair>;
}

pub(crate) fn text_of(element: ElementRef) -> String {
    element.text().collect()
}

/// Concatenated text of every descendant of `element` matching `selector`.
pub(crate) fn child_text(element: ElementRef, selector: &Selector) -> String {
    element.select(selector).flat_map(|el| el.text()).collect()
}

/// Text of `element` with `<br>` rendered as a line break.
pub(crate) fn block_text(element: ElementRef) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(el) if el.name() == "br" => text.push('\n'),
            _ => {}
        }
    }
    text
}
