use super::{child_text, text_of, Document, SiteAdapter};
use crate::model::RawPair;
use crate::normalizer::split_on_full_width_space;
use log::debug;
use scraper::Selector;

/// Server-rendered ingredient paragraphs:
/// `<p>豚もも薄切り肉<span>約２００ｇ（８～１０枚）</span></p>`.
///
/// The quantity is the `span`; the name is whatever text remains.
pub struct CookienAdapter;

impl SiteAdapter for CookienAdapter {
    fn name(&self) -> &'static str {
        "cookien"
    }

    fn extract(&self, document: &Document) -> Vec<RawPair> {
        let (Ok(paragraphs), Ok(spans)) = (
            Selector::parse("#r_contents > p"),
            Selector::parse("span"),
        ) else {
            return Vec::new();
        };

        document
            .html
            .select(&paragraphs)
            .map(|p| {
                let text = text_of(p);
                let amount = child_text(p, &spans);
                let name = if amount.is_empty() {
                    text
                } else {
                    text.replacen(&amount, "", 1)
                };
                RawPair::new(name, amount)
            })
            .collect()
    }
}

/// Copy-to-clipboard button present once scripts have run:
/// `<button id="copyIngredientBtn" data-text="材料\n◎しょうゆ　大さじ1\n...">`.
pub struct CookienCopyTextAdapter;

impl CookienCopyTextAdapter {
    pub const MARKER: &'static str = "#copyIngredientBtn";
}

impl SiteAdapter for CookienCopyTextAdapter {
    fn name(&self) -> &'static str {
        "cookien-copy-text"
    }

    fn extract(&self, document: &Document) -> Vec<RawPair> {
        let Ok(button) = Selector::parse(Self::MARKER) else {
            return Vec::new();
        };
        let Some(text) = document
            .html
            .select(&button)
            .next()
            .and_then(|el| el.value().attr("data-text"))
        else {
            debug!("No copy button text in {}", document.url);
            return Vec::new();
        };

        text.lines().map(split_on_full_width_space).collect()
    }
}
