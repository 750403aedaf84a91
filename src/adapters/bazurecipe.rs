use super::{block_text, Document, SiteAdapter};
use crate::model::RawPair;
use crate::normalizer::{split_on_leader, SECTION_SEPARATOR};
use log::debug;
use scraper::{ElementRef, Selector};

const HEADING_KEYWORD: &str = "材料";

/// Line-oriented ingredient block:
///
/// ```html
/// <div><b>【材料】</b><br>
/// キャベツ…1／2玉<br>
/// ＝ソース＝<br>
/// ケチャップ…大さじ2</div>
/// ```
///
/// Works on the full page, on the `content.rendered` HTML of the WordPress
/// API, and on the rendered `section.content` fragment.
///
/// Teasers and sidebars may carry their own `材料` headings, so every heading
/// is tried in document order and the first block with a leader line wins.
pub struct BazurecipeAdapter;

impl BazurecipeAdapter {
    fn candidate_blocks<'a>(&self, document: &'a Document) -> Vec<ElementRef<'a>> {
        let Ok(headings) = Selector::parse("b") else {
            return Vec::new();
        };

        document
            .html
            .select(&headings)
            .filter(|b| b.text().any(|t| t.contains(HEADING_KEYWORD)))
            .filter_map(|heading| {
                heading
                    .ancestors()
                    .filter_map(ElementRef::wrap)
                    .find(|el| el.value().name() == "div")
            })
            .collect()
    }

    fn block_pairs(block: ElementRef<'_>) -> Vec<RawPair> {
        let text = block_text(block);
        text.trim()
            .lines()
            // heading line
            .skip(1)
            .filter(|line| !line.contains(SECTION_SEPARATOR))
            .map(split_on_leader)
            .collect()
    }
}

impl SiteAdapter for BazurecipeAdapter {
    fn name(&self) -> &'static str {
        "bazurecipe"
    }

    fn extract(&self, document: &Document) -> Vec<RawPair> {
        let found = self
            .candidate_blocks(document)
            .into_iter()
            .map(Self::block_pairs)
            .find(|pairs| pairs.iter().any(|pair| !pair.amount.trim().is_empty()));

        found.unwrap_or_else(|| {
            debug!("No ingredient block in {}", document.url);
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::finish;

    const POST_CONTENT: &str = r#"
        <p>今日はこれ。</p>
        <div style="background: #f4f4f4; padding: 15px;"><b>【材料】</b><br>
        キャベツ…1／2玉<br>
        ジャガイモ…300g<br>
        ＝ソース＝<br>
        ◎ケチャップ……大さじ2<br>
        ☆味変で粉チーズ</div>
        <p>作り方</p>
    "#;

    fn rows(html: &str) -> Vec<(String, String)> {
        let document = Document::parse("https://bazurecipe.com/2024/01/cabbage/", html);
        BazurecipeAdapter
            .extract(&document)
            .into_iter()
            .filter_map(finish)
            .map(|row| (row.ingredient, row.amount))
            .collect()
    }

    #[test]
    fn test_extracts_leader_lines() {
        assert_eq!(
            rows(POST_CONTENT),
            vec![
                ("キャベツ".to_string(), "1／2玉".to_string()),
                ("ジャガイモ".to_string(), "300g".to_string()),
                ("ケチャップ".to_string(), "大さじ2".to_string()),
            ]
        );
    }

    #[test]
    fn test_block_without_br_newlines() {
        let html = "<div><b>【材料】</b><br>キャベツ…1／2玉<br>塩…少々</div>";
        assert_eq!(
            rows(html),
            vec![
                ("キャベツ".to_string(), "1／2玉".to_string()),
                ("塩".to_string(), "少々".to_string()),
            ]
        );
    }

    #[test]
    fn test_innermost_div_is_used() {
        let html = r#"
            <div class="l-wrapper"><main><div class="postContents">
              <p>前置き…長い</p>
              <section class="content">
                <div><b>材料</b><br>
                豚バラ…200g</div>
              </section>
            </div></main></div>
        "#;
        assert_eq!(rows(html), vec![("豚バラ".to_string(), "200g".to_string())]);
    }

    #[test]
    fn test_skips_teaser_heading_before_block() {
        let html = r#"
            <div class="sidebar"><b>材料2つで簡単！人気レシピ</b></div>
            <section class="content">
              <div><b>【材料】</b><br>キャベツ…1／2玉<br>塩…少々</div>
            </section>
        "#;
        assert_eq!(
            rows(html),
            vec![
                ("キャベツ".to_string(), "1／2玉".to_string()),
                ("塩".to_string(), "少々".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_block_yields_nothing() {
        let document = Document::parse(
            "https://bazurecipe.com/x/",
            "<div><b>作り方</b><br>焼く…5分</div>",
        );
        assert!(BazurecipeAdapter.extract(&document).is_empty());
    }
}
