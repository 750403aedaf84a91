//! Text cleanup shared by all site adapters.
//!
//! Everything here is pure string manipulation: no I/O, no allocation beyond
//! the returned values.

use crate::model::{IngredientRow, RawPair};

/// Glyphs recipe sites prefix to optional or starred ingredients.
pub const DECORATIVE_MARKERS: [char; 4] = ['☆', '★', '◯', '◎'];

/// Leader between name and quantity in line-oriented blocks (`キャベツ…1／2玉`).
pub const QUANTITY_SEPARATOR: char = '…';

/// Marks sub-group headings such as `＝ソース＝`.
pub const SECTION_SEPARATOR: char = '＝';

pub const FULL_WIDTH_SPACE: char = '\u{3000}';

const MEMO_OPEN: &str = "（メモ";
const MEMO_CLOSE: char = '）';

/// Remove every decorative marker, wherever it appears.
pub fn strip_markers(text: &str) -> String {
    text.chars()
        .filter(|c| !DECORATIVE_MARKERS.contains(c))
        .collect()
}

/// Remove `（メモ…）` footnote spans.
///
/// A span runs from `（メモ` to the last `）` on the same line.
pub fn remove_memo(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(MEMO_OPEN) {
        let tail = &rest[start..];
        let line = tail.find('\n').map_or(tail, |end| &tail[..end]);
        match line.rfind(MEMO_CLOSE) {
            Some(close) => {
                out.push_str(&rest[..start]);
                rest = &tail[close + MEMO_CLOSE.len_utf8()..];
            }
            None => {
                out.push_str(&rest[..start + MEMO_OPEN.len()]);
                rest = &rest[start + MEMO_OPEN.len()..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Split `name…quantity` on the first run of leaders.
///
/// Text after a second run of leaders is ignored. A line without a leader
/// yields an empty quantity.
pub fn split_on_leader(line: &str) -> RawPair {
    match line.split_once(QUANTITY_SEPARATOR) {
        Some((name, rest)) => {
            let rest = rest.trim_start_matches(QUANTITY_SEPARATOR);
            let amount = rest.split(QUANTITY_SEPARATOR).next().unwrap_or_default();
            RawPair::new(name, amount)
        }
        None => RawPair::new(line, ""),
    }
}

/// Turn every full-width space except the last into a regular space.
///
/// Sites that separate name and quantity with a full-width space also use
/// full-width spaces inside names; the last one is the delimiter.
pub fn collapse_full_width_spaces(line: &str) -> String {
    if line.matches(FULL_WIDTH_SPACE).count() <= 1 {
        return line.to_string();
    }
    match line.rfind(FULL_WIDTH_SPACE) {
        Some(last) => {
            let mut out = line[..last].replace(FULL_WIDTH_SPACE, " ");
            out.push_str(&line[last..]);
            out
        }
        None => line.to_string(),
    }
}

/// Split `name　quantity` on the delimiting full-width space.
///
/// Surrounding whitespace, full-width included, never counts as the delimiter.
pub fn split_on_full_width_space(line: &str) -> RawPair {
    let collapsed = collapse_full_width_spaces(line.trim());
    match collapsed.split_once(FULL_WIDTH_SPACE) {
        Some((name, amount)) => RawPair::new(name, amount),
        None => RawPair::new(collapsed, ""),
    }
}

/// Final cleanup applied to every pair an adapter produced.
///
/// Returns `None` when either field is empty after cleanup, which drops the
/// entry without affecting the rest of the batch.
pub fn finish(pair: RawPair) -> Option<IngredientRow> {
    let ingredient = strip_markers(&remove_memo(&pair.name)).trim().to_string();
    let amount = pair.amount.trim().to_string();

    if ingredient.is_empty() || amount.is_empty() {
        return None;
    }
    Some(IngredientRow::new(ingredient, amount))
}
