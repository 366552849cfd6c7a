//! Text normalization for search.
//!
//! Queries and card text are folded the same way before a substring test:
//!
//! 1. Width folding: full-width ASCII forms (as typed through an IME) become
//!    plain ASCII, the ideographic space becomes a space.
//! 2. Script folding: katakana becomes the equivalent hiragana, so a name
//!    written in either kana script matches a query in the other.
//! 3. Case folding via `char::to_lowercase`.

const FULLWIDTH_FIRST: u32 = 0xFF01;
const FULLWIDTH_LAST: u32 = 0xFF5E;
const FULLWIDTH_OFFSET: u32 = 0xFEE0;

const IDEOGRAPHIC_SPACE: char = '\u{3000}';

const KATAKANA_FIRST: u32 = 0x30A1;
const KATAKANA_LAST: u32 = 0x30F6;
const KATAKANA_ITERATION_FIRST: u32 = 0x30FD;
const KATAKANA_ITERATION_LAST: u32 = 0x30FE;
const KANA_OFFSET: u32 = 0x60;

/// Fold a string for comparison.
///
/// ```
/// use card_catalog::filter::normalize;
///
/// assert_eq!(normalize("ＦＩＲＥ"), "fire");
/// assert_eq!(normalize("ピカ"), normalize("ぴか"));
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        out.extend(fold_script(fold_width(c)).to_lowercase());
    }
    out
}

/// Normalize a search query.
///
/// Returns `None` for queries that are empty after trimming, which disables
/// the text predicate.
#[must_use]
pub fn normalize_query(query: &str) -> Option<String> {
    let folded = normalize(query);
    let trimmed = folded.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn fold_width(c: char) -> char {
    if c == IDEOGRAPHIC_SPACE {
        return ' ';
    }
    let code = c as u32;
    if (FULLWIDTH_FIRST..=FULLWIDTH_LAST).contains(&code) {
        char::from_u32(code - FULLWIDTH_OFFSET).unwrap_or(c)
    } else {
        c
    }
}

fn fold_script(c: char) -> char {
    let code = c as u32;
    let in_katakana = (KATAKANA_FIRST..=KATAKANA_LAST).contains(&code)
        || (KATAKANA_ITERATION_FIRST..=KATAKANA_ITERATION_LAST).contains(&code);
    if in_katakana {
        char::from_u32(code - KANA_OFFSET).unwrap_or(c)
    } else {
        c
    }
}
