//! Text canonicalization for grouping keys and search.
//!
//! Every comparison in the catalog goes through [`normalize`] so that
//! fullwidth/halfwidth, case, and wave-dash variants of the same title land
//! on the same grouping key. The pipeline is NFKC, then wave-dash and
//! CJK-punctuation folding, then lowercasing. All functions are idempotent
//! and total: empty in, empty out, never a panic.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Characters *removed* by [`sanitize`]: anything that is not an ASCII word
/// character, whitespace, kana/kanji, the kana iteration/prolonged-sound
/// marks, or light punctuation that appears in real titles.
static SANITIZE_STRIP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[^0-9A-Za-z_\s~!?&:/.,'"()\-\p{Hiragana}\p{Katakana}\p{Han}ー々・]"#)
        .expect("sanitize whitelist regex")
});

/// Canonical form used for grouping keys and substring search.
///
/// NFKC already folds fullwidth latin, fullwidth tilde, and halfwidth kana;
/// the explicit folds below catch the characters NFKC leaves alone (the wave
/// dash, ideographic comma/full stop, curly quotes).
pub fn normalize(input: &str) -> String {
    input
        .nfkc()
        .map(fold_char)
        .collect::<String>()
        .to_lowercase()
}

/// [`normalize`] with all whitespace removed. Not used by the filter (a
/// query with spaces should match spaced titles only), but part of the
/// normalizer surface for embedders comparing titles across datasets.
pub fn normalize_compact(input: &str) -> String {
    normalize(input).chars().filter(|c| !c.is_whitespace()).collect()
}

/// Strips every character outside the title whitelist. Applied to strings
/// that end up in DOM attribute values; element text goes through
/// `set_text_content` and needs no stripping.
pub fn sanitize(input: &str) -> String {
    let composed: String = input.nfkc().map(fold_char).collect();
    SANITIZE_STRIP.replace_all(&composed, "").into_owned()
}

fn fold_char(c: char) -> char {
    match c {
        // wave dash and its fullwidth sibling both mean "~" in titles
        '\u{301c}' | '\u{ff5e}' => '~',
        '、' => ',',
        '。' => '.',
        '\u{201c}' | '\u{201d}' => '"',
        '\u{2018}' | '\u{2019}' => '\'',
        _ => c,
    }
}
