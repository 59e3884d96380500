//! Display ordering for song groups.
//!
//! Groups are bucketed by the first significant character of their sort key
//! (the `az` override when present, otherwise the normalized title) with
//! fixed precedence symbol < number < latin < Japanese < other. Within a
//! bucket the comparison key folds katakana onto hiragana so both kana
//! scripts collate together in gojūon order; kanji fall back to code-point
//! order. Ties break on the untransformed title.

use serde::Serialize;

use crate::models::SongGroup;
use crate::normalize::normalize;

/// Coarse first-character class. Derived `Ord` gives the display
/// precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Bucket {
    Symbol,
    Number,
    Latin,
    Japanese,
    Other,
}

/// Complete ordering key for one group. Derived `Ord` compares bucket,
/// then the folded collation string, then the original title.
pub type CollationKey = (Bucket, String, String);

pub fn collation_key(group: &SongGroup) -> CollationKey {
    let base = match group.az.as_deref() {
        Some(az) if !az.trim().is_empty() => normalize(az),
        _ => normalize(&group.title),
    };
    let bucket = base
        .chars()
        .find(|c| !c.is_whitespace())
        .map(classify)
        .unwrap_or(Bucket::Symbol);
    let folded: String = base.chars().map(kana_fold).collect();
    (bucket, folded, group.title.clone())
}

pub fn classify(c: char) -> Bucket {
    if c.is_ascii_digit() {
        Bucket::Number
    } else if c.is_ascii_alphabetic() {
        Bucket::Latin
    } else if is_japanese(c) {
        Bucket::Japanese
    } else if c.is_alphanumeric() {
        Bucket::Other
    } else {
        Bucket::Symbol
    }
}

fn is_japanese(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309f}'     // hiragana
        | '\u{30a0}'..='\u{30ff}'   // katakana (incl. ー and ・)
        | '\u{31f0}'..='\u{31ff}'   // katakana phonetic extensions
        | '\u{ff66}'..='\u{ff9d}'   // halfwidth katakana (raw az values)
        | '\u{3400}'..='\u{4dbf}'   // CJK extension A
        | '\u{4e00}'..='\u{9fff}'   // CJK unified ideographs
        | '\u{3005}' | '\u{3006}')  // 々 〆
}

/// Folds katakana onto the hiragana block so ア and あ sort together.
fn kana_fold(c: char) -> char {
    match c {
        '\u{30a1}'..='\u{30f6}' => {
            char::from_u32(c as u32 - 0x60).unwrap_or(c)
        }
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupKey, SongGroup};

    fn group(title: &str, az: Option<&str>) -> SongGroup {
        SongGroup {
            key: GroupKey { title: normalize(title), artist: String::new() },
            title: title.to_string(),
            artist: String::new(),
            source: None,
            note: None,
            is_copyright: false,
            az: az.map(str::to_string),
            dates: Vec::new(),
        }
    }

    fn order_titles(mut groups: Vec<SongGroup>) -> Vec<String> {
        groups.sort_by_cached_key(collation_key);
        groups.into_iter().map(|g| g.title).collect()
    }

    #[test]
    fn bucket_precedence() {
        assert!(Bucket::Symbol < Bucket::Number);
        assert!(Bucket::Number < Bucket::Latin);
        assert!(Bucket::Latin < Bucket::Japanese);
        assert!(Bucket::Japanese < Bucket::Other);
    }

    #[test]
    fn classify_samples() {
        assert_eq!(classify('!'), Bucket::Symbol);
        assert_eq!(classify('7'), Bucket::Number);
        assert_eq!(classify('q'), Bucket::Latin);
        assert_eq!(classify('あ'), Bucket::Japanese);
        assert_eq!(classify('ソ'), Bucket::Japanese);
        assert_eq!(classify('夜'), Bucket::Japanese);
        assert_eq!(classify('한'), Bucket::Other);
    }

    #[test]
    fn buckets_order_the_table() {
        let titles = order_titles(vec![
            group("ひまわり", None),
            group("!WILD", None),
            group("99.9", None),
            group("Blue", None),
        ]);
        assert_eq!(titles, vec!["!WILD", "99.9", "Blue", "ひまわり"]);
    }

    #[test]
    fn katakana_and_hiragana_interleave() {
        let titles = order_titles(vec![
            group("さくら", None),
            group("アイ", None),
            group("かたち", None),
        ]);
        assert_eq!(titles, vec!["アイ", "かたち", "さくら"]);
    }

    #[test]
    fn az_override_moves_the_group() {
        // kanji title forced into the あ row via the az override
        let titles = order_titles(vec![
            group("さくら", None),
            group("愛", Some("あい")),
        ]);
        assert_eq!(titles, vec!["愛", "さくら"]);
    }

    #[test]
    fn ties_break_on_original_title() {
        // both normalize to "melt"
        let titles = order_titles(vec![group("ＭＥＬＴ", None), group("MELT", None)]);
        assert_eq!(titles, vec!["MELT", "ＭＥＬＴ"]);
    }

    #[test]
    fn empty_title_lands_in_symbol_bucket() {
        let titles = order_titles(vec![group("a", None), group("", None)]);
        assert_eq!(titles, vec!["", "a"]);
    }
}
