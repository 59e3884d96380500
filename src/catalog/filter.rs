//! Query filtering over the raw dataset.
//!
//! Filtering yields a borrowed view; the dataset itself is never touched.
//! An 8-digit query that forms a real calendar date matches appearances by
//! exact date instead of by substring.

use crate::catalog::dates::parse_date_query;
use crate::catalog::state::TitleSubstitutions;
use crate::models::SongAppearance;
use crate::normalize::normalize;

pub fn filter_records<'a>(
    records: &'a [SongAppearance],
    query: &str,
    subs: &TitleSubstitutions,
) -> Vec<&'a SongAppearance> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return records.iter().collect();
    }

    if let Some(date) = parse_date_query(trimmed) {
        return records
            .iter()
            .filter(|r| r.dates.iter().any(|d| d.date == date))
            .collect();
    }

    let needle = normalize(trimmed);
    records
        .iter()
        .filter(|r| {
            normalize(subs.apply(&r.song_name)).contains(&needle)
                || normalize(&r.artist).contains(&needle)
                || r.source
                    .as_deref()
                    .map(|s| normalize(s).contains(&needle))
                    .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateEntry;

    fn record(song: &str, artist: &str, source: Option<&str>, dates: &[&str]) -> SongAppearance {
        let mut r = SongAppearance::new(song, artist);
        r.source = source.map(str::to_string);
        r.dates = dates.iter().map(|d| DateEntry::new(*d, "https://youtu.be/x")).collect();
        r
    }

    fn dataset() -> Vec<SongAppearance> {
        vec![
            record("夜に駆ける", "YOASOBI", Some("THE BOOK"), &["20230101"]),
            record("Melt", "ryo", Some("VOCALOID"), &["20230215", "20221120"]),
            record("群青", "YOASOBI", None, &["20230215"]),
        ]
    }

    #[test]
    fn empty_query_passes_everything_through() {
        let data = dataset();
        assert_eq!(filter_records(&data, "", &TitleSubstitutions::default()).len(), 3);
        assert_eq!(filter_records(&data, "   ", &TitleSubstitutions::default()).len(), 3);
    }

    #[test]
    fn matches_title_artist_and_source() {
        let data = dataset();
        let subs = TitleSubstitutions::default();
        assert_eq!(filter_records(&data, "駆ける", &subs).len(), 1);
        assert_eq!(filter_records(&data, "yoasobi", &subs).len(), 2);
        assert_eq!(filter_records(&data, "vocaloid", &subs).len(), 1);
    }

    #[test]
    fn query_is_normalized_like_the_data() {
        let data = dataset();
        let subs = TitleSubstitutions::default();
        assert_eq!(filter_records(&data, "ＭＥＬＴ", &subs).len(), 1);
        assert_eq!(filter_records(&data, "melt", &subs).len(), 1);
    }

    #[test]
    fn valid_date_query_matches_by_exact_date() {
        let data = dataset();
        let hits = filter_records(&data, "20230215", &TitleSubstitutions::default());
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn odd_length_digit_query_falls_back_to_substring() {
        let data = dataset();
        // 7 digits: not a date, and no field contains it
        assert!(filter_records(&data, "0101202", &TitleSubstitutions::default()).is_empty());
    }

    #[test]
    fn invalid_month_falls_back_to_substring() {
        let data = dataset();
        assert!(filter_records(&data, "20231301", &TitleSubstitutions::default()).is_empty());
    }

    #[test]
    fn filtering_is_pure() {
        let data = dataset();
        let subs = TitleSubstitutions::default();
        let first: Vec<String> = filter_records(&data, "yoasobi", &subs)
            .iter()
            .map(|r| r.song_name.clone())
            .collect();
        let second: Vec<String> = filter_records(&data, "yoasobi", &subs)
            .iter()
            .map(|r| r.song_name.clone())
            .collect();
        assert_eq!(first, second);
        assert_eq!(data, dataset());
    }

    #[test]
    fn substituted_title_is_searchable() {
        let subs = TitleSubstitutions::from_pairs([("某曲", "夜に駆ける")]);
        let data = vec![record("某曲", "YOASOBI", None, &["20230101"])];
        assert_eq!(filter_records(&data, "駆ける", &subs).len(), 1);
    }
}
