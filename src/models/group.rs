//! Derived display entities: the merged song groups.

use serde::{Deserialize, Serialize};

use crate::models::song::{DateEntry, SongAppearance};

/// Normalized grouping key. Two records merge exactly when both components
/// are equal after normalization, so the key is a struct rather than a
/// joined string (no separator collisions).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub title: String,
    pub artist: String,
}

impl GroupKey {
    /// Flat string form used as row identity in the DOM and across the JS
    /// boundary. U+001F cannot appear in normalized text, so the join is
    /// reversible and collision-free.
    pub fn token(&self) -> String {
        format!("{}\u{1f}{}", self.title, self.artist)
    }
}

/// Merged display entity for all appearances sharing a normalized
/// (song, artist) key.
///
/// Rebuilt from scratch on every filter/search; metadata comes from the
/// first record seen with this key, dates accumulate from all of them and
/// are kept newest-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongGroup {
    pub key: GroupKey,

    /// Display title (substitutions applied, original casing preserved)
    pub title: String,
    pub artist: String,
    pub source: Option<String>,
    pub note: Option<String>,
    pub is_copyright: bool,
    pub az: Option<String>,

    /// Union of all date entries, newest first after grouping
    pub dates: Vec<DateEntry>,
}

impl SongGroup {
    /// Seed a group from the first record carrying its key. `title` is the
    /// display title, which may differ from `record.song_name` when a
    /// substitution applied.
    pub fn from_record(key: GroupKey, title: &str, record: &SongAppearance) -> Self {
        SongGroup {
            key,
            title: title.to_string(),
            artist: record.artist.clone(),
            source: record.source.clone(),
            note: record.note.clone(),
            is_copyright: record.is_copyright,
            az: record.az.clone(),
            dates: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_distinct_keys() {
        let a = GroupKey { title: "ab".into(), artist: "c".into() };
        let b = GroupKey { title: "a".into(), artist: "bc".into() };
        assert_ne!(a.token(), b.token());
    }

    #[test]
    fn first_record_wins_metadata() {
        let mut first = SongAppearance::new("Melt", "ryo");
        first.source = Some("VOCALOID".into());
        first.is_copyright = true;
        let key = GroupKey { title: "melt".into(), artist: "ryo".into() };
        let group = SongGroup::from_record(key, "Melt", &first);
        assert_eq!(group.source.as_deref(), Some("VOCALOID"));
        assert!(group.is_copyright);
        assert!(group.dates.is_empty());
    }
}
