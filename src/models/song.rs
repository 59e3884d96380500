//! Dataset records as fetched from the song archive.

use serde::{Deserialize, Serialize};

/// One performance instance inside a [`SongAppearance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateEntry {
    /// Performance date as an 8-digit `YYYYMMDD` string
    pub date: String,

    /// Time-of-day offset inside the stream, `H:MM:SS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Video link for this performance (usually `watch?v=ID&t=SECONDSs`)
    pub link: String,

    /// Performed on a members-only stream
    #[serde(default)]
    pub is_member_exclusive: bool,

    /// Sung without accompaniment
    #[serde(default)]
    pub is_acapella: bool,

    /// Source video is no longer publicly reachable
    #[serde(default)]
    pub is_private: bool,
}

impl DateEntry {
    pub fn new(date: impl Into<String>, link: impl Into<String>) -> Self {
        DateEntry {
            date: date.into(),
            time: None,
            link: link.into(),
            is_member_exclusive: false,
            is_acapella: false,
            is_private: false,
        }
    }
}

/// One dataset record: a song plus every date it was performed.
///
/// Records are immutable inputs. Textual variants of the same title merge
/// later, during grouping; nothing here is normalized yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongAppearance {
    /// Song title as it appeared in the stream timeline
    pub song_name: String,

    /// Performing/original artist
    pub artist: String,

    /// Source work (anime, game, album) when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Free-form remark carried through to the rendered row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Title is rights-restricted and gets flagged in the table
    #[serde(default)]
    pub is_copyright: bool,

    /// Sort-bucket override: when present, group ordering classifies this
    /// string instead of the title's first character
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub az: Option<String>,

    /// Performance dates, any order; may be absent in sparse records
    #[serde(default)]
    pub dates: Vec<DateEntry>,
}

impl SongAppearance {
    pub fn new(song_name: impl Into<String>, artist: impl Into<String>) -> Self {
        SongAppearance {
            song_name: song_name.into(),
            artist: artist.into(),
            source: None,
            note: None,
            is_copyright: false,
            az: None,
            dates: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_record() {
        let json = r#"{"song_name": "シャルル", "artist": "バルーン"}"#;
        let record: SongAppearance = serde_json::from_str(json).unwrap();
        assert_eq!(record.song_name, "シャルル");
        assert!(record.dates.is_empty());
        assert!(!record.is_copyright);
    }

    #[test]
    fn deserializes_full_entry() {
        let json = r#"{
            "song_name": "アイドル",
            "artist": "YOASOBI",
            "source": "推しの子",
            "az": "あ",
            "dates": [
                {"date": "20230615", "time": "1:02:03",
                 "link": "https://www.youtube.com/watch?v=abc&t=3723s",
                 "is_member_exclusive": true}
            ]
        }"#;
        let record: SongAppearance = serde_json::from_str(json).unwrap();
        assert_eq!(record.az.as_deref(), Some("あ"));
        assert_eq!(record.dates.len(), 1);
        assert!(record.dates[0].is_member_exclusive);
        assert!(!record.dates[0].is_acapella);
        assert_eq!(record.dates[0].time.as_deref(), Some("1:02:03"));
    }
}
