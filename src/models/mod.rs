//! Data models for the song catalog
//!
//! Dataset records (`SongAppearance`, `DateEntry`) are immutable inputs
//! parsed straight from the fetched JSON. `SongGroup` is the derived display
//! entity rebuilt on every filter. Discography records are a separate,
//! read-only rendering path.

pub mod discography;
pub mod group;
pub mod song;

// Re-export commonly used types
pub use discography::{Album, Category, Discography, Track};
pub use group::{GroupKey, SongGroup};
pub use song::{DateEntry, SongAppearance};
