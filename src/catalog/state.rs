//! The explicit application state and its configuration.
//!
//! One `CatalogState` instance owns the raw dataset and the bookkeeping
//! that must survive re-renders (the memoized unique-song count). It is
//! plain data: the pipeline functions take it by reference, and the WASM
//! boundary owns the single live instance.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::grouping;
use crate::models::SongAppearance;

/// Externally configurable title substitution table: exact match on the raw
/// title, replaced before grouping keys are computed and before display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleSubstitutions(pub HashMap<String, String>);

impl TitleSubstitutions {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        TitleSubstitutions(
            pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        )
    }

    pub fn apply<'a>(&'a self, title: &'a str) -> &'a str {
        self.0.get(title).map(String::as_str).unwrap_or(title)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Tunables for the pipeline and the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Visible date columns per row before expansion
    pub num_dates: usize,

    /// Search debounce interval in milliseconds
    pub debounce_ms: u32,

    /// Virtual-scroll row height in pixels
    pub row_height: f64,

    /// Extra rows rendered above and below the viewport
    pub overscan_rows: usize,

    /// Title substitution table
    pub substitutions: TitleSubstitutions,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            num_dates: 3,
            debounce_ms: 300,
            row_height: 20.0,
            overscan_rows: 5,
            substitutions: TitleSubstitutions::default(),
        }
    }
}

/// Canonical application state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogState {
    /// The raw dataset, immutable once installed
    pub songs: Vec<SongAppearance>,

    /// Unique-song count, computed once from the raw dataset on first use
    unique_songs: Option<usize>,

    pub config: CatalogConfig,
}

impl CatalogState {
    pub fn new(songs: Vec<SongAppearance>, config: CatalogConfig) -> Self {
        CatalogState { songs, unique_songs: None, config }
    }

    /// Replaces the dataset and invalidates the memoized count.
    pub fn install(&mut self, songs: Vec<SongAppearance>) {
        self.songs = songs;
        self.unique_songs = None;
    }

    /// Memoized unique-song count over the full dataset.
    pub fn unique_song_count(&mut self) -> usize {
        match self.unique_songs {
            Some(n) => n,
            None => {
                let n = grouping::unique_song_count(&self.songs, &self.config.substitutions);
                self.unique_songs = Some(n);
                n
            }
        }
    }

    /// Substitutions changed: keys may merge differently now.
    pub fn set_substitutions(&mut self, subs: TitleSubstitutions) {
        self.config.substitutions = subs;
        self.unique_songs = None;
    }
}
