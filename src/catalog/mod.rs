//! The pure transformation pipeline: normalize -> group -> sort -> filter.
//!
//! Nothing in this module touches the DOM or holds global state; every
//! function is a plain function of its inputs so the pipeline is testable
//! without a browser.

pub mod collate;
pub mod dates;
pub mod filter;
pub mod grouping;
pub mod state;

pub use filter::filter_records;
pub use grouping::{group_records, unique_song_count};
pub use state::{CatalogConfig, CatalogState, TitleSubstitutions};
