//! Song Catalog WASM Module
//!
//! Single-page catalog browser for a performer's song archive: dataset
//! loading, normalization, grouping, search and filtering, a virtualized
//! table with expandable date columns, discography cards, and an embedded
//! player.

pub mod api;
pub mod catalog;
pub mod error;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod player;
pub mod render;

// Re-export commonly used types
pub use catalog::{CatalogConfig, CatalogState, TitleSubstitutions};
pub use error::CatalogError;
pub use models::{DateEntry, Discography, GroupKey, SongAppearance, SongGroup};
pub use render::{DateCell, RowModel};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Song catalog WASM module initialized");
}
