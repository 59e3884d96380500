//! Song Catalog WASM API
//!
//! This module provides the JavaScript-facing API for the catalog page.
//! It includes shared utilities for serialization, error handling, and
//! logging, as well as the exported API functions.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, error handling, and logging
//! - `core`: The exported API functions (loading, search, rendering, player)

pub mod helpers;
pub mod core;

// Re-export all public functions so JS-facing entry points live in one place
pub use core::*;
