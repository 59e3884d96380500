//! Error types for the catalog module
//!
//! Everything here degrades rather than crashes: a failed fetch or a
//! rejected link leaves the previous UI state intact, so callers log the
//! error and stop.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Top-level error type for catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network-level fetch failure (DNS, CORS, aborted request)
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Server answered with a non-success status
    #[error("request failed with HTTP status {0}")]
    Http(u16),

    /// Response body did not match the expected JSON shape
    #[error("dataset parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// A DOM element the shell is supposed to provide was not found
    #[error("missing DOM element: #{0}")]
    MissingElement(String),

    /// A DOM operation failed mid-render
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// A video link was malformed or pointed outside the allow-list
    #[error("link rejected: {0}")]
    BadLink(String),

    /// An operation needed a dataset before one was loaded
    #[error("no dataset loaded")]
    NoDataset,
}

impl CatalogError {
    /// Wraps a raw `JsValue` thrown by a DOM call.
    pub(crate) fn dom(err: JsValue) -> Self {
        CatalogError::Dom(format!("{err:?}"))
    }
}

impl From<CatalogError> for JsValue {
    fn from(err: CatalogError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

impl From<JsValue> for CatalogError {
    fn from(value: JsValue) -> Self {
        CatalogError::Fetch(format!("{value:?}"))
    }
}
