//! Dataset fetching.
//!
//! Both dataset files are plain JSON fetched from the hosting origin. The
//! catalog is served with `no-cache` so a freshly published dataset shows
//! up on reload without waiting out the HTTP cache.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, Response};

use crate::error::CatalogError;
use crate::models::{Discography, SongAppearance};

/// Fetches `url` and returns the response body as text. Non-2xx statuses
/// become [`CatalogError::Http`].
pub async fn fetch_json_text(url: &str) -> Result<String, CatalogError> {
    let window = web_sys::window().ok_or_else(|| CatalogError::Fetch("no window".into()))?;

    let mut opts = RequestInit::new();
    opts.cache(RequestCache::NoCache);
    let request = Request::new_with_str_and_init(url, &opts)?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()
        .map_err(|_| CatalogError::Fetch(format!("{url}: response cast failed")))?;
    if !response.ok() {
        return Err(CatalogError::Http(response.status()));
    }

    let text = JsFuture::from(response.text()?).await?;
    text.as_string()
        .ok_or_else(|| CatalogError::Fetch(format!("{url}: body was not text")))
}

/// Fetches and parses the song dataset.
pub async fn fetch_songs(url: &str) -> Result<Vec<SongAppearance>, CatalogError> {
    let body = fetch_json_text(url).await?;
    let songs: Vec<SongAppearance> = serde_json::from_str(&body)?;
    log::info!("loaded {} records from {url}", songs.len());
    Ok(songs)
}

/// Fetches and parses the discography dataset.
pub async fn fetch_discography(url: &str) -> Result<Discography, CatalogError> {
    let body = fetch_json_text(url).await?;
    let disc: Discography = serde_json::from_str(&body)?;
    log::info!(
        "loaded discography: {} categories from {url}",
        disc.0.len()
    );
    Ok(disc)
}
