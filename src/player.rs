//! Embedded video player: link validation, embed URLs, discography
//! reference parsing, and the floating iframe itself.
//!
//! Every link that reaches the player goes through [`validate`] first.
//! Only `https` links on the three allow-listed hosts are accepted; the
//! embed URL is then rebuilt from the extracted video id rather than
//! passed through, so nothing from the dataset lands in the iframe `src`
//! verbatim.

use url::Url;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlIFrameElement};

use crate::error::CatalogError;

pub const PLAYER_CONTAINER_ID: &str = "floatingPlayerContainer";
pub const PLAYER_FRAME_ID: &str = "floatingPlayer";

/// Hosts the player will embed from.
pub const ALLOWED_HOSTS: [&str; 3] = ["www.youtube.com", "music.youtube.com", "youtu.be"];

/// A link that passed validation, with its embed form precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLink {
    /// The link as it appeared in the dataset (mobile opens this directly)
    pub original: String,
    /// `https://www.youtube.com/embed/{id}?start={seconds}`
    pub embed: String,
}

/// Checks scheme, host, and video id, and builds the embed URL.
pub fn validate(link: &str) -> Result<ValidatedLink, CatalogError> {
    let trimmed = link.trim();
    let url = Url::parse(trimmed)
        .map_err(|e| CatalogError::BadLink(format!("{trimmed}: {e}")))?;

    if url.scheme() != "https" {
        return Err(CatalogError::BadLink(format!(
            "{trimmed}: scheme {} is not https",
            url.scheme()
        )));
    }
    let host = url
        .host_str()
        .ok_or_else(|| CatalogError::BadLink(format!("{trimmed}: no host")))?;
    if !ALLOWED_HOSTS.contains(&host) {
        return Err(CatalogError::BadLink(format!(
            "{trimmed}: host {host} is not allow-listed"
        )));
    }

    let id = video_id(&url)
        .filter(|id| is_clean_id(id))
        .ok_or_else(|| CatalogError::BadLink(format!("{trimmed}: no video id")))?;

    Ok(ValidatedLink {
        original: trimmed.to_string(),
        embed: format!(
            "https://www.youtube.com/embed/{id}?start={}",
            start_seconds(&url)
        ),
    })
}

/// `v` query parameter, or the first path segment on `youtu.be` short
/// links.
fn video_id(url: &Url) -> Option<String> {
    if url.host_str() == Some("youtu.be") {
        return url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
    }
    query_param(url, "v")
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

fn is_clean_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Start offset from `t` (or `start`). A trailing `s` is dropped; anything
/// that is not plain seconds falls back to 0.
fn start_seconds(url: &Url) -> u64 {
    let raw = query_param(url, "t").or_else(|| query_param(url, "start"));
    let Some(raw) = raw else { return 0 };
    let digits = raw.strip_suffix('s').unwrap_or(&raw);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().unwrap_or(0)
    } else {
        0
    }
}

/// What a discography `ytUrl` points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YtKind {
    Video,
    Playlist,
    /// A single track on `music.youtube.com`
    MusicTrack,
}

/// Parsed discography reference; `id` is a video or playlist id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YtRef {
    pub id: String,
    pub kind: YtKind,
}

/// Classifies a discography reference. Accepts full URLs and bare ids:
/// `OLAK5uy_…` tokens are album playlists, other bare tokens are playlists
/// when longer than 20 characters and videos otherwise. Anything
/// unparseable is kept as-is and treated as a playlist id.
pub fn parse_yt_ref(raw: &str) -> YtRef {
    let trimmed = raw.trim();

    if trimmed.starts_with("OLAK5uy_") {
        return YtRef { id: trimmed.to_string(), kind: YtKind::Playlist };
    }
    if !trimmed.contains('/') && !trimmed.contains('.') {
        let kind = if trimmed.len() > 20 { YtKind::Playlist } else { YtKind::Video };
        return YtRef { id: trimmed.to_string(), kind };
    }

    if let Ok(url) = Url::parse(trimmed) {
        let host = url.host_str().unwrap_or_default();
        if let Some(id) = query_param(&url, "list") {
            return YtRef { id, kind: YtKind::Playlist };
        }
        let is_watch = url.path().contains("/watch");
        if let Some(id) = query_param(&url, "v") {
            if is_watch && host == "music.youtube.com" {
                return YtRef { id, kind: YtKind::MusicTrack };
            }
            if is_watch {
                return YtRef { id, kind: YtKind::Video };
            }
        }
        if host == "youtu.be" {
            if let Some(id) = url
                .path_segments()
                .and_then(|mut segments| segments.next())
                .filter(|s| !s.is_empty())
            {
                return YtRef { id: id.to_string(), kind: YtKind::Video };
            }
        }
    }

    YtRef { id: trimmed.to_string(), kind: YtKind::Playlist }
}

/// External link for an album card: playlists go to YouTube Music,
/// everything else to the plain watch page. Returns the URL and the link
/// caption.
pub fn album_external_link(yt: &YtRef) -> (String, &'static str) {
    match yt.kind {
        YtKind::Playlist => (
            format!("https://music.youtube.com/playlist?list={}", yt.id),
            "YouTube Music",
        ),
        YtKind::Video | YtKind::MusicTrack => {
            (format!("https://youtu.be/{}", yt.id), "YouTube")
        }
    }
}

/// Watch URL for a track play button.
pub fn track_watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// Whether the floating player is showing, and what.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlayerState {
    #[default]
    Closed,
    Open {
        embed: String,
    },
}

/// Mobile browsers get the link opened in a new tab instead of the
/// floating iframe.
pub fn is_mobile() -> bool {
    web_sys::window()
        .and_then(|w| w.navigator().user_agent().ok())
        .map(|ua| {
            let ua = ua.to_lowercase();
            ua.contains("mobi") || ua.contains("android")
        })
        .unwrap_or(false)
}

fn frame(doc: &Document) -> Result<HtmlIFrameElement, CatalogError> {
    doc.get_element_by_id(PLAYER_FRAME_ID)
        .ok_or_else(|| CatalogError::MissingElement(PLAYER_FRAME_ID.into()))?
        .dyn_into::<HtmlIFrameElement>()
        .map_err(|_| CatalogError::Dom(format!("#{PLAYER_FRAME_ID} is not an iframe")))
}

fn container(doc: &Document) -> Result<HtmlElement, CatalogError> {
    doc.get_element_by_id(PLAYER_CONTAINER_ID)
        .ok_or_else(|| CatalogError::MissingElement(PLAYER_CONTAINER_ID.into()))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| CatalogError::Dom(format!("#{PLAYER_CONTAINER_ID} is not an element")))
}

/// Points the iframe at the embed URL and shows the container.
pub fn show(doc: &Document, link: &ValidatedLink) -> Result<(), CatalogError> {
    let frame = frame(doc)?;
    frame.set_src(&link.embed);
    frame
        .style()
        .set_property("width", "100%")
        .and_then(|_| frame.style().set_property("height", "100%"))
        .map_err(CatalogError::dom)?;
    container(doc)?
        .style()
        .set_property("display", "block")
        .map_err(CatalogError::dom)?;
    Ok(())
}

/// Clears the iframe `src` (stopping playback) before hiding the
/// container.
pub fn hide(doc: &Document) -> Result<(), CatalogError> {
    frame(doc)?.set_src("");
    container(doc)?
        .style()
        .set_property("display", "none")
        .map_err(CatalogError::dom)?;
    Ok(())
}
