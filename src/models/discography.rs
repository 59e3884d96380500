//! Album catalog records (the discography JSON).
//!
//! The resource is an object keyed by category id (`armony`,
//! `other_circles`, `solo`, ...), each holding a display name, a blurb, and
//! its albums. Field names follow the published JSON, hence the camelCase
//! renames.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The whole discography resource: category id -> category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discography(pub BTreeMap<String, Category>);

impl Discography {
    /// Categories in display order, skipping empty ones.
    pub fn render_order(&self) -> impl Iterator<Item = (&String, &Category)> {
        self.0.iter().filter(|(_, c)| !c.albums.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Human-readable category title
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub albums: Vec<Album>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub title: String,

    /// Release kind label shown on the card, e.g. "Album" or "Single"
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(rename = "releaseDate", default)]
    pub release_date: String,

    /// YouTube link or bare video/playlist id for the whole release
    #[serde(rename = "ytUrl", default, skip_serializing_if = "Option::is_none")]
    pub yt_url: Option<String>,

    /// linkco.re slug for the "other platforms" link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkcore: Option<String>,

    #[serde(default)]
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,

    /// Writing/arrangement credits line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<String>,

    /// YouTube video id for the track's play button
    #[serde(rename = "videoId", default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}
