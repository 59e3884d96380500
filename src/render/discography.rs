//! Discography cards.
//!
//! Renders the category sections into `#discography-container`: one card
//! per album with its track list, play buttons, and external links. Play
//! buttons carry the video id in a `data-video-id` attribute; the
//! delegated click handler turns that into a watch URL for the floating
//! player.

use web_sys::{Document, Element};

use crate::error::CatalogError;
use crate::models::{Album, Category, Discography, Track};
use crate::player::{album_external_link, parse_yt_ref};

pub const DISC_CONTAINER_ID: &str = "discography-container";
pub const PLAY_BUTTON_CLASS: &str = "play-button";

/// Store-page link for a `linkcore` slug, or `None` when the slug carries
/// anything but the expected token characters.
pub fn linkcore_url(slug: &str) -> Option<String> {
    let trimmed = slug.trim();
    let clean = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    clean.then(|| format!("https://linkco.re/{trimmed}"))
}

/// Replaces the container contents with the full discography.
pub fn render_discography(doc: &Document, disc: &Discography) -> Result<(), CatalogError> {
    let container = doc
        .get_element_by_id(DISC_CONTAINER_ID)
        .ok_or_else(|| CatalogError::MissingElement(DISC_CONTAINER_ID.into()))?;
    container.set_inner_html("");

    for (key, category) in disc.render_order() {
        container
            .append_child(&category_section(doc, key, category)?.into())
            .map_err(CatalogError::dom)?;
    }
    Ok(())
}

fn category_section(
    doc: &Document,
    key: &str,
    category: &Category,
) -> Result<Element, CatalogError> {
    let section = doc.create_element("div").map_err(CatalogError::dom)?;
    section.set_class_name("category-section");
    section.set_id(key);

    let title = doc.create_element("h2").map_err(CatalogError::dom)?;
    title.set_class_name("category-title");
    title.set_text_content(Some(&category.name));
    section.append_child(&title).map_err(CatalogError::dom)?;

    let description = doc.create_element("p").map_err(CatalogError::dom)?;
    description.set_class_name("category-description");
    description.set_text_content(Some(&category.description));
    section.append_child(&description).map_err(CatalogError::dom)?;

    let cards = doc.create_element("div").map_err(CatalogError::dom)?;
    cards.set_class_name("disc-container");
    for album in &category.albums {
        cards
            .append_child(&album_card(doc, album)?.into())
            .map_err(CatalogError::dom)?;
    }
    section.append_child(&cards).map_err(CatalogError::dom)?;

    Ok(section)
}

fn album_card(doc: &Document, album: &Album) -> Result<Element, CatalogError> {
    let card = doc.create_element("div").map_err(CatalogError::dom)?;
    card.set_class_name("disc-card");

    let header = doc.create_element("div").map_err(CatalogError::dom)?;
    header.set_class_name("disc-header");
    for (class, text) in [
        ("disc-title", album.title.as_str()),
        ("disc-type", album.kind.as_str()),
        ("disc-release-date", album.release_date.as_str()),
    ] {
        let field = doc.create_element("div").map_err(CatalogError::dom)?;
        field.set_class_name(class);
        field.set_text_content(Some(text));
        header.append_child(&field).map_err(CatalogError::dom)?;
    }
    card.append_child(&header).map_err(CatalogError::dom)?;

    let list = doc.create_element("ul").map_err(CatalogError::dom)?;
    list.set_class_name("track-list");
    for (index, track) in album.tracks.iter().enumerate() {
        list.append_child(&track_item(doc, index, track)?.into())
            .map_err(CatalogError::dom)?;
    }
    card.append_child(&list).map_err(CatalogError::dom)?;

    card.append_child(&external_links(doc, album)?.into())
        .map_err(CatalogError::dom)?;

    Ok(card)
}

fn track_item(doc: &Document, index: usize, track: &Track) -> Result<Element, CatalogError> {
    let item = doc.create_element("li").map_err(CatalogError::dom)?;
    item.set_class_name("track-item");

    let number = doc.create_element("span").map_err(CatalogError::dom)?;
    number.set_class_name("track-number");
    number.set_text_content(Some(&(index + 1).to_string()));
    item.append_child(&number).map_err(CatalogError::dom)?;

    let info = doc.create_element("div").map_err(CatalogError::dom)?;
    info.set_class_name("track-info");
    let title = doc.create_element("div").map_err(CatalogError::dom)?;
    title.set_class_name("track-title");
    title.set_text_content(Some(&track.title));
    info.append_child(&title).map_err(CatalogError::dom)?;
    let credit = doc.create_element("div").map_err(CatalogError::dom)?;
    credit.set_class_name("track-credit");
    credit.set_text_content(Some(track.credits.as_deref().unwrap_or("")));
    info.append_child(&credit).map_err(CatalogError::dom)?;
    item.append_child(&info).map_err(CatalogError::dom)?;

    if let Some(video_id) = track.video_id.as_deref() {
        let button = doc.create_element("button").map_err(CatalogError::dom)?;
        button.set_class_name(PLAY_BUTTON_CLASS);
        button
            .set_attribute("data-video-id", video_id)
            .map_err(CatalogError::dom)?;
        button.set_text_content(Some("\u{25b7}"));
        item.append_child(&button).map_err(CatalogError::dom)?;
    }

    Ok(item)
}

fn external_links(doc: &Document, album: &Album) -> Result<Element, CatalogError> {
    let links = doc.create_element("div").map_err(CatalogError::dom)?;
    links.set_class_name("external-links");

    if let Some(yt_url) = album.yt_url.as_deref() {
        let yt = parse_yt_ref(yt_url);
        let (href, caption) = album_external_link(&yt);
        links
            .append_child(&external_anchor(doc, &href, caption)?.into())
            .map_err(CatalogError::dom)?;
    }
    if let Some(slug) = album.linkcore.as_deref() {
        match linkcore_url(slug) {
            Some(href) => {
                links
                    .append_child(&external_anchor(doc, &href, "其他平台")?.into())
                    .map_err(CatalogError::dom)?;
            }
            None => log::warn!("skipping malformed linkcore slug {slug:?}"),
        }
    }

    Ok(links)
}

fn external_anchor(doc: &Document, href: &str, caption: &str) -> Result<Element, CatalogError> {
    let anchor = doc.create_element("a").map_err(CatalogError::dom)?;
    anchor.set_class_name("external-link");
    anchor.set_attribute("href", href).map_err(CatalogError::dom)?;
    anchor
        .set_attribute("target", "_blank")
        .map_err(CatalogError::dom)?;
    anchor.set_text_content(Some(caption));
    Ok(anchor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linkcore_slugs_build_store_links() {
        assert_eq!(
            linkcore_url("a1B2-c_3").as_deref(),
            Some("https://linkco.re/a1B2-c_3")
        );
    }

    #[test]
    fn malformed_linkcore_slugs_are_dropped() {
        assert_eq!(linkcore_url(""), None);
        assert_eq!(linkcore_url("../../etc"), None);
        assert_eq!(linkcore_url("a b"), None);
    }
}
