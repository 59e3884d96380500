//! DOM materialization of row models.
//!
//! The shell provides the table (`#songTable` with a `thead`/`tbody`), the
//! counter (`#songCount`), and the scroll container
//! (`#virtualScrollContainer`); this module only fills them in. All
//! decisions were already made in [`rows`](crate::render::rows) — here is
//! just element construction.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::error::CatalogError;
use crate::normalize::sanitize;
use crate::render::rows::RowModel;
use crate::render::scroll::RowWindow;

pub const SONG_TABLE_ID: &str = "songTable";
pub const SONG_COUNT_ID: &str = "songCount";
pub const SCROLL_CONTAINER_ID: &str = "virtualScrollContainer";
pub const SEARCH_INPUT_ID: &str = "searchInput";

/// Class on the `<a>` inside every date cell; the delegated click handler
/// matches on it.
pub const DATE_LINK_CLASS: &str = "date-link";
/// Class on the `...` expand control.
pub const MORE_BUTTON_CLASS: &str = "more-dates";

pub fn document() -> Result<Document, CatalogError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| CatalogError::Dom("no document".into()))
}

fn element_by_id(doc: &Document, id: &str) -> Result<Element, CatalogError> {
    doc.get_element_by_id(id)
        .ok_or_else(|| CatalogError::MissingElement(id.into()))
}

fn dom_err(err: JsValue) -> CatalogError {
    CatalogError::dom(err)
}

/// Scroll offset and viewport height of the virtualization container, or
/// `None` when the shell does not provide one (then everything renders).
pub fn scroll_metrics(doc: &Document) -> Option<(f64, f64)> {
    let container = doc.get_element_by_id(SCROLL_CONTAINER_ID)?;
    Some((container.scroll_top() as f64, container.client_height() as f64))
}

/// Writes the unique-song counter.
pub fn set_song_count(doc: &Document, count: usize) -> Result<(), CatalogError> {
    element_by_id(doc, SONG_COUNT_ID)?.set_text_content(Some(&count.to_string()));
    Ok(())
}

/// Replaces the table body with the windowed slice of `rows`, spacer rows
/// above and below preserving scrollbar geometry.
pub fn render_table(
    doc: &Document,
    rows: &[RowModel],
    window: &RowWindow,
    fallback_columns: usize,
) -> Result<(), CatalogError> {
    let table = element_by_id(doc, SONG_TABLE_ID)?;
    let tbody = table
        .query_selector("tbody")
        .map_err(dom_err)?
        .ok_or_else(|| CatalogError::Dom("songTable has no tbody".into()))?;

    tbody.set_inner_html("");

    let slice = &rows[window.start.min(rows.len())..window.end.min(rows.len())];
    // span over the full row set, not the window, so the header does not
    // jitter while scrolling
    let date_columns = date_column_count(rows, fallback_columns);

    if window.pad_top > 0.0 {
        tbody
            .append_child(&spacer_row(doc, window.pad_top, date_columns + 4)?.into())
            .map_err(dom_err)?;
    }
    for row in slice {
        tbody.append_child(&build_row_element(doc, row)?.into()).map_err(dom_err)?;
    }
    if window.pad_bottom > 0.0 {
        tbody
            .append_child(&spacer_row(doc, window.pad_bottom, date_columns + 4)?.into())
            .map_err(dom_err)?;
    }

    update_date_header(doc, date_columns)?;
    Ok(())
}

/// Recomputes the grouped header span after an expansion toggle.
pub fn refresh_header_span(
    doc: &Document,
    rows: &[RowModel],
    fallback_columns: usize,
) -> Result<(), CatalogError> {
    update_date_header(doc, date_column_count(rows, fallback_columns))
}

/// Widest date span among the rendered rows: visible cells, padding, and
/// the expand control all take a column.
fn date_column_count(rows: &[RowModel], fallback: usize) -> usize {
    rows.iter()
        .map(|r| r.visible_cells() + r.placeholders + usize::from(r.expandable))
        .max()
        .unwrap_or(fallback)
        .max(1)
}

/// Keeps the grouped "dates" header cell spanning every date column.
fn update_date_header(doc: &Document, columns: usize) -> Result<(), CatalogError> {
    if let Some(header) = doc.query_selector(".date-header").map_err(dom_err)? {
        header
            .set_attribute("colspan", &columns.to_string())
            .map_err(dom_err)?;
    }
    Ok(())
}

fn spacer_row(doc: &Document, height_px: f64, columns: usize) -> Result<Element, CatalogError> {
    let tr = doc.create_element("tr").map_err(dom_err)?;
    tr.set_class_name("spacer-row");
    let td = doc.create_element("td").map_err(dom_err)?;
    td.set_attribute("colspan", &columns.to_string()).map_err(dom_err)?;
    td.set_attribute("style", &format!("height:{height_px}px;padding:0;border:none"))
        .map_err(dom_err)?;
    tr.append_child(&td).map_err(dom_err)?;
    Ok(tr)
}

fn build_row_element(doc: &Document, row: &RowModel) -> Result<Element, CatalogError> {
    let tr = doc.create_element("tr").map_err(dom_err)?;
    tr.set_attribute("data-key", &row.key).map_err(dom_err)?;

    let bucket = doc.create_element("td").map_err(dom_err)?;
    bucket.set_class_name("az-cell");
    bucket.set_text_content(Some(&row.bucket_label));
    tr.append_child(&bucket).map_err(dom_err)?;

    let title = doc.create_element("td").map_err(dom_err)?;
    title.set_class_name(if row.copyright { "title-cell copyright" } else { "title-cell" });
    title.set_text_content(Some(&row.title));
    if let Some(note) = row.note.as_deref() {
        title.set_attribute("title", &sanitize(note)).map_err(dom_err)?;
    }
    tr.append_child(&title).map_err(dom_err)?;

    let artist = doc.create_element("td").map_err(dom_err)?;
    artist.set_class_name("artist-cell");
    artist.set_text_content(Some(&row.artist));
    tr.append_child(&artist).map_err(dom_err)?;

    let source = doc.create_element("td").map_err(dom_err)?;
    source.set_class_name("source-cell");
    source.set_text_content(Some(&row.source));
    tr.append_child(&source).map_err(dom_err)?;

    for cell in &row.cells {
        let td = doc.create_element("td").map_err(dom_err)?;
        let mut classes = String::from("date-cell");
        if cell.acapella {
            classes.push_str(" acapella");
        }
        if cell.private {
            classes.push_str(" private");
        }
        if cell.extra {
            classes.push_str(" extra-date");
        }
        if cell.hidden {
            td.set_attribute("style", "display:none").map_err(dom_err)?;
        }
        td.set_class_name(&classes);

        let link = doc.create_element("a").map_err(dom_err)?;
        link.set_class_name(DATE_LINK_CLASS);
        // only https links get a live href; the player re-validates the
        // host on click either way
        if cell.link.starts_with("https://") {
            link.set_attribute("href", &cell.link).map_err(dom_err)?;
        }
        link.set_attribute("target", "_blank").map_err(dom_err)?;
        link.set_text_content(Some(&cell.label));
        if cell.member_exclusive {
            let lock = doc.create_element("span").map_err(dom_err)?;
            lock.set_class_name("lock-icon");
            lock.set_text_content(Some("\u{1f512}"));
            link.append_child(&lock).map_err(dom_err)?;
        }
        if cell.private {
            let blocked = doc.create_element("span").map_err(dom_err)?;
            blocked.set_class_name("private-icon");
            blocked.set_text_content(Some("\u{26d4}"));
            link.append_child(&blocked).map_err(dom_err)?;
        }
        td.append_child(&link).map_err(dom_err)?;
        tr.append_child(&td).map_err(dom_err)?;
    }

    for _ in 0..row.placeholders {
        let td = doc.create_element("td").map_err(dom_err)?;
        td.set_class_name("date-cell placeholder");
        td.set_text_content(Some("-"));
        tr.append_child(&td).map_err(dom_err)?;
    }

    if row.expandable {
        let td = doc.create_element("td").map_err(dom_err)?;
        td.set_class_name("date-cell");
        let button = doc.create_element("button").map_err(dom_err)?;
        button.set_class_name(MORE_BUTTON_CLASS);
        button.set_text_content(Some("..."));
        td.append_child(&button).map_err(dom_err)?;
        tr.append_child(&td).map_err(dom_err)?;
    }

    Ok(tr)
}

/// Flips a rendered row's extra date cells in place. The row itself is not
/// rebuilt; only the `display` of cells already in the document changes.
pub fn set_row_expanded(doc: &Document, key: &str, expanded: bool) -> Result<(), CatalogError> {
    let table = element_by_id(doc, SONG_TABLE_ID)?;
    let selector = "tr[data-key]";
    let mut row = table.query_selector(selector).map_err(dom_err)?;
    // walk the rendered rows; keys contain U+001F so attribute-selector
    // escaping is not worth the trouble
    while let Some(tr) = row {
        if tr.get_attribute("data-key").as_deref() == Some(key) {
            let mut cell = tr.first_element_child();
            while let Some(td) = cell {
                if td.class_list().contains("extra-date") {
                    if expanded {
                        td.remove_attribute("style").map_err(dom_err)?;
                    } else {
                        td.set_attribute("style", "display:none").map_err(dom_err)?;
                    }
                }
                cell = td.next_element_sibling();
            }
            return Ok(());
        }
        row = tr.next_element_sibling();
    }
    Ok(())
}
