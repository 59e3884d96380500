//! WASM API for the song catalog
//!
//! This module provides the JavaScript-facing API: dataset loading, the
//! search/group/render pipeline, row expansion, virtual scrolling, and the
//! floating player. The shell page owns the static markup; everything
//! dynamic goes through these exports.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::Mutex;
use gloo_timers::callback::Timeout;
use lazy_static::lazy_static;
use web_sys::{Document, Element, HtmlInputElement};

use crate::api::helpers;
use crate::catalog::{
    filter_records, group_records, CatalogState, TitleSubstitutions,
};
use crate::error::CatalogError;
use crate::loader;
use crate::models::SongAppearance;
use crate::player::{self, PlayerState};
use crate::render::discography::{self, render_discography};
use crate::render::{build_rows, compute_window, RowModel, RowWindow};
use crate::render::table;
use crate::{wasm_error, wasm_info, wasm_log, wasm_warn};

// WASM-owned catalog storage (canonical source of truth)
lazy_static! {
    static ref STATE: Mutex<Option<CatalogState>> = Mutex::new(None);
}

/// Per-page view state. Holds the pieces that are not `Send` (the pending
/// debounce timer) or that only matter to the rendered page: the active
/// query, the show-all flag, which rows are expanded, the player, and the
/// last built row models for scroll re-renders.
#[derive(Default)]
struct ViewState {
    query: String,
    show_all: bool,
    expanded: HashSet<String>,
    pending_search: Option<Timeout>,
    player: PlayerState,
    rows: Vec<RowModel>,
    bound: bool,
}

thread_local! {
    static VIEW: RefCell<ViewState> = RefCell::new(ViewState::default());
}

fn js_err(err: CatalogError) -> JsValue {
    wasm_error!("{}", err);
    JsValue::from(err)
}

fn performance_now() -> Option<f64> {
    web_sys::window().and_then(|w| w.performance()).map(|p| p.now())
}

/// Config copy for paths that must not hold the state lock (debounce
/// callbacks, scroll handling). Defaults apply before a dataset loads.
fn config_snapshot() -> crate::catalog::CatalogConfig {
    STATE
        .lock()
        .ok()
        .and_then(|guard| guard.as_ref().map(|s| s.config.clone()))
        .unwrap_or_default()
}

// ============================================================================
// Pipeline
// ============================================================================

/// Rebuilds row models from the current dataset + view state and renders
/// the visible window. The full pipeline: filter -> group -> rows.
fn refresh(state: &CatalogState, doc: &Document) -> Result<(), CatalogError> {
    let started = performance_now();

    VIEW.with(|view| {
        let mut view = view.borrow_mut();
        let limit = if view.show_all { None } else { Some(state.config.num_dates) };

        let filtered = filter_records(&state.songs, &view.query, &state.config.substitutions);
        let filtered_count = filtered.len();
        let groups = group_records(filtered, &state.config.substitutions);
        let rows = build_rows(&groups, limit, &view.expanded);
        view.rows = rows;

        let window = match table::scroll_metrics(doc) {
            Some((top, height)) => compute_window(
                top,
                height,
                state.config.row_height,
                view.rows.len(),
                state.config.overscan_rows,
            ),
            None => RowWindow::all(view.rows.len()),
        };
        table::render_table(doc, &view.rows, &window, state.config.num_dates)?;

        if let Some(t0) = started {
            if let Some(t1) = performance_now() {
                wasm_log!(
                    "pipeline: {} records -> {} rows, rendered {}..{} in {:.1}ms",
                    filtered_count,
                    view.rows.len(),
                    window.start,
                    window.end,
                    t1 - t0
                );
            }
        }
        Ok(())
    })
}

/// Renders if the shell markup is present; headless pages just keep the
/// dataset.
fn render_if_mounted(state: &CatalogState, doc: &Document) -> Result<(), CatalogError> {
    if doc.get_element_by_id(table::SONG_TABLE_ID).is_none() {
        wasm_warn!("#{} not in document; skipping render", table::SONG_TABLE_ID);
        return Ok(());
    }
    refresh(state, doc)
}

fn render_current() -> Result<(), JsValue> {
    let guard = STATE.lock().unwrap();
    let state = guard.as_ref().ok_or(CatalogError::NoDataset).map_err(js_err)?;
    let doc = table::document().map_err(js_err)?;
    render_if_mounted(state, &doc).map_err(js_err)
}

fn update_song_count(doc: &Document, unique: usize) -> Result<(), CatalogError> {
    if doc.get_element_by_id(table::SONG_COUNT_ID).is_some() {
        table::set_song_count(doc, unique)
    } else {
        wasm_warn!("#{} not in document", table::SONG_COUNT_ID);
        Ok(())
    }
}

fn install_dataset(songs: Vec<SongAppearance>) -> Result<usize, JsValue> {
    let unique = {
        let mut guard = STATE.lock().unwrap();
        let state = guard.get_or_insert_with(CatalogState::default);
        state.install(songs);
        state.unique_song_count()
    };
    let doc = table::document().map_err(js_err)?;
    update_song_count(&doc, unique).map_err(js_err)?;
    render_current()?;
    Ok(unique)
}

// ============================================================================
// Dataset loading
// ============================================================================

/// Fetch the song dataset, install it, and render. Resolves to the
/// unique-song count.
#[wasm_bindgen(js_name = loadCatalog)]
pub async fn load_catalog(url: String) -> Result<JsValue, JsValue> {
    wasm_info!("loadCatalog called: url={}", url);

    let songs = loader::fetch_songs(&url).await.map_err(js_err)?;
    let record_count = songs.len();
    let unique = install_dataset(songs)?;

    wasm_info!(
        "loadCatalog completed: {} records, {} unique songs",
        record_count,
        unique
    );
    Ok(JsValue::from_f64(unique as f64))
}

/// Install an already-parsed dataset (a JavaScript array of records)
/// without fetching. Returns the unique-song count.
#[wasm_bindgen(js_name = setDataset)]
pub fn set_dataset(records: JsValue) -> Result<JsValue, JsValue> {
    let songs: Vec<SongAppearance> = helpers::deserialize(records, "setDataset records")?;
    wasm_info!("setDataset called: {} records", songs.len());
    let unique = install_dataset(songs)?;
    Ok(JsValue::from_f64(unique as f64))
}

/// Replace the title substitution table (a plain `{from: to}` object) and
/// re-render. Keys merge differently after this, so the unique-song count
/// is recomputed.
#[wasm_bindgen(js_name = setSubstitutions)]
pub fn set_substitutions(table_js: JsValue) -> Result<(), JsValue> {
    let subs: TitleSubstitutions = helpers::deserialize(table_js, "setSubstitutions table")?;
    wasm_info!("setSubstitutions called: {} entries", subs.0.len());

    let unique = {
        let mut guard = STATE.lock().unwrap();
        let state = guard.as_mut().ok_or(CatalogError::NoDataset).map_err(js_err)?;
        state.set_substitutions(subs);
        state.unique_song_count()
    };
    let doc = table::document().map_err(js_err)?;
    update_song_count(&doc, unique).map_err(js_err)?;
    render_current()
}

/// Change how many date columns a collapsed row shows.
#[wasm_bindgen(js_name = setDateColumns)]
pub fn set_date_columns(columns: usize) -> Result<(), JsValue> {
    wasm_info!("setDateColumns called: {}", columns);
    if columns == 0 {
        wasm_error!("date column count must be at least 1");
        return Err(JsValue::from_str("date column count must be at least 1"));
    }
    {
        let mut guard = STATE.lock().unwrap();
        let state = guard.as_mut().ok_or(CatalogError::NoDataset).map_err(js_err)?;
        state.config.num_dates = columns;
    }
    render_current()
}

// ============================================================================
// Search / filter
// ============================================================================

fn apply_filter_now(query: &str) -> Result<(), JsValue> {
    VIEW.with(|view| view.borrow_mut().query = query.to_string());
    render_current()
}

/// Debounced search entry point: schedules a filter run, replacing (and
/// thereby cancelling) any timer from earlier keystrokes.
#[wasm_bindgen(js_name = searchInputChanged)]
pub fn search_input_changed(query: String) {
    let delay = config_snapshot().debounce_ms;
    VIEW.with(|view| {
        let mut view = view.borrow_mut();
        // Cancel any existing timer by replacing it. The fired handle is
        // left in place; dropping it later is a no-op.
        view.pending_search = Some(Timeout::new(delay, move || {
            if let Err(err) = apply_filter_now(&query) {
                wasm_error!("debounced filter failed: {:?}", err);
            }
        }));
    });
}

/// Apply a query immediately, bypassing the debounce.
#[wasm_bindgen(js_name = applyFilter)]
pub fn apply_filter(query: String) -> Result<(), JsValue> {
    wasm_log!("applyFilter called: {:?}", query);
    VIEW.with(|view| view.borrow_mut().pending_search = None);
    apply_filter_now(&query)
}

/// Flip the show-all toggle (every date column visible, no expansion
/// controls). Returns the new state.
#[wasm_bindgen(js_name = toggleShowAll)]
pub fn toggle_show_all() -> Result<bool, JsValue> {
    let show_all = VIEW.with(|view| {
        let mut view = view.borrow_mut();
        view.show_all = !view.show_all;
        view.show_all
    });
    wasm_info!("toggleShowAll: {}", show_all);
    render_current()?;
    Ok(show_all)
}

// ============================================================================
// Expansion and scrolling
// ============================================================================

/// Expand or collapse one row's extra date cells, in place. `key` is the
/// row's `data-key`. Returns the new expansion state.
#[wasm_bindgen(js_name = toggleRowExpansion)]
pub fn toggle_row_expansion(key: String) -> Result<bool, JsValue> {
    let expanded = VIEW.with(|view| {
        let mut view = view.borrow_mut();
        let expanded = if view.expanded.contains(&key) {
            view.expanded.remove(&key);
            false
        } else {
            view.expanded.insert(key.clone());
            true
        };
        for row in view.rows.iter_mut().filter(|r| r.key == key) {
            row.expanded = expanded;
            for cell in &mut row.cells {
                cell.hidden = cell.extra && !expanded;
            }
        }
        expanded
    });
    wasm_log!("toggleRowExpansion: expanded={}", expanded);

    let doc = table::document().map_err(js_err)?;
    table::set_row_expanded(&doc, &key, expanded).map_err(js_err)?;
    let fallback = config_snapshot().num_dates;
    VIEW.with(|view| table::refresh_header_span(&doc, &view.borrow().rows, fallback))
        .map_err(js_err)?;
    Ok(expanded)
}

/// Re-render the visible window from the cached row models. Wired to the
/// scroll container's `scroll` event.
#[wasm_bindgen(js_name = handleScroll)]
pub fn handle_scroll() -> Result<(), JsValue> {
    let config = config_snapshot();
    let doc = table::document().map_err(js_err)?;
    VIEW.with(|view| {
        let view = view.borrow();
        let window = match table::scroll_metrics(&doc) {
            Some((top, height)) => compute_window(
                top,
                height,
                config.row_height,
                view.rows.len(),
                config.overscan_rows,
            ),
            None => RowWindow::all(view.rows.len()),
        };
        table::render_table(&doc, &view.rows, &window, config.num_dates)
    })
    .map_err(js_err)
}

// ============================================================================
// Player
// ============================================================================

/// Validate a link and open the floating player (or, on mobile, a new
/// tab). Rejected links leave the page untouched.
#[wasm_bindgen(js_name = openPlayer)]
pub fn open_player(link: String) -> Result<(), JsValue> {
    wasm_log!("openPlayer called: {}", link);
    let validated = player::validate(&link).map_err(js_err)?;

    if player::is_mobile() {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        window.open_with_url_and_target(&validated.original, "_blank")?;
        return Ok(());
    }

    let doc = table::document().map_err(js_err)?;
    player::show(&doc, &validated).map_err(js_err)?;
    VIEW.with(|view| {
        view.borrow_mut().player = PlayerState::Open { embed: validated.embed.clone() };
    });
    Ok(())
}

/// Stop playback and hide the player.
#[wasm_bindgen(js_name = closePlayer)]
pub fn close_player() -> Result<(), JsValue> {
    wasm_log!("closePlayer called");
    let doc = table::document().map_err(js_err)?;
    player::hide(&doc).map_err(js_err)?;
    VIEW.with(|view| view.borrow_mut().player = PlayerState::Closed);
    Ok(())
}

// ============================================================================
// Discography
// ============================================================================

/// Fetch the discography dataset and render the album cards.
#[wasm_bindgen(js_name = loadDiscography)]
pub async fn load_discography(url: String) -> Result<(), JsValue> {
    wasm_info!("loadDiscography called: url={}", url);
    let disc = loader::fetch_discography(&url).await.map_err(js_err)?;
    let doc = table::document().map_err(js_err)?;
    render_discography(&doc, &disc).map_err(js_err)?;
    wasm_info!("loadDiscography completed");
    Ok(())
}

// ============================================================================
// Pure pipeline export
// ============================================================================

/// Run the transformation pipeline on a JavaScript array of records and
/// return the row models, without touching the installed dataset or the
/// DOM. Substitutions and expansion state are not applied; `date_columns`
/// of `null` means unbounded.
#[wasm_bindgen(js_name = buildRowModels)]
pub fn build_row_models(
    records: JsValue,
    query: String,
    date_columns: Option<usize>,
) -> Result<JsValue, JsValue> {
    let records: Vec<SongAppearance> = helpers::deserialize(records, "buildRowModels records")?;
    let subs = TitleSubstitutions::default();
    let filtered = filter_records(&records, &query, &subs);
    let groups = group_records(filtered, &subs);
    let rows = build_rows(&groups, date_columns, &HashSet::new());
    helpers::serialize(&rows, "buildRowModels result")
}

// ============================================================================
// Event wiring
// ============================================================================

fn event_element(event: &web_sys::Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

fn on_table_click(event: web_sys::MouseEvent) {
    let Some(target) = event_element(&event) else { return };

    let link_selector = format!("a.{}", table::DATE_LINK_CLASS);
    if let Ok(Some(anchor)) = target.closest(&link_selector) {
        event.prevent_default();
        if let Some(href) = anchor.get_attribute("href") {
            if let Err(err) = open_player(href) {
                wasm_error!("player open failed: {:?}", err);
            }
        }
        return;
    }

    let button_selector = format!("button.{}", table::MORE_BUTTON_CLASS);
    if let Ok(Some(button)) = target.closest(&button_selector) {
        if let Ok(Some(row)) = button.closest("tr") {
            if let Some(key) = row.get_attribute("data-key") {
                if let Err(err) = toggle_row_expansion(key) {
                    wasm_error!("expansion toggle failed: {:?}", err);
                }
            }
        }
    }
}

fn on_disc_click(event: web_sys::MouseEvent) {
    let Some(target) = event_element(&event) else { return };
    let selector = format!("button.{}", discography::PLAY_BUTTON_CLASS);
    if let Ok(Some(button)) = target.closest(&selector) {
        if let Some(video_id) = button.get_attribute("data-video-id") {
            if let Err(err) = open_player(player::track_watch_url(&video_id)) {
                wasm_error!("player open failed: {:?}", err);
            }
        }
    }
}

fn on_search_input(event: web_sys::Event) {
    let Some(input) = event
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    search_input_changed(input.value());
}

fn on_scroll(_event: web_sys::Event) {
    if let Err(err) = handle_scroll() {
        wasm_error!("scroll render failed: {:?}", err);
    }
}

fn bind_click(target: &Element, handler: fn(web_sys::MouseEvent)) -> Result<(), JsValue> {
    let closure = Closure::<dyn Fn(web_sys::MouseEvent)>::new(handler);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    // listener lives for the page
    closure.forget();
    Ok(())
}

/// Install the delegated event listeners: clicks on the song table and
/// discography cards, input on the search box, scroll on the container.
/// One listener each, attached once; rows can re-render freely underneath.
#[wasm_bindgen(js_name = bindEvents)]
pub fn bind_events() -> Result<(), JsValue> {
    let already = VIEW.with(|view| std::mem::replace(&mut view.borrow_mut().bound, true));
    if already {
        wasm_warn!("bindEvents called twice; ignoring");
        return Ok(());
    }
    let doc = table::document().map_err(js_err)?;

    match doc.get_element_by_id(table::SONG_TABLE_ID) {
        Some(tbl) => bind_click(&tbl, on_table_click)?,
        None => wasm_warn!("#{} not found; table clicks not bound", table::SONG_TABLE_ID),
    }

    match doc.get_element_by_id(discography::DISC_CONTAINER_ID) {
        Some(container) => bind_click(&container, on_disc_click)?,
        None => wasm_log!("#{} not found; no discography on this page", discography::DISC_CONTAINER_ID),
    }

    match doc.get_element_by_id(table::SCROLL_CONTAINER_ID) {
        Some(container) => {
            let closure = Closure::<dyn Fn(web_sys::Event)>::new(on_scroll);
            container.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        None => wasm_warn!("#{} not found; scrolling not bound", table::SCROLL_CONTAINER_ID),
    }

    match doc.get_element_by_id(table::SEARCH_INPUT_ID) {
        Some(input) => {
            let closure = Closure::<dyn Fn(web_sys::Event)>::new(on_search_input);
            input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        None => wasm_warn!("#{} not found; search not bound", table::SEARCH_INPUT_ID),
    }

    wasm_info!("bindEvents completed");
    Ok(())
}
