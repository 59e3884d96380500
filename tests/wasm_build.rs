//! WASM build test
//!
//! Exercises the JavaScript-facing exports in a browser: dataset install,
//! the pure row-model pipeline, and the player validation boundary.

use catalog_wasm::api::{
    apply_filter, build_row_models, close_player, open_player, set_dataset, set_date_columns,
};
use catalog_wasm::models::{DateEntry, SongAppearance};
use catalog_wasm::render::RowModel;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn sample_records() -> Vec<SongAppearance> {
    let mut first = SongAppearance::new("MELT", "ryo");
    first
        .dates
        .push(DateEntry::new("20230101", "https://www.youtube.com/watch?v=abc123"));
    let mut fullwidth = SongAppearance::new("ＭＥＬＴ", "RYO");
    fullwidth
        .dates
        .push(DateEntry::new("20230301", "https://youtu.be/def456"));
    vec![first, fullwidth]
}

fn records_js() -> wasm_bindgen::JsValue {
    serde_wasm_bindgen::to_value(&sample_records()).unwrap()
}

#[wasm_bindgen_test]
fn dataset_install_counts_unique_songs() {
    // The two spellings are one song; install succeeds without the shell
    // markup present
    let result = set_dataset(records_js()).unwrap();
    assert_eq!(result.as_f64(), Some(1.0));
}

#[wasm_bindgen_test]
fn row_models_come_back_grouped_and_ordered() {
    let result = build_row_models(records_js(), String::new(), Some(3)).unwrap();
    let rows: Vec<RowModel> = serde_wasm_bindgen::from_value(result).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "MELT");
    assert_eq!(rows[0].cells.len(), 2);
    assert_eq!(rows[0].cells[0].label, "01/03/2023");
    assert_eq!(rows[0].placeholders, 1);
}

#[wasm_bindgen_test]
fn row_models_respect_queries() {
    let result = build_row_models(records_js(), "no such song".into(), Some(3)).unwrap();
    let rows: Vec<RowModel> = serde_wasm_bindgen::from_value(result).unwrap();
    assert!(rows.is_empty());
}

#[wasm_bindgen_test]
fn date_column_count_is_validated() {
    set_dataset(records_js()).unwrap();
    assert!(set_date_columns(0).is_err());
    assert!(set_date_columns(5).is_ok());
}

#[wasm_bindgen_test]
fn filters_apply_without_table_markup() {
    set_dataset(records_js()).unwrap();
    assert!(apply_filter("melt".into()).is_ok());
    assert!(apply_filter(String::new()).is_ok());
}

#[wasm_bindgen_test]
fn player_rejects_untrusted_links() {
    let err = open_player("https://evil.example.com/watch?v=abc".into()).unwrap_err();
    let message = err.as_string().unwrap_or_default();
    assert!(message.contains("link rejected"), "got: {message}");

    // Valid links pass validation and fail later, on the missing markup
    let err = open_player("https://www.youtube.com/watch?v=abc123".into()).unwrap_err();
    let message = err.as_string().unwrap_or_default();
    assert!(message.contains("missing DOM element"), "got: {message}");

    let err = close_player().unwrap_err();
    let message = err.as_string().unwrap_or_default();
    assert!(message.contains("floatingPlayer"), "got: {message}");
}

#[wasm_bindgen_test]
fn renders_rows_when_table_is_mounted() {
    let document = web_sys::window().unwrap().document().unwrap();
    let body = document.body().unwrap();

    let table = document.create_element("table").unwrap();
    table.set_id("songTable");
    let tbody = document.create_element("tbody").unwrap();
    table.append_child(&tbody).unwrap();
    body.append_child(&table).unwrap();

    let count = document.create_element("span").unwrap();
    count.set_id("songCount");
    body.append_child(&count).unwrap();

    set_dataset(records_js()).unwrap();

    assert_eq!(count.text_content().as_deref(), Some("1"));
    // one merged row, no spacers without a scroll container
    assert_eq!(tbody.child_element_count(), 1);
    let row = tbody.first_element_child().unwrap();
    assert!(row.get_attribute("data-key").is_some());

    table.remove();
    count.remove();
}
