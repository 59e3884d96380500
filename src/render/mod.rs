//! Rendering, split into a pure stage and a DOM stage.
//!
//! `rows` turns ordered groups into plain `RowModel` data with no document
//! in sight; `table` and `discography` materialize that data through
//! web-sys. `scroll` is the virtual-window arithmetic shared by both
//! stages.

pub mod discography;
pub mod rows;
pub mod scroll;
pub mod table;

pub use rows::{build_rows, DateCell, RowModel};
pub use scroll::{compute_window, RowWindow};
