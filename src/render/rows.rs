//! Pure row view-models for the song table.
//!
//! `build_rows` is the presentation half of the pipeline split: it consumes
//! ordered [`SongGroup`]s plus the view settings (date limit, expansion
//! set) and produces plain serializable data. The DOM stage renders it
//! without making further decisions.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::catalog::dates::display_label;
use crate::models::SongGroup;

/// One clickable date cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCell {
    /// `DD/MM/YYYY` display label
    pub label: String,
    pub link: String,
    pub member_exclusive: bool,
    pub acapella: bool,
    pub private: bool,
    /// Beyond the visible limit. Extra cells are rendered either way so the
    /// expansion toggle can flip them in place.
    pub extra: bool,
    /// `extra` and the row is currently collapsed; rendered with
    /// `display:none`.
    pub hidden: bool,
}

/// One table row, ready for the DOM stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowModel {
    /// Stable row identity (the group key token); the expansion toggle
    /// addresses rows by it
    pub key: String,
    /// Sort-bucket letter shown in the leading cell
    pub bucket_label: String,
    pub title: String,
    /// Title is rights-restricted and styled accordingly
    pub copyright: bool,
    pub artist: String,
    /// `-` when the record carries no source
    pub source: String,
    pub note: Option<String>,
    pub cells: Vec<DateCell>,
    /// Placeholder cells padding the row to the visible limit
    pub placeholders: usize,
    /// Row has more dates than the limit and gets the `...` control
    pub expandable: bool,
    pub expanded: bool,
}

impl RowModel {
    /// Date cells currently visible (placeholders not counted).
    pub fn visible_cells(&self) -> usize {
        self.cells.iter().filter(|c| !c.hidden).count()
    }
}

/// Builds one row per group. `limit` is the visible date-column count;
/// `None` means unbounded (the show-all toggle).
pub fn build_rows(
    groups: &[SongGroup],
    limit: Option<usize>,
    expanded: &HashSet<String>,
) -> Vec<RowModel> {
    groups.iter().map(|g| build_row(g, limit, expanded)).collect()
}

fn build_row(group: &SongGroup, limit: Option<usize>, expanded: &HashSet<String>) -> RowModel {
    let key = group.key.token();
    let is_expanded = expanded.contains(&key);

    let cells: Vec<DateCell> = group
        .dates
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let extra = limit.map_or(false, |n| i >= n);
            DateCell {
                label: display_label(&d.date),
                link: d.link.clone(),
                member_exclusive: d.is_member_exclusive,
                acapella: d.is_acapella,
                private: d.is_private,
                extra,
                hidden: extra && !is_expanded,
            }
        })
        .collect();

    RowModel {
        key,
        bucket_label: bucket_label(group),
        title: group.title.clone(),
        copyright: group.is_copyright,
        artist: group.artist.clone(),
        source: group.source.clone().unwrap_or_else(|| "-".to_string()),
        note: group.note.clone(),
        placeholders: limit.map_or(0, |n| n.saturating_sub(cells.len())),
        expandable: limit.map_or(false, |n| cells.len() > n),
        expanded: is_expanded,
        cells,
    }
}

/// The leading cell: az override when present, otherwise the title's first
/// character uppercased.
fn bucket_label(group: &SongGroup) -> String {
    if let Some(az) = group.az.as_deref() {
        let trimmed = az.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    group
        .title
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateEntry, GroupKey};

    fn group_with_dates(n: usize) -> SongGroup {
        let dates = (0..n)
            .map(|i| DateEntry::new(format!("202301{:02}", n - i), "https://youtu.be/x"))
            .collect();
        SongGroup {
            key: GroupKey { title: "t".into(), artist: "a".into() },
            title: "Title".into(),
            artist: "Artist".into(),
            source: None,
            note: None,
            is_copyright: false,
            az: None,
            dates,
        }
    }

    #[test]
    fn visible_cells_never_exceed_the_limit() {
        let groups = vec![group_with_dates(7)];
        let rows = build_rows(&groups, Some(3), &HashSet::new());
        assert_eq!(rows[0].cells.len(), 7);
        assert_eq!(rows[0].visible_cells(), 3);
        assert!(rows[0].expandable);
        assert!(!rows[0].expanded);
    }

    #[test]
    fn expansion_reveals_every_cell() {
        let groups = vec![group_with_dates(7)];
        let expanded: HashSet<String> = [groups[0].key.token()].into_iter().collect();
        let rows = build_rows(&groups, Some(3), &expanded);
        assert_eq!(rows[0].visible_cells(), 7);
        assert!(rows[0].expanded);
        // the fold marker survives expansion so collapsing finds the cells
        assert_eq!(rows[0].cells.iter().filter(|c| c.extra).count(), 4);
    }

    #[test]
    fn short_rows_pad_with_placeholders() {
        let groups = vec![group_with_dates(1)];
        let rows = build_rows(&groups, Some(3), &HashSet::new());
        assert_eq!(rows[0].placeholders, 2);
        assert!(!rows[0].expandable);
    }

    #[test]
    fn missing_dates_render_as_all_placeholders() {
        let groups = vec![group_with_dates(0)];
        let rows = build_rows(&groups, Some(3), &HashSet::new());
        assert!(rows[0].cells.is_empty());
        assert_eq!(rows[0].placeholders, 3);
    }

    #[test]
    fn unbounded_limit_shows_everything() {
        let groups = vec![group_with_dates(7)];
        let rows = build_rows(&groups, None, &HashSet::new());
        assert_eq!(rows[0].visible_cells(), 7);
        assert_eq!(rows[0].placeholders, 0);
        assert!(!rows[0].expandable);
    }

    #[test]
    fn missing_source_renders_a_dash() {
        let groups = vec![group_with_dates(1)];
        let rows = build_rows(&groups, Some(3), &HashSet::new());
        assert_eq!(rows[0].source, "-");
    }

    #[test]
    fn bucket_label_prefers_az_override() {
        let mut g = group_with_dates(1);
        g.az = Some("あ".into());
        assert_eq!(build_rows(&[g], Some(3), &HashSet::new())[0].bucket_label, "あ");

        let g = group_with_dates(1);
        assert_eq!(build_rows(&[g], Some(3), &HashSet::new())[0].bucket_label, "T");
    }

    #[test]
    fn date_labels_are_formatted() {
        let groups = vec![group_with_dates(1)];
        let rows = build_rows(&groups, Some(3), &HashSet::new());
        assert_eq!(rows[0].cells[0].label, "01/01/2023");
    }
}
