//! Merging dataset records into ordered display groups.

use std::collections::{HashMap, HashSet};

use crate::catalog::collate;
use crate::catalog::dates::compare_entries_desc;
use crate::catalog::state::TitleSubstitutions;
use crate::models::{GroupKey, SongAppearance, SongGroup};
use crate::normalize::normalize;

/// Merges records sharing a normalized (song, artist) key and orders the
/// result for display.
///
/// First-seen metadata wins, date entries accumulate from every record with
/// the key and come out newest-first. Group order is the bucketed collation
/// from [`collate`]. Pure: the input records are never mutated.
pub fn group_records<'a, I>(records: I, subs: &TitleSubstitutions) -> Vec<SongGroup>
where
    I: IntoIterator<Item = &'a SongAppearance>,
{
    let mut seen_order: Vec<GroupKey> = Vec::new();
    let mut merged: HashMap<GroupKey, SongGroup> = HashMap::new();

    for record in records {
        let title = subs.apply(&record.song_name);
        let key = GroupKey {
            title: normalize(title),
            artist: normalize(&record.artist),
        };
        let group = merged.entry(key.clone()).or_insert_with(|| {
            seen_order.push(key.clone());
            SongGroup::from_record(key, title, record)
        });
        group.dates.extend(record.dates.iter().cloned());
    }

    let mut groups: Vec<SongGroup> = seen_order
        .into_iter()
        .filter_map(|key| merged.remove(&key))
        .collect();
    for group in &mut groups {
        group.dates.sort_by(compare_entries_desc);
    }
    groups.sort_by_cached_key(collate::collation_key);
    groups
}

/// Unique-song count over the raw dataset. Always computed from the full
/// record list, never from a filtered subset.
pub fn unique_song_count(records: &[SongAppearance], subs: &TitleSubstitutions) -> usize {
    let mut keys: HashSet<GroupKey> = HashSet::with_capacity(records.len());
    for record in records {
        keys.insert(GroupKey {
            title: normalize(subs.apply(&record.song_name)),
            artist: normalize(&record.artist),
        });
    }
    keys.len()
}
