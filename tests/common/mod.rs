// Shared builders for the integration suites
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use daygrid::models::entry::{Entry, EntryId, EntryKind};

/// A time on the fixed test day
pub fn t(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 3)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn test_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

pub fn contrib(id: EntryId, start: NaiveDateTime, duration: i64) -> Entry {
    Entry::new(id, EntryKind::Contribution, format!("Contrib {id}"), start, duration).unwrap()
}

pub fn break_(id: EntryId, start: NaiveDateTime, duration: i64) -> Entry {
    Entry::new(id, EntryKind::Break, format!("Break {id}"), start, duration).unwrap()
}

pub fn block(id: EntryId, start: NaiveDateTime, duration: i64, children: Vec<Entry>) -> Entry {
    let children = children
        .into_iter()
        .map(|mut c| {
            c.parent_id = Some(id);
            c
        })
        .collect();
    Entry::builder()
        .id(id)
        .kind(EntryKind::Block)
        .title(format!("Block {id}"))
        .start(start)
        .duration(duration)
        .session(0)
        .children(children)
        .build()
        .unwrap()
}

/// `count` fully parallel contributions already assigned to distinct columns
pub fn parallel_contribs(count: u32, start: NaiveDateTime, duration: i64) -> Vec<Entry> {
    (0..count)
        .map(|i| {
            let mut e = contrib(i as EntryId, start, duration);
            e.column = i;
            e.max_column = count - 1;
            e
        })
        .collect()
}

/// Ids in output order
pub fn order(entries: &[Entry]) -> Vec<EntryId> {
    entries.iter().map(|e| e.id).collect()
}

/// (id, column) pairs in output order
pub fn columns(entries: &[Entry]) -> Vec<(EntryId, u32)> {
    entries.iter().map(|e| (e.id, e.column)).collect()
}
