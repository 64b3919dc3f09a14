// Schedule module
// Day buckets of top-level entries, committed as atomic snapshots

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::entry::{Entry, EntryId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("entry {id} starts on {actual}, not on the committed day {expected}")]
    WrongDay {
        id: EntryId,
        expected: NaiveDate,
        actual: NaiveDate,
    },
}

/// The timetable: per-date day buckets plus the pool of unscheduled entries.
///
/// A day bucket holds the ordered top-level entries (blocks and top-level
/// leaves) of one calendar date; entries never span buckets. Commits replace a
/// whole bucket at once, so readers only ever observe complete layouts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    days: BTreeMap<NaiveDate, Vec<Entry>>,
    unscheduled: Vec<Entry>,
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries of a day bucket; empty slice for days with nothing scheduled
    pub fn day(&self, date: NaiveDate) -> &[Entry] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dates that currently have a non-empty bucket
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Replace a day bucket with a finalized layout in one step.
    ///
    /// Every entry must start on `date`; otherwise the commit is rejected and
    /// the previous snapshot stays in place.
    pub fn commit_day(&mut self, date: NaiveDate, entries: Vec<Entry>) -> Result<(), ScheduleError> {
        for entry in &entries {
            let actual = entry.start.date();
            if actual != date {
                return Err(ScheduleError::WrongDay {
                    id: entry.id,
                    expected: date,
                    actual,
                });
            }
        }
        log::debug!("committing {} entries for {}", entries.len(), date);
        if entries.is_empty() {
            self.days.remove(&date);
        } else {
            self.days.insert(date, entries);
        }
        Ok(())
    }

    pub fn unscheduled(&self) -> &[Entry] {
        &self.unscheduled
    }

    pub fn set_unscheduled(&mut self, entries: Vec<Entry>) {
        self.unscheduled = entries;
    }

    /// Move an entry (back) into the unscheduled pool
    pub fn push_unscheduled(&mut self, entry: Entry) {
        self.unscheduled.push(entry);
    }

    /// Take an entry out of the unscheduled pool
    pub fn take_unscheduled(&mut self, id: EntryId) -> Option<Entry> {
        let pos = self.unscheduled.iter().position(|e| e.id == id)?;
        Some(self.unscheduled.remove(pos))
    }
}
