// Vertical offsets
// Converts start times into pixel offsets on the rendered surface

use crate::models::entry::Entry;
use crate::utils::date::{day_origin, minutes_between};
use crate::utils::grid::minutes_to_pixels;

/// Compute `y` for every entry.
///
/// Top-level entries are offset from the day's rendered origin (midnight plus
/// `min_hour`). Block children are offset from their own block's start, so
/// repositioning a block moves its children on screen without recomputing
/// their relative offsets.
pub fn compute_y_offset(entries: &[Entry], min_hour: u32, pixels_per_minute: f32) -> Vec<Entry> {
    entries
        .iter()
        .map(|entry| {
            let origin = day_origin(entry.start.date(), min_hour);
            let y = minutes_to_pixels(minutes_between(entry.start, origin), pixels_per_minute);
            let children = entry
                .children
                .iter()
                .map(|child| Entry {
                    y: minutes_to_pixels(
                        minutes_between(child.start, entry.start),
                        pixels_per_minute,
                    ),
                    ..child.clone()
                })
                .collect();
            Entry {
                y,
                children,
                ..entry.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entry::EntryKind;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn contrib(id: i64, start: NaiveDateTime, duration: i64) -> Entry {
        Entry::new(id, EntryKind::Contribution, format!("Contrib {id}"), start, duration).unwrap()
    }

    #[test]
    fn test_top_level_offsets() {
        let entries = vec![contrib(0, at(10, 0), 60), contrib(1, at(11, 0), 60)];
        let laid = compute_y_offset(&entries, 10, 2.0);
        assert_eq!(laid[0].y, 0.0);
        assert_eq!(laid[1].y, 120.0);
    }

    #[test]
    fn test_children_are_relative_to_their_block() {
        let mut block = Entry::new(0, EntryKind::Block, "Session", at(11, 0), 60).unwrap();
        block.children = vec![
            contrib(1, at(11, 0), 30),
            contrib(2, at(11, 30), 30),
        ];
        let laid = compute_y_offset(&[block], 10, 2.0);
        assert_eq!(laid[0].y, 120.0);
        assert_eq!(laid[0].children[0].y, 0.0);
        assert_eq!(laid[0].children[1].y, 60.0);
    }

    #[test]
    fn test_entry_before_visible_range_goes_negative() {
        let laid = compute_y_offset(&[contrib(0, at(7, 30), 30)], 8, 2.0);
        assert_eq!(laid[0].y, -60.0);
    }
}
