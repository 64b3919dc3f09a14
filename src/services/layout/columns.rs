// Column assignment
// Greedy interval coloring of one overlap group

use crate::models::entry::Entry;

/// Width and horizontal offset, both as percentages of the surface
pub fn width_and_offset(column: u32, max_column: u32) -> (f32, f32) {
    let width = 100.0 / (max_column + 1) as f32;
    (width, column as f32 * width)
}

/// Assign columns to one overlap group.
///
/// Entries are processed in ascending order of their current `column` (stable,
/// so re-layouts keep the output visually stable) and each one takes the
/// column just past the highest column already occupied by an overlapping
/// entry. The result is sorted by the assigned column; `max_column`, `width`
/// and `x` are uniform across the group per the layout invariants.
pub fn layout_group(group: &[Entry]) -> Vec<Entry> {
    let mut placed: Vec<Entry> = Vec::with_capacity(group.len());
    let mut sorted: Vec<&Entry> = group.iter().collect();
    sorted.sort_by_key(|e| e.column);

    for entry in sorted {
        let column = placed
            .iter()
            .filter(|p| p.overlaps(entry))
            .map(|p| p.column)
            .max()
            .map_or(0, |max| max + 1);
        placed.push(Entry {
            column,
            ..entry.clone()
        });
    }

    let max_column = placed.iter().map(|e| e.column).max().unwrap_or(0);
    for entry in &mut placed {
        let (width, x) = width_and_offset(entry.column, max_column);
        entry.max_column = max_column;
        entry.width = width;
        entry.x = x;
    }
    placed
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

    fn columns(entries: &[Entry]) -> Vec<(i64, u32)> {
        entries.iter().map(|e| (e.id, e.column)).collect()
    }

    #[test]
    fn test_non_overlapping_share_column_zero() {
        let group = vec![
            contrib(0, at(10, 0), 60),
            contrib(1, at(12, 0), 60),
            contrib(2, at(14, 0), 60),
        ];
        let laid = layout_group(&group);
        assert_eq!(columns(&laid), vec![(0, 0), (1, 0), (2, 0)]);
        assert!(laid.iter().all(|e| e.max_column == 0 && e.width == 100.0 && e.x == 0.0));
    }

    #[test]
    fn test_parallel_entries_get_distinct_columns() {
        let group = vec![
            contrib(0, at(10, 0), 60),
            contrib(1, at(10, 0), 60),
            contrib(2, at(10, 0), 60),
            contrib(3, at(10, 0), 60),
        ];
        let laid = layout_group(&group);
        assert_eq!(columns(&laid), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
        assert!(laid.iter().all(|e| e.max_column == 3 && e.width == 25.0));
    }

    #[test]
    fn test_consecutive_entries_reuse_columns() {
        let group = vec![
            contrib(0, at(10, 0), 60),
            contrib(1, at(11, 0), 60),
            contrib(2, at(10, 0), 120),
        ];
        let laid = layout_group(&group);
        assert_eq!(columns(&laid), vec![(0, 0), (1, 0), (2, 1)]);
        assert!(laid.iter().all(|e| e.max_column == 1 && e.width == 50.0));
    }

    #[test]
    fn test_greedy_takes_max_overlapping_plus_one() {
        let group = vec![
            contrib(0, at(10, 0), 60),
            contrib(1, at(10, 0), 120),
            contrib(2, at(11, 0), 60),
            contrib(3, at(11, 0), 60),
        ];
        let laid = layout_group(&group);
        // 2 and 3 only overlap entry 1 (column 1), but the greedy rule
        // assigns max overlapping column + 1, so they stack rightward
        assert_eq!(columns(&laid), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_existing_columns_are_a_sort_key_only() {
        let mut a = contrib(0, at(10, 0), 60);
        let mut b = contrib(1, at(10, 0), 60);
        a.column = 5;
        b.column = 2;
        let laid = layout_group(&[a, b]);
        // b sorts first, so it lands in column 0 and a is displaced to 1
        assert_eq!(columns(&laid), vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn test_singleton_group() {
        let laid = layout_group(&[contrib(0, at(9, 0), 30)]);
        assert_eq!(laid[0].column, 0);
        assert_eq!(laid[0].max_column, 0);
        assert_eq!(laid[0].width, 100.0);
        assert_eq!(laid[0].x, 0.0);
    }

    #[test]
    fn test_width_and_offset() {
        assert_eq!(width_and_offset(0, 0), (100.0, 0.0));
        assert_eq!(width_and_offset(1, 1), (50.0, 50.0));
        assert_eq!(width_and_offset(0, 1), (50.0, 0.0));
        assert_eq!(width_and_offset(3, 3), (25.0, 75.0));
    }
}
