// Layout service
// Grouping, column assignment, slot insertion and vertical offsets

mod columns;
mod grouping;
mod insertion;
mod offset;

pub use columns::{layout_group, width_and_offset};
pub use grouping::{get_group, get_groups};
pub use insertion::layout_group_after_move;
pub use offset::compute_y_offset;

use crate::models::entry::Entry;

/// Lay out a full set of top-level entries.
///
/// Entries are partitioned into overlap groups and each group is
/// column-assigned independently. Blocks recurse: their children are laid out
/// the same way in the block's own coordinate space, unaffected by sibling
/// blocks.
pub fn layout(entries: &[Entry]) -> Vec<Entry> {
    let groups = get_groups(entries);
    let mut result = Vec::with_capacity(entries.len());

    for group_ids in groups {
        let members: Vec<Entry> = entries
            .iter()
            .filter(|e| group_ids.contains(&e.id))
            .cloned()
            .collect();
        let mut laid = layout_group(&members);
        for entry in &mut laid {
            if entry.is_block() && !entry.children.is_empty() {
                entry.children = layout(&entry.children);
            }
        }
        result.extend(laid);
    }
    result
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
    fn test_independent_groups_keep_full_width() {
        let entries = vec![
            contrib(0, at(10, 0), 60),
            contrib(1, at(10, 30), 60),
            contrib(2, at(14, 0), 60),
        ];
        let laid = layout(&entries);
        let narrow: Vec<_> = laid.iter().filter(|e| e.width == 50.0).map(|e| e.id).collect();
        let wide: Vec<_> = laid.iter().filter(|e| e.width == 100.0).map(|e| e.id).collect();
        assert_eq!(narrow, vec![0, 1]);
        assert_eq!(wide, vec![2]);
    }

    #[test]
    fn test_block_children_lay_out_in_local_space() {
        let mut block = Entry::new(0, EntryKind::Block, "Session", at(10, 0), 120).unwrap();
        block.children = vec![
            contrib(1, at(10, 0), 60),
            contrib(2, at(10, 30), 60),
            contrib(3, at(11, 30), 30),
        ];
        let sibling = contrib(4, at(10, 0), 120);

        let laid = layout(&[block, sibling]);
        let block = laid.iter().find(|e| e.id == 0).unwrap();
        // block shares its group with the sibling...
        assert_eq!(block.max_column, 1);
        // ...but its children only see each other
        let child_cols: Vec<_> = block.children.iter().map(|c| (c.id, c.column)).collect();
        assert_eq!(child_cols, vec![(1, 0), (2, 1), (3, 0)]);
        assert_eq!(block.children[0].max_column, 1);
    }
}
