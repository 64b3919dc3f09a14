// Overlap grouping
// Partitions entries into connected components of the strict-overlap graph

use std::collections::BTreeSet;

use crate::models::entry::{Entry, EntryId};

/// Partition `entries` into maximal groups of transitively overlapping
/// intervals.
///
/// Groups are returned in first-encounter order; the traversal order inside a
/// component is not observable since each group is a set.
pub fn get_groups(entries: &[Entry]) -> Vec<BTreeSet<EntryId>> {
    let mut visited: BTreeSet<EntryId> = BTreeSet::new();
    let mut groups = Vec::new();

    for entry in entries {
        if visited.contains(&entry.id) {
            continue;
        }
        let mut component = BTreeSet::new();
        let mut stack = vec![entry];
        while let Some(current) = stack.pop() {
            if !visited.insert(current.id) {
                continue;
            }
            component.insert(current.id);
            for other in entries {
                if !visited.contains(&other.id) && current.overlaps(other) {
                    stack.push(other);
                }
            }
        }
        groups.push(component);
    }
    groups
}

/// The component reachable from `entry` within `others`, excluding `entry`
/// itself.
///
/// Used to find which existing entries are affected by inserting or moving
/// one entry: the result is exactly the set that must be re-laid-out together
/// with it.
pub fn get_group(entry: &Entry, others: &[Entry]) -> BTreeSet<EntryId> {
    let mut visited: BTreeSet<EntryId> = BTreeSet::new();
    let mut component = BTreeSet::new();
    let mut stack = vec![entry];

    while let Some(current) = stack.pop() {
        if !visited.insert(current.id) {
            continue;
        }
        for other in others {
            if other.id != entry.id && !visited.contains(&other.id) && current.overlaps(other) {
                component.insert(other.id);
                stack.push(other);
            }
        }
    }
    component
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

    fn contrib(id: EntryId, start: NaiveDateTime, duration: i64) -> Entry {
        Entry::new(id, EntryKind::Contribution, format!("Contrib {id}"), start, duration).unwrap()
    }

    #[test]
    fn test_chain_forms_one_group() {
        // 0 overlaps 3, 3 overlaps 1 and 4, 4 overlaps 2
        let entries = vec![
            contrib(0, at(10, 0), 60),
            contrib(1, at(11, 0), 60),
            contrib(2, at(12, 0), 60),
            contrib(3, at(10, 30), 90),
            contrib(4, at(11, 0), 120),
        ];
        let groups = get_groups(&entries);
        assert_eq!(groups, vec![BTreeSet::from([0, 1, 2, 3, 4])]);
    }

    #[test]
    fn test_touching_entries_are_separate_groups() {
        let entries = vec![contrib(0, at(10, 0), 60), contrib(1, at(11, 0), 60)];
        let groups = get_groups(&entries);
        assert_eq!(groups, vec![BTreeSet::from([0]), BTreeSet::from([1])]);
    }

    #[test]
    fn test_group_excludes_seed_entry() {
        let seed = contrib(0, at(10, 0), 60);
        let others = vec![contrib(1, at(10, 30), 60), contrib(2, at(13, 0), 60)];
        assert_eq!(get_group(&seed, &others), BTreeSet::from([1]));
    }

    #[test]
    fn test_group_reaches_transitively() {
        let seed = contrib(0, at(10, 0), 60);
        let others = vec![
            contrib(1, at(11, 0), 60),
            contrib(2, at(12, 0), 60),
            contrib(3, at(10, 30), 90),
        ];
        // seed -> 3 -> 1, but 2 only touches 1
        assert_eq!(get_group(&seed, &others), BTreeSet::from([1, 3]));
    }
}
