// Move/insert re-layout
// Rescales a group into a common slot space so a moved entry can be inserted
// at the horizontal position the pointer indicates, then collapses back down

use crate::models::entry::Entry;

use super::columns::layout_group;

/// Upper bound on the common slot space. Groups past this are malformed;
/// the pass falls back to appending the moved entry on the right.
const MAX_SLOTS: u32 = 4096;

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: u32, b: u32) -> u32 {
    a / gcd(a, b) * b
}

/// Project a column from an `old_max + 1`-slot space into a `slots`-slot space
fn rescale(column: u32, old_max: u32, slots: u32) -> u32 {
    // malformed entries may claim a column past their own slot count
    let column = column.min(old_max);
    (column + 1) * slots / (old_max + 1) - 1
}

/// Insert `moved` into `group` at the horizontal position given by
/// `pointer_fraction` (the pointer's x normalized to [0, 1] across the
/// group's combined width), then re-run column assignment.
///
/// Every entry's column is first rescaled into the least common multiple of
/// all slot counts involved, which preserves relative positions while
/// guaranteeing a discrete slot exists wherever the pointer lands. Entries on
/// one side of the selected slot shift to open it; the final column
/// assignment pass restores the minimal column count.
pub fn layout_group_after_move(group: &[Entry], moved: &Entry, pointer_fraction: f32) -> Vec<Entry> {
    let mut moved = moved.clone();
    if group.is_empty() {
        moved.column = 0;
        moved.max_column = 0;
        return layout_group(&[moved]);
    }

    let slots = group
        .iter()
        .map(|e| e.max_column + 1)
        .chain([moved.max_column + 1])
        .fold(1, lcm);
    if slots > MAX_SLOTS {
        log::warn!(
            "slot space of {slots} exceeds {MAX_SLOTS} while inserting entry {}; appending instead",
            moved.id
        );
        return append_rightmost(group, moved);
    }

    let mut rescaled: Vec<Entry> = group
        .iter()
        .map(|e| Entry {
            column: rescale(e.column, e.max_column, slots),
            max_column: slots - 1,
            ..e.clone()
        })
        .collect();
    let moved_column = rescale(moved.column, moved.max_column, slots);
    moved.max_column = slots - 1;

    let fraction = pointer_fraction.clamp(0.0, 1.0);
    let selected = ((slots as f32 * fraction) as u32).min(slots - 1);

    // Pick the insertion slot. The two extremes are special: the leftmost
    // slot displaces everything rightward and the rightmost slot appends
    // after all existing entries without shifting. With a single existing
    // slot both extremes coincide, so the pointer's half of the slot decides.
    let insert_slot = if slots == 1 {
        if fraction < 0.5 {
            0
        } else {
            1
        }
    } else if selected == 0 {
        0
    } else if selected == slots - 1 {
        slots
    } else if selected < moved_column {
        // right-to-left: land on the selected slot, push its occupants right
        selected
    } else {
        // left-to-right: land just past the selected slot
        selected + 1
    };

    // Open the insertion slot: find the first free slot at or after it, then
    // shift the occupied run by one. The scan is capped by the group size to
    // guard against malformed column assignments.
    let mut gap = insert_slot;
    let mut iterations = 0;
    while rescaled.iter().any(|e| e.column == gap) {
        iterations += 1;
        if iterations > group.len() {
            log::warn!(
                "column shift did not converge after {iterations} iterations \
                 while inserting entry {}; appending instead",
                moved.id
            );
            return append_rightmost(group, moved);
        }
        gap += 1;
    }
    for entry in &mut rescaled {
        if (insert_slot..gap).contains(&entry.column) {
            entry.column += 1;
        }
    }
    moved.column = insert_slot;

    rescaled.push(moved);
    layout_group(&rescaled)
}

/// Fallback for a pass that could not open the requested slot: keep the
/// existing relative order and place the moved entry after everything else.
fn append_rightmost(group: &[Entry], mut moved: Entry) -> Vec<Entry> {
    let max = group.iter().map(|e| e.column).max().unwrap_or(0);
    moved.column = max + 1;
    let mut all: Vec<Entry> = group.to_vec();
    all.push(moved);
    layout_group(&all)
}
