// Timetable operations
// Resolves committed drags into new day layouts: moves onto the surface or
// into blocks, scheduling of unscheduled entries, resizes and deletions

use chrono::{Duration, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::models::entry::{Entry, EntryId, EntryKind};
use crate::models::settings::Settings;
use crate::services::drag::{DropEvent, Over, Transform};
use crate::services::layout::{compute_y_offset, get_group, layout, layout_group_after_move};
use crate::utils::date::day_origin;
use crate::utils::grid::{pixels_to_minutes, snap_up};

/// Droppable id of the timetable surface itself
pub const SURFACE_ID: &str = "timetable";

/// Draggable id prefix for entries coming from the unscheduled pool
pub const UNSCHEDULED_PREFIX: &str = "unscheduled-";

/// Why a drop was rejected. The day layout is left unchanged in every case.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveRejection {
    #[error("nothing under the pointer at release")]
    NothingUnderPointer,
    #[error("unknown entry {0}")]
    UnknownEntry(String),
    #[error("entry {0} belongs to a session and cannot be scheduled at the top level")]
    SessionBound(EntryId),
    #[error("entry {entry} belongs to a different session than block {block}")]
    SessionMismatch { entry: EntryId, block: EntryId },
    #[error("entry {entry} does not fit into block {block}")]
    BlockTooSmall { entry: EntryId, block: EntryId },
    #[error("drop target {0} is not a block")]
    NotABlock(EntryId),
    #[error("resize of {0} would produce an empty interval")]
    EmptyInterval(EntryId),
}

/// Resolve a finished drag into a new, fully laid-out day snapshot.
///
/// The over list decides the destination: the surface alone moves the entry
/// at the top level; the surface plus a block moves it into that block.
/// Entries from the unscheduled pool carry the [`UNSCHEDULED_PREFIX`] and are
/// routed through [`schedule_unscheduled`] by the caller instead.
pub fn resolve_drop(
    entries: &[Entry],
    event: &DropEvent,
    settings: &Settings,
) -> Result<Vec<Entry>, MoveRejection> {
    if event.over.is_empty() {
        return Err(MoveRejection::NothingUnderPointer);
    }
    let surface = event
        .over
        .iter()
        .find(|o| o.id == SURFACE_ID)
        .ok_or(MoveRejection::NothingUnderPointer)?;

    match event.over.iter().find(|o| o.id != SURFACE_ID) {
        None => move_on_surface(entries, &event.dragged_id, surface, event.delta, event.pointer.x, settings),
        Some(block_over) => move_into_block(
            entries,
            &event.dragged_id,
            block_over,
            surface,
            event.delta,
            event.pointer.x,
            settings,
        ),
    }
}

fn parse_id(id: &str) -> Result<EntryId, MoveRejection> {
    id.parse()
        .map_err(|_| MoveRejection::UnknownEntry(id.to_string()))
}

fn snapped_minutes(delta_y: f32, settings: &Settings) -> i64 {
    snap_up(
        pixels_to_minutes(delta_y, settings.pixels_per_minute),
        settings.snap_minutes,
    )
}

fn pointer_fraction(pointer_x: f32, over: &Over) -> f32 {
    if over.rect.width <= 0.0 {
        return 0.0;
    }
    (pointer_x - over.rect.left()) / over.rect.width
}

fn find_block_of_child(entries: &[Entry], child_id: EntryId) -> Option<&Entry> {
    entries
        .iter()
        .filter(|e| e.is_block())
        .find(|b| b.children.iter().any(|c| c.id == child_id))
}

/// A child entry together with its enclosing block
fn find_child(entries: &[Entry], child_id: EntryId) -> Option<(&Entry, &Entry)> {
    entries.iter().filter(|e| e.is_block()).find_map(|block| {
        block
            .children
            .iter()
            .find(|c| c.id == child_id)
            .map(|child| (block, child))
    })
}

/// Shift an entry in time, carrying block children along
fn shifted(entry: &Entry, minutes: i64) -> Entry {
    let mut moved = entry.clone();
    moved.start += Duration::minutes(minutes);
    for child in &mut moved.children {
        child.start += Duration::minutes(minutes);
    }
    moved
}

/// Re-layout the affected group around `moved` and every untouched group,
/// finalizing columns and vertical offsets
fn finalize(others: Vec<Entry>, moved: Entry, fraction: f32, settings: &Settings) -> Vec<Entry> {
    let group_ids = get_group(&moved, &others);
    let (group, rest): (Vec<Entry>, Vec<Entry>) = others
        .into_iter()
        .partition(|e| group_ids.contains(&e.id));
    let mut combined = rest;
    combined.extend(layout_group_after_move(&group, &moved, fraction));
    compute_y_offset(&layout(&combined), settings.min_hour, settings.pixels_per_minute)
}

fn move_on_surface(
    entries: &[Entry],
    dragged_id: &str,
    surface: &Over,
    delta: Transform,
    pointer_x: f32,
    settings: &Settings,
) -> Result<Vec<Entry>, MoveRejection> {
    let id = parse_id(dragged_id)?;
    let delta_minutes = snapped_minutes(delta.y, settings);
    let fraction = pointer_fraction(pointer_x, surface);

    if let Some(entry) = entries.iter().find(|e| e.id == id) {
        if entry.kind == EntryKind::Contribution && entry.session_id.is_some() {
            return Err(MoveRejection::SessionBound(id));
        }
        let moved = shifted(entry, delta_minutes);
        let others: Vec<Entry> = entries.iter().filter(|e| e.id != id).cloned().collect();
        return Ok(finalize(others, moved, fraction, settings));
    }

    // not top-level: maybe a break inside a block
    let (block, child) = find_child(entries, id)
        .ok_or_else(|| MoveRejection::UnknownEntry(dragged_id.to_string()))?;
    if child.kind != EntryKind::Break {
        return Err(MoveRejection::SessionBound(id));
    }
    let mut moved = shifted(child, delta_minutes);
    moved.parent_id = None;

    let block_id = block.id;
    let others: Vec<Entry> = entries
        .iter()
        .filter(|e| e.id != id)
        .map(|e| {
            if e.id == block_id {
                let mut stripped = e.clone();
                stripped.children.retain(|c| c.id != id);
                stripped
            } else {
                e.clone()
            }
        })
        .collect();
    Ok(finalize(others, moved, fraction, settings))
}

fn move_into_block(
    entries: &[Entry],
    dragged_id: &str,
    block_over: &Over,
    surface: &Over,
    delta: Transform,
    pointer_x: f32,
    settings: &Settings,
) -> Result<Vec<Entry>, MoveRejection> {
    let id = parse_id(dragged_id)?;
    let block_id = parse_id(&block_over.id)?;
    let to_block = entries
        .iter()
        .find(|e| e.id == block_id)
        .ok_or(MoveRejection::NotABlock(block_id))?;
    if !to_block.is_block() {
        return Err(MoveRejection::NotABlock(block_id));
    }

    let from_block = find_block_of_child(entries, id);
    let entry = entries
        .iter()
        .find(|e| e.id == id)
        .or_else(|| from_block.and_then(|b| b.children.iter().find(|c| c.id == id)))
        .ok_or_else(|| MoveRejection::UnknownEntry(dragged_id.to_string()))?;

    match entry.kind {
        EntryKind::Contribution => match entry.session_id {
            // session-less contributions fall through to the surface
            None => {
                return move_on_surface(entries, dragged_id, surface, delta, pointer_x, settings)
            }
            Some(session) if Some(session) != to_block.session_id => {
                return Err(MoveRejection::SessionMismatch {
                    entry: id,
                    block: block_id,
                });
            }
            Some(_) => {}
        },
        // blocks dropped on blocks behave like drops on the surface
        EntryKind::Block => {
            return move_on_surface(entries, dragged_id, surface, delta, pointer_x, settings)
        }
        EntryKind::Break => {}
    }

    if entry.duration > to_block.duration {
        return Err(MoveRejection::BlockTooSmall {
            entry: id,
            block: block_id,
        });
    }

    let delta_minutes = snapped_minutes(delta.y, settings);
    let fraction = pointer_fraction(pointer_x, block_over);

    let mut moved = shifted(entry, delta_minutes);
    moved.parent_id = Some(block_id);
    // keep the child inside the block's interval
    if moved.start < to_block.start {
        moved.start = to_block.start;
    } else if moved.end() > to_block.end() {
        moved.start = to_block.end() - Duration::minutes(moved.duration);
    }

    let other_children: Vec<Entry> = to_block
        .children
        .iter()
        .filter(|c| c.id != id)
        .cloned()
        .collect();
    let group_ids = get_group(&moved, &other_children);
    let (group, mut new_children): (Vec<Entry>, Vec<Entry>) = other_children
        .into_iter()
        .partition(|c| group_ids.contains(&c.id));
    new_children.extend(layout_group_after_move(&group, &moved, fraction));

    let from_block_id = from_block.map(|b| b.id);
    let combined: Vec<Entry> = entries
        .iter()
        .filter(|e| e.id != id)
        .map(|e| {
            let mut e = e.clone();
            if e.id == block_id {
                e.children = new_children.clone();
            } else if Some(e.id) == from_block_id {
                e.children.retain(|c| c.id != id);
            }
            e
        })
        .collect();
    Ok(compute_y_offset(
        &layout(&combined),
        settings.min_hour,
        settings.pixels_per_minute,
    ))
}

/// Schedule an entry from the unscheduled pool at the pointer's position.
///
/// The start time comes from the pointer's vertical offset within the
/// surface, snapped to the grid. Returns the new day layout and the moved
/// entry's id so the caller can drop it from the pool.
pub fn schedule_unscheduled(
    entries: &[Entry],
    unscheduled: &[Entry],
    dragged_id: &str,
    surface: &Over,
    pointer_x: f32,
    pointer_y: f32,
    date: NaiveDate,
    settings: &Settings,
) -> Result<(Vec<Entry>, EntryId), MoveRejection> {
    let raw = dragged_id
        .strip_prefix(UNSCHEDULED_PREFIX)
        .ok_or_else(|| MoveRejection::UnknownEntry(dragged_id.to_string()))?;
    let id = parse_id(raw)?;
    let entry = unscheduled
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| MoveRejection::UnknownEntry(dragged_id.to_string()))?;

    let minutes = snap_up(
        pixels_to_minutes(pointer_y - surface.rect.top(), settings.pixels_per_minute),
        settings.snap_minutes,
    );
    let mut moved = entry.clone();
    moved.start = day_origin(date, settings.min_hour) + Duration::minutes(minutes);

    let fraction = pointer_fraction(pointer_x, surface);
    Ok((finalize(entries.to_vec(), moved, fraction, settings), id))
}

/// Resize a top-level entry or a block child to a new interval.
///
/// Blocks never shrink past their children. A resized child pushes colliding
/// earlier siblings up and later siblings down, and extends its block when
/// the rearranged children no longer fit.
pub fn resize_entry(
    entries: &[Entry],
    id: EntryId,
    new_start: NaiveDateTime,
    new_end: NaiveDateTime,
    settings: &Settings,
) -> Result<Vec<Entry>, MoveRejection> {
    if new_end <= new_start {
        return Err(MoveRejection::EmptyInterval(id));
    }

    if entries.iter().any(|e| e.id == id) {
        let resized: Vec<Entry> = entries
            .iter()
            .map(|e| {
                if e.id != id {
                    return e.clone();
                }
                let mut e = e.clone();
                let (start, end) = if e.is_block() {
                    // a block always spans its children
                    let child_min = e.children.iter().map(|c| c.start).min();
                    let child_max = e.children.iter().map(|c| c.end()).max();
                    (
                        child_min.map_or(new_start, |m| m.min(new_start)),
                        child_max.map_or(new_end, |m| m.max(new_end)),
                    )
                } else {
                    (new_start, new_end)
                };
                e.start = start;
                e.duration = (end - start).num_minutes();
                e
            })
            .collect();
        return Ok(compute_y_offset(
            &layout(&resized),
            settings.min_hour,
            settings.pixels_per_minute,
        ));
    }

    let (block, old_child) =
        find_child(entries, id).ok_or_else(|| MoveRejection::UnknownEntry(id.to_string()))?;
    let old_child = old_child.clone();
    let mut resized_child = old_child.clone();
    resized_child.start = new_start;
    resized_child.duration = (new_end - new_start).num_minutes();

    let siblings: Vec<Entry> = block
        .children
        .iter()
        .filter(|c| c.id != id)
        .cloned()
        .collect();
    let collides = siblings.iter().any(|s| s.overlaps(&resized_child));
    let new_children = if collides {
        rearrange_children(&siblings, resized_child, &old_child)
    } else {
        let mut children = siblings;
        children.push(resized_child);
        children.sort_by_key(|c| c.start);
        children
    };

    // extend the block when the rearranged children spill over either edge
    let child_min = new_children.iter().map(|c| c.start).min().unwrap_or(new_start);
    let child_max = new_children.iter().map(|c| c.end()).max().unwrap_or(new_end);
    let block_id = block.id;
    let resized: Vec<Entry> = entries
        .iter()
        .map(|e| {
            if e.id != block_id {
                return e.clone();
            }
            let mut e = e.clone();
            let start = e.start.min(child_min);
            let end = e.end().max(child_max);
            e.start = start;
            e.duration = (end - start).num_minutes();
            e.children = new_children.clone();
            e
        })
        .collect();
    Ok(compute_y_offset(
        &layout(&resized),
        settings.min_hour,
        settings.pixels_per_minute,
    ))
}

/// Rearrange siblings around a resized child: colliding entries that used to
/// end before it are pushed up, entries that used to start after it are
/// pushed down, preserving everyone's duration.
fn rearrange_children(siblings: &[Entry], resized: Entry, old: &Entry) -> Vec<Entry> {
    let mut sorted = siblings.to_vec();
    sorted.sort_by_key(|c| c.start);
    let before: Vec<Entry> = sorted.iter().filter(|c| c.end() <= old.start).cloned().collect();
    let after: Vec<Entry> = sorted.iter().filter(|c| c.start >= old.end()).cloned().collect();
    // anything else was already overlapping the old interval and stays put
    let parallel: Vec<Entry> = sorted
        .iter()
        .filter(|c| c.end() > old.start && c.start < old.end())
        .cloned()
        .collect();

    let mut children = Vec::with_capacity(siblings.len() + 1);

    // push earlier siblings up where they now collide
    let mut limit = resized.start;
    let mut moved_up: Vec<Entry> = Vec::new();
    for sibling in before.iter().rev() {
        let mut sibling = sibling.clone();
        if limit < sibling.end() {
            let diff = (limit - sibling.end()).num_minutes();
            sibling.start += Duration::minutes(diff);
        }
        limit = sibling.start;
        moved_up.push(sibling);
    }
    moved_up.reverse();
    children.extend(moved_up);
    children.push(resized.clone());

    // push later siblings down where they now collide
    let mut limit = resized.end();
    for sibling in &after {
        let mut sibling = sibling.clone();
        if limit > sibling.start {
            let diff = (limit - sibling.start).num_minutes();
            sibling.start += Duration::minutes(diff);
        }
        limit = sibling.end();
        children.push(sibling);
    }

    children.extend(parallel);
    children.sort_by_key(|c| c.start);
    children
}

/// Remove an entry (top-level or child) and repack the remaining layout.
/// An unknown id returns the input unchanged.
pub fn delete_entry(entries: &[Entry], id: EntryId, settings: &Settings) -> Vec<Entry> {
    let exists = entries
        .iter()
        .any(|e| e.id == id || e.children.iter().any(|c| c.id == id));
    if !exists {
        log::debug!("delete of unknown entry {id} ignored");
        return entries.to_vec();
    }
    let remaining: Vec<Entry> = entries
        .iter()
        .filter(|e| e.id != id)
        .map(|e| {
            let mut e = e.clone();
            e.children.retain(|c| c.id != id);
            e
        })
        .collect();
    compute_y_offset(
        &layout(&remaining),
        settings.min_hour,
        settings.pixels_per_minute,
    )
}
