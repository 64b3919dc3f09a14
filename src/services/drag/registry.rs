// Draggable/droppable registries
// Id-keyed regions with live bounding-rect providers

use std::collections::HashMap;

use super::geometry::{Point, Rect};

/// Supplies the current bounding rectangle of a registered region.
///
/// Providers are queried lazily at the moment a rect is needed; results are
/// never cached across events, so layout changes under an in-progress drag
/// are picked up automatically. Returning `None` means the region is not
/// currently measurable (e.g. unmounted) and it is skipped.
pub type RectProvider = Box<dyn Fn() -> Option<Rect>>;

pub struct Droppable {
    pub provider: RectProvider,
}

pub struct Draggable {
    /// Pinned elements do not track container scrolling under the pointer
    pub pinned: bool,
    pub provider: RectProvider,
}

/// A drop target the pointer was over at release time
#[derive(Debug, Clone, PartialEq)]
pub struct Over {
    pub id: String,
    pub rect: Rect,
}

/// Query every registered droppable whose live rectangle contains `pointer`
pub fn overlapping_droppables(droppables: &HashMap<String, Droppable>, pointer: Point) -> Vec<Over> {
    let mut over: Vec<Over> = droppables
        .iter()
        .filter_map(|(id, droppable)| {
            let rect = (droppable.provider)()?;
            rect.contains(pointer).then(|| Over {
                id: id.clone(),
                rect,
            })
        })
        .collect();
    // HashMap iteration order is arbitrary; keep the over list deterministic
    over.sort_by(|a, b| a.id.cmp(&b.id));
    over
}
