// Drag-and-drop service
// A pointer-driven interaction engine decoupled from any rendering toolkit

mod engine;
mod geometry;
mod modifiers;
mod registry;
mod scroll;

pub use engine::{DragEngine, DragState, DropCallback, DropEvent};
pub use geometry::{Point, Rect, Transform};
pub use modifiers::{compose, identity, restrict_to_rect, Modifier, ModifierInput};
pub use registry::{Over, RectProvider};
pub use scroll::{scroll_velocity, ScrollIntentConfig};
