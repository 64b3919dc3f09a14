// Drag engine
// Single-session pointer interaction state machine

use std::collections::HashMap;

use super::geometry::{Point, Rect, Transform};
use super::modifiers::{identity, Modifier, ModifierInput};
use super::registry::{overlapping_droppables, Draggable, Droppable, Over, RectProvider};
use super::scroll::{scroll_velocity, ScrollIntentConfig};

/// The interaction states. At most one drag session is live at a time; a
/// pointer-down while a session exists is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    PointerDown,
    Dragging,
}

/// Emitted to the drop callback when a drag session ends with a pointer-up
#[derive(Debug, Clone, PartialEq)]
pub struct DropEvent {
    pub dragged_id: String,
    /// Droppables whose live rect contains the release position, dragged
    /// element excluded, ordered by id
    pub over: Vec<Over>,
    /// The final modified delta
    pub delta: Transform,
    /// Absolute pointer position at release
    pub pointer: Point,
    /// Pointer offset within the dragged element's rect at pointer-down
    pub initial_offset: Transform,
}

pub type DropCallback = Box<dyn FnMut(DropEvent)>;

#[derive(Default)]
struct DraggableData {
    rect: Option<Rect>,
    transform: Option<Transform>,
}

/// The drag-and-drop engine.
///
/// Hosts feed pointer, scroll and key events in; the engine tracks the
/// session state, runs the modifier to produce the live transform, and on
/// release resolves the overlapped droppables and invokes the drop callback.
/// Everything runs synchronously on the caller's thread.
pub struct DragEngine {
    droppables: HashMap<String, Droppable>,
    draggables: HashMap<String, Draggable>,
    data: HashMap<String, DraggableData>,
    modifier: Modifier,
    on_drop: DropCallback,
    scroll_config: ScrollIntentConfig,

    state: DragState,
    active: Option<String>,
    initial_pointer: Point,
    last_pointer: Point,
    initial_scroll: Point,
    scroll_compensation: Transform,
    initial_offset: Transform,
}

impl DragEngine {
    pub fn new(on_drop: impl FnMut(DropEvent) + 'static) -> Self {
        Self {
            droppables: HashMap::new(),
            draggables: HashMap::new(),
            data: HashMap::new(),
            modifier: identity(),
            on_drop: Box::new(on_drop),
            scroll_config: ScrollIntentConfig::default(),
            state: DragState::Idle,
            active: None,
            initial_pointer: Point::default(),
            last_pointer: Point::default(),
            initial_scroll: Point::default(),
            scroll_compensation: Transform::default(),
            initial_offset: Transform::default(),
        }
    }

    /// Replace the constraint applied to every transform computation
    pub fn set_modifier(&mut self, modifier: Modifier) {
        self.modifier = modifier;
    }

    pub fn set_scroll_config(&mut self, config: ScrollIntentConfig) {
        self.scroll_config = config;
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The live transform of a dragged element, if it is mid-drag
    pub fn transform_of(&self, id: &str) -> Option<Transform> {
        self.data.get(id).and_then(|d| d.transform)
    }

    // Registration. Both registries are idempotent: re-registering an id
    // replaces its provider, unregistering an unknown id is a no-op.

    pub fn register_droppable(&mut self, id: impl Into<String>, provider: RectProvider) {
        self.droppables.insert(id.into(), Droppable { provider });
    }

    pub fn unregister_droppable(&mut self, id: &str) {
        self.droppables.remove(id);
    }

    pub fn register_draggable(&mut self, id: impl Into<String>, pinned: bool, provider: RectProvider) {
        let id = id.into();
        self.data.entry(id.clone()).or_default();
        self.draggables.insert(id, Draggable { pinned, provider });
    }

    /// Unregistering the active draggable cancels the session
    pub fn unregister_draggable(&mut self, id: &str) {
        if self.active.as_deref() == Some(id) {
            log::debug!("active draggable {id} unregistered, cancelling session");
            self.reset_session();
        }
        self.data.remove(id);
        self.draggables.remove(id);
    }

    /// `Idle -> PointerDown`. Captures the initial pointer position, the
    /// scroll offset of the relevant scroll ancestor and the dragged
    /// element's bounding rect. Ignored unless idle and `id` is registered.
    pub fn pointer_down(&mut self, id: &str, pointer: Point, scroll_offset: Point) {
        if self.state != DragState::Idle {
            return;
        }
        let Some(draggable) = self.draggables.get(id) else {
            return;
        };
        let rect = (draggable.provider)();
        self.state = DragState::PointerDown;
        self.active = Some(id.to_string());
        self.initial_pointer = pointer;
        self.last_pointer = pointer;
        self.initial_scroll = scroll_offset;
        self.scroll_compensation = Transform::default();
        self.initial_offset = rect
            .map(|r| Transform::new(pointer.x - r.left(), pointer.y - r.top()))
            .unwrap_or_default();
        if let Some(data) = self.data.get_mut(id) {
            data.rect = rect;
        }
    }

    /// `PointerDown|Dragging -> Dragging`. Recomputes the modified transform
    /// and returns it so the host can position the dragged element.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<Transform> {
        if self.state == DragState::Idle {
            return None;
        }
        self.state = DragState::Dragging;
        self.last_pointer = pointer;
        self.apply_transform()
    }

    /// Content scrolled under an in-progress drag. `scroll_offset` is the
    /// scrolled ancestor's current offset; `contains_dragged` tells whether
    /// that ancestor contains the dragged element. Pinned draggables and
    /// unrelated containers are ignored.
    pub fn scroll(&mut self, scroll_offset: Point, contains_dragged: bool) -> Option<Transform> {
        if self.state != DragState::Dragging || !contains_dragged {
            return None;
        }
        let pinned = self
            .active
            .as_ref()
            .and_then(|id| self.draggables.get(id))
            .is_some_and(|d| d.pinned);
        if pinned {
            return None;
        }
        let delta = Transform::new(
            scroll_offset.x - self.scroll_compensation.x - self.initial_scroll.x,
            scroll_offset.y - self.scroll_compensation.y - self.initial_scroll.y,
        );
        self.scroll_compensation = self.scroll_compensation.add(delta);
        self.apply_transform()
    }

    /// `Dragging -> Idle` with a drop. Resolves the droppables under the
    /// release position and invokes the drop callback. A pointer-up before
    /// any movement (`PointerDown`) just returns to idle.
    pub fn pointer_up(&mut self, pointer: Point) {
        match self.state {
            DragState::Idle => return,
            DragState::PointerDown => {
                self.reset_session();
                return;
            }
            DragState::Dragging => {}
        }
        let Some(id) = self.active.clone() else {
            self.reset_session();
            return;
        };
        self.last_pointer = pointer;
        let delta = self.modified_transform(&id);
        let mut over = overlapping_droppables(&self.droppables, pointer);
        over.retain(|o| o.id != id);
        log::debug!(
            "drop of {id}: {} droppable(s) under the pointer",
            over.len()
        );
        let event = DropEvent {
            dragged_id: id,
            over,
            delta,
            pointer,
            initial_offset: self.initial_offset,
        };
        self.reset_session();
        (self.on_drop)(event);
    }

    /// Escape pressed: cancel immediately, without a drop
    pub fn cancel(&mut self) {
        if self.state != DragState::Idle {
            log::debug!("drag session cancelled");
            self.reset_session();
        }
    }

    /// Auto-scroll velocity for the container the drag happens in, while a
    /// drag is in progress and the pointer sits in an edge margin
    pub fn scroll_intent(&self, container: Rect) -> Option<Transform> {
        if self.state != DragState::Dragging {
            return None;
        }
        scroll_velocity(self.last_pointer, container, self.scroll_config)
    }

    fn raw_transform(&self) -> Transform {
        Transform::new(
            self.last_pointer.x - self.initial_pointer.x + self.scroll_compensation.x,
            self.last_pointer.y - self.initial_pointer.y + self.scroll_compensation.y,
        )
    }

    fn modified_transform(&self, id: &str) -> Transform {
        let rect = self.data.get(id).and_then(|d| d.rect);
        (self.modifier)(&ModifierInput {
            dragging_rect: rect,
            transform: self.raw_transform(),
            id,
        })
    }

    fn apply_transform(&mut self) -> Option<Transform> {
        let id = self.active.clone()?;
        let transform = self.modified_transform(&id);
        if let Some(data) = self.data.get_mut(&id) {
            data.transform = Some(transform);
        }
        Some(transform)
    }

    fn reset_session(&mut self) {
        if let Some(id) = self.active.take() {
            if let Some(data) = self.data.get_mut(&id) {
                data.rect = None;
                data.transform = None;
            }
        }
        self.state = DragState::Idle;
        self.scroll_compensation = Transform::default();
        self.initial_offset = Transform::default();
    }
}
