// Entry module
// Timetable entry model: contributions, breaks and session blocks

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier for a scheduled entry
pub type EntryId = i64;

/// Errors raised when constructing or validating an entry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("entry title cannot be empty")]
    EmptyTitle,
    #[error("entry duration must be positive (got {0} minutes)")]
    NonPositiveDuration(i64),
    #[error("only blocks may have children (entry {0})")]
    ChildrenOnLeaf(EntryId),
    #[error("child {child} does not fit inside block {block}")]
    ChildOutsideBlock { child: EntryId, block: EntryId },
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// The kind of a timetable entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A plain scheduled activity, optionally belonging to a session
    Contribution,
    /// A scheduled pause
    Break,
    /// A session block containing child entries
    Block,
}

/// A scheduled timetable entry with its layout slot assignment.
///
/// The interval is `[start, start + duration)`; `duration` is in minutes and
/// must be positive. `column`/`max_column` are the horizontal slot assignment
/// produced by the layout engine, `width` and `x` are percentages of the
/// enclosing surface and `y` is a pixel offset computed from the start time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub kind: EntryKind,
    pub start: NaiveDateTime,
    /// Duration in minutes
    pub duration: i64,
    /// Session membership key; set on blocks and on contributions bound to a session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<i64>,
    /// Id of the enclosing block for child entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntryId>,
    /// Child entries; only meaningful for blocks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Entry>,
    pub column: u32,
    pub max_column: u32,
    /// Width as a percentage of the surface
    pub width: f32,
    /// Horizontal offset as a percentage of the surface
    pub x: f32,
    /// Vertical offset in pixels from the rendered day origin
    pub y: f32,
}

impl Entry {
    /// Create a new entry with required fields
    ///
    /// # Arguments
    /// * `id` - Entry identifier
    /// * `kind` - Entry kind (contribution, break or block)
    /// * `title` - Entry title (required, non-empty)
    /// * `start` - Start of the interval
    /// * `duration` - Duration in minutes (must be positive)
    pub fn new(
        id: EntryId,
        kind: EntryKind,
        title: impl Into<String>,
        start: NaiveDateTime,
        duration: i64,
    ) -> Result<Self, EntryError> {
        let entry = Self {
            id,
            title: title.into(),
            kind,
            start,
            duration,
            session_id: None,
            parent_id: None,
            children: Vec::new(),
            column: 0,
            max_column: 0,
            width: 0.0,
            x: 0.0,
            y: 0.0,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Create a builder for constructing entries with optional fields
    pub fn builder() -> EntryBuilder {
        EntryBuilder::new()
    }

    /// End of the interval (exclusive)
    pub fn end(&self) -> NaiveDateTime {
        self.start + Duration::minutes(self.duration)
    }

    /// Strict interval overlap. Touching intervals, where one entry ends
    /// exactly when the other starts, do not overlap.
    pub fn overlaps(&self, other: &Entry) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Whether `child`'s interval lies entirely within this entry's interval
    pub fn encloses(&self, child: &Entry) -> bool {
        child.start >= self.start && child.end() <= self.end()
    }

    pub fn is_block(&self) -> bool {
        self.kind == EntryKind::Block
    }

    /// Validate the entry, including child containment for blocks
    pub fn validate(&self) -> Result<(), EntryError> {
        if self.title.trim().is_empty() {
            return Err(EntryError::EmptyTitle);
        }
        if self.duration <= 0 {
            return Err(EntryError::NonPositiveDuration(self.duration));
        }
        if !self.is_block() && !self.children.is_empty() {
            return Err(EntryError::ChildrenOnLeaf(self.id));
        }
        for child in &self.children {
            child.validate()?;
            if !self.encloses(child) {
                return Err(EntryError::ChildOutsideBlock {
                    child: child.id,
                    block: self.id,
                });
            }
        }
        Ok(())
    }
}

/// Builder for creating entries with optional fields
pub struct EntryBuilder {
    id: Option<EntryId>,
    title: Option<String>,
    kind: EntryKind,
    start: Option<NaiveDateTime>,
    duration: Option<i64>,
    session_id: Option<i64>,
    parent_id: Option<EntryId>,
    children: Vec<Entry>,
    column: u32,
    max_column: u32,
}

impl EntryBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            title: None,
            kind: EntryKind::Contribution,
            start: None,
            duration: None,
            session_id: None,
            parent_id: None,
            children: Vec::new(),
            column: 0,
            max_column: 0,
        }
    }

    pub fn id(mut self, id: EntryId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn kind(mut self, kind: EntryKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the duration in minutes
    pub fn duration(mut self, minutes: i64) -> Self {
        self.duration = Some(minutes);
        self
    }

    pub fn session(mut self, session_id: i64) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn parent(mut self, parent_id: EntryId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn children(mut self, children: Vec<Entry>) -> Self {
        self.children = children;
        self
    }

    /// Seed the layout slot; used to keep output visually stable across re-layouts
    pub fn slot(mut self, column: u32, max_column: u32) -> Self {
        self.column = column;
        self.max_column = max_column;
        self
    }

    pub fn build(self) -> Result<Entry, EntryError> {
        let id = self.id.ok_or(EntryError::MissingField("entry id"))?;
        let title = self.title.ok_or(EntryError::MissingField("entry title"))?;
        let start = self.start.ok_or(EntryError::MissingField("entry start"))?;
        let duration = self.duration.ok_or(EntryError::MissingField("entry duration"))?;

        let entry = Entry {
            id,
            title,
            kind: self.kind,
            start,
            duration,
            session_id: self.session_id,
            parent_id: self.parent_id,
            children: self.children,
            column: self.column,
            max_column: self.max_column,
            width: 0.0,
            x: 0.0,
            y: 0.0,
        };
        entry.validate()?;
        Ok(entry)
    }
}

impl Default for EntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
