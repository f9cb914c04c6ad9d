//! Edit sessions of the bubble's numeric fields.
//!
//! A session mirrors one rendered text field (a segment width or a building
//! height): the committed model value, the value at focus time, the raw text
//! being typed and focus/selection flags. The editor also keeps the global
//! "held" flag and the single pending deferred commit.

use super::timers::TimerHandle;
use crate::model::{BubbleKind, ModelRef};

/// Which numeric field a session edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Segment width in feet
    Width,
    /// Building height in floors
    Height,
}

impl FieldKind {
    /// Field shown in a bubble of the given kind.
    pub fn for_bubble(kind: BubbleKind) -> Self {
        match kind {
            BubbleKind::Segment => FieldKind::Width,
            BubbleKind::LeftBuilding | BubbleKind::RightBuilding => FieldKind::Height,
        }
    }
}

/// How a parsed value reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Write now and cancel any pending commit
    Immediate,
    /// Replace the single pending commit and write when its timer fires
    Deferred,
}

/// A clamped value bound for the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWrite {
    pub field: FieldKind,
    pub model: ModelRef,
    pub value: f64,
}

/// A write waiting for the field-commit timer it was scheduled with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingCommit {
    pub write: FieldWrite,
    pub timer: TimerHandle,
}

/// State of one rendered numeric field.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    field: FieldKind,
    committed_value: f64,
    /// Committed value when the field gained focus
    old_value: f64,
    raw_text: String,
    /// Decorated form of the committed value
    display: String,
    focused: bool,
    selected: bool,
}

impl EditSession {
    pub fn new(field: FieldKind, committed_value: f64, display: String) -> Self {
        Self {
            field,
            committed_value,
            old_value: committed_value,
            raw_text: display.clone(),
            display,
            focused: false,
            selected: false,
        }
    }

    pub fn field(&self) -> FieldKind {
        self.field
    }

    pub fn committed_value(&self) -> f64 {
        self.committed_value
    }

    pub fn old_value(&self) -> f64 {
        self.old_value
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Snapshots the committed value and switches to the edit-friendly text.
    pub fn focus(&mut self, edit_text: String) {
        self.old_value = self.committed_value;
        self.raw_text = edit_text;
        self.focused = true;
    }

    /// Leaves the field showing the decorated committed value.
    pub fn blur(&mut self) {
        self.focused = false;
        self.selected = false;
        self.raw_text = self.display.clone();
    }

    pub fn select_all(&mut self) {
        self.selected = true;
    }

    pub fn set_raw_text(&mut self, text: &str) {
        self.raw_text = text.to_string();
        self.selected = false;
    }

    /// Applies a newly committed model value. Text being typed is left alone.
    pub fn sync(&mut self, value: f64, display: String) {
        self.committed_value = value;
        self.display = display;
        if !self.focused {
            self.raw_text = self.display.clone();
        }
    }
}

/// Owner of the current session, the held flag and the pending commit.
#[derive(Debug, Clone, Default)]
pub struct FieldEditor {
    session: Option<EditSession>,
    held: bool,
    pending: Option<PendingCommit>,
}

impl FieldEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the session after contents were rebuilt. Any pending commit
    /// belonged to the old field and is dropped.
    pub fn attach(&mut self, session: Option<EditSession>) {
        self.session = session;
        self.pending = None;
        self.held = false;
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    /// Mutable session, only if it edits `field`.
    pub fn session_mut(&mut self, field: FieldKind) -> Option<&mut EditSession> {
        self.session.as_mut().filter(|session| session.field == field)
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn set_held(&mut self, held: bool) {
        self.held = held;
    }

    pub fn set_pending(&mut self, commit: PendingCommit) {
        self.pending = Some(commit);
    }

    pub fn take_pending(&mut self) -> Option<PendingCommit> {
        self.pending.take()
    }
}
