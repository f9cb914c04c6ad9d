//! State management modules for the info bubble.
//!
//! This module contains state-only logic (no host or store access):
//! - Timers (one cancellable deadline per purpose)
//! - Visibility state (phase, committed target, polygon, pointer tracking)
//! - Field edit state (edit sessions, held flag, pending commit)

mod timers;
mod visibility;
mod field_edit;

pub use timers::{TimerHandle, TimerPurpose, Timers};
pub use visibility::{BubblePhase, VisibilityState};
pub use field_edit::{CommitPolicy, EditSession, FieldEditor, FieldKind, FieldWrite, PendingCommit};
