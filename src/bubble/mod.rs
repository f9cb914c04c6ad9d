//! The info bubble engine.
//!
//! [`InfoBubble`] is the single owner of all bubble state. Every entry point
//! takes a [`BubbleContext`] that lends it the street store, the host surface
//! and the current time for the duration of one event. Timers never fire on
//! their own; the host calls [`InfoBubble::tick`] and may use
//! [`InfoBubble::next_deadline`] to know when.
//!
//! The implementation is split by concern:
//! - `visibility` - consider/show/hide/suppress and pointer tracking
//! - `fields` - the debounced numeric field protocol
//! - `actions` - steppers, variant pickers, removal and the description panel

mod actions;
mod fields;
mod visibility;

#[cfg(test)]
pub(crate) mod mock;

use std::time::Duration;

use crate::config::BubbleConfig;
use crate::domain::contents::BubbleContents;
use crate::domain::polygon::HoverPolygon;
use crate::model::BubbleTarget;
use crate::state::{BubblePhase, EditSession, FieldEditor, TimerPurpose, Timers, VisibilityState};
use crate::traits::{BubbleHost, StreetStore};

pub use fields::{clamp_height_text, clamp_width_text, ClampFn, FieldKey};

/// Collaborators lent to the bubble for one event.
pub struct BubbleContext<'a> {
    pub store: &'a mut dyn StreetStore,
    pub host: &'a mut dyn BubbleHost,
    /// Time since an arbitrary fixed origin
    pub now: Duration,
}

impl<'a> BubbleContext<'a> {
    pub fn new(store: &'a mut dyn StreetStore, host: &'a mut dyn BubbleHost, now: Duration) -> Self {
        Self { store, host, now }
    }
}

/// The one info bubble of a street editor.
#[derive(Debug, Default)]
pub struct InfoBubble {
    config: BubbleConfig,
    visibility: VisibilityState,
    fields: FieldEditor,
    timers: Timers,
    contents: Option<BubbleContents>,
}

impl InfoBubble {
    pub fn new(config: BubbleConfig) -> Self {
        Self {
            config: config.sanitized(),
            visibility: VisibilityState::new(),
            fields: FieldEditor::new(),
            timers: Timers::new(),
            contents: None,
        }
    }

    // ===== Queries =====

    pub fn config(&self) -> &BubbleConfig {
        &self.config
    }

    /// Replaces the configuration. Takes effect on the next show.
    pub fn set_config(&mut self, config: BubbleConfig) {
        self.config = config.sanitized();
    }

    pub fn phase(&self) -> BubblePhase {
        self.visibility.phase()
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    pub fn is_suppressed(&self) -> bool {
        self.visibility.is_suppressed()
    }

    pub fn target(&self) -> Option<&BubbleTarget> {
        self.visibility.committed()
    }

    pub fn contents(&self) -> Option<&BubbleContents> {
        self.contents.as_ref()
    }

    /// Screen rectangle of the bubble while it is visible.
    pub fn bubble_rect(&self) -> Option<egui::Rect> {
        self.visibility.bubble_rect()
    }

    pub fn hover_polygon(&self) -> Option<&HoverPolygon> {
        self.visibility.polygon()
    }

    pub fn description_open(&self) -> bool {
        self.visibility.description_open()
    }

    /// Session of the numeric field currently rendered, if any.
    pub fn edit_session(&self) -> Option<&EditSession> {
        self.fields.session()
    }

    pub fn is_field_held(&self) -> bool {
        self.fields.is_held()
    }

    /// Earliest time at which [`InfoBubble::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    // ===== Timers =====

    /// Fires every timer due at `ctx.now`, earliest first.
    pub fn tick(&mut self, ctx: &mut BubbleContext) {
        while let Some(handle) = self.timers.pop_due(ctx.now) {
            log::trace!("Timer fired: {:?}", handle);
            match handle.purpose() {
                TimerPurpose::HoverPolygon => self.rebuild_polygon(ctx),
                TimerPurpose::RetryShow => {
                    let force = self.visibility.take_retry();
                    self.show(ctx, force);
                }
                TimerPurpose::Unsuppress => self.unsuppress(),
                TimerPurpose::FieldCommit => self.apply_pending_commit(ctx, handle),
            }
        }
    }
}
