//! Visibility state of the info bubble.
//!
//! This module only holds data; the transitions that talk to the street and
//! the host live in [`crate::bubble`].

use egui::{Pos2, Rect, Vec2};

use crate::domain::polygon::HoverPolygon;
use crate::model::{BubbleTarget, ConsiderationRequest};

/// Coarse phase of the bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BubblePhase {
    #[default]
    Hidden,
    Visible,
    /// Hidden and ignoring show requests until the cooldown ends
    Suppressed,
}

/// State owned by the visibility state machine.
///
/// Responsibilities:
/// - Committed target and pending consideration request
/// - Bubble rectangle and hover polygon while visible
/// - Pointer tracking and description panel flag
/// - Suppression and the forced flag of a deferred retry
#[derive(Debug, Clone, Default)]
pub struct VisibilityState {
    phase: BubblePhase,
    committed: Option<BubbleTarget>,
    consideration: Option<ConsiderationRequest>,
    /// Screen rectangle of the bubble while visible
    bubble_rect: Option<Rect>,
    polygon: Option<HoverPolygon>,
    last_pointer: Option<Pos2>,
    pointer_inside: bool,
    description_open: bool,
    retry_pending: bool,
    retry_forced: bool,
}

impl VisibilityState {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Phase =====

    pub fn phase(&self) -> BubblePhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.phase == BubblePhase::Visible
    }

    pub fn is_suppressed(&self) -> bool {
        self.phase == BubblePhase::Suppressed
    }

    /// Commits a shown target at its measured and positioned rectangle.
    pub fn mark_visible(&mut self, target: BubbleTarget, rect: Rect) {
        self.phase = BubblePhase::Visible;
        self.committed = Some(target);
        self.bubble_rect = Some(rect);
    }

    /// Drops everything tied to the shown bubble and returns the target it
    /// described. Suppression survives a hide.
    pub fn reset_to_hidden(&mut self) -> Option<BubbleTarget> {
        if self.phase == BubblePhase::Visible {
            self.phase = BubblePhase::Hidden;
        }
        self.bubble_rect = None;
        self.polygon = None;
        self.pointer_inside = false;
        self.description_open = false;
        self.committed.take()
    }

    /// Enters the suppressed phase. Returns true on the first call.
    pub fn enter_suppressed(&mut self) -> bool {
        let first = self.phase != BubblePhase::Suppressed;
        self.phase = BubblePhase::Suppressed;
        first
    }

    pub fn leave_suppressed(&mut self) {
        if self.phase == BubblePhase::Suppressed {
            self.phase = BubblePhase::Hidden;
        }
    }

    // ===== Targets =====

    pub fn committed(&self) -> Option<&BubbleTarget> {
        self.committed.as_ref()
    }

    pub fn consideration(&self) -> Option<&ConsiderationRequest> {
        self.consideration.as_ref()
    }

    pub fn record_consideration(&mut self, request: ConsiderationRequest) {
        self.consideration = Some(request);
    }

    pub fn clear_consideration(&mut self) {
        self.consideration = None;
    }

    /// Whether `target` is the one currently shown.
    pub fn is_committed(&self, target: &BubbleTarget) -> bool {
        self.committed.as_ref().is_some_and(|committed| committed.same_as(target))
    }

    // ===== Geometry =====

    pub fn bubble_rect(&self) -> Option<Rect> {
        self.bubble_rect
    }

    /// Keeps the top-left corner and applies a newly measured size.
    pub fn resize_bubble(&mut self, size: Vec2) {
        if let Some(rect) = self.bubble_rect {
            self.bubble_rect = Some(Rect::from_min_size(rect.min, size));
        }
    }

    pub fn polygon(&self) -> Option<&HoverPolygon> {
        self.polygon.as_ref()
    }

    pub fn set_polygon(&mut self, polygon: Option<HoverPolygon>) {
        self.polygon = polygon;
    }

    /// Containment against the current polygon; no polygon contains nothing.
    pub fn polygon_contains(&self, point: Pos2) -> bool {
        self.polygon.as_ref().is_some_and(|polygon| polygon.contains(point))
    }

    // ===== Pointer and description =====

    pub fn last_pointer(&self) -> Option<Pos2> {
        self.last_pointer
    }

    pub fn set_last_pointer(&mut self, pointer: Pos2) {
        self.last_pointer = Some(pointer);
    }

    pub fn pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    pub fn set_pointer_inside(&mut self, inside: bool) {
        self.pointer_inside = inside;
    }

    pub fn description_open(&self) -> bool {
        self.description_open
    }

    pub fn set_description_open(&mut self, open: bool) {
        self.description_open = open;
    }

    // ===== Deferred retry =====

    /// Records a deferred `show`. A forced request keeps the retry forced
    /// until it runs.
    pub fn request_retry(&mut self, force: bool) {
        self.retry_forced = if self.retry_pending { self.retry_forced || force } else { force };
        self.retry_pending = true;
    }

    /// Consumes the pending retry and returns its forced flag.
    pub fn take_retry(&mut self) -> bool {
        let forced = self.retry_forced;
        self.retry_pending = false;
        self.retry_forced = false;
        forced
    }
}
