//! Show, hide and suppress transitions, pointer tracking and polygon upkeep.

use egui::Pos2;

use super::{BubbleContext, InfoBubble};
use crate::domain::contents::build_contents;
use crate::domain::hover_polygon::{build_hover_polygon, PolygonInputs};
use crate::domain::positioning::{element_to_screen, position_bubble};
use crate::model::{Affordances, BubbleTarget, ConsiderationRequest, DragMode};
use crate::state::TimerPurpose;

impl InfoBubble {
    // ===== Consideration =====

    /// Asks the bubble to describe `target`, typically on pointer-enter.
    ///
    /// Ignored while a menu is open or the street is read-only. The bubble
    /// only moves right away when it is hidden or the pointer has left the
    /// hover polygon; otherwise the request waits for the next pointer move.
    ///
    /// # Arguments
    /// * `target` - Element and model slice to describe
    /// * `pointer` - Pointer position; the element's top-left when `None`
    pub fn consider_showing(&mut self, ctx: &mut BubbleContext, target: BubbleTarget, pointer: Option<Pos2>) {
        if ctx.host.is_any_menu_visible() || ctx.host.is_read_only() {
            return;
        }

        let pointer = pointer
            .or_else(|| {
                let element = ctx.host.element_rect(target.element?)?;
                Some(element_to_screen(element, ctx.host.scroll_x()).left_top())
            })
            .unwrap_or(Pos2::ZERO);
        self.visibility.record_consideration(ConsiderationRequest { pointer, target });

        if self.visibility.is_committed(&target) {
            return;
        }

        if !self.visibility.is_visible() || !self.visibility.polygon_contains(pointer) {
            self.show(ctx, false);
        }
    }

    /// Forgets the pending candidate, typically on pointer-leave.
    pub fn dont_consider_showing(&mut self) {
        self.visibility.clear_consideration();
    }

    // ===== Show / hide =====

    /// Shows the bubble for the pending candidate.
    ///
    /// Without a candidate the bubble hides. An unchanged candidate is a no-op
    /// unless `force` is set. While suppressed the call is retried once the
    /// cooldown has passed.
    pub fn show(&mut self, ctx: &mut BubbleContext, force: bool) {
        if self.visibility.is_suppressed() {
            self.visibility.request_retry(force);
            self.timers.schedule(TimerPurpose::RetryShow, ctx.now, self.config.suppress_cooldown());
            log::debug!("Show deferred while suppressed (force: {})", force);
            return;
        }

        if ctx.host.drag_mode() == DragMode::Active {
            return;
        }

        let Some(request) = self.visibility.consideration().copied() else {
            self.hide(ctx);
            return;
        };

        if self.visibility.is_committed(&request.target) && !force {
            return;
        }

        let Some(element) = request.target.element.and_then(|element| ctx.host.element_rect(element)) else {
            log::warn!("Bubble target {:?} has no geometry", request.target);
            self.hide(ctx);
            return;
        };

        let Some(contents) = build_contents(&request.target, &*ctx.store, &self.config, false) else {
            log::warn!("Bubble target {:?} is no longer in the street", request.target);
            self.hide(ctx);
            return;
        };

        let was_visible = self.visibility.is_visible();
        if let Some(previous) = self.visibility.committed().and_then(|target| target.element) {
            ctx.host.set_affordances(previous, Affordances::NONE);
        }
        if let Some(element) = request.target.element {
            ctx.host.set_affordances(element, Affordances::targeted(was_visible));
        }

        self.visibility.set_description_open(false);
        self.visibility.set_pointer_inside(false);

        let size = ctx.host.render(&contents);
        let rect = position_bubble(element, size, ctx.host.viewport_size(), ctx.host.scroll_x(), &self.config);
        self.visibility.mark_visible(request.target, rect);
        self.attach_fields(&contents);
        self.contents = Some(contents);
        self.update_polygon(ctx, request.pointer);

        log::debug!("Bubble shown for {:?} at {:?}", request.target, rect);
    }

    /// Hides the bubble and detaches it from its element. Idempotent.
    ///
    /// Pending polygon rebuilds and field commits are cancelled so nothing
    /// stale reaches the store afterwards.
    pub fn hide(&mut self, ctx: &mut BubbleContext) {
        self.timers.cancel(TimerPurpose::HoverPolygon);
        if self.timers.cancel(TimerPurpose::FieldCommit) {
            log::debug!("Pending field commit dropped by hide");
        }
        self.fields.attach(None);
        self.contents = None;

        if let Some(previous) = self.visibility.reset_to_hidden() {
            if let Some(element) = previous.element {
                ctx.host.set_affordances(element, Affordances::NONE);
            }
            log::debug!("Bubble hidden (was {:?})", previous);
        }
    }

    // ===== Suppression =====

    /// Hides the bubble and ignores show requests for the cooldown.
    /// Repeated calls extend the cooldown.
    pub fn suppress(&mut self, ctx: &mut BubbleContext) {
        if !self.visibility.is_suppressed() {
            self.hide(ctx);
            self.visibility.enter_suppressed();
            log::debug!("Bubble suppressed");
        }
        self.timers.schedule(TimerPurpose::Unsuppress, ctx.now, self.config.suppress_cooldown());
    }

    pub fn unsuppress(&mut self) {
        self.timers.cancel(TimerPurpose::Unsuppress);
        if self.visibility.is_suppressed() {
            self.visibility.leave_suppressed();
            log::debug!("Bubble unsuppressed");
        }
    }

    // ===== Pointer tracking =====

    /// Global pointer move, screen coordinates.
    pub fn on_pointer_move(&mut self, ctx: &mut BubbleContext, pointer: Pos2) {
        self.visibility.set_last_pointer(pointer);
        if !self.visibility.is_visible() {
            return;
        }

        if !self.visibility.polygon_contains(pointer) {
            self.show(ctx, false);
        }

        if self.visibility.is_visible() {
            self.timers.schedule(TimerPurpose::HoverPolygon, ctx.now, self.config.polygon_debounce());
        }
    }

    pub fn on_bubble_pointer_enter(&mut self, ctx: &mut BubbleContext) {
        if !self.visibility.is_visible() {
            return;
        }
        self.visibility.set_pointer_inside(true);
        if let Some(element) = self.visibility.committed().and_then(|target| target.element) {
            ctx.host.set_affordances(element, Affordances::inside_bubble());
        }
        self.rebuild_polygon(ctx);
    }

    pub fn on_bubble_pointer_leave(&mut self, ctx: &mut BubbleContext) {
        if !self.visibility.pointer_inside() {
            return;
        }
        self.visibility.set_pointer_inside(false);
        if let Some(element) = self.visibility.committed().and_then(|target| target.element) {
            ctx.host.set_affordances(element, Affordances::targeted(false));
        }
    }

    // ===== Keyboard and window =====

    /// Escape pressed outside of a field. Collapses the description first,
    /// then hides the bubble. Returns whether the key was consumed.
    pub fn on_escape(&mut self, ctx: &mut BubbleContext) -> bool {
        if !self.visibility.is_visible() {
            return false;
        }
        if self.visibility.description_open() {
            self.hide_description(ctx);
        } else {
            self.hide(ctx);
        }
        true
    }

    /// The viewport changed size; re-run placement for the candidate.
    pub fn on_viewport_resize(&mut self, ctx: &mut BubbleContext) {
        self.show(ctx, true);
    }

    // ===== Hover polygon =====

    /// Rebuilds the polygon around `pointer`, or clears it when hidden.
    pub(super) fn update_polygon(&mut self, ctx: &BubbleContext, pointer: Pos2) {
        let bubble = match self.visibility.bubble_rect() {
            Some(rect) if self.visibility.is_visible() => rect,
            _ => {
                self.visibility.set_polygon(None);
                return;
            }
        };

        let scroll_x = ctx.host.scroll_x();
        let element = self
            .visibility
            .committed()
            .and_then(|target| target.element)
            .and_then(|element| ctx.host.element_rect(element))
            .map(|rect| element_to_screen(rect, scroll_x));

        let inputs = PolygonInputs {
            bubble,
            pointer,
            element,
            pointer_inside: self.visibility.pointer_inside(),
            description_open: self.visibility.description_open(),
        };
        let polygon = build_hover_polygon(&inputs, &self.config);
        log::trace!("Hover polygon rebuilt with {} points", polygon.points().len());
        self.visibility.set_polygon(Some(polygon));
    }

    /// Rebuilds the polygon around the last known pointer position.
    pub(super) fn rebuild_polygon(&mut self, ctx: &BubbleContext) {
        let pointer = self
            .visibility
            .last_pointer()
            .or_else(|| self.visibility.consideration().map(|request| request.pointer))
            .or_else(|| self.visibility.bubble_rect().map(|rect| rect.center_bottom()))
            .unwrap_or(Pos2::ZERO);
        self.update_polygon(ctx, pointer);
    }
}
