//! Contents updates and the bubble's own controls.
//!
//! Covers the stepper buttons, variant pickers, the remove button and the
//! description panel, plus the entry points collaborators use to refresh
//! what the bubble shows after the street changed.

use super::{BubbleContext, InfoBubble};
use crate::catalog;
use crate::domain::contents::{build_contents, height_stepper, segment_warnings, width_stepper};
use crate::model::{BuildingSide, ElementId};
use crate::state::FieldKind;

impl InfoBubble {
    // ===== Contents updates =====

    /// Rebuilds the whole contents for the committed target.
    ///
    /// The edit session is recreated, which drops any pending field commit.
    /// A target that disappeared from the street hides the bubble.
    pub fn update_contents(&mut self, ctx: &mut BubbleContext) {
        if !self.visibility.is_visible() {
            return;
        }
        let Some(target) = self.visibility.committed().copied() else {
            return;
        };

        match build_contents(&target, &*ctx.store, &self.config, self.visibility.description_open()) {
            Some(contents) => {
                self.visibility.set_description_open(contents.description_open);
                self.attach_fields(&contents);
                self.contents = Some(contents);
                self.rerender(ctx);
            }
            None => {
                log::warn!("Bubble target {:?} vanished during update", target);
                self.hide(ctx);
            }
        }
    }

    /// Refreshes the width stepper and warnings if `element` is the shown segment.
    pub fn update_width_in_contents(&mut self, ctx: &mut BubbleContext, element: ElementId, width: f64) {
        if !self.visibility.is_visible() {
            return;
        }
        let Some(target) = self.visibility.committed().copied() else {
            return;
        };
        if target.element != Some(element) {
            return;
        }
        let Some(index) = target.segment_index() else {
            return;
        };

        let stepper = width_stepper(width, &self.config);
        if let Some(session) = self.fields.session_mut(FieldKind::Width) {
            session.sync(width, stepper.display.clone());
        }
        let warnings = segment_warnings(index, &*ctx.store);
        if let Some(contents) = self.contents.as_mut() {
            contents.width = Some(stepper);
            contents.warnings = warnings;
        }
        self.rerender(ctx);
    }

    /// Refreshes the height stepper if the shown bubble is for that building.
    pub fn update_height_in_contents(&mut self, ctx: &mut BubbleContext, is_left: bool) {
        let side = BuildingSide::from_is_left(is_left);
        if !self.visibility.is_visible() {
            return;
        }
        if self.visibility.committed().and_then(|target| target.building_side()) != Some(side) {
            return;
        }

        let stepper = height_stepper(side, &*ctx.store, &self.config);
        if let Some(session) = self.fields.session_mut(FieldKind::Height) {
            session.sync(stepper.value, stepper.display.clone());
        }
        if let Some(contents) = self.contents.as_mut() {
            contents.height = Some(stepper);
        }
        self.rerender(ctx);
    }

    /// The host's rendered size for the current contents changed.
    pub fn remeasure(&mut self, ctx: &mut BubbleContext) {
        if self.visibility.is_visible() {
            self.rerender(ctx);
        }
    }

    /// Renders the current contents again and re-measures the bubble.
    fn rerender(&mut self, ctx: &mut BubbleContext) {
        let Some(contents) = self.contents.as_ref() else {
            return;
        };
        let size = ctx.host.render(contents);
        self.visibility.resize_bubble(size);
        self.rebuild_polygon(ctx);
    }

    // ===== Steppers =====

    /// "+" / "–" next to the width. `precise` uses the finer increment.
    pub fn step_width(&mut self, ctx: &mut BubbleContext, increment: bool, precise: bool) {
        let Some(target) = self.visibility.committed().copied() else {
            return;
        };
        let Some(index) = target.segment_index() else {
            return;
        };
        let Some(width) = ctx.store.segment_width(index) else {
            return;
        };

        let step = if precise {
            self.config.width_precise_click_increment
        } else {
            self.config.width_click_increment
        };
        let width = self.config.clamp_width(if increment { width + step } else { width - step });
        ctx.store.set_segment_width(index, width);
        if let Some(element) = target.element {
            self.update_width_in_contents(ctx, element, width);
        }
    }

    /// "+" / "–" next to the floor count. Only floored buildings change.
    pub fn step_height(&mut self, ctx: &mut BubbleContext, increment: bool) {
        let Some(side) = self.visibility.committed().and_then(|target| target.building_side()) else {
            return;
        };
        if !catalog::is_floored_building(&ctx.store.building_variant(side)) {
            return;
        }

        let floors = ctx.store.building_height(side) as i64 + if increment { 1 } else { -1 };
        ctx.store.set_building_height(side, self.config.clamp_floors(floors));
        self.update_height_in_contents(ctx, side.is_left());
    }

    // ===== Variants =====

    pub fn choose_segment_variant(&mut self, ctx: &mut BubbleContext, variant_type: &str, choice: &str) {
        let Some(index) = self.visibility.committed().and_then(|target| target.segment_index()) else {
            return;
        };
        log::debug!("Segment {} {} -> {}", index, variant_type, choice);
        ctx.store.set_segment_variant(index, variant_type, choice);
        self.update_contents(ctx);
    }

    pub fn choose_building_variant(&mut self, ctx: &mut BubbleContext, choice: &str) {
        let Some(side) = self.visibility.committed().and_then(|target| target.building_side()) else {
            return;
        };
        log::debug!("{:?} building -> {}", side, choice);
        ctx.store.set_building_variant(side, choice);
        self.update_contents(ctx);
    }

    // ===== Removal =====

    /// Removes the shown segment, or every segment when `all` is set, and
    /// hides the bubble.
    pub fn remove_segment(&mut self, ctx: &mut BubbleContext, all: bool) {
        let Some(index) = self.visibility.committed().and_then(|target| target.segment_index()) else {
            return;
        };
        if all {
            log::debug!("Removing all segments");
            ctx.store.remove_all_segments();
        } else {
            log::debug!("Removing segment {}", index);
            ctx.store.remove_segment(index);
        }
        self.dont_consider_showing();
        self.hide(ctx);
    }

    // ===== Description =====

    /// Expands the description panel; the hover polygon widens with it.
    pub fn show_description(&mut self, ctx: &mut BubbleContext) {
        if !self.visibility.is_visible() || self.visibility.description_open() {
            return;
        }
        let Some(contents) = self.contents.as_mut() else {
            return;
        };
        if contents.description.is_none() {
            return;
        }
        contents.description_open = true;
        self.visibility.set_description_open(true);
        self.rerender(ctx);
    }

    pub fn hide_description(&mut self, ctx: &mut BubbleContext) {
        if !self.visibility.description_open() {
            return;
        }
        self.visibility.set_description_open(false);
        if let Some(contents) = self.contents.as_mut() {
            contents.description_open = false;
        }
        self.rerender(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bubble::mock::{Fixture, LEFT_BUILDING, RIGHT_BUILDING, SEGMENT_A};
    use crate::model::{BubbleTarget, WarningKind};
    use egui::pos2;

    fn shown(target: BubbleTarget) -> Fixture {
        let mut fx = Fixture::new();
        fx.run(|bubble, ctx| bubble.consider_showing(ctx, target, Some(pos2(460.0, 500.0))));
        assert!(fx.bubble.is_visible());
        fx
    }

    #[test]
    fn test_step_width() {
        let mut fx = shown(BubbleTarget::segment(SEGMENT_A, 0));
        fx.run(|bubble, ctx| bubble.step_width(ctx, true, false));
        assert_eq!(fx.store.street.segments[0].width, 6.5);
        fx.run(|bubble, ctx| bubble.step_width(ctx, false, true));
        assert_eq!(fx.store.street.segments[0].width, 6.25);

        let contents = fx.bubble.contents().unwrap();
        assert_eq!(contents.width.as_ref().unwrap().display, "6¼'");
        assert_eq!(fx.bubble.edit_session().unwrap().committed_value(), 6.25);
    }

    #[test]
    fn test_step_width_refreshes_warnings() {
        let mut fx = shown(BubbleTarget::segment(SEGMENT_A, 0));
        assert!(fx.bubble.contents().unwrap().warnings.is_empty());
        for _ in 0..10 {
            fx.run(|bubble, ctx| bubble.step_width(ctx, true, false));
        }
        // Bike lane at 11' is wider than recommended.
        assert_eq!(fx.bubble.contents().unwrap().warnings, vec![WarningKind::TooWide]);
    }

    #[test]
    fn test_step_height_respects_bounds_and_variant() {
        let mut fx = shown(BubbleTarget::building(LEFT_BUILDING, BuildingSide::Left));
        fx.run(|bubble, ctx| bubble.step_height(ctx, true));
        assert_eq!(fx.store.street.left_building.height, 5);
        assert_eq!(fx.bubble.contents().unwrap().height.as_ref().unwrap().display, "5 floors (56')");

        let mut fx = shown(BubbleTarget::building(RIGHT_BUILDING, BuildingSide::Right));
        fx.run(|bubble, ctx| bubble.step_height(ctx, true));
        assert!(fx.store.height_writes.is_empty());
    }

    #[test]
    fn test_choose_variants_rebuild_contents() {
        let mut fx = shown(BubbleTarget::segment(SEGMENT_A, 0));
        let renders = fx.host.renders.len();
        fx.run(|bubble, ctx| bubble.choose_segment_variant(ctx, "direction", "outbound"));
        assert_eq!(fx.store.street.segments[0].variant["direction"], "outbound");
        assert_eq!(fx.host.renders.len(), renders + 1);
        let direction = &fx.bubble.contents().unwrap().variants[0];
        assert!(direction.choices.iter().any(|c| c.choice == "outbound" && c.selected));

        let mut fx = shown(BubbleTarget::building(LEFT_BUILDING, BuildingSide::Left));
        fx.run(|bubble, ctx| bubble.choose_building_variant(ctx, "grass"));
        let contents = fx.bubble.contents().unwrap();
        assert_eq!(contents.title, "Grass");
        assert!(!contents.height.as_ref().unwrap().editable);
        assert!(fx.bubble.edit_session().is_none());
    }

    #[test]
    fn test_remove_segment_hides_bubble() {
        let mut fx = shown(BubbleTarget::segment(SEGMENT_A, 0));
        fx.run(|bubble, ctx| bubble.remove_segment(ctx, false));
        assert_eq!(fx.store.street.segments.len(), 1);
        assert!(!fx.bubble.is_visible());

        // A removed segment is not shown again on the next pointer move.
        fx.run(|bubble, ctx| bubble.show(ctx, true));
        assert!(!fx.bubble.is_visible());
    }

    #[test]
    fn test_remove_all_segments() {
        let mut fx = shown(BubbleTarget::segment(SEGMENT_A, 0));
        fx.run(|bubble, ctx| bubble.remove_segment(ctx, true));
        assert!(fx.store.street.segments.is_empty());
    }

    #[test]
    fn test_description_widens_polygon() {
        let mut fx = shown(BubbleTarget::segment(SEGMENT_A, 0));
        let far_left = pos2(fx.bubble.bubble_rect().unwrap().left() - 100.0, 300.0);
        assert!(!fx.bubble.hover_polygon().unwrap().contains(far_left));

        fx.run(|bubble, ctx| bubble.show_description(ctx));
        assert!(fx.bubble.description_open());
        assert!(fx.host.renders.last().unwrap().description_open);
        assert!(fx.bubble.hover_polygon().unwrap().contains(far_left));

        // Escape collapses the description before hiding.
        fx.run(|bubble, ctx| assert!(bubble.on_escape(ctx)));
        assert!(!fx.bubble.description_open());
        assert!(fx.bubble.is_visible());
        fx.run(|bubble, ctx| assert!(bubble.on_escape(ctx)));
        assert!(!fx.bubble.is_visible());
        fx.run(|bubble, ctx| assert!(!bubble.on_escape(ctx)));
    }

    #[test]
    fn test_update_width_ignores_other_elements() {
        let mut fx = shown(BubbleTarget::segment(SEGMENT_A, 0));
        let renders = fx.host.renders.len();
        fx.run(|bubble, ctx| bubble.update_width_in_contents(ctx, 999, 20.0));
        assert_eq!(fx.host.renders.len(), renders);
        assert_eq!(fx.bubble.contents().unwrap().width.as_ref().unwrap().display, "6'");
    }

    #[test]
    fn test_update_height_ignores_other_side() {
        let mut fx = shown(BubbleTarget::building(LEFT_BUILDING, BuildingSide::Left));
        fx.store.street.right_building.height = 9;
        let renders = fx.host.renders.len();
        fx.run(|bubble, ctx| bubble.update_height_in_contents(ctx, false));
        assert_eq!(fx.host.renders.len(), renders);
    }
}
