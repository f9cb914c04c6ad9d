//! Debounced numeric field protocol.
//!
//! The width field of a segment bubble and the height field of a building
//! bubble share one protocol: typing schedules a single deferred commit,
//! while blur, Enter and Escape commit immediately. Both go through
//! [`InfoBubble::commit`] with a clamp function per field.

use super::{BubbleContext, InfoBubble};
use crate::config::BubbleConfig;
use crate::domain::contents::BubbleContents;
use crate::model::ModelRef;
use crate::state::{CommitPolicy, EditSession, FieldKind, FieldWrite, PendingCommit, TimerHandle, TimerPurpose};
use crate::units::{self, UnitSystem};

/// Keys with a meaning inside a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    Enter,
    Escape,
}

/// Turns raw field text into a valid model value. Never fails.
pub type ClampFn = fn(&str, &BubbleConfig) -> f64;

/// Width text to feet. Unreadable text gives the minimum width.
pub fn clamp_width_text(text: &str, config: &BubbleConfig) -> f64 {
    match units::process_width_input(text, config.units) {
        Some(width) => config.clamp_width(width),
        None => config.min_segment_width,
    }
}

/// Height text to floors, reading leading digits only ("3 floors" is 3).
/// Unreadable text gives one floor.
pub fn clamp_height_text(text: &str, config: &BubbleConfig) -> f64 {
    let digits: String = text.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    let floors = if digits.is_empty() {
        1
    } else {
        digits.parse::<i64>().unwrap_or(i64::MAX)
    };
    config.clamp_floors(floors) as f64
}

fn clamp_for(field: FieldKind) -> ClampFn {
    match field {
        FieldKind::Width => clamp_width_text,
        FieldKind::Height => clamp_height_text,
    }
}

/// Text shown while a field has focus.
fn edit_text(field: FieldKind, value: f64, units: UnitSystem) -> String {
    match field {
        FieldKind::Width => units::undecorate_width(value, units),
        FieldKind::Height => format!("{}", value as u32),
    }
}

impl InfoBubble {
    // ===== Pointer and focus =====

    pub fn on_field_pointer_down(&mut self, field: FieldKind) {
        let Some(session) = self.fields.session_mut(field) else {
            return;
        };
        if !session.is_focused() {
            session.select_all();
        }
        self.fields.set_held(true);
    }

    /// Hovering a field focuses it unless another field is held.
    pub fn on_field_pointer_over(&mut self, field: FieldKind) {
        if self.fields.is_held() {
            return;
        }
        self.on_field_focus(field);
        if let Some(session) = self.fields.session_mut(field) {
            session.select_all();
        }
    }

    pub fn on_field_pointer_out(&mut self, ctx: &mut BubbleContext, field: FieldKind) {
        if self.fields.is_held() {
            return;
        }
        let focused = self.fields.session().is_some_and(|session| session.field() == field && session.is_focused());
        if focused {
            self.on_field_blur(ctx, field);
        }
    }

    pub fn on_field_focus(&mut self, field: FieldKind) {
        let units = self.config.units;
        let Some(session) = self.fields.session_mut(field) else {
            return;
        };
        if !session.is_focused() {
            let text = edit_text(field, session.committed_value(), units);
            session.focus(text);
        }
    }

    pub fn on_field_blur(&mut self, ctx: &mut BubbleContext, field: FieldKind) {
        if self.fields.session_mut(field).is_none() {
            return;
        }
        self.commit(ctx, field, CommitPolicy::Immediate, clamp_for(field));
        if let Some(session) = self.fields.session_mut(field) {
            session.blur();
        }
        self.fields.set_held(false);
    }

    // ===== Typing =====

    /// New raw text from the field; committed after the field-commit delay.
    pub fn on_field_input(&mut self, ctx: &mut BubbleContext, field: FieldKind, text: &str) {
        let Some(session) = self.fields.session_mut(field) else {
            return;
        };
        session.set_raw_text(text);
        self.commit(ctx, field, CommitPolicy::Deferred, clamp_for(field));
    }

    pub fn on_field_key(&mut self, ctx: &mut BubbleContext, field: FieldKind, key: FieldKey) {
        let units = self.config.units;
        match key {
            FieldKey::Enter => {
                self.commit(ctx, field, CommitPolicy::Immediate, clamp_for(field));
                // Drop focus, then take it again on the canonical value
                if let Some(session) = self.fields.session_mut(field) {
                    session.blur();
                    let text = match field {
                        FieldKind::Width => edit_text(field, session.committed_value(), units),
                        FieldKind::Height => session.display().to_string(),
                    };
                    session.focus(text);
                    session.select_all();
                }
            }
            FieldKey::Escape => {
                let Some(session) = self.fields.session_mut(field) else {
                    return;
                };
                let restored = edit_text(field, session.old_value(), units);
                session.set_raw_text(&restored);
                self.commit(ctx, field, CommitPolicy::Immediate, clamp_for(field));
                ctx.host.hide_all_menus();
                if let Some(session) = self.fields.session_mut(field) {
                    session.blur();
                }
                self.fields.set_held(false);
            }
        }
    }

    // ===== Commit =====

    /// Clamps the field's raw text and writes it according to `policy`.
    ///
    /// Deferred commits replace the single pending one and restart the
    /// field-commit timer. Immediate commits cancel it and write right away.
    fn commit(&mut self, ctx: &mut BubbleContext, field: FieldKind, policy: CommitPolicy, clamp: ClampFn) {
        let Some(session) = self.fields.session_mut(field) else {
            return;
        };
        let value = clamp(session.raw_text(), &self.config);
        let Some(model) = self.visibility.committed().map(|target| target.model) else {
            return;
        };
        let write = FieldWrite { field, model, value };

        match policy {
            CommitPolicy::Deferred => {
                let timer = self.timers.schedule(TimerPurpose::FieldCommit, ctx.now, self.config.field_commit_delay());
                self.fields.set_pending(PendingCommit { write, timer });
            }
            CommitPolicy::Immediate => {
                self.timers.cancel(TimerPurpose::FieldCommit);
                self.fields.take_pending();
                self.write_field(ctx, write);
            }
        }
    }

    /// Writes the pending value if `fired` is the timer it was scheduled with.
    pub(super) fn apply_pending_commit(&mut self, ctx: &mut BubbleContext, fired: TimerHandle) {
        match self.fields.take_pending() {
            Some(pending) if pending.timer == fired => self.write_field(ctx, pending.write),
            Some(pending) => {
                log::debug!("Field commit timer {:?} is stale, keeping {:?}", fired, pending.timer);
                self.fields.set_pending(pending);
            }
            None => {}
        }
    }

    fn write_field(&mut self, ctx: &mut BubbleContext, commit: FieldWrite) {
        match (commit.field, commit.model) {
            (FieldKind::Width, ModelRef::Segment(index)) => {
                log::debug!("Committing width {} to segment {}", commit.value, index);
                ctx.store.set_segment_width(index, commit.value);
                if let Some(element) = self.visibility.committed().and_then(|target| target.element) {
                    self.update_width_in_contents(ctx, element, commit.value);
                }
            }
            (FieldKind::Height, ModelRef::Building(side)) => {
                log::debug!("Committing height {} to {:?} building", commit.value, side);
                ctx.store.set_building_height(side, commit.value as u32);
                self.update_height_in_contents(ctx, side.is_left());
            }
            (field, model) => log::warn!("Field {:?} cannot be written to {:?}", field, model),
        }
    }

    /// Starts a fresh session for the editable field of new contents.
    /// Cancels any commit still pending for the previous contents.
    pub(super) fn attach_fields(&mut self, contents: &BubbleContents) {
        if self.timers.cancel(TimerPurpose::FieldCommit) {
            log::debug!("Pending field commit dropped by contents rebuild");
        }
        let field = FieldKind::for_bubble(contents.kind);
        let stepper = match field {
            FieldKind::Width => contents.width.as_ref(),
            FieldKind::Height => contents.height.as_ref(),
        };
        let session = stepper
            .filter(|stepper| stepper.editable)
            .map(|stepper| EditSession::new(field, stepper.value, stepper.display.clone()));
        self.fields.attach(session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bubble::mock::{Fixture, LEFT_BUILDING, SEGMENT_A};
    use crate::model::{BubbleTarget, BuildingSide};
    use egui::pos2;

    fn narrow_config() -> BubbleConfig {
        BubbleConfig { min_segment_width: 2.0, max_segment_width: 36.0, ..Default::default() }
    }

    fn shown_segment() -> Fixture {
        let mut fx = Fixture::with_config(narrow_config());
        fx.run(|bubble, ctx| bubble.consider_showing(ctx, BubbleTarget::segment(SEGMENT_A, 0), Some(pos2(460.0, 500.0))));
        fx
    }

    #[test]
    fn test_clamp_width_text() {
        let config = narrow_config();
        assert_eq!(clamp_width_text("1", &config), 2.0);
        assert_eq!(clamp_width_text("-5", &config), 2.0);
        assert_eq!(clamp_width_text("abc", &config), 2.0);
        assert_eq!(clamp_width_text("500", &config), 36.0);
        assert_eq!(clamp_width_text("10.6", &config), 10.5);
    }

    #[test]
    fn test_clamp_height_text() {
        let config = BubbleConfig::default();
        assert_eq!(clamp_height_text("7", &config), 7.0);
        assert_eq!(clamp_height_text("3 floors", &config), 3.0);
        assert_eq!(clamp_height_text("", &config), 1.0);
        assert_eq!(clamp_height_text("0", &config), 1.0);
        assert_eq!(clamp_height_text("99", &config), 20.0);
        assert_eq!(clamp_height_text("99999999999999999999999", &config), 20.0);
    }

    #[test]
    fn test_typed_width_below_minimum_commits_minimum() {
        let mut fx = shown_segment();
        fx.run(|bubble, ctx| {
            bubble.on_field_focus(FieldKind::Width);
            bubble.on_field_input(ctx, FieldKind::Width, "1");
            bubble.on_field_blur(ctx, FieldKind::Width);
        });

        assert_eq!(fx.store.width_writes, vec![(0, 2.0)]);
        assert_eq!(fx.store.street.segments[0].width, 2.0);
        let session = fx.bubble.edit_session().unwrap();
        assert_eq!(session.raw_text(), "2'");
        assert_eq!(fx.bubble.contents().unwrap().width.as_ref().unwrap().display, "2'");
        assert!(!fx.bubble.is_field_held());
    }

    #[test]
    fn test_inverted_width_bounds_commit_without_panicking() {
        let config =
            BubbleConfig::from_json_str(r#"{ "min_segment_width": 40, "max_segment_width": 36 }"#).unwrap();
        let mut fx = Fixture::with_config(config);
        fx.run(|bubble, ctx| bubble.consider_showing(ctx, BubbleTarget::segment(SEGMENT_A, 0), Some(pos2(460.0, 500.0))));
        assert!(fx.bubble.is_visible());
        fx.run(|bubble, ctx| {
            bubble.on_field_focus(FieldKind::Width);
            bubble.on_field_input(ctx, FieldKind::Width, "1");
            bubble.on_field_blur(ctx, FieldKind::Width);
            bubble.step_width(ctx, true, false);
        });
        assert_eq!(fx.store.width_writes, vec![(0, 36.0), (0, 36.5)]);

        // Bounds that bypass JSON loading are repaired by the engine as well.
        let raw = BubbleConfig { min_segment_width: 40.0, max_segment_width: 36.0, ..Default::default() };
        let mut fx = Fixture::with_config(raw);
        assert_eq!(fx.bubble.config().min_segment_width, 36.0);
        fx.run(|bubble, ctx| bubble.consider_showing(ctx, BubbleTarget::segment(SEGMENT_A, 0), Some(pos2(460.0, 500.0))));
        fx.run(|bubble, ctx| {
            bubble.on_field_focus(FieldKind::Width);
            bubble.on_field_input(ctx, FieldKind::Width, "100");
            bubble.on_field_key(ctx, FieldKind::Width, FieldKey::Enter);
        });
        assert_eq!(fx.store.width_writes, vec![(0, 40.0)]);
    }

    #[test]
    fn test_rapid_input_collapses_into_one_write() {
        let mut fx = shown_segment();
        fx.run(|bubble, _| bubble.on_field_focus(FieldKind::Width));
        for text in ["8", "9", "10"] {
            fx.run(|bubble, ctx| bubble.on_field_input(ctx, FieldKind::Width, text));
            fx.advance(50);
        }
        assert!(fx.store.width_writes.is_empty());

        fx.run(|bubble, ctx| bubble.on_field_blur(ctx, FieldKind::Width));
        fx.advance(1000);
        assert_eq!(fx.store.width_writes, vec![(0, 10.0)]);
    }

    #[test]
    fn test_superseded_commit_timer_does_not_write() {
        let mut fx = shown_segment();
        fx.run(|bubble, ctx| {
            bubble.on_field_focus(FieldKind::Width);
            bubble.on_field_input(ctx, FieldKind::Width, "8");
        });
        let first = fx.bubble.fields.take_pending().unwrap();
        fx.bubble.fields.set_pending(first);

        fx.advance(100);
        fx.run(|bubble, ctx| {
            bubble.on_field_input(ctx, FieldKind::Width, "9");
            bubble.apply_pending_commit(ctx, first.timer);
        });
        assert!(fx.store.width_writes.is_empty());

        fx.advance(200);
        assert_eq!(fx.store.width_writes, vec![(0, 9.0)]);
    }

    #[test]
    fn test_deferred_commit_fires_after_delay() {
        let mut fx = shown_segment();
        fx.run(|bubble, ctx| {
            bubble.on_field_focus(FieldKind::Width);
            bubble.on_field_input(ctx, FieldKind::Width, "8");
        });
        fx.advance(199);
        assert!(fx.store.width_writes.is_empty());
        fx.advance(1);
        assert_eq!(fx.store.width_writes, vec![(0, 8.0)]);

        // Typed text stays while the field has focus.
        assert_eq!(fx.bubble.edit_session().unwrap().raw_text(), "8");
        assert_eq!(fx.bubble.contents().unwrap().width.as_ref().unwrap().display, "8'");
    }

    #[test]
    fn test_escape_restores_old_value() {
        let mut fx = shown_segment();
        fx.run(|bubble, ctx| {
            bubble.on_field_focus(FieldKind::Width);
            bubble.on_field_input(ctx, FieldKind::Width, "12");
            bubble.on_field_key(ctx, FieldKind::Width, FieldKey::Escape);
        });
        fx.advance(1000);

        assert_eq!(fx.store.width_writes, vec![(0, 6.0)]);
        assert_eq!(fx.host.menus_hidden, 1);
        let session = fx.bubble.edit_session().unwrap();
        assert!(!session.is_focused());
        assert_eq!(session.raw_text(), "6'");
    }

    #[test]
    fn test_enter_commits_and_refocuses() {
        let mut fx = shown_segment();
        fx.run(|bubble, ctx| {
            bubble.on_field_focus(FieldKind::Width);
            bubble.on_field_input(ctx, FieldKind::Width, "7.5");
            bubble.on_field_key(ctx, FieldKind::Width, FieldKey::Enter);
        });

        assert_eq!(fx.store.width_writes, vec![(0, 7.5)]);
        let session = fx.bubble.edit_session().unwrap();
        assert!(session.is_focused());
        assert!(session.is_selected());
        assert_eq!(session.raw_text(), "7.5");
        assert_eq!(session.old_value(), 7.5);
    }

    #[test]
    fn test_hide_cancels_pending_commit() {
        let mut fx = shown_segment();
        fx.run(|bubble, ctx| {
            bubble.on_field_focus(FieldKind::Width);
            bubble.on_field_input(ctx, FieldKind::Width, "9");
            bubble.hide(ctx);
        });
        fx.advance(1000);
        assert!(fx.store.width_writes.is_empty());
        assert!(fx.bubble.edit_session().is_none());
    }

    #[test]
    fn test_held_field_keeps_focus_on_pointer_out() {
        let mut fx = shown_segment();
        fx.run(|bubble, ctx| {
            bubble.on_field_pointer_over(FieldKind::Width);
            bubble.on_field_pointer_down(FieldKind::Width);
            bubble.on_field_pointer_out(ctx, FieldKind::Width);
        });
        assert!(fx.bubble.is_field_held());
        assert!(fx.bubble.edit_session().unwrap().is_focused());
        assert!(fx.store.width_writes.is_empty());
    }

    #[test]
    fn test_hover_focus_without_hold() {
        let mut fx = shown_segment();
        fx.run(|bubble, _| bubble.on_field_pointer_over(FieldKind::Width));
        let session = fx.bubble.edit_session().unwrap();
        assert!(session.is_focused() && session.is_selected());
        assert_eq!(session.raw_text(), "6");

        fx.run(|bubble, ctx| bubble.on_field_pointer_out(ctx, FieldKind::Width));
        assert!(!fx.bubble.edit_session().unwrap().is_focused());
        assert_eq!(fx.store.width_writes, vec![(0, 6.0)]);
    }

    #[test]
    fn test_height_field() {
        let mut fx = Fixture::new();
        fx.run(|bubble, ctx| {
            bubble.consider_showing(ctx, BubbleTarget::building(LEFT_BUILDING, BuildingSide::Left), None)
        });
        fx.run(|bubble, ctx| {
            bubble.on_field_focus(FieldKind::Height);
            assert_eq!(bubble.edit_session().unwrap().raw_text(), "4");
            bubble.on_field_input(ctx, FieldKind::Height, "abc");
            bubble.on_field_blur(ctx, FieldKind::Height);
        });
        assert_eq!(fx.store.height_writes, vec![(BuildingSide::Left, 1)]);
        assert_eq!(fx.bubble.edit_session().unwrap().raw_text(), "1 floor (16')");

        fx.run(|bubble, ctx| {
            bubble.on_field_focus(FieldKind::Height);
            bubble.on_field_input(ctx, FieldKind::Height, "99");
        });
        fx.advance(200);
        assert_eq!(fx.store.street.left_building.height, 20);
    }

    #[test]
    fn test_enter_on_height_redisplays_decorated_floors() {
        let mut fx = Fixture::new();
        fx.run(|bubble, ctx| {
            bubble.consider_showing(ctx, BubbleTarget::building(LEFT_BUILDING, BuildingSide::Left), None)
        });
        fx.run(|bubble, ctx| {
            bubble.on_field_focus(FieldKind::Height);
            bubble.on_field_input(ctx, FieldKind::Height, "3");
            bubble.on_field_key(ctx, FieldKind::Height, FieldKey::Enter);
        });

        assert_eq!(fx.store.height_writes, vec![(BuildingSide::Left, 3)]);
        let session = fx.bubble.edit_session().unwrap();
        assert!(session.is_focused() && session.is_selected());
        assert_eq!(session.raw_text(), "3 floors (36')");
        assert_eq!(session.old_value(), 3.0);
    }

    #[test]
    fn test_wrong_field_is_ignored() {
        let mut fx = shown_segment();
        fx.run(|bubble, ctx| {
            bubble.on_field_focus(FieldKind::Height);
            bubble.on_field_input(ctx, FieldKind::Height, "3");
        });
        fx.advance(1000);
        assert!(fx.store.height_writes.is_empty());
        assert!(!fx.bubble.edit_session().unwrap().is_focused());
    }
}
