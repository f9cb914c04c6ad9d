//! Editor-level coordination and workflow management.
//!
//! Turns panel interactions into bubble engine calls and handles street
//! loading. Every call receives the frame time so the engine's timers share
//! one clock.

use std::path::PathBuf;
use std::time::Duration;

use streetbubble::{BubbleConfig, Street, UnitSystem};

use crate::app::{AppState, PointerState, StreetSource};
use crate::ui::bubble_panel::{BubbleAction, FieldEvent};
use crate::ui::settings_window::SettingsInteraction;
use crate::ui::street_panel::StreetPointer;

/// Coordinates editor operations.
pub struct EditorCoordinator;

impl EditorCoordinator {
    // ===== Streets =====

    /// Loads a street file, keeping the current street on failure.
    pub fn open_file(state: &mut AppState, path: PathBuf, now: Duration) {
        match Street::from_json_file(&path) {
            Ok(street) => state.replace_street(street, StreetSource::File(path), now),
            Err(e) => {
                log::error!("{:#}", e);
                state.error_message = Some(format!("Error loading street: {:#}", e));
            }
        }
    }

    /// Replaces the street with a generated one; seeds advance on every call.
    pub fn open_random_street(state: &mut AppState, now: Duration) {
        let seed = state.next_seed;
        state.next_seed += 1;
        log::info!("Generating random street with seed {}", seed);
        state.replace_street(Street::random(seed), StreetSource::Random(seed), now);
    }

    pub fn open_default_street(state: &mut AppState, now: Duration) {
        match Street::default_street() {
            Ok(street) => state.replace_street(street, StreetSource::Default, now),
            Err(e) => state.error_message = Some(format!("Error loading default street: {:#}", e)),
        }
    }

    // ===== Settings =====

    pub fn change_units(state: &mut AppState, units: UnitSystem, now: Duration) {
        let mut config = state.bubble.config().clone();
        config.units = units;
        state.settings_draft.units = units;
        Self::apply_config(state, config, now);
    }

    /// Installs a new configuration and refreshes a visible bubble.
    pub fn apply_config(state: &mut AppState, config: BubbleConfig, now: Duration) {
        log::debug!("Applying bubble configuration {:?}", config);
        state.bubble.set_config(config);
        state.with_bubble(now, |bubble, ctx| bubble.update_contents(ctx));
    }

    /// Opening the settings window behaves like opening a menu.
    pub fn toggle_settings(state: &mut AppState, open: bool, now: Duration) {
        if open {
            state.settings_draft = state.bubble.config().clone();
            state.with_bubble(now, |bubble, ctx| bubble.hide(ctx));
        }
        state.host.set_settings_open(open);
    }

    pub fn handle_settings(state: &mut AppState, interaction: SettingsInteraction, now: Duration) {
        if let SettingsInteraction::Applied = interaction {
            let config = state.settings_draft.clone();
            Self::apply_config(state, config, now);
        }
        state.host.set_settings_open(false);
    }

    // ===== Pointer =====

    /// Feeds one frame of pointer state to the bubble.
    ///
    /// Element enter/leave are derived by comparing with the previous frame,
    /// leave before enter. Scrolling the street suppresses the bubble.
    pub fn handle_street_pointer(state: &mut AppState, report: StreetPointer, now: Duration) {
        let previous = state.pointer;

        if previous.hovered != report.hovered {
            state.with_bubble(now, |bubble, ctx| {
                if previous.hovered.is_some() {
                    bubble.dont_consider_showing();
                }
                if let Some(target) = report.hovered {
                    bubble.consider_showing(ctx, target, report.position);
                }
            });
        }

        if report.scrolled {
            state.with_bubble(now, |bubble, ctx| bubble.suppress(ctx));
        }

        if let Some(position) = report.position {
            if previous.position != Some(position) {
                state.with_bubble(now, |bubble, ctx| bubble.on_pointer_move(ctx, position));
            }
        }

        let inside_bubble = match (report.position, state.bubble.bubble_rect()) {
            (Some(position), Some(rect)) => rect.contains(position),
            _ => false,
        };
        if inside_bubble != previous.inside_bubble {
            state.with_bubble(now, |bubble, ctx| {
                if inside_bubble {
                    bubble.on_bubble_pointer_enter(ctx);
                } else {
                    bubble.on_bubble_pointer_leave(ctx);
                }
            });
        }

        state.pointer = PointerState {
            hovered: report.hovered,
            position: report.position,
            inside_bubble,
        };
    }

    // ===== Bubble =====

    pub fn handle_bubble_action(state: &mut AppState, action: BubbleAction, now: Duration) {
        state.with_bubble(now, |bubble, ctx| match action {
            BubbleAction::StepWidth { increment, precise } => bubble.step_width(ctx, increment, precise),
            BubbleAction::StepHeight { increment } => bubble.step_height(ctx, increment),
            BubbleAction::ChooseSegmentVariant { variant_type, choice } => {
                bubble.choose_segment_variant(ctx, variant_type, choice)
            }
            BubbleAction::ChooseBuildingVariant(choice) => bubble.choose_building_variant(ctx, choice),
            BubbleAction::Remove { all } => bubble.remove_segment(ctx, all),
            BubbleAction::ShowDescription => bubble.show_description(ctx),
            BubbleAction::HideDescription => bubble.hide_description(ctx),
            BubbleAction::Field(field, event) => match event {
                FieldEvent::PointerDown => bubble.on_field_pointer_down(field),
                FieldEvent::PointerOver => bubble.on_field_pointer_over(field),
                FieldEvent::PointerOut => bubble.on_field_pointer_out(ctx, field),
                FieldEvent::Focus => bubble.on_field_focus(field),
                FieldEvent::Blur => bubble.on_field_blur(ctx, field),
                FieldEvent::Input(text) => bubble.on_field_input(ctx, field, &text),
                FieldEvent::Key(key) => bubble.on_field_key(ctx, field, key),
            },
        });
    }

    /// Feeds the size the bubble panel actually laid out back into the engine.
    pub fn handle_bubble_measured(state: &mut AppState, size: egui::Vec2, now: Duration) {
        let Some(contents) = state.bubble.contents().cloned() else {
            return;
        };
        log::debug!("Bubble measured at {:?}", size);
        state.host.record_measured_size(contents, size);
        state.with_bubble(now, |bubble, ctx| bubble.remeasure(ctx));
    }

    pub fn handle_escape(state: &mut AppState, now: Duration) {
        state.with_bubble(now, |bubble, ctx| {
            bubble.on_escape(ctx);
        });
    }

    pub fn handle_viewport_resize(state: &mut AppState, now: Duration) {
        state.with_bubble(now, |bubble, ctx| bubble.on_viewport_resize(ctx));
    }

    /// Fires due bubble timers.
    pub fn tick(state: &mut AppState, now: Duration) {
        state.with_bubble(now, |bubble, ctx| bubble.tick(ctx));
    }

    pub fn time_to_next_timer(state: &AppState, now: Duration) -> Option<Duration> {
        state.bubble.next_deadline().map(|deadline| deadline.saturating_sub(now))
    }
}
