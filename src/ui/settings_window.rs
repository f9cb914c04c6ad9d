//! Bubble settings window
//!
//! Edits a draft copy of the bubble configuration. While the window is open
//! the host reports a visible menu, so the bubble stays closed.

use eframe::egui;

use crate::app::AppState;

/// Result of user interaction with the settings window
pub enum SettingsInteraction {
    Applied,
    Closed,
}

pub fn render_settings_window(ctx: &egui::Context, state: &mut AppState) -> Option<SettingsInteraction> {
    if !state.host.settings_open() {
        return None;
    }

    let mut interaction = None;
    let mut open = true;
    let draft = &mut state.settings_draft;

    egui::Window::new("Bubble settings")
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            egui::Grid::new("bubble_settings_grid").num_columns(2).striped(true).show(ui, |ui| {
                ui.label("Polygon debounce (ms)");
                ui.add(egui::DragValue::new(&mut draft.polygon_debounce_ms).range(0..=1000));
                ui.end_row();

                ui.label("Suppress cooldown (ms)");
                ui.add(egui::DragValue::new(&mut draft.suppress_cooldown_ms).range(0..=2000));
                ui.end_row();

                ui.label("Field commit delay (ms)");
                ui.add(egui::DragValue::new(&mut draft.field_commit_delay_ms).range(0..=2000));
                ui.end_row();

                ui.label("Bubble margin");
                ui.add(egui::DragValue::new(&mut draft.bubble_margin).range(0.0..=100.0));
                ui.end_row();

                ui.label("Pointer margin");
                ui.add(egui::DragValue::new(&mut draft.pointer_margin).range(0.0..=100.0));
                ui.end_row();

                ui.label("Width step");
                ui.add(egui::DragValue::new(&mut draft.width_click_increment).speed(0.25).range(0.25..=5.0));
                ui.end_row();

                ui.label("Max floors");
                ui.add(egui::DragValue::new(&mut draft.max_building_floors).range(1..=100));
                ui.end_row();
            });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Apply").clicked() {
                    interaction = Some(SettingsInteraction::Applied);
                }
                if ui.button("Reset to defaults").clicked() {
                    *draft = Default::default();
                }
            });
        });

    if !open {
        interaction = Some(SettingsInteraction::Closed);
    }
    interaction
}
