//! Header panel UI rendering
//!
//! Handles the top bar with street loading controls and editor toggles.

use eframe::egui;
use egui::Color32;
use std::path::PathBuf;
use streetbubble::UnitSystem;

use crate::app::AppState;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User picked a street file
    OpenFileRequested(PathBuf),
    /// User asked for a generated street
    RandomStreetRequested,
    /// User asked for the built-in street
    DefaultStreetRequested,
    /// User switched the unit system
    UnitsChanged(UnitSystem),
    /// User toggled the settings window
    SettingsToggled(bool),
}

/// Renders the application header
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        if ui.button("📁 Open Street").clicked() {
            let mut dialog = rfd::FileDialog::new().add_filter("Street Files", &["json"]);

            if let Ok(cwd) = std::env::current_dir() {
                dialog = dialog.set_directory(cwd);
            }

            if let Some(path) = dialog.pick_file() {
                interaction = Some(HeaderInteraction::OpenFileRequested(path));
            }
        }

        if ui.button("🎲 Random Street").clicked() {
            interaction = Some(HeaderInteraction::RandomStreetRequested);
        }

        if ui.button("↺ Default Street").clicked() {
            interaction = Some(HeaderInteraction::DefaultStreetRequested);
        }

        ui.separator();

        let mut read_only = state.host.read_only();
        if ui.checkbox(&mut read_only, "🔒 Read only").changed() {
            state.host.set_read_only(read_only);
        }

        ui.checkbox(&mut state.show_polygon, "⬠ Hover polygon")
            .on_hover_text("Outline the area in which the bubble stays open");

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let settings_open = state.host.settings_open();
            if ui.selectable_label(settings_open, "⚙ Settings").clicked() {
                interaction = Some(HeaderInteraction::SettingsToggled(!settings_open));
            }

            let old_units = state.bubble.config().units;
            let mut units = old_units;
            egui::ComboBox::from_id_salt("units_selector")
                .selected_text(units_label(units))
                .show_ui(ui, |ui| {
                    for option in [UnitSystem::Imperial, UnitSystem::Metric] {
                        ui.selectable_value(&mut units, option, units_label(option));
                    }
                });
            if units != old_units {
                interaction = Some(HeaderInteraction::UnitsChanged(units));
            }

            ui.label("Units:");
        });
    });

    if let Some(err) = &state.error_message {
        ui.colored_label(Color32::RED, err);
    }

    interaction
}

fn units_label(units: UnitSystem) -> &'static str {
    match units {
        UnitSystem::Imperial => "Imperial",
        UnitSystem::Metric => "Metric",
    }
}
