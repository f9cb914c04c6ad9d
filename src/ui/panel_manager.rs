//! Panel orchestration and layout management.
//!
//! Lays out the header, status bar and street canvas, draws the bubble on top
//! and gathers every interaction for the editor coordinator.

use streetbubble::BubbleHost;

use crate::app::AppState;
use crate::ui::bubble_panel::{self, BubbleAction};
use crate::ui::header::{self, HeaderInteraction};
use crate::ui::settings_window::{self, SettingsInteraction};
use crate::ui::street_panel::{self, StreetPointer};
use crate::ui::status_bar;

/// Height difference, in points, below which a measured bubble is left alone
const MEASURE_TOLERANCE: f32 = 0.5;

/// Result of panel interactions that need to be handled by the editor coordinator.
pub enum PanelInteraction {
    Header(HeaderInteraction),
    Settings(SettingsInteraction),
    /// Pointer report from the street canvas, sent every frame
    Street(StreetPointer),
    Bubble(BubbleAction),
    /// The bubble laid out at a different size than the engine placed it
    BubbleMeasured(egui::Vec2),
    /// Escape pressed outside the numeric field
    EscapePressed,
    /// The window content area changed size
    ViewportResized(egui::Vec2),
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    pub fn render_all_panels(ctx: &egui::Context, state: &mut AppState) -> Vec<PanelInteraction> {
        let mut interactions = Vec::new();

        let viewport = ctx.content_rect().size();
        if viewport != state.host.viewport_size() {
            state.host.set_viewport_size(viewport);
            interactions.push(PanelInteraction::ViewportResized(viewport));
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(interaction) = header::render_header(ui, state) {
                interactions.push(PanelInteraction::Header(interaction));
            }
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state);
        });

        let street_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(0))
            .fill(ctx.style().visuals.extreme_bg_color);

        egui::CentralPanel::default()
            .frame(street_frame)
            .show(ctx, |ui| {
                let pointer = street_panel::render_street_panel(ui, state);
                interactions.push(PanelInteraction::Street(pointer));
            });

        let bubble = bubble_panel::render_bubble(ctx, state);
        interactions.extend(bubble.actions.into_iter().map(PanelInteraction::Bubble));
        if let (Some(measured), Some(rect)) = (bubble.measured_size, state.bubble.bubble_rect()) {
            if (measured.y - rect.height()).abs() > MEASURE_TOLERANCE {
                interactions.push(PanelInteraction::BubbleMeasured(measured));
            }
        }

        if state.show_polygon {
            bubble_panel::render_polygon_overlay(ctx, state);
        }

        if let Some(interaction) = settings_window::render_settings_window(ctx, state) {
            interactions.push(PanelInteraction::Settings(interaction));
        }

        if !bubble.escape_consumed && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            interactions.push(PanelInteraction::EscapePressed);
        }

        interactions
    }
}
