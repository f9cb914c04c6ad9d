//! Status bar UI rendering
//!
//! Shows the street's dimensions and what the bubble is doing.

use eframe::egui;
use egui::RichText;
use streetbubble::{units, BubbleKind, BubblePhase};

use crate::app::{AppState, StreetSource};

pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState) {
    let units = state.bubble.config().units;

    ui.horizontal(|ui| {
        let source = match &state.source {
            StreetSource::Default => "Default street".to_string(),
            StreetSource::File(path) => path.display().to_string(),
            StreetSource::Random(seed) => format!("Random street | Seed: {}", seed),
        };
        ui.label(RichText::new(source).strong());
        ui.label(RichText::new("|").strong());

        let occupied = state.street.occupied_width();
        let remaining = state.street.width - occupied;
        let room = if remaining < 0.0 {
            format!("{} over", units::prettify_width(-remaining, units))
        } else {
            format!("{} left", units::prettify_width(remaining, units))
        };
        ui.label(RichText::new(format!(
            "Width: {} | Segments: {} | {}",
            units::prettify_width(state.street.width, units),
            state.street.segments.len(),
            room
        )).strong());
        ui.label(RichText::new("|").strong());

        let bubble = match (state.bubble.phase(), state.bubble.target()) {
            (BubblePhase::Visible, Some(target)) => match (target.kind, target.segment_index()) {
                (BubbleKind::Segment, Some(index)) => format!("Bubble: segment {}", index + 1),
                (BubbleKind::LeftBuilding, _) => "Bubble: left building".to_string(),
                (BubbleKind::RightBuilding, _) => "Bubble: right building".to_string(),
                _ => "Bubble: visible".to_string(),
            },
            (BubblePhase::Suppressed, _) => "Bubble: suppressed".to_string(),
            _ => "Bubble: hidden".to_string(),
        };
        let mut bubble_text = RichText::new(bubble).strong();
        if state.bubble.is_field_held() {
            bubble_text = bubble_text.color(egui::Color32::YELLOW);
        }
        ui.label(bubble_text);
    });
}
