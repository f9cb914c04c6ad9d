//! Info bubble rendering
//!
//! Draws the bubble contents at the rectangle the engine positioned and turns
//! clicks, typing and focus changes into [`BubbleAction`]s. The engine owns
//! every piece of state; this panel only reflects it.

use eframe::egui;
use egui::{Color32, Id, RichText, Stroke};
use streetbubble::{catalog, BubbleContents, EditSession, FieldKey, FieldKind, StepperState};

use crate::app::AppState;

const FIELD_ID: &str = "bubble_numeric_field";
const FIELD_HOVER_KEY: &str = "bubble_numeric_field_hovered";
const FRAME_MARGIN: f32 = 8.0;

/// Events of the numeric field, in the engine's vocabulary
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    PointerDown,
    PointerOver,
    PointerOut,
    Focus,
    Blur,
    Input(String),
    Key(FieldKey),
}

/// Result of user interaction with the bubble
#[derive(Debug, Clone, PartialEq)]
pub enum BubbleAction {
    StepWidth { increment: bool, precise: bool },
    StepHeight { increment: bool },
    ChooseSegmentVariant { variant_type: &'static str, choice: &'static str },
    ChooseBuildingVariant(&'static str),
    Remove { all: bool },
    ShowDescription,
    HideDescription,
    Field(FieldKind, FieldEvent),
}

#[derive(Debug, Default)]
pub struct BubbleOutput {
    pub actions: Vec<BubbleAction>,
    /// Escape was handled by the numeric field
    pub escape_consumed: bool,
    /// Size the contents actually took this frame, frame margins included
    pub measured_size: Option<egui::Vec2>,
}

/// Renders the bubble if it is visible.
pub fn render_bubble(ctx: &egui::Context, state: &AppState) -> BubbleOutput {
    let mut output = BubbleOutput::default();
    let (Some(contents), Some(rect)) = (state.bubble.contents(), state.bubble.bubble_rect()) else {
        return output;
    };
    let session = state.bubble.edit_session();
    let shift = ctx.input(|i| i.modifiers.shift);

    egui::Area::new(Id::new("info_bubble"))
        .fixed_pos(rect.min)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .inner_margin(FRAME_MARGIN)
                .show(ui, |ui| {
                    ui.set_width(rect.width() - 2.0 * FRAME_MARGIN);
                    ui.set_min_height(rect.height() - 2.0 * FRAME_MARGIN);
                    let laid_out = ui.vertical(|ui| render_contents(ui, contents, session, shift, &mut output));
                    let height = laid_out.response.rect.height() + 2.0 * FRAME_MARGIN;
                    output.measured_size = Some(egui::vec2(rect.width(), height));
                });
        });

    output
}

fn render_contents(
    ui: &mut egui::Ui,
    contents: &BubbleContents,
    session: Option<&EditSession>,
    shift: bool,
    output: &mut BubbleOutput,
) {
    ui.horizontal(|ui| {
        ui.heading(&contents.title);
        if contents.removable {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let remove = ui.button("🗑").on_hover_text("Remove (shift: remove all segments)");
                if remove.clicked() {
                    output.actions.push(BubbleAction::Remove { all: shift });
                }
            });
        }
    });

    if let Some(stepper) = &contents.width {
        render_stepper(ui, stepper, FieldKind::Width, session, shift, output);
    }
    if let Some(stepper) = &contents.height {
        render_stepper(ui, stepper, FieldKind::Height, session, shift, output);
    }

    for row in &contents.variants {
        ui.horizontal(|ui| {
            for choice in &row.choices {
                let mut text = RichText::new(choice.icon.title);
                if let Some(color) = choice.icon.color.and_then(|hex| Color32::from_hex(hex).ok()) {
                    text = text.color(color);
                }
                if ui.selectable_label(choice.selected, text).clicked() && !choice.selected {
                    output.actions.push(if row.variant_type == catalog::BUILDING_VARIANT_TYPE {
                        BubbleAction::ChooseBuildingVariant(choice.choice)
                    } else {
                        BubbleAction::ChooseSegmentVariant { variant_type: row.variant_type, choice: choice.choice }
                    });
                }
            }
        });
    }

    for warning in &contents.warnings {
        ui.colored_label(Color32::from_rgb(0xe0, 0x8a, 0x00), format!("⚠ {}", warning.message()));
    }

    if let Some(description) = contents.description {
        if contents.description_open {
            egui::ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                ui.label(description);
            });
            if ui.link("Close").clicked() {
                output.actions.push(BubbleAction::HideDescription);
            }
        } else if ui.link("Learn more").clicked() {
            output.actions.push(BubbleAction::ShowDescription);
        }
    }
}

fn render_stepper(
    ui: &mut egui::Ui,
    stepper: &StepperState,
    field: FieldKind,
    session: Option<&EditSession>,
    shift: bool,
    output: &mut BubbleOutput,
) {
    let step = |increment: bool| match field {
        FieldKind::Width => BubbleAction::StepWidth { increment, precise: shift },
        FieldKind::Height => BubbleAction::StepHeight { increment },
    };

    ui.horizontal(|ui| {
        if ui.add_enabled(stepper.decrement_enabled, egui::Button::new("–")).clicked() {
            output.actions.push(step(false));
        }
        match session.filter(|session| session.field() == field && stepper.editable) {
            Some(session) => render_field(ui, session, output),
            None => {
                ui.label(&stepper.display);
            }
        }
        if ui.add_enabled(stepper.increment_enabled, egui::Button::new("+")).clicked() {
            output.actions.push(step(true));
        }
    });
}

/// The numeric field; egui focus follows the session's focus.
fn render_field(ui: &mut egui::Ui, session: &EditSession, output: &mut BubbleOutput) {
    let mut events = Vec::new();

    let mut text = session.raw_text().to_string();
    let edit = egui::TextEdit::singleline(&mut text)
        .id(Id::new(FIELD_ID))
        .desired_width(100.0);
    let response = ui.add(edit);

    let hover_id = Id::new(FIELD_HOVER_KEY);
    let was_hovered = ui.ctx().data(|d| d.get_temp::<bool>(hover_id)).unwrap_or(false);
    let hovered = response.hovered();
    ui.ctx().data_mut(|d| d.insert_temp(hover_id, hovered));
    if hovered && !was_hovered {
        events.push(FieldEvent::PointerOver);
    } else if !hovered && was_hovered {
        events.push(FieldEvent::PointerOut);
    }

    if response.contains_pointer() && ui.input(|i| i.pointer.primary_pressed()) {
        events.push(FieldEvent::PointerDown);
    }
    if response.gained_focus() {
        events.push(FieldEvent::Focus);
    }
    if response.changed() {
        events.push(FieldEvent::Input(text));
    }

    if response.lost_focus() {
        let (enter, escape) = ui.input(|i| (i.key_pressed(egui::Key::Enter), i.key_pressed(egui::Key::Escape)));
        if enter {
            events.push(FieldEvent::Key(FieldKey::Enter));
        } else if escape {
            events.push(FieldEvent::Key(FieldKey::Escape));
            output.escape_consumed = true;
        } else if session.is_focused() {
            events.push(FieldEvent::Blur);
        }
    } else if session.is_focused() && !response.has_focus() {
        response.request_focus();
    } else if !session.is_focused() && response.has_focus() {
        response.surrender_focus();
    }

    let field = session.field();
    output.actions.extend(events.into_iter().map(|event| BubbleAction::Field(field, event)));
}

/// Outlines the hover polygon above everything else.
pub fn render_polygon_overlay(ctx: &egui::Context, state: &AppState) {
    let Some(polygon) = state.bubble.hover_polygon() else {
        return;
    };
    let painter = ctx.layer_painter(egui::LayerId::new(egui::Order::Tooltip, Id::new("hover_polygon_overlay")));
    painter.add(egui::Shape::closed_line(
        polygon.points().to_vec(),
        Stroke::new(1.5, Color32::from_rgb(0xff, 0x40, 0xa0)),
    ));
}
