//! Street canvas rendering
//!
//! Draws the street to scale between its two buildings, publishes the page
//! rectangle of every element to the host and reports what the pointer is over.

use eframe::egui;
use egui::{pos2, vec2, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke};
use streetbubble::{
    catalog, units, BubbleHost, BubbleTarget, BuildingSide, DragMode, ElementId, Street, StreetStore, WarningKind,
};

use crate::app::AppState;

/// Horizontal scale of segments
pub const PIXELS_PER_FOOT: f32 = 12.0;
/// Vertical scale of buildings
const BUILDING_PIXELS_PER_FOOT: f32 = 4.0;
pub const BUILDING_WIDTH: f32 = 240.0;
const STREET_TOP: f32 = 200.0;
const SEGMENT_HEIGHT: f32 = 300.0;
/// Lots without a building still get a strip to hover
const MIN_BUILDING_HEIGHT: f32 = 24.0;
const HANDLE_SIZE: Rect = Rect::from_min_max(pos2(-4.0, -16.0), pos2(4.0, 16.0));

pub const LEFT_BUILDING_ID: ElementId = 1;
pub const RIGHT_BUILDING_ID: ElementId = 2;
const SEGMENT_ID_BASE: ElementId = 100;

/// One laid-out element in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementLayout {
    pub element: ElementId,
    pub target: BubbleTarget,
    pub rect: Rect,
}

/// What the pointer did over the canvas this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreetPointer {
    pub position: Option<Pos2>,
    pub hovered: Option<BubbleTarget>,
    /// Horizontal scroll changed this frame
    pub scrolled: bool,
}

pub fn segment_element(index: usize) -> ElementId {
    SEGMENT_ID_BASE + index as ElementId
}

/// Total page width of a street with its buildings.
pub fn content_width(street: &Street) -> f32 {
    2.0 * BUILDING_WIDTH + street.width as f32 * PIXELS_PER_FOOT
}

/// Lays out buildings and segments starting at `origin` (page coordinates).
pub fn layout_street(street: &Street, origin: Pos2) -> Vec<ElementLayout> {
    let ground = origin.y + STREET_TOP + SEGMENT_HEIGHT;
    let street_left = origin.x + BUILDING_WIDTH;
    let street_right = street_left + street.width as f32 * PIXELS_PER_FOOT;

    let building_rect = |side: BuildingSide, left: f32| {
        let variant = street.building_variant(side);
        let floors = street.building_height(side);
        let height = catalog::building_variant(&variant)
            .map(|v| v.real_height(floors) as f32 * BUILDING_PIXELS_PER_FOOT)
            .unwrap_or(SEGMENT_HEIGHT)
            .clamp(MIN_BUILDING_HEIGHT, ground - origin.y);
        Rect::from_min_max(pos2(left, ground - height), pos2(left + BUILDING_WIDTH, ground))
    };

    let mut layout = vec![ElementLayout {
        element: LEFT_BUILDING_ID,
        target: BubbleTarget::building(LEFT_BUILDING_ID, BuildingSide::Left),
        rect: building_rect(BuildingSide::Left, origin.x),
    }];

    let mut x = street_left;
    for (index, segment) in street.segments.iter().enumerate() {
        let width = segment.width as f32 * PIXELS_PER_FOOT;
        let element = segment_element(index);
        layout.push(ElementLayout {
            element,
            target: BubbleTarget::segment(element, index),
            rect: Rect::from_min_size(pos2(x, origin.y + STREET_TOP), vec2(width, SEGMENT_HEIGHT)),
        });
        x += width;
    }

    layout.push(ElementLayout {
        element: RIGHT_BUILDING_ID,
        target: BubbleTarget::building(RIGHT_BUILDING_ID, BuildingSide::Right),
        rect: building_rect(BuildingSide::Right, street_right),
    });
    layout
}

fn segment_color(kind: &str) -> Color32 {
    match kind {
        k if k.starts_with("sidewalk") => Color32::from_rgb(0xd9, 0xd3, 0xc7),
        "bike-lane" => Color32::from_rgb(0x5c, 0xa3, 0x5c),
        "bus-lane" => Color32::from_rgb(0xb8, 0x4a, 0x3e),
        "parking-lane" => Color32::from_rgb(0x8a, 0x8a, 0x8a),
        "divider" => Color32::from_rgb(0x9c, 0xb8, 0x7a),
        "streetcar" | "light-rail" => Color32::from_rgb(0x7a, 0x6a, 0x5a),
        _ => Color32::from_rgb(0x55, 0x55, 0x5a),
    }
}

fn building_color(variant: &str) -> Color32 {
    match variant {
        "grass" => Color32::from_rgb(0x6a, 0x9c, 0x4a),
        "fence" | "parking-lot" => Color32::from_rgb(0xa0, 0xa0, 0x98),
        _ => Color32::from_rgb(0xc4, 0x9a, 0x6c),
    }
}

/// Renders the street and returns the pointer report for this frame.
pub fn render_street_panel(ui: &mut egui::Ui, state: &mut AppState) -> StreetPointer {
    let (canvas, response) = ui.allocate_exact_size(ui.available_size(), Sense::drag());
    let layout = layout_street(&state.street, canvas.min);
    state.host.set_layout(layout.iter().map(|l| (l.element, l.rect)));

    let mut report = StreetPointer::default();

    // Horizontal scrolling; the vertical wheel scrolls sideways too, and
    // dragging the canvas pans it
    let max_scroll = (content_width(&state.street) - canvas.width()).max(0.0);
    let old_scroll = state.host.scroll_x();
    let mut scroll = old_scroll.min(max_scroll);
    if response.hovered() {
        let delta = ui.input(|i| i.smooth_scroll_delta);
        scroll = (scroll - delta.x - delta.y).clamp(0.0, max_scroll);
    }
    if response.dragged() {
        scroll = (scroll - response.drag_delta().x).clamp(0.0, max_scroll);
    }
    state.host.set_drag_mode(if response.dragged() { DragMode::Active } else { DragMode::None });
    if scroll != old_scroll {
        state.host.set_scroll_x(scroll);
        report.scrolled = true;
    }

    let painter = ui.painter_at(canvas);
    let offset = vec2(-scroll, 0.0);
    let units = state.bubble.config().units;
    let ground = canvas.top() + STREET_TOP + SEGMENT_HEIGHT;
    painter.line_segment([pos2(canvas.left(), ground), pos2(canvas.right(), ground)], Stroke::new(1.0, Color32::GRAY));

    for element in &layout {
        let rect = element.rect.translate(offset);
        let affordances = state.host.affordances(element.element);
        let (fill, label) = match element.target.segment_index() {
            Some(index) => {
                let segment = &state.street.segments[index];
                let name = catalog::segment_info(&segment.kind).map_or(segment.kind.as_str(), |info| info.name);
                let mut fill = segment_color(&segment.kind);
                if state.street.has_warning(index, WarningKind::Outside) {
                    fill = fill.linear_multiply(0.4);
                }
                (fill, format!("{}\n{}", name, units::prettify_width(segment.width, units)))
            }
            None => {
                let side = element.target.building_side().unwrap_or(BuildingSide::Left);
                let variant = state.street.building_variant(side);
                let name = catalog::building_variant(&variant).map_or(variant.clone(), |v| v.name.to_string());
                (building_color(&variant), name)
            }
        };

        painter.rect_filled(rect, 0.0, fill);
        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::from_gray(40)), egui::StrokeKind::Inside);
        painter.text(rect.center_bottom() - vec2(0.0, 8.0), Align2::CENTER_BOTTOM, label, FontId::proportional(12.0), Color32::WHITE);

        if affordances.hovered {
            painter.rect_stroke(rect, 0.0, Stroke::new(2.0, Color32::YELLOW), egui::StrokeKind::Inside);
        }
        if affordances.drag_handles {
            for x in [rect.left(), rect.right()] {
                let handle = HANDLE_SIZE.translate(vec2(x, rect.center().y));
                painter.rect_filled(handle, 2.0, Color32::YELLOW);
            }
        }
    }

    if state.host.read_only() {
        painter.text(canvas.left_top() + vec2(8.0, 8.0), Align2::LEFT_TOP, "Read only", FontId::proportional(14.0), Color32::LIGHT_RED);
    }

    // Hit testing; the bubble covers the street beneath it
    report.position = ui.input(|i| i.pointer.hover_pos());
    if let Some(pointer) = report.position {
        let over_bubble = state.bubble.bubble_rect().is_some_and(|rect| rect.contains(pointer));
        if canvas.contains(pointer) && !over_bubble {
            report.hovered = layout
                .iter()
                .find(|element| element.rect.translate(offset).contains(pointer))
                .map(|element| element.target);
        }
    }

    report
}
