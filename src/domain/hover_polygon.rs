//! Hover tolerance region around the bubble and the element it describes.
//!
//! Two shapes are produced:
//! - an "approach" funnel from the bubble down to the pointer, used while the
//!   pointer travels from the element toward the bubble
//! - an "inside" outline reaching from the bubble down around the element,
//!   used once the pointer is over the bubble
//!
//! Both always cover the bubble box expanded by the bubble margin.

use egui::{pos2, Pos2, Rect};

use crate::config::BubbleConfig;
use crate::domain::polygon::HoverPolygon;

/// Everything the builder reads. All rectangles are screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonInputs {
    pub bubble: Rect,
    pub pointer: Pos2,
    /// Target element, already shifted by the horizontal scroll offset
    pub element: Option<Rect>,
    pub pointer_inside: bool,
    pub description_open: bool,
}

/// Builds the polygon for the current inputs.
///
/// The inside outline is only used while the description is collapsed and
/// the element is still known; every other case gets the approach funnel.
pub fn build_hover_polygon(inputs: &PolygonInputs, config: &BubbleConfig) -> HoverPolygon {
    let margin = if inputs.description_open {
        config.description_margin
    } else {
        config.bubble_margin
    };

    match inputs.element {
        Some(element) if inputs.pointer_inside && !inputs.description_open => {
            inside_shape(inputs.bubble, element, margin, config)
        }
        _ => approach_shape(inputs.bubble, inputs.pointer, margin, inputs.description_open, config),
    }
}

/// Horizontal half-spread of the funnel, shrinking linearly as the pointer
/// gets closer to the bubble's top edge, clamped to `[0, funnel_spread_max]`.
pub fn funnel_spread(pointer_y: f32, bubble_top: f32, config: &BubbleConfig) -> f32 {
    if config.funnel_spread_divisor <= 0.0 {
        return 0.0;
    }
    let spread = config.funnel_spread_base - (pointer_y - bubble_top) / config.funnel_spread_divisor;
    spread.min(config.funnel_spread_max).max(0.0)
}

fn inside_shape(bubble: Rect, element: Rect, margin: f32, config: &BubbleConfig) -> HoverPolygon {
    let left = bubble.left() - margin;
    let right = bubble.right() + margin;
    let top = bubble.top() - margin;
    let bottom = bubble.bottom() + margin;

    let element_left = element.left() - config.bubble_margin;
    let element_right = element.right() + config.bubble_margin;
    let shoulder_y = bottom + config.shoulder_drop;
    let element_bottom = (element.bottom() + config.bubble_margin).max(shoulder_y);

    HoverPolygon::new(vec![
        pos2(left, top),
        pos2(left, bottom),
        pos2(element_left, shoulder_y),
        pos2(element_left, element_bottom),
        pos2(element_right, element_bottom),
        pos2(element_right, shoulder_y),
        pos2(right, bottom),
        pos2(right, top),
        pos2(left, top),
    ])
}

fn approach_shape(
    bubble: Rect,
    pointer: Pos2,
    margin: f32,
    description_open: bool,
    config: &BubbleConfig,
) -> HoverPolygon {
    let left = bubble.left() - margin;
    let right = bubble.right() + margin;
    let top = bubble.top() - margin;
    let bottom = bubble.bottom() + margin;

    let floor = bubble.bottom() + config.bubble_margin;
    let (outer_y, tip_y) = if description_open {
        (bottom, bottom)
    } else {
        (
            (pointer.y - config.pointer_margin).max(floor),
            (pointer.y + config.pointer_margin).max(floor),
        )
    };

    let spread = funnel_spread(pointer.y, bubble.top(), config);
    let tip_left = pointer.x - config.pointer_margin;
    let tip_right = pointer.x + config.pointer_margin;
    let control_y = outer_y + (bottom - outer_y) * config.funnel_blend;

    HoverPolygon::new(vec![
        pos2(left, top),
        pos2(left, bottom),
        pos2((left + tip_left - spread) / 2.0, control_y),
        pos2(tip_left - spread, outer_y),
        pos2(tip_left, tip_y),
        pos2(tip_right, tip_y),
        pos2(tip_right + spread, outer_y),
        pos2((right + tip_right + spread) / 2.0, control_y),
        pos2(right, bottom),
        pos2(right, top),
        pos2(left, top),
    ])
}
