//! Bubble placement relative to its target element.
//!
//! These functions are stateless. Callers must measure the rendered bubble
//! first; the bubble's own size is an input here.

use egui::{pos2, Rect, Vec2};

use crate::config::BubbleConfig;

/// Shifts a page rectangle into screen space by the horizontal scroll offset.
pub fn element_to_screen(element: Rect, scroll_x: f32) -> Rect {
    element.translate(egui::vec2(-scroll_x, 0.0))
}

/// Computes the bubble rectangle for an element.
///
/// Vertically the bubble sits on top of the element, overlapping it by the
/// pointer-triangle height, but never closer than `min_top_margin` to the top
/// of the viewport. Horizontally it is centered over the element and kept
/// `side_margin` away from the left edge, then from the right edge.
///
/// # Arguments
/// * `element` - Target element in page coordinates
/// * `bubble_size` - Measured size of the rendered bubble
/// * `viewport` - Viewport size
/// * `scroll_x` - Horizontal scroll offset of the street container
pub fn position_bubble(
    element: Rect,
    bubble_size: Vec2,
    viewport: Vec2,
    scroll_x: f32,
    config: &BubbleConfig,
) -> Rect {
    let element = element_to_screen(element, scroll_x);

    let y = (element.top() - (bubble_size.y - config.triangle_overlap)).max(config.min_top_margin);

    let mut x = element.left() + element.width() / 2.0 - bubble_size.x / 2.0;
    let right_limit = viewport.x - bubble_size.x - config.side_margin;
    if x < config.side_margin {
        x = config.side_margin;
    } else if x > right_limit {
        x = right_limit;
    }

    Rect::from_min_size(pos2(x, y), bubble_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    const VIEWPORT: Vec2 = vec2(1280.0, 800.0);
    const BUBBLE: Vec2 = vec2(240.0, 160.0);

    fn element_at(x: f32, y: f32) -> Rect {
        Rect::from_min_size(pos2(x, y), vec2(120.0, 300.0))
    }

    #[test]
    fn test_centered_above_element_with_overlap() {
        let config = BubbleConfig::default();
        let rect = position_bubble(element_at(500.0, 400.0), BUBBLE, VIEWPORT, 0.0, &config);
        assert_eq!(rect.left(), 500.0 + 60.0 - 120.0);
        assert_eq!(rect.top(), 400.0 - 160.0 + 20.0);
        assert_eq!(rect.size(), BUBBLE);
        // The bubble bottom overlaps the element top.
        assert_eq!(rect.bottom(), 420.0);
    }

    #[test]
    fn test_top_margin_clamp() {
        let config = BubbleConfig::default();
        let rect = position_bubble(element_at(500.0, 150.0), BUBBLE, VIEWPORT, 0.0, &config);
        assert_eq!(rect.top(), 120.0);
    }

    #[test]
    fn test_side_margin_clamps() {
        let config = BubbleConfig::default();
        let left = position_bubble(element_at(0.0, 400.0), BUBBLE, VIEWPORT, 0.0, &config);
        assert_eq!(left.left(), 50.0);

        let right = position_bubble(element_at(1250.0, 400.0), BUBBLE, VIEWPORT, 0.0, &config);
        assert_eq!(right.left(), 1280.0 - 240.0 - 50.0);
    }

    #[test]
    fn test_scroll_offset_moves_bubble_left() {
        let config = BubbleConfig::default();
        let unscrolled = position_bubble(element_at(700.0, 400.0), BUBBLE, VIEWPORT, 0.0, &config);
        let scrolled = position_bubble(element_at(700.0, 400.0), BUBBLE, VIEWPORT, 200.0, &config);
        assert_eq!(unscrolled.left() - scrolled.left(), 200.0);
        assert_eq!(unscrolled.top(), scrolled.top());
    }

    #[test]
    fn test_narrow_viewport_prefers_left_margin() {
        let config = BubbleConfig::default();
        let narrow = vec2(200.0, 800.0);
        let rect = position_bubble(element_at(10.0, 400.0), BUBBLE, narrow, 0.0, &config);
        assert_eq!(rect.left(), 50.0);
    }
}
