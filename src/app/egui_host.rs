//! [`BubbleHost`] implementation backed by the egui frame state.
//!
//! egui is immediate mode, so the host only caches what the last frame laid
//! out: element rectangles, scroll offset, viewport size and the bubble's
//! measured size. Bubble contents are drawn by the bubble panel on the next
//! frame; `render` only measures.

use std::collections::HashMap;

use egui::{vec2, Rect, Vec2};
use streetbubble::{Affordances, BubbleContents, BubbleHost, DragMode, ElementId};

/// Fixed bubble width in points
pub const BUBBLE_WIDTH: f32 = 280.0;

const TITLE_HEIGHT: f32 = 36.0;
const STEPPER_HEIGHT: f32 = 34.0;
const VARIANT_ROW_HEIGHT: f32 = 30.0;
const WARNING_HEIGHT: f32 = 22.0;
const DESCRIPTION_LINK_HEIGHT: f32 = 28.0;
const DESCRIPTION_PANEL_HEIGHT: f32 = 180.0;
const FRAME_PADDING: f32 = 16.0;

/// Size the bubble panel will occupy for the given contents.
pub fn bubble_size(contents: &BubbleContents) -> Vec2 {
    let mut height = TITLE_HEIGHT + FRAME_PADDING;
    if contents.width.is_some() || contents.height.is_some() {
        height += STEPPER_HEIGHT;
    }
    height += VARIANT_ROW_HEIGHT * contents.variants.len() as f32;
    height += WARNING_HEIGHT * contents.warnings.len() as f32;
    if contents.description.is_some() {
        height += DESCRIPTION_LINK_HEIGHT;
        if contents.description_open {
            height += DESCRIPTION_PANEL_HEIGHT;
        }
    }
    vec2(BUBBLE_WIDTH, height)
}

/// Host state shared between the street canvas and the bubble engine.
#[derive(Debug, Default)]
pub struct EguiHost {
    element_rects: HashMap<ElementId, Rect>,
    affordances: HashMap<ElementId, Affordances>,
    scroll_x: f32,
    viewport_size: Vec2,
    read_only: bool,
    settings_open: bool,
    drag_mode: DragMode,
    /// Size the bubble panel laid out for these contents
    measured: Option<(BubbleContents, Vec2)>,
}

impl EguiHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the element layout computed by the street panel.
    pub fn set_layout(&mut self, rects: impl IntoIterator<Item = (ElementId, Rect)>) {
        self.element_rects.clear();
        self.element_rects.extend(rects);
    }

    pub fn affordances(&self, element: ElementId) -> Affordances {
        self.affordances.get(&element).copied().unwrap_or(Affordances::NONE)
    }

    pub fn set_scroll_x(&mut self, scroll_x: f32) {
        self.scroll_x = scroll_x;
    }

    /// Set by the street panel while the canvas is being dragged.
    pub fn set_drag_mode(&mut self, drag_mode: DragMode) {
        self.drag_mode = drag_mode;
    }

    pub fn set_viewport_size(&mut self, size: Vec2) {
        self.viewport_size = size;
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Remembers the laid-out size of `contents` for the next `render`.
    pub fn record_measured_size(&mut self, contents: BubbleContents, size: Vec2) {
        self.measured = Some((contents, size));
    }

    /// The settings window counts as an open menu.
    pub fn settings_open(&self) -> bool {
        self.settings_open
    }

    pub fn set_settings_open(&mut self, open: bool) {
        self.settings_open = open;
    }
}

impl BubbleHost for EguiHost {
    fn element_rect(&self, element: ElementId) -> Option<Rect> {
        self.element_rects.get(&element).copied()
    }

    fn drag_mode(&self) -> DragMode {
        self.drag_mode
    }

    fn is_any_menu_visible(&self) -> bool {
        self.settings_open
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    fn scroll_x(&self) -> f32 {
        self.scroll_x
    }

    fn set_affordances(&mut self, element: ElementId, affordances: Affordances) {
        if affordances == Affordances::NONE {
            self.affordances.remove(&element);
        } else {
            self.affordances.insert(element, affordances);
        }
    }

    fn hide_all_menus(&mut self) {
        self.settings_open = false;
    }

    /// Last frame's measurement when the contents are unchanged, otherwise
    /// an estimate the bubble panel measures on its next frame.
    fn render(&mut self, contents: &BubbleContents) -> Vec2 {
        match &self.measured {
            Some((measured, size)) if measured == contents => *size,
            _ => bubble_size(contents),
        }
    }
}
