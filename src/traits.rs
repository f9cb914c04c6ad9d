use crate::domain::contents::BubbleContents;
use crate::model::{Affordances, BuildingSide, DragMode, ElementId, SegmentIndex, WarningKind};

/// Trait for reading and writing the street the bubble edits.
///
/// The bubble never keeps street data around between calls; everything it
/// displays is read through this trait right before it is needed, and every
/// committed edit goes straight back through it.
pub trait StreetStore {
    /// Returns the number of segments in the street
    fn segment_count(&self) -> usize;

    /// Returns the segment kind (e.g. "bike-lane"), `None` for a stale index
    fn segment_kind(&self, index: SegmentIndex) -> Option<String>;

    /// Returns the segment width in feet
    fn segment_width(&self, index: SegmentIndex) -> Option<f64>;

    /// Returns the chosen value of one variant type of a segment
    fn segment_variant(&self, index: SegmentIndex, variant_type: &str) -> Option<String>;

    /// Returns whether a segment currently carries the given warning
    fn has_warning(&self, index: SegmentIndex, warning: WarningKind) -> bool;

    /// Writes a new (already clamped) segment width
    fn set_segment_width(&mut self, index: SegmentIndex, width: f64);

    /// Changes one variant type of a segment
    fn set_segment_variant(&mut self, index: SegmentIndex, variant_type: &str, choice: &str);

    /// Removes one segment
    fn remove_segment(&mut self, index: SegmentIndex);

    /// Removes every segment
    fn remove_all_segments(&mut self);

    /// Returns the building height in floors
    fn building_height(&self, side: BuildingSide) -> u32;

    /// Writes a new (already clamped) building height
    fn set_building_height(&mut self, side: BuildingSide, floors: u32);

    /// Returns the building variant id (e.g. "narrow")
    fn building_variant(&self, side: BuildingSide) -> String;

    /// Changes the building variant
    fn set_building_variant(&mut self, side: BuildingSide, variant: &str);
}

/// Trait for everything the bubble needs from the surface it is drawn on.
///
/// Coordinates: element rectangles are page coordinates of the street canvas,
/// before horizontal scrolling. Pointer positions handed to the bubble and the
/// rectangle it reports for itself are screen coordinates.
pub trait BubbleHost {
    /// Returns the page rectangle of an element, `None` if it is gone
    fn element_rect(&self, element: ElementId) -> Option<egui::Rect>;

    /// Returns the current drag-and-drop mode
    fn drag_mode(&self) -> DragMode;

    /// Returns whether any menu is currently open
    fn is_any_menu_visible(&self) -> bool;

    /// Returns whether the street is shown read-only
    fn is_read_only(&self) -> bool;

    /// Returns the viewport size
    fn viewport_size(&self) -> egui::Vec2;

    /// Returns the horizontal scroll offset of the street container
    fn scroll_x(&self) -> f32;

    /// Applies visual affordances to an element
    fn set_affordances(&mut self, element: ElementId, affordances: Affordances);

    /// Closes every open menu
    fn hide_all_menus(&mut self);

    /// Renders new bubble contents and returns the measured bubble size
    fn render(&mut self, contents: &BubbleContents) -> egui::Vec2;
}
