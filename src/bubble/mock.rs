//! Test doubles for the bubble engine.

use std::collections::HashMap;
use std::time::Duration;

use egui::{pos2, vec2, Rect, Vec2};

use super::{BubbleContext, InfoBubble};
use crate::config::BubbleConfig;
use crate::domain::contents::BubbleContents;
use crate::model::{Affordances, BuildingSide, DragMode, ElementId, SegmentIndex, WarningKind};
use crate::street::{Building, Segment, Street};
use crate::traits::{BubbleHost, StreetStore};

pub const SEGMENT_A: ElementId = 10;
pub const SEGMENT_B: ElementId = 11;
pub const LEFT_BUILDING: ElementId = 100;
pub const RIGHT_BUILDING: ElementId = 101;

/// Bubble size reported by [`MockHost::render`]
pub const BUBBLE_SIZE: Vec2 = vec2(240.0, 160.0);

/// Host with fixed element geometry that records what the bubble asks of it.
pub struct MockHost {
    pub rects: HashMap<ElementId, Rect>,
    pub drag: DragMode,
    pub menu_open: bool,
    pub read_only: bool,
    pub viewport: Vec2,
    pub scroll_x: f32,
    pub renders: Vec<BubbleContents>,
    pub affordances: HashMap<ElementId, Affordances>,
    pub menus_hidden: usize,
}

impl MockHost {
    pub fn new() -> Self {
        let rects = HashMap::from([
            (SEGMENT_A, Rect::from_min_size(pos2(400.0, 400.0), vec2(120.0, 300.0))),
            (SEGMENT_B, Rect::from_min_size(pos2(520.0, 400.0), vec2(120.0, 300.0))),
            (LEFT_BUILDING, Rect::from_min_size(pos2(200.0, 300.0), vec2(200.0, 400.0))),
            (RIGHT_BUILDING, Rect::from_min_size(pos2(640.0, 300.0), vec2(200.0, 400.0))),
        ]);
        Self {
            rects,
            drag: DragMode::None,
            menu_open: false,
            read_only: false,
            viewport: vec2(1280.0, 800.0),
            scroll_x: 0.0,
            renders: Vec::new(),
            affordances: HashMap::new(),
            menus_hidden: 0,
        }
    }
}

impl BubbleHost for MockHost {
    fn element_rect(&self, element: ElementId) -> Option<Rect> {
        self.rects.get(&element).copied()
    }

    fn drag_mode(&self) -> DragMode {
        self.drag
    }

    fn is_any_menu_visible(&self) -> bool {
        self.menu_open
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn scroll_x(&self) -> f32 {
        self.scroll_x
    }

    fn set_affordances(&mut self, element: ElementId, affordances: Affordances) {
        self.affordances.insert(element, affordances);
    }

    fn hide_all_menus(&mut self) {
        self.menus_hidden += 1;
    }

    fn render(&mut self, contents: &BubbleContents) -> Vec2 {
        self.renders.push(contents.clone());
        if contents.description_open {
            BUBBLE_SIZE + vec2(0.0, 200.0)
        } else {
            BUBBLE_SIZE
        }
    }
}

/// Street wrapper that records every width and height write.
pub struct CountingStore {
    pub street: Street,
    pub width_writes: Vec<(SegmentIndex, f64)>,
    pub height_writes: Vec<(BuildingSide, u32)>,
}

impl StreetStore for CountingStore {
    fn segment_count(&self) -> usize {
        self.street.segment_count()
    }

    fn segment_kind(&self, index: SegmentIndex) -> Option<String> {
        self.street.segment_kind(index)
    }

    fn segment_width(&self, index: SegmentIndex) -> Option<f64> {
        self.street.segment_width(index)
    }

    fn segment_variant(&self, index: SegmentIndex, variant_type: &str) -> Option<String> {
        self.street.segment_variant(index, variant_type)
    }

    fn has_warning(&self, index: SegmentIndex, warning: WarningKind) -> bool {
        self.street.has_warning(index, warning)
    }

    fn set_segment_width(&mut self, index: SegmentIndex, width: f64) {
        self.width_writes.push((index, width));
        self.street.set_segment_width(index, width);
    }

    fn set_segment_variant(&mut self, index: SegmentIndex, variant_type: &str, choice: &str) {
        self.street.set_segment_variant(index, variant_type, choice);
    }

    fn remove_segment(&mut self, index: SegmentIndex) {
        self.street.remove_segment(index);
    }

    fn remove_all_segments(&mut self) {
        self.street.remove_all_segments();
    }

    fn building_height(&self, side: BuildingSide) -> u32 {
        self.street.building_height(side)
    }

    fn set_building_height(&mut self, side: BuildingSide, floors: u32) {
        self.height_writes.push((side, floors));
        self.street.set_building_height(side, floors);
    }

    fn building_variant(&self, side: BuildingSide) -> String {
        self.street.building_variant(side)
    }

    fn set_building_variant(&mut self, side: BuildingSide, variant: &str) {
        self.street.set_building_variant(side, variant);
    }
}

/// Bubble, street and host wired together with a manual clock.
pub struct Fixture {
    pub bubble: InfoBubble,
    pub store: CountingStore,
    pub host: MockHost,
    pub now: Duration,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(BubbleConfig::default())
    }

    /// Two segments (a 6' bike lane and a 10' drive lane) between a
    /// four-floor narrow building and a grass lot.
    pub fn with_config(config: BubbleConfig) -> Self {
        let mut street = Street::new(40.0);
        street.segments.push(Segment::new("bike-lane", 6.0).with_variant("direction", "inbound"));
        street.segments.push(Segment::new("drive-lane", 10.0).with_variant("direction", "outbound"));
        street.left_building = Building { variant: "narrow".into(), height: 4 };
        street.right_building = Building { variant: "grass".into(), height: 1 };

        Self {
            bubble: InfoBubble::new(config),
            store: CountingStore { street, width_writes: Vec::new(), height_writes: Vec::new() },
            host: MockHost::new(),
            now: Duration::ZERO,
        }
    }

    pub fn run<R>(&mut self, f: impl FnOnce(&mut InfoBubble, &mut BubbleContext) -> R) -> R {
        let mut ctx = BubbleContext::new(&mut self.store, &mut self.host, self.now);
        f(&mut self.bubble, &mut ctx)
    }

    /// Moves the clock forward and fires whatever became due.
    pub fn advance(&mut self, ms: u64) {
        self.now += Duration::from_millis(ms);
        self.run(|bubble, ctx| bubble.tick(ctx));
    }
}
