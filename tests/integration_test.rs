use streetbubble::{
    Affordances, BubbleConfig, BubbleContents, BubbleContext, BubbleHost, BubblePhase, BubbleTarget,
    BuildingSide, DragMode, ElementId, FieldKey, FieldKind, InfoBubble, Segment, SegmentIndex, Street,
    StreetStore, WarningKind,
};
use anyhow::Result;
use egui::{pos2, vec2, Pos2, Rect, Vec2};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::time::Duration;

const SEGMENT_A: ElementId = 10;
const SEGMENT_B: ElementId = 11;
const LEFT_BUILDING: ElementId = 100;

/// Host with fixed geometry that keeps every rendered contents.
struct RecordingHost {
    rects: HashMap<ElementId, Rect>,
    menu_open: bool,
    read_only: bool,
    renders: Vec<BubbleContents>,
    affordances: HashMap<ElementId, Affordances>,
}

impl RecordingHost {
    fn new() -> Self {
        Self {
            rects: HashMap::from([
                (SEGMENT_A, Rect::from_min_size(pos2(400.0, 400.0), vec2(120.0, 300.0))),
                (SEGMENT_B, Rect::from_min_size(pos2(520.0, 400.0), vec2(120.0, 300.0))),
                (LEFT_BUILDING, Rect::from_min_size(pos2(200.0, 300.0), vec2(200.0, 400.0))),
            ]),
            menu_open: false,
            read_only: false,
            renders: Vec::new(),
            affordances: HashMap::new(),
        }
    }
}

impl BubbleHost for RecordingHost {
    fn element_rect(&self, element: ElementId) -> Option<Rect> {
        self.rects.get(&element).copied()
    }

    fn drag_mode(&self) -> DragMode {
        DragMode::None
    }

    fn is_any_menu_visible(&self) -> bool {
        self.menu_open
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn viewport_size(&self) -> Vec2 {
        vec2(1280.0, 800.0)
    }

    fn scroll_x(&self) -> f32 {
        0.0
    }

    fn set_affordances(&mut self, element: ElementId, affordances: Affordances) {
        self.affordances.insert(element, affordances);
    }

    fn hide_all_menus(&mut self) {
        self.menu_open = false;
    }

    fn render(&mut self, contents: &BubbleContents) -> Vec2 {
        self.renders.push(contents.clone());
        vec2(240.0, 160.0)
    }
}

/// Street that counts width writes.
struct CountingStreet {
    street: Street,
    width_writes: usize,
}

impl StreetStore for CountingStreet {
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
        self.width_writes += 1;
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
        self.street.set_building_height(side, floors);
    }

    fn building_variant(&self, side: BuildingSide) -> String {
        self.street.building_variant(side)
    }

    fn set_building_variant(&mut self, side: BuildingSide, variant: &str) {
        self.street.set_building_variant(side, variant);
    }
}

struct Editor {
    bubble: InfoBubble,
    store: CountingStreet,
    host: RecordingHost,
    now: Duration,
}

impl Editor {
    fn new(config: BubbleConfig, street: Street) -> Self {
        Self {
            bubble: InfoBubble::new(config),
            store: CountingStreet { street, width_writes: 0 },
            host: RecordingHost::new(),
            now: Duration::ZERO,
        }
    }

    fn two_lanes() -> Self {
        let mut street = Street::new(40.0);
        street.segments.push(Segment::new("bike-lane", 6.0).with_variant("direction", "inbound"));
        street.segments.push(Segment::new("drive-lane", 10.0).with_variant("direction", "outbound"));
        Self::new(BubbleConfig::default(), street)
    }

    fn with<R>(&mut self, f: impl FnOnce(&mut InfoBubble, &mut BubbleContext) -> R) -> R {
        let mut ctx = BubbleContext::new(&mut self.store, &mut self.host, self.now);
        f(&mut self.bubble, &mut ctx)
    }

    fn advance(&mut self, ms: u64) {
        self.now += Duration::from_millis(ms);
        self.with(|bubble, ctx| bubble.tick(ctx));
    }

    fn hover(&mut self, target: BubbleTarget, pointer: Pos2) {
        self.with(|bubble, ctx| {
            bubble.consider_showing(ctx, target, Some(pointer));
            bubble.on_pointer_move(ctx, pointer);
        });
    }

    fn move_to(&mut self, pointer: Pos2) {
        self.with(|bubble, ctx| bubble.on_pointer_move(ctx, pointer));
    }
}

#[test]
fn test_approach_bubble_and_type_width() {
    let mut editor = Editor::two_lanes();
    editor.hover(BubbleTarget::segment(SEGMENT_A, 0), pos2(460.0, 500.0));
    assert!(editor.bubble.is_visible());
    assert_eq!(editor.bubble.bubble_rect(), Some(Rect::from_min_size(pos2(340.0, 260.0), vec2(240.0, 160.0))));
    assert_eq!(editor.host.affordances[&SEGMENT_A], Affordances::targeted(false));

    // Walk up into the bubble; the segment is left on the way.
    editor.with(|bubble, _| bubble.dont_consider_showing());
    for y in [478.0, 447.0, 400.0, 350.0] {
        editor.move_to(pos2(460.0, y));
        editor.advance(50);
        assert!(editor.bubble.is_visible(), "bubble closed at y = {}", y);
    }
    editor.with(|bubble, ctx| bubble.on_bubble_pointer_enter(ctx));
    assert_eq!(editor.host.affordances[&SEGMENT_A], Affordances::inside_bubble());

    editor.with(|bubble, ctx| {
        bubble.on_field_pointer_over(FieldKind::Width);
        bubble.on_field_input(ctx, FieldKind::Width, "7");
        bubble.on_field_input(ctx, FieldKind::Width, "7.5");
    });
    editor.advance(100);
    assert_eq!(editor.store.width_writes, 0);
    editor.with(|bubble, ctx| bubble.on_field_key(ctx, FieldKind::Width, FieldKey::Enter));
    assert_eq!(editor.store.width_writes, 1);
    assert_eq!(editor.store.street.segments[0].width, 7.5);
    assert_eq!(editor.bubble.contents().unwrap().width.as_ref().unwrap().display, "7½'");

    // No late write from the typing timer.
    editor.advance(500);
    assert_eq!(editor.store.width_writes, 1);

    // Leaving through the far side closes the bubble.
    editor.with(|bubble, ctx| bubble.on_bubble_pointer_leave(ctx));
    editor.move_to(pos2(1200.0, 100.0));
    assert!(!editor.bubble.is_visible());
    assert_eq!(editor.host.affordances[&SEGMENT_A], Affordances::NONE);
}

#[test]
fn test_neighbour_inside_polygon_keeps_target() {
    let mut editor = Editor::two_lanes();
    editor.hover(BubbleTarget::segment(SEGMENT_A, 0), pos2(460.0, 500.0));

    editor.with(|bubble, ctx| {
        bubble.dont_consider_showing();
        bubble.consider_showing(ctx, BubbleTarget::segment(SEGMENT_B, 1), Some(pos2(530.0, 430.0)));
    });
    assert_eq!(editor.bubble.target().and_then(|t| t.element), Some(SEGMENT_A));

    editor.move_to(pos2(580.0, 650.0));
    assert_eq!(editor.bubble.target().and_then(|t| t.element), Some(SEGMENT_B));
    assert_eq!(editor.host.affordances[&SEGMENT_A], Affordances::NONE);
    assert_eq!(editor.bubble.contents().unwrap().title, "Drive lane");
}

#[test]
fn test_menu_and_read_only_block_showing() {
    let mut editor = Editor::two_lanes();
    editor.host.menu_open = true;
    editor.hover(BubbleTarget::segment(SEGMENT_A, 0), pos2(460.0, 500.0));
    assert!(!editor.bubble.is_visible());

    editor.host.menu_open = false;
    editor.host.read_only = true;
    editor.hover(BubbleTarget::segment(SEGMENT_A, 0), pos2(460.0, 500.0));
    assert!(!editor.bubble.is_visible());
    assert!(editor.host.renders.is_empty());
}

#[test]
fn test_suppressed_bubble_comes_back_once() {
    let mut editor = Editor::two_lanes();
    editor.hover(BubbleTarget::segment(SEGMENT_A, 0), pos2(460.0, 500.0));
    editor.with(|bubble, ctx| bubble.suppress(ctx));
    assert_eq!(editor.bubble.phase(), BubblePhase::Suppressed);

    editor.advance(50);
    editor.with(|bubble, ctx| bubble.show(ctx, true));
    assert!(!editor.bubble.is_visible());

    editor.advance(50);
    assert_eq!(editor.bubble.phase(), BubblePhase::Hidden);
    editor.advance(50);
    assert!(editor.bubble.is_visible());
    assert_eq!(editor.host.renders.len(), 2);

    editor.advance(1000);
    assert_eq!(editor.host.renders.len(), 2);
    assert_eq!(editor.bubble.next_deadline(), None);
}

#[test]
fn test_street_file_drives_building_bubble() -> Result<()> {
    let path = env::temp_dir().join("streetbubble_test_street.json");
    let _ = fs::remove_file(&path);
    fs::write(
        &path,
        serde_json::json!({
            "width": 30,
            "left_building": { "variant": "wide", "height": 2 },
            "segments": [ { "type": "sidewalk", "width": 8 } ]
        })
        .to_string(),
    )?;

    let street = Street::from_json_file(&path)?;
    fs::remove_file(&path)?;
    assert_eq!(street.segments.len(), 1);
    assert_eq!(street.right_building.variant, "narrow");

    let mut editor = Editor::new(BubbleConfig::default(), street);
    editor.hover(BubbleTarget::building(LEFT_BUILDING, BuildingSide::Left), pos2(300.0, 500.0));
    assert_eq!(editor.bubble.contents().unwrap().title, "Wide building");

    editor.with(|bubble, ctx| {
        bubble.on_field_focus(FieldKind::Height);
        bubble.on_field_input(ctx, FieldKind::Height, "3 floors");
    });
    editor.advance(200);
    assert_eq!(editor.store.street.left_building.height, 3);
    assert_eq!(editor.bubble.contents().unwrap().height.as_ref().unwrap().display, "3 floors (38')");
    Ok(())
}

#[test]
fn test_config_file_sets_commit_delay() -> Result<()> {
    let path = env::temp_dir().join("streetbubble_test_config.json");
    fs::write(&path, r#"{ "field_commit_delay_ms": 400, "min_segment_width": 2.0 }"#)?;
    let config = BubbleConfig::from_json_file(&path)?;
    fs::remove_file(&path)?;
    assert_eq!(config.suppress_cooldown_ms, BubbleConfig::default().suppress_cooldown_ms);

    let mut street = Street::new(40.0);
    street.segments.push(Segment::new("bike-lane", 6.0));
    let mut editor = Editor::new(config, street);
    editor.hover(BubbleTarget::segment(SEGMENT_A, 0), pos2(460.0, 500.0));

    editor.with(|bubble, ctx| {
        bubble.on_field_focus(FieldKind::Width);
        bubble.on_field_input(ctx, FieldKind::Width, "1");
    });
    editor.advance(399);
    assert_eq!(editor.store.width_writes, 0);
    editor.advance(1);
    assert_eq!(editor.store.street.segments[0].width, 2.0);
    assert_eq!(editor.bubble.edit_session().unwrap().display(), "2'");
    Ok(())
}

#[test]
fn test_missing_config_file_is_an_error() {
    let err = BubbleConfig::from_json_file("/nonexistent/bubble.json").unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read bubble configuration"));
}
