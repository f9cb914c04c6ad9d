//! Centralized application state for the street editor.
//!
//! The street, the bubble engine and the host adapter are sibling fields so
//! a [`BubbleContext`] can borrow the street and the host mutably while the
//! bubble itself is borrowed separately.

use std::time::Duration;

use egui::Pos2;
use streetbubble::{BubbleConfig, BubbleContext, BubbleTarget, InfoBubble, Street};

use crate::app::EguiHost;

/// Seed of the first random street
pub const INITIAL_SEED: u64 = 42;

/// Where the current street came from, shown in the status bar.
#[derive(Debug, Clone, PartialEq)]
pub enum StreetSource {
    Default,
    File(std::path::PathBuf),
    Random(u64),
}

/// Pointer state remembered from the previous frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointerState {
    /// Element target under the pointer
    pub hovered: Option<BubbleTarget>,
    pub position: Option<Pos2>,
    pub inside_bubble: bool,
}

pub struct AppState {
    /// The street being edited
    pub street: Street,
    pub source: StreetSource,

    /// The info bubble engine
    pub bubble: InfoBubble,

    /// Host adapter lent to the bubble
    pub host: EguiHost,

    pub pointer: PointerState,

    /// Seed used by the next random street
    pub next_seed: u64,

    /// Draws the hover polygon over the street
    pub show_polygon: bool,

    /// Scratch copy edited by the settings window
    pub settings_draft: BubbleConfig,

    pub error_message: Option<String>,
}

impl AppState {
    /// Creates the state with the default street and a stored configuration.
    pub fn with_settings(config: BubbleConfig, show_polygon: bool) -> Self {
        let (street, error_message) = match Street::default_street() {
            Ok(street) => (street, None),
            Err(e) => (Street::random(INITIAL_SEED), Some(format!("Error loading default street: {:#}", e))),
        };

        Self {
            street,
            source: StreetSource::Default,
            settings_draft: config.clone(),
            bubble: InfoBubble::new(config),
            host: EguiHost::new(),
            pointer: PointerState::default(),
            next_seed: INITIAL_SEED,
            show_polygon,
            error_message,
        }
    }

    /// Runs `f` with the bubble and a context lending it the street and host.
    pub fn with_bubble<R>(&mut self, now: Duration, f: impl FnOnce(&mut InfoBubble, &mut BubbleContext) -> R) -> R {
        let mut ctx = BubbleContext::new(&mut self.street, &mut self.host, now);
        f(&mut self.bubble, &mut ctx)
    }

    /// Swaps in a new street and forgets everything tied to the old one.
    pub fn replace_street(&mut self, street: Street, source: StreetSource, now: Duration) {
        self.with_bubble(now, |bubble, ctx| {
            bubble.dont_consider_showing();
            bubble.hide(ctx);
        });
        self.street = street;
        self.source = source;
        self.pointer = PointerState::default();
        self.host.set_scroll_x(0.0);
        self.error_message = None;
    }
}
