//! Street Editor GUI Application
//!
//! A street cross-section drawn to scale, with the info bubble engine from the
//! `streetbubble` library attached to its segments and buildings:
//! - Hovering an element shows its bubble; the hover polygon keeps it open on
//!   the way to the bubble
//! - Width and floor fields commit after a typing pause, or at once on Enter
//! - Scrolling the street suppresses the bubble for a short cooldown
//! - Bubble settings and the debug overlay persist between runs
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state, coordination, host adapter and settings
//! - `ui/` - Panel rendering and interaction collection

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use std::path::PathBuf;
use std::time::Duration;

mod app;
mod ui;

use app::{AppState, EditorCoordinator, SettingsCoordinator, SHOW_POLYGON_KEY};
use ui::header::HeaderInteraction;
use ui::panel_manager::{PanelInteraction, PanelManager};

/// Main application entry point that initializes and launches the street editor.
fn main() -> eframe::Result {
    env_logger::init();

    // Parse command-line arguments to check for initial street to load
    let initial_file = std::env::args()
        .nth(1)
        .map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Street Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "Street Editor",
        options,
        Box::new(move |cc| Ok(Box::new(StreetEditorApp::new(cc, initial_file)))),
    )
}

/// The street editor application.
///
/// - `EditorCoordinator` turns interactions into engine calls
/// - `SettingsCoordinator` handles preference persistence
/// - `PanelManager` handles UI panel layout and rendering
struct StreetEditorApp {
    /// Centralized application state
    state: AppState,
    /// Optional street to load on first frame
    pending_file_load: Option<PathBuf>,
}

impl StreetEditorApp {
    /// Creates the editor with bubble settings loaded from persistent storage.
    fn new(cc: &eframe::CreationContext, initial_file: Option<PathBuf>) -> Self {
        let config = SettingsCoordinator::load_bubble_config(cc.storage);
        let show_polygon = SettingsCoordinator::load_setting_or(cc.storage, SHOW_POLYGON_KEY, false);

        Self {
            state: AppState::with_settings(config, show_polygon),
            pending_file_load: initial_file,
        }
    }

    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, now: Duration) {
        let state = &mut self.state;
        match interaction {
            PanelInteraction::Header(header) => match header {
                HeaderInteraction::OpenFileRequested(path) => EditorCoordinator::open_file(state, path, now),
                HeaderInteraction::RandomStreetRequested => EditorCoordinator::open_random_street(state, now),
                HeaderInteraction::DefaultStreetRequested => EditorCoordinator::open_default_street(state, now),
                HeaderInteraction::UnitsChanged(units) => EditorCoordinator::change_units(state, units, now),
                HeaderInteraction::SettingsToggled(open) => EditorCoordinator::toggle_settings(state, open, now),
            },
            PanelInteraction::Settings(settings) => EditorCoordinator::handle_settings(state, settings, now),
            PanelInteraction::Street(pointer) => EditorCoordinator::handle_street_pointer(state, pointer, now),
            PanelInteraction::Bubble(action) => EditorCoordinator::handle_bubble_action(state, action, now),
            PanelInteraction::BubbleMeasured(size) => EditorCoordinator::handle_bubble_measured(state, size, now),
            PanelInteraction::EscapePressed => EditorCoordinator::handle_escape(state, now),
            PanelInteraction::ViewportResized(size) => {
                log::debug!("Viewport resized to {:?}", size);
                EditorCoordinator::handle_viewport_resize(state, now);
            }
        }
    }
}

impl eframe::App for StreetEditorApp {
    /// Called when the app is being shut down - ensures preferences are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        SettingsCoordinator::save_preferences(storage, self.state.bubble.config(), self.state.show_polygon);
    }

    /// Main update loop:
    /// 1. Fire due bubble timers
    /// 2. Load initial street if specified via command line
    /// 3. Render all panels via PanelManager
    /// 4. Handle panel interactions
    /// 5. Schedule a repaint for the next bubble timer
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Duration::from_secs_f64(ctx.input(|i| i.time).max(0.0));

        EditorCoordinator::tick(&mut self.state, now);

        if let Some(path) = self.pending_file_load.take() {
            EditorCoordinator::open_file(&mut self.state, path, now);
        }

        for interaction in PanelManager::render_all_panels(ctx, &mut self.state) {
            self.handle_panel_interaction(interaction, now);
        }

        if let Some(wait) = EditorCoordinator::time_to_next_timer(&self.state, now) {
            ctx.request_repaint_after(wait);
        }
    }
}
