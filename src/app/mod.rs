//! Application-level modules for the street editor.
//!
//! This module contains the editor coordinator, the egui-backed bubble host
//! and centralized state management.

mod app_state;
mod editor_coordinator;
mod egui_host;
mod settings_coordinator;

pub use app_state::{AppState, PointerState, StreetSource, INITIAL_SEED};
pub use editor_coordinator::EditorCoordinator;
pub use egui_host::EguiHost;
pub use settings_coordinator::{SettingsCoordinator, SHOW_POLYGON_KEY};
