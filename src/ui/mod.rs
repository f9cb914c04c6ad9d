//! UI panel rendering subsystem
//!
//! - Header panel (street loading, read-only and overlay toggles, units)
//! - Street panel (scaled street canvas and pointer hit testing)
//! - Bubble panel (info bubble contents and the numeric field)
//! - Settings window (bubble configuration draft)
//! - Status bar (street dimensions and bubble phase)
//! - Panel manager (panel orchestration and layout)

pub mod header;
pub mod street_panel;
pub mod bubble_panel;
pub mod settings_window;
pub mod status_bar;
pub mod panel_manager;
