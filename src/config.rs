//! Tunable constants of the bubble engine.
//!
//! Every field has a default matching the street editor's long-standing
//! behavior, and `#[serde(default)]` lets a settings file override any subset.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::units::UnitSystem;

/// Geometry, timing and value bounds used by the info bubble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleConfig {
    // ===== Hover polygon =====
    /// Margin kept around the bubble box
    pub bubble_margin: f32,
    /// Margin kept around the pointer at the funnel tip
    pub pointer_margin: f32,
    /// Bubble margin while the description panel is expanded
    pub description_margin: f32,
    /// Drop of the "inside" shape's shoulders below the bubble bottom
    pub shoulder_drop: f32,
    /// How far the funnel control points sit between bubble and tip (0..1)
    pub funnel_blend: f32,
    /// Funnel spread at the bubble's top edge before clamping
    pub funnel_spread_base: f32,
    /// Vertical pixels per pixel of lost funnel spread
    pub funnel_spread_divisor: f32,
    /// Upper clamp of the funnel spread
    pub funnel_spread_max: f32,

    // ===== Positioning =====
    /// Overlap between the bubble's bottom and the element's top
    pub triangle_overlap: f32,
    pub min_top_margin: f32,
    pub side_margin: f32,

    // ===== Timing (milliseconds) =====
    pub polygon_debounce_ms: u64,
    pub suppress_cooldown_ms: u64,
    pub field_commit_delay_ms: u64,

    // ===== Values =====
    /// Segment width bounds in feet
    pub min_segment_width: f64,
    pub max_segment_width: f64,
    /// Segment widths snap to multiples of this, in feet
    pub width_resolution: f64,
    pub width_click_increment: f64,
    pub width_precise_click_increment: f64,
    pub max_building_floors: u32,
    pub units: UnitSystem,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            bubble_margin: 20.0,
            pointer_margin: 10.0,
            description_margin: 200.0,
            shoulder_drop: 120.0,
            funnel_blend: 0.2,
            funnel_spread_base: 60.0,
            funnel_spread_divisor: 5.0,
            funnel_spread_max: 50.0,
            triangle_overlap: 20.0,
            min_top_margin: 120.0,
            side_margin: 50.0,
            polygon_debounce_ms: 50,
            suppress_cooldown_ms: 100,
            field_commit_delay_ms: 200,
            min_segment_width: 1.0,
            max_segment_width: 400.0,
            width_resolution: 0.25,
            width_click_increment: 0.5,
            width_precise_click_increment: 0.25,
            max_building_floors: 20,
            units: UnitSystem::Imperial,
        }
    }
}

impl BubbleConfig {
    /// Parses a configuration from JSON. Missing fields keep their defaults
    /// and the result is [`sanitized`](Self::sanitized).
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("Invalid bubble configuration")?;
        Ok(config.sanitized())
    }

    /// Repairs values the engine cannot work with.
    ///
    /// - Inverted width bounds are swapped
    /// - Non-finite or negative geometry falls back to the default
    /// - The funnel spread divisor must be positive, its maximum non-negative
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !self.min_segment_width.is_finite() || self.min_segment_width < 0.0 {
            self.min_segment_width = defaults.min_segment_width;
        }
        if !self.max_segment_width.is_finite() || self.max_segment_width < 0.0 {
            self.max_segment_width = defaults.max_segment_width;
        }
        if self.min_segment_width > self.max_segment_width {
            log::warn!(
                "Segment width bounds inverted ({} > {}), swapping",
                self.min_segment_width,
                self.max_segment_width
            );
            std::mem::swap(&mut self.min_segment_width, &mut self.max_segment_width);
        }

        if !(self.funnel_spread_divisor.is_finite() && self.funnel_spread_divisor > 0.0) {
            log::warn!("Funnel spread divisor {} is not positive", self.funnel_spread_divisor);
            self.funnel_spread_divisor = defaults.funnel_spread_divisor;
        }
        if !self.funnel_spread_max.is_finite() {
            self.funnel_spread_max = defaults.funnel_spread_max;
        }
        self.funnel_spread_max = self.funnel_spread_max.max(0.0);

        for (value, default) in [
            (&mut self.bubble_margin, defaults.bubble_margin),
            (&mut self.pointer_margin, defaults.pointer_margin),
            (&mut self.description_margin, defaults.description_margin),
            (&mut self.shoulder_drop, defaults.shoulder_drop),
            (&mut self.funnel_spread_base, defaults.funnel_spread_base),
            (&mut self.triangle_overlap, defaults.triangle_overlap),
            (&mut self.min_top_margin, defaults.min_top_margin),
            (&mut self.side_margin, defaults.side_margin),
        ] {
            if !value.is_finite() || *value < 0.0 {
                *value = default;
            }
        }
        if !(0.0..=1.0).contains(&self.funnel_blend) {
            self.funnel_blend = defaults.funnel_blend;
        }

        for (value, default) in [
            (&mut self.width_resolution, defaults.width_resolution),
            (&mut self.width_click_increment, defaults.width_click_increment),
            (&mut self.width_precise_click_increment, defaults.width_precise_click_increment),
        ] {
            if !value.is_finite() || *value < 0.0 {
                *value = default;
            }
        }
        self.max_building_floors = self.max_building_floors.max(1);
        self
    }

    /// Loads a configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read bubble configuration {}", path.display()))?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded bubble configuration from {}", path.display());
        Ok(config)
    }

    pub fn polygon_debounce(&self) -> Duration {
        Duration::from_millis(self.polygon_debounce_ms)
    }

    pub fn suppress_cooldown(&self) -> Duration {
        Duration::from_millis(self.suppress_cooldown_ms)
    }

    pub fn field_commit_delay(&self) -> Duration {
        Duration::from_millis(self.field_commit_delay_ms)
    }

    /// Snaps a width to the resolution, then clamps it into the allowed range.
    pub fn clamp_width(&self, width: f64) -> f64 {
        let snapped = crate::units::round_to_resolution(width, self.width_resolution);
        snapped.min(self.max_segment_width).max(self.min_segment_width)
    }

    pub fn clamp_floors(&self, floors: i64) -> u32 {
        floors.clamp(1, self.max_building_floors.max(1) as i64) as u32
    }
}
