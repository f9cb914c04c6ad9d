//! In-memory street that implements [`StreetStore`].
//!
//! Streets are plain serde data so they can be loaded from JSON files, and a
//! seeded generator produces random streets for demos and tests.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::model::{BuildingSide, SegmentIndex, WarningKind};
use crate::traits::StreetStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub variant: BTreeMap<String, String>,
    /// Width in feet
    pub width: f64,
}

impl Segment {
    pub fn new(kind: &str, width: f64) -> Self {
        Self { kind: kind.to_string(), variant: BTreeMap::new(), width }
    }

    pub fn with_variant(mut self, variant_type: &str, choice: &str) -> Self {
        self.variant.insert(variant_type.to_string(), choice.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub variant: String,
    /// Height in floors
    pub height: u32,
}

impl Default for Building {
    fn default() -> Self {
        Self { variant: "narrow".to_string(), height: 4 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Street {
    /// Total street width in feet, curb to curb
    pub width: f64,
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub left_building: Building,
    #[serde(default)]
    pub right_building: Building,
}

const DEFAULT_STREET: &str = include_str!("../data/default_street.json");

impl Street {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            segments: Vec::new(),
            left_building: Building::default(),
            right_building: Building::default(),
        }
    }

    /// The street every new session starts with.
    pub fn default_street() -> anyhow::Result<Self> {
        serde_json::from_str(DEFAULT_STREET).context("Built-in default street is invalid")
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read street file {}", path.display()))?;
        let street: Street = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse street file {}", path.display()))?;
        log::info!("Loaded street with {} segments from {}", street.segments.len(), path.display());
        Ok(street)
    }

    /// Generates a street from a seed; the same seed gives the same street.
    pub fn random(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut street = Street::new(rng.gen_range(40..=100) as f64);

        let mut used = 0.0;
        while used < street.width {
            let info = &catalog::SEGMENT_INFO[rng.gen_range(0..catalog::SEGMENT_INFO.len())];
            let low = info.min_width.unwrap_or(2.0);
            let high = info.max_width.unwrap_or(low + 6.0);
            let width = (rng.gen_range(low..=high) * 2.0).round() / 2.0;

            let mut segment = Segment::new(info.kind, width);
            for name in info.variants {
                if let Some(variant_type) = catalog::variant_type(name) {
                    let (choice, _) = variant_type.choices[rng.gen_range(0..variant_type.choices.len())];
                    segment = segment.with_variant(name, choice);
                }
            }
            used += width;
            street.segments.push(segment);
        }

        let buildings = catalog::BUILDING_VARIANTS;
        street.left_building = Building {
            variant: buildings[rng.gen_range(0..buildings.len())].id.to_string(),
            height: rng.gen_range(1..=8),
        };
        street.right_building = Building {
            variant: buildings[rng.gen_range(0..buildings.len())].id.to_string(),
            height: rng.gen_range(1..=8),
        };
        street
    }

    /// Sum of all segment widths.
    pub fn occupied_width(&self) -> f64 {
        self.segments.iter().map(|segment| segment.width).sum()
    }

    fn building(&self, side: BuildingSide) -> &Building {
        match side {
            BuildingSide::Left => &self.left_building,
            BuildingSide::Right => &self.right_building,
        }
    }

    fn building_mut(&mut self, side: BuildingSide) -> &mut Building {
        match side {
            BuildingSide::Left => &mut self.left_building,
            BuildingSide::Right => &mut self.right_building,
        }
    }
}

impl StreetStore for Street {
    fn segment_count(&self) -> usize {
        self.segments.len()
    }

    fn segment_kind(&self, index: SegmentIndex) -> Option<String> {
        self.segments.get(index).map(|segment| segment.kind.clone())
    }

    fn segment_width(&self, index: SegmentIndex) -> Option<f64> {
        self.segments.get(index).map(|segment| segment.width)
    }

    fn segment_variant(&self, index: SegmentIndex, variant_type: &str) -> Option<String> {
        self.segments.get(index)?.variant.get(variant_type).cloned()
    }

    fn has_warning(&self, index: SegmentIndex, warning: WarningKind) -> bool {
        let Some(segment) = self.segments.get(index) else {
            return false;
        };
        let info = catalog::segment_info(&segment.kind);
        match warning {
            WarningKind::Outside => {
                let right_edge: f64 = self.segments[..=index].iter().map(|s| s.width).sum();
                right_edge > self.width
            }
            WarningKind::TooNarrow => info
                .and_then(|info| info.min_width)
                .is_some_and(|min| segment.width < min),
            WarningKind::TooWide => info
                .and_then(|info| info.max_width)
                .is_some_and(|max| segment.width > max),
        }
    }

    fn set_segment_width(&mut self, index: SegmentIndex, width: f64) {
        if let Some(segment) = self.segments.get_mut(index) {
            segment.width = width;
        }
    }

    fn set_segment_variant(&mut self, index: SegmentIndex, variant_type: &str, choice: &str) {
        if let Some(segment) = self.segments.get_mut(index) {
            segment.variant.insert(variant_type.to_string(), choice.to_string());
        }
    }

    fn remove_segment(&mut self, index: SegmentIndex) {
        if index < self.segments.len() {
            self.segments.remove(index);
        }
    }

    fn remove_all_segments(&mut self) {
        self.segments.clear();
    }

    fn building_height(&self, side: BuildingSide) -> u32 {
        self.building(side).height
    }

    fn set_building_height(&mut self, side: BuildingSide, floors: u32) {
        self.building_mut(side).height = floors;
    }

    fn building_variant(&self, side: BuildingSide) -> String {
        self.building(side).variant.clone()
    }

    fn set_building_variant(&mut self, side: BuildingSide, variant: &str) {
        self.building_mut(side).variant = variant.to_string();
    }
}
