//! Static catalog of segment kinds, variant icons and building variants.
//!
//! The tables are plain statics in display order; lookups by name go through
//! lazily built indexes.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Icon shown on a variant button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantIcon {
    pub id: &'static str,
    pub title: &'static str,
    /// Fill color override as a hex string
    pub color: Option<&'static str>,
}

/// A named variant type (e.g. "direction") and its choices in display order.
#[derive(Debug)]
pub struct VariantType {
    pub name: &'static str,
    pub choices: &'static [(&'static str, VariantIcon)],
}

impl VariantType {
    pub fn icon(&self, choice: &str) -> Option<&'static VariantIcon> {
        self.choices.iter().find(|(name, _)| *name == choice).map(|(_, icon)| icon)
    }
}

/// Display information for one segment kind.
#[derive(Debug)]
pub struct SegmentInfo {
    pub kind: &'static str,
    pub name: &'static str,
    /// Variant types offered in the bubble, in display order
    pub variants: &'static [&'static str],
    pub description: Option<&'static str>,
    /// Recommended width range in feet
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
}

/// Display and height information for one building variant.
#[derive(Debug)]
pub struct BuildingVariant {
    pub id: &'static str,
    pub name: &'static str,
    /// Floored buildings have an editable floor count
    pub floored: bool,
    pub floor_height: f64,
    /// Roof height for floored buildings, total height otherwise
    pub base_height: f64,
}

impl BuildingVariant {
    /// Real height in feet for the given floor count.
    pub fn real_height(&self, floors: u32) -> f64 {
        if self.floored {
            self.base_height + floors as f64 * self.floor_height
        } else {
            self.base_height
        }
    }
}

const fn icon(id: &'static str, title: &'static str) -> VariantIcon {
    VariantIcon { id, title, color: None }
}

const fn colored(id: &'static str, title: &'static str, color: &'static str) -> VariantIcon {
    VariantIcon { id, title, color: Some(color) }
}

/// Variant type used for the building pickers.
pub const BUILDING_VARIANT_TYPE: &str = "building";

pub static VARIANT_TYPES: &[VariantType] = &[
    VariantType {
        name: BUILDING_VARIANT_TYPE,
        choices: &[
            ("waterfront", icon("waterfront", "Waterfront")),
            ("grass", icon("grass", "Grass")),
            ("fence", icon("fence", "Empty lot")),
            ("parking-lot", icon("car", "Parking lot")),
            ("residential", icon("residential", "Home")),
            ("narrow", icon("building-thin", "Narrow building")),
            ("wide", icon("building-wide", "Wide building")),
        ],
    },
    VariantType {
        name: "direction",
        choices: &[
            ("inbound", icon("direction-inbound", "Inbound")),
            ("outbound", icon("direction-outbound", "Outbound")),
        ],
    },
    VariantType {
        name: "parking-lane-direction",
        choices: &[
            ("inbound", icon("direction-inbound", "Inbound")),
            ("outbound", icon("direction-outbound", "Outbound")),
            ("sideways", icon("direction-both", "Perpendicular")),
        ],
    },
    VariantType {
        name: "tree-type",
        choices: &[
            ("big", icon("tree", "Tree")),
            ("palm-tree", icon("palm-tree", "Palm tree")),
        ],
    },
    VariantType {
        name: "lamp-orientation",
        choices: &[
            ("left", icon("direction-left", "Left")),
            ("both", icon("direction-both", "Both")),
            ("right", icon("direction-right", "Right")),
        ],
    },
    VariantType {
        name: "lamp-type",
        choices: &[
            ("modern", icon("lamp-modern", "Modern")),
            ("traditional", icon("lamp-traditional-right", "Traditional")),
            ("pride", icon("rainbow", "Modern with pride banner")),
        ],
    },
    VariantType {
        name: "bench-orientation",
        choices: &[
            ("left", icon("direction-left", "Left")),
            ("center", icon("direction-both", "Center")),
            ("right", icon("direction-right", "Right")),
        ],
    },
    VariantType {
        name: "turn-lane-orientation",
        choices: &[
            ("left", icon("turn-lane-left", "Left")),
            ("left-straight", icon("turn-lane-left-straight", "Left and straight")),
            ("straight", icon("turn-lane-straight", "Straight")),
            ("right-straight", icon("turn-lane-right-straight", "Right and straight")),
            ("right", icon("turn-lane-right", "Right")),
            ("both", icon("turn-lane-both", "Both")),
            ("shared", icon("turn-lane-shared", "Shared")),
        ],
    },
    VariantType {
        name: "divider-type",
        choices: &[
            ("median", icon("median", "Median")),
            ("striped-buffer", icon("buffer", "Striped buffer")),
            ("planting-strip", icon("grass", "Greenstreet Planting")),
            ("planter-box", icon("planter-box", "Planter box")),
            ("bush", icon("bush", "Greenstreet Planting")),
            ("flowers", icon("flowers", "Greenstreet Planting")),
            ("big-tree", icon("tree", "Greenstreet Planting")),
            ("palm-tree", icon("palm-tree", "Greenstreet Planting")),
            ("bollard", icon("bollard", "Bollard")),
            ("dome", icon("dome", "Traffic exclusion dome")),
        ],
    },
    VariantType {
        name: "orientation",
        choices: &[
            ("left", icon("orientation-left", "Left")),
            ("right", icon("orientation-right", "Right")),
        ],
    },
    VariantType {
        name: "bus-asphalt",
        choices: &[
            ("regular", colored("asphalt", "Asphalt", "#292a29")),
            ("colored", colored("asphalt", "Red lane", "#9b1f22")),
            ("shared", icon("sharrow", "Shared bus/bike lane")),
        ],
    },
    VariantType {
        name: "bike-asphalt",
        choices: &[
            ("regular", colored("asphalt", "Asphalt", "#292a29")),
            ("colored", colored("asphalt", "Green lane", "#2b6750")),
        ],
    },
    VariantType {
        name: "bike-rack-elevation",
        choices: &[
            ("sidewalk-parallel", icon("direction-both", "Parallel parking, sidewalk level")),
            ("sidewalk", icon("elevation-higher", "Perpendicular parking, sidewalk level")),
            ("road", icon("elevation-lower", "CityRack Bike Corral")),
        ],
    },
    VariantType {
        name: "car-type",
        choices: &[
            ("car", icon("car", "Car")),
            ("sharrow", icon("sharrow", "Sharrow")),
            ("truck", icon("truck", "Truck")),
        ],
    },
    VariantType {
        name: "sidewalk-density",
        choices: &[
            ("dense", icon("sidewalk-density-dense", "Dense")),
            ("normal", icon("sidewalk-density-normal", "Normal")),
            ("sparse", icon("sidewalk-density-sparse", "Sparse")),
            ("empty", icon("", "Empty")),
        ],
    },
    VariantType {
        name: "parking-lane-orientation",
        choices: &[
            ("left", icon("orientation-left", "Left")),
            ("right", icon("orientation-right", "Right")),
        ],
    },
    VariantType {
        name: "wayfinding-type",
        choices: &[
            ("large", icon("wayfinding-large", "Large")),
            ("medium", icon("wayfinding-medium", "Medium")),
            ("small", icon("wayfinding-small", "Small")),
        ],
    },
];

pub static SEGMENT_INFO: &[SegmentInfo] = &[
    SegmentInfo {
        kind: "sidewalk",
        name: "Sidewalk",
        variants: &["sidewalk-density"],
        description: Some("Sidewalks give people a place to walk, linger and meet."),
        min_width: Some(6.0),
        max_width: None,
    },
    SegmentInfo { kind: "sidewalk-tree", name: "Sidewalk tree", variants: &["tree-type"], description: None, min_width: None, max_width: None },
    SegmentInfo {
        kind: "sidewalk-lamp",
        name: "Lamp",
        variants: &["lamp-orientation", "lamp-type"],
        description: None,
        min_width: None,
        max_width: None,
    },
    SegmentInfo {
        kind: "sidewalk-bench",
        name: "Bench",
        variants: &["bench-orientation"],
        description: None,
        min_width: None,
        max_width: None,
    },
    SegmentInfo {
        kind: "sidewalk-wayfinding",
        name: "Wayfinding sign",
        variants: &["wayfinding-type"],
        description: None,
        min_width: None,
        max_width: None,
    },
    SegmentInfo {
        kind: "bike-rack",
        name: "Bike rack",
        variants: &["orientation", "bike-rack-elevation"],
        description: None,
        min_width: None,
        max_width: None,
    },
    SegmentInfo {
        kind: "parklet",
        name: "Parklet",
        variants: &["orientation"],
        description: Some("Parklets turn a parking space into a small public seating area."),
        min_width: None,
        max_width: None,
    },
    SegmentInfo { kind: "divider", name: "Buffer", variants: &["divider-type"], description: None, min_width: None, max_width: None },
    SegmentInfo {
        kind: "bike-lane",
        name: "Bike lane",
        variants: &["direction", "bike-asphalt"],
        description: Some("Painted lanes give cyclists a dedicated space on the street."),
        min_width: Some(5.0),
        max_width: Some(10.0),
    },
    SegmentInfo {
        kind: "drive-lane",
        name: "Drive lane",
        variants: &["direction", "car-type"],
        description: None,
        min_width: Some(9.0),
        max_width: Some(12.0),
    },
    SegmentInfo {
        kind: "turn-lane",
        name: "Turn lane",
        variants: &["direction", "turn-lane-orientation"],
        description: None,
        min_width: Some(9.0),
        max_width: Some(12.0),
    },
    SegmentInfo {
        kind: "parking-lane",
        name: "Parking lane",
        variants: &["parking-lane-direction", "parking-lane-orientation"],
        description: None,
        min_width: Some(7.0),
        max_width: Some(10.0),
    },
    SegmentInfo {
        kind: "bus-lane",
        name: "Bus lane",
        variants: &["direction", "bus-asphalt"],
        description: Some("Dedicated bus lanes keep transit moving past traffic."),
        min_width: Some(10.0),
        max_width: Some(13.0),
    },
];

pub static BUILDING_VARIANTS: &[BuildingVariant] = &[
    BuildingVariant { id: "waterfront", name: "Waterfront", floored: false, floor_height: 0.0, base_height: 0.0 },
    BuildingVariant { id: "grass", name: "Grass", floored: false, floor_height: 0.0, base_height: 0.0 },
    BuildingVariant { id: "fence", name: "Empty lot", floored: false, floor_height: 0.0, base_height: 6.0 },
    BuildingVariant { id: "parking-lot", name: "Parking lot", floored: false, floor_height: 0.0, base_height: 6.0 },
    BuildingVariant { id: "residential", name: "Home", floored: true, floor_height: 10.0, base_height: 6.0 },
    BuildingVariant { id: "narrow", name: "Narrow building", floored: true, floor_height: 10.0, base_height: 6.0 },
    BuildingVariant { id: "wide", name: "Wide building", floored: true, floor_height: 10.0, base_height: 8.0 },
];

static VARIANT_TYPE_INDEX: Lazy<HashMap<&'static str, &'static VariantType>> =
    Lazy::new(|| VARIANT_TYPES.iter().map(|variant| (variant.name, variant)).collect());

static SEGMENT_INFO_INDEX: Lazy<HashMap<&'static str, &'static SegmentInfo>> =
    Lazy::new(|| SEGMENT_INFO.iter().map(|info| (info.kind, info)).collect());

pub fn variant_type(name: &str) -> Option<&'static VariantType> {
    VARIANT_TYPE_INDEX.get(name).copied()
}

pub fn segment_info(kind: &str) -> Option<&'static SegmentInfo> {
    SEGMENT_INFO_INDEX.get(kind).copied()
}

pub fn building_variant(id: &str) -> Option<&'static BuildingVariant> {
    BUILDING_VARIANTS.iter().find(|variant| variant.id == id)
}

/// Buildings not found in the catalog have no floors.
pub fn is_floored_building(id: &str) -> bool {
    building_variant(id).map(|variant| variant.floored).unwrap_or(false)
}
