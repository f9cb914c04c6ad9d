//! Description of what the bubble displays for a target.
//!
//! This is the data the host renders: header, stepper controls, variant rows,
//! warnings and the optional description. Building it only reads the store.

use crate::catalog::{self, VariantIcon, BUILDING_VARIANT_TYPE};
use crate::config::BubbleConfig;
use crate::model::{BubbleKind, BubbleTarget, BuildingSide, ModelRef, SegmentIndex, WarningKind};
use crate::traits::StreetStore;
use crate::units;

/// State of a "– value +" control.
#[derive(Debug, Clone, PartialEq)]
pub struct StepperState {
    /// Committed value (feet for widths, floors for heights)
    pub value: f64,
    /// Decorated display text
    pub display: String,
    pub decrement_enabled: bool,
    pub increment_enabled: bool,
    /// Whether the value field accepts typing
    pub editable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantChoice {
    pub choice: &'static str,
    pub icon: &'static VariantIcon,
    /// Currently chosen; rendered as a disabled button
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantRow {
    pub variant_type: &'static str,
    pub choices: Vec<VariantChoice>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BubbleContents {
    pub kind: BubbleKind,
    pub title: String,
    pub removable: bool,
    pub width: Option<StepperState>,
    pub height: Option<StepperState>,
    pub variants: Vec<VariantRow>,
    pub warnings: Vec<WarningKind>,
    pub description: Option<&'static str>,
    pub description_open: bool,
}

/// Builds the contents for a target, or `None` when the target no longer
/// exists in the store.
pub fn build_contents(
    target: &BubbleTarget,
    store: &dyn StreetStore,
    config: &BubbleConfig,
    description_open: bool,
) -> Option<BubbleContents> {
    match target.model {
        ModelRef::Segment(index) => segment_contents(index, store, config, description_open),
        ModelRef::Building(side) => Some(building_contents(side, store, config)),
    }
}

fn segment_contents(
    index: SegmentIndex,
    store: &dyn StreetStore,
    config: &BubbleConfig,
    description_open: bool,
) -> Option<BubbleContents> {
    let kind = store.segment_kind(index)?;
    let width = store.segment_width(index)?;
    let info = catalog::segment_info(&kind);

    let variants = info
        .map(|info| {
            info.variants
                .iter()
                .filter_map(|name| catalog::variant_type(name))
                .map(|variant_type| {
                    let current = store.segment_variant(index, variant_type.name);
                    VariantRow {
                        variant_type: variant_type.name,
                        choices: variant_type
                            .choices
                            .iter()
                            .map(|(choice, icon)| VariantChoice {
                                choice: *choice,
                                icon,
                                selected: current.as_deref() == Some(*choice),
                            })
                            .collect(),
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let description = info.and_then(|info| info.description);

    Some(BubbleContents {
        kind: BubbleKind::Segment,
        title: info.map(|info| info.name.to_string()).unwrap_or(kind),
        removable: true,
        width: Some(width_stepper(width, config)),
        height: None,
        variants,
        warnings: segment_warnings(index, store),
        description,
        description_open: description_open && description.is_some(),
    })
}

fn building_contents(side: BuildingSide, store: &dyn StreetStore, config: &BubbleConfig) -> BubbleContents {
    let variant = store.building_variant(side);
    let title = catalog::building_variant(&variant)
        .map(|building| building.name.to_string())
        .unwrap_or_else(|| variant.clone());

    let choices = catalog::variant_type(BUILDING_VARIANT_TYPE)
        .map(|building| {
            building
                .choices
                .iter()
                .map(|(choice, icon)| VariantChoice { choice: *choice, icon, selected: *choice == variant })
                .collect()
        })
        .unwrap_or_default();

    BubbleContents {
        kind: match side {
            BuildingSide::Left => BubbleKind::LeftBuilding,
            BuildingSide::Right => BubbleKind::RightBuilding,
        },
        title,
        removable: false,
        width: None,
        height: Some(height_stepper(side, store, config)),
        variants: vec![VariantRow { variant_type: BUILDING_VARIANT_TYPE, choices }],
        warnings: Vec::new(),
        description: None,
        description_open: false,
    }
}

/// Stepper state for a segment width.
pub fn width_stepper(width: f64, config: &BubbleConfig) -> StepperState {
    StepperState {
        value: width,
        display: units::prettify_width(width, config.units),
        decrement_enabled: width > config.min_segment_width,
        increment_enabled: width < config.max_segment_width,
        editable: true,
    }
}

/// Stepper state for a building height; disabled for unfloored variants.
pub fn height_stepper(side: BuildingSide, store: &dyn StreetStore, config: &BubbleConfig) -> StepperState {
    let floors = store.building_height(side);
    let variant = store.building_variant(side);
    let floored = catalog::is_floored_building(&variant);

    StepperState {
        value: floors as f64,
        display: height_display(floors, &variant, config),
        decrement_enabled: floored && floors > 1,
        increment_enabled: floored && floors < config.max_building_floors,
        editable: floored,
    }
}

/// Decorated floor count, including the building's real height.
pub fn height_display(floors: u32, variant: &str, config: &BubbleConfig) -> String {
    let real_height = catalog::building_variant(variant)
        .map(|building| building.real_height(floors))
        .unwrap_or(0.0);
    units::prettify_height(floors, real_height, config.units)
}

pub fn segment_warnings(index: SegmentIndex, store: &dyn StreetStore) -> Vec<WarningKind> {
    WarningKind::ALL
        .into_iter()
        .filter(|warning| store.has_warning(index, *warning))
        .collect()
}
