//! Identity types shared by the bubble engine and its collaborators.
//!
//! Nothing in here owns street data. A [`BubbleTarget`] only points at an
//! element rendered by the host and at the slice of the store it describes.

use serde::{Deserialize, Serialize};

/// Opaque handle of an element rendered by the host (a segment or building).
pub type ElementId = u64;

/// Position of a segment inside the street, left to right.
pub type SegmentIndex = usize;

/// Which of the two buildings flanking the street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingSide {
    Left,
    Right,
}

impl BuildingSide {
    pub fn is_left(self) -> bool {
        matches!(self, BuildingSide::Left)
    }

    pub fn from_is_left(is_left: bool) -> Self {
        if is_left {
            BuildingSide::Left
        } else {
            BuildingSide::Right
        }
    }
}

/// What kind of thing the bubble describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BubbleKind {
    Segment,
    LeftBuilding,
    RightBuilding,
}

/// Non-owning reference into the street store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelRef {
    Segment(SegmentIndex),
    Building(BuildingSide),
}

/// What the bubble currently describes, or is being asked to describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BubbleTarget {
    pub kind: BubbleKind,
    /// Element the bubble is anchored to; `None` when nothing is rendered for it
    pub element: Option<ElementId>,
    pub model: ModelRef,
}

impl BubbleTarget {
    /// Targets a street segment rendered as `element`.
    pub fn segment(element: ElementId, index: SegmentIndex) -> Self {
        Self {
            kind: BubbleKind::Segment,
            element: Some(element),
            model: ModelRef::Segment(index),
        }
    }

    /// Targets one of the two buildings rendered as `element`.
    pub fn building(element: ElementId, side: BuildingSide) -> Self {
        Self {
            kind: match side {
                BuildingSide::Left => BubbleKind::LeftBuilding,
                BuildingSide::Right => BubbleKind::RightBuilding,
            },
            element: Some(element),
            model: ModelRef::Building(side),
        }
    }

    /// Two targets describe the same thing when kind and element match.
    /// Segment indices shift on removal, so the model reference is not compared.
    pub fn same_as(&self, other: &BubbleTarget) -> bool {
        self.kind == other.kind && self.element == other.element
    }

    pub fn segment_index(&self) -> Option<SegmentIndex> {
        match self.model {
            ModelRef::Segment(index) => Some(index),
            ModelRef::Building(_) => None,
        }
    }

    pub fn building_side(&self) -> Option<BuildingSide> {
        match self.model {
            ModelRef::Building(side) => Some(side),
            ModelRef::Segment(_) => None,
        }
    }
}

/// Provisional "show this next" intent recorded by `consider_showing`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsiderationRequest {
    /// Pointer position at the time of the request, screen coordinates
    pub pointer: egui::Pos2,
    pub target: BubbleTarget,
}

/// Closed set of warnings a segment can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningKind {
    /// Segment does not fit inside the street
    Outside,
    TooNarrow,
    TooWide,
}

impl WarningKind {
    pub const ALL: [WarningKind; 3] = [WarningKind::Outside, WarningKind::TooNarrow, WarningKind::TooWide];

    /// Text shown in the bubble's warnings area.
    pub fn message(self) -> &'static str {
        match self {
            WarningKind::Outside => "This segment doesn't fit within the street.",
            WarningKind::TooNarrow => "This segment is not wide enough.",
            WarningKind::TooWide => "This segment is wider than it needs to be.",
        }
    }
}

/// Drag-and-drop mode reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    None,
    Active,
}

/// Visual affordances the bubble asks the host to apply to its target element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Affordances {
    /// Element is highlighted as the bubble's target
    pub hovered: bool,
    /// Resize handles are shown next to the element
    pub drag_handles: bool,
    /// Handles appear without their fade-in transition
    pub immediate: bool,
}

impl Affordances {
    pub const NONE: Affordances = Affordances { hovered: false, drag_handles: false, immediate: false };

    pub fn targeted(immediate: bool) -> Self {
        Self { hovered: true, drag_handles: true, immediate }
    }

    /// Pointer moved into the bubble: keep the highlight, hide the handles.
    pub fn inside_bubble() -> Self {
        Self { hovered: true, drag_handles: false, immediate: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_as_ignores_model_index() {
        let a = BubbleTarget::segment(7, 2);
        let b = BubbleTarget::segment(7, 1);
        assert!(a.same_as(&b));
        assert!(!a.same_as(&BubbleTarget::segment(8, 2)));
    }

    #[test]
    fn test_building_target_kind_follows_side() {
        let left = BubbleTarget::building(1, BuildingSide::Left);
        let right = BubbleTarget::building(1, BuildingSide::Right);
        assert_eq!(left.kind, BubbleKind::LeftBuilding);
        assert_eq!(right.kind, BubbleKind::RightBuilding);
        assert!(!left.same_as(&right));
        assert_eq!(right.building_side(), Some(BuildingSide::Right));
        assert_eq!(right.segment_index(), None);
    }
}
