pub mod traits;
pub mod config;
pub mod model;
pub mod catalog;
pub mod units;
pub mod street;
pub mod domain;
pub mod state;
pub mod bubble;

// Export collaborator traits
pub use traits::{BubbleHost, StreetStore};

// Export the engine
pub use bubble::{
    BubbleContext, InfoBubble, FieldKey,
    clamp_width_text, clamp_height_text, ClampFn
};

// Export model types shared with hosts
pub use model::{
    ElementId, SegmentIndex, BuildingSide, BubbleKind, ModelRef,
    BubbleTarget, ConsiderationRequest, WarningKind, DragMode, Affordances
};

// Export configuration
pub use config::BubbleConfig;
pub use units::UnitSystem;

// Export contents and geometry
pub use domain::contents::{BubbleContents, StepperState, VariantRow, VariantChoice};
pub use domain::polygon::HoverPolygon;

// Export state types visible through the engine's queries
pub use state::{BubblePhase, EditSession, FieldKind, CommitPolicy};

// Export the in-memory street
pub use street::{Street, Segment, Building};
