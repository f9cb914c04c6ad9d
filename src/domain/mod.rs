//! Pure geometry and content logic of the info bubble.
//!
//! Nothing here holds state between calls:
//! - Polygon containment (ray casting)
//! - Hover polygon construction (approach funnel and inside outline)
//! - Bubble positioning against the viewport
//! - Contents description derived from the street store

pub mod polygon;
pub mod hover_polygon;
pub mod positioning;
pub mod contents;

