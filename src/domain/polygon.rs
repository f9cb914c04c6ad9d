//! Point-in-polygon containment for hover tolerance regions.

use egui::Pos2;

/// Closed outline in screen coordinates.
///
/// Built once by [`crate::domain::hover_polygon`] and replaced, never edited,
/// whenever its inputs change.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverPolygon {
    points: Vec<Pos2>,
}

impl HoverPolygon {
    pub fn new(points: Vec<Pos2>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn contains(&self, point: Pos2) -> bool {
        contains(&self.points, point)
    }
}

/// Ray-casting parity test. The closing edge from the last vertex back to the
/// first is implied, so an explicitly repeated first point is harmless.
///
/// Fewer than three vertices never contain anything.
pub fn contains(polygon: &[Pos2], point: Pos2) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let crossing_x = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < crossing_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
