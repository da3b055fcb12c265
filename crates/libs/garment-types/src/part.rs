use serde::{Deserialize, Serialize};

use crate::{Point, SegmentRange};

/// One fabric piece of a garment: a simple closed polygon (closure from the
/// last point back to the first is implicit) plus the named segments that
/// joints may reference.
///
/// Invariants (§3): non-self-intersecting, at least 3 points, normalised so
/// that the minimum x and y of the outline are zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingPart {
    pub points: Vec<Point>,
    pub segments: Vec<SegmentRange>,
}

impl ClothingPart {
    pub fn new(points: Vec<Point>, segments: Vec<SegmentRange>) -> Self {
        ClothingPart { points, segments }
    }

    /// Translates the outline so its bounding box touches the origin.
    pub fn normalize(&mut self) {
        let Some(min_x) = self
            .points
            .iter()
            .map(|p| p.x)
            .fold(None, |acc: Option<f64>, x| Some(acc.map_or(x, |m| m.min(x))))
        else {
            return;
        };
        let min_y = self
            .points
            .iter()
            .map(|p| p.y)
            .fold(f64::INFINITY, f64::min);
        for point in &mut self.points {
            point.x -= min_x;
            point.y -= min_y;
        }
    }

    pub fn scaled(&self, ratio: f64) -> Vec<Point> {
        self.points
            .iter()
            .map(|p| Point::new(p.x * ratio, p.y * ratio))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_moves_bounds_to_origin() {
        let mut part = ClothingPart::new(
            vec![
                Point::new(5.0, 5.0),
                Point::new(10.0, 5.0),
                Point::new(10.0, 10.0),
                Point::new(5.0, 10.0),
            ],
            vec![],
        );
        part.normalize();
        let min_x = part.points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = part.points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        assert_eq!(min_x, 0.0);
        assert_eq!(min_y, 0.0);
    }
}
