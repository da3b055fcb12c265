use derive_more::{From, Into};
use serde::{Deserialize, Serialize};

/// A point in the garment's working plane, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

pub fn rotate_point(point: Point, angle_degrees: f64) -> Point {
    let radians = angle_degrees.to_radians();
    let cos = radians.cos();
    let sin = radians.sin();
    Point {
        x: point.x * cos - point.y * sin,
        y: point.x * sin + point.y * cos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn rotate_point_by_90_degrees() {
        let p = Point::new(1.0, 0.0);
        let rotated = rotate_point(p, 90.0);
        assert!((rotated.x).abs() < 1e-9);
        assert!((rotated.y - 1.0).abs() < 1e-9);
    }
}
