use garment_types::Point;

use crate::constants::DEFAULT_TOLERANCE;
use crate::primitives::{almost_equal, segment_intersection};

/// The geometric intersection of a candidate segment with a closed
/// polygon ring (§4.1: "compute its geometric intersection with `bounds`").
#[derive(Debug, Clone, PartialEq)]
pub enum RingIntersection {
    /// The segment does not touch the ring boundary at all.
    None,
    /// Exactly one crossing point.
    Point(Point),
    /// The segment runs collinear with a ring edge over an interval; the two
    /// endpoints of the overlap are given start-to-end along the segment.
    Overlap(Point, Point),
    /// More than one distinct crossing point.
    Multiple(Vec<Point>),
}

fn push_unique(points: &mut Vec<Point>, candidate: Point, tolerance: f64) {
    let already_present = points
        .iter()
        .any(|p| (p.x - candidate.x).abs() < tolerance && (p.y - candidate.y).abs() < tolerance);
    if !already_present {
        points.push(candidate);
    }
}

/// True if `p` is collinear with segment `(a, b)`, independent of whether
/// it falls within the segment's bounding box.
fn collinear(a: Point, b: Point, p: Point, tolerance: f64) -> bool {
    let cross = (p.y - a.y) * (b.x - a.x) - (p.x - a.x) * (b.y - a.y);
    cross.abs() <= tolerance
}

/// Computes the intersection of segment `(start, end)` with the closed ring
/// `ring` (implicit closing edge from the last point back to the first).
pub fn ring_intersection(start: Point, end: Point, ring: &[Point]) -> RingIntersection {
    let n = ring.len();
    if n < 2 {
        return RingIntersection::None;
    }

    let mut points = Vec::new();
    let mut overlap: Option<(Point, Point)> = None;

    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];

        if collinear(a, b, start, DEFAULT_TOLERANCE) && collinear(a, b, end, DEFAULT_TOLERANCE) {
            // Candidate runs along this ring edge; the overlap is the
            // intersection of the two 1D intervals projected onto the edge.
            let edge_len2 = (b.x - a.x).powi(2) + (b.y - a.y).powi(2);
            if edge_len2 < DEFAULT_TOLERANCE {
                continue;
            }
            let t = |p: Point| ((p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y)) / edge_len2;
            let (mut t0, mut t1) = (t(start), t(end));
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            let lo = t0.max(0.0);
            let hi = t1.min(1.0);
            if lo <= hi + DEFAULT_TOLERANCE && hi >= lo {
                let p_lo = Point::new(a.x + (b.x - a.x) * lo, a.y + (b.y - a.y) * lo);
                let p_hi = Point::new(a.x + (b.x - a.x) * hi, a.y + (b.y - a.y) * hi);
                if start.distance(p_lo) <= start.distance(p_hi) {
                    overlap = Some((p_lo, p_hi));
                } else {
                    overlap = Some((p_hi, p_lo));
                }
            }
            continue;
        }

        if let Some(p) = segment_intersection(start, end, a, b, false) {
            push_unique(&mut points, p, DEFAULT_TOLERANCE);
        }
    }

    if let Some((p1, p2)) = overlap {
        if !almost_equal(p1.x, p2.x, None) || !almost_equal(p1.y, p2.y, None) {
            return RingIntersection::Overlap(p1, p2);
        }
        push_unique(&mut points, p1, DEFAULT_TOLERANCE);
    }

    match points.len() {
        0 => RingIntersection::None,
        1 => RingIntersection::Point(points[0]),
        _ => {
            points.sort_by(|a, b| {
                start
                    .distance(*a)
                    .partial_cmp(&start.distance(*b))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            RingIntersection::Multiple(points)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn wholly_interior_segment_has_no_intersection() {
        let square = unit_square();
        let result = ring_intersection(Point::new(3.0, 3.0), Point::new(6.0, 6.0), &square);
        assert_eq!(result, RingIntersection::None);
    }

    #[test]
    fn segment_crossing_one_edge() {
        let square = unit_square();
        let result = ring_intersection(Point::new(5.0, 5.0), Point::new(5.0, 15.0), &square);
        match result {
            RingIntersection::Point(p) => {
                assert!((p.x - 5.0).abs() < 1e-6);
                assert!((p.y - 10.0).abs() < 1e-6);
            }
            other => panic!("expected a single crossing point, got {other:?}"),
        }
    }

    #[test]
    fn segment_crossing_two_edges() {
        let square = unit_square();
        let result = ring_intersection(Point::new(-5.0, 5.0), Point::new(15.0, 5.0), &square);
        match result {
            RingIntersection::Multiple(points) => assert_eq!(points.len(), 2),
            other => panic!("expected two crossings, got {other:?}"),
        }
    }
}
