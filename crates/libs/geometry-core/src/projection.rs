use garment_types::{Point, Segment};

/// Projects `point` onto segment `(a, b)`, returning the projected point and
/// its clamped parametric position `t ∈ [0, 1]`.
pub fn project_onto_segment(point: Point, a: Point, b: Point) -> (Point, f64) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;
    if len2 < f64::EPSILON {
        return (a, 0.0);
    }
    let t = ((point.x - a.x) * dx + (point.y - a.y) * dy) / len2;
    let t = t.clamp(0.0, 1.0);
    (Point::new(a.x + dx * t, a.y + dy * t), t)
}

/// Interpolates a point at parametric position `t ∈ [0, 1]` along a
/// polyline given by consecutive `points`.
pub fn interpolate_along_polyline(points: &[Point], t: f64) -> Point {
    if points.len() < 2 {
        return points.first().copied().unwrap_or(Point::new(0.0, 0.0));
    }
    let total_length: f64 = points
        .windows(2)
        .map(|pair| pair[0].distance(pair[1]))
        .sum();
    if total_length < f64::EPSILON {
        return points[0];
    }
    let target = t.clamp(0.0, 1.0) * total_length;
    let mut walked = 0.0;
    for pair in points.windows(2) {
        let seg_len = pair[0].distance(pair[1]);
        if walked + seg_len >= target || seg_len < f64::EPSILON {
            let local_t = if seg_len < f64::EPSILON {
                0.0
            } else {
                (target - walked) / seg_len
            };
            let (p, _) = project_onto_segment(
                interpolate_between(pair[0], pair[1], local_t),
                pair[0],
                pair[1],
            );
            return p;
        }
        walked += seg_len;
    }
    *points.last().unwrap()
}

fn interpolate_between(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Projects `point` onto a polyline: the closest point on any of its
/// segments, its parametric position along the *whole* polyline in
/// `[0, 1]`, and the distance from `point` to that projection.
pub fn project_onto_polyline(point: Point, points: &[Point]) -> (f64, f64) {
    if points.len() < 2 {
        return (0.0, f64::INFINITY);
    }
    let total_length: f64 = points
        .windows(2)
        .map(|pair| pair[0].distance(pair[1]))
        .sum();
    if total_length < f64::EPSILON {
        return (0.0, point.distance(points[0]));
    }

    let mut walked = 0.0;
    let mut best_t = 0.0;
    let mut best_dist = f64::INFINITY;
    for pair in points.windows(2) {
        let seg_len = pair[0].distance(pair[1]);
        let (projected, local_t) = project_onto_segment(point, pair[0], pair[1]);
        let dist = point.distance(projected);
        if dist < best_dist {
            best_dist = dist;
            best_t = (walked + local_t * seg_len) / total_length;
        }
        walked += seg_len;
    }
    (best_t, best_dist)
}

/// Convenience wrapper for the common case of projecting onto a single
/// [`Segment`].
pub fn project_onto_segment_struct(point: Point, segment: Segment) -> (Point, f64) {
    project_onto_segment(point, segment.start, segment.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_onto_segment_midpoint() {
        let (p, t) = project_onto_segment(Point::new(5.0, 5.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!((p.y).abs() < 1e-9);
        assert!((t - 0.5).abs() < 1e-9);
    }

    #[test]
    fn interpolate_along_polyline_halfway() {
        let polyline = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let mid = interpolate_along_polyline(&polyline, 0.5);
        assert!((mid.x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn project_onto_polyline_picks_closest_segment() {
        let polyline = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
        let (t, dist) = project_onto_polyline(Point::new(10.0, 5.0), &polyline);
        assert!(dist < 1e-9);
        assert!(t > 0.5);
    }
}
