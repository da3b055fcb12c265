use garment_types::{Point, Rect};

use crate::constants::DEFAULT_TOLERANCE;

/// Returns `true` if `a` and `b` are approximately equal within `tolerance`
/// (default `DEFAULT_TOLERANCE`).
pub fn almost_equal(a: f64, b: f64, tolerance: Option<f64>) -> bool {
    let tol = tolerance.unwrap_or(DEFAULT_TOLERANCE);
    (a - b).abs() <= tol
}

/// Returns `true` if `p` and `q` are within `tolerance` of each other.
pub fn points_almost_equal(p: Point, q: Point, tolerance: Option<f64>) -> bool {
    let tol = tolerance.unwrap_or(DEFAULT_TOLERANCE);
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    (dx * dx + dy * dy) < (tol * tol)
}

/// Returns `true` if `val` lies between `a` and `b`, inclusive within
/// tolerance.
pub fn in_range(val: f64, a: f64, b: f64, tolerance: Option<f64>) -> bool {
    let tol = tolerance.unwrap_or(DEFAULT_TOLERANCE);
    let (min_val, max_val) = if a < b { (a, b) } else { (b, a) };
    val >= min_val - tol && val <= max_val + tol
}

/// The shoelace formula, using the same `j = i-1` iteration order as the
/// reference implementation so that repeated floating point sums agree.
pub fn polygon_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let j = if i == 0 { n - 1 } else { i - 1 };
        area += (points[j].x + points[i].x) * (points[j].y - points[i].y);
    }
    0.5 * area
}

/// The axis-aligned bounding box of a point list, or `None` for fewer than
/// 3 points.
pub fn polygon_bounds(points: &[Point]) -> Option<Rect> {
    if points.len() < 3 {
        return None;
    }
    let first = points[0];
    let (min_x, max_x, min_y, max_y) = points.iter().skip(1).fold(
        (first.x, first.x, first.y, first.y),
        |(min_x, max_x, min_y, max_y), p| {
            (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
        },
    );
    Some(Rect {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    })
}

/// Returns `true` if `p` lies strictly on segment `(a, b)`, excluding the
/// endpoints.
pub fn on_segment(a: Point, b: Point, p: Point, tolerance: Option<f64>) -> bool {
    let tol = tolerance.unwrap_or(DEFAULT_TOLERANCE);
    if (almost_equal(p.x, a.x, Some(tol)) && almost_equal(p.y, a.y, Some(tol)))
        || (almost_equal(p.x, b.x, Some(tol)) && almost_equal(p.y, b.y, Some(tol)))
    {
        return false;
    }

    let (min_x, max_x) = if a.x < b.x { (a.x, b.x) } else { (b.x, a.x) };
    let (min_y, max_y) = if a.y < b.y { (a.y, b.y) } else { (b.y, a.y) };
    if p.x < min_x - tol || p.x > max_x + tol || p.y < min_y - tol || p.y > max_y + tol {
        return false;
    }

    let cross = (p.y - a.y) * (b.x - a.x) - (p.x - a.x) * (b.y - a.y);
    if cross.abs() > tol {
        return false;
    }

    let dot = (p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y);
    if dot <= tol {
        return false;
    }
    let len2 = (b.x - a.x).powi(2) + (b.y - a.y).powi(2);
    if dot >= len2 - tol {
        return false;
    }

    true
}

/// Computes the intersection of line `ab` with line `ef`. If `infinite` is
/// `true` the lines are treated as infinite; otherwise the intersection
/// must lie within both finite segments (within tolerance).
pub fn segment_intersection(a: Point, b: Point, e: Point, f: Point, infinite: bool) -> Option<Point> {
    let a1 = b.y - a.y;
    let b1 = a.x - b.x;
    let c1 = b.x * a.y - a.x * b.y;

    let a2 = f.y - e.y;
    let b2 = e.x - f.x;
    let c2 = f.x * e.y - e.x * f.y;

    let denom = a1 * b2 - a2 * b1;
    if denom.abs() < DEFAULT_TOLERANCE {
        return None;
    }

    let x = (b1 * c2 - b2 * c1) / denom;
    let y = (a2 * c1 - a1 * c2) / denom;
    if !x.is_finite() || !y.is_finite() {
        return None;
    }

    let intersection = Point::new(x, y);
    if !infinite {
        if !in_range(x, a.x, b.x, None) || !in_range(y, a.y, b.y, None) {
            return None;
        }
        if !in_range(x, e.x, f.x, None) || !in_range(y, e.y, f.y, None) {
            return None;
        }
    }
    Some(intersection)
}

/// Where a point sits relative to a polygon: strictly inside, strictly
/// outside, or on its boundary (on an edge or coincident with a vertex,
/// within tolerance).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointPosition {
    Inside,
    Outside,
    OnBoundary,
}

/// Ray-casting point-in-polygon test, closed outline assumed (`points`
/// implicitly closes from the last point back to the first).
pub fn point_in_polygon(point: Point, points: &[Point], tolerance: Option<f64>) -> PointPosition {
    if points.len() < 3 {
        return PointPosition::Outside;
    }
    let tol = tolerance.unwrap_or(DEFAULT_TOLERANCE);
    let mut inside = false;
    let n = points.len();

    for i in 0..n {
        let j = if i == 0 { n - 1 } else { i - 1 };
        let (xi, yi) = (points[i].x, points[i].y);
        let (xj, yj) = (points[j].x, points[j].y);

        if almost_equal(xi, point.x, Some(tol)) && almost_equal(yi, point.y, Some(tol)) {
            return PointPosition::OnBoundary;
        }

        if on_segment(Point::new(xi, yi), Point::new(xj, yj), point, Some(tol)) {
            return PointPosition::OnBoundary;
        }

        if almost_equal(xi, xj, Some(tol)) && almost_equal(yi, yj, Some(tol)) {
            continue;
        }

        let crosses = (yi > point.y) != (yj > point.y);
        if crosses {
            let intersect_x = ((xj - xi) * (point.y - yi) / (yj - yi)) + xi;
            if point.x < intersect_x {
                inside = !inside;
            }
        }
    }

    if inside {
        PointPosition::Inside
    } else {
        PointPosition::Outside
    }
}
