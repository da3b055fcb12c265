use garment_types::Point;

/// Vertex keys round coordinates to this many decimals (§3: "Vertex key").
pub const PRECISION_DECIMALS: usize = 6;

/// Distance tolerance used everywhere a point must be "close enough" to a
/// segment or another point to count as coincident (§4.2, §4.3).
pub const PRECISION_TOLERANCE: f64 = 1e-3;

fn normalize(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// A vertex key combining `part_id` with rounded coordinates, so the same
/// physical point on two different parts never collides (§3).
pub fn vertex_key(part_id: usize, point: Point) -> String {
    format!(
        "{part_id}#{:.*}_{:.*}",
        PRECISION_DECIMALS,
        normalize(point.x),
        PRECISION_DECIMALS,
        normalize(point.y)
    )
}

/// Canonical, direction-independent edge key built from two vertex keys.
pub fn edge_key(a: &str, b: &str) -> (String, String) {
    if b < a {
        (b.to_string(), a.to_string())
    } else {
        (a.to_string(), b.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_different_parts_hash_differently() {
        let p = Point::new(1.0, 2.0);
        assert_ne!(vertex_key(0, p), vertex_key(1, p));
    }

    #[test]
    fn edge_key_is_order_independent() {
        let a = vertex_key(0, Point::new(1.0, 2.0));
        let b = vertex_key(0, Point::new(3.0, 4.0));
        assert_eq!(edge_key(&a, &b), edge_key(&b, &a));
    }
}
