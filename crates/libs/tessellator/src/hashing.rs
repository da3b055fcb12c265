use garment_types::Point;

pub const PRECISION_DECIMALS: usize = 6;

/// Rounds away negative zero so `-0.0` and `0.0` hash identically.
fn normalize(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// A string key identifying a vertex by its rounded coordinates (§3: vertex
/// key, without the `part_id` component — that is layered on by whatever
/// combines several parts' tessellations into one graph).
pub fn point_hash(point: Point) -> String {
    format!(
        "{:.*}_{:.*}",
        PRECISION_DECIMALS,
        normalize(point.x),
        PRECISION_DECIMALS,
        normalize(point.y)
    )
}

/// A symmetric edge key: the two vertex keys joined in a canonical order so
/// that the edge hashes the same regardless of traversal direction.
pub fn edge_hash(a: &str, b: &str) -> String {
    if b < a {
        format!("{b}|{a}")
    } else {
        format!("{a}|{b}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_hash_ignores_negative_zero() {
        assert_eq!(point_hash(Point::new(-0.0, 0.0)), point_hash(Point::new(0.0, -0.0)));
    }

    #[test]
    fn edge_hash_is_direction_independent() {
        let a = point_hash(Point::new(1.0, 2.0));
        let b = point_hash(Point::new(3.0, 4.0));
        assert_eq!(edge_hash(&a, &b), edge_hash(&b, &a));
    }
}
