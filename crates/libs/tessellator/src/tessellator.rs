use garment_types::Point;
use geometry_core::{point_in_polygon, polygon_area, PointPosition};

use crate::algorithm::{vertex_config, Algorithm};
use crate::error::TessellatorError;
use crate::state::{GenerationState, TessellationOutcome};

const DEFAULT_MAXIMUM_ITERATIONS: u32 = 20_000;

/// Fills a polygon with one of the 13 named tilings (§4.1).
///
/// A `Tessellator` is immutable configuration; [`Tessellator::generate`] can
/// be called repeatedly with different seeds.
pub struct Tessellator {
    algorithm: Algorithm,
    edge_length: f64,
    bounds: Vec<Point>,
    maximum_iterations: u32,
}

impl Tessellator {
    pub fn new(
        algorithm: Algorithm,
        edge_length: f64,
        bounds: Vec<Point>,
        maximum_iterations: Option<u32>,
    ) -> Result<Self, TessellatorError> {
        if !edge_length.is_finite() || edge_length <= 0.0 {
            return Err(TessellatorError::InvalidGeometry(
                "edge_length must be a positive finite number".to_string(),
            ));
        }
        if bounds.len() < 3 {
            return Err(TessellatorError::InvalidGeometry(
                "bounds must have at least 3 points".to_string(),
            ));
        }
        if polygon_area(&bounds).abs() <= f64::EPSILON {
            return Err(TessellatorError::InvalidGeometry(
                "bounds must enclose positive area".to_string(),
            ));
        }

        Ok(Tessellator {
            algorithm,
            edge_length,
            bounds,
            maximum_iterations: maximum_iterations.unwrap_or(DEFAULT_MAXIMUM_ITERATIONS),
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Runs the depth-first fill starting from `seed`, which must lie
    /// strictly inside `bounds`. `initial_angle` (degrees) orients the first
    /// wedge arbitrarily; any value produces a valid, merely rotated, fill.
    pub fn generate(
        &self,
        seed: Point,
        initial_angle: f64,
    ) -> Result<TessellationOutcome, TessellatorError> {
        if point_in_polygon(seed, &self.bounds, None) != PointPosition::Inside {
            return Err(TessellatorError::InvalidGeometry(
                "seed must lie strictly inside bounds".to_string(),
            ));
        }

        let config = vertex_config(self.algorithm);
        let mut state = GenerationState::new(self.maximum_iterations);
        state.visit(
            seed,
            initial_angle - 180.0,
            0,
            false,
            &config,
            self.edge_length,
            &self.bounds,
        );

        let outcome = state.into_outcome();
        if outcome.exceeded_iterations {
            log::warn!(
                "{} tessellation on a {}-point boundary hit its iteration budget of {}; \
                 result is a partial fill",
                self.algorithm,
                self.bounds.len(),
                self.maximum_iterations
            );
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square(scale: f64) -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(scale, 0.0),
            Point::new(scale, scale),
            Point::new(0.0, scale),
        ]
    }

    #[test]
    fn rejects_non_positive_edge_length() {
        let result = Tessellator::new(Algorithm::Square, 0.0, unit_square(10.0), None);
        assert!(matches!(result, Err(TessellatorError::InvalidGeometry(_))));
    }

    #[test]
    fn rejects_degenerate_bounds() {
        let result = Tessellator::new(
            Algorithm::Square,
            1.0,
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
            None,
        );
        assert!(matches!(result, Err(TessellatorError::InvalidGeometry(_))));
    }

    #[test]
    fn rejects_seed_outside_bounds() {
        let tessellator = Tessellator::new(Algorithm::Square, 1.0, unit_square(10.0), None).unwrap();
        let result = tessellator.generate(Point::new(50.0, 50.0), 0.0);
        assert!(matches!(result, Err(TessellatorError::InvalidGeometry(_))));
    }

    #[test]
    fn square_tiling_fills_a_square_boundary() {
        let tessellator = Tessellator::new(Algorithm::Square, 2.0, unit_square(10.0), None).unwrap();
        let outcome = tessellator.generate(Point::new(5.0, 5.0), 0.0).unwrap();
        assert!(!outcome.edges.is_empty());
        assert!(outcome.interior_vertices.len() > 1);
        assert!(!outcome.exceeded_iterations);
        assert!(outcome.total_length() > 0.0);
    }

    #[test]
    fn hexagonal_tiling_terminates_within_a_small_boundary() {
        let tessellator = Tessellator::new(Algorithm::Hexagonal, 3.0, unit_square(12.0), None).unwrap();
        let outcome = tessellator.generate(Point::new(6.0, 6.0), 0.0).unwrap();
        assert!(!outcome.edges.is_empty());
    }

    #[test]
    fn iteration_budget_is_honoured() {
        let tessellator =
            Tessellator::new(Algorithm::Triangular, 0.5, unit_square(50.0), Some(5)).unwrap();
        let outcome = tessellator.generate(Point::new(25.0, 25.0), 0.0).unwrap();
        assert!(outcome.exceeded_iterations);
    }
}
