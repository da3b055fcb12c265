//! Geometry primitives (§4.0 of SPEC_FULL.md): point-in-polygon, segment
//! intersection, ring intersection for the tessellator, and polyline
//! projection for joint/segment resolution.

pub mod constants;
pub mod primitives;
pub mod projection;
pub mod ring;

pub use constants::DEFAULT_TOLERANCE;
pub use primitives::{
    almost_equal, in_range, on_segment, point_in_polygon, points_almost_equal, polygon_area,
    polygon_bounds, segment_intersection, PointPosition,
};
pub use projection::{
    interpolate_along_polyline, project_onto_polyline, project_onto_segment,
    project_onto_segment_struct,
};
pub use ring::{ring_intersection, RingIntersection};
