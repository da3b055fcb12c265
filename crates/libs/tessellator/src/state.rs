use std::collections::HashMap;

use garment_types::{Point, Segment};
use geometry_core::{point_in_polygon, ring_intersection, PointPosition, RingIntersection};

use crate::algorithm::VertexConfig;
use crate::hashing::{edge_hash, point_hash};

/// The result of one [`crate::Tessellator::generate`] call (§4.1).
#[derive(Debug, Clone)]
pub struct TessellationOutcome {
    /// Every edge recorded during the traversal, already clipped to `bounds`.
    pub edges: Vec<Segment>,
    /// Vertices the traversal actually visited and recursed from.
    pub interior_vertices: Vec<Point>,
    /// Boundary points produced by clipping an edge against `bounds`.
    pub edge_points: Vec<Point>,
    /// `true` if the recursion budget was exhausted before the traversal
    /// reached a natural fixed point; the outcome is then a partial fill.
    pub exceeded_iterations: bool,
}

impl TessellationOutcome {
    pub fn total_length(&self) -> f64 {
        self.edges.iter().map(Segment::length).sum()
    }
}

pub(crate) struct GenerationState {
    iterations_left: i64,
    visited: HashMap<String, Point>,
    edge_points: HashMap<String, Point>,
    network: HashMap<String, Segment>,
    exceeded_iterations: bool,
}

impl GenerationState {
    pub(crate) fn new(maximum_iterations: u32) -> Self {
        GenerationState {
            iterations_left: maximum_iterations as i64,
            visited: HashMap::new(),
            edge_points: HashMap::new(),
            network: HashMap::new(),
            exceeded_iterations: false,
        }
    }

    pub(crate) fn into_outcome(self) -> TessellationOutcome {
        TessellationOutcome {
            edges: self.network.into_values().collect(),
            interior_vertices: self.visited.into_values().collect(),
            edge_points: self.edge_points.into_values().collect(),
            exceeded_iterations: self.exceeded_iterations,
        }
    }

    /// Recursive depth-first traversal of the implicit infinite tiling,
    /// clipped against `bounds` as it goes (§4.1).
    ///
    /// `entry_heading` is the compass heading (degrees) of the edge the
    /// traversal just arrived on; `start_index` is the angle-index that same
    /// edge occupies in this vertex's wedge configuration; `use_mirror`
    /// selects the alternate wedge ordering for tilings with a `mirror` list.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn visit(
        &mut self,
        point: Point,
        entry_heading: f64,
        start_index: usize,
        use_mirror: bool,
        config: &VertexConfig,
        edge_length: f64,
        bounds: &[Point],
    ) {
        if self.iterations_left <= 0 {
            self.exceeded_iterations = true;
            return;
        }
        self.iterations_left -= 1;

        let key = point_hash(point);
        if self.visited.contains_key(&key) {
            return;
        }
        self.visited.insert(key, point);

        let angles = match (use_mirror, config.mirror) {
            (true, Some(mirrored)) => mirrored,
            _ => config.angles,
        };
        let k = angles.len();
        let start_index = start_index % k;

        let mut headings = vec![0.0; k];
        headings[start_index] = entry_heading + 180.0 + angles[start_index];
        for step in 1..k {
            let idx = (start_index + step) % k;
            let prev = (start_index + step - 1) % k;
            headings[idx] = headings[prev] + angles[prev];
        }

        let next_mirror = config.mirror.is_some() && !use_mirror;

        for idx in 0..k {
            let heading = headings[idx];
            let radians = heading.to_radians();
            let new_point = Point::new(
                point.x + edge_length * radians.cos(),
                point.y + edge_length * radians.sin(),
            );

            let point_key = point_hash(point);
            let new_point_key = point_hash(new_point);
            let key = edge_hash(&point_key, &new_point_key);

            if self.network.contains_key(&key) {
                self.visit(
                    new_point,
                    heading,
                    config.next_angle_index[idx],
                    next_mirror,
                    config,
                    edge_length,
                    bounds,
                );
                continue;
            }

            let out_of_bounds =
                self.record_edge(point, new_point, &key, &new_point_key, bounds);

            if out_of_bounds {
                continue;
            }

            self.visit(
                new_point,
                heading,
                config.next_angle_index[idx],
                next_mirror,
                config,
                edge_length,
                bounds,
            );
        }
    }

    /// Clips a candidate edge against `bounds`, recording one or two segments
    /// and any clip points, and reports whether the traversal must stop at
    /// this edge rather than recurse into its far endpoint.
    fn record_edge(
        &mut self,
        point: Point,
        new_point: Point,
        edge_key: &str,
        new_point_key: &str,
        bounds: &[Point],
    ) -> bool {
        match ring_intersection(point, new_point, bounds) {
            RingIntersection::None => {
                if point_in_polygon(new_point, bounds, None) != PointPosition::Inside {
                    log::warn!(
                        "edge from ({:.3}, {:.3}) reported no boundary crossing but its far \
                         endpoint is not interior; recording it unclipped",
                        point.x,
                        point.y
                    );
                }
                self.network
                    .insert(edge_key.to_string(), Segment::new(point, new_point));
                false
            }
            RingIntersection::Point(clip) => {
                self.edge_points.insert(point_hash(clip), clip);
                self.network
                    .insert(edge_key.to_string(), Segment::new(point, clip));
                true
            }
            RingIntersection::Overlap(near, _far) => {
                self.edge_points.insert(point_hash(near), near);
                self.network
                    .insert(edge_key.to_string(), Segment::new(point, near));
                true
            }
            RingIntersection::Multiple(crossings) => {
                let nearest = crossings[0];
                let farthest = *crossings.last().unwrap();
                self.edge_points.insert(point_hash(nearest), nearest);
                self.network
                    .insert(edge_key.to_string(), Segment::new(point, nearest));

                if point_in_polygon(new_point, bounds, None) == PointPosition::Inside {
                    self.edge_points.insert(point_hash(farthest), farthest);
                    let far_key = edge_hash(&point_hash(farthest), new_point_key);
                    self.network
                        .insert(far_key, Segment::new(farthest, new_point));
                    false
                } else {
                    true
                }
            }
        }
    }
}
