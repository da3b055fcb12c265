use std::collections::{HashSet, VecDeque};

use garment_types::Point;
use geometry_core::project_onto_segment;

use crate::error::ExperimentError;
use crate::graph::{EdgeEntry, EdgeKind, Graph, RouteRecord};

/// Which of the two parallel trees a queue item belongs to (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tree {
    ShortestWire,
    FewestJumpers,
}

struct QueueItem {
    key: String,
    tree: Tree,
}

/// The result of seeding the routing engine: the two endpoints of the
/// sink's closest interior edge and the sink's projection onto it.
pub struct SinkAnchor {
    pub endpoint_a: String,
    pub endpoint_b: String,
    pub projection: Point,
}

/// Computes the shortest-wire and fewest-jumpers single-source trees from
/// one sink sample (§4.4). Mutates `graph`'s route records in place; callers
/// must have cleared them (e.g. via [`Graph::reset_routes`]) beforehand —
/// `run` does this itself.
pub struct RoutingEngine;

impl RoutingEngine {
    pub fn run(
        graph: &mut Graph,
        sink_part_id: usize,
        sink_point: Point,
    ) -> Result<SinkAnchor, ExperimentError> {
        graph.reset_routes();

        let (endpoint_a, endpoint_b, projection) =
            closest_interior_edge(graph, sink_part_id, sink_point)
                .ok_or(ExperimentError::NoSuchSegment { part_id: sink_part_id })?;

        let point_a = graph.vertices[&endpoint_a].point;
        let point_b = graph.vertices[&endpoint_b].point;
        let dist_a = point_a.distance(projection) + sink_point.distance(projection);
        let dist_b = point_b.distance(projection) + sink_point.distance(projection);

        let mut queue: VecDeque<QueueItem> = VecDeque::new();

        for (key, dist) in [(&endpoint_a, dist_a), (&endpoint_b, dist_b)] {
            graph.vertices.get_mut(key).unwrap().route_shortest = Some(RouteRecord {
                jumper_count: 0,
                distance: dist,
                node_count: 1,
                jumper_exclusion: None,
                previous: None,
                is_leaf: false,
                outgoing_branches: 0,
            });
            queue.push_back(QueueItem { key: key.clone(), tree: Tree::ShortestWire });

            graph.vertices.get_mut(key).unwrap().route_least_jumpers = Some(RouteRecord {
                jumper_count: 0,
                distance: dist,
                node_count: 1,
                jumper_exclusion: Some(vec![sink_part_id]),
                previous: None,
                is_leaf: false,
                outgoing_branches: 0,
            });
            queue.push_back(QueueItem { key: key.clone(), tree: Tree::FewestJumpers });
        }

        while let Some(item) = queue.pop_front() {
            Self::relax(graph, &mut queue, &item);
        }

        Ok(SinkAnchor { endpoint_a, endpoint_b, projection })
    }

    fn relax(graph: &mut Graph, queue: &mut VecDeque<QueueItem>, item: &QueueItem) {
        let current = match item.tree {
            Tree::ShortestWire => graph.vertices[&item.key].route_shortest.clone(),
            Tree::FewestJumpers => graph.vertices[&item.key].route_least_jumpers.clone(),
        };
        let Some(current) = current else { return };

        let neighbors: Vec<(String, EdgeEntry)> = graph
            .edges
            .get(&item.key)
            .map(|m| m.iter().map(|(k, v)| (k.clone(), *v)).collect())
            .unwrap_or_default();

        let mut relaxed_any = false;

        for (neighbor_key, edge) in neighbors {
            if item.tree == Tree::FewestJumpers && edge.kind == EdgeKind::Jumper {
                let neighbor_part = graph.vertices[&neighbor_key].part_id;
                if current
                    .jumper_exclusion
                    .as_ref()
                    .is_some_and(|excluded| excluded.contains(&neighbor_part))
                {
                    continue;
                }
            }

            let candidate_distance = current.distance + edge.length;
            let candidate_jumper_count =
                current.jumper_count + usize::from(edge.kind == EdgeKind::Jumper);
            let candidate_node_count = current.node_count + 1;

            let existing = match item.tree {
                Tree::ShortestWire => &graph.vertices[&neighbor_key].route_shortest,
                Tree::FewestJumpers => &graph.vertices[&neighbor_key].route_least_jumpers,
            };
            let improves = existing
                .as_ref()
                .map(|record| candidate_distance < record.distance)
                .unwrap_or(true);
            if !improves {
                continue;
            }

            let candidate_exclusion = match item.tree {
                Tree::ShortestWire => None,
                Tree::FewestJumpers => {
                    let mut exclusion = current.jumper_exclusion.clone().unwrap_or_default();
                    if edge.kind == EdgeKind::Jumper {
                        let neighbor_part = graph.vertices[&neighbor_key].part_id;
                        exclusion.push(neighbor_part);
                    }
                    Some(exclusion)
                }
            };

            let new_record = RouteRecord {
                jumper_count: candidate_jumper_count,
                distance: candidate_distance,
                node_count: candidate_node_count,
                jumper_exclusion: candidate_exclusion,
                previous: Some(item.key.clone()),
                is_leaf: false,
                outgoing_branches: 0,
            };

            let neighbor = graph.vertices.get_mut(&neighbor_key).unwrap();
            match item.tree {
                Tree::ShortestWire => neighbor.route_shortest = Some(new_record),
                Tree::FewestJumpers => neighbor.route_least_jumpers = Some(new_record),
            }

            let current_record = match item.tree {
                Tree::ShortestWire => &mut graph.vertices.get_mut(&item.key).unwrap().route_shortest,
                Tree::FewestJumpers => {
                    &mut graph.vertices.get_mut(&item.key).unwrap().route_least_jumpers
                }
            };
            if let Some(record) = current_record {
                record.outgoing_branches += 1;
            }

            relaxed_any = true;
            queue.push_back(QueueItem { key: neighbor_key, tree: item.tree });
        }

        let current_mut = match item.tree {
            Tree::ShortestWire => &mut graph.vertices.get_mut(&item.key).unwrap().route_shortest,
            Tree::FewestJumpers => {
                &mut graph.vertices.get_mut(&item.key).unwrap().route_least_jumpers
            }
        };
        if let Some(record) = current_mut {
            record.is_leaf = !relaxed_any;
        }
    }
}

/// Finds the interior edge of `part_id` closest to `point`, returning its
/// two endpoint keys (sorted) and the projection of `point` onto it.
pub(crate) fn closest_interior_edge(
    graph: &Graph,
    part_id: usize,
    point: Point,
) -> Option<(String, String, Point)> {
    let mut seen = HashSet::new();
    let mut best: Option<(String, String, Point, f64)> = None;

    for (from_key, neighbors) in &graph.edges {
        let from_record = &graph.vertices[from_key];
        if from_record.part_id != part_id {
            continue;
        }
        for (to_key, edge) in neighbors {
            if edge.kind != EdgeKind::Interior {
                continue;
            }
            let to_record = &graph.vertices[to_key];
            if to_record.part_id != part_id {
                continue;
            }
            let canonical = if to_key < from_key {
                (to_key.clone(), from_key.clone())
            } else {
                (from_key.clone(), to_key.clone())
            };
            if !seen.insert(canonical.clone()) {
                continue;
            }
            let (projected, _t) = project_onto_segment(point, from_record.point, to_record.point);
            let distance = point.distance(projected);
            if best.as_ref().map(|(.., best_dist)| distance < *best_dist).unwrap_or(true) {
                best = Some((canonical.0, canonical.1, projected, distance));
            }
        }
    }

    best.map(|(a, b, p, _)| (a, b, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use garment_types::Segment;
    use tessellator::TessellationOutcome;

    fn grid_outcome() -> TessellationOutcome {
        let points: Vec<Point> = (0..4).map(|i| Point::new(i as f64 * 10.0, 0.0)).collect();
        TessellationOutcome {
            edges: points
                .windows(2)
                .map(|pair| Segment::new(pair[0], pair[1]))
                .collect(),
            interior_vertices: points,
            edge_points: vec![],
            exceeded_iterations: false,
        }
    }

    #[test]
    fn every_vertex_on_a_simple_line_is_reachable() {
        let outcomes = vec![grid_outcome()];
        let mut graph = Graph::from_tessellations(&outcomes);
        RoutingEngine::run(&mut graph, 0, Point::new(0.0, 0.0)).unwrap();

        for vertex in graph.vertices.values() {
            assert!(vertex.route_shortest.is_some());
            assert!(vertex.route_least_jumpers.is_some());
        }
    }

    #[test]
    fn distances_increase_monotonically_away_from_the_sink() {
        let outcomes = vec![grid_outcome()];
        let mut graph = Graph::from_tessellations(&outcomes);
        RoutingEngine::run(&mut graph, 0, Point::new(0.0, 0.0)).unwrap();

        let far_key = crate::keying::vertex_key(0, Point::new(30.0, 0.0));
        let near_key = crate::keying::vertex_key(0, Point::new(10.0, 0.0));
        let far_distance = graph.vertices[&far_key].route_shortest.as_ref().unwrap().distance;
        let near_distance = graph.vertices[&near_key].route_shortest.as_ref().unwrap().distance;
        assert!(far_distance > near_distance);
    }
}
