use std::collections::HashSet;

use garment_types::Point;

use crate::error::ExperimentError;
use crate::graph::{EdgeKind, Graph, RouteRecord};
use crate::routing::closest_interior_edge;

/// Which tree a lookup or accumulation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tree {
    ShortestWire,
    FewestJumpers,
}

fn route_of<'a>(graph: &'a Graph, tree: Tree, key: &str) -> Option<&'a RouteRecord> {
    let vertex = graph.vertices.get(key)?;
    match tree {
        Tree::ShortestWire => vertex.route_shortest.as_ref(),
        Tree::FewestJumpers => vertex.route_least_jumpers.as_ref(),
    }
}

/// Max/average leaf statistics for one tree over one sink sample (§6.3
/// columns 9–14 / 15–20).
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeDepthStats {
    pub max_distance: f64,
    pub avg_distance: f64,
    pub max_node_count: f64,
    pub avg_node_count: f64,
    pub max_jumper_count: f64,
    pub avg_jumper_count: f64,
}

impl TreeDepthStats {
    fn from_leaves(leaves: &[&RouteRecord]) -> Self {
        if leaves.is_empty() {
            return TreeDepthStats::default();
        }
        let n = leaves.len() as f64;
        let max_distance = leaves.iter().map(|r| r.distance).fold(f64::MIN, f64::max);
        let avg_distance = leaves.iter().map(|r| r.distance).sum::<f64>() / n;
        let max_node_count = leaves.iter().map(|r| r.node_count as f64).fold(f64::MIN, f64::max);
        let avg_node_count = leaves.iter().map(|r| r.node_count as f64).sum::<f64>() / n;
        let max_jumper_count = leaves.iter().map(|r| r.jumper_count as f64).fold(f64::MIN, f64::max);
        let avg_jumper_count = leaves.iter().map(|r| r.jumper_count as f64).sum::<f64>() / n;
        TreeDepthStats {
            max_distance,
            avg_distance,
            max_node_count,
            avg_node_count,
            max_jumper_count,
            avg_jumper_count,
        }
    }
}

/// One `np_tres` row: the per-sink summary (§6.3).
#[derive(Debug, Clone)]
pub struct SinkTrialRow {
    pub source_id: usize,
    pub reachable_vertices: usize,
    pub unreachable_vertices: usize,
    pub reachable_wire_length: f64,
    pub unreachable_wire_length: f64,
    pub reachable_jumper_length: f64,
    pub unreachable_jumper_length: f64,
    pub reachable_jumper_count: usize,
    pub unreachable_jumper_count: usize,
    pub shortest_depth: TreeDepthStats,
    pub fewest_jumpers_depth: TreeDepthStats,
    pub fraction_nodes_visited_shortest: f64,
    pub fraction_nodes_visited_fewest_jumpers: f64,
    pub fraction_branching_visited_shortest: f64,
    pub fraction_branching_visited_fewest_jumpers: f64,
    pub fraction_jumpers_visited_shortest: f64,
    pub fraction_jumpers_visited_fewest_jumpers: f64,
    pub fraction_jumper_length_visited_shortest: f64,
    pub fraction_jumper_length_visited_fewest_jumpers: f64,
}

/// One `np_res` row: the per-sensor-sample summary (§6.3).
#[derive(Debug, Clone)]
pub struct SensorSampleRow {
    pub source_id: usize,
    pub destination_id: usize,
    pub reachable_shortest: bool,
    pub reachable_fewest_jumpers: bool,
    pub unreachable_short_jumper_shortest: bool,
    pub unreachable_short_jumper_fewest_jumpers: bool,
    pub total_length_shortest: f64,
    pub total_length_fewest_jumpers: f64,
    pub stub_length_shortest: f64,
    pub stub_length_fewest_jumpers: f64,
    pub jumper_count_shortest: usize,
    pub jumper_count_fewest_jumpers: usize,
    pub node_count_shortest: usize,
    pub node_count_fewest_jumpers: usize,
    pub novel_length_shortest: f64,
    pub novel_length_fewest_jumpers: f64,
}

/// Tracks which vertices/jumpers have already contributed "novel length"
/// within one sink sample, across its sensor samples (§4.5).
pub struct SinkAccounting {
    visited_vertices: [HashSet<String>; 2],
    visited_jumpers: [HashSet<(String, String)>; 2],
}

impl SinkAccounting {
    pub fn new() -> Self {
        SinkAccounting {
            visited_vertices: [HashSet::new(), HashSet::new()],
            visited_jumpers: [HashSet::new(), HashSet::new()],
        }
    }

    fn slot(tree: Tree) -> usize {
        match tree {
            Tree::ShortestWire => 0,
            Tree::FewestJumpers => 1,
        }
    }

    /// Builds the per-sink summary row; fails with `GraphInconsistency` if
    /// the two trees disagree on which vertices are reachable (§4.5,
    /// invariant 4).
    pub fn summarize_sink(
        &self,
        graph: &Graph,
        source_id: usize,
    ) -> Result<SinkTrialRow, ExperimentError> {
        let total_vertices = graph.vertex_count();

        let shortest_reachable: HashSet<&String> = graph
            .vertices
            .iter()
            .filter(|(_, v)| v.route_shortest.is_some())
            .map(|(k, _)| k)
            .collect();
        let fewest_reachable: HashSet<&String> = graph
            .vertices
            .iter()
            .filter(|(_, v)| v.route_least_jumpers.is_some())
            .map(|(k, _)| k)
            .collect();

        if shortest_reachable != fewest_reachable {
            log::error!(
                "reachability parity violated: {} vertices reachable by shortest-wire, {} by \
                 fewest-jumpers",
                shortest_reachable.len(),
                fewest_reachable.len()
            );
            return Err(ExperimentError::GraphInconsistency {
                expected: shortest_reachable.len(),
                found: fewest_reachable.len(),
            });
        }

        let reachable_vertices = shortest_reachable.len();
        let unreachable_vertices = total_vertices - reachable_vertices;

        let (reachable_wire_length, unreachable_wire_length) =
            self.interior_length_split(graph, &shortest_reachable);
        let (reachable_jumper_length, unreachable_jumper_length, reachable_jumper_count, unreachable_jumper_count) =
            self.jumper_split(graph, &shortest_reachable);

        let shortest_leaves: Vec<&RouteRecord> = graph
            .vertices
            .values()
            .filter_map(|v| v.route_shortest.as_ref())
            .filter(|r| r.is_leaf)
            .collect();
        let fewest_leaves: Vec<&RouteRecord> = graph
            .vertices
            .values()
            .filter_map(|v| v.route_least_jumpers.as_ref())
            .filter(|r| r.is_leaf)
            .collect();

        let shortest_depth = TreeDepthStats::from_leaves(&shortest_leaves);
        let fewest_jumpers_depth = TreeDepthStats::from_leaves(&fewest_leaves);

        let visited_shortest = &self.visited_vertices[Self::slot(Tree::ShortestWire)];
        let visited_fewest = &self.visited_vertices[Self::slot(Tree::FewestJumpers)];
        let fraction_nodes_visited_shortest = fraction(visited_shortest.len(), reachable_vertices);
        let fraction_nodes_visited_fewest_jumpers = fraction(visited_fewest.len(), reachable_vertices);

        let branching_shortest = graph
            .vertices
            .values()
            .filter_map(|v| v.route_shortest.as_ref())
            .filter(|r| r.outgoing_branches >= 2)
            .count();
        let branching_fewest = graph
            .vertices
            .values()
            .filter_map(|v| v.route_least_jumpers.as_ref())
            .filter(|r| r.outgoing_branches >= 2)
            .count();
        let fraction_branching_visited_shortest = fraction(branching_shortest, reachable_vertices);
        let fraction_branching_visited_fewest_jumpers = fraction(branching_fewest, reachable_vertices);

        let total_jumpers = graph.total_jumper_count();
        let total_jumper_length = graph.total_jumper_length();
        let visited_jumpers_shortest = &self.visited_jumpers[Self::slot(Tree::ShortestWire)];
        let visited_jumpers_fewest = &self.visited_jumpers[Self::slot(Tree::FewestJumpers)];
        let fraction_jumpers_visited_shortest = fraction(visited_jumpers_shortest.len(), total_jumpers);
        let fraction_jumpers_visited_fewest_jumpers = fraction(visited_jumpers_fewest.len(), total_jumpers);

        let visited_jumper_length = |visited: &HashSet<(String, String)>| -> f64 {
            visited
                .iter()
                .filter_map(|pair| graph.jumpers.get(pair))
                .map(|(_, _, length)| *length)
                .sum()
        };
        let fraction_jumper_length_visited_shortest =
            fraction_f64(visited_jumper_length(visited_jumpers_shortest), total_jumper_length);
        let fraction_jumper_length_visited_fewest_jumpers =
            fraction_f64(visited_jumper_length(visited_jumpers_fewest), total_jumper_length);

        Ok(SinkTrialRow {
            source_id,
            reachable_vertices,
            unreachable_vertices,
            reachable_wire_length,
            unreachable_wire_length,
            reachable_jumper_length,
            unreachable_jumper_length,
            reachable_jumper_count,
            unreachable_jumper_count,
            shortest_depth,
            fewest_jumpers_depth,
            fraction_nodes_visited_shortest,
            fraction_nodes_visited_fewest_jumpers,
            fraction_branching_visited_shortest,
            fraction_branching_visited_fewest_jumpers,
            fraction_jumpers_visited_shortest,
            fraction_jumpers_visited_fewest_jumpers,
            fraction_jumper_length_visited_shortest,
            fraction_jumper_length_visited_fewest_jumpers,
        })
    }

    fn interior_length_split(&self, graph: &Graph, reachable: &HashSet<&String>) -> (f64, f64) {
        let mut reachable_len = 0.0;
        let mut unreachable_len = 0.0;
        let mut seen = HashSet::new();
        for (from, neighbors) in &graph.edges {
            for (to, entry) in neighbors {
                if entry.kind != EdgeKind::Interior {
                    continue;
                }
                let canonical = if to < from {
                    (to.clone(), from.clone())
                } else {
                    (from.clone(), to.clone())
                };
                if !seen.insert(canonical) {
                    continue;
                }
                if reachable.contains(from) && reachable.contains(to) {
                    reachable_len += entry.length;
                } else {
                    unreachable_len += entry.length;
                }
            }
        }
        (reachable_len, unreachable_len)
    }

    fn jumper_split(&self, graph: &Graph, reachable: &HashSet<&String>) -> (f64, f64, usize, usize) {
        let mut reachable_len = 0.0;
        let mut unreachable_len = 0.0;
        let mut reachable_count = 0;
        let mut unreachable_count = 0;
        for ((a, b), (_, _, length)) in &graph.jumpers {
            if reachable.contains(a) && reachable.contains(b) {
                reachable_len += length;
                reachable_count += 1;
            } else {
                unreachable_len += length;
                unreachable_count += 1;
            }
        }
        (reachable_len, unreachable_len, reachable_count, unreachable_count)
    }

    /// Samples one sensor location, producing its `np_res` row and updating
    /// the visited-vertex/jumper state used for subsequent novel-length
    /// contributions within this sink sample (§4.5).
    #[allow(clippy::too_many_arguments)]
    pub fn sample_sensor(
        &mut self,
        graph: &Graph,
        source_id: usize,
        destination_id: usize,
        sensor_part: usize,
        sensor_point: Point,
        joint_radius: f64,
    ) -> SensorSampleRow {
        let closest = closest_interior_edge(graph, sensor_part, sensor_point);
        let Some((endpoint_a, endpoint_b, projection)) = closest else {
            return SensorSampleRow {
                source_id,
                destination_id,
                reachable_shortest: false,
                reachable_fewest_jumpers: false,
                unreachable_short_jumper_shortest: true,
                unreachable_short_jumper_fewest_jumpers: true,
                total_length_shortest: 0.0,
                total_length_fewest_jumpers: 0.0,
                stub_length_shortest: 0.0,
                stub_length_fewest_jumpers: 0.0,
                jumper_count_shortest: 0,
                jumper_count_fewest_jumpers: 0,
                node_count_shortest: 0,
                node_count_fewest_jumpers: 0,
                novel_length_shortest: 0.0,
                novel_length_fewest_jumpers: 0.0,
            };
        };

        let stub_length = sensor_point.distance(projection);
        if stub_length > joint_radius {
            return SensorSampleRow {
                source_id,
                destination_id,
                reachable_shortest: false,
                reachable_fewest_jumpers: false,
                unreachable_short_jumper_shortest: true,
                unreachable_short_jumper_fewest_jumpers: true,
                total_length_shortest: 0.0,
                total_length_fewest_jumpers: 0.0,
                stub_length_shortest: stub_length,
                stub_length_fewest_jumpers: stub_length,
                jumper_count_shortest: 0,
                jumper_count_fewest_jumpers: 0,
                node_count_shortest: 0,
                node_count_fewest_jumpers: 0,
                novel_length_shortest: 0.0,
                novel_length_fewest_jumpers: 0.0,
            };
        }

        let (shortest_reachable, shortest_endpoint, shortest_total) =
            self.best_endpoint(graph, Tree::ShortestWire, &endpoint_a, &endpoint_b, projection, sensor_point);
        let (fewest_reachable, fewest_endpoint, fewest_total) =
            self.best_endpoint(graph, Tree::FewestJumpers, &endpoint_a, &endpoint_b, projection, sensor_point);

        let (jumper_count_shortest, node_count_shortest, novel_length_shortest) = if shortest_reachable {
            let key = shortest_endpoint.unwrap();
            let record = route_of(graph, Tree::ShortestWire, &key).unwrap();
            let novel = self.novel_length_contribution(graph, Tree::ShortestWire, &key, record.distance);
            (record.jumper_count, record.node_count, novel)
        } else {
            (0, 0, 0.0)
        };

        let (jumper_count_fewest, node_count_fewest, novel_length_fewest) = if fewest_reachable {
            let key = fewest_endpoint.unwrap();
            let record = route_of(graph, Tree::FewestJumpers, &key).unwrap();
            let novel = self.novel_length_contribution(graph, Tree::FewestJumpers, &key, record.distance);
            (record.jumper_count, record.node_count, novel)
        } else {
            (0, 0, 0.0)
        };

        SensorSampleRow {
            source_id,
            destination_id,
            reachable_shortest: shortest_reachable,
            reachable_fewest_jumpers: fewest_reachable,
            unreachable_short_jumper_shortest: false,
            unreachable_short_jumper_fewest_jumpers: false,
            total_length_shortest: shortest_total,
            total_length_fewest_jumpers: fewest_total,
            stub_length_shortest: stub_length,
            stub_length_fewest_jumpers: stub_length,
            jumper_count_shortest,
            jumper_count_fewest_jumpers: jumper_count_fewest,
            node_count_shortest,
            node_count_fewest_jumpers: node_count_fewest,
            novel_length_shortest,
            novel_length_fewest_jumpers: novel_length_fewest,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn best_endpoint(
        &self,
        graph: &Graph,
        tree: Tree,
        endpoint_a: &str,
        endpoint_b: &str,
        projection: Point,
        sensor_point: Point,
    ) -> (bool, Option<String>, f64) {
        let mut best: Option<(String, f64)> = None;
        for key in [endpoint_a, endpoint_b] {
            let Some(record) = route_of(graph, tree, key) else {
                continue;
            };
            let endpoint_point = graph.vertices[key].point;
            let candidate = endpoint_point.distance(projection) + sensor_point.distance(projection) + record.distance;
            if best.as_ref().map(|(_, best_total)| candidate < *best_total).unwrap_or(true) {
                best = Some((key.to_string(), candidate));
            }
        }
        match best {
            Some((key, total)) => (true, Some(key), total),
            None => (false, None, 0.0),
        }
    }

    /// Walks the predecessor chain from `start_key` back toward the sink,
    /// crediting only the route distance along that chain — never the
    /// sensor's own stub to its chosen endpoint, which isn't part of the
    /// chain being walked.
    fn novel_length_contribution(
        &mut self,
        graph: &Graph,
        tree: Tree,
        start_key: &str,
        route_distance: f64,
    ) -> f64 {
        let slot = Self::slot(tree);
        let mut key = start_key.to_string();
        let mut chain = Vec::new();
        let mut ancestor_distance = 0.0;

        loop {
            if self.visited_vertices[slot].contains(&key) {
                ancestor_distance = route_of(graph, tree, &key).map(|r| r.distance).unwrap_or(0.0);
                break;
            }
            chain.push(key.clone());
            match route_of(graph, tree, &key).and_then(|r| r.previous.clone()) {
                Some(prev) => key = prev,
                None => break,
            }
        }

        for step in chain.windows(2) {
            let (from, to) = (&step[0], &step[1]);
            if let Some(entry) = graph.edges.get(from).and_then(|m| m.get(to)) {
                if entry.kind == EdgeKind::Jumper {
                    let canonical = if to < from {
                        (to.clone(), from.clone())
                    } else {
                        (from.clone(), to.clone())
                    };
                    self.visited_jumpers[slot].insert(canonical);
                }
            }
        }
        for visited_key in chain {
            self.visited_vertices[slot].insert(visited_key);
        }

        route_distance - ancestor_distance
    }
}

impl Default for SinkAccounting {
    fn default() -> Self {
        Self::new()
    }
}

fn fraction(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

fn fraction_f64(value: f64, total: f64) -> f64 {
    if total <= 0.0 {
        0.0
    } else {
        value / total
    }
}
