use std::collections::HashMap;

use garment_types::Point;
use tessellator::TessellationOutcome;

use crate::error::ExperimentError;
use crate::keying::vertex_key;

/// Whether an edge is a tessellation edge internal to one part, or a
/// cross-seam jumper (§3: "Edge hash").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Interior,
    Jumper,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeEntry {
    pub length: f64,
    pub kind: EdgeKind,
}

/// A tree's route record for one vertex (§3: "Vertex record"), `None` until
/// the routing engine reaches that vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub jumper_count: usize,
    pub distance: f64,
    pub node_count: usize,
    /// `Some` only for the fewest-jumpers tree: the part-ids whose jumpers
    /// may no longer be crossed on this branch.
    pub jumper_exclusion: Option<Vec<usize>>,
    pub previous: Option<String>,
    pub is_leaf: bool,
    pub outgoing_branches: usize,
}

#[derive(Debug, Clone)]
pub struct VertexRecord {
    pub point: Point,
    pub part_id: usize,
    pub route_shortest: Option<RouteRecord>,
    pub route_least_jumpers: Option<RouteRecord>,
}

impl VertexRecord {
    fn new(point: Point, part_id: usize) -> Self {
        VertexRecord {
            point,
            part_id,
            route_shortest: None,
            route_least_jumpers: None,
        }
    }
}

/// The combined vertex/edge hash of §3, built once per configuration from
/// every part's tessellation and then mutated in place by the jumper
/// synthesiser and routing engine.
pub struct Graph {
    pub vertices: HashMap<String, VertexRecord>,
    pub edges: HashMap<String, HashMap<String, EdgeEntry>>,
    /// Canonical `(k1, k2)` with `k1 < k2` to `(endpoint_1, endpoint_2,
    /// length)` (§3: "Jumper record").
    pub jumpers: HashMap<(String, String), (Point, Point, f64)>,
    interior_vertex_count: usize,
    edge_point_count: usize,
}

impl Graph {
    pub fn from_tessellations(outcomes: &[TessellationOutcome]) -> Self {
        let mut vertices: HashMap<String, VertexRecord> = HashMap::new();
        let mut edges: HashMap<String, HashMap<String, EdgeEntry>> = HashMap::new();
        let mut interior_vertex_count = 0;
        let mut edge_point_count = 0;

        for (part_id, outcome) in outcomes.iter().enumerate() {
            for point in &outcome.interior_vertices {
                vertices
                    .entry(vertex_key(part_id, *point))
                    .or_insert_with(|| VertexRecord::new(*point, part_id));
            }
            interior_vertex_count += outcome.interior_vertices.len();

            for point in &outcome.edge_points {
                vertices
                    .entry(vertex_key(part_id, *point))
                    .or_insert_with(|| VertexRecord::new(*point, part_id));
            }
            edge_point_count += outcome.edge_points.len();

            for segment in &outcome.edges {
                let a_key = vertex_key(part_id, segment.start);
                let b_key = vertex_key(part_id, segment.end);
                vertices
                    .entry(a_key.clone())
                    .or_insert_with(|| VertexRecord::new(segment.start, part_id));
                vertices
                    .entry(b_key.clone())
                    .or_insert_with(|| VertexRecord::new(segment.end, part_id));
                insert_symmetric_edge(&mut edges, &a_key, &b_key, segment.length(), EdgeKind::Interior);
            }
        }

        Graph {
            vertices,
            edges,
            jumpers: HashMap::new(),
            interior_vertex_count,
            edge_point_count,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// §4.6's retry condition: `|vertex_hash| == interior + edge_point`
    /// counts, summed across parts.
    pub fn check_consistency(&self) -> Result<(), ExperimentError> {
        let expected = self.interior_vertex_count + self.edge_point_count;
        let found = self.vertices.len();
        if expected != found {
            return Err(ExperimentError::GraphInconsistency { expected, found });
        }
        Ok(())
    }

    pub fn reset_routes(&mut self) {
        for vertex in self.vertices.values_mut() {
            vertex.route_shortest = None;
            vertex.route_least_jumpers = None;
        }
    }

    pub fn neighbors(&self, key: &str) -> impl Iterator<Item = (&String, &EdgeEntry)> {
        self.edges.get(key).into_iter().flat_map(|m| m.iter())
    }

    /// Inserts a jumper edge, purging nothing — callers clear existing
    /// jumpers first via [`Graph::clear_jumpers`] (§4.3: "Replacement
    /// semantics"). Logs and ignores a duplicate canonical pair instead of
    /// failing (§7: `DuplicateEdge`).
    pub fn add_jumper(&mut self, a_key: &str, b_key: &str, a_point: Point, b_point: Point, length: f64) {
        let canonical = if b_key < a_key {
            (b_key.to_string(), a_key.to_string())
        } else {
            (a_key.to_string(), b_key.to_string())
        };
        if self.jumpers.contains_key(&canonical) {
            log::warn!("duplicate jumper between {a_key} and {b_key} ignored");
            return;
        }
        self.jumpers
            .insert(canonical, (a_point, b_point, length));
        insert_symmetric_edge(&mut self.edges, a_key, b_key, length, EdgeKind::Jumper);
    }

    /// Removes every jumper edge and record, and resets route state
    /// (§4.3: "they are first purged").
    pub fn clear_jumpers(&mut self) {
        for map in self.edges.values_mut() {
            map.retain(|_, entry| entry.kind != EdgeKind::Jumper);
        }
        self.jumpers.clear();
        self.reset_routes();
    }

    pub fn total_jumper_length(&self) -> f64 {
        self.jumpers.values().map(|(_, _, length)| length).sum()
    }

    pub fn total_jumper_count(&self) -> usize {
        self.jumpers.len()
    }

    pub fn total_interior_length(&self) -> f64 {
        let mut total = 0.0;
        let mut seen = std::collections::HashSet::new();
        for (from, neighbors) in &self.edges {
            for (to, entry) in neighbors {
                if entry.kind != EdgeKind::Interior {
                    continue;
                }
                let canonical = if to < from {
                    (to.clone(), from.clone())
                } else {
                    (from.clone(), to.clone())
                };
                if seen.insert(canonical) {
                    total += entry.length;
                }
            }
        }
        total
    }
}

fn insert_symmetric_edge(
    edges: &mut HashMap<String, HashMap<String, EdgeEntry>>,
    a: &str,
    b: &str,
    length: f64,
    kind: EdgeKind,
) {
    edges
        .entry(a.to_string())
        .or_default()
        .insert(b.to_string(), EdgeEntry { length, kind });
    edges
        .entry(b.to_string())
        .or_default()
        .insert(a.to_string(), EdgeEntry { length, kind });
}
