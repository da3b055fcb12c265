use serde::{Deserialize, Serialize};

use wiring_stats::StatRecord;

/// One JSON result object per experiment (§6.2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub total_wire_length: f64,
    pub total_jumper_length: f64,
    pub total_jumper_count: usize,
    pub center_node_count: usize,
    pub edge_node_count: usize,
    pub total_node_count: usize,

    pub reachable_wire_length: StatRecord,
    pub unreachable_wire_length: StatRecord,
    pub reachable_jumper_length: StatRecord,
    pub unreachable_jumper_length: StatRecord,
    pub reachable_node_count: StatRecord,
    pub unreachable_node_count: StatRecord,
    pub reachable_jumper_count: StatRecord,
    pub unreachable_jumper_count: StatRecord,

    pub shortest_path: PathStatistics,
    pub least_jumper_path: PathStatistics,
}

/// The statistic records reported per routing tree (§6.2, §6.3 columns
/// 6–20 collapsed across trials).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStatistics {
    pub total_length: StatRecord,
    pub jumper_count: StatRecord,
    pub node_count: StatRecord,
    pub novel_length: StatRecord,
    pub depth_max_distance: StatRecord,
    pub depth_avg_distance: StatRecord,
    pub depth_max_node_count: StatRecord,
    pub depth_avg_node_count: StatRecord,
    pub depth_max_jumper_count: StatRecord,
    pub depth_avg_jumper_count: StatRecord,
    pub fraction_nodes_visited: StatRecord,
    pub fraction_branching_visited: StatRecord,
    pub fraction_jumpers_visited: StatRecord,
    pub fraction_jumper_length_visited: StatRecord,
}
