use rand::Rng;

use garment_types::ClothingItem;
use tessellator::{Tessellator, TessellationOutcome};
use wiring_stats::{bootstrap_center_ci, CenterMode};

use crate::accounting::SinkAccounting;
use crate::config::{ExperimentConfig, DESTINATION_POINTS, SOURCE_POINTS};
use crate::error::ExperimentError;
use crate::garment::AdjustedGarment;
use crate::graph::Graph;
use crate::jumper::JumperSynthesiser;
use crate::result::{ExperimentResult, PathStatistics};
use crate::routing::RoutingEngine;

/// §4.6's retry bound on `GraphInconsistency`: the source retries
/// unconditionally, which is not an acceptable library behaviour (documented
/// Open Question resolution, see the repository's design notes).
const MAX_GRAPH_RETRIES: u32 = 8;

/// Default edge length fed to the tessellator, derived from
/// `node_distance` — §4.1 takes `edge_length` directly and §6.1 exposes
/// `node_distance` as the external parameter name for the same quantity.
fn edge_length_for(config: &ExperimentConfig) -> f64 {
    config.node_distance
}

/// The single entry point a driver calls per configuration line (§6.4).
pub struct Experiment;

impl Experiment {
    pub fn run<R: Rng + ?Sized>(
        config: &ExperimentConfig,
        item: ClothingItem,
        rng: &mut R,
    ) -> Result<ExperimentResult, ExperimentError> {
        if !config.node_distance_is_valid() {
            return Err(ExperimentError::InvalidGeometry(format!(
                "node_distance {} is not one of the allowed values {:?}",
                config.node_distance,
                crate::config::NODE_DISTANCES
            )));
        }
        if !config.joint_radius_is_valid() {
            return Err(ExperimentError::InvalidGeometry(format!(
                "joint_radius {} is not one of the allowed values {:?}",
                config.joint_radius,
                crate::config::JOINT_RADII
            )));
        }

        let mut attempt = 0;
        loop {
            match Self::run_once(config, item.clone(), rng) {
                Ok(result) => return Ok(result),
                Err(ExperimentError::GraphInconsistency { expected, found }) => {
                    attempt += 1;
                    log::warn!(
                        "graph inconsistency on attempt {attempt} (expected {expected}, found \
                         {found}); retrying with re-randomised sink and seeds"
                    );
                    if attempt >= MAX_GRAPH_RETRIES {
                        return Err(ExperimentError::GraphInconsistency { expected, found });
                    }
                }
                Err(other) => return Err(other),
            }
        }
    }

    fn run_once<R: Rng + ?Sized>(
        config: &ExperimentConfig,
        item: ClothingItem,
        rng: &mut R,
    ) -> Result<ExperimentResult, ExperimentError> {
        let garment = AdjustedGarment::new(item, config.size, config.sex);
        let edge_length = edge_length_for(config);

        let mut outcomes: Vec<TessellationOutcome> = Vec::with_capacity(garment.part_count());
        for part_id in 0..garment.part_count() {
            let (seed_point, seed_angle) = garment.part_seed(part_id, rng);
            let bounds = garment.scaled_outline(part_id).to_vec();
            let tessellator = Tessellator::new(config.tesselation_algorithm, edge_length, bounds, None)?;
            let outcome = tessellator.generate(seed_point, seed_angle)?;
            if outcome.exceeded_iterations {
                log::warn!("tessellation of part {part_id} exceeded its iteration budget");
            }
            outcomes.push(outcome);
        }

        let mut graph = Graph::from_tessellations(&outcomes);
        graph.check_consistency()?;

        let (total_jumper_length, total_jumper_count) =
            JumperSynthesiser::synthesise(&mut graph, &garment, &outcomes, config.joint_radius);

        let interior_vertex_total: usize = outcomes.iter().map(|o| o.interior_vertices.len()).sum();
        let edge_point_total: usize = outcomes.iter().map(|o| o.edge_points.len()).sum();
        let total_wire_length = graph.total_interior_length();

        let mut reachable_wire_length = Vec::with_capacity(SOURCE_POINTS);
        let mut unreachable_wire_length = Vec::with_capacity(SOURCE_POINTS);
        let mut reachable_jumper_length = Vec::with_capacity(SOURCE_POINTS);
        let mut unreachable_jumper_length = Vec::with_capacity(SOURCE_POINTS);
        let mut reachable_node_count = Vec::with_capacity(SOURCE_POINTS);
        let mut unreachable_node_count = Vec::with_capacity(SOURCE_POINTS);
        let mut reachable_jumper_count = Vec::with_capacity(SOURCE_POINTS);
        let mut unreachable_jumper_count = Vec::with_capacity(SOURCE_POINTS);

        let mut shortest_depth_max_distance = Vec::with_capacity(SOURCE_POINTS);
        let mut shortest_depth_avg_distance = Vec::with_capacity(SOURCE_POINTS);
        let mut shortest_depth_max_nodes = Vec::with_capacity(SOURCE_POINTS);
        let mut shortest_depth_avg_nodes = Vec::with_capacity(SOURCE_POINTS);
        let mut shortest_depth_max_jumpers = Vec::with_capacity(SOURCE_POINTS);
        let mut shortest_depth_avg_jumpers = Vec::with_capacity(SOURCE_POINTS);
        let mut fewest_depth_max_distance = Vec::with_capacity(SOURCE_POINTS);
        let mut fewest_depth_avg_distance = Vec::with_capacity(SOURCE_POINTS);
        let mut fewest_depth_max_nodes = Vec::with_capacity(SOURCE_POINTS);
        let mut fewest_depth_avg_nodes = Vec::with_capacity(SOURCE_POINTS);
        let mut fewest_depth_max_jumpers = Vec::with_capacity(SOURCE_POINTS);
        let mut fewest_depth_avg_jumpers = Vec::with_capacity(SOURCE_POINTS);

        let mut fraction_nodes_visited_shortest = Vec::with_capacity(SOURCE_POINTS);
        let mut fraction_nodes_visited_fewest = Vec::with_capacity(SOURCE_POINTS);
        let mut fraction_branching_visited_shortest = Vec::with_capacity(SOURCE_POINTS);
        let mut fraction_branching_visited_fewest = Vec::with_capacity(SOURCE_POINTS);
        let mut fraction_jumpers_visited_shortest = Vec::with_capacity(SOURCE_POINTS);
        let mut fraction_jumpers_visited_fewest = Vec::with_capacity(SOURCE_POINTS);
        let mut fraction_jumper_length_visited_shortest = Vec::with_capacity(SOURCE_POINTS);
        let mut fraction_jumper_length_visited_fewest = Vec::with_capacity(SOURCE_POINTS);

        let mut path_total_length_shortest = Vec::with_capacity(SOURCE_POINTS * DESTINATION_POINTS);
        let mut path_total_length_fewest = Vec::with_capacity(SOURCE_POINTS * DESTINATION_POINTS);
        let mut path_jumper_count_shortest = Vec::with_capacity(SOURCE_POINTS * DESTINATION_POINTS);
        let mut path_jumper_count_fewest = Vec::with_capacity(SOURCE_POINTS * DESTINATION_POINTS);
        let mut path_node_count_shortest = Vec::with_capacity(SOURCE_POINTS * DESTINATION_POINTS);
        let mut path_node_count_fewest = Vec::with_capacity(SOURCE_POINTS * DESTINATION_POINTS);
        let mut path_novel_length_shortest = Vec::with_capacity(SOURCE_POINTS * DESTINATION_POINTS);
        let mut path_novel_length_fewest = Vec::with_capacity(SOURCE_POINTS * DESTINATION_POINTS);

        for source_id in 0..SOURCE_POINTS {
            let (sink_part, sink_point) = match config.sink {
                Some(fixed) => (fixed.part_id, fixed.point()),
                None => garment.random_point(rng),
            };

            RoutingEngine::run(&mut graph, sink_part, sink_point)?;

            let mut accounting = SinkAccounting::new();
            let trial = accounting.summarize_sink(&graph, source_id)?;

            reachable_wire_length.push(trial.reachable_wire_length);
            unreachable_wire_length.push(trial.unreachable_wire_length);
            reachable_jumper_length.push(trial.reachable_jumper_length);
            unreachable_jumper_length.push(trial.unreachable_jumper_length);
            reachable_node_count.push(trial.reachable_vertices as f64);
            unreachable_node_count.push(trial.unreachable_vertices as f64);
            reachable_jumper_count.push(trial.reachable_jumper_count as f64);
            unreachable_jumper_count.push(trial.unreachable_jumper_count as f64);

            shortest_depth_max_distance.push(trial.shortest_depth.max_distance);
            shortest_depth_avg_distance.push(trial.shortest_depth.avg_distance);
            shortest_depth_max_nodes.push(trial.shortest_depth.max_node_count);
            shortest_depth_avg_nodes.push(trial.shortest_depth.avg_node_count);
            shortest_depth_max_jumpers.push(trial.shortest_depth.max_jumper_count);
            shortest_depth_avg_jumpers.push(trial.shortest_depth.avg_jumper_count);
            fewest_depth_max_distance.push(trial.fewest_jumpers_depth.max_distance);
            fewest_depth_avg_distance.push(trial.fewest_jumpers_depth.avg_distance);
            fewest_depth_max_nodes.push(trial.fewest_jumpers_depth.max_node_count);
            fewest_depth_avg_nodes.push(trial.fewest_jumpers_depth.avg_node_count);
            fewest_depth_max_jumpers.push(trial.fewest_jumpers_depth.max_jumper_count);
            fewest_depth_avg_jumpers.push(trial.fewest_jumpers_depth.avg_jumper_count);

            fraction_nodes_visited_shortest.push(trial.fraction_nodes_visited_shortest);
            fraction_nodes_visited_fewest.push(trial.fraction_nodes_visited_fewest_jumpers);
            fraction_branching_visited_shortest.push(trial.fraction_branching_visited_shortest);
            fraction_branching_visited_fewest.push(trial.fraction_branching_visited_fewest_jumpers);
            fraction_jumpers_visited_shortest.push(trial.fraction_jumpers_visited_shortest);
            fraction_jumpers_visited_fewest.push(trial.fraction_jumpers_visited_fewest_jumpers);
            fraction_jumper_length_visited_shortest.push(trial.fraction_jumper_length_visited_shortest);
            fraction_jumper_length_visited_fewest.push(trial.fraction_jumper_length_visited_fewest_jumpers);

            for destination_id in 0..DESTINATION_POINTS {
                let (sensor_part, sensor_point) = garment.random_point(rng);
                let sample = accounting.sample_sensor(
                    &graph,
                    source_id,
                    destination_id,
                    sensor_part,
                    sensor_point,
                    config.joint_radius,
                );

                if sample.reachable_shortest {
                    path_total_length_shortest.push(sample.total_length_shortest);
                    path_jumper_count_shortest.push(sample.jumper_count_shortest as f64);
                    path_node_count_shortest.push(sample.node_count_shortest as f64);
                    path_novel_length_shortest.push(sample.novel_length_shortest);
                }
                if sample.reachable_fewest_jumpers {
                    path_total_length_fewest.push(sample.total_length_fewest_jumpers);
                    path_jumper_count_fewest.push(sample.jumper_count_fewest_jumpers as f64);
                    path_node_count_fewest.push(sample.node_count_fewest_jumpers as f64);
                    path_novel_length_fewest.push(sample.novel_length_fewest_jumpers);
                }
            }
        }

        let scalar = |samples: &[f64], rng: &mut R| {
            bootstrap_center_ci(samples, CenterMode::Median, false, rng)
        };
        let extended = |samples: &[f64], rng: &mut R| {
            bootstrap_center_ci(samples, CenterMode::Median, true, rng)
        };

        let result = ExperimentResult {
            total_wire_length,
            total_jumper_length,
            total_jumper_count,
            center_node_count: interior_vertex_total,
            edge_node_count: edge_point_total,
            total_node_count: interior_vertex_total + edge_point_total,

            reachable_wire_length: scalar(&reachable_wire_length, rng),
            unreachable_wire_length: scalar(&unreachable_wire_length, rng),
            reachable_jumper_length: scalar(&reachable_jumper_length, rng),
            unreachable_jumper_length: scalar(&unreachable_jumper_length, rng),
            reachable_node_count: scalar(&reachable_node_count, rng),
            unreachable_node_count: scalar(&unreachable_node_count, rng),
            reachable_jumper_count: scalar(&reachable_jumper_count, rng),
            unreachable_jumper_count: scalar(&unreachable_jumper_count, rng),

            shortest_path: PathStatistics {
                total_length: extended(&path_total_length_shortest, rng),
                jumper_count: scalar(&path_jumper_count_shortest, rng),
                node_count: scalar(&path_node_count_shortest, rng),
                novel_length: extended(&path_novel_length_shortest, rng),
                depth_max_distance: scalar(&shortest_depth_max_distance, rng),
                depth_avg_distance: scalar(&shortest_depth_avg_distance, rng),
                depth_max_node_count: scalar(&shortest_depth_max_nodes, rng),
                depth_avg_node_count: scalar(&shortest_depth_avg_nodes, rng),
                depth_max_jumper_count: scalar(&shortest_depth_max_jumpers, rng),
                depth_avg_jumper_count: scalar(&shortest_depth_avg_jumpers, rng),
                fraction_nodes_visited: scalar(&fraction_nodes_visited_shortest, rng),
                fraction_branching_visited: scalar(&fraction_branching_visited_shortest, rng),
                fraction_jumpers_visited: scalar(&fraction_jumpers_visited_shortest, rng),
                fraction_jumper_length_visited: scalar(&fraction_jumper_length_visited_shortest, rng),
            },
            least_jumper_path: PathStatistics {
                total_length: extended(&path_total_length_fewest, rng),
                jumper_count: scalar(&path_jumper_count_fewest, rng),
                node_count: scalar(&path_node_count_fewest, rng),
                novel_length: extended(&path_novel_length_fewest, rng),
                depth_max_distance: scalar(&fewest_depth_max_distance, rng),
                depth_avg_distance: scalar(&fewest_depth_avg_distance, rng),
                depth_max_node_count: scalar(&fewest_depth_max_nodes, rng),
                depth_avg_node_count: scalar(&fewest_depth_avg_nodes, rng),
                depth_max_jumper_count: scalar(&fewest_depth_max_jumpers, rng),
                depth_avg_jumper_count: scalar(&fewest_depth_avg_jumpers, rng),
                fraction_nodes_visited: scalar(&fraction_nodes_visited_fewest, rng),
                fraction_branching_visited: scalar(&fraction_branching_visited_fewest, rng),
                fraction_jumpers_visited: scalar(&fraction_jumpers_visited_fewest, rng),
                fraction_jumper_length_visited: scalar(&fraction_jumper_length_visited_fewest, rng),
            },
        };

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garment_types::{ClothingPart, Sex, Size};
    use rand::SeedableRng;
    use tessellator::Algorithm;

    fn single_square_item() -> ClothingItem {
        let mut item = ClothingItem::new("XXM-square");
        item.parts.push(ClothingPart::new(
            vec![
                garment_types::Point::new(0.0, 0.0),
                garment_types::Point::new(100.0, 0.0),
                garment_types::Point::new(100.0, 100.0),
                garment_types::Point::new(0.0, 100.0),
            ],
            vec![],
        ));
        item
    }

    #[test]
    fn single_square_part_yields_deterministic_results_for_a_fixed_seed() {
        let config = ExperimentConfig {
            experiment_id: "scenario-a".to_string(),
            clothing_id: "XXM-square".to_string(),
            sex: Some(Sex::Male),
            size: Size::L,
            tesselation_algorithm: Algorithm::Square,
            node_distance: 20.0,
            joint_radius: 10.0,
            sink: Some(crate::config::FixedSink { part_id: 0, x: 50.0, y: 50.0 }),
            seeds: 7,
        };

        let mut rng_a = rand::rngs::StdRng::seed_from_u64(config.seeds);
        let mut rng_b = rand::rngs::StdRng::seed_from_u64(config.seeds);

        let result_a = Experiment::run(&config, single_square_item(), &mut rng_a).unwrap();
        let result_b = Experiment::run(&config, single_square_item(), &mut rng_b).unwrap();

        assert_eq!(result_a, result_b);
        assert_eq!(result_a.total_jumper_count, 0);
    }

    #[test]
    fn rejects_an_unlisted_node_distance_before_running() {
        let config = ExperimentConfig {
            experiment_id: "scenario-a".to_string(),
            clothing_id: "XXM-square".to_string(),
            sex: Some(Sex::Male),
            size: Size::L,
            tesselation_algorithm: Algorithm::Square,
            node_distance: 13.0,
            joint_radius: 10.0,
            sink: Some(crate::config::FixedSink { part_id: 0, x: 50.0, y: 50.0 }),
            seeds: 7,
        };
        let mut rng = rand::rngs::StdRng::seed_from_u64(config.seeds);

        let err = Experiment::run(&config, single_square_item(), &mut rng).unwrap_err();
        assert!(matches!(err, ExperimentError::InvalidGeometry(_)));
    }
}
