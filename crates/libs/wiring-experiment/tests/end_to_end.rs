//! End-to-end scenarios A-C and invariants 1-4 of the testable-properties
//! section, run against the public API rather than inline unit fixtures.

use garment_types::{ClothingItem, ClothingPart, Joint, Point, Sex, Size};
use tessellator::{Algorithm, Tessellator};
use wiring_experiment::{Graph, JumperSynthesiser, RoutingEngine};

fn square_bounds() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(0.0, 100.0),
    ]
}

/// Scenario A: single square part, `4.4.4.4`, `edge_length = 10`, seed at
/// the centre, angle 0, no joints, sink at the centre.
#[test]
fn scenario_a_single_square_part_fills_a_regular_grid() {
    let tessellator = Tessellator::new(Algorithm::Square, 10.0, square_bounds(), None).unwrap();
    let outcome = tessellator.generate(Point::new(50.0, 50.0), 0.0).unwrap();

    let total_node_count = outcome.interior_vertices.len() + outcome.edge_points.len();
    assert_eq!(total_node_count, 121);
    assert!((outcome.total_length() - 2200.0).abs() < 1e-6);
    assert!(!outcome.exceeded_iterations);

    let outcomes = vec![outcome];
    let mut graph = Graph::from_tessellations(&outcomes);
    graph.check_consistency().unwrap();
    assert_eq!(graph.total_jumper_count(), 0);

    RoutingEngine::run(&mut graph, 0, Point::new(50.0, 50.0)).unwrap();
    for vertex in graph.vertices.values() {
        assert!(vertex.route_shortest.is_some());
        assert!(vertex.route_least_jumpers.is_some());
    }
}

fn abutting_squares_item() -> ClothingItem {
    let left = ClothingPart::new(
        vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ],
        vec![garment_types::SegmentRange::new(1, 2)],
    );
    let right = ClothingPart::new(
        vec![
            Point::new(2.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 2.0),
            Point::new(2.0, 2.0),
        ],
        vec![garment_types::SegmentRange::new(3, 0)],
    );
    let mut item = ClothingItem::new("XXM-two-squares");
    item.parts.push(left);
    item.parts.push(right);
    item.joints.push(Joint::new([0, 1], [0, 0], true));
    item
}

/// Tessellates each part of a two-unit-square garment at one grid cell per
/// authored unit, seeding from each part's own centroid so the lattices
/// align across the shared seam. `right_phase_shift` offsets the right
/// part's seed along y, putting its edge-points out of phase with the left
/// part's (used to exercise a joint radius too small to bridge them).
fn tessellate_both_parts(
    garment: &wiring_experiment::AdjustedGarment,
    edge_length: f64,
    right_phase_shift: f64,
) -> Vec<tessellator::TessellationOutcome> {
    let ratio = garment.ratio();
    let centroids = [
        Point::new(ratio, ratio),
        Point::new(3.0 * ratio, ratio + right_phase_shift),
    ];
    (0..garment.part_count())
        .map(|part_id| {
            let bounds = garment.scaled_outline(part_id).to_vec();
            let tessellator = Tessellator::new(Algorithm::Square, edge_length, bounds, None).unwrap();
            tessellator.generate(centroids[part_id], 0.0).unwrap()
        })
        .collect()
}

/// Scenario B: two abutting unit squares joined along one seam, with a
/// joint radius generous enough to stitch every coincident edge-point pair.
#[test]
fn scenario_b_abutting_squares_are_fully_jumpered() {
    let item = abutting_squares_item();
    let garment = wiring_experiment::AdjustedGarment::new(item, Size::L, Some(Sex::Male));
    let ratio = garment.ratio();
    let edge_length = ratio;
    let outcomes = tessellate_both_parts(&garment, edge_length, 0.0);

    let mut graph = Graph::from_tessellations(&outcomes);
    graph.check_consistency().unwrap();

    let joint_radius = edge_length * 0.4;
    let (_, jumper_count) = JumperSynthesiser::synthesise(&mut graph, &garment, &outcomes, joint_radius);
    assert!(jumper_count > 0);

    RoutingEngine::run(&mut graph, 0, Point::new(ratio, ratio)).unwrap();
    let reachable = graph
        .vertices
        .values()
        .filter(|v| v.route_shortest.is_some())
        .count();
    assert_eq!(reachable, graph.vertex_count());
}

/// Scenario C: same two squares, but a joint radius far too small for any
/// edge-point pair to qualify — the parts stay disconnected.
#[test]
fn scenario_c_a_too_small_joint_radius_leaves_parts_disconnected() {
    let item = abutting_squares_item();
    let garment = wiring_experiment::AdjustedGarment::new(item, Size::L, Some(Sex::Male));
    let ratio = garment.ratio();
    let edge_length = ratio;
    // Shifts the right part's lattice half a cell out of phase with the
    // left part's, so no edge-point pair lands within a small radius.
    let outcomes = tessellate_both_parts(&garment, edge_length, edge_length / 2.0);

    let mut graph = Graph::from_tessellations(&outcomes);
    graph.check_consistency().unwrap();

    let (_, jumper_count) =
        JumperSynthesiser::synthesise(&mut graph, &garment, &outcomes, edge_length * 0.1);
    assert_eq!(jumper_count, 0);

    RoutingEngine::run(&mut graph, 0, Point::new(ratio, ratio)).unwrap();
    let reachable_part_0 = graph
        .vertices
        .values()
        .filter(|v| v.part_id == 0)
        .all(|v| v.route_shortest.is_some());
    let reachable_part_1 = graph
        .vertices
        .values()
        .filter(|v| v.part_id == 1)
        .any(|v| v.route_shortest.is_some());
    assert!(reachable_part_0);
    assert!(!reachable_part_1);
}

/// Invariant 7: tessellating the same part twice with identical inputs
/// produces byte-identical edge and vertex hashes.
#[test]
fn tessellation_is_idempotent() {
    let tessellator = Tessellator::new(Algorithm::Hexagonal, 10.0, square_bounds(), None).unwrap();
    let first = tessellator.generate(Point::new(50.0, 50.0), 0.0).unwrap();
    let second = tessellator.generate(Point::new(50.0, 50.0), 0.0).unwrap();

    assert_eq!(first.interior_vertices, second.interior_vertices);
    assert_eq!(first.edge_points, second.edge_points);
    assert_eq!(first.edges.len(), second.edges.len());
}
