use garment_types::Point;
use geometry_core::project_onto_polyline;
use tessellator::TessellationOutcome;

use crate::garment::AdjustedGarment;
use crate::graph::Graph;
use crate::keying::{vertex_key, PRECISION_TOLERANCE};

/// Stitches cross-seam "jumper" edges between the edge-points of every
/// jointed pair of parts (§4.3).
pub struct JumperSynthesiser;

impl JumperSynthesiser {
    /// Replaces every jumper currently in `graph` with a freshly computed
    /// set for joint radius `joint_radius`, returning `(total_length,
    /// total_count)` (§4.3: "Replacement semantics").
    pub fn synthesise(
        graph: &mut Graph,
        garment: &AdjustedGarment,
        outcomes: &[TessellationOutcome],
        joint_radius: f64,
    ) -> (f64, usize) {
        graph.clear_jumpers();

        for (part_id, outcome) in outcomes.iter().enumerate() {
            for &p in &outcome.edge_points {
                let (other_part, other_segment, image) =
                    match garment.resolve_opposing_point(part_id, p) {
                        Ok(resolved) => resolved,
                        Err(_) => continue,
                    };
                let other_polyline = garment.segment_polyline(other_part, other_segment);

                for &q in &outcomes[other_part].edge_points {
                    if q.distance(image) > joint_radius {
                        continue;
                    }
                    let (_, segment_distance) = project_onto_polyline(q, &other_polyline);
                    if segment_distance > PRECISION_TOLERANCE {
                        continue;
                    }

                    let key_p = vertex_key(part_id, p);
                    let key_q = vertex_key(other_part, q);
                    if key_p == key_q {
                        continue;
                    }
                    graph.add_jumper(&key_p, &key_q, p, q, p.distance(q));
                }
            }
        }

        (graph.total_jumper_length(), graph.total_jumper_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garment_types::{ClothingItem, ClothingPart, Joint, Segment, SegmentRange, Sex, Size};

    // `AdjustedGarment` scales authored (unscaled) outline coordinates by
    // `ratio` before resolving segments; a fixture's edge-points (which
    // stand in for a tessellator's output, always produced against the
    // *scaled* bounds) must live in that same scaled frame.
    //
    // `right_y_offset` shifts the right part's edge-points along the shared
    // seam relative to the left part's, so their opposing-point images no
    // longer land exactly on an existing point (at offset 0, both sides
    // would sit at identical coordinates, coinciding with their own images
    // regardless of joint radius).
    fn abutting_squares(ratio: f64, right_y_offset: f64) -> (ClothingItem, Vec<TessellationOutcome>) {
        let left = ClothingPart::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ],
            vec![SegmentRange::new(1, 2)],
        );
        let right = ClothingPart::new(
            vec![
                Point::new(1.0, 0.0),
                Point::new(2.0, 0.0),
                Point::new(2.0, 1.0),
                Point::new(1.0, 1.0),
            ],
            vec![SegmentRange::new(3, 0)],
        );
        let mut item = ClothingItem::new("XXM-test");
        item.parts.push(left);
        item.parts.push(right);
        item.joints.push(Joint::new([0, 1], [0, 0], true));

        let left_points = vec![
            Point::new(ratio * 1.0, ratio * 0.25),
            Point::new(ratio * 1.0, ratio * 0.5),
            Point::new(ratio * 1.0, ratio * 0.75),
        ];
        let right_points = vec![
            Point::new(ratio * 1.0, ratio * 0.25 + right_y_offset),
            Point::new(ratio * 1.0, ratio * 0.5 + right_y_offset),
            Point::new(ratio * 1.0, ratio * 0.75 + right_y_offset),
        ];
        let outcome_for = |points: &[Point]| TessellationOutcome {
            edges: points
                .windows(2)
                .map(|pair| Segment::new(pair[0], pair[1]))
                .collect(),
            interior_vertices: vec![],
            edge_points: points.to_vec(),
            exceeded_iterations: false,
        };
        (
            item,
            vec![outcome_for(&left_points), outcome_for(&right_points)],
        )
    }

    #[test]
    fn jumpers_link_coincident_edge_points_across_a_joint() {
        let ratio = Size::L.ratio(Sex::Male);
        let (item, outcomes) = abutting_squares(ratio, 0.0);
        let garment = AdjustedGarment::new(item, Size::L, Some(Sex::Male));
        let mut graph = Graph::from_tessellations(&outcomes);

        // Adjacent shared points are ~4mm apart; a 2mm radius matches only
        // each point against its own coincident image, not its neighbours.
        let (length, count) = JumperSynthesiser::synthesise(&mut graph, &garment, &outcomes, 2.0);
        assert_eq!(count, 3);
        assert!(length >= 0.0);
    }

    #[test]
    fn tiny_joint_radius_yields_no_jumpers() {
        let ratio = Size::L.ratio(Sex::Male);
        // Offsets the right part's points a tenth of the way to their
        // neighbour, so every opposing-point image misses its nearest real
        // point by an amount a tiny radius cannot bridge.
        let (item, outcomes) = abutting_squares(ratio, ratio * 0.025);
        let garment = AdjustedGarment::new(item, Size::L, Some(Sex::Male));
        let mut graph = Graph::from_tessellations(&outcomes);

        let (_, count) = JumperSynthesiser::synthesise(&mut graph, &garment, &outcomes, 1e-6);
        assert_eq!(count, 0);
    }
}
