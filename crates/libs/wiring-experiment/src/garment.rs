use rand::Rng;

use garment_types::{ClothingItem, Point, Sex, Size};
use geometry_core::{
    interpolate_along_polyline, point_in_polygon, polygon_area, polygon_bounds,
    project_onto_polyline, PointPosition,
};

use crate::error::ExperimentError;
use crate::keying::PRECISION_TOLERANCE;

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// A garment scaled to one body size, with the derived state needed for
/// Monte-Carlo sampling and opposing-segment resolution (§3, §4.2).
pub struct AdjustedGarment {
    item: ClothingItem,
    size: Size,
    sex: Sex,
    ratio: f64,
    scaled_parts: Vec<Vec<Point>>,
    part_areas: Vec<f64>,
}

impl AdjustedGarment {
    pub fn new(item: ClothingItem, size: Size, sex: Option<Sex>) -> Self {
        let sex = sex.unwrap_or_else(|| item.inferred_sex());
        let ratio = size.ratio(sex);
        let scaled_parts: Vec<Vec<Point>> =
            item.parts.iter().map(|part| part.scaled(ratio)).collect();
        let part_areas = scaled_parts
            .iter()
            .map(|points| polygon_area(points).abs())
            .collect();

        AdjustedGarment {
            item,
            size,
            sex,
            ratio,
            scaled_parts,
            part_areas,
        }
    }

    pub fn item(&self) -> &ClothingItem {
        &self.item
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn part_count(&self) -> usize {
        self.scaled_parts.len()
    }

    pub fn scaled_outline(&self, part_id: usize) -> &[Point] {
        &self.scaled_parts[part_id]
    }

    /// Picks a part with probability proportional to its scaled area, then a
    /// uniformly random interior point by rejection sampling (§4.2).
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> (usize, Point) {
        let part_id = self.proportional_random_part(rng);
        let point = self.random_point_in_part(part_id, rng);
        (part_id, point)
    }

    pub fn random_point_in_part<R: Rng + ?Sized>(&self, part_id: usize, rng: &mut R) -> Point {
        let outline = &self.scaled_parts[part_id];
        let bounds = polygon_bounds(outline).expect("scaled part has at least 3 points");
        loop {
            let x = bounds.x + rng.gen::<f64>() * bounds.width;
            let y = bounds.y + rng.gen::<f64>() * bounds.height;
            let candidate = Point::new(round3(x), round3(y));
            if point_in_polygon(candidate, outline, None) == PointPosition::Inside {
                return candidate;
            }
        }
    }

    fn proportional_random_part<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let total: f64 = self.part_areas.iter().sum();
        let mut target = rng.gen::<f64>() * total;
        for (part_id, area) in self.part_areas.iter().enumerate() {
            if target < *area {
                return part_id;
            }
            target -= area;
        }
        self.part_areas.len() - 1
    }

    /// A random interior point plus an integer heading in `[0, 360)` degrees,
    /// used to seed that part's tessellation (§3: "a per-part seed").
    pub fn part_seed<R: Rng + ?Sized>(&self, part_id: usize, rng: &mut R) -> (Point, f64) {
        let point = self.random_point_in_part(part_id, rng);
        let angle = rng.gen_range(0..360) as f64;
        (point, angle)
    }

    /// Resolves `point` (assumed to lie on some segment of `part_id`) to its
    /// image on the opposing segment across that segment's unique joint
    /// (§4.2). Returns the opposing part-id, the opposing segment-id (so
    /// callers can re-check membership of a third point against the same
    /// segment, as the jumper synthesiser does) and the mapped point.
    pub fn resolve_opposing_point(
        &self,
        part_id: usize,
        point: Point,
    ) -> Result<(usize, usize, Point), ExperimentError> {
        let part = &self.item.parts[part_id];
        let outline = &self.scaled_parts[part_id];

        let mut best: Option<(usize, f64, f64)> = None;
        for (segment_id, range) in part.segments.iter().enumerate() {
            let polyline = range.resolve(outline);
            let (t, distance) = project_onto_polyline(point, &polyline);
            if distance <= PRECISION_TOLERANCE
                && best.map(|(_, _, best_dist)| distance < best_dist).unwrap_or(true)
            {
                best = Some((segment_id, t, distance));
            }
        }
        let (segment_id, t, _) = best.ok_or(ExperimentError::NoSuchSegment { part_id })?;

        let joint = self
            .item
            .joint_for_segment(part_id, segment_id)
            .ok_or(ExperimentError::NoSuchSegment { part_id })?;
        let (other_part, other_segment) = joint
            .opposing(part_id, segment_id)
            .ok_or(ExperimentError::NoSuchSegment { part_id })?;

        let mapped_t = joint.map_parameter(t);
        let other_outline = &self.scaled_parts[other_part];
        let other_polyline = self.item.parts[other_part].segments[other_segment].resolve(other_outline);
        let mapped_point = interpolate_along_polyline(&other_polyline, mapped_t);
        Ok((other_part, other_segment, mapped_point))
    }

    /// The resolved polyline for `(part_id, segment_id)`, used by the jumper
    /// synthesiser's same-segment guard.
    pub fn segment_polyline(&self, part_id: usize, segment_id: usize) -> Vec<Point> {
        let outline = &self.scaled_parts[part_id];
        self.item.parts[part_id].segments[segment_id].resolve(outline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garment_types::{ClothingPart, Joint, SegmentRange};

    fn unit_square_item() -> ClothingItem {
        let square = |offset_x: f64| {
            ClothingPart::new(
                vec![
                    Point::new(offset_x, 0.0),
                    Point::new(offset_x + 1.0, 0.0),
                    Point::new(offset_x + 1.0, 1.0),
                    Point::new(offset_x, 1.0),
                ],
                vec![SegmentRange::new(1, 2)],
            )
        };
        let mut item = ClothingItem::new("XXM-test");
        item.parts.push(square(0.0));
        item.parts.push(square(2.0));
        item.joints.push(Joint::new([0, 1], [0, 0], false));
        item
    }

    #[test]
    fn random_point_lands_inside_its_part() {
        use rand::SeedableRng;
        let item = unit_square_item();
        let garment = AdjustedGarment::new(item, Size::L, Some(Sex::Male));
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let (part_id, point) = garment.random_point(&mut rng);
            let outline = garment.scaled_outline(part_id);
            assert_eq!(
                point_in_polygon(point, outline, None),
                PointPosition::Inside
            );
        }
    }

    #[test]
    fn resolve_opposing_point_crosses_the_joint() {
        let item = unit_square_item();
        let garment = AdjustedGarment::new(item, Size::L, Some(Sex::Male));
        let ratio = garment.ratio();
        let midpoint = Point::new(ratio * 1.0, ratio * 0.5);
        let (other_part, _other_segment, mapped) = garment.resolve_opposing_point(0, midpoint).unwrap();
        assert_eq!(other_part, 1);
        assert!((mapped.x - ratio * 3.0).abs() < 1e-6);
        assert!((mapped.y - ratio * 0.5).abs() < 1e-6);
    }

    #[test]
    fn resolve_opposing_point_fails_far_from_any_segment() {
        let item = unit_square_item();
        let garment = AdjustedGarment::new(item, Size::L, Some(Sex::Male));
        let result = garment.resolve_opposing_point(0, Point::new(1000.0, 1000.0));
        assert!(matches!(result, Err(ExperimentError::NoSuchSegment { part_id: 0 })));
    }
}
