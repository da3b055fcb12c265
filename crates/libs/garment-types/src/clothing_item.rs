use serde::{Deserialize, Serialize};

use crate::{ClothingPart, Joint};

/// A read-only garment item: its parts and the joints stitching them
/// together. This is the seam the authoring front-end (out of scope, §1)
/// hands to the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub name: String,
    pub parts: Vec<ClothingPart>,
    pub joints: Vec<Joint>,
}

impl ClothingItem {
    pub fn new(name: impl Into<String>) -> Self {
        ClothingItem {
            name: name.into(),
            parts: Vec::new(),
            joints: Vec::new(),
        }
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// The unique joint owning `(part_id, segment_id)`, if any. Warns (via
    /// the `log` facade, not a hard error) if more than one joint claims the
    /// same segment — §4.2's "warns on and treats as undefined" rule.
    pub fn joint_for_segment(&self, part_id: usize, segment_id: usize) -> Option<&Joint> {
        let mut found: Option<&Joint> = None;
        for joint in &self.joints {
            if joint.opposing(part_id, segment_id).is_some() {
                if found.is_some() {
                    log::warn!(
                        "segment {segment_id} of part {part_id} participates in more than one joint; treating as undefined"
                    );
                    return None;
                }
                found = Some(joint);
            }
        }
        found
    }

    /// Derives the sex code from the third character of the garment's name,
    /// defaulting to Male with a warning if absent or unrecognised (§4.2).
    pub fn inferred_sex(&self) -> crate::Sex {
        match self.name.chars().nth(2) {
            Some('M') => crate::Sex::Male,
            Some('F') => crate::Sex::Female,
            _ => {
                log::warn!(
                    "could not determine sex from clothing item name {:?}; defaulting to Male",
                    self.name
                );
                crate::Sex::Male
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point, SegmentRange};

    fn square_part() -> ClothingPart {
        ClothingPart::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ],
            vec![SegmentRange::new(0, 1)],
        )
    }

    #[test]
    fn joint_for_segment_finds_unique_owner() {
        let mut item = ClothingItem::new("XXM");
        item.parts.push(square_part());
        item.parts.push(square_part());
        item.joints.push(Joint::new([0, 1], [0, 0], false));
        assert_eq!(item.joint_for_segment(0, 0), Some(&item.joints[0]));
        assert_eq!(item.joint_for_segment(0, 5), None);
    }

    #[test]
    fn inferred_sex_reads_third_character() {
        let item = ClothingItem::new("XXF-shirt");
        assert_eq!(item.inferred_sex(), crate::Sex::Female);
    }
}
