use serde::{Deserialize, Serialize};

/// A seam joining a named segment of one part to a named segment of
/// another, internal to a single garment item.
///
/// If `inverted` is `false`, parametric position `t` along segment 0
/// corresponds to `t` along segment 1; if `true`, it corresponds to `1 - t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub parts: [usize; 2],
    pub segments: [usize; 2],
    pub inverted: bool,
}

impl Joint {
    pub fn new(parts: [usize; 2], segments: [usize; 2], inverted: bool) -> Self {
        Joint {
            parts,
            segments,
            inverted,
        }
    }

    /// The other side of this joint, given one (part, segment) endpoint.
    /// Returns `None` if `(part_id, segment_id)` is not one of this joint's
    /// two sides.
    pub fn opposing(&self, part_id: usize, segment_id: usize) -> Option<(usize, usize)> {
        if self.parts[0] == part_id && self.segments[0] == segment_id {
            Some((self.parts[1], self.segments[1]))
        } else if self.parts[1] == part_id && self.segments[1] == segment_id {
            Some((self.parts[0], self.segments[0]))
        } else {
            None
        }
    }

    /// Maps a parametric position on the queried side to its corresponding
    /// position on the opposing side, honouring `inverted`.
    pub fn map_parameter(&self, t: f64) -> f64 {
        if self.inverted {
            1.0 - t
        } else {
            t
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposing_resolves_either_side() {
        let joint = Joint::new([0, 1], [2, 3], false);
        assert_eq!(joint.opposing(0, 2), Some((1, 3)));
        assert_eq!(joint.opposing(1, 3), Some((0, 2)));
        assert_eq!(joint.opposing(0, 3), None);
    }

    #[test]
    fn inverted_joint_flips_parameter() {
        let joint = Joint::new([0, 1], [0, 0], true);
        assert_eq!(joint.map_parameter(0.25), 0.75);
        let not_inverted = Joint::new([0, 1], [0, 0], false);
        assert_eq!(not_inverted.map_parameter(0.25), 0.25);
    }
}
