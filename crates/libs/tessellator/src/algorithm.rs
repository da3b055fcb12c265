use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The catalogue of 13 named tilings (§4.1): the 11 Archimedean /
/// semi-regular tilings plus two non-Archimedean variants of `4.6.12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// `3.3.3.3.3.3`
    Triangular,
    /// `3.3.3.3.6`
    SnubHexagonal,
    /// `3.3.3.4.4`
    ElongatedTriangular,
    /// `3.3.4.3.4`
    SnubSquare,
    /// `3.4.6.4`
    RhombiTrihexagonal,
    /// `3.6.3.6`
    Trihexagonal,
    /// `3.12.12`
    TruncatedHexagonal,
    /// `4.4.4.4`
    Square,
    /// `4.6.12`
    TruncatedTrihexagonal,
    /// `4.8.8`
    TruncatedSquare,
    /// `6.6.6`
    Hexagonal,
    /// `4.6.12.a` (non-Archimedean)
    TruncatedTrihexagonalA,
    /// `4.6.12.b` (non-Archimedean)
    TruncatedTrihexagonalB,
}

impl Algorithm {
    pub const ALL: [Algorithm; 13] = [
        Algorithm::Triangular,
        Algorithm::SnubHexagonal,
        Algorithm::ElongatedTriangular,
        Algorithm::SnubSquare,
        Algorithm::RhombiTrihexagonal,
        Algorithm::Trihexagonal,
        Algorithm::TruncatedHexagonal,
        Algorithm::Square,
        Algorithm::TruncatedTrihexagonal,
        Algorithm::TruncatedSquare,
        Algorithm::Hexagonal,
        Algorithm::TruncatedTrihexagonalA,
        Algorithm::TruncatedTrihexagonalB,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Triangular => "3.3.3.3.3.3",
            Algorithm::SnubHexagonal => "3.3.3.3.6",
            Algorithm::ElongatedTriangular => "3.3.3.4.4",
            Algorithm::SnubSquare => "3.3.4.3.4",
            Algorithm::RhombiTrihexagonal => "3.4.6.4",
            Algorithm::Trihexagonal => "3.6.3.6",
            Algorithm::TruncatedHexagonal => "3.12.12",
            Algorithm::Square => "4.4.4.4",
            Algorithm::TruncatedTrihexagonal => "4.6.12",
            Algorithm::TruncatedSquare => "4.8.8",
            Algorithm::Hexagonal => "6.6.6",
            Algorithm::TruncatedTrihexagonalA => "4.6.12.a",
            Algorithm::TruncatedTrihexagonalB => "4.6.12.b",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl Serialize for Algorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// The vertex configuration of one tiling: the interior angles (degrees,
/// summing to 360) to step through at each visited vertex, and the
/// `next_angle_index` permutation used to pick the starting angle-index
/// when recursing at the neighbour reached via a given outgoing edge.
pub struct VertexConfig {
    pub angles: &'static [f64],
    pub next_angle_index: &'static [usize],
    pub mirror: Option<&'static [f64]>,
}

pub fn vertex_config(algorithm: Algorithm) -> VertexConfig {
    match algorithm {
        Algorithm::Triangular => VertexConfig {
            angles: &[60.0, 60.0, 60.0, 60.0, 60.0, 60.0],
            next_angle_index: &[1, 2, 3, 4, 5, 0],
            mirror: None,
        },
        Algorithm::SnubHexagonal => VertexConfig {
            angles: &[60.0, 60.0, 60.0, 60.0, 120.0],
            next_angle_index: &[1, 3, 2, 0, 4],
            mirror: None,
        },
        Algorithm::ElongatedTriangular => VertexConfig {
            angles: &[60.0, 60.0, 60.0, 90.0, 90.0],
            next_angle_index: &[1, 2, 0, 4, 3],
            mirror: None,
        },
        Algorithm::SnubSquare => VertexConfig {
            angles: &[60.0, 60.0, 90.0, 60.0, 90.0],
            next_angle_index: &[1, 3, 2, 0, 4],
            mirror: None,
        },
        Algorithm::RhombiTrihexagonal => VertexConfig {
            angles: &[60.0, 90.0, 120.0, 90.0],
            next_angle_index: &[0, 3, 2, 1],
            mirror: None,
        },
        Algorithm::Trihexagonal => VertexConfig {
            angles: &[60.0, 120.0, 60.0, 120.0],
            next_angle_index: &[0, 3, 2, 1],
            mirror: None,
        },
        Algorithm::TruncatedHexagonal => VertexConfig {
            angles: &[60.0, 150.0, 150.0],
            next_angle_index: &[0, 2, 1],
            mirror: None,
        },
        Algorithm::Square => VertexConfig {
            angles: &[90.0, 90.0, 90.0, 90.0],
            next_angle_index: &[1, 2, 3, 0],
            mirror: None,
        },
        Algorithm::TruncatedTrihexagonal => VertexConfig {
            angles: &[90.0, 120.0, 150.0],
            next_angle_index: &[0, 2, 1],
            mirror: Some(&[90.0, 150.0, 120.0]),
        },
        Algorithm::TruncatedSquare => VertexConfig {
            angles: &[90.0, 135.0, 135.0],
            next_angle_index: &[0, 2, 1],
            mirror: None,
        },
        Algorithm::Hexagonal => VertexConfig {
            angles: &[120.0, 120.0, 120.0],
            next_angle_index: &[1, 2, 0],
            mirror: None,
        },
        Algorithm::TruncatedTrihexagonalA => VertexConfig {
            angles: &[90.0, 120.0, 150.0],
            next_angle_index: &[2, 1, 0],
            mirror: None,
        },
        Algorithm::TruncatedTrihexagonalB => VertexConfig {
            angles: &[90.0, 120.0, 150.0],
            next_angle_index: &[0, 2, 1],
            mirror: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_all_names() {
        for algorithm in Algorithm::ALL {
            let parsed: Algorithm = algorithm.name().parse().unwrap();
            assert_eq!(parsed, algorithm);
        }
    }

    #[test]
    fn unknown_name_fails_to_parse() {
        assert!("3.3.3".parse::<Algorithm>().is_err());
    }

    #[test]
    fn every_config_angles_sum_to_360() {
        for algorithm in Algorithm::ALL {
            let config = vertex_config(algorithm);
            let sum: f64 = config.angles.iter().sum();
            assert!((sum - 360.0).abs() < 1e-9, "{algorithm} sums to {sum}");
            assert_eq!(config.angles.len(), config.next_angle_index.len());
        }
    }
}
