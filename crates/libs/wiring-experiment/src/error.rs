use thiserror::Error;

/// The fatal error kinds of §7. `DuplicateEdge`, `EmptySample` and
/// `ExceededIterations` are deliberately absent — they are logged and
/// folded into best-effort results instead, never returned as `Err`.
#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("unknown tessellation algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("graph inconsistency: expected {expected} vertices, found {found}")]
    GraphInconsistency { expected: usize, found: usize },

    #[error("no segment found within tolerance of point on part {part_id}")]
    NoSuchSegment { part_id: usize },
}

impl From<tessellator::TessellatorError> for ExperimentError {
    fn from(value: tessellator::TessellatorError) -> Self {
        match value {
            tessellator::TessellatorError::InvalidGeometry(msg) => {
                ExperimentError::InvalidGeometry(msg)
            }
            tessellator::TessellatorError::UnknownAlgorithm(msg) => {
                ExperimentError::UnknownAlgorithm(msg)
            }
        }
    }
}
