use thiserror::Error;

/// Fatal tessellator failures (§7: `CoreError` variants the tessellator can
/// raise). Exceeding the iteration budget is not fatal — see
/// [`crate::TessellationOutcome::exceeded_iterations`].
#[derive(Debug, Error, PartialEq)]
pub enum TessellatorError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("unknown tiling algorithm: {0}")]
    UnknownAlgorithm(String),
}
