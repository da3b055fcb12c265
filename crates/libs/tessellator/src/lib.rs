//! Fills a garment part's polygon with one of 13 named tilings (§4.1),
//! clipping the infinite plane pattern against the part's boundary as it
//! recurses outward from a seed point.

mod algorithm;
mod error;
mod hashing;
mod state;
#[allow(clippy::module_inception)]
mod tessellator;

pub use algorithm::{vertex_config, Algorithm, VertexConfig};
pub use error::TessellatorError;
pub use state::TessellationOutcome;
pub use tessellator::Tessellator;
