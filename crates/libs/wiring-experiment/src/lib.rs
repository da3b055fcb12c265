//! Adjusted-garment sampling, cross-seam jumper synthesis, the two-tree
//! routing engine, per-trial accounting and experiment orchestration (§4.2–
//! §4.6, §6.4 of SPEC_FULL.md).

pub mod accounting;
pub mod config;
pub mod error;
pub mod experiment;
pub mod garment;
pub mod graph;
pub mod jumper;
mod keying;
pub mod result;
pub mod routing;

pub use accounting::{SensorSampleRow, SinkAccounting, SinkTrialRow, Tree, TreeDepthStats};
pub use config::{ExperimentConfig, FixedSink, DESTINATION_POINTS, JOINT_RADII, NODE_DISTANCES, SOURCE_POINTS};
pub use error::ExperimentError;
pub use experiment::Experiment;
pub use garment::AdjustedGarment;
pub use graph::{EdgeEntry, EdgeKind, Graph, RouteRecord, VertexRecord};
pub use jumper::JumperSynthesiser;
pub use result::{ExperimentResult, PathStatistics};
pub use routing::{RoutingEngine, SinkAnchor};
