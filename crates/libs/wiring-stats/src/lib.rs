//! Cross-trial statistical reduction (§4.6): a bootstrap center/CI
//! estimator over Monte-Carlo samples, with a fixed percentile set and
//! sentinel handling for empty input.

mod bootstrap;
mod percentile;

pub use bootstrap::{bootstrap_center_ci, CenterMode, StatRecord};
pub use percentile::{max_of, mean, median_sorted, percentile_sorted, EMPTY_SAMPLE_SENTINEL};
