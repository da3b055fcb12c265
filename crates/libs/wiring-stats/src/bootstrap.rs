use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::percentile::{max_of, mean, median_sorted, percentile_sorted, EMPTY_SAMPLE_SENTINEL};

const RESAMPLES: usize = 1000;
const EXTENDED_PERCENTILES: [f64; 6] = [5.0, 10.0, 25.0, 75.0, 90.0, 95.0];

/// Which point statistic a bootstrap resample reduces to (§4.6: "Default
/// center is the median ... Two alternate center modes: max, mean").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenterMode {
    Median,
    Max,
    Mean,
}

impl CenterMode {
    fn apply(self, sorted: &[f64]) -> f64 {
        match self {
            CenterMode::Median => median_sorted(sorted),
            CenterMode::Max => max_of(sorted),
            CenterMode::Mean => mean(sorted),
        }
    }
}

/// A cross-trial statistic record (§6.2): either the plain `[center, lo,
/// hi]` triple, or the extended heptuple that also carries the fixed
/// percentile set and the arithmetic mean of the raw samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatRecord {
    Triple {
        center: f64,
        ci_low: f64,
        ci_high: f64,
    },
    Heptuple {
        center: f64,
        ci_low: f64,
        ci_high: f64,
        percentiles: [f64; 6],
        mean: f64,
    },
}

impl StatRecord {
    pub fn center(&self) -> f64 {
        match self {
            StatRecord::Triple { center, .. } | StatRecord::Heptuple { center, .. } => *center,
        }
    }

    fn empty(extended: bool) -> Self {
        if extended {
            StatRecord::Heptuple {
                center: EMPTY_SAMPLE_SENTINEL,
                ci_low: EMPTY_SAMPLE_SENTINEL,
                ci_high: EMPTY_SAMPLE_SENTINEL,
                percentiles: [EMPTY_SAMPLE_SENTINEL; 6],
                mean: EMPTY_SAMPLE_SENTINEL,
            }
        } else {
            StatRecord::Triple {
                center: EMPTY_SAMPLE_SENTINEL,
                ci_low: EMPTY_SAMPLE_SENTINEL,
                ci_high: EMPTY_SAMPLE_SENTINEL,
            }
        }
    }
}

/// Computes a bootstrap `[center, 2.5%, 97.5%]` estimate (plus, when
/// `extended`, the fixed percentile set and mean) over `samples` (§4.6).
///
/// An empty `samples` logs nothing — it is not an error condition, see §7's
/// `EmptySample` kind — and returns the `-1` sentinel record uniformly.
pub fn bootstrap_center_ci<R: Rng + ?Sized>(
    samples: &[f64],
    mode: CenterMode,
    extended: bool,
    rng: &mut R,
) -> StatRecord {
    if samples.is_empty() {
        return StatRecord::empty(extended);
    }

    let mut sorted_samples = samples.to_vec();
    sorted_samples.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let center = mode.apply(&sorted_samples);

    let n = samples.len();
    let mut resample_centers = Vec::with_capacity(RESAMPLES);
    let mut scratch = vec![0.0; n];
    for _ in 0..RESAMPLES {
        for slot in scratch.iter_mut() {
            *slot = samples[rng.gen_range(0..n)];
        }
        scratch.sort_by(|a, b| a.partial_cmp(b).unwrap());
        resample_centers.push(mode.apply(&scratch));
    }
    resample_centers.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let ci_low = percentile_sorted(&resample_centers, 2.5);
    let ci_high = percentile_sorted(&resample_centers, 97.5);

    if !extended {
        return StatRecord::Triple {
            center,
            ci_low,
            ci_high,
        };
    }

    let mut percentiles = [0.0; 6];
    for (slot, p) in percentiles.iter_mut().zip(EXTENDED_PERCENTILES) {
        *slot = percentile_sorted(&sorted_samples, p);
    }

    StatRecord::Heptuple {
        center,
        ci_low,
        ci_high,
        percentiles,
        mean: mean(&sorted_samples),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn empty_sample_yields_sentinel_triple() {
        let mut rng = StdRng::seed_from_u64(1);
        let record = bootstrap_center_ci(&[], CenterMode::Median, false, &mut rng);
        assert_eq!(
            record,
            StatRecord::Triple {
                center: -1.0,
                ci_low: -1.0,
                ci_high: -1.0
            }
        );
    }

    #[test]
    fn empty_sample_yields_sentinel_heptuple() {
        let mut rng = StdRng::seed_from_u64(1);
        let record = bootstrap_center_ci(&[], CenterMode::Median, true, &mut rng);
        match record {
            StatRecord::Heptuple { percentiles, .. } => {
                assert!(percentiles.iter().all(|p| *p == -1.0));
            }
            other => panic!("expected heptuple, got {other:?}"),
        }
    }

    #[test]
    fn single_valued_sample_has_coincident_ci() {
        let mut rng = StdRng::seed_from_u64(7);
        let record = bootstrap_center_ci(&[4.0; 32], CenterMode::Mean, false, &mut rng);
        match record {
            StatRecord::Triple { center, ci_low, ci_high } => {
                assert!((center - 4.0).abs() < 1e-9);
                assert!((ci_low - 4.0).abs() < 1e-9);
                assert!((ci_high - 4.0).abs() < 1e-9);
            }
            other => panic!("expected triple, got {other:?}"),
        }
    }

    #[test]
    fn median_center_matches_sample_median() {
        let mut rng = StdRng::seed_from_u64(42);
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let record = bootstrap_center_ci(&samples, CenterMode::Median, false, &mut rng);
        assert!((record.center() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn max_mode_returns_sample_maximum() {
        let mut rng = StdRng::seed_from_u64(3);
        let samples = vec![1.0, 9.0, 3.0];
        let record = bootstrap_center_ci(&samples, CenterMode::Max, false, &mut rng);
        assert!((record.center() - 9.0).abs() < 1e-9);
    }
}
