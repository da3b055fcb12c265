/// Sentinel value for every field of a statistic record built from an empty
/// sample (§4.6: "Empty input yields sentinel `-1` values uniformly").
pub const EMPTY_SAMPLE_SENTINEL: f64 = -1.0;

/// Linear-interpolation percentile over an already-sorted slice, matching
/// the conventional `numpy.percentile` default.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return EMPTY_SAMPLE_SENTINEL;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let fraction = rank - lo as f64;
    sorted[lo] + fraction * (sorted[hi] - sorted[lo])
}

pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return EMPTY_SAMPLE_SENTINEL;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

pub fn median_sorted(sorted: &[f64]) -> f64 {
    percentile_sorted(sorted, 50.0)
}

pub fn max_of(data: &[f64]) -> f64 {
    data.iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max)
}
