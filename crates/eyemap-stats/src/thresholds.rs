//! Percentile-based threshold boundaries.
//!
//! For `num_thresholds` buckets the boundaries are the 0th, 100/n-th, …,
//! 100th percentiles of the sample (linear interpolation between order
//! statistics). Low-cardinality samples collapse adjacent percentiles;
//! the resulting empty buckets are merged into the previous bucket,
//! except the final bucket which is always kept so the last boundary
//! equals the sample maximum. The generated ranges therefore tile the
//! observed domain: every sample value falls in exactly one range.

use serde::{Deserialize, Serialize};

use crate::{Result, StatsError};

/// One value bucket produced from the percentile boundaries.
///
/// Membership is half-open (`lo <= v < hi`) for interior buckets and
/// closed (`lo <= v <= hi`) for the final bucket, so a value on a shared
/// boundary belongs to exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Lower bound, inclusive.
    pub lo: f64,
    /// Upper bound; inclusive only for the final bucket.
    pub hi: f64,
    /// Whether this is the final (upper-inclusive) bucket.
    pub last: bool,
}

impl ValueRange {
    /// Whether `value` falls in this bucket.
    pub fn contains(&self, value: f64) -> bool {
        if self.last {
            self.lo <= value && value <= self.hi
        } else {
            self.lo <= value && value < self.hi
        }
    }
}

impl std::fmt::Display for ValueRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

/// Percentile of a sorted sample with linear interpolation.
///
/// `p` is in [0, 100]. The sample must be sorted ascending and
/// non-empty; `p` outside [0, 100] is clamped.
pub fn percentile(sorted: &[f64], p: f64) -> Result<f64> {
    if sorted.is_empty() {
        return Err(StatsError::EmptySample);
    }
    let p = p.clamp(0.0, 100.0);
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Ok(sorted[lo]);
    }
    let frac = rank - lo as f64;
    Ok(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Compute `num_thresholds + 1` non-decreasing percentile boundaries
/// over a metric sample.
///
/// The first boundary equals the sample minimum and the last equals the
/// sample maximum. NaN or infinite sample values are a typed error.
pub fn calculate_thresholds(values: &[f64], num_thresholds: usize) -> Result<Vec<f64>> {
    if num_thresholds == 0 {
        return Err(StatsError::NoBuckets);
    }
    if values.is_empty() {
        return Err(StatsError::EmptySample);
    }
    for &v in values {
        if !v.is_finite() {
            return Err(StatsError::NonNumeric {
                label: "sample",
                value: v,
            });
        }
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut boundaries = Vec::with_capacity(num_thresholds + 1);
    for i in 0..=num_thresholds {
        let p = 100.0 * i as f64 / num_thresholds as f64;
        boundaries.push(percentile(&sorted, p)?);
    }
    Ok(boundaries)
}

/// Convert boundaries into value buckets, merging empty interior
/// buckets into their predecessor.
///
/// A bucket whose two boundaries coincide covers no values on its own;
/// it is dropped, and its (identical) lower bound is already covered by
/// the previous emitted bucket. The final bucket is always emitted, even
/// when zero-width, so the sample maximum stays covered.
pub fn bucket_ranges(boundaries: &[f64]) -> Vec<ValueRange> {
    if boundaries.len() < 2 {
        return Vec::new();
    }
    let n = boundaries.len() - 1;
    let mut ranges: Vec<ValueRange> = Vec::with_capacity(n);
    for i in 0..n {
        let lo = boundaries[i];
        let hi = boundaries[i + 1];
        let last = i + 1 == n;
        if hi == lo && !last {
            continue;
        }
        // Extend from the previous emitted bucket's upper bound so
        // skipped duplicates leave no gap.
        let lo = ranges.last().map_or(lo, |prev| prev.hi);
        ranges.push(ValueRange { lo, hi, last });
    }
    ranges
}
