//! Outlier capping and trend deltas
//!
//! Chart-readability transforms: values above a rank-based percentile
//! threshold are replaced by the threshold so one spike cannot flatten the
//! rest of the series, and first-vs-last percentage change is precomputed
//! for the stat cards.

use serde::Serialize;

/// Cap `series` at the nearest-rank percentile of the accessed field.
///
/// The threshold is the ascending-sorted value at `floor(percentile/100 * n)`,
/// with the index clamped to `n - 1` so `percentile = 100` caps at the
/// maximum. Returns a new vector; the input is untouched.
pub fn cap_outliers<T, F, G>(series: &[T], get: F, set: G, percentile: f64) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
    G: Fn(&mut T, f64),
{
    if series.is_empty() {
        return Vec::new();
    }

    let mut values: Vec<f64> = series.iter().map(&get).collect();
    values.sort_by(f64::total_cmp);

    let index = ((percentile / 100.0) * values.len() as f64).floor() as usize;
    let threshold = values[index.min(values.len() - 1)];

    series
        .iter()
        .cloned()
        .map(|mut item| {
            let value = get(&item);
            set(&mut item, value.min(threshold));
            item
        })
        .collect()
}

/// Direction-tagged percentage change between two series endpoints
#[derive(Debug, Clone, Serialize)]
pub struct TrendDelta {
    pub percent: f64,
    pub formatted: String,
    pub positive: bool,
}

/// Percentage change from `start` to `end`, formatted to two decimals.
///
/// 15000 → 20000 yields "33.33%" positive; 20000 → 15000 yields "-25.00%".
pub fn percentage_change(start: f64, end: f64) -> TrendDelta {
    let percent = (end - start) / start * 100.0;
    TrendDelta {
        percent,
        formatted: format!("{:.2}%", percent),
        positive: percent >= 0.0,
    }
}
