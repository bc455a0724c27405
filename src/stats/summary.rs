//! Summary statistics feeding the derived traces.
//!
//! All functions are pure. An empty input yields `None`, the explicit
//! "undefined" result that callers must check before emitting a trace.

/// Arithmetic mean of already-filtered values.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation: `sqrt(mean((x - mean(x))^2))`.
pub fn standard_deviation(values: &[f64]) -> Option<f64> {
    let mu = mean(values)?;
    let variance = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Percentile `p` (0..=100) with linear interpolation between adjacent
/// order statistics at rank `(p / 100) * (n - 1)`.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    match values.len() {
        0 => return None,
        1 => return Some(values[0]),
        _ => {}
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let frac = rank - lower as f64;
    Some(sorted[lower] + frac * (sorted[upper] - sorted[lower]))
}

/// Mean, population stddev and the 10th/90th percentiles in one pass over
/// the same filtered values.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Summary {
    /// Number of values summarized.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// 10th percentile.
    pub p10: f64,
    /// 90th percentile.
    pub p90: f64,
}

impl Summary {
    /// Summarize `values`, or `None` when there is nothing to summarize.
    pub fn of(values: &[f64]) -> Option<Self> {
        Some(Self {
            count: values.len(),
            mean: mean(values)?,
            std_dev: standard_deviation(values)?,
            p10: percentile(values, 10.0)?,
            p90: percentile(values, 90.0)?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stats/summary.rs"]
mod tests;
