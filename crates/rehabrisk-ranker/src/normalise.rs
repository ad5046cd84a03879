//! Cohort-level normalisation and imputation helpers.

/// Min-max normalisation within a given range [min_val, max_val].
/// A zero-width range carries no information and yields `neutral`.
pub fn minmax_normalise(value: f64, min_val: f64, max_val: f64, neutral: f64) -> f64 {
    if max_val == min_val {
        return neutral;
    }
    ((value - min_val) / (max_val - min_val)).clamp(0.0, 1.0)
}

/// Min-max normalise a cohort column over its observed range.
///
/// Every entry maps to `neutral` when no value is present or all present
/// values are equal. Missing entries also map to `neutral`.
/// Returns values in the same order as input.
pub fn cohort_minmax(values: &[Option<f64>], neutral: f64) -> Vec<f64> {
    let observed = values.iter().flatten().copied();
    let (min_val, max_val) = observed.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if !min_val.is_finite() || !max_val.is_finite() {
        return vec![neutral; values.len()];
    }

    values
        .iter()
        .map(|v| match v {
            Some(v) => minmax_normalise(*v, min_val, max_val, neutral),
            None => neutral,
        })
        .collect()
}

/// Median of the present values; `None` when nothing is present.
pub fn median(values: &[Option<f64>]) -> Option<f64> {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(|a, b| a.total_cmp(b));
    let mid = present.len() / 2;
    if present.len() % 2 == 0 {
        Some((present[mid - 1] + present[mid]) / 2.0)
    } else {
        Some(present[mid])
    }
}
