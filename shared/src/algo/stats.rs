//! Population statistics over pixel samples.
//!
//! All functions return `None` for empty input rather than dividing by zero,
//! so callers decide how an empty sample should be reported.

/// Arithmetic mean of the samples.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut count = 0usize;
    let mut sum = 0.0;
    for v in values {
        sum += v;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

/// Mean of the squared samples (signal power).
pub fn mean_square<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    mean(values.into_iter().map(|v| v * v))
}

/// Population variance (divides by `n`).
///
/// Uses a two-pass formulation so a constant input yields exactly zero.
pub fn population_variance(values: &[f64]) -> Option<f64> {
    let mu = mean(values.iter().copied())?;
    let variance = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance)
}

/// Population standard deviation.
pub fn population_std(values: &[f64]) -> Option<f64> {
    population_variance(values).map(f64::sqrt)
}

/// Shannon entropy in bits of a histogram of counts.
///
/// Empty bins contribute nothing. Returns 0 for an all-zero histogram.
pub fn shannon_entropy_bits(counts: &[u64]) -> f64 {
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}
