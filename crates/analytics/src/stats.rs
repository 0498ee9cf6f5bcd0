//! Trailing-statistics helpers over plain `f64` series.
//!
//! Moments follow the usual sample conventions: the standard deviation divides by
//! `n - 1`, skewness is the adjusted Fisher-Pearson coefficient and kurtosis is the
//! bias-corrected excess kurtosis.

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation. `NaN` for fewer than two values.
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Central moment sums `(Σd², Σd³, Σd⁴)` around the mean.
fn moment_sums(values: &[f64]) -> (f64, f64, f64) {
    let m = mean(values);
    values.iter().fold((0.0, 0.0, 0.0), |(m2, m3, m4), v| {
        let d = v - m;
        let d2 = d * d;
        (m2 + d2, m3 + d2 * d, m4 + d2 * d2)
    })
}

/// Adjusted Fisher-Pearson skewness. `None` for fewer than three values; zero for a
/// constant series.
pub fn skewness(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }
    let (m2, m3, _) = moment_sums(values);
    if m2 <= f64::EPSILON * f64::EPSILON {
        return Some(0.0);
    }
    let n = n as f64;
    Some(n * (n - 1.0).sqrt() / (n - 2.0) * (m3 / m2.powf(1.5)))
}

/// Bias-corrected excess kurtosis. `None` for fewer than four values; zero for a
/// constant series.
pub fn excess_kurtosis(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 4 {
        return None;
    }
    let (m2, _, m4) = moment_sums(values);
    if m2 <= f64::EPSILON * f64::EPSILON {
        return Some(0.0);
    }
    let n = n as f64;
    let numerator = n * (n + 1.0) * (n - 1.0) * m4;
    let denominator = (n - 2.0) * (n - 3.0) * m2 * m2;
    let adjustment = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
    Some(numerator / denominator - adjustment)
}

/// Maximum drawdown of a return series, as a non-positive fraction.
///
/// The series is compounded into a cumulative curve; the result is the minimum of
/// `cumulative / running_peak - 1`.
pub fn max_drawdown(returns: &[f64]) -> f64 {
    let mut cumulative = 1.0;
    let mut peak = f64::NEG_INFINITY;
    let mut worst: f64 = 0.0;

    for r in returns {
        cumulative *= 1.0 + r;
        if cumulative > peak {
            peak = cumulative;
        }
        worst = worst.min(cumulative / peak - 1.0);
    }

    worst
}

/// Share of values strictly above zero.
pub fn positive_share(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().filter(|v| **v > 0.0).count() as f64 / values.len() as f64
}

/// Sum of the `n` largest values.
pub fn top_n_sum(values: &[f64], n: usize) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    sorted.iter().take(n).sum()
}

/// Index of the largest value; the first one wins ties.
pub fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
            Some((_, b)) if *v <= b => best,
            _ => Some((i, *v)),
        })
        .map(|(i, _)| i)
}
