//! Sample moments over plain `f64` slices.
//!
//! Empty input never panics: location/extremum helpers return `NaN`, and
//! `variance` returns `NaN` whenever `len <= ddof`.

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Sum of squared deviations from `center`.
#[inline]
pub fn sum_sq_dev(xs: &[f64], center: f64) -> f64 {
    xs.iter().map(|&x| (x - center) * (x - center)).sum()
}

/// Variance with `ddof` delta degrees of freedom (`0` = population, `1` = Bessel).
///
/// Two-pass: mean first, then squared deviations.
pub fn variance(xs: &[f64], ddof: usize) -> f64 {
    let n = xs.len();
    if n <= ddof {
        return f64::NAN;
    }
    let m = mean(xs);
    sum_sq_dev(xs, m) / (n - ddof) as f64
}

/// Standard deviation with `ddof` delta degrees of freedom.
pub fn std_dev(xs: &[f64], ddof: usize) -> f64 {
    variance(xs, ddof).sqrt()
}

/// Minimum. `NaN` for an empty slice; a `NaN` element propagates.
pub fn min(xs: &[f64]) -> f64 {
    let mut it = xs.iter();
    let Some(&first) = it.next() else {
        return f64::NAN;
    };
    it.fold(first, |acc, &x| if x.is_nan() || acc.is_nan() { f64::NAN } else { acc.min(x) })
}

/// Maximum. `NaN` for an empty slice; a `NaN` element propagates.
pub fn max(xs: &[f64]) -> f64 {
    let mut it = xs.iter();
    let Some(&first) = it.next() else {
        return f64::NAN;
    };
    it.fold(first, |acc, &x| if x.is_nan() || acc.is_nan() { f64::NAN } else { acc.max(x) })
}

/// `(min, mean, max)` in one pass, or `None` for an empty slice.
pub fn min_mean_max(xs: &[f64]) -> Option<(f64, f64, f64)> {
    let (&first, rest) = xs.split_first()?;
    let (mut lo, mut hi, mut sum) = (first, first, first);
    for &x in rest {
        lo = lo.min(x);
        hi = hi.max(x);
        sum += x;
    }
    Some((lo, sum / xs.len() as f64, hi))
}
