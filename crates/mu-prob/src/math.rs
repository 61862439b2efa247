//! Small numerically-stable math utilities.

/// Exponential with a conservative clamp to avoid overflow.
///
/// The optimizer may probe extreme `ln sigma` values during a line search; clamping keeps
/// `exp(2 ln sigma)` finite and non-zero so the objective stays finite.
#[inline]
pub fn exp_clamped(x: f64) -> f64 {
    x.clamp(-700.0, 700.0).exp()
}

/// Clamp a cosine into `[-1, 1]`, absorbing floating-point overshoot.
///
/// `NaN` is passed through unchanged.
#[inline]
pub fn clip_unit(c: f64) -> f64 {
    c.clamp(-1.0, 1.0)
}

/// Number of unordered pairs of `n` items: `n*(n-1)/2`.
#[inline]
pub const fn n_pairs(n: usize) -> usize {
    if n < 2 { 0 } else { n * (n - 1) / 2 }
}
