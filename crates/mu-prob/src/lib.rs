//! Probability building blocks for mustat.
//!
//! - sample moments over plain slices
//! - Normal likelihood in the `(mu, ln sigma)` parameterization
//! - small numeric helpers (clamped exp, cosine clipping, pair counting)

pub mod math;
pub mod moments;
pub mod normal;
