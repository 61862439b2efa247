//! Pairwise opening angles between particles of the same event.
//!
//! For every event the particles are turned into three-momenta and every unordered
//! pair `(i, j)` with `i < j` is visited, ordered by `i` then `j`. That order is part of
//! the output contract: it fixes the row order of flattened pair-level tables.
//!
//! Numerical policy:
//! - an undefined cosine (`NaN`, e.g. from a zero-norm momentum) is replaced by
//!   [`UNDEFINED_COSINE_FALLBACK`], so the pair reports 0° instead of being dropped;
//! - the cosine is clipped to `[-1, 1]` before `acos`.
//!
//! Neither case is an error.

use mu_core::Result;
use mu_prob::math::{clip_unit, n_pairs};

use crate::jagged::JaggedCol;
use crate::kinematics::Momentum3;

/// Cosine substituted when it is undefined. `1.0` maps to an opening angle of 0°.
pub const UNDEFINED_COSINE_FALLBACK: f64 = 1.0;

/// Unordered index pairs `(i, j)`, `i < j`, for `n` particles: `(0,1), (0,2), .., (1,2), ..`.
pub fn pair_indices(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}

/// Returns the angle in degrees and whether the fallback cosine was used.
#[inline]
fn angle_deg_checked(a: &Momentum3, b: &Momentum3) -> (f64, bool) {
    let cos = a.cos_angle(b);
    let (cos, fallback) =
        if cos.is_nan() { (UNDEFINED_COSINE_FALLBACK, true) } else { (cos, false) };
    (clip_unit(cos).acos().to_degrees(), fallback)
}

/// Opening angle between two momenta, in degrees within `[0, 180]`.
pub fn opening_angle_deg(a: &Momentum3, b: &Momentum3) -> f64 {
    angle_deg_checked(a, b).0
}

/// Pairwise angles for every event of three equally-shaped jagged columns.
///
/// Entry `i` of the result has `n_i * (n_i - 1) / 2` angles, where `n_i` is the particle
/// count of event `i`; events with fewer than two particles get an empty entry.
///
/// Fails with [`mu_core::Error::ShapeMismatch`] if the per-event lengths of `pt`, `eta`
/// and `phi` disagree; nothing is computed in that case.
pub fn pairwise_angles(pt: &JaggedCol, eta: &JaggedCol, phi: &JaggedCol) -> Result<JaggedCol> {
    pt.check_same_shape(eta, ("pt", "eta"))?;
    pt.check_same_shape(phi, ("pt", "phi"))?;

    let total_pairs: usize = pt.counts().into_iter().map(n_pairs).sum();
    let mut out = JaggedCol::with_capacity(pt.n_entries(), total_pairs);
    let mut momenta: Vec<Momentum3> = Vec::new();
    let mut n_fallback = 0usize;

    for ((pt_row, eta_row), phi_row) in pt.rows().zip(eta.rows()).zip(phi.rows()) {
        momenta.clear();
        momenta.extend(
            pt_row
                .iter()
                .zip(eta_row)
                .zip(phi_row)
                .map(|((&pt, &eta), &phi)| Momentum3::from_pt_eta_phi(pt, eta, phi)),
        );
        out.push_row_iter(pair_indices(momenta.len()).map(|(i, j)| {
            let (angle, fallback) = angle_deg_checked(&momenta[i], &momenta[j]);
            n_fallback += usize::from(fallback);
            angle
        }));
    }

    log::debug!("pairwise angles: {} events, {} pairs", out.n_entries(), out.n_values());
    if n_fallback > 0 {
        log::debug!("pairwise angles: {n_fallback} pairs with undefined cosine reported as 0 deg");
    }
    Ok(out)
}
