//! Cartesian momentum from collider coordinates.

/// Three-momentum `(px, py, pz)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Momentum3 {
    /// x component.
    pub px: f64,
    /// y component.
    pub py: f64,
    /// z component (beam axis).
    pub pz: f64,
}

impl Momentum3 {
    /// Momentum from components.
    pub const fn new(px: f64, py: f64, pz: f64) -> Self {
        Self { px, py, pz }
    }

    /// `(pt cos φ, pt sin φ, pt sinh η)`. `phi` need not be wrapped to `[-π, π]`.
    pub fn from_pt_eta_phi(pt: f64, eta: f64, phi: f64) -> Self {
        let (sin_phi, cos_phi) = phi.sin_cos();
        Self { px: pt * cos_phi, py: pt * sin_phi, pz: pt * eta.sinh() }
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: &Momentum3) -> f64 {
        self.px * other.px + self.py * other.py + self.pz * other.pz
    }

    /// Euclidean norm `|p|`.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Cosine of the opening angle. `NaN` when either vector has zero norm.
    #[inline]
    pub fn cos_angle(&self, other: &Momentum3) -> f64 {
        self.dot(other) / (self.norm() * other.norm())
    }
}
