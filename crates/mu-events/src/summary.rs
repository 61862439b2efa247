//! Per-event reduction of pairwise angles.
//!
//! Events without pairs have no statistics: [`EventAngleSummary::stats`] is `None`, and
//! the flat accessors report `NaN`, never `0.0`.

use mu_prob::moments::min_mean_max;
use serde::Serialize;

use crate::jagged::JaggedCol;

/// Min / mean / max of an event's angles, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleStats {
    /// Smallest angle.
    pub min_deg: f64,
    /// Arithmetic mean.
    pub mean_deg: f64,
    /// Largest angle.
    pub max_deg: f64,
}

/// Summary of one event's pair angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventAngleSummary {
    /// Number of pairs in the event.
    pub n_pairs: usize,
    /// `None` when `n_pairs == 0`.
    pub stats: Option<AngleStats>,
}

impl EventAngleSummary {
    /// Summarize one event's angles.
    pub fn from_angles(angles: &[f64]) -> Self {
        let stats = min_mean_max(angles).map(|(min_deg, mean_deg, max_deg)| AngleStats {
            min_deg,
            mean_deg,
            max_deg,
        });
        Self { n_pairs: angles.len(), stats }
    }

    /// Smallest angle, or `NaN` if undefined.
    pub fn min_deg(&self) -> f64 {
        self.stats.map_or(f64::NAN, |s| s.min_deg)
    }

    /// Mean angle, or `NaN` if undefined.
    pub fn mean_deg(&self) -> f64 {
        self.stats.map_or(f64::NAN, |s| s.mean_deg)
    }

    /// Largest angle, or `NaN` if undefined.
    pub fn max_deg(&self) -> f64 {
        self.stats.map_or(f64::NAN, |s| s.max_deg)
    }
}

/// Summaries for every event of a jagged angle column, in event order.
pub fn summarize_angles(angles: &JaggedCol) -> Vec<EventAngleSummary> {
    angles.rows().map(EventAngleSummary::from_angles).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defined_and_undefined_events() {
        let angles = JaggedCol::from_rows(&[vec![90.0], vec![], vec![10.0, 50.0, 30.0]]);
        let s = summarize_angles(&angles);
        assert_eq!(s.len(), 3);

        assert_eq!(s[0].n_pairs, 1);
        assert_eq!((s[0].min_deg(), s[0].mean_deg(), s[0].max_deg()), (90.0, 90.0, 90.0));

        assert_eq!(s[1].n_pairs, 0);
        assert!(s[1].stats.is_none());
        assert!(s[1].min_deg().is_nan() && s[1].mean_deg().is_nan() && s[1].max_deg().is_nan());

        assert_eq!(s[2].n_pairs, 3);
        assert_eq!(s[2].min_deg(), 10.0);
        assert!((s[2].mean_deg() - 30.0).abs() < 1e-12);
        assert_eq!(s[2].max_deg(), 50.0);
    }

    #[test]
    fn test_legitimate_zero_is_not_undefined() {
        let s = EventAngleSummary::from_angles(&[0.0]);
        assert_eq!(s.mean_deg(), 0.0);
        assert!(s.stats.is_some());
    }
}
