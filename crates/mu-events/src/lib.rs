//! # mu-events
//!
//! Ragged per-event particle tables and the pairwise opening-angle pipeline:
//!
//! ```
//! use mu_events::{EventAngles, EventId, RaggedEventTable};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let table = RaggedEventTable::from_nested(
//!     EventId::sequential(2),
//!     &[vec![1.0, 1.0], vec![1.0]],
//!     &[vec![0.0, 0.0], vec![0.0]],
//!     &[vec![0.0, FRAC_PI_2], vec![0.0]],
//! )
//! .unwrap();
//! let summary = EventAngles::from_table(&table).unwrap().summary_table();
//! assert_eq!(summary.rows()[0].n_pairs, 1);
//! assert!(summary.rows()[1].mean_angle_deg.is_nan());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Pairwise opening angles.
pub mod angles;
/// CSR jagged columns.
pub mod jagged;
/// Momentum vectors from `(pt, eta, phi)`.
pub mod kinematics;
/// Flat summary / pair rows.
pub mod output;
/// Per-event angle statistics.
pub mod summary;
/// Event identifiers and the ragged event table.
pub mod table;

pub use angles::{UNDEFINED_COSINE_FALLBACK, opening_angle_deg, pair_indices, pairwise_angles};
pub use jagged::JaggedCol;
pub use kinematics::Momentum3;
pub use output::{EventAngles, EventSummaryTable, PairRow, SummaryRow};
pub use summary::{AngleStats, EventAngleSummary, summarize_angles};
pub use table::{EventId, ParticleRow, RaggedEventTable};
