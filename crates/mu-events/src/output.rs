//! Flat per-event and per-pair output rows.
//!
//! Rows serialize with the column names `run`, `luminosityBlock`, `event`, ... so an external
//! CSV/Parquet/JSON writer can emit them directly. Undefined statistics are `NaN` in memory.

use mu_core::{Error, Result};
use serde::Serialize;

use crate::angles::pairwise_angles;
use crate::jagged::JaggedCol;
use crate::summary::{EventAngleSummary, summarize_angles};
use crate::table::{EventId, RaggedEventTable};

/// One row of the per-event summary table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Run number.
    pub run: u32,
    /// Luminosity block.
    #[serde(rename = "luminosityBlock")]
    pub luminosity_block: u32,
    /// Event number.
    pub event: u64,
    /// Particle count.
    pub n_mu: usize,
    /// Pair count, `n_mu * (n_mu - 1) / 2`.
    pub n_pairs: usize,
    /// Smallest pair angle (deg), `NaN` without pairs.
    pub min_angle_deg: f64,
    /// Mean pair angle (deg), `NaN` without pairs.
    pub mean_angle_deg: f64,
    /// Largest pair angle (deg), `NaN` without pairs.
    pub max_angle_deg: f64,
}

/// One row of the per-pair table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairRow {
    /// Run number.
    pub run: u32,
    /// Luminosity block.
    #[serde(rename = "luminosityBlock")]
    pub luminosity_block: u32,
    /// Event number.
    pub event: u64,
    /// Opening angle (deg).
    pub angle_deg: f64,
}

/// Per-event summary table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventSummaryTable {
    rows: Vec<SummaryRow>,
}

impl EventSummaryTable {
    /// Column names, in output order.
    pub const COLUMNS: [&'static str; 8] = [
        "run",
        "luminosityBlock",
        "event",
        "n_mu",
        "n_pairs",
        "min_angle_deg",
        "mean_angle_deg",
        "max_angle_deg",
    ];

    /// Wrap rows.
    pub fn new(rows: Vec<SummaryRow>) -> Self {
        Self { rows }
    }

    /// Rows in event order.
    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A numeric column as a sample, with undefined (`NaN`) entries dropped.
    pub fn column(&self, name: &str) -> Result<Vec<f64>> {
        let get: fn(&SummaryRow) -> f64 = match name {
            "run" => |r| r.run as f64,
            "luminosityBlock" => |r| r.luminosity_block as f64,
            "event" => |r| r.event as f64,
            "n_mu" => |r| r.n_mu as f64,
            "n_pairs" => |r| r.n_pairs as f64,
            "min_angle_deg" => |r| r.min_angle_deg,
            "mean_angle_deg" => |r| r.mean_angle_deg,
            "max_angle_deg" => |r| r.max_angle_deg,
            other => {
                return Err(Error::Validation(format!(
                    "unknown column '{other}', available: {}",
                    Self::COLUMNS.join(", ")
                )));
            }
        };
        Ok(self.rows.iter().map(get).filter(|v| !v.is_nan()).collect())
    }
}

/// Pairwise angles of every event of a table, kept together with the identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct EventAngles {
    ids: Vec<EventId>,
    n_particles: Vec<usize>,
    angles: JaggedCol,
}

impl EventAngles {
    /// Compute angles for every event of `table`.
    pub fn from_table(table: &RaggedEventTable) -> Result<Self> {
        let angles = pairwise_angles(table.pt(), table.eta(), table.phi())?;
        Ok(Self { ids: table.ids().to_vec(), n_particles: table.n_particles(), angles })
    }

    /// Event identifiers.
    pub fn ids(&self) -> &[EventId] {
        &self.ids
    }

    /// Angles (deg), one entry per event in pair order.
    pub fn angles(&self) -> &JaggedCol {
        &self.angles
    }

    /// Per-event summaries.
    pub fn summaries(&self) -> Vec<EventAngleSummary> {
        summarize_angles(&self.angles)
    }

    /// One summary row per event.
    pub fn summary_table(&self) -> EventSummaryTable {
        let rows = self
            .ids
            .iter()
            .zip(&self.n_particles)
            .zip(self.summaries())
            .map(|((id, &n_mu), s)| SummaryRow {
                run: id.run,
                luminosity_block: id.luminosity_block,
                event: id.event,
                n_mu,
                n_pairs: s.n_pairs,
                min_angle_deg: s.min_deg(),
                mean_angle_deg: s.mean_deg(),
                max_angle_deg: s.max_deg(),
            })
            .collect();
        EventSummaryTable::new(rows)
    }

    /// One row per pair: event order, then pair order within the event.
    pub fn pair_rows(&self) -> Vec<PairRow> {
        let mut out = Vec::with_capacity(self.angles.n_values());
        for (id, angles) in self.ids.iter().zip(self.angles.rows()) {
            out.extend(angles.iter().map(|&angle_deg| PairRow {
                run: id.run,
                luminosity_block: id.luminosity_block,
                event: id.event,
                angle_deg,
            }));
        }
        out
    }
}
