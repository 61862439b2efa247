//! Per-event particle kinematics keyed by event identifiers.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use mu_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::jagged::JaggedCol;

/// Event identifier: `(run, luminosityBlock, event)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct EventId {
    /// Run number.
    pub run: u32,
    /// Luminosity block within the run.
    #[serde(rename = "luminosityBlock")]
    pub luminosity_block: u32,
    /// Event number within the run.
    pub event: u64,
}

impl EventId {
    /// Identifier from its three components.
    pub const fn new(run: u32, luminosity_block: u32, event: u64) -> Self {
        Self { run, luminosity_block, event }
    }

    /// `(0, 0, i)` for `i in 0..n`, used when a source carries no identifier columns.
    pub fn sequential(n: usize) -> Vec<EventId> {
        (0..n as u64).map(|i| EventId::new(0, 0, i)).collect()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.run, self.luminosity_block, self.event)
    }
}

/// One particle of one event, as found in a flat per-particle table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleRow {
    /// Owning event.
    #[serde(flatten)]
    pub id: EventId,
    /// Transverse momentum.
    pub pt: f64,
    /// Pseudorapidity.
    pub eta: f64,
    /// Azimuth (radians).
    pub phi: f64,
}

/// Ragged per-event `(pt, eta, phi)` collections with one [`EventId`] per event.
///
/// Invariants: the three columns share the same per-event lengths, there is one
/// identifier per event, and identifiers are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct RaggedEventTable {
    ids: Vec<EventId>,
    pt: JaggedCol,
    eta: JaggedCol,
    phi: JaggedCol,
}

impl RaggedEventTable {
    /// Validate and assemble a table.
    pub fn new(ids: Vec<EventId>, pt: JaggedCol, eta: JaggedCol, phi: JaggedCol) -> Result<Self> {
        pt.check_same_shape(&eta, ("pt", "eta"))?;
        pt.check_same_shape(&phi, ("pt", "phi"))?;
        if ids.len() != pt.n_entries() {
            return Err(Error::ShapeMismatch(format!(
                "{} event identifiers for {} events",
                ids.len(),
                pt.n_entries()
            )));
        }
        let mut seen: HashMap<EventId, usize> = HashMap::with_capacity(ids.len());
        for (i, id) in ids.iter().enumerate() {
            if let Some(first) = seen.insert(*id, i) {
                return Err(Error::Validation(format!(
                    "duplicate event identifier {id} at events {first} and {i}"
                )));
            }
        }
        Ok(Self { ids, pt, eta, phi })
    }

    /// Build from nested per-event vectors.
    pub fn from_nested(
        ids: Vec<EventId>,
        pt: &[Vec<f64>],
        eta: &[Vec<f64>],
        phi: &[Vec<f64>],
    ) -> Result<Self> {
        let (pt, eta, phi) =
            (JaggedCol::from_rows(pt), JaggedCol::from_rows(eta), JaggedCol::from_rows(phi));
        Self::new(ids, pt, eta, phi)
    }

    /// Group flat per-particle rows into events.
    ///
    /// Events are ordered by first appearance; particles keep their row order, including
    /// when rows of one event are not contiguous.
    pub fn from_particle_rows(rows: &[ParticleRow]) -> Result<Self> {
        let mut index: HashMap<EventId, usize> = HashMap::new();
        let mut ids: Vec<EventId> = Vec::new();
        let mut members: Vec<Vec<usize>> = Vec::new();

        for (r, row) in rows.iter().enumerate() {
            let slot = match index.entry(row.id) {
                Entry::Occupied(e) => *e.get(),
                Entry::Vacant(e) => {
                    ids.push(row.id);
                    members.push(Vec::new());
                    *e.insert(ids.len() - 1)
                }
            };
            members[slot].push(r);
        }

        let mut pt = JaggedCol::with_capacity(ids.len(), rows.len());
        let mut eta = JaggedCol::with_capacity(ids.len(), rows.len());
        let mut phi = JaggedCol::with_capacity(ids.len(), rows.len());
        for m in &members {
            pt.push_row_iter(m.iter().map(|&r| rows[r].pt));
            eta.push_row_iter(m.iter().map(|&r| rows[r].eta));
            phi.push_row_iter(m.iter().map(|&r| rows[r].phi));
        }
        log::debug!("grouped {} particle rows into {} events", rows.len(), ids.len());
        Self::new(ids, pt, eta, phi)
    }

    /// Number of events.
    pub fn n_events(&self) -> usize {
        self.ids.len()
    }

    /// Event identifiers, in event order.
    pub fn ids(&self) -> &[EventId] {
        &self.ids
    }

    /// Transverse momenta.
    pub fn pt(&self) -> &JaggedCol {
        &self.pt
    }

    /// Pseudorapidities.
    pub fn eta(&self) -> &JaggedCol {
        &self.eta
    }

    /// Azimuths.
    pub fn phi(&self) -> &JaggedCol {
        &self.phi
    }

    /// Particle count per event.
    pub fn n_particles(&self) -> Vec<usize> {
        self.pt.counts()
    }
}
