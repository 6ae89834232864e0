// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Histories
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Time-indexed snapshots written once per transport step.
//!
//! Lookups of a step that was never written return the zero sentinel
//! (`{U-235: 0}`, mass 0) rather than an error.

use repo_types::material::{zero_conc_map, Composition, Iso, IsoConcMap, Time};
use std::collections::BTreeMap;

/// Contained composition and mass per step.
#[derive(Debug, Clone, Default)]
pub struct VectorHistory {
    entries: BTreeMap<Time, (Composition, f64)>,
}

impl VectorHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, time: Time, composition: Composition, mass: f64) {
        self.entries.insert(time, (composition, mass));
    }

    pub fn at(&self, time: Time) -> (Composition, f64) {
        self.entries
            .get(&time)
            .cloned()
            .unwrap_or_else(|| (Composition::zero(), 0.0))
    }

    pub fn mass_at(&self, time: Time) -> f64 {
        self.entries.get(&time).map_or(0.0, |(_, mass)| *mass)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-isotope concentration per step.
#[derive(Debug, Clone, Default)]
pub struct ConcentrationHistory {
    entries: BTreeMap<Time, IsoConcMap>,
}

impl ConcentrationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, time: Time, concentrations: IsoConcMap) {
        self.entries.insert(time, concentrations);
    }

    pub fn at(&self, time: Time) -> IsoConcMap {
        self.entries.get(&time).cloned().unwrap_or_else(zero_conc_map)
    }

    pub fn at_iso(&self, time: Time, iso: Iso) -> f64 {
        self.entries
            .get(&time)
            .and_then(|map| map.get(&iso))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
