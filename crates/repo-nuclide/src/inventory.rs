// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Waste Inventory
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Waste batches held by one transport model.
//!
//! Tracks the cumulative mass extracted so far so that the degraded share
//! offered as a source term is never offered twice.

use crate::model::SourceTerm;
use repo_math::aggregate::{extract_from, sum_batches};
use repo_types::constants::MASS_TOLERANCE;
use repo_types::error::RepoResult;
use repo_types::material::{Composition, WasteBatch};

#[derive(Debug, Clone, Default)]
pub struct Inventory {
    wastes: Vec<WasteBatch>,
    released: f64,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wastes(&self) -> &[WasteBatch] {
        &self.wastes
    }

    pub fn absorb(&mut self, batch: WasteBatch) {
        log::debug!("absorbing {:.6e} kg", batch.mass());
        self.wastes.push(batch);
    }

    pub fn extract(&mut self, composition: &Composition, mass: f64) -> RepoResult<WasteBatch> {
        let extracted = extract_from(composition, mass, &mut self.wastes)?;
        self.released += extracted.mass();
        Ok(extracted)
    }

    pub fn sum(&self) -> (Composition, f64) {
        sum_batches(&self.wastes)
    }

    pub fn contained_mass(&self) -> f64 {
        self.sum().1
    }

    /// Mass extracted over the inventory's lifetime [kg].
    pub fn released(&self) -> f64 {
        self.released
    }

    /// Degraded share of everything ever held, less what already left.
    pub fn degraded_release(&self, degraded_fraction: f64) -> SourceTerm {
        let (composition, contained) = self.sum();
        let offered = (degraded_fraction * (contained + self.released) - self.released)
            .max(0.0)
            .min(contained);
        if offered <= MASS_TOLERANCE * (contained + self.released) {
            return SourceTerm::none();
        }
        SourceTerm {
            composition,
            mass: offered,
        }
    }
}
