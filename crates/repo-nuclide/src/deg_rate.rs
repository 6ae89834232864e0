// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Degradation-Rate Nuclide Model
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Release limited only by matrix degradation.
//!
//! The contained inventory is spread over the whole shell volume; the
//! degraded fraction of it is offered to the parent.

use crate::boundary;
use crate::degradation::Degradation;
use crate::history::{ConcentrationHistory, VectorHistory};
use crate::inventory::Inventory;
use crate::model::{NuclideModel, NuclideModelKind, SourceTerm};
use repo_math::aggregate::{comp_to_conc_map, scale_conc_map};
use repo_types::config::NuclideModelConfig;
use repo_types::error::RepoResult;
use repo_types::geometry::Geometry;
use repo_types::mat_data::MatDataTable;
use repo_types::material::{Composition, ConcGradMap, IsoConcMap, IsoFluxMap, Time, WasteBatch};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DegRateNuclide {
    geom: Geometry,
    mat_table: Arc<MatDataTable>,
    degradation: Degradation,
    inventory: Inventory,
    vec_hist: VectorHistory,
    conc_hist: ConcentrationHistory,
    last_updated: Time,
}

impl DegRateNuclide {
    pub const NAME: &'static str = "DegRateNuclide";

    pub fn new(deg_rate: f64, mat_table: Arc<MatDataTable>) -> RepoResult<Self> {
        Ok(DegRateNuclide {
            geom: Geometry::default(),
            mat_table,
            degradation: Degradation::new(deg_rate, 0)?,
            inventory: Inventory::new(),
            vec_hist: VectorHistory::new(),
            conc_hist: ConcentrationHistory::new(),
            last_updated: 0,
        })
    }

    pub fn from_config(cfg: &NuclideModelConfig, mat_table: Arc<MatDataTable>) -> RepoResult<Self> {
        Self::new(cfg.degradation, mat_table)
    }

    pub fn deg_rate(&self) -> f64 {
        self.degradation.rate()
    }

    pub fn set_deg_rate(&mut self, rate: f64) -> RepoResult<()> {
        self.degradation.set_rate(rate)
    }

    pub fn tot_deg(&self) -> f64 {
        self.degradation.total()
    }

    pub fn last_degraded(&self) -> Time {
        self.degradation.last_degraded()
    }

    pub fn mat_table(&self) -> &MatDataTable {
        &self.mat_table
    }

    pub fn fresh_copy(&self, time: Time) -> Self {
        let mut copy = DegRateNuclide {
            geom: self.geom.clone(),
            mat_table: Arc::clone(&self.mat_table),
            degradation: self.degradation.restarted_at(time),
            inventory: Inventory::new(),
            vec_hist: VectorHistory::new(),
            conc_hist: ConcentrationHistory::new(),
            last_updated: time,
        };
        copy.update_histories(time);
        copy
    }

    fn update_histories(&mut self, time: Time) {
        let (composition, mass) = self.inventory.sum();
        let conc = comp_to_conc_map(&composition, mass, self.geom.volume());
        self.vec_hist.record(time, composition, mass);
        self.conc_hist.record(time, conc);
    }

    fn current_conc(&self) -> IsoConcMap {
        self.conc_hist.at(self.last_updated)
    }
}

impl NuclideModel for DegRateNuclide {
    fn kind(&self) -> NuclideModelKind {
        NuclideModelKind::DegRate
    }

    fn geom(&self) -> &Geometry {
        &self.geom
    }

    fn geom_mut(&mut self) -> &mut Geometry {
        &mut self.geom
    }

    fn wastes(&self) -> &[WasteBatch] {
        self.inventory.wastes()
    }

    fn absorb(&mut self, batch: WasteBatch) {
        self.inventory.absorb(batch);
    }

    fn extract(&mut self, composition: &Composition, mass: f64) -> RepoResult<WasteBatch> {
        self.inventory.extract(composition, mass)
    }

    fn transport_nuclides(&mut self, time: Time) {
        assert!(
            self.last_updated <= time,
            "{}: transport at t={} before last update t={}",
            Self::NAME,
            time,
            self.last_updated
        );
        let tot_deg = self.degradation.advance(time);
        self.update_histories(time);
        self.last_updated = time;
        log::trace!("{} t={time}: degraded fraction {tot_deg:.4}", Self::NAME);
    }

    fn source_term_bc(&self) -> SourceTerm {
        self.inventory.degraded_release(self.tot_deg())
    }

    fn dirichlet_bc(&self) -> IsoConcMap {
        scale_conc_map(&self.current_conc(), self.tot_deg())
    }

    fn neumann_bc(&self, c_ext: &IsoConcMap, r_ext: f64) -> RepoResult<ConcGradMap> {
        boundary::neumann(
            c_ext,
            &self.current_conc(),
            self.tot_deg(),
            r_ext,
            self.geom.radial_midpoint(),
        )
    }

    /// Diffusive flux only: this model carries no advective velocity.
    fn cauchy_bc(&self, c_ext: &IsoConcMap, r_ext: f64) -> RepoResult<IsoFluxMap> {
        let gradient = self.neumann_bc(c_ext, r_ext)?;
        Ok(boundary::cauchy(
            &gradient,
            &self.dirichlet_bc(),
            0.0,
            &self.mat_table,
        ))
    }

    fn vec_hist(&self, time: Time) -> (Composition, f64) {
        self.vec_hist.at(time)
    }

    fn conc_hist(&self, time: Time) -> IsoConcMap {
        self.conc_hist.at(time)
    }

    fn last_updated(&self) -> Time {
        self.last_updated
    }
}
