// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — One-Dimensional Profile Nuclide Model
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! One-dimensional advective-dispersive medium with constant inlet and
//! initial concentrations.
//!
//! The concentration profile is evaluated at the radial midpoint only, and
//! [`OneDimPpmNuclide::conc_profile`] is a uniform placeholder: it returns
//! the volumetric pore concentration `C_0 = m / V_f` at every radius and
//! time. An analytic advection-dispersion solution would replace it.

use crate::boundary;
use crate::history::{ConcentrationHistory, VectorHistory};
use crate::inventory::Inventory;
use crate::model::{NuclideModel, NuclideModelKind, SourceTerm};
use repo_math::aggregate::comp_to_conc_map;
use repo_math::volumes::{fluid_volume, validate_finite_pos, validate_percent};
use repo_types::config::NuclideModelConfig;
use repo_types::constants::DEFAULT_BULK_DENSITY;
use repo_types::error::RepoResult;
use repo_types::geometry::Geometry;
use repo_types::mat_data::MatDataTable;
use repo_types::material::{Composition, ConcGradMap, IsoConcMap, IsoFluxMap, Time, WasteBatch};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct OneDimPpmNuclide {
    geom: Geometry,
    mat_table: Arc<MatDataTable>,
    /// Initial concentration C_i [kg/m^3].
    initial_concentration: f64,
    /// Inlet concentration C_0 [kg/m^3].
    source_concentration: f64,
    advective_velocity: f64,
    porosity: f64,
    /// Bulk density [kg/m^3].
    bulk_density: f64,
    inventory: Inventory,
    vec_hist: VectorHistory,
    conc_hist: ConcentrationHistory,
    last_updated: Time,
}

impl OneDimPpmNuclide {
    pub const NAME: &'static str = "OneDimPPMNuclide";

    pub fn new(mat_table: Arc<MatDataTable>) -> Self {
        OneDimPpmNuclide {
            geom: Geometry::default(),
            mat_table,
            initial_concentration: 0.0,
            source_concentration: 0.0,
            advective_velocity: 0.0,
            porosity: 0.0,
            bulk_density: DEFAULT_BULK_DENSITY,
            inventory: Inventory::new(),
            vec_hist: VectorHistory::new(),
            conc_hist: ConcentrationHistory::new(),
            last_updated: 0,
        }
    }

    pub fn from_config(cfg: &NuclideModelConfig, mat_table: Arc<MatDataTable>) -> RepoResult<Self> {
        let mut model = Self::new(mat_table);
        model.set_porosity(cfg.porosity)?;
        model.set_bulk_density(cfg.bulk_density)?;
        model.set_advective_velocity(cfg.advective_velocity);
        model.set_initial_concentration(cfg.initial_concentration);
        model.set_source_concentration(cfg.source_concentration);
        Ok(model)
    }

    pub fn initial_concentration(&self) -> f64 {
        self.initial_concentration
    }

    pub fn set_initial_concentration(&mut self, c_i: f64) {
        self.initial_concentration = c_i;
    }

    pub fn source_concentration(&self) -> f64 {
        self.source_concentration
    }

    pub fn set_source_concentration(&mut self, c_0: f64) {
        self.source_concentration = c_0;
    }

    pub fn advective_velocity(&self) -> f64 {
        self.advective_velocity
    }

    pub fn set_advective_velocity(&mut self, velocity: f64) {
        self.advective_velocity = velocity;
    }

    pub fn porosity(&self) -> f64 {
        self.porosity
    }

    pub fn set_porosity(&mut self, porosity: f64) -> RepoResult<()> {
        self.porosity = validate_percent("porosity", porosity)?;
        Ok(())
    }

    pub fn bulk_density(&self) -> f64 {
        self.bulk_density
    }

    pub fn set_bulk_density(&mut self, rho: f64) -> RepoResult<()> {
        self.bulk_density = validate_finite_pos("bulk density", rho)?;
        Ok(())
    }

    pub fn v_f(&self) -> f64 {
        fluid_volume(self.geom.volume(), self.porosity)
    }

    /// Concentration at radius `r` and `time` given the volumetric
    /// concentration `c_0`. Placeholder: uniform in space and time.
    pub fn conc_profile(&self, c_0: &IsoConcMap, _r: f64, _time: Time) -> IsoConcMap {
        c_0.clone()
    }

    pub fn fresh_copy(&self, time: Time) -> Self {
        let mut copy = OneDimPpmNuclide {
            geom: self.geom.clone(),
            mat_table: Arc::clone(&self.mat_table),
            initial_concentration: self.initial_concentration,
            source_concentration: self.source_concentration,
            advective_velocity: self.advective_velocity,
            porosity: self.porosity,
            bulk_density: self.bulk_density,
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
        let c_0 = comp_to_conc_map(&composition, mass, self.v_f());
        let conc = self.conc_profile(&c_0, self.geom.radial_midpoint(), time);
        self.vec_hist.record(time, composition, mass);
        self.conc_hist.record(time, conc);
    }

    fn current_conc(&self) -> IsoConcMap {
        self.conc_hist.at(self.last_updated)
    }
}

impl NuclideModel for OneDimPpmNuclide {
    fn kind(&self) -> NuclideModelKind {
        NuclideModelKind::OneDimPpm
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
        self.update_histories(time);
        self.last_updated = time;
        log::trace!("{} t={time}: profile updated", Self::NAME);
    }

    /// Pore-fluid concentration integrated over `V_f`, never more than is held.
    fn source_term_bc(&self) -> SourceTerm {
        let v_f = self.v_f();
        let (held, contained) = self.inventory.sum();
        let masses: BTreeMap<_, f64> = self
            .current_conc()
            .into_iter()
            .filter(|&(_, c)| c > 0.0)
            .map(|(iso, c)| (iso, (c * v_f).min(held.get(iso) * contained)))
            .filter(|&(_, m)| m > 0.0)
            .collect();
        let mass: f64 = masses.values().sum();
        if mass <= 0.0 {
            return SourceTerm::none();
        }
        SourceTerm {
            composition: Composition::from_quantities(masses).normalized(),
            mass,
        }
    }

    fn dirichlet_bc(&self) -> IsoConcMap {
        self.current_conc()
    }

    fn neumann_bc(&self, c_ext: &IsoConcMap, r_ext: f64) -> RepoResult<ConcGradMap> {
        boundary::neumann(
            c_ext,
            &self.current_conc(),
            1.0,
            r_ext,
            self.geom.radial_midpoint(),
        )
    }

    fn cauchy_bc(&self, c_ext: &IsoConcMap, r_ext: f64) -> RepoResult<IsoFluxMap> {
        let gradient = self.neumann_bc(c_ext, r_ext)?;
        Ok(boundary::cauchy(
            &gradient,
            &self.dirichlet_bc(),
            self.advective_velocity,
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
