// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Mixed-Cell Nuclide Model
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Well-mixed porous cell with sorption and solubility limits.
//!
//! Released mass is dissolved in the degraded pore fluid
//! `V_ff = d·θ·V_T`. With `kd_limited` only the fluid-phase share at
//! linear sorption equilibrium is mobile; with `sol_limited` the mobile
//! mass is capped by the element's solubility.

use crate::boundary;
use crate::degradation::Degradation;
use crate::history::{ConcentrationHistory, VectorHistory};
use crate::inventory::Inventory;
use crate::model::{NuclideModel, NuclideModelKind, SourceTerm};
use repo_math::aggregate::scale_conc_map;
use repo_math::sorption::{degraded_mobile, solubility_capped_mobile};
use repo_math::volumes::{degraded_fluid_volume, fluid_volume, solid_volume, validate_percent};
use repo_types::config::NuclideModelConfig;
use repo_types::error::RepoResult;
use repo_types::geometry::Geometry;
use repo_types::mat_data::MatDataTable;
use repo_types::material::{
    zero_conc_map, Composition, ConcGradMap, Iso, IsoConcMap, IsoFluxMap, Time, WasteBatch,
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct MixedCellNuclide {
    geom: Geometry,
    mat_table: Arc<MatDataTable>,
    degradation: Degradation,
    porosity: f64,
    advective_velocity: f64,
    kd_limited: bool,
    sol_limited: bool,
    inventory: Inventory,
    vec_hist: VectorHistory,
    conc_hist: ConcentrationHistory,
    last_updated: Time,
}

impl MixedCellNuclide {
    pub const NAME: &'static str = "MixedCellNuclide";

    /// Zero degradation rate, zero porosity, both limits on.
    pub fn new(mat_table: Arc<MatDataTable>) -> Self {
        MixedCellNuclide {
            geom: Geometry::default(),
            mat_table,
            degradation: Degradation::default(),
            porosity: 0.0,
            advective_velocity: 0.0,
            kd_limited: true,
            sol_limited: true,
            inventory: Inventory::new(),
            vec_hist: VectorHistory::new(),
            conc_hist: ConcentrationHistory::new(),
            last_updated: 0,
        }
    }

    pub fn from_config(cfg: &NuclideModelConfig, mat_table: Arc<MatDataTable>) -> RepoResult<Self> {
        let mut model = Self::new(mat_table);
        model.set_deg_rate(cfg.degradation)?;
        model.set_porosity(cfg.porosity)?;
        model.set_advective_velocity(cfg.advective_velocity);
        model.set_kd_limited(cfg.kd_limited);
        model.set_sol_limited(cfg.sol_limited);
        Ok(model)
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

    pub fn porosity(&self) -> f64 {
        self.porosity
    }

    pub fn set_porosity(&mut self, porosity: f64) -> RepoResult<()> {
        self.porosity = validate_percent("porosity", porosity)?;
        Ok(())
    }

    pub fn advective_velocity(&self) -> f64 {
        self.advective_velocity
    }

    pub fn set_advective_velocity(&mut self, velocity: f64) {
        self.advective_velocity = velocity;
    }

    pub fn kd_limited(&self) -> bool {
        self.kd_limited
    }

    pub fn set_kd_limited(&mut self, limited: bool) {
        self.kd_limited = limited;
    }

    pub fn sol_limited(&self) -> bool {
        self.sol_limited
    }

    pub fn set_sol_limited(&mut self, limited: bool) {
        self.sol_limited = limited;
    }

    /// Total shell volume.
    pub fn v_t(&self) -> f64 {
        self.geom.volume()
    }

    pub fn v_f(&self) -> f64 {
        fluid_volume(self.v_t(), self.porosity)
    }

    pub fn v_s(&self) -> f64 {
        solid_volume(self.v_t(), self.porosity)
    }

    /// Degraded fluid volume.
    pub fn v_ff(&self) -> f64 {
        degraded_fluid_volume(self.v_t(), self.porosity, self.tot_deg())
    }

    pub fn fresh_copy(&self, time: Time) -> Self {
        let mut copy = MixedCellNuclide {
            geom: self.geom.clone(),
            mat_table: Arc::clone(&self.mat_table),
            degradation: self.degradation.restarted_at(time),
            porosity: self.porosity,
            advective_velocity: self.advective_velocity,
            kd_limited: self.kd_limited,
            sol_limited: self.sol_limited,
            inventory: Inventory::new(),
            vec_hist: VectorHistory::new(),
            conc_hist: ConcentrationHistory::new(),
            last_updated: time,
        };
        copy.update_histories(time);
        copy
    }

    /// Dissolved mass of one isotope in the degraded fluid.
    ///
    /// Without sorption the whole isotope mass is in the fluid.
    fn dissolved_mass(&self, iso: Iso, iso_mass: f64) -> f64 {
        let (v_s, v_f, deg) = (self.v_s(), self.v_f(), self.tot_deg());
        match (self.kd_limited, self.sol_limited) {
            (true, true) => solubility_capped_mobile(
                iso_mass,
                self.mat_table.k_d(iso),
                v_s,
                v_f,
                deg,
                self.mat_table.s(iso),
            ),
            (true, false) => degraded_mobile(iso_mass, self.mat_table.k_d(iso), v_s, v_f, deg),
            (false, true) => iso_mass.min(self.mat_table.s(iso) * v_f),
            (false, false) => iso_mass,
        }
    }

    fn concentrations(&self, composition: &Composition, mass: f64) -> IsoConcMap {
        let v_ff = self.v_ff();
        if mass <= 0.0 || v_ff == 0.0 || self.v_t().is_infinite() {
            return zero_conc_map();
        }
        composition
            .iter()
            .map(|(iso, frac)| (iso, self.dissolved_mass(iso, frac * mass) / v_ff))
            .collect()
    }

    fn update_histories(&mut self, time: Time) {
        let (composition, mass) = self.inventory.sum();
        let conc = self.concentrations(&composition, mass);
        self.vec_hist.record(time, composition, mass);
        self.conc_hist.record(time, conc);
    }

    fn current_conc(&self) -> IsoConcMap {
        self.conc_hist.at(self.last_updated)
    }
}

impl NuclideModel for MixedCellNuclide {
    fn kind(&self) -> NuclideModelKind {
        NuclideModelKind::MixedCell
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
        log::trace!(
            "{} t={time}: degraded fraction {tot_deg:.4}, V_ff {:.4e}",
            Self::NAME,
            self.v_ff()
        );
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

#[cfg(test)]
mod tests {
    use super::*;
    use repo_types::constants::U235;
    use repo_types::error::RepoError;
    use repo_types::geometry::Point3;
    use repo_types::mat_data::ElementData;

    const THETA: f64 = 0.3;
    const ADV_VEL: f64 = 1.0;

    fn clay() -> Arc<MatDataTable> {
        Arc::new(MatDataTable::new("clay").with_element(
            92,
            ElementData {
                diffusion_coeff: 0.5,
                kd: 2.0,
                solubility: Some(0.01),
            },
        ))
    }

    fn cell(rate: f64, table: Arc<MatDataTable>) -> MixedCellNuclide {
        let mut m = MixedCellNuclide::new(table);
        m.set_geom(Geometry::new(4.0, 5.0, Point3::origin(), 5.0));
        m.set_porosity(THETA).unwrap();
        m.set_advective_velocity(ADV_VEL);
        m.set_deg_rate(rate).unwrap();
        m
    }

    fn unlimited(rate: f64) -> MixedCellNuclide {
        let mut m = cell(rate, clay());
        m.set_kd_limited(false);
        m.set_sol_limited(false);
        m
    }

    fn ten_kg() -> WasteBatch {
        WasteBatch::new(Composition::single(U235), 10.0)
    }

    #[test]
    fn test_default_model() {
        let m = MixedCellNuclide::new(clay());
        assert_eq!(m.name(), "MixedCellNuclide");
        assert_eq!(m.geom().length(), 0.0);
        assert!(m.kd_limited());
        assert!(m.sol_limited());
        assert_eq!(m.porosity(), 0.0);
    }

    #[test]
    fn test_release_in_two_years() {
        let mut m = unlimited(0.5);
        m.absorb(ten_kg());

        m.transport_nuclides(1);
        let src = m.source_term_bc();
        assert!((src.mass - 5.0).abs() < 1e-9);
        // whole inventory dissolved in the degraded pore fluid
        let conc = 10.0 / (0.5 * THETA * m.v_t());
        assert!((m.v_ff() - 0.5 * THETA * m.v_t()).abs() < 1e-12);
        assert!((m.conc_hist_iso(1, U235) - conc).abs() < 1e-12);
        assert!((m.dirichlet_bc()[&U235] - 0.5 * conc).abs() < 1e-12);
        let flux = m.cauchy_bc(&zero_conc_map(), 10.0).unwrap();
        let grad = -0.5 * conc / (10.0 - 4.5);
        let expected = -0.5 * grad + ADV_VEL * 0.5 * conc;
        assert!((flux[&U235] - expected).abs() < 1e-12);

        m.extract(&src.composition, src.mass).unwrap();
        assert_eq!(m.source_term_bc().mass, 0.0);

        m.transport_nuclides(2);
        let src = m.source_term_bc();
        assert!((src.mass - 5.0).abs() < 1e-9);
        m.extract(&src.composition, src.mass).unwrap();

        m.transport_nuclides(3);
        assert_eq!(m.source_term_bc().mass, 0.0);
        assert!(m.contained_mass().abs() < 1e-9);
    }

    #[test]
    fn test_unsorbed_mass_fills_degraded_fluid() {
        let mut m = unlimited(0.25);
        m.absorb(ten_kg());
        m.transport_nuclides(2);
        let c = m.conc_hist_iso(2, U235);
        assert!((c - 10.0 / m.v_ff()).abs() < 1e-12);
        assert!((c * 0.5 * THETA * m.v_t() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_solubility_caps_unsorbed_mass_at_partial_degradation() {
        let mut m = cell(0.5, clay());
        m.set_kd_limited(false);
        m.absorb(ten_kg());
        m.transport_nuclides(1);
        // S·V_f dissolved in V_ff = d·V_f
        assert!((m.conc_hist_iso(1, U235) - 0.01 / 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_degradation_invariant() {
        let mut m = cell(0.0, clay());
        m.absorb(ten_kg());
        m.transport_nuclides(1);
        m.transport_nuclides(2);
        assert_eq!(m.source_term_bc().mass, 0.0);
        assert_eq!(m.dirichlet_bc(), zero_conc_map());
        let grad = m.neumann_bc(&zero_conc_map(), 10.0).unwrap();
        assert!(grad.values().all(|&g| g == 0.0));
        let flux = m.cauchy_bc(&zero_conc_map(), 10.0).unwrap();
        assert!(flux.values().all(|&f| f == 0.0));
    }

    #[test]
    fn test_sorption_lowers_concentration() {
        let mut sorbing = cell(1.0, clay());
        sorbing.set_sol_limited(false);
        let mut free = unlimited(1.0);
        for m in [&mut sorbing, &mut free] {
            m.absorb(ten_kg());
            m.transport_nuclides(1);
        }
        let c_sorb = sorbing.conc_hist_iso(1, U235);
        let c_free = free.conc_hist_iso(1, U235);
        assert!(c_sorb > 0.0);
        assert!(c_sorb < c_free);
        // kd·V_s/V_f = 2·0.7/0.3
        let expected = c_free / (1.0 + 2.0 * 0.7 / 0.3);
        assert!((c_sorb - expected).abs() < 1e-12);
    }

    #[test]
    fn test_solubility_caps_concentration() {
        let mut m = cell(1.0, clay());
        m.set_kd_limited(false);
        m.absorb(ten_kg());
        m.transport_nuclides(1);
        // cap is S·V_f over V_ff = V_f at full degradation
        assert!((m.conc_hist_iso(1, U235) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_unbounded_volume_is_sentinel() {
        let mut m = unlimited(1.0);
        m.set_geom(Geometry::default());
        m.absorb(ten_kg());
        m.transport_nuclides(1);
        assert_eq!(m.conc_hist(1), zero_conc_map());
    }

    #[test]
    fn test_zero_porosity_is_sentinel() {
        let mut m = unlimited(1.0);
        m.set_porosity(0.0).unwrap();
        m.absorb(ten_kg());
        m.transport_nuclides(1);
        assert_eq!(m.conc_hist(1), zero_conc_map());
    }

    #[test]
    fn test_setters_validate() {
        let mut m = cell(0.3, clay());
        assert!(matches!(m.set_porosity(1.5), Err(RepoError::Range { .. })));
        assert_eq!(m.porosity(), THETA);
        assert!(m.set_deg_rate(-0.1).is_err());
        assert!(m.set_deg_rate(1.1).is_err());
        assert_eq!(m.deg_rate(), 0.3);
    }

    #[test]
    fn test_fresh_copy_keeps_parameters() {
        let mut m = unlimited(0.5);
        m.absorb(ten_kg());
        m.transport_nuclides(2);
        let copy = m.fresh_copy(4);
        assert_eq!(copy.porosity(), THETA);
        assert_eq!(copy.advective_velocity(), ADV_VEL);
        assert!(!copy.kd_limited());
        assert!(!copy.sol_limited());
        assert_eq!(copy.tot_deg(), 0.0);
        assert_eq!(copy.last_updated(), 4);
        assert_eq!(copy.contained_mass(), 0.0);
    }

    #[test]
    fn test_extract_records_released_mass() {
        let mut m = unlimited(0.2);
        m.absorb(ten_kg());
        m.transport_nuclides(1);
        for t in 2..5 {
            m.extract(&Composition::single(U235), 2.0).unwrap();
            m.transport_nuclides(t);
        }
        assert!((m.contained_mass() - 4.0).abs() < 1e-9);
        assert!((m.vec_hist(4).1 - 4.0).abs() < 1e-9);
    }
}
