// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Nuclide Transport Model
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Shared contract of the nuclide transport models and the closed set of
//! variants built from configuration.

use crate::deg_rate::DegRateNuclide;
use crate::mixed_cell::MixedCellNuclide;
use crate::one_dim_ppm::OneDimPpmNuclide;
use crate::stub::StubNuclide;
use repo_types::config::NuclideModelConfig;
use repo_types::error::{RepoError, RepoResult};
use repo_types::geometry::Geometry;
use repo_types::mat_data::MatDataTable;
use repo_types::material::{
    Composition, ConcGradMap, Iso, IsoConcMap, IsoFluxMap, Time, WasteBatch,
};
use std::fmt;
use std::sync::Arc;

/// Mass a model offers across its outer face at the current step.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTerm {
    pub composition: Composition,
    pub mass: f64,
}

impl SourceTerm {
    /// The zero sentinel: `{U-235: 0}`, 0 kg.
    pub fn none() -> Self {
        SourceTerm {
            composition: Composition::zero(),
            mass: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NuclideModelKind {
    DegRate,
    MixedCell,
    OneDimPpm,
    Stub,
}

impl NuclideModelKind {
    pub fn name(self) -> &'static str {
        match self {
            NuclideModelKind::DegRate => DegRateNuclide::NAME,
            NuclideModelKind::MixedCell => MixedCellNuclide::NAME,
            NuclideModelKind::OneDimPpm => OneDimPpmNuclide::NAME,
            NuclideModelKind::Stub => StubNuclide::NAME,
        }
    }
}

impl fmt::Display for NuclideModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operations every nuclide transport model provides.
pub trait NuclideModel {
    fn kind(&self) -> NuclideModelKind;

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn geom(&self) -> &Geometry;
    fn geom_mut(&mut self) -> &mut Geometry;

    fn set_geom(&mut self, geom: Geometry) {
        *self.geom_mut() = geom;
    }

    fn wastes(&self) -> &[WasteBatch];

    fn contained_mass(&self) -> f64 {
        repo_math::aggregate::sum_batches(self.wastes()).1
    }

    fn absorb(&mut self, batch: WasteBatch);

    /// Remove `mass` kg of `composition`; [`RepoError::InsufficientMass`]
    /// when the inventory cannot supply it.
    fn extract(&mut self, composition: &Composition, mass: f64) -> RepoResult<WasteBatch>;

    /// Advance the model state to `time`.
    ///
    /// # Panics
    /// If `time` precedes [`NuclideModel::last_updated`].
    fn transport_nuclides(&mut self, time: Time);

    fn source_term_bc(&self) -> SourceTerm;
    fn dirichlet_bc(&self) -> IsoConcMap;
    fn neumann_bc(&self, c_ext: &IsoConcMap, r_ext: f64) -> RepoResult<ConcGradMap>;
    fn cauchy_bc(&self, c_ext: &IsoConcMap, r_ext: f64) -> RepoResult<IsoFluxMap>;

    fn vec_hist(&self, time: Time) -> (Composition, f64);
    fn conc_hist(&self, time: Time) -> IsoConcMap;

    fn conc_hist_iso(&self, time: Time, iso: Iso) -> f64 {
        self.conc_hist(time).get(&iso).copied().unwrap_or(0.0)
    }

    fn last_updated(&self) -> Time;

    /// Pull each daughter's source term into this model.
    ///
    /// Not idempotent: calling twice in one step drains the daughters twice.
    fn update_inner_bc(
        &mut self,
        time: Time,
        daughters: &mut [&mut dyn NuclideModel],
    ) -> RepoResult<()> {
        for daughter in daughters.iter_mut() {
            let source = daughter.source_term_bc();
            if source.mass > 0.0 {
                let batch = daughter.extract(&source.composition, source.mass)?;
                log::trace!(
                    "t={time}: {} pulled {:.6e} kg from {}",
                    self.name(),
                    batch.mass(),
                    daughter.name()
                );
                self.absorb(batch);
            }
        }
        Ok(())
    }
}

/// Closed set of transport models.
#[derive(Debug, Clone)]
pub enum NuclideModelVariant {
    DegRate(DegRateNuclide),
    MixedCell(MixedCellNuclide),
    OneDimPpm(OneDimPpmNuclide),
    Stub(StubNuclide),
}

macro_rules! dispatch {
    ($self:expr, $model:ident => $body:expr) => {
        match $self {
            NuclideModelVariant::DegRate($model) => $body,
            NuclideModelVariant::MixedCell($model) => $body,
            NuclideModelVariant::OneDimPpm($model) => $body,
            NuclideModelVariant::Stub($model) => $body,
        }
    };
}

type Constructor = fn(&NuclideModelConfig, Arc<MatDataTable>) -> RepoResult<NuclideModelVariant>;

fn build_deg_rate(
    cfg: &NuclideModelConfig,
    table: Arc<MatDataTable>,
) -> RepoResult<NuclideModelVariant> {
    DegRateNuclide::from_config(cfg, table).map(NuclideModelVariant::DegRate)
}

fn build_mixed_cell(
    cfg: &NuclideModelConfig,
    table: Arc<MatDataTable>,
) -> RepoResult<NuclideModelVariant> {
    MixedCellNuclide::from_config(cfg, table).map(NuclideModelVariant::MixedCell)
}

fn build_one_dim_ppm(
    cfg: &NuclideModelConfig,
    table: Arc<MatDataTable>,
) -> RepoResult<NuclideModelVariant> {
    OneDimPpmNuclide::from_config(cfg, table).map(NuclideModelVariant::OneDimPpm)
}

fn build_stub(
    _cfg: &NuclideModelConfig,
    _table: Arc<MatDataTable>,
) -> RepoResult<NuclideModelVariant> {
    Ok(NuclideModelVariant::Stub(StubNuclide::new()))
}

/// Name → constructor.
const REGISTRY: &[(&str, Constructor)] = &[
    (DegRateNuclide::NAME, build_deg_rate),
    (MixedCellNuclide::NAME, build_mixed_cell),
    (OneDimPpmNuclide::NAME, build_one_dim_ppm),
    (StubNuclide::NAME, build_stub),
];

impl NuclideModelVariant {
    /// Registered model names.
    pub fn names() -> impl Iterator<Item = &'static str> {
        REGISTRY.iter().map(|(name, _)| *name)
    }

    /// Build the model `cfg.model` names, validating its parameters.
    pub fn from_config(cfg: &NuclideModelConfig, table: Arc<MatDataTable>) -> RepoResult<Self> {
        let (_, build) = REGISTRY
            .iter()
            .find(|(name, _)| *name == cfg.model)
            .ok_or_else(|| {
                RepoError::Configuration(format!(
                    "unknown nuclide model '{}', expected one of: {}",
                    cfg.model,
                    Self::names().collect::<Vec<_>>().join(", ")
                ))
            })?;
        let model = build(cfg, table)?;
        log::debug!("built nuclide model {}", model.name());
        Ok(model)
    }

    /// Same parameters and geometry shape, empty inventory and histories,
    /// nothing degraded, stamped at `time`.
    pub fn fresh_copy(&self, time: Time) -> Self {
        match self {
            NuclideModelVariant::DegRate(m) => NuclideModelVariant::DegRate(m.fresh_copy(time)),
            NuclideModelVariant::MixedCell(m) => {
                NuclideModelVariant::MixedCell(m.fresh_copy(time))
            }
            NuclideModelVariant::OneDimPpm(m) => {
                NuclideModelVariant::OneDimPpm(m.fresh_copy(time))
            }
            NuclideModelVariant::Stub(m) => NuclideModelVariant::Stub(m.fresh_copy(time)),
        }
    }
}

impl NuclideModel for NuclideModelVariant {
    fn kind(&self) -> NuclideModelKind {
        dispatch!(self, m => m.kind())
    }

    fn geom(&self) -> &Geometry {
        dispatch!(self, m => m.geom())
    }

    fn geom_mut(&mut self) -> &mut Geometry {
        dispatch!(self, m => m.geom_mut())
    }

    fn wastes(&self) -> &[WasteBatch] {
        dispatch!(self, m => m.wastes())
    }

    fn absorb(&mut self, batch: WasteBatch) {
        dispatch!(self, m => m.absorb(batch))
    }

    fn extract(&mut self, composition: &Composition, mass: f64) -> RepoResult<WasteBatch> {
        dispatch!(self, m => m.extract(composition, mass))
    }

    fn transport_nuclides(&mut self, time: Time) {
        dispatch!(self, m => m.transport_nuclides(time))
    }

    fn source_term_bc(&self) -> SourceTerm {
        dispatch!(self, m => m.source_term_bc())
    }

    fn dirichlet_bc(&self) -> IsoConcMap {
        dispatch!(self, m => m.dirichlet_bc())
    }

    fn neumann_bc(&self, c_ext: &IsoConcMap, r_ext: f64) -> RepoResult<ConcGradMap> {
        dispatch!(self, m => m.neumann_bc(c_ext, r_ext))
    }

    fn cauchy_bc(&self, c_ext: &IsoConcMap, r_ext: f64) -> RepoResult<IsoFluxMap> {
        dispatch!(self, m => m.cauchy_bc(c_ext, r_ext))
    }

    fn vec_hist(&self, time: Time) -> (Composition, f64) {
        dispatch!(self, m => m.vec_hist(time))
    }

    fn conc_hist(&self, time: Time) -> IsoConcMap {
        dispatch!(self, m => m.conc_hist(time))
    }

    fn last_updated(&self) -> Time {
        dispatch!(self, m => m.last_updated())
    }

    fn update_inner_bc(
        &mut self,
        time: Time,
        daughters: &mut [&mut dyn NuclideModel],
    ) -> RepoResult<()> {
        dispatch!(self, m => m.update_inner_bc(time, daughters))
    }
}
