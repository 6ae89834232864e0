// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Stub Nuclide Model
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! No-op transport: holds what it absorbs and releases nothing.

use crate::inventory::Inventory;
use crate::model::{NuclideModel, NuclideModelKind, SourceTerm};
use repo_types::error::RepoResult;
use repo_types::geometry::Geometry;
use repo_types::material::{
    zero_conc_map, Composition, ConcGradMap, IsoConcMap, IsoFluxMap, Time, WasteBatch,
};

#[derive(Debug, Clone)]
pub struct StubNuclide {
    geom: Geometry,
    inventory: Inventory,
    /// Returned by every boundary query.
    cached_conc: IsoConcMap,
    last_updated: Time,
}

impl Default for StubNuclide {
    fn default() -> Self {
        Self::new()
    }
}

impl StubNuclide {
    pub const NAME: &'static str = "StubNuclide";

    pub fn new() -> Self {
        StubNuclide {
            geom: Geometry::default(),
            inventory: Inventory::new(),
            cached_conc: zero_conc_map(),
            last_updated: 0,
        }
    }

    pub fn fresh_copy(&self, time: Time) -> Self {
        StubNuclide {
            geom: self.geom.clone(),
            last_updated: time,
            ..Self::new()
        }
    }
}

impl NuclideModel for StubNuclide {
    fn kind(&self) -> NuclideModelKind {
        NuclideModelKind::Stub
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
        self.last_updated = time;
    }

    fn source_term_bc(&self) -> SourceTerm {
        SourceTerm::none()
    }

    fn dirichlet_bc(&self) -> IsoConcMap {
        self.cached_conc.clone()
    }

    fn neumann_bc(&self, _c_ext: &IsoConcMap, _r_ext: f64) -> RepoResult<ConcGradMap> {
        Ok(self.cached_conc.clone())
    }

    fn cauchy_bc(&self, _c_ext: &IsoConcMap, _r_ext: f64) -> RepoResult<IsoFluxMap> {
        Ok(self.cached_conc.clone())
    }

    fn vec_hist(&self, _time: Time) -> (Composition, f64) {
        (Composition::zero(), 0.0)
    }

    fn conc_hist(&self, _time: Time) -> IsoConcMap {
        zero_conc_map()
    }

    fn last_updated(&self) -> Time {
        self.last_updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repo_types::constants::U235;

    #[test]
    fn test_stub_holds_but_never_releases() {
        let mut stub = StubNuclide::new();
        stub.absorb(WasteBatch::new(Composition::single(U235), 4.0));
        stub.transport_nuclides(1);
        stub.transport_nuclides(9);
        assert_eq!(stub.source_term_bc(), SourceTerm::none());
        assert!((stub.contained_mass() - 4.0).abs() < 1e-12);
        assert_eq!(stub.vec_hist(9).1, 0.0);
        assert_eq!(stub.last_updated(), 9);
    }

    #[test]
    fn test_boundary_queries_return_cache() {
        let stub = StubNuclide::new();
        assert_eq!(stub.dirichlet_bc(), zero_conc_map());
        // no geometry check on the placeholder
        assert_eq!(
            stub.neumann_bc(&zero_conc_map(), f64::INFINITY).unwrap(),
            zero_conc_map()
        );
        assert_eq!(stub.cauchy_bc(&zero_conc_map(), 0.0).unwrap(), zero_conc_map());
    }

    #[test]
    fn test_absorbed_mass_is_extractable() {
        let mut stub = StubNuclide::new();
        stub.absorb(WasteBatch::new(Composition::single(U235), 4.0));
        let out = stub.extract(&Composition::single(U235), 1.5).unwrap();
        assert!((out.mass() - 1.5).abs() < 1e-12);
        assert!((stub.contained_mass() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_fresh_copy_is_empty() {
        let mut stub = StubNuclide::new();
        stub.absorb(WasteBatch::new(Composition::single(U235), 4.0));
        let copy = stub.fresh_copy(3);
        assert!(copy.wastes().is_empty());
        assert_eq!(copy.last_updated(), 3);
    }
}
