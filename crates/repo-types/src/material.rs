// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Isotope Compositions and Waste Batches
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Isotope compositions and the waste batches built from them.
//!
//! Isotopes are keyed by `Z*1000 + A`. A [`Composition`] is a plain map of
//! isotope to quantity; once normalized ("massified") the values are mass
//! fractions summing to one. A [`WasteBatch`] pairs a normalized composition
//! with a total mass in kg.

use crate::constants::{ISO_ELEMENT_DIVISOR, MASS_TOLERANCE, U235};
use crate::error::{RepoError, RepoResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Isotope identifier, `Z*1000 + A`.
pub type Iso = i32;
/// Element identifier, `Z`.
pub type Elem = i32;
/// Discrete simulation time step.
pub type Time = i64;

/// Isotope → concentration [kg/m^3].
pub type IsoConcMap = BTreeMap<Iso, f64>;
/// Isotope → concentration gradient [kg/m^4].
pub type ConcGradMap = BTreeMap<Iso, f64>;
/// Isotope → flux [kg/m^2/step].
pub type IsoFluxMap = BTreeMap<Iso, f64>;

/// Element of an isotope identifier.
pub fn element_of(iso: Iso) -> Elem {
    iso / ISO_ELEMENT_DIVISOR
}

/// Concentration map holding only the zero sentinel `{U-235: 0}`.
pub fn zero_conc_map() -> IsoConcMap {
    let mut map = IsoConcMap::new();
    map.insert(U235, 0.0);
    map
}

/// Isotope composition (fractions or raw masses).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Composition {
    entries: BTreeMap<Iso, f64>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure single-isotope composition.
    pub fn single(iso: Iso) -> Self {
        let mut comp = Self::new();
        comp.insert(iso, 1.0);
        comp
    }

    /// The zero sentinel `{U-235: 0}` reported where nothing has been recorded.
    pub fn zero() -> Self {
        let mut comp = Self::new();
        comp.insert(U235, 0.0);
        comp
    }

    pub fn from_quantities<I: IntoIterator<Item = (Iso, f64)>>(quantities: I) -> Self {
        let mut comp = Self::new();
        for (iso, value) in quantities {
            *comp.entries.entry(iso).or_insert(0.0) += value;
        }
        comp
    }

    pub fn insert(&mut self, iso: Iso, value: f64) {
        self.entries.insert(iso, value);
    }

    /// Quantity of `iso`, zero when absent.
    pub fn get(&self, iso: Iso) -> f64 {
        self.entries.get(&iso).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, iso: Iso) -> bool {
        self.entries.contains_key(&iso)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Iso, f64)> + '_ {
        self.entries.iter().map(|(&iso, &value)| (iso, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.values().sum()
    }

    /// True when every entry is zero (this includes the sentinel).
    pub fn is_zero(&self) -> bool {
        self.entries.values().all(|&v| v == 0.0)
    }

    /// Normalize in place so the values sum to one.
    /// Compositions with a non-positive total are left untouched.
    pub fn massify(&mut self) {
        let total = self.total();
        if total > 0.0 && total.is_finite() {
            for value in self.entries.values_mut() {
                *value /= total;
            }
        }
    }

    pub fn normalized(&self) -> Self {
        let mut comp = self.clone();
        comp.massify();
        comp
    }

    pub fn as_map(&self) -> &BTreeMap<Iso, f64> {
        &self.entries
    }
}

/// A quantity of waste: normalized composition plus total mass [kg].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteBatch {
    composition: Composition,
    mass: f64,
}

impl WasteBatch {
    pub fn new(composition: Composition, mass: f64) -> Self {
        Self {
            composition: composition.normalized(),
            mass: mass.max(0.0),
        }
    }

    /// Build a batch from per-isotope masses [kg].
    pub fn from_iso_masses<I: IntoIterator<Item = (Iso, f64)>>(masses: I) -> Self {
        let raw = Composition::from_quantities(masses);
        let mass = raw.total();
        Self::new(raw, mass)
    }

    /// Zero-mass batch of the given composition.
    pub fn empty(composition: Composition) -> Self {
        Self::new(composition, 0.0)
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Mass of a single isotope [kg].
    pub fn iso_mass(&self, iso: Iso) -> f64 {
        self.composition.get(iso) * self.mass
    }

    pub fn iso_masses(&self) -> BTreeMap<Iso, f64> {
        self.composition
            .iter()
            .map(|(iso, frac)| (iso, frac * self.mass))
            .collect()
    }

    /// Merge another batch into this one.
    pub fn absorb(&mut self, other: WasteBatch) {
        let mut masses = self.iso_masses();
        for (iso, m) in other.iso_masses() {
            *masses.entry(iso).or_insert(0.0) += m;
        }
        let mass = self.mass + other.mass;
        if masses.values().all(|&m| m <= 0.0) {
            // keep whichever composition is known so an empty pool still has a shape
            if self.composition.is_empty() {
                self.composition = other.composition;
            }
            self.mass = mass;
            return;
        }
        self.composition = Composition::from_quantities(masses).normalized();
        self.mass = mass;
    }

    /// Remove `mass` kg of `composition` from this batch.
    ///
    /// Fails with [`RepoError::InsufficientMass`] when any isotope of the
    /// requested composition is held in a smaller amount than requested.
    /// On failure the batch is unchanged.
    pub fn extract(&mut self, composition: &Composition, mass: f64) -> RepoResult<WasteBatch> {
        if !mass.is_finite() || mass < 0.0 {
            return Err(RepoError::Range {
                parameter: "extraction mass",
                value: mass,
                message: "mass to extract must be finite and non-negative".to_string(),
            });
        }
        let target = composition.normalized();
        if mass == 0.0 {
            return Ok(WasteBatch::empty(target));
        }
        if target.total() <= 0.0 {
            return Err(RepoError::InsufficientMass {
                requested: mass,
                available: 0.0,
            });
        }

        let held = self.iso_masses();
        let mut available = f64::INFINITY;
        for (iso, frac) in target.iter().filter(|&(_, frac)| frac > 0.0) {
            let held_iso = held.get(&iso).copied().unwrap_or(0.0);
            available = available.min(held_iso / frac);
        }
        if mass > available + MASS_TOLERANCE * available.max(1.0) {
            return Err(RepoError::InsufficientMass {
                requested: mass,
                available,
            });
        }

        let mut remaining = held;
        for (iso, frac) in target.iter() {
            if let Some(m) = remaining.get_mut(&iso) {
                *m = (*m - frac * mass).max(0.0);
            }
        }
        remaining.retain(|_, m| *m > 0.0);
        let remaining_mass: f64 = remaining.values().sum();
        if remaining.is_empty() {
            self.mass = 0.0;
        } else {
            self.composition = Composition::from_quantities(remaining).normalized();
            self.mass = remaining_mass;
        }
        Ok(WasteBatch::new(target, mass))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AM241: Iso = 95241;

    #[test]
    fn test_element_of() {
        assert_eq!(element_of(U235), 92);
        assert_eq!(element_of(AM241), 95);
    }

    #[test]
    fn test_massify_normalizes() {
        let mut comp = Composition::from_quantities([(U235, 3.0), (AM241, 1.0)]);
        comp.massify();
        assert!((comp.get(U235) - 0.75).abs() < 1e-12);
        assert!((comp.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_sentinel_untouched_by_massify() {
        let comp = Composition::zero().normalized();
        assert!(comp.contains(U235));
        assert_eq!(comp.get(U235), 0.0);
        assert!(comp.is_zero());
    }

    #[test]
    fn test_absorb_is_mass_weighted() {
        let mut a = WasteBatch::new(Composition::single(U235), 10.0);
        let b = WasteBatch::new(Composition::single(AM241), 30.0);
        a.absorb(b);
        assert!((a.mass() - 40.0).abs() < 1e-12);
        assert!((a.iso_mass(U235) - 10.0).abs() < 1e-12);
        assert!((a.iso_mass(AM241) - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_extract_partial() {
        let mut batch = WasteBatch::new(Composition::single(U235), 10.0);
        let out = batch.extract(&Composition::single(U235), 4.0).unwrap();
        assert!((out.mass() - 4.0).abs() < 1e-12);
        assert!((batch.mass() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_extract_too_much_fails_and_keeps_batch() {
        let mut batch = WasteBatch::new(Composition::single(U235), 1.0);
        let err = batch.extract(&Composition::single(U235), 2.0).unwrap_err();
        assert!(matches!(err, RepoError::InsufficientMass { .. }));
        assert!((batch.mass() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_extract_missing_isotope_fails() {
        let mut batch = WasteBatch::new(Composition::single(U235), 1.0);
        let result = batch.extract(&Composition::single(AM241), 0.5);
        assert!(matches!(result, Err(RepoError::InsufficientMass { .. })));
    }

    #[test]
    fn test_extract_everything_leaves_zero_mass() {
        let mut batch = WasteBatch::from_iso_masses([(U235, 2.0), (AM241, 2.0)]);
        let comp = batch.composition().clone();
        batch.extract(&comp, 4.0).unwrap();
        assert!(batch.mass().abs() < 1e-12);
    }
}
