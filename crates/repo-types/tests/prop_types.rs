// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Property-Based Tests (proptest) for repo-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for repo-types using proptest.
//!
//! Covers: composition normalization, waste batch absorb/extract mass balance,
//! shell geometry volume and midpoint.

use proptest::prelude::*;
use repo_types::error::RepoError;
use repo_types::geometry::{Geometry, Point3};
use repo_types::material::{Composition, WasteBatch};

fn iso_masses() -> impl Strategy<Value = Vec<(i32, f64)>> {
    prop::collection::vec((92234i32..92240, 0.01f64..100.0), 1..6)
}

// ── Composition Properties ───────────────────────────────────────────

proptest! {
    /// A massified composition sums to one.
    #[test]
    fn normalized_sums_to_one(entries in iso_masses()) {
        let comp = Composition::from_quantities(entries).normalized();
        prop_assert!((comp.total() - 1.0).abs() < 1e-12);
    }

    /// Normalization does not depend on overall scale.
    #[test]
    fn normalization_scale_invariant(entries in iso_masses(), scale in 0.1f64..1e3) {
        let a = Composition::from_quantities(entries.clone()).normalized();
        let b = Composition::from_quantities(entries.into_iter().map(|(i, m)| (i, m * scale)))
            .normalized();
        for (iso, frac) in a.iter() {
            prop_assert!((frac - b.get(iso)).abs() < 1e-12);
        }
    }
}

// ── Waste Batch Properties ───────────────────────────────────────────

proptest! {
    /// Absorbing batches sums their masses.
    #[test]
    fn absorb_conserves_mass(a in iso_masses(), b in iso_masses()) {
        let mut first = WasteBatch::from_iso_masses(a);
        let second = WasteBatch::from_iso_masses(b);
        let expected = first.mass() + second.mass();
        first.absorb(second);
        prop_assert!((first.mass() - expected).abs() < 1e-9 * expected.max(1.0));
    }

    /// Extracting a share of the batch's own composition conserves mass.
    #[test]
    fn extract_conserves_mass(entries in iso_masses(), frac in 0.0f64..1.0) {
        let mut batch = WasteBatch::from_iso_masses(entries);
        let total = batch.mass();
        let comp = batch.composition().clone();
        let taken = batch.extract(&comp, frac * total).unwrap();
        prop_assert!((taken.mass() + batch.mass() - total).abs() < 1e-9 * total.max(1.0));
    }

    /// Over-extraction fails and leaves the batch untouched.
    #[test]
    fn over_extract_fails(entries in iso_masses(), excess in 1.01f64..10.0) {
        let mut batch = WasteBatch::from_iso_masses(entries);
        let before = batch.clone();
        let comp = batch.composition().clone();
        let result = batch.extract(&comp, excess * before.mass());
        let is_insufficient = matches!(result, Err(RepoError::InsufficientMass { .. }));
        prop_assert!(is_insufficient);
        prop_assert_eq!(batch, before);
    }
}

// ── Geometry Properties ──────────────────────────────────────────────

proptest! {
    /// Finite shells have non-negative volume and a midpoint inside the shell.
    #[test]
    fn shell_midpoint_inside(inner in 0.0f64..10.0, thickness in 0.0f64..10.0, len in 0.0f64..50.0) {
        let g = Geometry::new(inner, inner + thickness, Point3::origin(), len);
        prop_assert!(g.volume() >= 0.0);
        prop_assert!(g.radial_midpoint() >= inner - 1e-12);
        prop_assert!(g.radial_midpoint() <= inner + thickness + 1e-12);
    }

    /// Moving a geometry never changes its volume.
    #[test]
    fn copy_at_preserves_volume(inner in 0.0f64..5.0, outer in 5.0f64..10.0, x in -1e3f64..1e3) {
        let g = Geometry::new(inner, outer, Point3::origin(), 3.0);
        let moved = g.copy_at(Point3::new(x, x, x));
        prop_assert_eq!(g.volume(), moved.volume());
        prop_assert_eq!(moved.x(), x);
    }
}
