// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Property-Based Tests (proptest) for repo-core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for repo-core using proptest.
//!
//! Covers: facility mass conservation, request sizing, buffer layout limits.

use proptest::prelude::*;
use repo_core::{ComponentType, MemorySink, NullSink, Repository};
use repo_types::config::RepositoryConfig;
use repo_types::constants::U235;
use repo_types::material::WasteBatch;

fn reference() -> RepositoryConfig {
    let path = format!(
        "{}/../../configs/reference_repository.json",
        env!("CARGO_MANIFEST_DIR")
    );
    RepositoryConfig::from_file(&path).unwrap()
}

/// Per-step deliveries: `None` skips a step, otherwise (commodity index, mass).
fn deliveries() -> impl Strategy<Value = Vec<Option<(usize, f64)>>> {
    prop::collection::vec(prop::option::of((0usize..2, 0.1f64..15.0)), 1..25)
}

// ── Conservation ─────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Transport only moves mass between components.
    #[test]
    fn facility_conserves_mass(steps in deliveries()) {
        let mut repo = Repository::from_config(&reference()).unwrap();
        let commodities = ["spent_fuel", "hlw_glass"];
        let mut sink = NullSink;
        let mut delivered = 0.0;
        for (t, step) in steps.into_iter().enumerate() {
            let t = t as i64;
            repo.handle_tick(t, &mut sink).unwrap();
            if let Some((c, mass)) = step {
                let batch = WasteBatch::from_iso_masses([(U235, mass)]);
                repo.add_waste(batch, commodities[c]).unwrap();
                delivered += mass;
            }
            repo.handle_tock(t, &mut sink).unwrap();
            let held = repo.contained_mass();
            prop_assert!((held - delivered).abs() < 1e-6 * delivered.max(1.0),
                "t={}: held {} of {} kg", t, held, delivered);
        }
    }

    /// Every contaminant row reports a finite, non-negative mass.
    #[test]
    fn contaminant_rows_are_physical(steps in deliveries()) {
        let mut repo = Repository::from_config(&reference()).unwrap();
        let mut sink = MemorySink::new();
        for (t, step) in steps.into_iter().enumerate() {
            let t = t as i64;
            repo.handle_tick(t, &mut sink).unwrap();
            if let Some((_, mass)) = step {
                repo.add_waste(WasteBatch::from_iso_masses([(U235, mass)]), "spent_fuel").unwrap();
            }
            repo.handle_tock(t, &mut sink).unwrap();
        }
        for row in &sink.contaminants {
            prop_assert!(row.mass_kg.is_finite() && row.mass_kg >= 0.0);
            prop_assert!(row.avail_conc.is_finite() && row.avail_conc >= 0.0);
        }
    }
}

// ── Requests ─────────────────────────────────────────────────────────

proptest! {
    /// Requests never exceed the per-step capacity nor the remaining space.
    #[test]
    fn request_within_bounds(stocked in prop::collection::vec(0.0f64..80.0, 0..5)) {
        let cfg = reference();
        let mut repo = Repository::from_config(&cfg).unwrap();
        let mut total = 0.0;
        for mass in stocked {
            repo.add_waste(WasteBatch::from_iso_masses([(U235, mass)]), "spent_fuel").unwrap();
            total += mass;
        }
        let cap = repo.capacity();
        prop_assert!(cap >= 0.0);
        prop_assert!(cap <= cfg.capacity);
        prop_assert!(cap <= (cfg.inventory_size - total).max(0.0) + 1e-9);
        let request = repo.handle_tick(0, &mut NullSink).unwrap();
        match request {
            Some(r) => prop_assert!((r.amount - cap).abs() < 1e-12),
            None => prop_assert!(cap <= 0.0),
        }
    }
}

// ── Layout ───────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Buffers never exceed the facility width and never hold more
    /// packages than fit along their length.
    #[test]
    fn buffer_layout_respects_facility(n_batches in 0usize..16) {
        let cfg = reference();
        let mut repo = Repository::from_config(&cfg).unwrap();
        let mut sink = NullSink;
        repo.handle_tick(0, &mut sink).unwrap();
        for _ in 0..n_batches {
            repo.add_waste(WasteBatch::from_iso_masses([(U235, 1.0)]), "spent_fuel").unwrap();
        }
        repo.handle_tock(0, &mut sink).unwrap();

        let max_buffers = (cfg.y / cfg.dy).ceil() as usize;
        let per_buffer = (cfg.x / cfg.dx).ceil() as usize;
        prop_assert!(repo.buffers().len() <= max_buffers);
        for &b in repo.buffers() {
            let buffer = repo.tree().get(b).unwrap();
            prop_assert_eq!(buffer.component_type(), ComponentType::Buffer);
            prop_assert!(buffer.daughters().len() <= per_buffer);
        }
        let placed = repo.waste_packages().len();
        let pending = repo.pending_waste_packages().count();
        prop_assert_eq!(placed + pending, n_batches);
        prop_assert_eq!(repo.is_full(), pending > 0);
    }
}
