// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Material Aggregator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Pooling of waste batch collections.

use repo_types::error::RepoResult;
use repo_types::material::{Composition, IsoConcMap, WasteBatch};

/// Mass-weighted composition and total mass of `batches`.
///
/// Empty or massless collections give the sentinel `({U-235: 0}, 0)`.
pub fn sum_batches(batches: &[WasteBatch]) -> (Composition, f64) {
    let mut pool: Option<WasteBatch> = None;
    for batch in batches {
        match pool.as_mut() {
            Some(p) => p.absorb(batch.clone()),
            None => pool = Some(batch.clone()),
        }
    }
    match pool {
        Some(p) if p.mass() > 0.0 => (p.composition().clone(), p.mass()),
        _ => (Composition::zero(), 0.0),
    }
}

/// Remove `mass` kg of `composition` from the pooled `batches`.
///
/// On success the collection holds a single remainder batch (or nothing,
/// once drained) and the extracted batch is returned. On failure the
/// collection is left as it was.
pub fn extract_from(
    composition: &Composition,
    mass: f64,
    batches: &mut Vec<WasteBatch>,
) -> RepoResult<WasteBatch> {
    let mut pool = WasteBatch::empty(Composition::new());
    for batch in batches.iter() {
        pool.absorb(batch.clone());
    }
    let extracted = pool.extract(composition, mass)?;
    batches.clear();
    if pool.mass() > 0.0 {
        batches.push(pool);
    }
    log::debug!(
        "extracted {:.6e} kg, {} batch(es) remain",
        extracted.mass(),
        batches.len()
    );
    Ok(extracted)
}

/// Concentration of each isotope when `mass` of `composition` fills `volume`.
///
/// Zero mass or an unbounded volume gives the sentinel map.
pub fn comp_to_conc_map(composition: &Composition, mass: f64, volume: f64) -> IsoConcMap {
    if mass <= 0.0 || volume.is_infinite() || volume <= 0.0 {
        return repo_types::material::zero_conc_map();
    }
    composition
        .normalized()
        .iter()
        .map(|(iso, frac)| (iso, frac * mass / volume))
        .collect()
}

/// Multiply every concentration by `scale`.
pub fn scale_conc_map(map: &IsoConcMap, scale: f64) -> IsoConcMap {
    map.iter().map(|(&iso, &c)| (iso, c * scale)).collect()
}
