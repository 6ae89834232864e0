// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Boundary Conditions
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Gradient and flux arithmetic shared by the transport models.

use repo_types::error::{RepoError, RepoResult};
use repo_types::mat_data::MatDataTable;
use repo_types::material::{element_of, ConcGradMap, IsoConcMap, IsoFluxMap};

fn check_radii(r_ext: f64, r_int: f64) -> RepoResult<()> {
    if r_ext.is_infinite() {
        return Err(RepoError::InvalidGeometry(
            "external radius is unbounded, gradient undefined".to_string(),
        ));
    }
    if r_ext <= r_int {
        return Err(RepoError::InvalidGeometry(format!(
            "external radius {r_ext} must exceed internal radius {r_int}"
        )));
    }
    Ok(())
}

/// Linear concentration gradient from `r_int` to `r_ext`.
pub fn conc_grad(c_ext: f64, c_int: f64, r_ext: f64, r_int: f64) -> RepoResult<f64> {
    check_radii(r_ext, r_int)?;
    Ok((c_ext - c_int) / (r_ext - r_int))
}

/// Per-isotope gradient between an internal map (scaled by `int_scale`) at
/// `r_int` and an external map at `r_ext`. An isotope missing on one side
/// counts as zero there.
pub fn neumann(
    c_ext: &IsoConcMap,
    c_int: &IsoConcMap,
    int_scale: f64,
    r_ext: f64,
    r_int: f64,
) -> RepoResult<ConcGradMap> {
    check_radii(r_ext, r_int)?;
    let mut grad = ConcGradMap::new();
    for (&iso, &c) in c_int {
        let ext = c_ext.get(&iso).copied().unwrap_or(0.0);
        grad.insert(iso, conc_grad(ext, c * int_scale, r_ext, r_int)?);
    }
    for (&iso, &c) in c_ext {
        if !c_int.contains_key(&iso) {
            grad.insert(iso, conc_grad(c, 0.0, r_ext, r_int)?);
        }
    }
    Ok(grad)
}

/// Diffusive plus advective flux, `−D(elem)·∇C + v·C`.
pub fn cauchy(
    gradient: &ConcGradMap,
    dirichlet: &IsoConcMap,
    velocity: f64,
    mat_table: &MatDataTable,
) -> IsoFluxMap {
    gradient
        .iter()
        .map(|(&iso, &g)| {
            let c = dirichlet.get(&iso).copied().unwrap_or(0.0);
            (iso, -mat_table.d(element_of(iso)) * g + velocity * c)
        })
        .collect()
}
