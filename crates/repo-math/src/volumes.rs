// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Volume Partition
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Phase volumes of a porous, partially degraded cell and the scalar
//! parameter checks shared by the transport models.

use repo_types::error::{RepoError, RepoResult};

/// Fluid (pore) volume, `porosity·v_t`.
pub fn fluid_volume(v_t: f64, porosity: f64) -> f64 {
    porosity * v_t
}

/// Solid matrix volume, `(1 − porosity)·v_t`.
pub fn solid_volume(v_t: f64, porosity: f64) -> f64 {
    (1.0 - porosity) * v_t
}

/// Fluid volume in the degraded region.
pub fn degraded_fluid_volume(v_t: f64, porosity: f64, deg: f64) -> f64 {
    deg * fluid_volume(v_t, porosity)
}

/// Fluid volume in the intact region.
pub fn intact_fluid_volume(v_t: f64, porosity: f64, deg: f64) -> f64 {
    (1.0 - deg) * fluid_volume(v_t, porosity)
}

pub fn degraded_solid_volume(v_t: f64, porosity: f64, deg: f64) -> f64 {
    deg * solid_volume(v_t, porosity)
}

pub fn intact_solid_volume(v_t: f64, porosity: f64, deg: f64) -> f64 {
    (1.0 - deg) * solid_volume(v_t, porosity)
}

/// Accept values in [0, 1].
pub fn validate_percent(parameter: &'static str, value: f64) -> RepoResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        log::warn!("rejected {parameter} = {value}: outside [0, 1]");
        Err(RepoError::Range {
            parameter,
            value,
            message: "must be within [0, 1]".to_string(),
        })
    }
}

/// Accept finite, strictly positive values.
pub fn validate_finite_pos(parameter: &'static str, value: f64) -> RepoResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        log::warn!("rejected {parameter} = {value}: not finite and positive");
        Err(RepoError::Range {
            parameter,
            value,
            message: "must be finite and positive".to_string(),
        })
    }
}
