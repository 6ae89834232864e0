// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Solubility Limiter
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Linear-sorption and solubility partition of an isotope mass.
//!
//! Symbols:
//! - `m_t`: total isotope mass [kg]
//! - `kd`: distribution coefficient [-]
//! - `v_s`, `v_f`: solid and fluid phase volumes [m^3]
//! - `deg`: degraded fraction in [0, 1]
//! - `c_sol`: solubility limit [kg/m^3]
//!
//! `v_f == 0` is a caller precondition; nothing here guards the division.

/// Mass in the fluid phase at sorption equilibrium, `m_t / (1 + kd·v_s/v_f)`.
pub fn mobile_mass(m_t: f64, kd: f64, v_s: f64, v_f: f64) -> f64 {
    m_t / (1.0 + kd * v_s / v_f)
}

/// Mass held on the solid phase, `kd·(v_s/v_f)·m_f`.
pub fn sorbed_mass(m_t: f64, kd: f64, v_s: f64, v_f: f64) -> f64 {
    kd * (v_s / v_f) * mobile_mass(m_t, kd, v_s, v_f)
}

pub fn degraded_sorbed(m_t: f64, kd: f64, v_s: f64, v_f: f64, deg: f64) -> f64 {
    deg * sorbed_mass(m_t, kd, v_s, v_f)
}

pub fn intact_sorbed(m_t: f64, kd: f64, v_s: f64, v_f: f64, deg: f64) -> f64 {
    (1.0 - deg) * sorbed_mass(m_t, kd, v_s, v_f)
}

/// Mobile mass in the degraded fluid volume.
pub fn degraded_mobile(m_t: f64, kd: f64, v_s: f64, v_f: f64, deg: f64) -> f64 {
    deg * mobile_mass(m_t, kd, v_s, v_f)
}

pub fn intact_mobile(m_t: f64, kd: f64, v_s: f64, v_f: f64, deg: f64) -> f64 {
    (1.0 - deg) * mobile_mass(m_t, kd, v_s, v_f)
}

/// Degraded mobile mass capped at what the fluid can dissolve, `min(c_sol·v_f, m_ff)`.
pub fn solubility_capped_mobile(
    m_t: f64,
    kd: f64,
    v_s: f64,
    v_f: f64,
    deg: f64,
    c_sol: f64,
) -> f64 {
    let m_ff = degraded_mobile(m_t, kd, v_s, v_f, deg);
    (c_sol * v_f).min(m_ff)
}

/// Degraded mobile mass in excess of solubility.
pub fn precipitated_mass(m_t: f64, kd: f64, v_s: f64, v_f: f64, deg: f64, c_sol: f64) -> f64 {
    degraded_mobile(m_t, kd, v_s, v_f, deg)
        - solubility_capped_mobile(m_t, kd, v_s, v_f, deg, c_sol)
}
