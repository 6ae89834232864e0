// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// U-235 isotope identifier (Z*1000 + A).
/// Also the key of the zero sentinel composition and concentration map.
pub const U235: i32 = 92235;

/// Divisor separating the element from an isotope identifier.
pub const ISO_ELEMENT_DIVISOR: i32 = 1000;

/// Relative tolerance used when comparing extracted and held masses.
pub const MASS_TOLERANCE: f64 = 1e-9;

/// Default component temperature limit [K].
pub const DEFAULT_TEMP_LIMIT: f64 = 373.0;

/// Default component radiotoxicity limit [Sv].
pub const DEFAULT_TOX_LIMIT: f64 = 10.0;

/// Default bulk density for the 1-D profile model [kg/m^3].
pub const DEFAULT_BULK_DENSITY: f64 = 1.0;
