// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Nuclide Transport
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Nuclide and heat transport models for repository components.

pub mod boundary;
pub mod deg_rate;
pub mod degradation;
pub mod history;
pub mod inventory;
pub mod mixed_cell;
pub mod model;
pub mod one_dim_ppm;
pub mod stub;
pub mod thermal;

pub use model::{NuclideModel, NuclideModelKind, NuclideModelVariant, SourceTerm};
pub use thermal::{ThermalModel, ThermalModelVariant};
