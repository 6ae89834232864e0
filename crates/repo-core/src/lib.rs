// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Facility
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Component tree and the generic repository that drives it.
//!
//! Components nest waste form → waste package → buffer → far field, and
//! nuclides move outward one level per step.

pub mod component;
pub mod report;
pub mod repository;

pub use component::{Component, ComponentId, ComponentTree, ComponentType};
pub use report::{ComponentRow, ContaminantRow, MemorySink, NullSink, ReportSink};
pub use repository::{Repository, Request};
