// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Report Sink
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Flat rows describing placed components and their contaminants.
//!
//! The sink is created once by the caller and passed to every operation
//! that reports.

use repo_types::error::RepoResult;
use repo_types::material::{Iso, Time};
use serde::Serialize;

/// One placed component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentRow {
    pub comp_id: usize,
    pub parent_id: Option<usize>,
    pub comp_type: String,
    pub name: String,
    pub material_data: String,
    pub nuclide_model: String,
    pub thermal_model: String,
    pub inner_radius: f64,
    /// Serialized as `null` when unbounded.
    pub outer_radius: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Mass and available concentration of one isotope in one component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContaminantRow {
    pub comp_id: usize,
    pub time: Time,
    pub iso_id: Iso,
    pub mass_kg: f64,
    pub avail_conc: f64,
}

pub trait ReportSink {
    fn add_component_row(&mut self, row: ComponentRow);
    fn add_contaminant_row(&mut self, row: ContaminantRow);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn add_component_row(&mut self, _row: ComponentRow) {}
    fn add_contaminant_row(&mut self, _row: ContaminantRow) {}
}

/// Keeps every row in memory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemorySink {
    pub components: Vec<ComponentRow>,
    pub contaminants: Vec<ContaminantRow>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contaminants_at(&self, time: Time) -> impl Iterator<Item = &ContaminantRow> {
        self.contaminants.iter().filter(move |row| row.time == time)
    }

    pub fn to_json(&self) -> RepoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl ReportSink for MemorySink {
    fn add_component_row(&mut self, row: ComponentRow) {
        self.components.push(row);
    }

    fn add_contaminant_row(&mut self, row: ContaminantRow) {
        self.contaminants.push(row);
    }
}
