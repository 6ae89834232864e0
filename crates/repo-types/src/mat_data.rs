// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Material Data Table
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-element chemical properties of a host material.
//!
//! Read-only lookup used by the transport models: diffusion coefficient,
//! sorption distribution coefficient and solubility limit.

use crate::material::{element_of, Elem, Iso};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Chemical properties of one element in a host material.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementData {
    /// Diffusion coefficient D [m^2/step].
    #[serde(default)]
    pub diffusion_coeff: f64,
    /// Distribution coefficient K_d [-].
    #[serde(default)]
    pub kd: f64,
    /// Solubility limit [kg/m^3]. Absent means unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solubility: Option<f64>,
}

/// Material data keyed by element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatDataTable {
    pub name: String,
    #[serde(default)]
    pub elements: BTreeMap<Elem, ElementData>,
    /// Used for any element without an explicit entry.
    #[serde(default)]
    pub fallback: ElementData,
}

impl MatDataTable {
    pub fn new(name: &str) -> Self {
        MatDataTable {
            name: name.to_string(),
            elements: BTreeMap::new(),
            fallback: ElementData::default(),
        }
    }

    pub fn with_element(mut self, elem: Elem, data: ElementData) -> Self {
        self.elements.insert(elem, data);
        self
    }

    pub fn element(&self, elem: Elem) -> &ElementData {
        self.elements.get(&elem).unwrap_or(&self.fallback)
    }

    /// Diffusion coefficient of an element.
    pub fn d(&self, elem: Elem) -> f64 {
        self.element(elem).diffusion_coeff
    }

    /// Distribution coefficient of an isotope (per element).
    pub fn k_d(&self, iso: Iso) -> f64 {
        self.element(element_of(iso)).kd
    }

    /// Solubility limit of an isotope (per element); infinite when unlimited.
    pub fn s(&self, iso: Iso) -> f64 {
        self.element(element_of(iso))
            .solubility
            .unwrap_or(f64::INFINITY)
    }
}

impl Default for MatDataTable {
    fn default() -> Self {
        Self::new("default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_element() {
        let table = MatDataTable::new("clay").with_element(
            92,
            ElementData {
                diffusion_coeff: 2.0,
                kd: 0.5,
                solubility: Some(1e-3),
            },
        );
        assert_eq!(table.d(92), 2.0);
        assert_eq!(table.k_d(92235), 0.5);
        assert_eq!(table.k_d(92238), 0.5);
        assert_eq!(table.s(92235), 1e-3);
    }

    #[test]
    fn test_fallback_is_unlimited() {
        let table = MatDataTable::default();
        assert_eq!(table.d(95), 0.0);
        assert_eq!(table.k_d(95241), 0.0);
        assert!(table.s(95241).is_infinite());
    }

    #[test]
    fn test_deserialize_integer_keys() {
        let json = r#"{"name":"granite","elements":{"92":{"diffusion_coeff":1.0,"kd":3.0}}}"#;
        let table: MatDataTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.d(92), 1.0);
        assert_eq!(table.k_d(92235), 3.0);
        assert!(table.s(92235).is_infinite());
    }
}
