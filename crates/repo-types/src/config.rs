// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{DEFAULT_BULK_DENSITY, DEFAULT_TEMP_LIMIT, DEFAULT_TOX_LIMIT};
use crate::error::{RepoError, RepoResult};
use crate::mat_data::MatDataTable;
use serde::{Deserialize, Serialize};

/// Top-level repository facility configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub name: String,
    /// Facility extent [m].
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Spacing between placed packages / buffers [m].
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    #[serde(default)]
    pub advective_velocity: f64,
    /// Maximum mass accepted per step [kg].
    pub capacity: f64,
    /// Maximum total inventory [kg].
    pub inventory_size: f64,
    #[serde(default)]
    pub lifetime: i64,
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    #[serde(default = "default_start_month")]
    pub start_month: u32,
    /// Commodities requested in rotation.
    pub incommodities: Vec<String>,
    #[serde(default)]
    pub materials: Vec<MatDataTable>,
    pub far_field: ComponentConfig,
    pub buffer: ComponentConfig,
    pub waste_forms: Vec<ComponentConfig>,
    pub waste_packages: Vec<ComponentConfig>,
}

fn default_start_year() -> i32 {
    2000
}
fn default_start_month() -> u32 {
    1
}

/// One component template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentConfig {
    pub name: String,
    /// `BUFFER`, `FF`, `WF` or `WP`.
    pub component_type: String,
    /// Name of an entry in [`RepositoryConfig::materials`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_data: Option<String>,
    #[serde(default)]
    pub inner_radius: f64,
    /// Absent means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_radius: Option<f64>,
    pub thermal_model: ThermalModelConfig,
    pub nuclide_model: NuclideModelConfig,
    /// Commodities a waste form accepts.
    #[serde(default)]
    pub allowed_commodities: Vec<String>,
    /// Waste form names a waste package accepts.
    #[serde(default)]
    pub allowed_waste_forms: Vec<String>,
    #[serde(default = "default_temp_limit")]
    pub temp_limit: f64,
    #[serde(default = "default_tox_limit")]
    pub tox_limit: f64,
}

fn default_temp_limit() -> f64 {
    DEFAULT_TEMP_LIMIT
}
fn default_tox_limit() -> f64 {
    DEFAULT_TOX_LIMIT
}

impl ComponentConfig {
    pub fn outer_radius_or_unbounded(&self) -> f64 {
        self.outer_radius.unwrap_or(f64::INFINITY)
    }
}

/// Nuclide transport model selection and its scalar parameters.
///
/// Parameters a variant does not use are ignored by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuclideModelConfig {
    /// Registry name, e.g. `DegRateNuclide`.
    pub model: String,
    #[serde(default)]
    pub degradation: f64,
    #[serde(default)]
    pub advective_velocity: f64,
    #[serde(default)]
    pub porosity: f64,
    #[serde(default = "default_true")]
    pub kd_limited: bool,
    #[serde(default = "default_true")]
    pub sol_limited: bool,
    #[serde(default)]
    pub initial_concentration: f64,
    #[serde(default)]
    pub source_concentration: f64,
    #[serde(default = "default_bulk_density")]
    pub bulk_density: f64,
}

fn default_true() -> bool {
    true
}
fn default_bulk_density() -> f64 {
    DEFAULT_BULK_DENSITY
}

impl NuclideModelConfig {
    /// Config for `model` with every parameter at its default.
    pub fn named(model: &str) -> Self {
        NuclideModelConfig {
            model: model.to_string(),
            degradation: 0.0,
            advective_velocity: 0.0,
            porosity: 0.0,
            kd_limited: true,
            sol_limited: true,
            initial_concentration: 0.0,
            source_concentration: 0.0,
            bulk_density: DEFAULT_BULK_DENSITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalModelConfig {
    /// `LumpedThermal` or `StubThermal`.
    pub model: String,
    #[serde(default)]
    pub initial_temperature: f64,
}

impl ThermalModelConfig {
    pub fn named(model: &str) -> Self {
        ThermalModelConfig {
            model: model.to_string(),
            initial_temperature: 0.0,
        }
    }
}

impl RepositoryConfig {
    /// Load from JSON file.
    pub fn from_file(path: &str) -> RepoResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> RepoResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Structural checks that serde cannot express.
    pub fn validate(&self) -> RepoResult<()> {
        if self.incommodities.is_empty() {
            return Err(RepoError::Configuration(
                "at least one incommodity is required".to_string(),
            ));
        }
        for (label, value) in [("dx", self.dx), ("dy", self.dy), ("capacity", self.capacity)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RepoError::Configuration(format!(
                    "{label} must be finite and positive, got {value}"
                )));
            }
        }
        let templates = [&self.far_field, &self.buffer]
            .into_iter()
            .chain(self.waste_forms.iter())
            .chain(self.waste_packages.iter());
        for component in templates {
            if let Some(material) = &component.material_data {
                if self.material(material).is_none() {
                    return Err(RepoError::Configuration(format!(
                        "component '{}' references unknown material data '{}'",
                        component.name, material
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn material(&self, name: &str) -> Option<&MatDataTable> {
        self.materials.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// CARGO_MANIFEST_DIR points to crates/repo-types/, configs/ sits two levels up.
    fn config_path(relative: &str) -> String {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("configs")
            .join(relative)
            .to_string_lossy()
            .to_string()
    }

    #[test]
    fn test_load_reference_repository() {
        let cfg = RepositoryConfig::from_file(&config_path("reference_repository.json")).unwrap();
        assert_eq!(cfg.name, "reference-repository");
        assert_eq!(cfg.incommodities, vec!["spent_fuel", "hlw_glass"]);
        assert_eq!(cfg.waste_forms.len(), 2);
        assert_eq!(cfg.waste_packages.len(), 1);
        assert_eq!(cfg.far_field.component_type, "FF");
        assert!(cfg.far_field.outer_radius_or_unbounded().is_infinite());
        assert_eq!(cfg.buffer.nuclide_model.model, "MixedCellNuclide");
        assert!(cfg.buffer.nuclide_model.kd_limited);
        assert_eq!(cfg.materials.len(), 2);
    }

    #[test]
    fn test_nuclide_defaults() {
        let cfg: NuclideModelConfig = serde_json::from_str(r#"{"model":"StubNuclide"}"#).unwrap();
        assert_eq!(cfg, NuclideModelConfig::named("StubNuclide"));
        assert!(cfg.sol_limited);
        assert_eq!(cfg.bulk_density, DEFAULT_BULK_DENSITY);
    }

    #[test]
    fn test_component_limit_defaults() {
        let json = r#"{
            "name": "wf",
            "component_type": "WF",
            "thermal_model": {"model": "StubThermal"},
            "nuclide_model": {"model": "DegRateNuclide", "degradation": 0.1}
        }"#;
        let cfg: ComponentConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.temp_limit, 373.0);
        assert_eq!(cfg.tox_limit, 10.0);
        assert_eq!(cfg.inner_radius, 0.0);
    }

    #[test]
    fn test_unknown_material_rejected() {
        let path = config_path("reference_repository.json");
        let mut cfg = RepositoryConfig::from_file(&path).unwrap();
        cfg.buffer.material_data = Some("unobtainium".to_string());
        assert!(matches!(cfg.validate(), Err(RepoError::Configuration(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = RepositoryConfig::from_file("/nonexistent/repository.json");
        assert!(matches!(result, Err(RepoError::Io(_))));
    }
}
