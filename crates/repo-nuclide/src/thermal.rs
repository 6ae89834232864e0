// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Thermal Models
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Heat transport interface and its two models.
//!
//! Neither model solves a heat equation: the lumped model records its
//! current temperature once per step so peak temperatures can be queried,
//! the stub holds a constant temperature.

use repo_types::config::ThermalModelConfig;
use repo_types::error::{RepoError, RepoResult};
use repo_types::material::Time;
use std::collections::BTreeMap;

pub trait ThermalModel {
    fn name(&self) -> &'static str;
    fn transport_heat(&mut self, time: Time);
    /// Highest temperature seen [K].
    fn peak_temp(&self) -> f64;
    /// Current temperature [K].
    fn temp(&self) -> f64;
}

fn validate_temperature(value: f64) -> RepoResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(RepoError::Range {
            parameter: "temperature",
            value,
            message: "must be finite and non-negative kelvin".to_string(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct LumpedThermal {
    temperature: f64,
    temp_hist: BTreeMap<Time, f64>,
}

impl LumpedThermal {
    pub const NAME: &'static str = "LumpedThermal";

    pub fn new(temperature: f64) -> RepoResult<Self> {
        Ok(LumpedThermal {
            temperature: validate_temperature(temperature)?,
            temp_hist: BTreeMap::new(),
        })
    }

    pub fn set_temperature(&mut self, temperature: f64) -> RepoResult<()> {
        self.temperature = validate_temperature(temperature)?;
        Ok(())
    }

    pub fn temp_at(&self, time: Time) -> Option<f64> {
        self.temp_hist.get(&time).copied()
    }

    pub fn fresh_copy(&self) -> Self {
        LumpedThermal {
            temperature: self.temperature,
            temp_hist: BTreeMap::new(),
        }
    }
}

impl ThermalModel for LumpedThermal {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn transport_heat(&mut self, time: Time) {
        self.temp_hist.insert(time, self.temperature);
    }

    fn peak_temp(&self) -> f64 {
        self.temp_hist
            .values()
            .copied()
            .fold(self.temperature, f64::max)
    }

    fn temp(&self) -> f64 {
        self.temperature
    }
}

#[derive(Debug, Clone, Default)]
pub struct StubThermal {
    temperature: f64,
}

impl StubThermal {
    pub const NAME: &'static str = "StubThermal";

    pub fn new(temperature: f64) -> RepoResult<Self> {
        Ok(StubThermal {
            temperature: validate_temperature(temperature)?,
        })
    }
}

impl ThermalModel for StubThermal {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn transport_heat(&mut self, _time: Time) {}

    fn peak_temp(&self) -> f64 {
        self.temperature
    }

    fn temp(&self) -> f64 {
        self.temperature
    }
}

#[derive(Debug, Clone)]
pub enum ThermalModelVariant {
    Lumped(LumpedThermal),
    Stub(StubThermal),
}

impl ThermalModelVariant {
    pub const NAMES: [&'static str; 2] = [LumpedThermal::NAME, StubThermal::NAME];

    pub fn from_config(cfg: &ThermalModelConfig) -> RepoResult<Self> {
        match cfg.model.as_str() {
            LumpedThermal::NAME => Ok(Self::Lumped(LumpedThermal::new(cfg.initial_temperature)?)),
            StubThermal::NAME => Ok(Self::Stub(StubThermal::new(cfg.initial_temperature)?)),
            other => Err(RepoError::Configuration(format!(
                "unknown thermal model '{}', expected one of: {}",
                other,
                Self::NAMES.join(", ")
            ))),
        }
    }

    pub fn fresh_copy(&self) -> Self {
        match self {
            Self::Lumped(m) => Self::Lumped(m.fresh_copy()),
            Self::Stub(m) => Self::Stub(m.clone()),
        }
    }

    fn inner(&self) -> &dyn ThermalModel {
        match self {
            Self::Lumped(m) => m,
            Self::Stub(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ThermalModel {
        match self {
            Self::Lumped(m) => m,
            Self::Stub(m) => m,
        }
    }
}

impl ThermalModel for ThermalModelVariant {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn transport_heat(&mut self, time: Time) {
        self.inner_mut().transport_heat(time)
    }

    fn peak_temp(&self) -> f64 {
        self.inner().peak_temp()
    }

    fn temp(&self) -> f64 {
        self.inner().temp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lumped_peak_tracks_history() {
        let mut th = LumpedThermal::new(300.0).unwrap();
        th.transport_heat(0);
        th.set_temperature(350.0).unwrap();
        th.transport_heat(1);
        th.set_temperature(320.0).unwrap();
        th.transport_heat(2);
        assert_eq!(th.temp(), 320.0);
        assert_eq!(th.peak_temp(), 350.0);
        assert_eq!(th.temp_at(1), Some(350.0));
    }

    #[test]
    fn test_invalid_temperature_keeps_old() {
        let mut th = LumpedThermal::new(300.0).unwrap();
        assert!(th.set_temperature(-1.0).is_err());
        assert!(th.set_temperature(f64::NAN).is_err());
        assert_eq!(th.temp(), 300.0);
    }

    #[test]
    fn test_registry() {
        let cfg = ThermalModelConfig::named("LumpedThermal");
        assert_eq!(ThermalModelVariant::from_config(&cfg).unwrap().name(), "LumpedThermal");
        let cfg = ThermalModelConfig::named("StubThermal");
        assert_eq!(ThermalModelVariant::from_config(&cfg).unwrap().name(), "StubThermal");
        let cfg = ThermalModelConfig::named("Furnace");
        assert!(matches!(
            ThermalModelVariant::from_config(&cfg),
            Err(RepoError::Configuration(_))
        ));
    }

    #[test]
    fn test_fresh_copy_clears_history() {
        let mut th = ThermalModelVariant::Lumped(LumpedThermal::new(300.0).unwrap());
        th.transport_heat(4);
        let copy = th.fresh_copy();
        match copy {
            ThermalModelVariant::Lumped(ref m) => assert_eq!(m.temp_at(4), None),
            _ => panic!("copy changed variant"),
        }
        assert_eq!(copy.temp(), 300.0);
    }
}
