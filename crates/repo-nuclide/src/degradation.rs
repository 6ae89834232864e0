// ─────────────────────────────────────────────────────────────────────
// SCPN Repository Core — Degradation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Linear matrix degradation, clamped at full degradation.

use repo_math::volumes::validate_percent;
use repo_types::error::RepoResult;
use repo_types::material::Time;

/// Degradation state. The default has a zero rate and starts at t = 0.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Degradation {
    rate: f64,
    total: f64,
    last_degraded: Time,
}

impl Degradation {
    pub fn new(rate: f64, time: Time) -> RepoResult<Self> {
        Ok(Degradation {
            rate: validate_percent("degradation rate", rate)?,
            total: 0.0,
            last_degraded: time,
        })
    }

    /// Fraction degraded per step, in [0, 1].
    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: f64) -> RepoResult<()> {
        self.rate = validate_percent("degradation rate", rate)?;
        Ok(())
    }

    /// Cumulative degraded fraction, in [0, 1].
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn last_degraded(&self) -> Time {
        self.last_degraded
    }

    /// Degrade up to `time` and return the new total.
    ///
    /// # Panics
    /// If `time` precedes the last degradation step.
    pub fn advance(&mut self, time: Time) -> f64 {
        assert!(
            self.last_degraded <= time,
            "degradation time went backwards: {} after {}",
            time,
            self.last_degraded
        );
        let elapsed = (time - self.last_degraded) as f64;
        self.total = (self.total + self.rate * elapsed).min(1.0);
        self.last_degraded = time;
        self.total
    }

    /// Same rate, nothing degraded yet, stamped at `time`.
    pub fn restarted_at(&self, time: Time) -> Self {
        Degradation {
            rate: self.rate,
            total: 0.0,
            last_degraded: time,
        }
    }
}
