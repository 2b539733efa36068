//! Risk score scales.
//!
//! KYC assessments score on the unit interval while the generic compliance
//! checks and fraud alerts score on 0–100. The two are kept as distinct types
//! so a score can never be read on the wrong scale.

use crate::risk::flag::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scale-aware risk score.
pub trait RiskScale: Copy + PartialOrd + fmt::Debug + fmt::Display {
    /// Raw numeric value on this scale.
    fn value(&self) -> f64;

    /// Severity of flags raised at this score, or `None` when the score is
    /// below the elevated threshold and no flags may be raised.
    fn flag_severity(&self) -> Option<Severity>;
}

/// Risk score on the unit interval `[0, 1]`, used by KYC.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct UnitRiskScore(f64);

impl UnitRiskScore {
    /// Scores at or above this value are elevated.
    pub const ELEVATED: f64 = 0.3;
    /// Scores strictly above this value raise high-severity flags.
    pub const HIGH: f64 = 0.7;

    /// Returns `None` for NaN or values outside `[0, 1]`.
    pub fn new(value: f64) -> Option<Self> {
        (0.0..=1.0).contains(&value).then_some(Self(value))
    }

    /// Clamps into `[0, 1]`; NaN maps to zero.
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }
}

impl RiskScale for UnitRiskScore {
    fn value(&self) -> f64 {
        self.0
    }

    fn flag_severity(&self) -> Option<Severity> {
        if self.0 < Self::ELEVATED {
            None
        } else if self.0 > Self::HIGH {
            Some(Severity::High)
        } else {
            Some(Severity::Medium)
        }
    }
}

impl TryFrom<f64> for UnitRiskScore {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("risk score {} is outside [0, 1]", value))
    }
}

impl From<UnitRiskScore> for f64 {
    fn from(score: UnitRiskScore) -> Self {
        score.0
    }
}

impl fmt::Display for UnitRiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Risk score on `[0, 100]`, used by compliance checks and fraud alerts.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct PercentRiskScore(f64);

impl PercentRiskScore {
    /// Scores at or above this value need review.
    pub const ELEVATED: f64 = 30.0;
    /// Scores at or above this value fail outright.
    pub const HIGH: f64 = 70.0;
    pub const MAX: f64 = 100.0;

    /// Returns `None` for NaN or values outside `[0, 100]`.
    pub fn new(value: f64) -> Option<Self> {
        (0.0..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Clamps into `[0, 100]`; NaN maps to zero.
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, Self::MAX))
        }
    }
}

impl RiskScale for PercentRiskScore {
    fn value(&self) -> f64 {
        self.0
    }

    fn flag_severity(&self) -> Option<Severity> {
        if self.0 < Self::ELEVATED {
            None
        } else if self.0 >= Self::HIGH {
            Some(Severity::High)
        } else {
            Some(Severity::Medium)
        }
    }
}

impl TryFrom<f64> for PercentRiskScore {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("risk score {} is outside [0, 100]", value))
    }
}

impl From<PercentRiskScore> for f64 {
    fn from(score: PercentRiskScore) -> Self {
        score.0
    }
}

impl fmt::Display for PercentRiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}
