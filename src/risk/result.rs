use crate::core::score::RiskScale;
use crate::core::subject::SubjectId;
use crate::risk::category::RiskCategory;
use crate::risk::flag::FlagSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a KYC or compliance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskStatus {
    Passed,
    Failed,
    PendingReview,
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskStatus::Passed => "passed",
            RiskStatus::Failed => "failed",
            RiskStatus::PendingReview => "pending-review",
        };
        f.pad(s)
    }
}

/// Result record shared by KYC (`S = UnitRiskScore`) and compliance checks
/// (`S = PercentRiskScore`).
///
/// Immutable once built: downstream consumers may wrap it but get no setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult<S> {
    subject_id: SubjectId,
    check: RiskCategory,
    status: RiskStatus,
    risk_score: S,
    timestamp: DateTime<Utc>,
    flags: FlagSet,
    notes: String,
}

impl<S: RiskScale> RiskResult<S> {
    pub(crate) fn new(
        subject_id: SubjectId,
        check: RiskCategory,
        status: RiskStatus,
        risk_score: S,
        timestamp: DateTime<Utc>,
        flags: FlagSet,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            subject_id,
            check,
            status,
            risk_score,
            timestamp,
            flags,
            notes: notes.into(),
        }
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    pub fn check(&self) -> RiskCategory {
        self.check
    }

    pub fn status(&self) -> RiskStatus {
        self.status
    }

    pub fn risk_score(&self) -> S {
        self.risk_score
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn is_passed(&self) -> bool {
        self.status == RiskStatus::Passed
    }

    /// Flags are present exactly when the score is elevated, and every flag
    /// carries the severity the score implies.
    pub fn is_consistent(&self) -> bool {
        match self.risk_score.flag_severity() {
            None => self.flags.is_empty(),
            Some(severity) => {
                !self.flags.is_empty() && self.flags.iter().all(|f| f.severity == severity)
            }
        }
    }
}

impl<S: RiskScale> fmt::Display for RiskResult<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} check: {} ===", self.check, self.subject_id)?;
        writeln!(f, "Status:     {}", self.status)?;
        writeln!(f, "Risk Score: {}", self.risk_score)?;
        writeln!(f, "Timestamp:  {}", self.timestamp.to_rfc3339())?;
        writeln!(f, "Notes:      {}", self.notes)?;
        if !self.flags.is_empty() {
            writeln!(f, "Flags:")?;
            for flag in &self.flags {
                writeln!(
                    f,
                    "  [{}] {}: {}",
                    flag.severity, flag.category, flag.description
                )?;
            }
        }
        Ok(())
    }
}
