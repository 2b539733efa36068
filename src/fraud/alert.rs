use crate::core::score::PercentRiskScore;
use crate::core::subject::SubjectId;
use crate::error::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use uuid::Uuid;

/// The kind of activity that triggered an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertType {
    Transaction,
    Login,
    Device,
    AccountChange,
    Identity,
}

impl AlertType {
    pub const ALL: [AlertType; 5] = [
        AlertType::Transaction,
        AlertType::Login,
        AlertType::Device,
        AlertType::AccountChange,
        AlertType::Identity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Transaction => "transaction",
            AlertType::Login => "login",
            AlertType::Device => "device",
            AlertType::AccountChange => "account-change",
            AlertType::Identity => "identity",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AlertType {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        AlertType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| EngineError::unknown_category("alert", s))
    }
}

/// Alert severity. Each level owns a disjoint band of risk scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertSeverity {
    pub const ALL: [AlertSeverity; 4] = [
        AlertSeverity::Low,
        AlertSeverity::Medium,
        AlertSeverity::High,
        AlertSeverity::Critical,
    ];

    /// Half-open score band `[lo, hi)` for this severity.
    pub fn score_band(&self) -> Range<f64> {
        match self {
            AlertSeverity::Critical => 80.0..100.0,
            AlertSeverity::High => 60.0..80.0,
            AlertSeverity::Medium => 40.0..60.0,
            AlertSeverity::Low => 0.0..40.0,
        }
    }

    /// Map a uniform roll in `[0, 1)` onto the severity mix
    /// (critical 20%, high 30%, medium 30%, low 20%) by cumulative threshold.
    pub fn from_roll(roll: f64) -> Self {
        if roll < 0.2 {
            AlertSeverity::Critical
        } else if roll < 0.5 {
            AlertSeverity::High
        } else if roll < 0.8 {
            AlertSeverity::Medium
        } else {
            AlertSeverity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Low => "low",
            AlertSeverity::Medium => "medium",
            AlertSeverity::High => "high",
            AlertSeverity::Critical => "critical",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AlertSeverity {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        AlertSeverity::ALL
            .into_iter()
            .find(|sev| sev.as_str() == wanted)
            .ok_or_else(|| EngineError::unknown_category("severity", s))
    }
}

/// Case-management state. Alerts are always raised as `New`; later
/// transitions belong to whoever works the case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertStatus {
    New,
    Investigating,
    Resolved,
    FalsePositive,
}

/// Extra context carried by transaction, login and device alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AlertDetails {
    Transaction {
        amount: Decimal,
        currency: String,
        merchant: String,
        location: String,
    },
    Login {
        ip_address: String,
        location: String,
        device: String,
    },
    Device {
        device_id: String,
        device_type: String,
        ip_address: String,
    },
}

/// A severity-scored fraud alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudAlert {
    id: Uuid,
    subject_id: SubjectId,
    alert_type: AlertType,
    severity: AlertSeverity,
    risk_score: PercentRiskScore,
    title: String,
    description: String,
    status: AlertStatus,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<AlertDetails>,
}

impl FraudAlert {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: Uuid,
        subject_id: SubjectId,
        alert_type: AlertType,
        severity: AlertSeverity,
        risk_score: PercentRiskScore,
        title: &str,
        description: &str,
        created_at: DateTime<Utc>,
        details: Option<AlertDetails>,
    ) -> Self {
        Self {
            id,
            subject_id,
            alert_type,
            severity,
            risk_score,
            title: title.to_string(),
            description: description.to_string(),
            status: AlertStatus::New,
            created_at,
            details,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    pub fn alert_type(&self) -> AlertType {
        self.alert_type
    }

    pub fn severity(&self) -> AlertSeverity {
        self.severity
    }

    pub fn risk_score(&self) -> PercentRiskScore {
        self.risk_score
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> AlertStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn details(&self) -> Option<&AlertDetails> {
        self.details.as_ref()
    }
}

impl fmt::Display for FraudAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Fraud Alert {} ===", self.id)?;
        writeln!(f, "Subject:     {}", self.subject_id)?;
        writeln!(f, "Type:        {}", self.alert_type)?;
        writeln!(f, "Severity:    {}", self.severity)?;
        writeln!(f, "Risk Score:  {}", self.risk_score)?;
        writeln!(f, "Title:       {}", self.title)?;
        writeln!(f, "Description: {}", self.description)?;
        match &self.details {
            Some(AlertDetails::Transaction {
                amount,
                currency,
                merchant,
                location,
            }) => writeln!(
                f,
                "Transaction: {} {} at {} ({})",
                amount, currency, merchant, location
            )?,
            Some(AlertDetails::Login {
                ip_address,
                location,
                device,
            }) => writeln!(f, "Login:       {} from {} on {}", ip_address, location, device)?,
            Some(AlertDetails::Device {
                device_id,
                device_type,
                ip_address,
            }) => writeln!(f, "Device:      {} {} via {}", device_type, device_id, ip_address)?,
            None => {}
        }
        Ok(())
    }
}
