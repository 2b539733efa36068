//! # decision-engine
//!
//! Loan amortization, credit decisioning and risk scoring.
//!
//! Every component is a pure function from a typed input to a typed result
//! record. Nothing is shared between calls; any randomness (score sampling,
//! flag and catalog selection) is injected by the caller.
//!
//! ## Architecture
//!
//! - **core** — Shared value types: subject ids and the two risk score scales
//! - **lending** — Amortization schedules and the tiered credit policy
//! - **risk** — KYC and compliance checks over a shared flag catalog
//! - **fraud** — Severity-scored fraud alerts
//! - **simulation** — Seeded fixture generators for demos and tests

pub mod core;
pub mod error;
pub mod fraud;
pub mod lending;
pub mod risk;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::score::{PercentRiskScore, RiskScale, UnitRiskScore};
    pub use crate::core::subject::SubjectId;
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::fraud::alert::{AlertSeverity, AlertType, FraudAlert};
    pub use crate::fraud::generator::FraudAlertGenerator;
    pub use crate::lending::amortization::{AmortizationScheduler, LoanTerms, PaymentSchedule};
    pub use crate::lending::credit::{
        CreditDecision, CreditDecisionPolicy, CreditPolicyConfig, CreditProfile,
    };
    pub use crate::risk::category::RiskCategory;
    pub use crate::risk::compliance::ComplianceCheckEngine;
    pub use crate::risk::flag::{Flag, FlagSet, Severity};
    pub use crate::risk::kyc::{KycEscalation, RiskAssessmentEngine};
    pub use crate::risk::result::{RiskResult, RiskStatus};
    pub use crate::risk::source::{FixedScore, RiskScoreSource};
}
