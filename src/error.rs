use thiserror::Error;

/// Errors surfaced by the decisioning engine.
///
/// Business outcomes (a declined application, a failed compliance check,
/// a critical fraud alert) are ordinary return values and never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid loan terms: {field}: {reason}")]
    InvalidLoanTerms { field: &'static str, reason: String },

    #[error("unknown {kind} category: '{value}'")]
    UnknownCategory { kind: &'static str, value: String },
}

impl EngineError {
    pub(crate) fn invalid_terms(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidLoanTerms {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown_category(kind: &'static str, value: impl Into<String>) -> Self {
        EngineError::UnknownCategory {
            kind,
            value: value.into(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
