use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compliance check families, also used as flag types.
///
/// A check of one category may raise flags of several categories; the
/// check's own category is always one of the candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Kyc,
    Aml,
    Fraud,
    Sanctions,
    Pep,
    Identity,
    Address,
    Document,
    Watchlist,
    Transaction,
    Behavior,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 11] = [
        RiskCategory::Kyc,
        RiskCategory::Aml,
        RiskCategory::Fraud,
        RiskCategory::Sanctions,
        RiskCategory::Pep,
        RiskCategory::Identity,
        RiskCategory::Address,
        RiskCategory::Document,
        RiskCategory::Watchlist,
        RiskCategory::Transaction,
        RiskCategory::Behavior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Kyc => "kyc",
            RiskCategory::Aml => "aml",
            RiskCategory::Fraud => "fraud",
            RiskCategory::Sanctions => "sanctions",
            RiskCategory::Pep => "pep",
            RiskCategory::Identity => "identity",
            RiskCategory::Address => "address",
            RiskCategory::Document => "document",
            RiskCategory::Watchlist => "watchlist",
            RiskCategory::Transaction => "transaction",
            RiskCategory::Behavior => "behavior",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RiskCategory {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        RiskCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| EngineError::unknown_category("check", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_category() {
        for category in RiskCategory::ALL {
            assert_eq!(category.as_str().parse::<RiskCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("PEP".parse::<RiskCategory>().unwrap(), RiskCategory::Pep);
    }

    #[test]
    fn test_unknown_category() {
        let err = "credit".parse::<RiskCategory>().unwrap_err();
        assert_eq!(
            err,
            EngineError::UnknownCategory {
                kind: "check",
                value: "credit".to_string()
            }
        );
    }

    #[test]
    fn test_serde_name_matches_display() {
        let json = serde_json::to_string(&RiskCategory::Watchlist).unwrap();
        assert_eq!(json, format!("\"{}\"", RiskCategory::Watchlist));
    }
}
