use crate::risk::category::RiskCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.pad(s)
    }
}

/// A typed, severity-ranked finding attached to a risk assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    #[serde(rename = "type")]
    pub category: RiskCategory,
    pub severity: Severity,
    pub description: String,
}

/// Flags keyed by category: at most one flag per type.
///
/// # Examples
///
/// ```
/// use decision_engine::risk::category::RiskCategory;
/// use decision_engine::risk::flag::{Flag, FlagSet, Severity};
///
/// let mut flags = FlagSet::new();
/// let flag = Flag {
///     category: RiskCategory::Address,
///     severity: Severity::Medium,
///     description: "Address could not be verified".into(),
/// };
/// assert!(flags.insert(flag.clone()));
/// assert!(!flags.insert(flag));
/// assert_eq!(flags.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Flag>", try_from = "Vec<Flag>")]
pub struct FlagSet(Vec<Flag>);

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flag. Returns `false` (and leaves the set unchanged) when a
    /// flag of the same category is already present.
    pub fn insert(&mut self, flag: Flag) -> bool {
        if self.contains(flag.category) {
            return false;
        }
        self.0.push(flag);
        true
    }

    pub fn contains(&self, category: RiskCategory) -> bool {
        self.0.iter().any(|f| f.category == category)
    }

    pub fn get(&self, category: RiskCategory) -> Option<&Flag> {
        self.0.iter().find(|f| f.category == category)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Flag> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Highest severity present, if any.
    pub fn max_severity(&self) -> Option<Severity> {
        self.0.iter().map(|f| f.severity).max()
    }
}

impl<'a> IntoIterator for &'a FlagSet {
    type Item = &'a Flag;
    type IntoIter = std::slice::Iter<'a, Flag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<FlagSet> for Vec<Flag> {
    fn from(set: FlagSet) -> Self {
        set.0
    }
}

impl TryFrom<Vec<Flag>> for FlagSet {
    type Error = String;

    fn try_from(flags: Vec<Flag>) -> Result<Self, Self::Error> {
        let mut set = FlagSet::new();
        for flag in flags {
            let category = flag.category;
            if !set.insert(flag) {
                return Err(format!("duplicate flag type '{}'", category));
            }
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(category: RiskCategory, severity: Severity) -> Flag {
        Flag {
            category,
            severity,
            description: format!("{} finding", category),
        }
    }

    #[test]
    fn test_duplicate_category_rejected_even_with_other_severity() {
        let mut flags = FlagSet::new();
        assert!(flags.insert(flag(RiskCategory::Identity, Severity::Medium)));
        assert!(!flags.insert(flag(RiskCategory::Identity, Severity::High)));
        assert_eq!(flags.len(), 1);
        assert_eq!(flags.get(RiskCategory::Identity).unwrap().severity, Severity::Medium);
    }

    #[test]
    fn test_max_severity() {
        let mut flags = FlagSet::new();
        assert_eq!(flags.max_severity(), None);
        flags.insert(flag(RiskCategory::Address, Severity::Low));
        flags.insert(flag(RiskCategory::Watchlist, Severity::High));
        assert_eq!(flags.max_severity(), Some(Severity::High));
    }

    #[test]
    fn test_deserializing_duplicates_fails() {
        let json = r#"[
            {"type": "aml", "severity": "low", "description": "a"},
            {"type": "aml", "severity": "high", "description": "b"}
        ]"#;
        assert!(serde_json::from_str::<FlagSet>(json).is_err());
    }

    #[test]
    fn test_flag_serializes_type_field() {
        let json = serde_json::to_value(flag(RiskCategory::Pep, Severity::High)).unwrap();
        assert_eq!(json["type"], "pep");
        assert_eq!(json["severity"], "high");
    }
}
