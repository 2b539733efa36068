use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the customer (or account) an assessment is about.
///
/// # Examples
///
/// ```
/// use decision_engine::core::subject::SubjectId;
///
/// let alice = SubjectId::new("CUST-0001");
/// let bob = SubjectId::new("CUST-0002");
/// assert_ne!(alice, bob);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
