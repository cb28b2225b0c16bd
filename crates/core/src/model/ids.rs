use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a step in the catalog.
///
/// Also used as the key of the answer map.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(u32);

impl StepId {
    /// Creates a new `StepId`
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Identifier of a selectable option, unique within its step.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(String);

impl OptionId {
    /// Creates a new `OptionId`.
    ///
    /// # Errors
    ///
    /// Returns `IdError::EmptyOptionId` if the value is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, IdError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IdError::EmptyOptionId);
        }
        Ok(Self(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of one in-memory quiz session, used to correlate log output.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a fresh random `SessionId`.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Debug for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StepId({})", self.0)
    }
}

impl fmt::Debug for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionId({:?})", self.0)
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Errors produced while building or parsing identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdError {
    #[error("failed to parse StepId from {raw:?}")]
    InvalidStepId { raw: String },

    #[error("option id cannot be empty")]
    EmptyOptionId,
}

impl FromStr for StepId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .map(StepId::new)
            .map_err(|_| IdError::InvalidStepId { raw: s.to_string() })
    }
}

impl FromStr for OptionId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptionId::new(s)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_id_display() {
        let id = StepId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_step_id_from_str() {
        let id: StepId = "13".parse().unwrap();
        assert_eq!(id, StepId::new(13));
    }

    #[test]
    fn test_step_id_from_str_invalid() {
        let result = "not-a-number".parse::<StepId>();
        assert!(matches!(result, Err(IdError::InvalidStepId { .. })));
    }

    #[test]
    fn test_option_id_rejects_blank() {
        assert_eq!(OptionId::new("  "), Err(IdError::EmptyOptionId));
    }

    #[test]
    fn test_option_id_display() {
        let id = OptionId::new("money").unwrap();
        assert_eq!(id.to_string(), "money");
        assert_eq!(format!("{id:?}"), "OptionId(\"money\")");
    }

    #[test]
    fn test_session_ids_are_distinct() {
        assert_ne!(SessionId::random(), SessionId::random());
    }
}
