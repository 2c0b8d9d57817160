//! Workflow step outcomes.

use serde::{Deserialize, Serialize};

/// Successful result of a workflow step handler.
///
/// Failures travel separately as the handler's error type, so a handler
/// returns one of three things: continue, complete, or an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// The step stays open and expects further interactions.
    Continue,
    /// The step is finished; no further interactions are expected.
    Complete,
}

impl StepOutcome {
    /// Whether the step has finished.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl std::fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Continue => write!(f, "continue"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_complete() {
        assert!(StepOutcome::Complete.is_complete());
        assert!(!StepOutcome::Continue.is_complete());
    }

    #[test]
    fn test_display() {
        assert_eq!(StepOutcome::Continue.to_string(), "continue");
        assert_eq!(StepOutcome::Complete.to_string(), "complete");
    }
}
