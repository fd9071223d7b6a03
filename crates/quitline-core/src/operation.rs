//! Counter operations as submitted to the chain collaborator

use crate::identifiers::CounterId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five operations a user can perform against a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Start a new counter.
    Create,
    /// Pause the streak clock.
    Pause,
    /// Resume a paused counter.
    Resume,
    /// Reset the streak, recording it if it is the longest.
    Reset,
    /// Close the counter permanently.
    Delete,
}

impl OperationKind {
    /// Short capitalized label for user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Pause => "Pause",
            Self::Resume => "Resume",
            Self::Reset => "Reset",
            Self::Delete => "Delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Payload for a Create operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSpec {
    /// Habit label for the new counter.
    pub category: String,
    /// Display color token.
    pub color: String,
    /// Optional backdated streak origin (Unix seconds).
    pub custom_started_at: Option<u64>,
}

impl CreateSpec {
    /// Create a spec starting the streak at submission time.
    pub fn new(category: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            color: color.into(),
            custom_started_at: None,
        }
    }

    /// Backdate the streak origin.
    #[must_use]
    pub fn with_custom_start(mut self, started_at: u64) -> Self {
        self.custom_started_at = Some(started_at);
        self
    }
}

/// A fully-specified operation ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationRequest {
    /// Start a new counter from the given spec.
    Create(CreateSpec),
    /// Pause the given counter.
    Pause(CounterId),
    /// Resume the given counter.
    Resume(CounterId),
    /// Reset the given counter.
    Reset(CounterId),
    /// Delete the given counter.
    Delete(CounterId),
}

impl OperationRequest {
    /// The operation kind of this request.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Create(_) => OperationKind::Create,
            Self::Pause(_) => OperationKind::Pause,
            Self::Resume(_) => OperationKind::Resume,
            Self::Reset(_) => OperationKind::Reset,
            Self::Delete(_) => OperationKind::Delete,
        }
    }

    /// Target counter id; absent for Create, which has no id yet.
    pub fn target(&self) -> Option<CounterId> {
        match self {
            Self::Create(_) => None,
            Self::Pause(id) | Self::Resume(id) | Self::Reset(id) | Self::Delete(id) => Some(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_kind_and_target() {
        let create = OperationRequest::Create(CreateSpec::new("Smoking", "#fff"));
        assert_eq!(create.kind(), OperationKind::Create);
        assert_eq!(create.target(), None);

        let pause = OperationRequest::Pause(CounterId::new(7));
        assert_eq!(pause.kind(), OperationKind::Pause);
        assert_eq!(pause.target(), Some(CounterId::new(7)));
    }

    #[test]
    fn create_spec_builder() {
        let spec = CreateSpec::new("Sugar", "#f59e0b").with_custom_start(1_700_000_000);
        assert_eq!(spec.custom_started_at, Some(1_700_000_000));
        assert_eq!(spec.category, "Sugar");
    }
}
