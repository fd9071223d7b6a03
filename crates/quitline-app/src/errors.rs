//! Categorized engine errors
//!
//! Every failure the engine can surface, with its toast severity. Local
//! validation failures never reach a collaborator; submission errors wrap
//! the signer's classification; read/subscription errors come from the
//! chain boundary.

use crate::views::notifications::ToastLevel;
use quitline_core::{ChainReadError, SubmitError, SubscribeError};

/// Failures surfaced by the reconciliation engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A Create is already in flight; one at a time.
    #[error("a counter creation is already pending")]
    OperationAlreadyPending,
    /// The category was empty after trimming.
    #[error("category must not be empty")]
    InvalidCategory,
    /// A counter for this habit already exists (case-insensitive match).
    #[error("a \"{0}\" counter already exists")]
    DuplicateCategory(String),
    /// The signer declined or could not submit.
    #[error(transparent)]
    Submission(#[from] SubmitError),
    /// The bulk read failed or decoded badly.
    #[error(transparent)]
    Read(#[from] ChainReadError),
    /// The confirmation subscription could not be established.
    #[error(transparent)]
    Subscription(#[from] SubscribeError),
    /// No account is connected.
    #[error("no account connected")]
    NotConnected,
}

impl EngineError {
    /// Toast severity the presentation layer should use for this error.
    ///
    /// A rejected signing request is deliberate user action, not a fault,
    /// so it routes as informational.
    pub fn toast_level(&self) -> ToastLevel {
        match self {
            Self::OperationAlreadyPending => ToastLevel::Info,
            Self::InvalidCategory | Self::DuplicateCategory(_) => ToastLevel::Error,
            Self::Submission(SubmitError::UserRejected) => ToastLevel::Info,
            Self::Submission(_) => ToastLevel::Error,
            Self::Read(_) => ToastLevel::Warning,
            Self::Subscription(_) => ToastLevel::Error,
            Self::NotConnected => ToastLevel::Error,
        }
    }
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_rejection_is_informational() {
        let err = EngineError::Submission(SubmitError::UserRejected);
        assert_eq!(err.toast_level(), ToastLevel::Info);
    }

    #[test]
    fn validation_failures_are_errors() {
        assert_eq!(
            EngineError::DuplicateCategory("Smoking".into()).toast_level(),
            ToastLevel::Error
        );
        assert_eq!(EngineError::InvalidCategory.toast_level(), ToastLevel::Error);
    }

    #[test]
    fn pending_create_is_a_wait_notice() {
        assert_eq!(
            EngineError::OperationAlreadyPending.toast_level(),
            ToastLevel::Info
        );
    }

    #[test]
    fn display_includes_category() {
        let err = EngineError::DuplicateCategory("Smoking".into());
        assert_eq!(err.to_string(), "a \"Smoking\" counter already exists");
    }
}
