//! Error types for the effect boundaries

use serde::{Deserialize, Serialize};

/// Errors from the submission collaborator.
///
/// These classify everything the signer can report before a transaction is
/// accepted; anything after acceptance arrives as a confirmation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum SubmitError {
    /// The user declined to sign.
    #[error("signing request was rejected")]
    UserRejected,
    /// The account cannot cover the transaction.
    #[error("insufficient funds to cover the transaction")]
    InsufficientFunds,
    /// Any other submission failure (network error, nonce clash, ...).
    #[error("submission failed: {0}")]
    Failed(String),
}

/// Errors from the bulk read interface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainReadError {
    /// The read call itself failed.
    #[error("counter read failed: {0}")]
    Backend(String),
    /// The response decoded into an inconsistent shape.
    #[error("malformed counter set: {0}")]
    Malformed(String),
}

/// Errors establishing a confirmation subscription.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscribeError {
    /// The collaborator refused or dropped the subscription.
    #[error("confirmation subscription failed: {0}")]
    Backend(String),
}

/// Errors from the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The backing store failed.
    #[error("storage backend error: {0}")]
    Backend(String),
    /// A stored blob could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors from the clock collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    /// The clock could not be read.
    #[error("clock unavailable: {0}")]
    Unavailable(String),
}
