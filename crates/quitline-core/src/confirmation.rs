//! Confirmation signals and the dual matching strategy
//!
//! A confirmation can arrive either as a receipt for a known transaction
//! hash or as a decoded contract event that does not carry the original
//! hash. [`ConfirmationMatch`] standardizes both into one tagged union so
//! the engine never shape-sniffs payloads.

use crate::identifiers::{AccountAddress, CorrelationToken, CounterId};
use crate::operation::OperationKind;
use serde::{Deserialize, Serialize};

/// A chain-level confirmation as delivered by the subscription collaborator.
///
/// `token` is present for receipt-style signals; event-style signals carry
/// the decoded attributes instead. Either is enough to correlate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationSignal {
    /// Account the operation belongs to.
    pub owner: AccountAddress,
    /// Operation kind the signal confirms.
    pub kind: OperationKind,
    /// Target counter, when the signal identifies one (never for Create
    /// receipts observed before the id is known).
    pub counter_id: Option<CounterId>,
    /// Transaction hash, when the signal is receipt-shaped.
    pub token: Option<CorrelationToken>,
}

/// Everything the subscription can deliver: confirmations and reverts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationEvent {
    /// The operation landed on chain.
    Confirmed(ConfirmationSignal),
    /// The transaction reverted or the signer reported terminal failure.
    Failed {
        /// Hash of the failed transaction.
        token: CorrelationToken,
        /// Collaborator-supplied failure description.
        reason: String,
    },
}

/// Filter handed to the subscription collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationFilter {
    /// Only signals for this account are delivered.
    pub owner: AccountAddress,
}

/// How a confirmation is correlated back to its optimistic entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationMatch {
    /// Direct match on the token returned at submission.
    ByToken(CorrelationToken),
    /// Indirect match on decoded event attributes.
    ByAttributes {
        /// Operation kind carried by the event.
        kind: OperationKind,
        /// Target counter, when the event names one.
        counter_id: Option<CounterId>,
        /// Account the event belongs to.
        owner: AccountAddress,
    },
}

impl From<ConfirmationSignal> for ConfirmationMatch {
    /// Prefer the direct token when the signal carries one.
    fn from(signal: ConfirmationSignal) -> Self {
        match signal.token {
            Some(token) => Self::ByToken(token),
            None => Self::ByAttributes {
                kind: signal.kind,
                counter_id: signal.counter_id,
                owner: signal.owner,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> AccountAddress {
        AccountAddress::new("0xf6016fcb6653e4d351b976c0574c0359d5d209f4").expect("valid address")
    }

    #[test]
    fn signal_with_token_matches_by_token() {
        let signal = ConfirmationSignal {
            owner: owner(),
            kind: OperationKind::Pause,
            counter_id: Some(CounterId::new(7)),
            token: Some(CorrelationToken::new("0xabc")),
        };
        assert_eq!(
            ConfirmationMatch::from(signal),
            ConfirmationMatch::ByToken(CorrelationToken::new("0xabc"))
        );
    }

    #[test]
    fn signal_without_token_matches_by_attributes() {
        let signal = ConfirmationSignal {
            owner: owner(),
            kind: OperationKind::Reset,
            counter_id: Some(CounterId::new(2)),
            token: None,
        };
        assert_eq!(
            ConfirmationMatch::from(signal),
            ConfirmationMatch::ByAttributes {
                kind: OperationKind::Reset,
                counter_id: Some(CounterId::new(2)),
                owner: owner(),
            }
        );
    }
}
