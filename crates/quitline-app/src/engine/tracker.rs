//! Optimistic operation tracker
//!
//! Holds the in-flight operations between submission and their terminal
//! signal. Mutated only by the reconciliation engine; the presentation
//! layer sees read-only snapshots through the view builder.

use quitline_core::{
    ConfirmationMatch, CorrelationToken, Counter, CounterId, CreateSpec, OperationKind,
};
use std::collections::HashMap;

/// One submitted-but-unconfirmed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOperation {
    /// Token returned at submission, the primary correlation key.
    pub token: CorrelationToken,
    /// Operation kind.
    pub kind: OperationKind,
    /// Target counter; absent for Create.
    pub target: Option<CounterId>,
    /// Create payload, kept for the placeholder view entry.
    pub create: Option<CreateSpec>,
    /// Wall-clock submission time (Unix seconds).
    pub submitted_at: u64,
    /// Counter hidden optimistically by a Delete, kept for rollback.
    pub(crate) hidden: Option<Counter>,
}

impl PendingOperation {
    /// Whether this entry is an in-flight Create.
    pub fn is_create(&self) -> bool {
        self.kind == OperationKind::Create
    }
}

/// The set of in-flight operations, keyed by correlation token.
#[derive(Debug, Clone, Default)]
pub struct PendingOperations {
    entries: HashMap<CorrelationToken, PendingOperation>,
}

impl PendingOperations {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a newly submitted operation.
    pub fn insert(&mut self, operation: PendingOperation) {
        self.entries.insert(operation.token.clone(), operation);
    }

    /// Remove and return the entry for a token, if still tracked.
    ///
    /// The `None` case is the idempotency guard: a second terminal signal
    /// for the same token finds nothing and becomes a no-op.
    pub fn remove(&mut self, token: &CorrelationToken) -> Option<PendingOperation> {
        self.entries.remove(token)
    }

    /// Whether a token is still tracked.
    pub fn contains(&self, token: &CorrelationToken) -> bool {
        self.entries.contains_key(token)
    }

    /// The single in-flight Create, if any.
    pub fn pending_create(&self) -> Option<&PendingOperation> {
        self.entries.values().find(|op| op.is_create())
    }

    /// The in-flight operation targeting a counter, if any.
    pub fn for_counter(&self, id: CounterId) -> Option<&PendingOperation> {
        self.entries.values().find(|op| op.target == Some(id))
    }

    /// Resolve a confirmation match to a tracked token.
    ///
    /// Token matches are direct. Attribute matches require the event's
    /// owner to be the connected account, then pair by kind and target —
    /// a Create pairs with the single pending create since it has no id
    /// until confirmation.
    pub fn resolve(
        &self,
        matched: &ConfirmationMatch,
        connected_owner: &quitline_core::AccountAddress,
    ) -> Option<CorrelationToken> {
        match matched {
            ConfirmationMatch::ByToken(token) => {
                self.contains(token).then(|| token.clone())
            }
            ConfirmationMatch::ByAttributes {
                kind,
                counter_id,
                owner,
            } => {
                if owner != connected_owner {
                    return None;
                }
                let entry = if *kind == OperationKind::Create {
                    self.pending_create()
                } else {
                    self.entries
                        .values()
                        .find(|op| op.kind == *kind && op.target == *counter_id)
                };
                entry.map(|op| op.token.clone())
            }
        }
    }

    /// Snapshot of all tracked entries.
    pub fn entries(&self) -> Vec<PendingOperation> {
        self.entries.values().cloned().collect()
    }

    /// Number of tracked entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is in flight.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop everything (disconnect).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quitline_core::AccountAddress;

    fn owner() -> AccountAddress {
        AccountAddress::new("0xf6016fcb6653e4d351b976c0574c0359d5d209f4").expect("valid address")
    }

    fn pending(token: &str, kind: OperationKind, target: Option<u64>) -> PendingOperation {
        PendingOperation {
            token: CorrelationToken::new(token),
            kind,
            target: target.map(CounterId::new),
            create: None,
            submitted_at: 0,
            hidden: None,
        }
    }

    #[test]
    fn remove_is_idempotent() {
        let mut ops = PendingOperations::new();
        ops.insert(pending("0x1", OperationKind::Pause, Some(7)));

        assert!(ops.remove(&CorrelationToken::new("0x1")).is_some());
        assert!(ops.remove(&CorrelationToken::new("0x1")).is_none());
    }

    #[test]
    fn resolve_by_token() {
        let mut ops = PendingOperations::new();
        ops.insert(pending("0x1", OperationKind::Reset, Some(2)));

        let matched = ConfirmationMatch::ByToken(CorrelationToken::new("0x1"));
        assert_eq!(
            ops.resolve(&matched, &owner()),
            Some(CorrelationToken::new("0x1"))
        );

        let unknown = ConfirmationMatch::ByToken(CorrelationToken::new("0x9"));
        assert_eq!(ops.resolve(&unknown, &owner()), None);
    }

    #[test]
    fn resolve_by_attributes_requires_owner_and_kind() {
        let mut ops = PendingOperations::new();
        ops.insert(pending("0x1", OperationKind::Pause, Some(7)));

        let matched = ConfirmationMatch::ByAttributes {
            kind: OperationKind::Pause,
            counter_id: Some(CounterId::new(7)),
            owner: owner(),
        };
        assert_eq!(
            ops.resolve(&matched, &owner()),
            Some(CorrelationToken::new("0x1"))
        );

        let wrong_kind = ConfirmationMatch::ByAttributes {
            kind: OperationKind::Resume,
            counter_id: Some(CounterId::new(7)),
            owner: owner(),
        };
        assert_eq!(ops.resolve(&wrong_kind, &owner()), None);

        let stranger =
            AccountAddress::new("0x0000000000000000000000000000000000000002").expect("valid");
        let foreign = ConfirmationMatch::ByAttributes {
            kind: OperationKind::Pause,
            counter_id: Some(CounterId::new(7)),
            owner: stranger,
        };
        assert_eq!(ops.resolve(&foreign, &owner()), None);
    }

    #[test]
    fn create_resolves_without_an_id() {
        let mut ops = PendingOperations::new();
        let mut create = pending("0xc", OperationKind::Create, None);
        create.create = Some(CreateSpec::new("Smoking", "#fff"));
        ops.insert(create);

        let matched = ConfirmationMatch::ByAttributes {
            kind: OperationKind::Create,
            counter_id: Some(CounterId::new(11)),
            owner: owner(),
        };
        assert_eq!(
            ops.resolve(&matched, &owner()),
            Some(CorrelationToken::new("0xc"))
        );
    }
}
