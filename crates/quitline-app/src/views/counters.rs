//! Merged counter view
//!
//! Pure merge of canonical counters with in-flight optimistic entries.
//! Deterministic in its inputs, safe to rebuild on every UI tick.

use crate::engine::tracker::PendingOperation;
use quitline_core::{CorrelationToken, Counter, OperationKind};
use serde::{Deserialize, Serialize};

/// Status tag on a placeholder entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingStatus {
    /// Submitted, awaiting confirmation.
    #[default]
    Pending,
    /// Confirmed; about to be replaced by the canonical row.
    Confirmed,
    /// Failed; about to disappear.
    Failed,
}

impl PendingStatus {
    /// Lowercase label for logging/serialization.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        }
    }
}

/// A canonical counter as rendered, with display-time values computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterView {
    /// The canonical counter, field values untouched.
    pub counter: Counter,
    /// Kind of the in-flight operation against this counter, if any.
    /// Presentation renders a processing overlay and disables controls.
    pub busy: Option<OperationKind>,
    /// Elapsed streak at view time, in seconds.
    pub current_streak: u64,
    /// Longest streak as displayed. Substitutes the current streak when the
    /// contract reports zero for an active running counter.
    pub longest_streak: u64,
}

/// Placeholder entry for an in-flight Create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCreateView {
    /// Correlation token of the submission.
    pub token: CorrelationToken,
    /// Proposed category.
    pub category: String,
    /// Proposed color.
    pub color: String,
    /// Backdated start, when one was requested.
    pub custom_started_at: Option<u64>,
    /// Placeholder status.
    pub status: PendingStatus,
    /// Preview streak: from the custom start when present, else zero.
    pub preview_streak: u64,
}

/// One row of the merged list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergedEntry {
    /// Placeholder for an in-flight Create, always first in the list.
    PendingCreate(PendingCreateView),
    /// A canonical counter.
    Counter(CounterView),
}

impl MergedEntry {
    /// Category label of this row.
    pub fn category(&self) -> &str {
        match self {
            Self::PendingCreate(view) => &view.category,
            Self::Counter(view) => &view.counter.category,
        }
    }

    /// Whether this row has an operation in flight.
    pub fn is_busy(&self) -> bool {
        match self {
            Self::PendingCreate(_) => true,
            Self::Counter(view) => view.busy.is_some(),
        }
    }
}

/// Merge canonical counters with optimistic entries.
///
/// A pending Create prepends a placeholder; a pending non-Create marks its
/// counter busy without changing any field value. Deleted-but-unconfirmed
/// counters were already removed from `canonical` by the engine, so they
/// simply do not appear.
pub fn build_view(
    canonical: &[Counter],
    optimistic: &[PendingOperation],
    now: u64,
) -> Vec<MergedEntry> {
    let mut entries = Vec::with_capacity(canonical.len() + 1);

    if let Some(create) = optimistic.iter().find(|op| op.is_create()) {
        if let Some(spec) = &create.create {
            let preview_streak = spec
                .custom_started_at
                .map(|started| now.saturating_sub(started))
                .unwrap_or(0);
            entries.push(MergedEntry::PendingCreate(PendingCreateView {
                token: create.token.clone(),
                category: spec.category.clone(),
                color: spec.color.clone(),
                custom_started_at: spec.custom_started_at,
                status: PendingStatus::Pending,
                preview_streak,
            }));
        }
    }

    for counter in canonical {
        let busy = optimistic
            .iter()
            .find(|op| !op.is_create() && op.target == Some(counter.id))
            .map(|op| op.kind);
        entries.push(MergedEntry::Counter(CounterView {
            current_streak: counter.current_streak(now),
            longest_streak: counter.display_longest_streak(now),
            counter: counter.clone(),
            busy,
        }));
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use quitline_core::{CounterId, CreateSpec};

    fn counter(id: u64, started_at: u64) -> Counter {
        Counter {
            id: CounterId::new(id),
            started_at,
            active: true,
            category: format!("habit-{id}"),
            color: "#fff".to_string(),
            ..Counter::default()
        }
    }

    fn pending_create(custom_started_at: Option<u64>) -> PendingOperation {
        PendingOperation {
            token: CorrelationToken::new("0xc"),
            kind: OperationKind::Create,
            target: None,
            create: Some(CreateSpec {
                category: "Sugar".to_string(),
                color: "#f59e0b".to_string(),
                custom_started_at,
            }),
            submitted_at: 0,
            hidden: None,
        }
    }

    fn pending_op(kind: OperationKind, id: u64) -> PendingOperation {
        PendingOperation {
            token: CorrelationToken::new("0x1"),
            kind,
            target: Some(CounterId::new(id)),
            create: None,
            submitted_at: 0,
            hidden: None,
        }
    }

    #[test]
    fn create_placeholder_is_prepended_with_preview() {
        let canonical = vec![counter(1, 100)];
        let optimistic = vec![pending_create(Some(500))];
        let view = build_view(&canonical, &optimistic, 800);

        assert_eq!(view.len(), 2);
        match &view[0] {
            MergedEntry::PendingCreate(placeholder) => {
                assert_eq!(placeholder.category, "Sugar");
                assert_eq!(placeholder.status, PendingStatus::Pending);
                assert_eq!(placeholder.preview_streak, 300);
            }
            other => panic!("expected placeholder first, got {other:?}"),
        }
    }

    #[test]
    fn create_without_custom_start_previews_zero() {
        let view = build_view(&[], &[pending_create(None)], 12_345);
        match &view[0] {
            MergedEntry::PendingCreate(placeholder) => {
                assert_eq!(placeholder.preview_streak, 0);
            }
            other => panic!("expected placeholder, got {other:?}"),
        }
    }

    #[test]
    fn busy_overlay_keeps_canonical_values() {
        let canonical = vec![counter(7, 100)];
        let optimistic = vec![pending_op(OperationKind::Pause, 7)];
        let view = build_view(&canonical, &optimistic, 400);

        match &view[0] {
            MergedEntry::Counter(entry) => {
                assert_eq!(entry.busy, Some(OperationKind::Pause));
                assert_eq!(entry.counter.started_at, 100);
                assert_eq!(entry.current_streak, 300);
                assert!(entry.busy.is_some());
            }
            other => panic!("expected counter entry, got {other:?}"),
        }
        assert!(view[0].is_busy());
    }

    #[test]
    fn longest_streak_substitution_in_view() {
        // Active running counter with longest_streak == 0 and a one-day
        // streak must display one day as its longest, not zero.
        let canonical = vec![counter(1, 0)];
        let view = build_view(&canonical, &[], 86_400);

        match &view[0] {
            MergedEntry::Counter(entry) => {
                assert_eq!(entry.counter.longest_streak, 0);
                assert_eq!(entry.longest_streak, 86_400);
                assert_eq!(entry.current_streak, 86_400);
            }
            other => panic!("expected counter entry, got {other:?}"),
        }
    }

    #[test]
    fn deterministic_for_equal_inputs() {
        let canonical = vec![counter(1, 10), counter(2, 20)];
        let optimistic = vec![pending_op(OperationKind::Reset, 2)];
        assert_eq!(
            build_view(&canonical, &optimistic, 99),
            build_view(&canonical, &optimistic, 99)
        );
    }
}
