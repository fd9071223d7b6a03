//! Counter records and streak arithmetic
//!
//! The contract is the source of truth for every field here; this module
//! only mirrors the wire shape and computes display-time values from it.

use crate::errors::ChainReadError;
use crate::identifiers::CounterId;
use serde::{Deserialize, Serialize};

/// Counter fields as returned by the contract's bulk read, without the id.
///
/// The read interface returns two parallel arrays (ids and records); see
/// [`zip_counters`] for the pairing step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRecord {
    /// Unix timestamp (seconds) of the streak origin; may be backdated.
    pub started_at: u64,
    /// Unix timestamp when the counter was paused, or 0 while running.
    pub paused_at: u64,
    /// Cumulative seconds previously spent paused.
    pub total_paused_time: u64,
    /// Best streak ever recorded at a reset boundary, in seconds.
    pub longest_streak: u64,
    /// Number of resets ever applied.
    pub total_resets: u32,
    /// False once the counter is logically deleted.
    pub active: bool,
    /// Habit label, e.g. "Smoking".
    pub category: String,
    /// Display color token, e.g. "#3b82f6".
    pub color: String,
}

/// A canonical counter: a [`CounterRecord`] paired with its id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    /// Counter identifier within the owning account.
    pub id: CounterId,
    /// Unix timestamp (seconds) of the streak origin; may be backdated.
    pub started_at: u64,
    /// Unix timestamp when the counter was paused, or 0 while running.
    pub paused_at: u64,
    /// Cumulative seconds previously spent paused.
    pub total_paused_time: u64,
    /// Best streak ever recorded at a reset boundary, in seconds.
    pub longest_streak: u64,
    /// Number of resets ever applied.
    pub total_resets: u32,
    /// False once the counter is logically deleted.
    pub active: bool,
    /// Habit label.
    pub category: String,
    /// Display color token.
    pub color: String,
}

impl Counter {
    /// Pair a record with its id.
    pub fn from_record(id: CounterId, record: CounterRecord) -> Self {
        Self {
            id,
            started_at: record.started_at,
            paused_at: record.paused_at,
            total_paused_time: record.total_paused_time,
            longest_streak: record.longest_streak,
            total_resets: record.total_resets,
            active: record.active,
            category: record.category,
            color: record.color,
        }
    }

    /// Whether the counter is currently paused (`paused_at > 0`).
    pub fn is_paused(&self) -> bool {
        self.paused_at > 0
    }

    /// Whether the counter is currently running.
    pub fn is_running(&self) -> bool {
        self.paused_at == 0
    }

    /// Elapsed streak in seconds at wall-clock `now`.
    ///
    /// `(paused_at > 0 ? paused_at : now) - started_at - total_paused_time`,
    /// saturating at zero so a skewed clock never produces a negative streak.
    pub fn current_streak(&self, now: u64) -> u64 {
        let basis = if self.paused_at > 0 {
            self.paused_at
        } else {
            now
        };
        basis
            .saturating_sub(self.started_at)
            .saturating_sub(self.total_paused_time)
    }

    /// Longest streak as shown to the user.
    ///
    /// The contract reports `longest_streak == 0` for a counter created with
    /// a backdated start that has never been reset. Displays substitute the
    /// current streak in that case; canonical data is left untouched.
    pub fn display_longest_streak(&self, now: u64) -> u64 {
        if self.longest_streak == 0 && self.active && self.is_running() {
            self.current_streak(now)
        } else {
            self.longest_streak
        }
    }
}

/// Zip the bulk read's parallel arrays into counters.
///
/// Fails if the arrays disagree in length, which would mean the read
/// response was truncated or decoded incorrectly.
pub fn zip_counters(
    ids: Vec<CounterId>,
    records: Vec<CounterRecord>,
) -> Result<Vec<Counter>, ChainReadError> {
    if ids.len() != records.len() {
        return Err(ChainReadError::Malformed(format!(
            "id and record arrays disagree: {} ids, {} records",
            ids.len(),
            records.len()
        )));
    }
    Ok(ids
        .into_iter()
        .zip(records)
        .map(|(id, record)| Counter::from_record(id, record))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn running_counter(started_at: u64, total_paused_time: u64) -> Counter {
        Counter {
            id: CounterId::new(1),
            started_at,
            paused_at: 0,
            total_paused_time,
            longest_streak: 0,
            total_resets: 0,
            active: true,
            category: "Smoking".to_string(),
            color: "#3b82f6".to_string(),
        }
    }

    #[test]
    fn streak_uses_pause_time_when_paused() {
        let mut counter = running_counter(1_000, 50);
        counter.paused_at = 1_500;
        // Frozen at pause: 1500 - 1000 - 50, regardless of now.
        assert_eq!(counter.current_streak(9_999), 450);
        assert_eq!(counter.current_streak(0), 450);
    }

    #[test]
    fn streak_saturates_at_zero() {
        let counter = running_counter(1_000, 500);
        assert_eq!(counter.current_streak(1_200), 0);
    }

    #[test]
    fn longest_streak_substitution_for_running_zero() {
        let counter = running_counter(0, 0);
        let now = 86_400;
        assert_eq!(counter.longest_streak, 0);
        assert_eq!(counter.display_longest_streak(now), 86_400);
    }

    #[test]
    fn longest_streak_no_substitution_when_paused_or_nonzero() {
        let mut paused = running_counter(0, 0);
        paused.paused_at = 100;
        assert_eq!(paused.display_longest_streak(86_400), 0);

        let mut recorded = running_counter(0, 0);
        recorded.longest_streak = 777;
        assert_eq!(recorded.display_longest_streak(86_400), 777);
    }

    #[test]
    fn zip_counters_rejects_length_mismatch() {
        let err = zip_counters(vec![CounterId::new(1)], vec![]).expect_err("must reject");
        assert!(matches!(err, ChainReadError::Malformed(_)));
    }

    #[test]
    fn zip_counters_pairs_in_order() {
        let counters = zip_counters(
            vec![CounterId::new(3), CounterId::new(9)],
            vec![CounterRecord::default(), CounterRecord::default()],
        )
        .expect("lengths match");
        assert_eq!(counters[0].id, CounterId::new(3));
        assert_eq!(counters[1].id, CounterId::new(9));
    }

    proptest! {
        // For started_at = T, paused_at = 0, total_paused_time = P, the
        // streak at now = T + 100 + P is exactly 100 seconds.
        #[test]
        fn elapsed_time_round_trip(t in 0u64..=u32::MAX as u64, p in 0u64..=u32::MAX as u64) {
            let counter = running_counter(t, p);
            prop_assert_eq!(counter.current_streak(t + 100 + p), 100);
        }
    }
}
