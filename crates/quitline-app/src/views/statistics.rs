//! Aggregate statistics over the canonical counter set
//!
//! Pure computation from counters and wall-clock time; rebuilt on demand.

use crate::views::achievements::MILESTONES;
use quitline_core::{Counter, CounterId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DAY: u64 = 86_400;

/// Per-counter display statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterStats {
    /// Counter id.
    pub id: CounterId,
    /// Habit label.
    pub category: String,
    /// Display color.
    pub color: String,
    /// Current streak in whole days.
    pub current_streak_days: u64,
    /// Longest streak in whole days, with the zero-longest display
    /// substitution applied.
    pub longest_streak_days: u64,
    /// Resets ever applied.
    pub total_resets: u32,
    /// Streak origin (Unix seconds).
    pub started_at: u64,
    /// Whether the counter is paused.
    pub is_paused: bool,
}

/// Share of counters in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    /// Category label.
    pub label: String,
    /// Number of counters in it.
    pub count: usize,
    /// Color of the first counter seen in the category.
    pub color: String,
}

/// Progress toward the next milestone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneProgress {
    /// Best streak in days across all counters.
    pub current_days: u64,
    /// Days required by the next milestone (the last milestone once it is
    /// passed).
    pub target_days: u64,
    /// Percentage of the way from the previous milestone to the target,
    /// clamped to 0..=100.
    pub percent: f64,
}

/// Aggregates for the statistics panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Per-counter rows.
    pub counters: Vec<CounterStats>,
    /// Sum of current streaks, in days.
    pub total_days: u64,
    /// Sum of resets.
    pub total_resets: u64,
    /// Mean current streak in days, rounded.
    pub average_streak_days: u64,
    /// Best of current and longest streaks across all counters, in days.
    pub longest_ever_days: u64,
    /// Counters per category.
    pub category_distribution: Vec<CategoryShare>,
    /// Earliest streak origin, when any counter exists.
    pub oldest_started_at: Option<u64>,
    /// Progress toward the next milestone.
    pub next_milestone: MilestoneProgress,
}

/// Compute statistics for the given counters at wall-clock `now`.
pub fn build_statistics(counters: &[Counter], now: u64) -> Statistics {
    let rows: Vec<CounterStats> = counters
        .iter()
        .map(|counter| CounterStats {
            id: counter.id,
            category: counter.category.clone(),
            color: counter.color.clone(),
            current_streak_days: counter.current_streak(now) / DAY,
            longest_streak_days: counter.display_longest_streak(now) / DAY,
            total_resets: counter.total_resets,
            started_at: counter.started_at,
            is_paused: counter.is_paused(),
        })
        .collect();

    let total_days: u64 = rows.iter().map(|r| r.current_streak_days).sum();
    let total_resets: u64 = rows.iter().map(|r| u64::from(r.total_resets)).sum();
    let average_streak_days = if rows.is_empty() {
        0
    } else {
        // Round half up, matching the original display.
        (total_days + rows.len() as u64 / 2) / rows.len() as u64
    };
    let longest_ever_days = rows
        .iter()
        .map(|r| r.current_streak_days.max(r.longest_streak_days))
        .max()
        .unwrap_or(0);

    let mut categories: BTreeMap<String, CategoryShare> = BTreeMap::new();
    for row in &rows {
        categories
            .entry(row.category.clone())
            .and_modify(|share| share.count += 1)
            .or_insert_with(|| CategoryShare {
                label: row.category.clone(),
                count: 1,
                color: row.color.clone(),
            });
    }

    let oldest_started_at = rows.iter().map(|r| r.started_at).min();

    Statistics {
        next_milestone: milestone_progress(longest_ever_days),
        category_distribution: categories.into_values().collect(),
        counters: rows,
        total_days,
        total_resets,
        average_streak_days,
        longest_ever_days,
        oldest_started_at,
    }
}

fn milestone_progress(best_days: u64) -> MilestoneProgress {
    let target = MILESTONES
        .iter()
        .map(|m| m.days)
        .find(|days| *days > best_days)
        .unwrap_or(MILESTONES[MILESTONES.len() - 1].days);
    let previous = MILESTONES
        .iter()
        .map(|m| m.days)
        .filter(|days| *days <= best_days)
        .last()
        .unwrap_or(0);

    let percent = if previous == target {
        100.0
    } else {
        let span = (target - previous) as f64;
        (((best_days - previous) as f64 / span) * 100.0).clamp(0.0, 100.0)
    };

    MilestoneProgress {
        current_days: best_days,
        target_days: target,
        percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(id: u64, category: &str, started_at: u64) -> Counter {
        Counter {
            id: CounterId::new(id),
            started_at,
            active: true,
            category: category.to_string(),
            color: "#fff".to_string(),
            ..Counter::default()
        }
    }

    #[test]
    fn totals_and_average() {
        let now = 10 * DAY;
        let counters = vec![
            counter(1, "Smoking", 0),        // 10 days
            counter(2, "Sugar", 6 * DAY),    // 4 days
        ];
        let stats = build_statistics(&counters, now);

        assert_eq!(stats.total_days, 14);
        assert_eq!(stats.average_streak_days, 7);
        assert_eq!(stats.longest_ever_days, 10);
        assert_eq!(stats.oldest_started_at, Some(0));
    }

    #[test]
    fn substitution_feeds_longest_column() {
        // Running counter, longest_streak 0 on chain, one-day streak:
        // the longest column shows one day.
        let stats = build_statistics(&[counter(1, "Smoking", 0)], DAY);
        assert_eq!(stats.counters[0].longest_streak_days, 1);
    }

    #[test]
    fn category_distribution_counts() {
        let counters = vec![
            counter(1, "Smoking", 0),
            counter(2, "Smoking", 0),
            counter(3, "Sugar", 0),
        ];
        let stats = build_statistics(&counters, DAY);
        let smoking = stats
            .category_distribution
            .iter()
            .find(|s| s.label == "Smoking")
            .expect("category present");
        assert_eq!(smoking.count, 2);
        assert_eq!(stats.category_distribution.len(), 2);
    }

    #[test]
    fn milestone_progress_midway() {
        let progress = milestone_progress(18);
        // Between 7 and 30: (18 - 7) / 23 ≈ 47.8%.
        assert_eq!(progress.target_days, 30);
        assert!((progress.percent - (11.0 / 23.0) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn milestone_progress_past_the_ladder() {
        let progress = milestone_progress(400);
        assert_eq!(progress.target_days, 365);
        assert_eq!(progress.percent, 100.0);
    }

    #[test]
    fn empty_counter_set() {
        let stats = build_statistics(&[], 0);
        assert_eq!(stats.total_days, 0);
        assert_eq!(stats.average_streak_days, 0);
        assert_eq!(stats.oldest_started_at, None);
        assert_eq!(stats.next_milestone.target_days, 7);
    }
}
