//! Achievement milestones
//!
//! Milestones unlock from streak length alone. Counters created with a
//! backdated start are excluded — the streak was not earned inside the
//! app — as are inactive counters.

use quitline_core::{Counter, CounterId};
use std::collections::BTreeSet;

const DAY: u64 = 86_400;

/// One achievement milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    /// Streak length required, in days.
    pub days: u64,
    /// Display title.
    pub title: &'static str,
    /// Display description.
    pub description: &'static str,
}

/// The milestone ladder, in ascending order.
pub const MILESTONES: [Milestone; 7] = [
    Milestone {
        days: 7,
        title: "1 Week",
        description: "First week completed!",
    },
    Milestone {
        days: 30,
        title: "1 Month",
        description: "One month strong!",
    },
    Milestone {
        days: 60,
        title: "2 Months",
        description: "Two months of progress!",
    },
    Milestone {
        days: 90,
        title: "3 Months",
        description: "Quarter year milestone!",
    },
    Milestone {
        days: 120,
        title: "4 Months",
        description: "Four months achieved!",
    },
    Milestone {
        days: 180,
        title: "6 Months",
        description: "Half year champion!",
    },
    Milestone {
        days: 365,
        title: "1 Year",
        description: "One year free! Legend!",
    },
];

/// Milestone days unlocked by the given counters.
///
/// A counter contributes `max(current streak, longest streak)` in whole
/// days; every milestone at or below that is unlocked.
pub fn unlocked_days(
    counters: &[Counter],
    ineligible: &BTreeSet<CounterId>,
    now: u64,
) -> BTreeSet<u64> {
    let mut unlocked = BTreeSet::new();
    for counter in counters {
        if ineligible.contains(&counter.id) || !counter.active {
            continue;
        }
        let current_days = counter.current_streak(now) / DAY;
        let longest_days = counter.longest_streak / DAY;
        let max_days = current_days.max(longest_days);
        for milestone in &MILESTONES {
            if max_days >= milestone.days {
                unlocked.insert(milestone.days);
            }
        }
    }
    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(id: u64, started_at: u64) -> Counter {
        Counter {
            id: CounterId::new(id),
            started_at,
            active: true,
            ..Counter::default()
        }
    }

    #[test]
    fn ladder_is_ascending() {
        assert!(MILESTONES.windows(2).all(|w| w[0].days < w[1].days));
    }

    #[test]
    fn week_streak_unlocks_first_milestone_only() {
        let counters = vec![counter(1, 0)];
        let unlocked = unlocked_days(&counters, &BTreeSet::new(), 8 * DAY);
        assert_eq!(unlocked, BTreeSet::from([7]));
    }

    #[test]
    fn longest_streak_counts_even_after_reset() {
        let mut c = counter(1, 0);
        c.longest_streak = 31 * DAY;
        let unlocked = unlocked_days(&[c], &BTreeSet::new(), DAY);
        assert_eq!(unlocked, BTreeSet::from([7, 30]));
    }

    #[test]
    fn custom_date_counters_are_ineligible() {
        let counters = vec![counter(4, 0)];
        let ineligible = BTreeSet::from([CounterId::new(4)]);
        assert!(unlocked_days(&counters, &ineligible, 400 * DAY).is_empty());
    }

    #[test]
    fn inactive_counters_are_skipped() {
        let mut c = counter(2, 0);
        c.active = false;
        assert!(unlocked_days(&[c], &BTreeSet::new(), 400 * DAY).is_empty());
    }
}
