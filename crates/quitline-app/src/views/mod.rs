//! # View Module
//!
//! Derived, presentation-ready views over canonical and optimistic state.
//! Everything here is a pure function of its inputs plus the notification
//! types the engine emits through its channel.

pub mod achievements;
pub mod counters;
pub mod notifications;
pub mod statistics;

pub use achievements::{unlocked_days, Milestone, MILESTONES};
pub use counters::{build_view, CounterView, MergedEntry, PendingCreateView, PendingStatus};
pub use notifications::{Notice, NoticeReceiver, ToastLevel};
pub use statistics::{build_statistics, CategoryShare, CounterStats, MilestoneProgress, Statistics};
