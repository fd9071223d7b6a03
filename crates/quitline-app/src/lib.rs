//! # Quitline App
//!
//! Portable headless application core for Quitline. Frontends embed the
//! [`ReconciliationEngine`], dispatch user intents into its submit
//! operations, render [`engine::tracker::PendingOperations`] and canonical
//! state through the merged view, and consume the notice stream for
//! toasts.
//!
//! The hard part lives in [`engine`]: optimistic tracking of in-flight
//! chain operations, confirmation correlation, and timeout/failure
//! recovery. Everything else here is derived views and client
//! preferences.

pub mod config;
pub mod engine;
pub mod errors;
pub mod format;
pub mod preferences;
pub mod store;
pub mod views;

pub use config::{ConfigError, EngineConfig};
pub use engine::tracker::{PendingOperation, PendingOperations};
pub use engine::ReconciliationEngine;
pub use errors::{EngineError, EngineResult};
pub use preferences::{PreferenceAdapter, Preferences};
pub use store::CanonicalStore;
pub use views::{
    build_statistics, build_view, unlocked_days, CounterView, MergedEntry, Milestone, Notice,
    NoticeReceiver, PendingCreateView, PendingStatus, Statistics, ToastLevel, MILESTONES,
};
