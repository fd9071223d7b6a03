//! Effect traits for external collaborators
//!
//! Every suspension point in the client sits behind one of these traits:
//! submitting an operation, reading canonical state, awaiting confirmation
//! signals, reading the clock, and persisting preferences. Handlers live in
//! `quitline-effects`; tests substitute simulated ones.

mod chain;
mod storage;
mod time;

pub use chain::{
    ChainEffects, ConfirmationEffects, ConfirmationStream, ConfirmationSubscription,
};
pub use storage::StorageEffects;
pub use time::PhysicalTimeEffects;
