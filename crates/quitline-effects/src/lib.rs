//! # Quitline Effects
//!
//! Handlers for the effect traits declared in `quitline-core`: a production
//! wall clock, a simulated clock for tests, storage backends for the
//! preference adapter, and a fully scriptable simulated chain used by the
//! integration test suite.
//!
//! Production chain/signer handlers are frontend concerns (each embedding
//! wires its own wallet stack); everything here is either production-ready
//! infrastructure or a test double with the same contract.

pub mod chain;
pub mod storage;
pub mod time;

pub use chain::SimulatedChainHandler;
pub use storage::{FilesystemStorageHandler, MemoryStorageHandler};
pub use time::{RealTimeHandler, SimulatedTimeHandler};
