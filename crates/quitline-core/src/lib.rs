//! # Quitline Core
//!
//! Pure domain layer for the Quitline client: counter records and streak
//! arithmetic, operation and confirmation types, the error taxonomy, and the
//! effect traits behind which every external collaborator (chain, signer,
//! clock, storage) lives.
//!
//! This crate is runtime-agnostic: no tokio coupling, no I/O. Handlers for
//! the effect traits live in `quitline-effects`.

pub mod confirmation;
pub mod counter;
pub mod effects;
pub mod errors;
pub mod identifiers;
pub mod operation;

pub use confirmation::{
    ConfirmationEvent, ConfirmationFilter, ConfirmationMatch, ConfirmationSignal,
};
pub use counter::{zip_counters, Counter, CounterRecord};
pub use errors::{ChainReadError, StorageError, SubmitError, SubscribeError, TimeError};
pub use identifiers::{AccountAddress, CorrelationToken, CounterId, IdentifierError};
pub use operation::{CreateSpec, OperationKind, OperationRequest};
