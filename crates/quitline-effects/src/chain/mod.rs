//! Chain collaborator handlers

mod simulated;

pub use simulated::SimulatedChainHandler;
