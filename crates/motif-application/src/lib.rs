//! Application layer for motif.
//!
//! This crate provides the stateful services around the pure reducer in
//! `motif-core`: a shared session store, the save coordinator and the
//! initialization gate, plus a use case that ties them to the collaborators.

pub mod configurator_usecase;
pub mod session;

pub use configurator_usecase::ConfiguratorUseCase;
pub use session::{GateDecision, InitializationGate, SaveCoordinator, SessionStore, Transition};
