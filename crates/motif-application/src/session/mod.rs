//! Session application services.
//!
//! This module wires the pure reducer into a shared store and adds the two
//! asynchronous boundaries around it: saving and re-seeding.

mod gate;
mod save_coordinator;
mod store;

pub use gate::{GateDecision, InitializationGate};
pub use save_coordinator::SaveCoordinator;
pub use store::{SessionStore, Transition};
