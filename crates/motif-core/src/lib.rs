//! Core domain of the Motif configurator.
//!
//! Holds the edit-session model and the pure pieces that keep it
//! consistent: the structural comparator, the mapping reconciler and the
//! reducer. Nothing in this crate performs I/O.

pub mod action;
pub mod config;
pub mod equality;
pub mod error;
pub mod gateway;
pub mod model;
pub mod payload;
pub mod reconciler;
pub mod reducer;

// Re-export common types
pub use action::Action;
pub use error::MotifError;
pub use model::EditSession;
pub use reducer::reduce;
