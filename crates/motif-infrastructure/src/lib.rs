//! Infrastructure layer for motif.
//!
//! Adapters for the collaborator traits in `motif-core` plus configuration
//! file handling.

pub mod config_service;
pub mod json_reference_provider;
pub mod memory_submit_gateway;
pub mod outbox_submit_gateway;
pub mod paths;
pub mod storage;

pub use config_service::ConfigService;
pub use json_reference_provider::JsonReferenceProvider;
pub use memory_submit_gateway::MemorySubmitGateway;
pub use outbox_submit_gateway::{OutboxEntry, OutboxSubmitGateway};
pub use paths::MotifPaths;
