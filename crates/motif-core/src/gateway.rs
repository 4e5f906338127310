//! Collaborator interfaces consumed from the environment.
//!
//! The core owns no persistence. Saves leave through [`SubmitGateway`] and
//! fresh reference data arrives through [`ReferenceDataProvider`].

use crate::error::Result;
use crate::model::InitializationPayload;
use crate::payload::SubmitPayload;
use async_trait::async_trait;

/// What the submit collaborator reports back after persisting a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Human-readable confirmation shown as the success message
    pub message: Option<String>,
}

/// Persists a serialized save.
///
/// Implementations are responsible for persistence and for triggering a
/// subsequent reference-data refresh in the environment.
#[async_trait]
pub trait SubmitGateway: Send + Sync {
    /// Submits a payload.
    ///
    /// # Returns
    ///
    /// - `Ok(SubmitReceipt)`: Payload accepted
    /// - `Err(_)`: Persistence failed; the message is surfaced via the result slot
    async fn submit(&self, payload: SubmitPayload) -> Result<SubmitReceipt>;
}

/// Supplies the initial or refreshed reference tuple for an edit target.
#[async_trait]
pub trait ReferenceDataProvider: Send + Sync {
    /// Loads the reference tuple for `item_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(InitializationPayload)`: Snapshot and catalog for the item
    /// - `Err(_)`: The item could not be loaded
    async fn load(&self, item_id: &str) -> Result<InitializationPayload>;
}
