//! In-memory submit gateway for dry runs and tests.

use async_trait::async_trait;
use motif_core::error::{MotifError, Result};
use motif_core::gateway::{SubmitGateway, SubmitReceipt};
use motif_core::payload::SubmitPayload;
use std::sync::Mutex;

/// Records every payload instead of persisting it.
#[derive(Default)]
pub struct MemorySubmitGateway {
    submitted: Mutex<Vec<SubmitPayload>>,
    fail_with: Option<String>,
}

impl MemorySubmitGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose every submit fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            submitted: Mutex::new(Vec::new()),
            fail_with: Some(message.into()),
        }
    }

    /// Payloads received so far, oldest first.
    pub fn submitted(&self) -> Vec<SubmitPayload> {
        self.submitted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<SubmitPayload> {
        self.submitted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }
}

#[async_trait]
impl SubmitGateway for MemorySubmitGateway {
    async fn submit(&self, payload: SubmitPayload) -> Result<SubmitReceipt> {
        self.submitted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(payload);

        match &self.fail_with {
            Some(message) => Err(MotifError::submit(message.clone())),
            None => Ok(SubmitReceipt::default()),
        }
    }
}
