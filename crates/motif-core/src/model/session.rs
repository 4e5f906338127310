//! The edit session aggregate.

use super::catalog::ReferenceData;
use super::snapshot::Snapshot;
use super::ui::UiState;
use serde::{Deserialize, Serialize};

/// Everything the environment supplies to seed (or re-seed) a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializationPayload {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    #[serde(flatten)]
    pub data: ReferenceData,
}

/// Root aggregate of one edit target.
///
/// - `original`: last value confirmed (or optimistically assumed) persisted
/// - `current`: the edit buffer
/// - `data`: read-only reference catalog
/// - `ui`: transient flags
///
/// Replaced wholesale on initialization and otherwise changed only through
/// [`crate::reducer::reduce`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSession {
    pub original: Snapshot,
    pub current: Snapshot,
    pub data: ReferenceData,
    pub ui: UiState,
}

impl EditSession {
    /// Builds a clean session from an initialization payload.
    pub fn from_payload(payload: InitializationPayload) -> Self {
        Self {
            original: payload.snapshot.clone(),
            current: payload.snapshot,
            data: payload.data,
            ui: UiState::default(),
        }
    }

    /// Recomputes whether `current` differs structurally from `original`.
    pub fn compute_dirty(&self) -> bool {
        !self.current.structurally_equals(&self.original)
    }

    pub fn is_dirty(&self) -> bool {
        self.ui.is_dirty
    }

    pub fn is_loading(&self) -> bool {
        self.ui.is_loading
    }

    pub fn is_saving(&self) -> bool {
        self.ui.is_saving
    }

    pub fn has_error(&self) -> bool {
        self.ui
            .action_result
            .as_ref()
            .is_some_and(|result| result.error.is_some())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.ui
            .action_result
            .as_ref()
            .and_then(|result| result.error.as_deref())
    }

    /// Message of a successful result; `None` while an error is shown.
    pub fn success_message(&self) -> Option<&str> {
        let result = self.ui.action_result.as_ref()?;
        if result.error.is_some() || result.success == Some(false) {
            return None;
        }
        result.message.as_deref()
    }
}
