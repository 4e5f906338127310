//! Transient UI flags of an edit session.

use super::catalog::PlatformVariantId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Identifies one save attempt so that an acknowledgment from the
/// environment can be matched to the save that raised suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaveAttemptId(Uuid);

impl SaveAttemptId {
    /// Generates a new random attempt id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SaveAttemptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SaveAttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Generic result slot reported back by the submit collaborator.
///
/// The store exposes it for display and does not interpret it further.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: Some(true),
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            error: Some(error.into()),
            message: None,
        }
    }
}

/// UI partition. Never part of the dirty comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    /// Derived flag; only the reducer writes it.
    pub is_dirty: bool,
    pub is_saving: bool,
    pub is_loading: bool,
    /// In-progress price edits keyed by platform variant id.
    #[serde(default)]
    pub editing_variant_prices: BTreeMap<PlatformVariantId, String>,
    #[serde(default)]
    pub action_result: Option<ActionResult>,
    /// While raised, environment re-fetches must not re-seed the session.
    pub prevent_state_reset: bool,
    #[serde(default)]
    pub pending_save_attempt: Option<SaveAttemptId>,
}
