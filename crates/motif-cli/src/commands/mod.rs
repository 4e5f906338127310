pub mod payload;
pub mod replay;

use anyhow::{Context, Result};
use motif_core::action::Action;
use motif_core::model::InitializationPayload;
use std::path::Path;

pub(crate) fn read_reference(path: &Path) -> Result<InitializationPayload> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read reference data {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid reference data in {}", path.display()))
}

pub(crate) fn read_actions(path: &Path) -> Result<Vec<Action>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read action script {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid action script in {}", path.display()))
}
