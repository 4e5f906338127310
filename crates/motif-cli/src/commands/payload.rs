use anyhow::{Context, Result};
use motif_core::model::EditSession;
use motif_core::payload::SubmitPayload;
use motif_core::reducer::reduce_all;
use std::path::Path;

/// Builds the payload a save would submit after replaying `actions_path`.
pub fn build(reference_path: &Path, actions_path: &Path) -> Result<SubmitPayload> {
    let reference = super::read_reference(reference_path)?;
    let actions = super::read_actions(actions_path)?;

    let session = reduce_all(EditSession::from_payload(reference), actions);
    SubmitPayload::save(&session.current).context("Failed to encode save payload")
}

pub fn run(reference_path: &Path, actions_path: &Path) -> Result<()> {
    let payload = build(reference_path, actions_path)?;
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
