//! Submit gateway that drops each payload into a directory.
//!
//! Another process (an uploader, a webhook relay) picks the files up. Each
//! entry goes through [`AtomicFile`], so a watcher never sees a
//! half-written payload.

use crate::storage::AtomicFile;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use motif_core::error::{MotifError, Result};
use motif_core::gateway::{SubmitGateway, SubmitReceipt};
use motif_core::payload::SubmitPayload;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// One file in the outbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboxEntry {
    pub item_id: String,
    pub submitted_at: DateTime<Utc>,
    pub action: String,
    pub fields: BTreeMap<String, String>,
}

/// Writes submitted payloads as JSON files under `dir`.
pub struct OutboxSubmitGateway {
    dir: PathBuf,
    item_id: String,
    sequence: AtomicU64,
}

impl OutboxSubmitGateway {
    /// # Arguments
    ///
    /// * `dir` - Outbox directory, created on first submit
    /// * `item_id` - Recorded in every entry
    pub fn new(dir: impl Into<PathBuf>, item_id: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            item_id: item_id.into(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_name(&self, submitted_at: &DateTime<Utc>) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!(
            "{}-{}-{:04}.json",
            file_stem(&self.item_id),
            submitted_at.format("%Y%m%dT%H%M%S%3fZ"),
            sequence
        )
    }

    async fn write_entry(&self, name: String, content: Vec<u8>) -> Result<PathBuf> {
        let file = AtomicFile::new(self.dir.join(name));
        tokio::task::spawn_blocking(move || -> Result<PathBuf> {
            file.write(&content)?;
            Ok(file.path().to_path_buf())
        })
        .await
        .map_err(|e| MotifError::internal(format!("Outbox write task failed: {}", e)))?
    }
}

/// Restricts an item id to characters that are safe in a file name.
fn file_stem(item_id: &str) -> String {
    let stem: String = item_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "item".to_string()
    } else {
        stem
    }
}

#[async_trait]
impl SubmitGateway for OutboxSubmitGateway {
    async fn submit(&self, payload: SubmitPayload) -> Result<SubmitReceipt> {
        let submitted_at = Utc::now();
        let entry = OutboxEntry {
            item_id: self.item_id.clone(),
            submitted_at,
            action: payload.action,
            fields: payload.fields,
        };
        let content = serde_json::to_vec_pretty(&entry)?;
        let path = self
            .write_entry(self.file_name(&submitted_at), content)
            .await?;

        tracing::info!("[OutboxSubmitGateway] Wrote {}", path.display());
        Ok(SubmitReceipt {
            message: Some(format!("Queued {}", path.display())),
        })
    }
}
