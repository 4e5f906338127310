//! Reference data read from JSON files.

use async_trait::async_trait;
use motif_core::error::{MotifError, Result};
use motif_core::gateway::ReferenceDataProvider;
use motif_core::model::InitializationPayload;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
enum Source {
    /// One `<item_id>.json` per item
    Directory(PathBuf),
    /// The same file for every item
    File(PathBuf),
}

/// Reads the initialization payload of an item from disk.
///
/// The JSON document has the flat shape of [`InitializationPayload`]:
/// the four snapshot fields next to the catalogs.
#[derive(Debug, Clone)]
pub struct JsonReferenceProvider {
    source: Source,
}

impl JsonReferenceProvider {
    /// Serves `<dir>/<item_id>.json`.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Directory(dir.into()),
        }
    }

    /// Serves one file regardless of item id.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::File(path.into()),
        }
    }

    fn path_for(&self, item_id: &str) -> PathBuf {
        match &self.source {
            Source::Directory(dir) => dir.join(format!("{}.json", item_id)),
            Source::File(path) => path.clone(),
        }
    }

    async fn read(path: &Path, item_id: &str) -> Result<InitializationPayload> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(MotifError::not_found("Item", item_id));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl ReferenceDataProvider for JsonReferenceProvider {
    async fn load(&self, item_id: &str) -> Result<InitializationPayload> {
        let path = self.path_for(item_id);
        tracing::debug!("[JsonReferenceProvider] Loading {} from {}", item_id, path.display());
        Self::read(&path, item_id).await
    }
}
