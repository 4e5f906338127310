//! Configuration service implementation.
//!
//! Loads `MotifConfig` from `~/.config/motif/config.toml` (or an explicit
//! path) and caches it.

use crate::paths::MotifPaths;
use crate::storage::AtomicTomlFile;
use motif_core::config::{MotifConfig, SaveConfig};
use motif_core::error::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the root configuration.
#[derive(Clone)]
pub struct ConfigService {
    file: Arc<AtomicTomlFile<MotifConfig>>,
    /// Cached configuration. `None` until first access or after invalidation.
    config: Arc<RwLock<Option<MotifConfig>>>,
}

impl ConfigService {
    /// Creates a service over the platform config file.
    ///
    /// # Returns
    ///
    /// - `Ok(ConfigService)`: The config path was resolved (the file may not exist yet)
    /// - `Err(MotifError::Config)`: No config directory on this platform
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(MotifPaths::config_file()?))
    }

    /// Creates a service over an explicit file, e.g. `--config` or a test dir.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Gets the configuration, loading it on first access.
    ///
    /// A missing file yields defaults. A malformed file is an error and is
    /// not cached.
    pub fn get_config(&self) -> Result<MotifConfig> {
        {
            let cached = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = match self.file.load()? {
            Some(config) => {
                tracing::debug!("[ConfigService] Loaded {}", self.path().display());
                config
            }
            None => {
                tracing::debug!(
                    "[ConfigService] {} not found, using defaults",
                    self.path().display()
                );
                MotifConfig::default()
            }
        };

        *self.config.write().unwrap_or_else(|e| e.into_inner()) = Some(loaded.clone());
        Ok(loaded)
    }

    /// Shortcut for the `[save]` table.
    pub fn save_config(&self) -> Result<SaveConfig> {
        Ok(self.get_config()?.save)
    }

    /// Updates the `[save]` table on disk and refreshes the cache.
    pub fn update_save_config<F>(&self, f: F) -> Result<SaveConfig>
    where
        F: FnOnce(&mut SaveConfig),
    {
        let updated = self.file.update(MotifConfig::default(), |config| {
            f(&mut config.save);
            Ok(())
        })?;
        tracing::info!("[ConfigService] Updated {}", self.path().display());

        let save = updated.save.clone();
        *self.config.write().unwrap_or_else(|e| e.into_inner()) = Some(updated);
        Ok(save)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}
