//! Path management for motif configuration and outbox files.
//!
//! ```text
//! ~/.config/motif/             # Config directory
//! └── config.toml              # `[save]` settings
//!
//! ~/.local/share/motif/        # Data directory
//! └── outbox/                  # Submitted payloads (file outbox gateway)
//! ```

use motif_core::error::{MotifError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "motif";
const CONFIG_FILE: &str = "config.toml";
const OUTBOX_DIR: &str = "outbox";

/// Platform paths for motif.
pub struct MotifPaths;

impl MotifPaths {
    /// Returns the motif configuration directory (e.g. `~/.config/motif/`).
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to the config directory
    /// - `Err(MotifError::Config)`: The platform has no config directory
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| MotifError::config("Cannot determine config directory"))
    }

    /// Returns the motif data directory (e.g. `~/.local/share/motif/`).
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| MotifError::config("Cannot determine data directory"))
    }

    /// Path of `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Default directory of the file outbox.
    pub fn outbox_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join(OUTBOX_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_is_inside_config_dir() {
        // Not every CI sandbox has a home directory
        if let (Ok(dir), Ok(file)) = (MotifPaths::config_dir(), MotifPaths::config_file()) {
            assert!(file.starts_with(&dir));
            assert!(dir.ends_with(APP_DIR));
            assert_eq!(file.file_name().and_then(|n| n.to_str()), Some(CONFIG_FILE));
        }
    }
}
