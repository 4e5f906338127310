//! Atomic file writes.
//!
//! Writers go to a hidden sibling temp file which is fsynced and then
//! renamed over the target, so readers see either the old or the new
//! content and never a partial write.

use motif_core::error::{MotifError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A path written with tmp file + rename.
#[derive(Debug, Clone)]
pub struct AtomicFile {
    path: PathBuf,
}

impl AtomicFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file as UTF-8.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(String))`: The file exists and is not blank
    /// - `Ok(None)`: The file is missing or blank
    /// - `Err(MotifError::Io)`: The file could not be read
    pub fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }

    /// Replaces the file content atomically, creating parent directories.
    pub fn write(&self, content: &[u8]) -> Result<()> {
        let parent = self.parent()?;
        fs::create_dir_all(parent)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(content)?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }

    /// Holds an exclusive lock on `<path>.lock` while `f` runs.
    pub fn with_lock<R>(&self, f: impl FnOnce() -> Result<R>) -> Result<R> {
        let _lock = FileLock::acquire(&self.path)?;
        f()
    }

    fn parent(&self) -> Result<&Path> {
        self.path
            .parent()
            .ok_or_else(|| MotifError::io(format!("{} has no parent directory", self.path.display())))
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| MotifError::io(format!("{} has no file name", self.path.display())))?;
        Ok(self
            .parent()?
            .join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// A TOML document stored in an [`AtomicFile`].
pub struct AtomicTomlFile<T> {
    file: AtomicFile,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: AtomicFile::new(path),
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Loads and parses the document; `None` when missing or blank.
    pub fn load(&self) -> Result<Option<T>> {
        match self.file.read()? {
            Some(content) => Ok(Some(toml::from_str(&content)?)),
            None => Ok(None),
        }
    }

    pub fn save(&self, data: &T) -> Result<()> {
        let content = toml::to_string_pretty(data)?;
        self.file.write(content.as_bytes())
    }

    /// Read-modify-write under the file lock.
    ///
    /// # Arguments
    ///
    /// * `default_value` - Used when the file does not exist yet
    /// * `f` - Mutates the loaded document; an error aborts without writing
    pub fn update<F>(&self, default_value: T, f: F) -> Result<T>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        self.file.with_lock(|| {
            let mut data = self.load()?.unwrap_or(default_value);
            f(&mut data)?;
            self.save(&data)?;
            Ok(data)
        })
    }
}

struct FileLock {
    _file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| MotifError::io(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(Self {
            _file: file,
            lock_path,
        })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}
