//! Key-value store persisting string entries to disk
//!
//! Each key maps to one file inside the store directory, so entries can be
//! written and removed independently of each other.

use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Manages reading and writing string entries on disk
///
/// The store lives in an XDG-compliant cache directory (`~/.cache/dailyadvice/`
/// on Linux) unless a directory is given explicitly.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    /// Directory where entry files are stored
    dir: PathBuf,
}

impl KeyValueStore {
    /// Creates a new KeyValueStore using the XDG-compliant cache directory
    ///
    /// Returns `None` if the directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "dailyadvice")?;
        Some(Self::with_dir(project_dirs.cache_dir().to_path_buf()))
    }

    /// Creates a new KeyValueStore with a custom directory
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Directory holding the entry files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path to the file backing `key`
    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Ensures the store directory exists
    fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// Reads the entry for `key`
    ///
    /// Returns `None` if the entry doesn't exist or isn't valid UTF-8.
    pub fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.entry_path(key)).ok()
    }

    /// Writes `value` under `key`, replacing any previous value
    pub fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.ensure_dir()?;
        fs::write(self.entry_path(key), value)
    }

    /// Removes the entry for `key`; removing a missing entry is not an error
    pub fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.entry_path(key)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
