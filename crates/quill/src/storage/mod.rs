//! Small key-value store over a directory, one JSON file per key.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub mod draft;
pub mod history;

pub use draft::{DraftAutosaver, DraftStore};
pub use history::{HistoryEntry, HistoryStore};

pub const HISTORY_KEY: &str = "gen_history";
pub const DRAFT_KEY: &str = "current_draft";

/// Directory holding every file Quill writes: `$QUILL_DIR`, else `~/.quill`
pub fn quill_root() -> PathBuf {
  if let Ok(dir) = std::env::var("QUILL_DIR") {
    if !dir.trim().is_empty() {
      return PathBuf::from(dir);
    }
  }

  dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".quill")
}

#[derive(Debug, Clone)]
pub struct LocalStore {
  root: PathBuf,
}

impl LocalStore {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Store rooted at [`quill_root`]
  pub fn open_default() -> Self {
    Self::new(quill_root())
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn path_for(&self, key: &str) -> PathBuf {
    self.root.join(format!("{key}.json"))
  }

  /// Read a value, treating an absent or unreadable entry as absent
  pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
    let path = self.path_for(key);
    let raw = match fs::read_to_string(&path) {
      Ok(raw) => raw,
      Err(err) => {
        if err.kind() != std::io::ErrorKind::NotFound {
          tracing::warn!(key, error = %err, "could not read stored value");
        }
        return None;
      }
    };

    match serde_json::from_str(&raw) {
      Ok(value) => Some(value),
      Err(err) => {
        tracing::warn!(key, error = %err, "ignoring malformed stored value");
        None
      }
    }
  }

  pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
    fs::create_dir_all(&self.root)?;
    let content = serde_json::to_string_pretty(value)?;
    fs::write(self.path_for(key), content)?;
    tracing::trace!(key, "stored value");
    Ok(())
  }

  pub fn remove(&self, key: &str) -> Result<()> {
    let path = self.path_for(key);
    if path.exists() {
      fs::remove_file(path)?;
    }
    Ok(())
  }
}
