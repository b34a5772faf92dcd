//! Gemini API key lookup and storage.
//!
//! Lookup order: explicit `--api-key` (or `GEMINI_API_KEY`), then the
//! `API_KEY` environment variable, then `credentials.json` in the Quill
//! directory. Empty values and the literal `undefined` count as missing.

use crate::error::{QuillError, Result};
use crate::storage::quill_root;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const CREDENTIALS_FILE: &str = "credentials.json";
pub const FALLBACK_ENV: &str = "API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
  Explicit,
  Environment,
  Stored,
}

impl KeySource {
  pub fn describe(&self) -> &'static str {
    match self {
      KeySource::Explicit => "--api-key / GEMINI_API_KEY",
      KeySource::Environment => "API_KEY environment variable",
      KeySource::Stored => "stored credentials",
    }
  }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CredentialFile {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  gemini_api_key: Option<String>,
}

/// Drop blank and `undefined` keys
pub fn normalize_key(key: Option<&str>) -> Option<String> {
  key.map(str::trim).filter(|k| !k.is_empty() && *k != "undefined").map(str::to_string)
}

/// Show the last four characters only
pub fn mask_key(key: &str) -> String {
  let chars: Vec<char> = key.chars().collect();
  if chars.len() <= 4 {
    return "*".repeat(chars.len());
  }
  let tail: String = chars[chars.len() - 4..].iter().collect();
  format!("{}{tail}", "*".repeat(8))
}

#[derive(Debug, Clone)]
pub struct CredentialStore {
  path: PathBuf,
}

impl CredentialStore {
  pub fn new(root: impl AsRef<Path>) -> Self {
    Self { path: root.as_ref().join(CREDENTIALS_FILE) }
  }

  pub fn open_default() -> Self {
    Self::new(quill_root())
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn load(&self) -> Option<String> {
    let raw = fs::read_to_string(&self.path).ok()?;
    match serde_json::from_str::<CredentialFile>(&raw) {
      Ok(file) => normalize_key(file.gemini_api_key.as_deref()),
      Err(err) => {
        tracing::warn!(error = %err, "ignoring malformed credentials file");
        None
      }
    }
  }

  pub fn save(&self, key: &str) -> Result<()> {
    let key = normalize_key(Some(key))
      .ok_or_else(|| QuillError::invalid_credential("an empty key cannot be stored"))?;

    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(&CredentialFile { gemini_api_key: Some(key) })?;
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
      use std::os::unix::fs::OpenOptionsExt;
      options.mode(0o600);
    }
    let mut file = options.open(&self.path)?;

    // An existing file keeps its old mode through open(), so tighten it first
    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt;
      file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(content.as_bytes())?;

    tracing::debug!(path = %self.path.display(), "stored API key");
    Ok(())
  }

  /// Remove the stored key. Returns whether there was one.
  pub fn clear(&self) -> Result<bool> {
    if self.path.exists() {
      fs::remove_file(&self.path)?;
      return Ok(true);
    }
    Ok(false)
  }
}

/// First usable key in lookup order
pub fn resolve_api_key(explicit: Option<&str>, store: &CredentialStore) -> Option<(String, KeySource)> {
  if let Some(key) = normalize_key(explicit) {
    return Some((key, KeySource::Explicit));
  }

  let env_key = std::env::var(FALLBACK_ENV).ok();
  if let Some(key) = normalize_key(env_key.as_deref()) {
    return Some((key, KeySource::Environment));
  }

  store.load().map(|key| (key, KeySource::Stored))
}

/// Ask for a key on the terminal and store it for later runs
pub fn prompt_for_key(store: &CredentialStore) -> Result<String> {
  herald::showstopper("Gemini API key required\nGet one at https://aistudio.google.com/apikey");
  let entered = rpassword::prompt_password("Paste your Gemini API key: ")?;
  let key = normalize_key(Some(&entered)).ok_or(QuillError::MissingCredential)?;

  store.save(&key)?;
  herald::success(&format!("API key saved to {}", store.path().display()));
  Ok(key)
}

/// Resolve a key, prompting when a person is at the terminal
pub fn ensure_api_key(explicit: Option<&str>, store: &CredentialStore) -> Result<String> {
  if let Some((key, source)) = resolve_api_key(explicit, store) {
    tracing::debug!(source = source.describe(), "using API key");
    return Ok(key);
  }

  if herald::is_attended() {
    return prompt_for_key(store);
  }

  herald::spotlight("No Gemini API key\nPass --api-key, export GEMINI_API_KEY or API_KEY,\nor run 'quill key set' in a terminal");
  Err(QuillError::MissingCredential)
}
