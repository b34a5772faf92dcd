//! Configuration for Quill
//!
//! Read from `config.json` in the Quill directory. Every field has a default,
//! so a missing file or a partial one both work.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::gemini::client::DEFAULT_BASE_URL;
use crate::gemini::models::DEFAULT_MODEL;
use crate::gemini::GeminiOptions;
use crate::prompt::Style;
use crate::storage::history::MAX_HISTORY;
use crate::storage::quill_root;
use crate::{QuillError, Result};

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
  /// Model used for content generation
  #[serde(default = "default_model")]
  pub default_model: String,
  /// Model used for news search and trending keywords
  #[serde(default = "default_model")]
  pub search_model: String,
  #[serde(default)]
  pub default_style: Style,
  #[serde(default = "default_api_base_url")]
  pub api_base_url: String,
  #[serde(default = "default_request_timeout_secs")]
  pub request_timeout_secs: u64,
  #[serde(default = "default_temperature")]
  pub temperature: f32,
  #[serde(default = "default_draft_debounce_secs")]
  pub draft_debounce_secs: u64,
  #[serde(default = "default_history_limit")]
  pub history_limit: usize,
}

fn default_model() -> String {
  DEFAULT_MODEL.to_string()
}
fn default_api_base_url() -> String {
  DEFAULT_BASE_URL.to_string()
}
fn default_request_timeout_secs() -> u64 {
  120
}
fn default_temperature() -> f32 {
  0.7
}
fn default_draft_debounce_secs() -> u64 {
  3
}
fn default_history_limit() -> usize {
  MAX_HISTORY
}

impl Default for Config {
  fn default() -> Self {
    Self {
      default_model: default_model(),
      search_model: default_model(),
      default_style: Style::default(),
      api_base_url: default_api_base_url(),
      request_timeout_secs: default_request_timeout_secs(),
      temperature: default_temperature(),
      draft_debounce_secs: default_draft_debounce_secs(),
      history_limit: default_history_limit(),
    }
  }
}

impl Config {
  pub fn default_path() -> PathBuf {
    quill_root().join(CONFIG_FILE)
  }

  /// Load configuration from a file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
  }

  /// Load `config.json` from the Quill directory, or defaults when absent
  pub fn load() -> Result<Self> {
    let path = Self::default_path();
    if path.exists() {
      tracing::debug!(path = %path.display(), "loading config");
      return Self::load_from_file(path);
    }

    Ok(Config::default())
  }

  /// Save configuration to a file
  pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
      std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(self)?;
    std::fs::write(path, content)?;
    Ok(())
  }

  pub fn validate(&self) -> Result<()> {
    url::Url::parse(&self.api_base_url)
      .map_err(|e| QuillError::invalid_config(format!("api_base_url '{}': {e}", self.api_base_url)))?;

    if !(0.0..=2.0).contains(&self.temperature) {
      return Err(QuillError::invalid_config(format!(
        "temperature must be between 0 and 2, got {}",
        self.temperature
      )));
    }

    if self.request_timeout_secs == 0 {
      return Err(QuillError::invalid_config("request_timeout_secs must be positive"));
    }

    Ok(())
  }

  /// History cap, clamped to `1..=15`
  pub fn history_limit(&self) -> usize {
    self.history_limit.clamp(1, MAX_HISTORY)
  }

  pub fn draft_debounce(&self) -> Duration {
    Duration::from_secs(self.draft_debounce_secs)
  }

  pub fn gemini_options(&self) -> GeminiOptions {
    GeminiOptions {
      base_url: self.api_base_url.clone(),
      timeout: Duration::from_secs(self.request_timeout_secs),
    }
  }
}
