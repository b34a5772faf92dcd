use crate::config::Config;
use crate::credentials::{self, CredentialStore};
use crate::gemini::{models, GeminiClient, TextGenerator};
use crate::storage::{DraftStore, HistoryStore, LocalStore};
use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

pub mod catalogue;
pub mod compose;
pub mod config;
pub mod copy;
pub mod draft;
pub mod generate;
pub mod history;
pub mod key;
pub mod search;
pub mod show;
pub mod trending;

/// Everything a command needs, loaded once in `main`
#[derive(Debug, Clone)]
pub struct Context {
  pub config: Config,
  pub store: LocalStore,
  api_key: Option<String>,
}

impl Context {
  pub fn new(config: Config, store: LocalStore, api_key: Option<String>) -> Self {
    Self { config, store, api_key }
  }

  /// Config from the Quill directory, key from the command line if given
  pub fn load(api_key: Option<String>) -> Result<Self> {
    Ok(Self::new(Config::load()?, LocalStore::open_default(), api_key))
  }

  pub fn history(&self) -> HistoryStore {
    HistoryStore::new(self.store.clone()).with_limit(self.config.history_limit())
  }

  pub fn drafts(&self) -> DraftStore {
    DraftStore::new(self.store.clone())
  }

  pub fn credentials(&self) -> CredentialStore {
    CredentialStore::new(self.store.root())
  }

  pub fn explicit_key(&self) -> Option<&str> {
    self.api_key.as_deref()
  }

  pub fn generation_model(&self, requested: Option<&str>) -> String {
    models::resolve_model_id(requested.unwrap_or(&self.config.default_model))
  }

  pub fn search_model(&self, requested: Option<&str>) -> String {
    models::resolve_model_id(requested.unwrap_or(&self.config.search_model))
  }

  /// Gemini client, prompting for a key first if none is configured
  pub fn generator(&self) -> Result<Arc<dyn TextGenerator>> {
    let key = credentials::ensure_api_key(self.explicit_key(), &self.credentials())?;
    let client = GeminiClient::new(key, self.config.gemini_options())?;
    Ok(Arc::new(client))
  }
}

/// Ask a yes/no question on stdin. Unattended runs answer no.
pub fn confirm(question: &str) -> Result<bool> {
  if !herald::is_attended() {
    return Ok(false);
  }

  print!("{question} (y/N) ");
  io::stdout().flush()?;

  let mut input = String::new();
  io::stdin().lock().read_line(&mut input)?;
  let response = input.trim().to_lowercase();
  Ok(response == "y" || response == "yes")
}
