use super::{LocalStore, HISTORY_KEY};
use crate::article::GeneratedArticle;
use crate::error::{QuillError, Result};
use crate::lenient;
use serde::{Deserialize, Serialize};

/// Most entries ever kept
pub const MAX_HISTORY: usize = 15;
const TITLE_CHARS: usize = 25;

/// Immutable snapshot of one successful generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
  #[serde(default, deserialize_with = "lenient::string")]
  pub id: String,
  #[serde(default, deserialize_with = "lenient::string")]
  pub title: String,
  /// Milliseconds since the Unix epoch
  #[serde(default, deserialize_with = "lenient::millis")]
  pub timestamp: i64,
  #[serde(default, deserialize_with = "lenient::string")]
  pub model_used: String,
  #[serde(default, deserialize_with = "lenient::section")]
  pub data: GeneratedArticle,
}

impl HistoryEntry {
  pub fn from_article(article: &GeneratedArticle) -> Self {
    let timestamp = article
      .metadata
      .as_ref()
      .map(|m| m.timestamp)
      .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());

    Self {
      id: uuid::Uuid::new_v4().simple().to_string()[..8].to_string(),
      title: derive_title(article),
      timestamp,
      model_used: article.model_used().unwrap_or_default().to_string(),
      data: article.clone(),
    }
  }

  /// Local time the entry was generated
  pub fn local_time(&self) -> String {
    chrono::DateTime::from_timestamp_millis(self.timestamp)
      .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
      .unwrap_or_else(|| "-".to_string())
  }
}

/// Intuitive Chinese title without the decorative emoji, cut to 25 chars
pub fn derive_title(article: &GeneratedArticle) -> String {
  let cleaned: String = article
    .chinese
    .title_strategies
    .intuitive
    .replace(['📌', '🚀'], "")
    .trim()
    .to_string();

  if cleaned.is_empty() {
    return "未命名內容".to_string();
  }

  let short: String = cleaned.chars().take(TITLE_CHARS).collect();
  format!("{short}...")
}

/// The `gen_history` list, newest first
#[derive(Debug, Clone)]
pub struct HistoryStore {
  store: LocalStore,
  limit: usize,
}

impl HistoryStore {
  pub fn new(store: LocalStore) -> Self {
    Self { store, limit: MAX_HISTORY }
  }

  /// Keep fewer entries than the default; clamped to `1..=15`
  pub fn with_limit(mut self, limit: usize) -> Self {
    self.limit = limit.clamp(1, MAX_HISTORY);
    self
  }

  pub fn limit(&self) -> usize {
    self.limit
  }

  /// Stored entries, newest first. Entries that are not records at all are skipped.
  pub fn entries(&self) -> Vec<HistoryEntry> {
    let raw: Vec<serde_json::Value> = self.store.read(HISTORY_KEY).unwrap_or_default();
    let total = raw.len();
    let entries: Vec<HistoryEntry> =
      raw.into_iter().filter_map(|value| serde_json::from_value(value).ok()).collect();

    if entries.len() < total {
      tracing::warn!(skipped = total - entries.len(), "skipped unreadable history entries");
    }
    entries
  }

  /// Put `article` at the front, evicting the oldest past the cap
  pub fn record(&self, article: &GeneratedArticle) -> Result<HistoryEntry> {
    let entry = HistoryEntry::from_article(article);
    let mut entries = self.entries();
    entries.insert(0, entry.clone());
    entries.truncate(self.limit);
    self.store.write(HISTORY_KEY, &entries)?;

    tracing::debug!(id = %entry.id, kept = entries.len(), "recorded history entry");
    Ok(entry)
  }

  /// Find an entry by id or unique id prefix
  pub fn find(&self, id: &str) -> Result<HistoryEntry> {
    let id = id.trim();
    if id.is_empty() {
      return Err(QuillError::not_found(id));
    }

    let mut matches = self.entries().into_iter().filter(|e| e.id.starts_with(id));
    match (matches.next(), matches.next()) {
      (Some(entry), None) => Ok(entry),
      _ => Err(QuillError::not_found(id)),
    }
  }

  pub fn latest(&self) -> Option<HistoryEntry> {
    self.entries().into_iter().next()
  }

  pub fn clear(&self) -> Result<()> {
    self.store.remove(HISTORY_KEY)
  }
}
