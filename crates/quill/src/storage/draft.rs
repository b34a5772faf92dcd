use super::{LocalStore, DRAFT_KEY};
use crate::error::Result;
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(3);

/// The `current_draft` value
#[derive(Debug, Clone)]
pub struct DraftStore {
  store: LocalStore,
}

impl DraftStore {
  pub fn new(store: LocalStore) -> Self {
    Self { store }
  }

  /// Saved draft, `None` when absent, blank or unreadable
  pub fn load(&self) -> Option<String> {
    self.store.read::<String>(DRAFT_KEY).filter(|draft| !draft.trim().is_empty())
  }

  pub fn save(&self, text: &str) -> Result<()> {
    self.store.write(DRAFT_KEY, text)
  }

  pub fn clear(&self) -> Result<()> {
    self.store.remove(DRAFT_KEY)
  }
}

/// Debounces draft writes.
///
/// Every edit pushes the deadline out by the interval. Once it passes the
/// pending text is handed out for saving, unless it is empty or still equal
/// to the text the input was seeded with.
#[derive(Debug, Clone)]
pub struct DraftAutosaver {
  initial: String,
  interval: Duration,
  pending: Option<(String, Instant)>,
}

impl DraftAutosaver {
  pub fn new(initial: impl Into<String>, interval: Duration) -> Self {
    Self { initial: initial.into(), interval, pending: None }
  }

  pub fn interval(&self) -> Duration {
    self.interval
  }

  /// Text was replaced; restart the countdown
  pub fn edit(&mut self, text: impl Into<String>, now: Instant) {
    self.pending = Some((text.into(), now + self.interval));
  }

  /// Seed the input with new text. Drops any pending write.
  pub fn reseed(&mut self, initial: impl Into<String>) {
    self.initial = initial.into();
    self.pending = None;
  }

  pub fn deadline(&self) -> Option<Instant> {
    self.pending.as_ref().map(|(_, deadline)| *deadline)
  }

  /// Text to write if the deadline has passed
  pub fn take_due(&mut self, now: Instant) -> Option<String> {
    match &self.pending {
      Some((_, deadline)) if *deadline <= now => {}
      _ => return None,
    }

    let (text, _) = self.pending.take()?;
    if text.trim().is_empty() || text == self.initial {
      tracing::trace!("draft unchanged, skipping autosave");
      return None;
    }
    Some(text)
  }

  /// Write the pending draft to `drafts` if due. Returns whether it wrote.
  pub fn commit_due(&mut self, drafts: &DraftStore, now: Instant) -> Result<bool> {
    match self.take_due(now) {
      Some(text) => {
        drafts.save(&text)?;
        tracing::debug!(chars = text.chars().count(), "draft autosaved");
        Ok(true)
      }
      None => Ok(false),
    }
  }
}
