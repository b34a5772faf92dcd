//! Application state owned by a command or the compose loop.

use crate::article::{GeneratedArticle, NewsItem};
use crate::error::{QuillError, Result};
use crate::news::{KeywordBoard, SearchReport};
use crate::prompt::Style;

#[derive(Debug, Clone, Default)]
pub struct AppState {
  pub style: Style,
  pub model: String,
  pub keywords: KeywordBoard,
  active: Option<GeneratedArticle>,
  last_search: Option<SearchReport>,
  generating: bool,
  searching: bool,
}

impl AppState {
  pub fn new(style: Style, model: impl Into<String>) -> Self {
    Self { style, model: model.into(), ..Self::default() }
  }

  /// The one bundle currently shown
  pub fn active(&self) -> Option<&GeneratedArticle> {
    self.active.as_ref()
  }

  pub fn set_active(&mut self, article: GeneratedArticle) {
    self.active = Some(article);
  }

  pub fn is_generating(&self) -> bool {
    self.generating
  }

  pub fn is_searching(&self) -> bool {
    self.searching
  }

  pub fn begin_generation(&mut self) -> Result<()> {
    if self.generating {
      return Err(QuillError::busy("generation"));
    }
    self.generating = true;
    Ok(())
  }

  /// Clear the busy flag and, on success only, make the bundle active
  pub fn apply_generation(&mut self, result: Result<GeneratedArticle>) -> Result<&GeneratedArticle> {
    self.generating = false;
    let article = result?;
    Ok(self.active.insert(article))
  }

  pub fn begin_search(&mut self) -> Result<()> {
    if self.searching {
      return Err(QuillError::busy("search"));
    }
    self.searching = true;
    Ok(())
  }

  /// Clear the busy flag and, on success only, keep the report
  pub fn apply_search(&mut self, result: Result<SearchReport>) -> Result<&SearchReport> {
    self.searching = false;
    let report = result?;
    Ok(self.last_search.insert(report))
  }

  pub fn last_search(&self) -> Option<&SearchReport> {
    self.last_search.as_ref()
  }

  /// News item by its 1-based position in the last search
  pub fn news_item(&self, position: usize) -> Option<&NewsItem> {
    let news = self.last_search.as_ref()?.outcome.news();
    position.checked_sub(1).and_then(|i| news.get(i))
  }
}
