//! News search helper and the random-topic flow.
//!
//! Searching is a single grounded `generateContent` call. Picking the
//! "random" keyword first asks for trending keywords, mixes them into the
//! keyword board and searches the first real keyword. That flow is modelled
//! as [`TopicFlow`], a small state machine:
//!
//! ```text
//! Idle --start(random)--> FetchingTrends --trends_arrived--> ResolvedTopic
//! Idle --start(topic)-------------------------------------> ResolvedTopic
//! ResolvedTopic --begin_search--> Searching --finish--> Idle
//! ```

use crate::article::{GroundingSource, NewsItem};
use crate::error::Result;
use crate::extract::extract_json;
use crate::gemini::{GenerationRequest, TextGenerator};
use crate::prompt;
use rand::seq::SliceRandom;
use rand::Rng;

/// Keyword that asks for a random trending topic
pub const RANDOM_TOPIC: &str = "隨機";

/// Last-resort topic when the board holds nothing but the sentinel
pub const FALLBACK_TOPIC: &str = "科技趨勢";

pub const DEFAULT_KEYWORDS: &[&str] = &[
  "職場心情",
  "安靜離職",
  "遠距工作",
  "台灣生活",
  "租屋補助",
  "美食打卡",
  "心理健康",
  "自我成長",
  "科技趨勢",
  "台股盤勢",
  "美股動態",
  "AI 工具",
  "國際局勢",
  "健康醫療",
  "退休金",
  "勞保議題",
];

pub const MAX_NEWS_ITEMS: usize = 5;
const BOARD_SIZE: usize = 20;

/// `隨機` or, for people typing on an English keyboard, `random`
pub fn is_random_topic(topic: &str) -> bool {
  let topic = topic.trim();
  topic == RANDOM_TOPIC || topic.eq_ignore_ascii_case("random")
}

/// Result of a news search that reached the service
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
  Found { news: Vec<NewsItem>, sources: Vec<GroundingSource> },
  /// The service answered but no news items could be read. Sources the
  /// model consulted are still reported.
  NoResults { sources: Vec<GroundingSource> },
}

impl SearchOutcome {
  pub fn news(&self) -> &[NewsItem] {
    match self {
      SearchOutcome::Found { news, .. } => news,
      SearchOutcome::NoResults { .. } => &[],
    }
  }

  pub fn sources(&self) -> &[GroundingSource] {
    match self {
      SearchOutcome::Found { sources, .. } | SearchOutcome::NoResults { sources } => sources,
    }
  }

  pub fn is_empty(&self) -> bool {
    matches!(self, SearchOutcome::NoResults { .. })
  }
}

/// Ask for the current trending keywords in Taiwan
pub async fn trending_topics(generator: &dyn TextGenerator, model: &str) -> Result<Vec<String>> {
  let request = GenerationRequest::new(model, prompt::trending_topics_prompt()).with_search_grounding();
  let output = generator.generate(request).await?;

  let topics = match extract_json(output.text.as_deref()) {
    Some(serde_json::Value::Array(values)) => values
      .into_iter()
      .filter_map(|v| v.as_str().map(|s| s.trim().to_string()))
      .filter(|s| !s.is_empty())
      .collect(),
    _ => Vec::new(),
  };

  tracing::debug!(count = topics.len(), "trending topics received");
  Ok(topics)
}

/// Search the latest news for `topic` with search grounding
pub async fn search_news(
  generator: &dyn TextGenerator,
  topic: &str,
  model: &str,
) -> Result<SearchOutcome> {
  let request = GenerationRequest::new(model, prompt::news_search_prompt(topic)).with_search_grounding();
  let output = generator.generate(request).await?;

  let news: Vec<NewsItem> = match extract_json(output.text.as_deref()) {
    Some(serde_json::Value::Array(values)) => values
      .into_iter()
      .filter_map(|v| serde_json::from_value::<NewsItem>(v).ok())
      .filter(|item| !item.title.trim().is_empty())
      .take(MAX_NEWS_ITEMS)
      .collect(),
    _ => Vec::new(),
  };

  let sources = output.sources;
  if news.is_empty() {
    tracing::debug!(topic, sources = sources.len(), "search returned no news items");
    Ok(SearchOutcome::NoResults { sources })
  } else {
    Ok(SearchOutcome::Found { news, sources })
  }
}

/// The quick-pick keywords, always led by the random sentinel
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordBoard {
  keywords: Vec<String>,
}

impl Default for KeywordBoard {
  fn default() -> Self {
    let mut keywords = vec![RANDOM_TOPIC.to_string()];
    keywords.extend(DEFAULT_KEYWORDS.iter().map(|k| k.to_string()));
    Self { keywords }
  }
}

impl KeywordBoard {
  pub fn keywords(&self) -> &[String] {
    &self.keywords
  }

  /// First keyword that is not the sentinel
  pub fn first_topic(&self) -> String {
    self
      .keywords
      .iter()
      .find(|k| !is_random_topic(k))
      .cloned()
      .unwrap_or_else(|| FALLBACK_TOPIC.to_string())
  }

  /// Mix `trends` into the default keywords, shuffle and keep the sentinel
  /// plus the first 19. Returns the topic to search.
  pub fn refresh<R: Rng + ?Sized>(&mut self, trends: &[String], rng: &mut R) -> String {
    let mut merged: Vec<String> = Vec::new();
    let candidates = trends.iter().map(|t| t.trim()).chain(DEFAULT_KEYWORDS.iter().copied());
    for keyword in candidates {
      if keyword.is_empty() || is_random_topic(keyword) {
        continue;
      }
      if !merged.iter().any(|k| k == keyword) {
        merged.push(keyword.to_string());
      }
    }

    merged.shuffle(rng);
    merged.truncate(BOARD_SIZE - 1);

    let mut keywords = Vec::with_capacity(merged.len() + 1);
    keywords.push(RANDOM_TOPIC.to_string());
    keywords.extend(merged);
    self.keywords = keywords;

    self.first_topic()
  }
}

/// Where a search triggered from the keyword board currently stands
#[derive(Debug, Clone, PartialEq)]
pub enum TopicPhase {
  Idle,
  FetchingTrends,
  ResolvedTopic(String),
  Searching(String),
}

#[derive(Debug, Clone)]
pub struct TopicFlow {
  phase: TopicPhase,
  notice: Option<String>,
}

impl Default for TopicFlow {
  fn default() -> Self {
    Self::new()
  }
}

impl TopicFlow {
  pub fn new() -> Self {
    Self { phase: TopicPhase::Idle, notice: None }
  }

  pub fn phase(&self) -> &TopicPhase {
    &self.phase
  }

  /// Message about a trend lookup that failed and was recovered from
  pub fn notice(&self) -> Option<&str> {
    self.notice.as_deref()
  }

  pub fn is_idle(&self) -> bool {
    self.phase == TopicPhase::Idle
  }

  /// Idle → FetchingTrends for the sentinel, Idle → ResolvedTopic otherwise
  pub fn start(&mut self, requested: &str) -> &TopicPhase {
    if self.phase != TopicPhase::Idle {
      tracing::debug!(phase = ?self.phase, "ignoring start outside Idle");
      return &self.phase;
    }

    self.notice = None;
    self.phase = if is_random_topic(requested) {
      TopicPhase::FetchingTrends
    } else {
      TopicPhase::ResolvedTopic(requested.trim().to_string())
    };
    &self.phase
  }

  /// FetchingTrends → ResolvedTopic.
  ///
  /// Non-empty trends refresh the board. Empty trends or a failed lookup fall
  /// back to the board's first real keyword, never the sentinel.
  pub fn trends_arrived<R: Rng + ?Sized>(
    &mut self,
    trends: Result<Vec<String>>,
    board: &mut KeywordBoard,
    rng: &mut R,
  ) -> &TopicPhase {
    if self.phase != TopicPhase::FetchingTrends {
      tracing::debug!(phase = ?self.phase, "ignoring trends outside FetchingTrends");
      return &self.phase;
    }

    let topic = match trends {
      Ok(trends) if !trends.is_empty() => board.refresh(&trends, rng),
      Ok(_) => board.first_topic(),
      Err(err) => {
        self.notice = Some(format!("熱搜獲取失敗：{err}"));
        board.first_topic()
      }
    };

    self.phase = TopicPhase::ResolvedTopic(topic);
    &self.phase
  }

  /// ResolvedTopic → Searching, returning the topic to search
  pub fn begin_search(&mut self) -> Option<String> {
    match &self.phase {
      TopicPhase::ResolvedTopic(topic) => {
        let topic = topic.clone();
        self.phase = TopicPhase::Searching(topic.clone());
        Some(topic)
      }
      _ => None,
    }
  }

  /// Back to Idle whatever happened
  pub fn finish(&mut self) {
    self.phase = TopicPhase::Idle;
  }
}

/// A finished search started from a keyword
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
  pub topic: String,
  pub outcome: SearchOutcome,
  pub notice: Option<String>,
}

/// Run the whole keyword flow in one go: resolve the topic (fetching trends
/// for the sentinel) and search it.
pub async fn run_topic_search<R: Rng + ?Sized>(
  generator: &dyn TextGenerator,
  board: &mut KeywordBoard,
  requested: &str,
  model: &str,
  rng: &mut R,
) -> Result<SearchReport> {
  let mut flow = TopicFlow::new();

  if flow.start(requested) == &TopicPhase::FetchingTrends {
    let trends = trending_topics(generator, model).await;
    flow.trends_arrived(trends, board, rng);
  }

  let Some(topic) = flow.begin_search() else {
    flow.finish();
    return Ok(SearchReport {
      topic: board.first_topic(),
      outcome: SearchOutcome::NoResults { sources: Vec::new() },
      notice: flow.notice().map(str::to_string),
    });
  };

  let outcome = search_news(generator, &topic, model).await;
  let notice = flow.notice().map(str::to_string);
  flow.finish();

  Ok(SearchReport { topic, outcome: outcome?, notice })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::QuillError;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn test_random_sentinel_detection() {
    assert!(is_random_topic("隨機"));
    assert!(is_random_topic(" Random "));
    assert!(!is_random_topic("AI 工具"));
  }

  #[test]
  fn test_default_board_starts_with_sentinel() {
    let board = KeywordBoard::default();
    assert_eq!(board.keywords()[0], RANDOM_TOPIC);
    assert_eq!(board.keywords().len(), DEFAULT_KEYWORDS.len() + 1);
    assert_eq!(board.first_topic(), DEFAULT_KEYWORDS[0]);
  }

  #[test]
  fn test_refresh_merges_dedupes_and_caps() {
    let mut board = KeywordBoard::default();
    let mut rng = StdRng::seed_from_u64(7);
    let trends: Vec<String> =
      vec!["颱風".into(), "AI 工具".into(), "隨機".into(), "".into(), "颱風".into(), "棒球".into()];

    let topic = board.refresh(&trends, &mut rng);

    let keywords = board.keywords();
    assert_eq!(keywords[0], RANDOM_TOPIC);
    assert_eq!(keywords.len(), BOARD_SIZE);
    assert_eq!(keywords.iter().filter(|k| k.as_str() == RANDOM_TOPIC).count(), 1);
    assert_eq!(keywords.iter().filter(|k| k.as_str() == "AI 工具").count(), 1);
    assert!(!keywords.iter().any(|k| k.is_empty()));
    assert_eq!(topic, keywords[1]);
    assert!(!is_random_topic(&topic));
  }

  #[test]
  fn test_flow_for_plain_topic_skips_trends() {
    let mut flow = TopicFlow::new();
    assert_eq!(flow.start(" 台股盤勢 "), &TopicPhase::ResolvedTopic("台股盤勢".to_string()));
    assert_eq!(flow.begin_search(), Some("台股盤勢".to_string()));
    assert_eq!(flow.phase(), &TopicPhase::Searching("台股盤勢".to_string()));
    flow.finish();
    assert!(flow.is_idle());
  }

  #[test]
  fn test_flow_empty_trends_never_resolve_to_sentinel() {
    let mut flow = TopicFlow::new();
    let mut board = KeywordBoard::default();
    let mut rng = StdRng::seed_from_u64(1);

    assert_eq!(flow.start("隨機"), &TopicPhase::FetchingTrends);
    let phase = flow.trends_arrived(Ok(Vec::new()), &mut board, &mut rng).clone();

    assert_eq!(phase, TopicPhase::ResolvedTopic(DEFAULT_KEYWORDS[0].to_string()));
    assert_eq!(board, KeywordBoard::default());
    assert!(flow.notice().is_none());
  }

  #[test]
  fn test_flow_trend_failure_sets_notice_and_falls_back() {
    let mut flow = TopicFlow::new();
    let mut board = KeywordBoard::default();
    let mut rng = StdRng::seed_from_u64(1);

    flow.start("random");
    flow.trends_arrived(Err(QuillError::transport("offline")), &mut board, &mut rng);

    assert_eq!(flow.begin_search(), Some(DEFAULT_KEYWORDS[0].to_string()));
    assert!(flow.notice().unwrap().contains("offline"));
  }

  #[test]
  fn test_flow_ignores_out_of_order_events() {
    let mut flow = TopicFlow::new();
    let mut board = KeywordBoard::default();
    let mut rng = StdRng::seed_from_u64(1);

    assert_eq!(flow.begin_search(), None);
    assert_eq!(flow.trends_arrived(Ok(vec!["x".into()]), &mut board, &mut rng), &TopicPhase::Idle);

    flow.start("AI 工具");
    assert_eq!(flow.start("別的"), &TopicPhase::ResolvedTopic("AI 工具".to_string()));
  }

  #[test]
  fn test_board_with_only_sentinel_uses_fallback_topic() {
    let board = KeywordBoard { keywords: vec![RANDOM_TOPIC.to_string()] };
    assert_eq!(board.first_topic(), FALLBACK_TOPIC);
  }
}
