
use mock_generator::MockGenerator;
use quill::news::{
  run_topic_search, search_news, trending_topics, KeywordBoard, SearchOutcome, DEFAULT_KEYWORDS,
  MAX_NEWS_ITEMS, RANDOM_TOPIC,
};
use quill::{GenerationOutput, GroundingSource, QuillError};
use rand::rngs::StdRng;
use rand::SeedableRng;

const MODEL: &str = "gemini-3-flash-preview";

fn news_json(count: usize) -> String {
  let items: Vec<_> = (1..=count)
    .map(|n| {
      serde_json::json!({
        "title": format!("新聞 {n}"),
        "snippet": "摘要",
        "source": "中央社",
        "time": "1 小時前",
        "link": format!("https://news.example/{n}")
      })
    })
    .collect();
  serde_json::Value::Array(items).to_string()
}

fn source(n: usize) -> GroundingSource {
  GroundingSource { title: format!("來源 {n}"), uri: format!("https://src.example/{n}") }
}

#[tokio::test]
async fn test_random_with_empty_trends_searches_default_keyword() {
  let generator = MockGenerator::new().reply_text("[]").reply_text(&news_json(2));
  let mut board = KeywordBoard::default();
  let mut rng = StdRng::seed_from_u64(42);

  let report = run_topic_search(&generator, &mut board, RANDOM_TOPIC, MODEL, &mut rng).await.unwrap();

  assert_eq!(report.topic, DEFAULT_KEYWORDS[0]);
  assert_ne!(report.topic, RANDOM_TOPIC);
  assert!(report.notice.is_none());
  assert_eq!(report.outcome.news().len(), 2);

  assert_eq!(generator.call_count(), 2);
  assert!(generator.request(0).search_grounding);
  assert!(generator.request(1).contents.contains(&format!("「{}」", DEFAULT_KEYWORDS[0])));
}

#[tokio::test]
async fn test_random_with_prose_trends_falls_back() {
  let generator = MockGenerator::new().reply_text("今天沒有特別的熱搜").reply_text(&news_json(1));
  let mut board = KeywordBoard::default();
  let mut rng = StdRng::seed_from_u64(1);

  let report = run_topic_search(&generator, &mut board, "random", MODEL, &mut rng).await.unwrap();
  assert_eq!(report.topic, DEFAULT_KEYWORDS[0]);
}

#[tokio::test]
async fn test_trend_failure_becomes_notice() {
  let generator = MockGenerator::new()
    .fail(QuillError::transport("connection reset"))
    .reply_text(&news_json(1));
  let mut board = KeywordBoard::default();
  let mut rng = StdRng::seed_from_u64(1);

  let report = run_topic_search(&generator, &mut board, RANDOM_TOPIC, MODEL, &mut rng).await.unwrap();

  assert_eq!(report.topic, DEFAULT_KEYWORDS[0]);
  assert!(report.notice.unwrap().contains("connection reset"));
  assert_eq!(board, KeywordBoard::default());
}

#[tokio::test]
async fn test_random_with_trends_refreshes_board() {
  let generator = MockGenerator::new().reply_text(r#"["颱風動態", "職棒開幕"]"#).reply_text(&news_json(1));
  let mut board = KeywordBoard::default();
  let mut rng = StdRng::seed_from_u64(9);

  let report = run_topic_search(&generator, &mut board, RANDOM_TOPIC, MODEL, &mut rng).await.unwrap();

  let keywords = board.keywords();
  assert_eq!(keywords[0], RANDOM_TOPIC);
  assert!(keywords.len() <= 20);
  assert_eq!(report.topic, keywords[1]);
  assert_ne!(report.topic, RANDOM_TOPIC);
}

#[tokio::test]
async fn test_plain_topic_skips_trends() {
  let generator = MockGenerator::new().reply_text(&news_json(3));
  let mut board = KeywordBoard::default();
  let mut rng = StdRng::seed_from_u64(1);

  let report = run_topic_search(&generator, &mut board, "台股盤勢", MODEL, &mut rng).await.unwrap();

  assert_eq!(report.topic, "台股盤勢");
  assert_eq!(generator.call_count(), 1);
}

#[tokio::test]
async fn test_empty_items_with_sources_is_no_results() {
  let generator = MockGenerator::new()
    .reply(Ok(GenerationOutput { text: Some("[]".to_string()), sources: vec![source(1), source(2)] }));

  let outcome = search_news(&generator, "AI 工具", MODEL).await.unwrap();

  assert_eq!(outcome, SearchOutcome::NoResults { sources: vec![source(1), source(2)] });
  assert!(outcome.is_empty());
  assert_eq!(outcome.sources().len(), 2);
}

#[tokio::test]
async fn test_object_reply_is_no_results() {
  let generator = MockGenerator::new().reply_text(r#"{"message": "no news"}"#);
  let outcome = search_news(&generator, "AI 工具", MODEL).await.unwrap();
  assert_eq!(outcome, SearchOutcome::NoResults { sources: Vec::new() });
}

#[tokio::test]
async fn test_results_are_capped() {
  let generator = MockGenerator::new()
    .reply(Ok(GenerationOutput { text: Some(news_json(7)), sources: vec![source(1)] }));

  let outcome = search_news(&generator, "AI 工具", MODEL).await.unwrap();

  assert_eq!(outcome.news().len(), MAX_NEWS_ITEMS);
  assert_eq!(outcome.news()[0].title, "新聞 1");
  assert_eq!(outcome.news()[0].link.as_deref(), Some("https://news.example/1"));
  assert_eq!(outcome.sources(), &[source(1)]);
}

#[tokio::test]
async fn test_search_failure_is_an_error() {
  let generator = MockGenerator::new().fail(QuillError::service(500, "Internal error"));
  let mut board = KeywordBoard::default();
  let mut rng = StdRng::seed_from_u64(1);

  let err = run_topic_search(&generator, &mut board, "AI 工具", MODEL, &mut rng).await.unwrap_err();
  assert_eq!(err.to_string(), "Internal error");
}

#[tokio::test]
async fn test_trending_topics_drops_blank_entries() {
  let generator = MockGenerator::new().reply_text("```json\n[\"A\", \" \", \"B\", 3]\n```");
  let topics = trending_topics(&generator, MODEL).await.unwrap();
  assert_eq!(topics, vec!["A".to_string(), "B".to_string()]);
}

#[tokio::test]
async fn test_null_and_numeric_fields_keep_the_item() {
  let reply = r#"[
    {"title": "颱風消息", "source": null, "snippet": "停班停課", "time": "今天", "link": null},
    {"title": "股市收盤", "source": "經濟日報", "snippet": null, "time": null},
    {"title": "油價調整", "source": 7, "snippet": ["wrong"], "time": 1700000000},
    "not an item",
    {"title": null, "snippet": "沒有標題"}
  ]"#;
  let generator = MockGenerator::new().reply_text(reply);

  let outcome = search_news(&generator, "台灣", MODEL).await.unwrap();
  let news = outcome.news();

  assert_eq!(news.len(), 3);
  assert_eq!(news[0].source, "");
  assert_eq!(news[0].link, None);
  assert_eq!(news[1].snippet, "");
  assert_eq!(news[1].time, "");
  assert_eq!(news[2].source, "7");
  assert_eq!(news[2].snippet, "");
  assert_eq!(news[2].time, "1700000000");
}
