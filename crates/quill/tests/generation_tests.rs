
use mock_generator::{bundle_json, MockGenerator};
use quill::commands::generate::run_generation;
use quill::generate::{generate_bilingual_content, GenerationOptions};
use quill::prompt::Style;
use quill::state::AppState;
use quill::storage::{HistoryStore, LocalStore};
use quill::{GeneratedArticle, QuillError};
use tempfile::TempDir;

fn options() -> GenerationOptions {
  GenerationOptions::new(Style::Storytelling, "gemini-3-flash-preview")
}

#[tokio::test]
async fn test_fenced_bundle_is_parsed_with_metadata() {
  let generator = MockGenerator::new().reply_text(&format!("```json\n{}\n```", bundle_json("安靜離職")));

  let article = generate_bilingual_content(&generator, "material about work", &options()).await.unwrap();

  assert_eq!(article.english.seo_strategy.permalink_slug, "quiet-quitting-guide");
  assert_eq!(article.chinese.title_strategies.intuitive, "安靜離職");
  assert_eq!(article.model_used(), Some("gemini-3-flash-preview"));
  assert_eq!(article.original_input(), Some("material about work"));
  assert!(article.metadata.unwrap().timestamp > 0);

  let request = generator.request(0);
  assert_eq!(request.contents, "Original Material: material about work");
  assert!(request.response_schema.is_some());
  assert!(request.system_instruction.unwrap().contains("storytelling"));
  assert!(!request.search_grounding);
}

#[tokio::test]
async fn test_missing_section_leaves_state_and_history_untouched() {
  let dir = TempDir::new().unwrap();
  let history = HistoryStore::new(LocalStore::new(dir.path()));
  let generator = MockGenerator::new().reply_text(r#"{"english": {"seoStrategy": {}}}"#);

  let mut previous = GeneratedArticle::default();
  previous.chinese.title_strategies.intuitive = "舊的內容".to_string();
  let mut state = AppState::new(Style::Professional, "gemini-3-flash-preview");
  state.set_active(previous.clone());

  let err = run_generation(&generator, &history, &mut state, "input", &options()).await.unwrap_err();

  assert!(matches!(err, QuillError::MalformedResponse { .. }));
  assert!(err.to_string().contains("switch to another model"));
  assert_eq!(state.active(), Some(&previous));
  assert!(!state.is_generating());
  assert!(history.entries().is_empty());
}

#[tokio::test]
async fn test_service_failure_is_surfaced_verbatim() {
  let dir = TempDir::new().unwrap();
  let history = HistoryStore::new(LocalStore::new(dir.path()));
  let generator = MockGenerator::new().fail(QuillError::service(503, "The model is overloaded."));
  let mut state = AppState::default();

  let err = run_generation(&generator, &history, &mut state, "input", &options()).await.unwrap_err();

  assert_eq!(err.to_string(), "The model is overloaded.");
  assert!(state.active().is_none());
}

#[tokio::test]
async fn test_successful_generation_becomes_active_and_is_recorded() {
  let dir = TempDir::new().unwrap();
  let history = HistoryStore::new(LocalStore::new(dir.path()));
  let generator = MockGenerator::new().reply_text(&bundle_json("📌 遠距工作的真相"));
  let mut state = AppState::default();

  let article = run_generation(&generator, &history, &mut state, "remote work", &options()).await.unwrap();

  assert_eq!(state.active(), Some(&article));
  let entries = history.entries();
  assert_eq!(entries.len(), 1);
  assert_eq!(entries[0].title, "遠距工作的真相...");
  assert_eq!(entries[0].model_used, "gemini-3-flash-preview");
  assert_eq!(entries[0].data, article);
}

#[tokio::test]
async fn test_prose_reply_is_malformed() {
  let generator = MockGenerator::new().reply_text("I'm sorry, I can't help with that.");
  let err = generate_bilingual_content(&generator, "input", &options()).await.unwrap_err();
  assert!(matches!(err, QuillError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_null_and_mistyped_leaves_degrade_to_empty() {
  let reply = r#"{
    "english": {
      "seoStrategy": {"permalinkSlug": "s", "searchDescription": null, "labels": null},
      "articleContent": null,
      "operatingSuggestions": {"longTailKeywords": ["a", 2, null], "trafficGrowthTip": 5}
    },
    "chinese": {
      "titleStrategies": {"intuitive": "t", "suspense": null, "benefit": ["x"]},
      "threadsPost": "not an object",
      "content": {"markdownBody": null, "style": "Storytelling"}
    }
  }"#;
  let generator = MockGenerator::new().reply_text(reply);

  let article = generate_bilingual_content(&generator, "input", &options()).await.unwrap();

  let english = &article.english;
  assert_eq!(english.seo_strategy.permalink_slug, "s");
  assert_eq!(english.seo_strategy.search_description, "");
  assert!(english.seo_strategy.labels.is_empty());
  assert_eq!(english.article_content.full_html, "");
  assert_eq!(english.operating_suggestions.long_tail_keywords, vec!["a".to_string(), "2".to_string()]);
  assert_eq!(english.operating_suggestions.traffic_growth_tip, "5");

  let chinese = &article.chinese;
  assert_eq!(chinese.title_strategies.intuitive, "t");
  assert_eq!(chinese.title_strategies.suspense, "");
  assert_eq!(chinese.title_strategies.benefit, "");
  assert_eq!(chinese.threads_post.full_text(), "");
  assert_eq!(chinese.content.markdown_body, "");
  assert_eq!(chinese.content.style, "Storytelling");
  assert_eq!(article.original_input(), Some("input"));
}

#[tokio::test]
async fn test_null_section_is_still_missing() {
  let generator = MockGenerator::new().reply_text(r#"{"english": {}, "chinese": null}"#);
  let err = generate_bilingual_content(&generator, "input", &options()).await.unwrap_err();
  assert!(matches!(err, QuillError::MalformedResponse { .. }));
}
