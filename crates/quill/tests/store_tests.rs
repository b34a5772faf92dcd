use quill::article::ArticleMetadata;
use quill::storage::history::MAX_HISTORY;
use quill::storage::{quill_root, DraftStore, HistoryStore, LocalStore, DRAFT_KEY, HISTORY_KEY};
use quill::{GeneratedArticle, QuillError};
use serial_test::serial;
use tempfile::TempDir;

fn article(n: usize) -> GeneratedArticle {
  let mut article = GeneratedArticle::default();
  article.chinese.title_strategies.intuitive = format!("標題 {n}");
  article.metadata = Some(ArticleMetadata {
    model_used: "gemini-2.0-flash-exp".to_string(),
    timestamp: 1_700_000_000_000 + n as i64,
    original_input: format!("input {n}"),
  });
  article
}

#[test]
fn test_sixteenth_entry_evicts_oldest() {
  let dir = TempDir::new().unwrap();
  let history = HistoryStore::new(LocalStore::new(dir.path()));

  for n in 1..=MAX_HISTORY {
    history.record(&article(n)).unwrap();
  }
  assert_eq!(history.entries().len(), MAX_HISTORY);

  history.record(&article(16)).unwrap();
  let entries = history.entries();

  assert_eq!(entries.len(), MAX_HISTORY);
  assert_eq!(entries[0].data.original_input(), Some("input 16"));
  assert_eq!(entries[MAX_HISTORY - 1].data.original_input(), Some("input 2"));
  assert!(!entries.iter().any(|e| e.data.original_input() == Some("input 1")));
}

#[test]
fn test_configured_limit_is_clamped() {
  let dir = TempDir::new().unwrap();
  let history = HistoryStore::new(LocalStore::new(dir.path())).with_limit(100);
  assert_eq!(history.limit(), MAX_HISTORY);

  let small = HistoryStore::new(LocalStore::new(dir.path())).with_limit(2);
  for n in 1..=3 {
    small.record(&article(n)).unwrap();
  }
  assert_eq!(small.entries().len(), 2);
}

#[test]
fn test_find_by_prefix_and_missing_id() {
  let dir = TempDir::new().unwrap();
  let history = HistoryStore::new(LocalStore::new(dir.path()));
  let entry = history.record(&article(1)).unwrap();

  assert_eq!(history.find(&entry.id[..4]).unwrap(), entry);
  assert_eq!(history.latest().unwrap(), entry);
  assert!(matches!(history.find("zzzz"), Err(QuillError::NotFound { .. })));
  assert!(matches!(history.find(""), Err(QuillError::NotFound { .. })));
}

#[test]
fn test_malformed_history_reads_as_empty() {
  let dir = TempDir::new().unwrap();
  let store = LocalStore::new(dir.path());
  std::fs::write(store.path_for(HISTORY_KEY), "[{\"id\": 12").unwrap();

  let history = HistoryStore::new(store);
  assert!(history.entries().is_empty());

  history.record(&article(1)).unwrap();
  assert_eq!(history.entries().len(), 1);
}

#[test]
fn test_one_bad_history_entry_does_not_blank_the_rest() {
  let dir = TempDir::new().unwrap();
  let store = LocalStore::new(dir.path());
  let legacy = serde_json::json!([
    { "id": "aaaa1111", "title": "舊的", "timestamp": null, "modelUsed": null, "data": { "chinese": null } },
    "not a record",
    { "id": "bbbb2222", "title": "好的", "timestamp": 1_700_000_000_000i64, "modelUsed": "m", "data": {} }
  ]);
  std::fs::write(store.path_for(HISTORY_KEY), legacy.to_string()).unwrap();

  let history = HistoryStore::new(store);
  let entries = history.entries();
  assert_eq!(entries.len(), 2);
  assert_eq!(entries[0].title, "舊的");
  assert_eq!(entries[0].timestamp, 0);

  history.record(&article(1)).unwrap();
  let ids: Vec<String> = history.entries().into_iter().map(|e| e.id).collect();
  assert_eq!(ids.len(), 3);
  assert!(ids.contains(&"aaaa1111".to_string()));
  assert!(ids.contains(&"bbbb2222".to_string()));
}

#[test]
fn test_clear_history_and_draft() {
  let dir = TempDir::new().unwrap();
  let store = LocalStore::new(dir.path());
  let history = HistoryStore::new(store.clone());
  let drafts = DraftStore::new(store.clone());

  history.record(&article(1)).unwrap();
  drafts.save("work in progress").unwrap();
  assert_eq!(drafts.load().as_deref(), Some("work in progress"));

  history.clear().unwrap();
  drafts.clear().unwrap();

  assert!(history.entries().is_empty());
  assert_eq!(drafts.load(), None);
  assert!(!store.path_for(DRAFT_KEY).exists());
}

#[test]
#[serial]
fn test_quill_dir_overrides_home() {
  let dir = TempDir::new().unwrap();
  std::env::set_var("QUILL_DIR", dir.path());
  assert_eq!(quill_root(), dir.path());

  let store = LocalStore::open_default();
  DraftStore::new(store).save("draft").unwrap();
  assert!(dir.path().join("current_draft.json").exists());

  std::env::remove_var("QUILL_DIR");
  assert!(quill_root().ends_with(".quill"));
}
