use super::Context;
use crate::article::GeneratedArticle;
use crate::display::{self, View};
use crate::gemini::{models, TextGenerator, ThinkingLevel};
use crate::generate::{generate_bilingual_content, GenerationOptions};
use crate::prompt::Style;
use crate::state::AppState;
use crate::storage::{DraftStore, HistoryStore};
use anyhow::{anyhow, Context as _, Result};
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
  pub text: Option<String>,
  pub file: Option<PathBuf>,
  pub style: Option<Style>,
  pub model: Option<String>,
  pub thinking: Option<ThinkingLevel>,
  pub view: View,
  pub json: bool,
}

/// Material to generate from: the text argument, then the file, then the saved draft
pub fn resolve_input(text: Option<String>, file: Option<&PathBuf>, drafts: &DraftStore) -> Result<String> {
  let input = match (text, file) {
    (Some(text), _) => text,
    (None, Some(path)) => std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read material from {}", path.display()))?,
    (None, None) => drafts.load().unwrap_or_default(),
  };

  if input.trim().is_empty() {
    return Err(anyhow!("Nothing to generate from. Pass TEXT, --file, or save a draft with 'quill draft set'."));
  }
  Ok(input)
}

/// One guarded generation: busy flag, active bundle on success, history
/// entry recorded. A failure leaves the previous bundle in place.
pub async fn run_generation(
  generator: &dyn TextGenerator,
  history: &HistoryStore,
  state: &mut AppState,
  input: &str,
  options: &GenerationOptions,
) -> crate::Result<GeneratedArticle> {
  state.begin_generation()?;
  let result = generate_bilingual_content(generator, input, options).await;
  let article = state.apply_generation(result)?.clone();
  record_history(history, &article);
  Ok(article)
}

pub(crate) fn record_history(history: &HistoryStore, article: &GeneratedArticle) {
  match history.record(article) {
    Ok(entry) => tracing::debug!(id = %entry.id, "saved to history"),
    Err(err) => herald::warn(&format!("Generated content could not be saved to history: {err}")),
  }
}

pub fn options_for(ctx: &Context, style: Option<Style>, model: Option<&str>, thinking: Option<ThinkingLevel>) -> GenerationOptions {
  let mut options = GenerationOptions::new(style.unwrap_or(ctx.config.default_style), ctx.generation_model(model));
  options.temperature = ctx.config.temperature;
  options.thinking = thinking;
  options
}

pub async fn handle(ctx: &Context, args: GenerateArgs) -> Result<()> {
  let input = resolve_input(args.text, args.file.as_ref(), &ctx.drafts())?;
  let options = options_for(ctx, args.style, args.model.as_deref(), args.thinking);
  let generator = ctx.generator()?;

  let mut state = AppState::new(options.style, options.model.clone());
  herald::info(&format!(
    "Generating {} content with {}...",
    options.style.label(),
    models::badge(&options.model)
  ));

  let article = run_generation(generator.as_ref(), &ctx.history(), &mut state, &input, &options).await?;

  if args.json {
    println!("{}", serde_json::to_string_pretty(&article)?);
  } else {
    display::render(&article, args.view);
    herald::success("Saved to history. Use 'quill copy SECTION' to grab a piece.");
  }
  Ok(())
}
