use crate::article::{ArticleMetadata, GeneratedArticle};
use crate::error::{QuillError, Result};
use crate::extract::extract_json;
use crate::gemini::{GenerationRequest, TextGenerator, ThinkingLevel};
use crate::prompt::{self, Style};

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Knobs for a single generation
#[derive(Debug, Clone)]
pub struct GenerationOptions {
  pub style: Style,
  pub model: String,
  pub temperature: f32,
  pub thinking: Option<ThinkingLevel>,
}

impl GenerationOptions {
  pub fn new(style: Style, model: impl Into<String>) -> Self {
    Self { style, model: model.into(), temperature: DEFAULT_TEMPERATURE, thinking: None }
  }
}

/// Build the request for one bilingual bundle
pub fn build_request(input: &str, options: &GenerationOptions) -> GenerationRequest {
  GenerationRequest::new(&options.model, prompt::material_contents(input))
    .with_system_instruction(prompt::system_instruction(options.style))
    .with_temperature(options.temperature)
    .with_json_schema(prompt::response_schema())
    .with_thinking(options.thinking)
}

/// Validate extracted model output and turn it into an article.
///
/// Both `english` and `chinese` must be present as objects; everything below
/// them is optional.
pub fn parse_article(text: Option<&str>) -> Result<GeneratedArticle> {
  let value = extract_json(text)
    .ok_or_else(|| QuillError::malformed_response("no JSON found in the model output"))?;

  let missing: Vec<&str> = ["english", "chinese"]
    .into_iter()
    .filter(|key| !value.get(*key).is_some_and(|section| section.is_object()))
    .collect();

  if !missing.is_empty() {
    return Err(QuillError::malformed_response(format!("missing section(s): {}", missing.join(", "))));
  }

  serde_json::from_value(value)
    .map_err(|e| QuillError::malformed_response(format!("unexpected field types: {e}")))
}

/// Ask the model for a bilingual bundle from `input`.
///
/// Identical inputs can produce different bundles; nothing is cached.
pub async fn generate_bilingual_content(
  generator: &dyn TextGenerator,
  input: &str,
  options: &GenerationOptions,
) -> Result<GeneratedArticle> {
  let request = build_request(input, options);
  let output = generator.generate(request).await?;

  let mut article = parse_article(output.text.as_deref())?;
  article.metadata = Some(ArticleMetadata {
    model_used: options.model.clone(),
    timestamp: chrono::Utc::now().timestamp_millis(),
    original_input: input.to_string(),
  });

  tracing::debug!(model = %options.model, "generated bilingual bundle");
  Ok(article)
}
