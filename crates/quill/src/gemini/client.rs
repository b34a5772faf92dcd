use super::{GenerationOutput, GenerationRequest, TextGenerator};
use crate::article::GroundingSource;
use crate::error::{QuillError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Messages the API uses when the key itself is the problem
const CREDENTIAL_MARKERS: &[&str] =
  &["API key not valid", "API_KEY_INVALID", "Requested entity was not found", "PERMISSION_DENIED"];

#[derive(Debug, Clone)]
pub struct GeminiOptions {
  pub base_url: String,
  pub timeout: Duration,
}

impl Default for GeminiOptions {
  fn default() -> Self {
    Self { base_url: DEFAULT_BASE_URL.to_string(), timeout: Duration::from_secs(120) }
  }
}

pub struct GeminiClient {
  client: Client,
  base_url: Url,
  api_key: String,
}

impl GeminiClient {
  pub fn new(api_key: impl Into<String>, options: GeminiOptions) -> Result<Self> {
    let api_key = api_key.into();
    if api_key.trim().is_empty() {
      return Err(QuillError::MissingCredential);
    }

    let base_url = Url::parse(&options.base_url).map_err(|e| {
      QuillError::invalid_config(format!("api_base_url '{}' is not a URL: {e}", options.base_url))
    })?;

    let client = Client::builder().timeout(options.timeout).build()?;

    Ok(Self { client, base_url, api_key })
  }

  fn endpoint(&self, model: &str) -> Result<Url> {
    let path = format!("v1beta/models/{model}:generateContent");
    let mut base = self.base_url.clone();
    if !base.path().ends_with('/') {
      let with_slash = format!("{}/", base.path());
      base.set_path(&with_slash);
    }
    base
      .join(&path)
      .map_err(|e| QuillError::invalid_config(format!("cannot build endpoint for '{model}': {e}")))
  }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiClient {
  async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutput> {
    let url = self.endpoint(&request.model)?;
    let body = WireRequest::from(&request);

    tracing::debug!(
      model = %request.model,
      grounding = request.search_grounding,
      "sending generateContent request"
    );

    let response = self
      .client
      .post(url)
      .header("x-goog-api-key", &self.api_key)
      .json(&body)
      .send()
      .await
      .map_err(|e| QuillError::transport(format!("Failed to reach the Gemini API: {e}")))?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
      tracing::warn!(status = status.as_u16(), "Gemini API returned an error");
      return Err(classify_error(status.as_u16(), &text));
    }

    let parsed: WireResponse = serde_json::from_str(&text)
      .map_err(|e| QuillError::malformed_response(format!("unreadable API envelope: {e}")))?;

    tracing::trace!(body = %text, "generateContent response");
    Ok(parsed.into_output())
  }
}

/// Turn an error body into the matching [`QuillError`]
pub fn classify_error(status: u16, body: &str) -> QuillError {
  let message = serde_json::from_str::<WireErrorEnvelope>(body)
    .ok()
    .map(|envelope| envelope.error.message)
    .filter(|m| !m.is_empty())
    .unwrap_or_else(|| {
      if body.trim().is_empty() {
        format!("Gemini API error (HTTP {status})")
      } else {
        body.trim().to_string()
      }
    });

  let credential_problem = CREDENTIAL_MARKERS.iter().any(|marker| message.contains(marker))
    || status == 401
    || (status == 403 && message.to_lowercase().contains("key"));

  if credential_problem {
    QuillError::invalid_credential(message)
  } else {
    QuillError::service(status, message)
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
  contents: Vec<WireContent>,
  #[serde(skip_serializing_if = "Option::is_none")]
  system_instruction: Option<WireContent>,
  #[serde(skip_serializing_if = "Option::is_none")]
  generation_config: Option<WireGenerationConfig>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  tools: Vec<Value>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct WireContent {
  #[serde(skip_serializing_if = "Option::is_none")]
  role: Option<String>,
  #[serde(default)]
  parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct WirePart {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  text: Option<String>,
}

#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
  #[serde(skip_serializing_if = "Option::is_none")]
  temperature: Option<f32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  response_mime_type: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  response_schema: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  thinking_config: Option<Value>,
}

impl WireGenerationConfig {
  fn is_empty(&self) -> bool {
    self.temperature.is_none()
      && self.response_mime_type.is_none()
      && self.response_schema.is_none()
      && self.thinking_config.is_none()
  }
}

impl From<&GenerationRequest> for WireRequest {
  fn from(request: &GenerationRequest) -> Self {
    let text_content = |role: Option<&str>, text: &str| WireContent {
      role: role.map(str::to_string),
      parts: vec![WirePart { text: Some(text.to_string()) }],
    };

    let config = WireGenerationConfig {
      temperature: request.temperature,
      response_mime_type: request.response_mime_type.clone(),
      response_schema: request.response_schema.clone(),
      thinking_config: request
        .thinking
        .map(|level| serde_json::json!({ "thinkingLevel": level.as_str() })),
    };

    let tools = if request.search_grounding {
      vec![serde_json::json!({ "googleSearch": {} })]
    } else {
      Vec::new()
    };

    Self {
      contents: vec![text_content(Some("user"), &request.contents)],
      system_instruction: request.system_instruction.as_deref().map(|s| text_content(None, s)),
      generation_config: if config.is_empty() { None } else { Some(config) },
      tools,
    }
  }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct WireResponse {
  candidates: Vec<WireCandidate>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct WireCandidate {
  content: Option<WireContent>,
  grounding_metadata: Option<WireGroundingMetadata>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct WireGroundingMetadata {
  grounding_chunks: Vec<WireGroundingChunk>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct WireGroundingChunk {
  web: Option<WireWebSource>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct WireWebSource {
  uri: Option<String>,
  title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireErrorEnvelope {
  error: WireError,
}

#[derive(Debug, Deserialize)]
struct WireError {
  #[serde(default)]
  message: String,
}

impl WireResponse {
  fn into_output(self) -> GenerationOutput {
    let Some(candidate) = self.candidates.into_iter().next() else {
      return GenerationOutput::default();
    };

    let text = candidate.content.map(|content| {
      content.parts.into_iter().filter_map(|part| part.text).collect::<Vec<_>>().join("")
    });

    let sources = candidate
      .grounding_metadata
      .map(|meta| meta.grounding_chunks)
      .unwrap_or_default()
      .into_iter()
      .filter_map(|chunk| chunk.web)
      .filter_map(|web| {
        let uri = web.uri?;
        let title = web.title.filter(|t| !t.is_empty()).unwrap_or_else(|| "來源".to_string());
        Some(GroundingSource { title, uri })
      })
      .collect();

    GenerationOutput { text: text.filter(|t| !t.is_empty()), sources }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::gemini::ThinkingLevel;
  use serde_json::json;

  #[test]
  fn test_wire_request_minimal() {
    let request = GenerationRequest::new("gemini-3-flash-preview", "hello");
    let body = serde_json::to_value(WireRequest::from(&request)).unwrap();
    assert_eq!(body, json!({ "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }] }));
  }

  #[test]
  fn test_wire_request_full() {
    let request = GenerationRequest::new("m", "material")
      .with_system_instruction("be nice")
      .with_temperature(0.7)
      .with_json_schema(json!({ "type": "OBJECT" }))
      .with_search_grounding()
      .with_thinking(Some(ThinkingLevel::High));
    let body = serde_json::to_value(WireRequest::from(&request)).unwrap();

    assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be nice");
    assert!(body["systemInstruction"].get("role").is_none());
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    assert_eq!(body["generationConfig"]["thinkingConfig"]["thinkingLevel"], "high");
    assert_eq!(body["tools"], json!([{ "googleSearch": {} }]));
    let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
    assert!((temperature - 0.7).abs() < 1e-6);
  }

  #[test]
  fn test_response_joins_parts_and_collects_web_sources() {
    let response: WireResponse = serde_json::from_value(json!({
      "candidates": [{
        "content": { "parts": [{ "text": "[{\"title\":" }, { "text": "\"a\"}]" }] },
        "groundingMetadata": { "groundingChunks": [
          { "web": { "uri": "https://a.example", "title": "A" } },
          { "web": { "uri": "https://b.example" } },
          { "retrievedContext": { "uri": "ignored" } }
        ] }
      }]
    }))
    .unwrap();

    let output = response.into_output();
    assert_eq!(output.text.as_deref(), Some("[{\"title\":\"a\"}]"));
    assert_eq!(
      output.sources,
      vec![
        GroundingSource { title: "A".to_string(), uri: "https://a.example".to_string() },
        GroundingSource { title: "來源".to_string(), uri: "https://b.example".to_string() },
      ]
    );
  }

  #[test]
  fn test_response_without_candidates() {
    let response: WireResponse = serde_json::from_value(json!({ "promptFeedback": {} })).unwrap();
    assert_eq!(response.into_output(), GenerationOutput::default());
  }

  #[test]
  fn test_classify_invalid_key() {
    let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
    assert!(matches!(classify_error(400, body), QuillError::InvalidCredential { .. }));
  }

  #[test]
  fn test_classify_entity_not_found_as_credential() {
    let body = r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#;
    assert!(classify_error(404, body).is_credential_error());
  }

  #[test]
  fn test_classify_service_error_keeps_message() {
    let body = r#"{"error":{"code":503,"message":"The model is overloaded.","status":"UNAVAILABLE"}}"#;
    match classify_error(503, body) {
      QuillError::Service { status, message } => {
        assert_eq!(status, 503);
        assert_eq!(message, "The model is overloaded.");
      }
      other => panic!("Expected Service error, got: {other:?}"),
    }
  }

  #[test]
  fn test_classify_non_json_body() {
    match classify_error(502, "") {
      QuillError::Service { message, .. } => assert_eq!(message, "Gemini API error (HTTP 502)"),
      other => panic!("Expected Service error, got: {other:?}"),
    }
  }

  #[test]
  fn test_endpoint_respects_base_path() {
    let options = GeminiOptions { base_url: "http://localhost:9999/proxy".to_string(), ..Default::default() };
    let client = GeminiClient::new("key", options).unwrap();
    assert_eq!(
      client.endpoint("gemini-3-flash-preview").unwrap().as_str(),
      "http://localhost:9999/proxy/v1beta/models/gemini-3-flash-preview:generateContent"
    );
  }

  #[test]
  fn test_empty_key_is_missing_credential() {
    assert!(matches!(
      GeminiClient::new("  ", GeminiOptions::default()),
      Err(QuillError::MissingCredential)
    ));
  }
}
