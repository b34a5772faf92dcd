use crate::article::GroundingSource;
use crate::error::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod client;
pub mod models;

pub use client::{GeminiClient, GeminiOptions};

/// Reasoning-effort hint forwarded as `thinkingConfig.thinkingLevel`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThinkingLevel {
  Low,
  High,
}

impl ThinkingLevel {
  pub fn as_str(&self) -> &'static str {
    match self {
      ThinkingLevel::Low => "low",
      ThinkingLevel::High => "high",
    }
  }
}

/// One `generateContent` call, independent of the wire format
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
  pub model: String,
  pub contents: String,
  pub system_instruction: Option<String>,
  pub temperature: Option<f32>,
  pub response_mime_type: Option<String>,
  pub response_schema: Option<Value>,
  /// Let the model consult Google Search and report its sources
  pub search_grounding: bool,
  pub thinking: Option<ThinkingLevel>,
}

impl GenerationRequest {
  pub fn new(model: impl Into<String>, contents: impl Into<String>) -> Self {
    Self {
      model: model.into(),
      contents: contents.into(),
      system_instruction: None,
      temperature: None,
      response_mime_type: None,
      response_schema: None,
      search_grounding: false,
      thinking: None,
    }
  }

  pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
    self.system_instruction = Some(instruction.into());
    self
  }

  pub fn with_temperature(mut self, temperature: f32) -> Self {
    self.temperature = Some(temperature);
    self
  }

  /// Ask for `application/json` output following `schema`
  pub fn with_json_schema(mut self, schema: Value) -> Self {
    self.response_mime_type = Some("application/json".to_string());
    self.response_schema = Some(schema);
    self
  }

  pub fn with_search_grounding(mut self) -> Self {
    self.search_grounding = true;
    self
  }

  pub fn with_thinking(mut self, thinking: Option<ThinkingLevel>) -> Self {
    self.thinking = thinking;
    self
  }
}

/// What came back from the model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOutput {
  /// Concatenated text parts of the first candidate, if any
  pub text: Option<String>,
  /// Web sources from search grounding, empty when grounding was off
  pub sources: Vec<GroundingSource>,
}

impl GenerationOutput {
  pub fn text(text: impl Into<String>) -> Self {
    Self { text: Some(text.into()), sources: Vec::new() }
  }
}

/// Seam between Quill's flows and the hosted model
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
  async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutput>;
}
