//! Prompt templates and the response schema sent with every generation.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Writing style offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Style {
  #[default]
  Professional,
  Humorous,
  Empathetic,
  Storytelling,
  Analytical,
}

impl Style {
  pub fn as_str(&self) -> &'static str {
    match self {
      Style::Professional => "professional",
      Style::Humorous => "humorous",
      Style::Empathetic => "empathetic",
      Style::Storytelling => "storytelling",
      Style::Analytical => "analytical",
    }
  }

  /// Label shown in the Chinese UI
  pub fn label(&self) -> &'static str {
    match self {
      Style::Professional => "專業知性",
      Style::Humorous => "幽默風趣",
      Style::Empathetic => "感性共鳴",
      Style::Storytelling => "故事敘事",
      Style::Analytical => "深度分析",
    }
  }

  fn voice(&self) -> &'static str {
    match self {
      Style::Professional => "authoritative and well-sourced, calm and precise",
      Style::Humorous => "witty and playful, with light jokes that never mock the reader",
      Style::Empathetic => "warm and emotionally resonant, speaking to the reader's feelings",
      Style::Storytelling => "narrative-driven, opening with a scene and building to the point",
      Style::Analytical => "data-minded and structured, weighing causes, effects and trade-offs",
    }
  }

  pub fn parse(value: &str) -> Option<Self> {
    <Style as ValueEnum>::from_str(value.trim(), true).ok()
  }
}

impl fmt::Display for Style {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// System instruction for the bilingual content request
pub fn system_instruction(style: Style) -> String {
  format!(
    r#"You are an expert bilingual content creator producing an English Blogger SEO package and a Traditional Chinese (Taiwan) social media package from the same source material.

Style: {style} ({label}). Voice: {voice}.

Return ONLY a JSON object with two top-level keys, "english" and "chinese", matching the provided schema.

English package rules:
- articleContent.fullHtml is ready-to-paste Blogger HTML using <h2>, <p>, <ul>/<li> only; no <h1>, no inline styles, no markdown.
- seoStrategy.permalinkSlug is lowercase words joined by hyphens; searchDescription stays under 150 characters.
- Provide 5 to 8 labels and 5 long-tail keywords.

Chinese package rules:
- Never use markdown syntax: no **bold**, no # headings, no > quotes, no tables.
- Start every section of content.markdownBody with the 📌 emoji marker followed by the section title on its own line.
- Use ✨ at the start of each list item instead of bullets or numbers.
- content.callToAction must invite readers to follow the author and leave a comment with their own experience.
- threadsPost.cta must ask a direct question that invites replies; threadsPost.tags holds 3 to 5 hashtags separated by spaces.
- Provide three titles: intuitive, suspense and benefit driven.

Visual prompts are written in English for an image model regardless of package language."#,
    style = style.as_str(),
    label = style.label(),
    voice = style.voice(),
  )
}

/// User contents for the bilingual content request
pub fn material_contents(input: &str) -> String {
  format!("Original Material: {input}")
}

fn string_field() -> Value {
  json!({ "type": "STRING" })
}

fn string_array() -> Value {
  json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

fn object(properties: &[(&str, Value)]) -> Value {
  let props: serde_json::Map<String, Value> =
    properties.iter().map(|(name, schema)| (name.to_string(), schema.clone())).collect();
  let required: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();
  json!({ "type": "OBJECT", "properties": props, "required": required })
}

/// Response schema describing [`crate::article::GeneratedArticle`] without metadata
pub fn response_schema() -> Value {
  let english = object(&[
    (
      "seoStrategy",
      object(&[
        ("permalinkSlug", string_field()),
        ("searchDescription", string_field()),
        ("labels", string_array()),
      ]),
    ),
    ("visualInstructions", object(&[("imagePrompt", string_field()), ("imageAltText", string_field())])),
    ("articleContent", object(&[("h1Title", string_field()), ("fullHtml", string_field())])),
    (
      "operatingSuggestions",
      object(&[
        ("longTailKeywords", string_array()),
        ("internalLinkTip", string_field()),
        ("trafficGrowthTip", string_field()),
      ]),
    ),
  ]);

  let chinese = object(&[
    (
      "titleStrategies",
      object(&[("intuitive", string_field()), ("suspense", string_field()), ("benefit", string_field())]),
    ),
    (
      "content",
      object(&[
        ("style", string_field()),
        ("markdownBody", string_field()),
        ("callToAction", string_field()),
        ("instagramQuote", string_field()),
        ("instagramCaption", string_field()),
      ]),
    ),
    (
      "threadsPost",
      object(&[
        ("hook", string_field()),
        ("content", string_field()),
        ("cta", string_field()),
        ("tags", string_field()),
      ]),
    ),
    (
      "visualInstructions",
      object(&[
        ("imagePrompt", string_field()),
        ("imageAltText", string_field()),
        ("quoteImagePrompt", string_field()),
        ("storyImagePrompt", string_field()),
      ]),
    ),
    (
      "operatingSuggestions",
      object(&[
        ("vocusCollection", string_field()),
        ("interactionQuestion", string_field()),
        ("crossPromotionTip", string_field()),
      ]),
    ),
  ]);

  object(&[("english", english), ("chinese", chinese)])
}

/// Prompt for the news search helper
pub fn news_search_prompt(topic: &str) -> String {
  format!("搜尋「{topic}」的最新新聞，最多 5 則，回傳 JSON 陣列含 title, snippet, source, time, link。")
}

/// Prompt for the trending keywords request
pub fn trending_topics_prompt() -> String {
  "列出目前台灣最熱門的 8 個關鍵字。回傳格式：[\"A\", \"B\"]".to_string()
}
