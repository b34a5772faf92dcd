//! The bilingual content bundle returned by one generation request.
//!
//! Field names follow the camelCase JSON the model is asked to produce, and
//! every field is lenient: models drop fields, send `null` or the wrong type,
//! and the renderers treat all of that as empty.

use crate::lenient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoStrategy {
  #[serde(deserialize_with = "lenient::string")]
  pub permalink_slug: String,
  #[serde(deserialize_with = "lenient::string")]
  pub search_description: String,
  #[serde(deserialize_with = "lenient::strings")]
  pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnglishVisualInstructions {
  #[serde(deserialize_with = "lenient::string")]
  pub image_prompt: String,
  #[serde(deserialize_with = "lenient::string")]
  pub image_alt_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleContent {
  #[serde(deserialize_with = "lenient::string")]
  pub h1_title: String,
  #[serde(deserialize_with = "lenient::string")]
  pub full_html: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BloggerSuggestions {
  #[serde(deserialize_with = "lenient::strings")]
  pub long_tail_keywords: Vec<String>,
  #[serde(deserialize_with = "lenient::string")]
  pub internal_link_tip: String,
  #[serde(deserialize_with = "lenient::string")]
  pub traffic_growth_tip: String,
}

/// English SEO package for a Blogger post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnglishBloggerPackage {
  #[serde(deserialize_with = "lenient::section")]
  pub seo_strategy: SeoStrategy,
  #[serde(deserialize_with = "lenient::section")]
  pub visual_instructions: EnglishVisualInstructions,
  #[serde(deserialize_with = "lenient::section")]
  pub article_content: ArticleContent,
  #[serde(deserialize_with = "lenient::section")]
  pub operating_suggestions: BloggerSuggestions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TitleStrategies {
  #[serde(deserialize_with = "lenient::string")]
  pub intuitive: String,
  #[serde(deserialize_with = "lenient::string")]
  pub suspense: String,
  #[serde(deserialize_with = "lenient::string")]
  pub benefit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialContent {
  #[serde(deserialize_with = "lenient::string")]
  pub style: String,
  #[serde(deserialize_with = "lenient::string")]
  pub markdown_body: String,
  #[serde(deserialize_with = "lenient::string")]
  pub call_to_action: String,
  #[serde(deserialize_with = "lenient::string")]
  pub instagram_quote: String,
  #[serde(deserialize_with = "lenient::string")]
  pub instagram_caption: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThreadsPost {
  #[serde(deserialize_with = "lenient::string")]
  pub hook: String,
  #[serde(deserialize_with = "lenient::string")]
  pub content: String,
  #[serde(deserialize_with = "lenient::string")]
  pub cta: String,
  #[serde(deserialize_with = "lenient::string")]
  pub tags: String,
}

impl ThreadsPost {
  /// The post as it would be pasted into Threads
  pub fn full_text(&self) -> String {
    [&self.hook, &self.content, &self.cta, &self.tags]
      .iter()
      .filter(|part| !part.trim().is_empty())
      .map(|part| part.trim())
      .collect::<Vec<_>>()
      .join("\n\n")
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChineseVisualInstructions {
  #[serde(deserialize_with = "lenient::string")]
  pub image_prompt: String,
  #[serde(deserialize_with = "lenient::string")]
  pub image_alt_text: String,
  #[serde(deserialize_with = "lenient::string")]
  pub quote_image_prompt: String,
  #[serde(deserialize_with = "lenient::string")]
  pub story_image_prompt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialSuggestions {
  #[serde(deserialize_with = "lenient::string")]
  pub vocus_collection: String,
  #[serde(deserialize_with = "lenient::string")]
  pub interaction_question: String,
  #[serde(deserialize_with = "lenient::string")]
  pub cross_promotion_tip: String,
}

/// Traditional Chinese social media package
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChineseSocialPackage {
  #[serde(deserialize_with = "lenient::section")]
  pub title_strategies: TitleStrategies,
  #[serde(deserialize_with = "lenient::section")]
  pub content: SocialContent,
  #[serde(deserialize_with = "lenient::section")]
  pub threads_post: ThreadsPost,
  #[serde(deserialize_with = "lenient::section")]
  pub visual_instructions: ChineseVisualInstructions,
  #[serde(deserialize_with = "lenient::section")]
  pub operating_suggestions: SocialSuggestions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleMetadata {
  #[serde(deserialize_with = "lenient::string")]
  pub model_used: String,
  /// Milliseconds since the Unix epoch
  #[serde(deserialize_with = "lenient::millis")]
  pub timestamp: i64,
  #[serde(deserialize_with = "lenient::string")]
  pub original_input: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedArticle {
  #[serde(default, deserialize_with = "lenient::section")]
  pub english: EnglishBloggerPackage,
  #[serde(default, deserialize_with = "lenient::section")]
  pub chinese: ChineseSocialPackage,
  #[serde(default, deserialize_with = "lenient::section", skip_serializing_if = "Option::is_none")]
  pub metadata: Option<ArticleMetadata>,
}

impl GeneratedArticle {
  pub fn model_used(&self) -> Option<&str> {
    self.metadata.as_ref().map(|m| m.model_used.as_str())
  }

  pub fn original_input(&self) -> Option<&str> {
    self.metadata.as_ref().map(|m| m.original_input.as_str())
  }
}

/// One result of the news search helper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsItem {
  #[serde(deserialize_with = "lenient::string")]
  pub title: String,
  #[serde(deserialize_with = "lenient::string")]
  pub source: String,
  #[serde(deserialize_with = "lenient::string")]
  pub snippet: String,
  #[serde(deserialize_with = "lenient::string")]
  pub time: String,
  #[serde(deserialize_with = "lenient::optional_string", skip_serializing_if = "Option::is_none")]
  pub link: Option<String>,
}

impl NewsItem {
  /// Citation block prepended to the draft when a search result is picked
  pub fn citation(&self) -> String {
    let link = self.link.as_deref().filter(|l| !l.is_empty()).unwrap_or("無");
    format!(
      "【引用新聞素材】\n標題: {}\n摘要: {}\n連結: {}\n時間: {}\n---\n\n",
      self.title, self.snippet, link, self.time
    )
  }
}

/// A web page the model consulted while answering with search grounding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingSource {
  #[serde(deserialize_with = "lenient::string")]
  pub title: String,
  #[serde(deserialize_with = "lenient::string")]
  pub uri: String,
}
