use crate::article::GeneratedArticle;
use crate::gemini::models;
use clap::ValueEnum;
use colored::Colorize;
use regex::Regex;
use std::sync::LazyLock;

pub mod chinese;
pub mod english;

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"###\s?").expect("valid heading regex"));
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid url regex"));

/// Swap leftover markdown headings for 📌 and list commas for ✨
pub fn format_emoji_text(text: &str) -> String {
  HEADING.replace_all(text, "📌 ").replace('、', " ✨ ")
}

/// Piece of text that is either plain or a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
  Text(&'a str),
  Link(&'a str),
}

pub fn split_links(text: &str) -> Vec<Segment<'_>> {
  let mut segments = Vec::new();
  let mut last = 0;

  for found in URL.find_iter(text) {
    if found.start() > last {
      segments.push(Segment::Text(&text[last..found.start()]));
    }
    segments.push(Segment::Link(found.as_str()));
    last = found.end();
  }

  if last < text.len() {
    segments.push(Segment::Text(&text[last..]));
  }
  segments
}

/// Underline links so they stand out in the terminal
pub fn linkify(text: &str) -> String {
  split_links(text)
    .into_iter()
    .map(|segment| match segment {
      Segment::Text(t) => t.to_string(),
      Segment::Link(url) => url.cyan().underline().to_string(),
    })
    .collect()
}

/// Break a single line at `width` display columns. ASCII words stay whole,
/// wide characters may break anywhere.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
  let width = width.max(1);
  if console::measure_text_width(line) <= width {
    return vec![line.to_string()];
  }

  let mut tokens: Vec<String> = Vec::new();
  let mut word = String::new();
  for c in line.chars() {
    if c.is_ascii() && !c.is_ascii_whitespace() {
      word.push(c);
      continue;
    }
    if !word.is_empty() {
      tokens.push(std::mem::take(&mut word));
    }
    tokens.push(c.to_string());
  }
  if !word.is_empty() {
    tokens.push(word);
  }

  let mut lines = Vec::new();
  let mut current = String::new();
  let mut current_width = 0;

  for token in tokens {
    let token_width = console::measure_text_width(&token);
    if current_width + token_width > width && !current.is_empty() {
      lines.push(current.trim_end().to_string());
      current.clear();
      current_width = 0;
      if token.trim().is_empty() {
        continue;
      }
    }
    current.push_str(&token);
    current_width += token_width;
  }

  if !current.trim().is_empty() {
    lines.push(current.trim_end().to_string());
  }
  lines
}

/// Print body text wrapped to the terminal, links highlighted
pub fn print_body(text: &str) {
  let width = herald::content_width();
  for line in text.lines() {
    if line.trim().is_empty() {
      println!();
      continue;
    }
    for wrapped in wrap_line(line, width) {
      println!("{}", linkify(&wrapped));
    }
  }
}

pub fn print_heading(title: &str) {
  println!();
  println!("{}", title.bold());
  println!("{}", herald::banner_line(herald::content_width().min(60), '─'));
}

pub fn print_field(label: &str, value: &str) {
  let value = if value.trim().is_empty() { "-" } else { value };
  println!("{} {}", format!("{label}:").dimmed(), linkify(value));
}

/// "Generated by 3-FLASH-PREVIEW · 2025-01-02 10:30" when metadata exists
pub fn generated_by(article: &GeneratedArticle) -> Option<String> {
  let metadata = article.metadata.as_ref()?;
  let time = chrono::DateTime::from_timestamp_millis(metadata.timestamp)?
    .with_timezone(&chrono::Local)
    .format("%Y-%m-%d %H:%M");
  Some(format!("Generated by {} · {time}", models::badge(&metadata.model_used)))
}

/// Which view of the bundle to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum View {
  #[default]
  Both,
  English,
  Chinese,
}

pub fn render(article: &GeneratedArticle, view: View) {
  if let Some(banner) = generated_by(article) {
    herald::hint(&banner);
  }

  match view {
    View::English => english::render(&article.english),
    View::Chinese => chinese::render(&article.chinese),
    View::Both => {
      english::render(&article.english);
      chinese::render(&article.chinese);
    }
  }
}

/// Copyable piece of a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
  Slug,
  Description,
  Labels,
  ImagePrompt,
  AltText,
  Html,
  TitleIntuitive,
  TitleSuspense,
  TitleBenefit,
  Threads,
  Body,
  IgCaption,
  IgQuote,
  ZhImagePrompt,
  QuoteImagePrompt,
  StoryImagePrompt,
}

impl Section {
  pub fn label(&self) -> &'static str {
    match self {
      Section::Slug => "Permalink slug",
      Section::Description => "Search description",
      Section::Labels => "Labels",
      Section::ImagePrompt => "Image prompt",
      Section::AltText => "Image alt text",
      Section::Html => "Article HTML",
      Section::TitleIntuitive => "直覺型標題",
      Section::TitleSuspense => "懸念型標題",
      Section::TitleBenefit => "利益型標題",
      Section::Threads => "Threads 貼文",
      Section::Body => "內文",
      Section::IgCaption => "IG 說明",
      Section::IgQuote => "IG 金句",
      Section::ZhImagePrompt => "主視覺提示詞",
      Section::QuoteImagePrompt => "金句圖提示詞",
      Section::StoryImagePrompt => "限動圖提示詞",
    }
  }

  /// Text placed on the clipboard. Chinese sections are emoji-formatted.
  pub fn copy_text(&self, article: &GeneratedArticle) -> String {
    let en = &article.english;
    let zh = &article.chinese;

    match self {
      Section::Slug => en.seo_strategy.permalink_slug.clone(),
      Section::Description => en.seo_strategy.search_description.clone(),
      Section::Labels => en.seo_strategy.labels.join(", "),
      Section::ImagePrompt => en.visual_instructions.image_prompt.clone(),
      Section::AltText => en.visual_instructions.image_alt_text.clone(),
      Section::Html => en.article_content.full_html.clone(),
      Section::TitleIntuitive => format_emoji_text(&zh.title_strategies.intuitive),
      Section::TitleSuspense => format_emoji_text(&zh.title_strategies.suspense),
      Section::TitleBenefit => format_emoji_text(&zh.title_strategies.benefit),
      Section::Threads => format_emoji_text(&zh.threads_post.full_text()),
      Section::Body => format_emoji_text(&zh.content.markdown_body),
      Section::IgCaption => format_emoji_text(&zh.content.instagram_caption),
      Section::IgQuote => format_emoji_text(&zh.content.instagram_quote),
      Section::ZhImagePrompt => format_emoji_text(&zh.visual_instructions.image_prompt),
      Section::QuoteImagePrompt => format_emoji_text(&zh.visual_instructions.quote_image_prompt),
      Section::StoryImagePrompt => format_emoji_text(&zh.visual_instructions.story_image_prompt),
    }
  }

  pub fn name(&self) -> String {
    self.to_possible_value().map(|v| v.get_name().to_string()).unwrap_or_default()
  }
}
