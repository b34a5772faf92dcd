use super::{format_emoji_text, print_body, print_field, print_heading};
use crate::article::EnglishBloggerPackage;
use colored::Colorize;

/// Copy of `package` with the prose fields run through the emoji formatter
pub fn formatted(package: &EnglishBloggerPackage) -> EnglishBloggerPackage {
  let mut package = package.clone();
  let seo = &mut package.seo_strategy;
  seo.search_description = format_emoji_text(&seo.search_description);

  let article = &mut package.article_content;
  article.h1_title = format_emoji_text(&article.h1_title);

  let tips = &mut package.operating_suggestions;
  tips.internal_link_tip = format_emoji_text(&tips.internal_link_tip);
  tips.traffic_growth_tip = format_emoji_text(&tips.traffic_growth_tip);
  package
}

/// Blogger SEO package
pub fn render(package: &EnglishBloggerPackage) {
  herald::announce("English · Blogger SEO package");
  let package = formatted(package);

  let seo = &package.seo_strategy;
  print_heading("SEO strategy");
  print_field("Permalink", &seo.permalink_slug);
  print_field("Search description", &seo.search_description);
  print_field("Labels", &seo.labels.join(", "));

  let visual = &package.visual_instructions;
  print_heading("Featured image");
  print_field("Prompt", &visual.image_prompt);
  print_field("Alt text", &visual.image_alt_text);

  let article = &package.article_content;
  print_heading("Article");
  if !article.h1_title.trim().is_empty() {
    println!("{}", article.h1_title.bold());
    println!();
  }
  print_body(&article.full_html);

  let tips = &package.operating_suggestions;
  print_heading("Operating suggestions");
  if !tips.long_tail_keywords.is_empty() {
    println!("{}", "Long-tail keywords:".dimmed());
    for keyword in &tips.long_tail_keywords {
      println!("  • {keyword}");
    }
  }
  print_field("Internal links", &tips.internal_link_tip);
  print_field("Traffic growth", &tips.traffic_growth_tip);
}
