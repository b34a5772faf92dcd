use super::{format_emoji_text, print_body, print_field, print_heading};
use crate::article::ChineseSocialPackage;
use colored::Colorize;

/// Social media package in Traditional Chinese
pub fn render(package: &ChineseSocialPackage) {
  herald::announce("中文 · 社群行銷包");

  let titles = &package.title_strategies;
  print_heading("標題策略");
  print_field("直覺型", &format_emoji_text(&titles.intuitive));
  print_field("懸念型", &format_emoji_text(&titles.suspense));
  print_field("利益型", &format_emoji_text(&titles.benefit));

  let content = &package.content;
  print_heading("內文");
  if !content.style.trim().is_empty() {
    herald::hint(&format!("風格：{}", content.style));
  }
  print_body(&format_emoji_text(&content.markdown_body));
  if !content.call_to_action.trim().is_empty() {
    println!();
    println!("{}", format_emoji_text(&content.call_to_action).green());
  }

  print_heading("Threads 貼文");
  print_body(&format_emoji_text(&package.threads_post.full_text()));

  print_heading("Instagram");
  print_field("金句", &format_emoji_text(&content.instagram_quote));
  print_body(&format_emoji_text(&content.instagram_caption));

  let visual = &package.visual_instructions;
  print_heading("視覺指令");
  print_field("主視覺", &visual.image_prompt);
  print_field("替代文字", &visual.image_alt_text);
  print_field("金句圖", &visual.quote_image_prompt);
  print_field("限動圖", &visual.story_image_prompt);

  let tips = &package.operating_suggestions;
  print_heading("經營建議");
  print_field("方格子專題", &tips.vocus_collection);
  print_field("互動提問", &tips.interaction_question);
  print_field("跨平台推廣", &tips.cross_promotion_tip);
}
