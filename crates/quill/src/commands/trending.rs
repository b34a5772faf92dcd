use super::Context;
use crate::news;
use anyhow::Result;

pub async fn handle(ctx: &Context, model: Option<String>) -> Result<()> {
  let model = ctx.search_model(model.as_deref());
  let generator = ctx.generator()?;

  herald::info("Fetching trending keywords in Taiwan...");
  let topics = news::trending_topics(generator.as_ref(), &model).await?;

  if topics.is_empty() {
    herald::warn("No trending keywords came back. Try again in a moment.");
    return Ok(());
  }

  for (index, topic) in topics.iter().enumerate() {
    println!("{:>2}. {topic}", index + 1);
  }
  herald::hint("Search one with: quill search KEYWORD");
  Ok(())
}
