use super::{confirm, Context};
use anyhow::Result;
use colored::Colorize;

pub fn list(ctx: &Context) -> Result<()> {
  let entries = ctx.history().entries();
  if entries.is_empty() {
    herald::info("No history yet.");
    return Ok(());
  }

  for entry in &entries {
    println!(
      "{}  {}  {}  {}",
      entry.id.yellow(),
      entry.local_time().dimmed(),
      crate::gemini::models::badge(&entry.model_used).cyan(),
      entry.title
    );
  }
  herald::hint("Open one with: quill show ID");
  Ok(())
}

pub fn clear(ctx: &Context, force: bool) -> Result<()> {
  if !force && !confirm("Delete all generation history? This cannot be undone.")? {
    herald::info("History kept. Pass --force to clear without asking.");
    return Ok(());
  }

  ctx.history().clear()?;
  herald::success("History cleared");
  Ok(())
}
