use super::{confirm, Context};
use anyhow::{anyhow, Result};

pub fn show(ctx: &Context) -> Result<()> {
  match ctx.drafts().load() {
    Some(draft) => println!("{draft}"),
    None => herald::info("No saved draft."),
  }
  Ok(())
}

pub fn set(ctx: &Context, text: String) -> Result<()> {
  if text.trim().is_empty() {
    return Err(anyhow!("Draft text is empty"));
  }
  ctx.drafts().save(&text)?;
  herald::success("Draft saved");
  Ok(())
}

pub fn clear(ctx: &Context, force: bool) -> Result<()> {
  if !force && !confirm("Delete the saved draft? This cannot be undone.")? {
    herald::info("Draft kept. Pass --force to clear without asking.");
    return Ok(());
  }

  ctx.drafts().clear()?;
  herald::success("Draft cleared");
  Ok(())
}
