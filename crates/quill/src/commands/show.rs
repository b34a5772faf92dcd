use super::Context;
use crate::display::{self, View};
use crate::storage::HistoryEntry;
use anyhow::{anyhow, Result};

/// Entry by id prefix, or the newest one
pub fn pick_entry(ctx: &Context, id: Option<&str>) -> Result<HistoryEntry> {
  let history = ctx.history();
  match id {
    Some(id) => Ok(history.find(id)?),
    None => history.latest().ok_or_else(|| anyhow!("No history yet. Generate something with 'quill generate'.")),
  }
}

pub fn handle(ctx: &Context, id: Option<String>, view: View, json: bool) -> Result<()> {
  let entry = pick_entry(ctx, id.as_deref())?;

  if json {
    println!("{}", serde_json::to_string_pretty(&entry.data)?);
  } else {
    display::render(&entry.data, view);
  }

  // Loading a specific entry brings its material back as the draft
  if id.is_some() {
    if let Some(input) = entry.data.original_input().filter(|i| !i.trim().is_empty()) {
      ctx.drafts().save(input)?;
      herald::hint(&format!("Draft restored from {}", entry.id));
    }
  }
  Ok(())
}
