use super::show::pick_entry;
use super::Context;
use crate::display::Section;
use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::{self, Write};

/// OSC 52 escape asking the terminal to put `text` on the clipboard
pub fn osc52_sequence(text: &str) -> String {
  format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

pub fn handle(ctx: &Context, section: Section, id: Option<String>, to_stdout: bool) -> Result<()> {
  let entry = pick_entry(ctx, id.as_deref())?;
  let text = section.copy_text(&entry.data);

  if text.trim().is_empty() {
    herald::warn(&format!("{} is empty in this result", section.label()));
    return Ok(());
  }

  let mut stdout = io::stdout().lock();
  if to_stdout || !console::Term::stdout().is_term() {
    write!(stdout, "{text}")?;
    stdout.flush()?;
    return Ok(());
  }

  write!(stdout, "{}", osc52_sequence(&text))?;
  stdout.flush()?;
  herald::success(&format!("Copied {} ({} chars)", section.label(), text.chars().count()));
  Ok(())
}
