use super::Context;
use crate::config::Config;
use anyhow::{anyhow, Result};

pub fn show(ctx: &Context) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(&ctx.config)?);
  herald::hint(&format!("Loaded from {}", Config::default_path().display()));
  Ok(())
}

pub fn init(force: bool) -> Result<()> {
  let path = Config::default_path();
  if path.exists() && !force {
    return Err(anyhow!("{} already exists. Pass --force to overwrite it.", path.display()));
  }

  Config::default().save_to_file(&path)?;
  herald::success(&format!("Wrote default configuration to {}", path.display()));
  Ok(())
}
