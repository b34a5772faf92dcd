use super::Context;
use crate::credentials::{self, mask_key};
use anyhow::{anyhow, Result};

pub fn set(ctx: &Context, key: Option<String>) -> Result<()> {
  let store = ctx.credentials();
  match key {
    Some(key) => {
      store.save(&key)?;
      herald::success(&format!("API key saved to {}", store.path().display()));
    }
    None if herald::is_attended() => {
      credentials::prompt_for_key(&store)?;
    }
    None => return Err(anyhow!("Pass the key as an argument when not running in a terminal")),
  }
  Ok(())
}

pub fn clear(ctx: &Context) -> Result<()> {
  if ctx.credentials().clear()? {
    herald::success("Stored API key removed");
  } else {
    herald::info("No stored API key");
  }
  Ok(())
}

pub fn status(ctx: &Context) -> Result<()> {
  match credentials::resolve_api_key(ctx.explicit_key(), &ctx.credentials()) {
    Some((key, source)) => herald::info(&format!("Using {} from {}", mask_key(&key), source.describe())),
    None => herald::warn("No API key configured. Run 'quill key set' or export GEMINI_API_KEY."),
  }
  Ok(())
}
