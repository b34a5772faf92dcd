//! Best-effort JSON extraction from model output.
//!
//! Models are asked for JSON but routinely wrap it in markdown fences or
//! surround it with prose. [`extract_json`] makes a single pass:
//!
//! 1. strip every "```json" / "```" fence marker and parse the rest strictly;
//! 2. otherwise take the first `[...]` or `{...}` span of the original text
//!    (greedy, first opening bracket to last matching closing character) and
//!    parse that;
//! 3. otherwise give up with `None`.
//!
//! Step 2 always takes the first match. Prose that contains an unrelated
//! bracket before the real payload makes the span wrong and extraction
//! fails or returns the wrong value. Callers must validate the shape of what
//! they get back.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static FENCE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"```json\n?|```").expect("fence pattern is valid"));

static FIRST_SPAN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?s)(\[.*\]|\{.*\})").expect("span pattern is valid"));

/// Parse the JSON payload out of raw model text.
pub fn extract_json(text: Option<&str>) -> Option<Value> {
  let text = text?;
  if text.is_empty() {
    return None;
  }

  let cleaned = FENCE.replace_all(text, "");
  if let Ok(value) = serde_json::from_str(cleaned.trim()) {
    return Some(value);
  }

  let span = FIRST_SPAN.find(text)?;
  match serde_json::from_str(span.as_str()) {
    Ok(value) => Some(value),
    Err(err) => {
      tracing::debug!("fallback JSON span did not parse: {err}");
      None
    }
  }
}
