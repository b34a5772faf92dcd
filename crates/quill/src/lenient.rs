//! Field deserializers that never fail.
//!
//! Model output is loosely typed: a field may come back as `null`, a number
//! where text was asked for, or an object where a list was expected. These
//! helpers turn anything unusable into the empty value for the field.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn text(value: Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    _ => None,
  }
}

/// Text leaf; numbers and booleans are kept as their JSON text
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
  Ok(text(Value::deserialize(deserializer)?).unwrap_or_default())
}

pub fn optional_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
  Ok(text(Value::deserialize(deserializer)?))
}

/// List of text; a lone string becomes a one-item list
pub fn strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
  Ok(match Value::deserialize(deserializer)? {
    Value::Array(items) => items.into_iter().filter_map(text).collect(),
    Value::String(s) if !s.trim().is_empty() => vec![s],
    _ => Vec::new(),
  })
}

/// Millisecond timestamps, also accepted as floats or numeric strings
pub fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
  Ok(match Value::deserialize(deserializer)? {
    Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or_default(),
    Value::String(s) => s.trim().parse().unwrap_or_default(),
    _ => 0,
  })
}

/// Nested record; a value of the wrong shape becomes the default record
pub fn section<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: DeserializeOwned + Default,
{
  Ok(serde_json::from_value(Value::deserialize(deserializer)?).unwrap_or_default())
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[derive(Debug, Default, Deserialize)]
  #[serde(default)]
  struct Record {
    #[serde(deserialize_with = "string")]
    name: String,
    #[serde(deserialize_with = "strings")]
    tags: Vec<String>,
    #[serde(deserialize_with = "millis")]
    at: i64,
    #[serde(deserialize_with = "optional_string")]
    link: Option<String>,
  }

  #[test]
  fn test_null_leaves_become_empty() {
    let record: Record =
      serde_json::from_value(json!({ "name": null, "tags": null, "at": null, "link": null })).unwrap();
    assert_eq!(record.name, "");
    assert!(record.tags.is_empty());
    assert_eq!(record.at, 0);
    assert_eq!(record.link, None);
  }

  #[test]
  fn test_wrong_types_are_coerced_or_dropped() {
    let record: Record = serde_json::from_value(json!({
      "name": 42,
      "tags": ["a", 1, null, { "x": 1 }],
      "at": "1700000000000",
      "link": ["not", "a", "link"]
    }))
    .unwrap();
    assert_eq!(record.name, "42");
    assert_eq!(record.tags, vec!["a".to_string(), "1".to_string()]);
    assert_eq!(record.at, 1_700_000_000_000);
    assert_eq!(record.link, None);
  }

  #[test]
  fn test_single_string_becomes_list() {
    let record: Record = serde_json::from_value(json!({ "tags": "solo", "at": 12.9 })).unwrap();
    assert_eq!(record.tags, vec!["solo".to_string()]);
    assert_eq!(record.at, 12);
  }
}
