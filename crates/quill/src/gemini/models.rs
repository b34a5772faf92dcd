/// A Gemini model Quill knows how to describe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
  pub id: &'static str,
  pub name: &'static str,
  pub label: &'static str,
  pub speed: &'static str,
  pub reasoning: &'static str,
  pub stability: &'static str,
  pub best_for: &'static str,
}

pub const PRO_3: &str = "gemini-3-pro-preview";
pub const FLASH_3: &str = "gemini-3-flash-preview";
pub const FLASH_2_5: &str = "gemini-2.5-flash-preview-09-2025";
pub const FLASH_2_0: &str = "gemini-2.0-flash-exp";
pub const LITE_2_5: &str = "gemini-flash-lite-latest";

pub const DEFAULT_MODEL: &str = FLASH_3;

pub const CATALOGUE: &[ModelInfo] = &[
  ModelInfo {
    id: PRO_3,
    name: "Gemini 3 Pro",
    label: "Preview (巔峰推理)",
    speed: "🚀🚀🚀",
    reasoning: "⭐⭐⭐⭐⭐",
    stability: "💎💎",
    best_for: "需要最強大的邏輯推理、長篇深度文章與專業洞察。",
  },
  ModelInfo {
    id: FLASH_3,
    name: "Gemini 3 Flash",
    label: "Stable (穩定極速)",
    speed: "🚀🚀🚀🚀🚀",
    reasoning: "⭐⭐⭐",
    stability: "💎💎💎💎💎",
    best_for: "追求快速生成、結合 Google Search 熱搜時事。",
  },
  ModelInfo {
    id: FLASH_2_5,
    name: "Gemini 2.5 Flash",
    label: "Enhanced (增強穩定)",
    speed: "🚀🚀🚀🚀",
    reasoning: "⭐⭐⭐⭐",
    stability: "💎💎💎💎",
    best_for: "長文本處理、雙語轉換最自然、長度控制極佳。",
  },
  ModelInfo {
    id: FLASH_2_0,
    name: "Gemini 2.0 Flash",
    label: "Exp (經典平衡)",
    speed: "🚀🚀🚀🚀🚀",
    reasoning: "⭐⭐⭐",
    stability: "💎💎💎",
    best_for: "經典的 2.0 版本，反應極快，適合一般日常內容。",
  },
  ModelInfo {
    id: LITE_2_5,
    name: "Gemini Flash Lite",
    label: "Lite (高效輕量)",
    speed: "🚀🚀🚀🚀🚀",
    reasoning: "⭐⭐",
    stability: "💎💎💎💎💎",
    best_for: "簡單摘要任務、基礎翻譯與低功耗生成。",
  },
];

/// Look a model up by full id or by a short alias such as `pro-3`, `flash-3`,
/// `2.5`, `2.0` or `lite`. Unknown names return `None`.
pub fn lookup(name: &str) -> Option<&'static ModelInfo> {
  let key = name.trim().to_lowercase();
  let id = match key.as_str() {
    "pro" | "pro-3" | "3-pro" => PRO_3,
    "flash" | "flash-3" | "3-flash" => FLASH_3,
    "2.5" | "flash-2.5" | "v2.5" => FLASH_2_5,
    "2.0" | "flash-2.0" => FLASH_2_0,
    "lite" | "flash-lite" => LITE_2_5,
    other => other,
  };
  CATALOGUE.iter().find(|m| m.id == id)
}

/// Resolve a user-supplied model name to the id sent to the API.
/// Aliases expand to their catalogue id; anything else passes through so new
/// models work without a release.
pub fn resolve_model_id(name: &str) -> String {
  lookup(name).map(|m| m.id.to_string()).unwrap_or_else(|| name.trim().to_string())
}

/// Short badge for a model id, e.g. `3-FLASH-PREVIEW` for `gemini-3-flash-preview`
pub fn badge(model_id: &str) -> String {
  model_id.trim_start_matches("gemini-").to_uppercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_lookup_by_id_and_alias() {
    assert_eq!(lookup(FLASH_3).map(|m| m.name), Some("Gemini 3 Flash"));
    assert_eq!(lookup("pro").map(|m| m.id), Some(PRO_3));
    assert_eq!(lookup(" Lite ").map(|m| m.id), Some(LITE_2_5));
    assert!(lookup("gpt-4").is_none());
  }

  #[test]
  fn test_resolve_passes_unknown_through() {
    assert_eq!(resolve_model_id("2.0"), FLASH_2_0);
    assert_eq!(resolve_model_id("gemini-9-ultra"), "gemini-9-ultra");
  }

  #[test]
  fn test_badge() {
    assert_eq!(badge("gemini-3-pro-preview"), "3-PRO-PREVIEW");
    assert_eq!(badge("custom"), "CUSTOM");
  }

  #[test]
  fn test_default_model_is_catalogued() {
    assert!(lookup(DEFAULT_MODEL).is_some());
  }
}
