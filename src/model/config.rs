use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Subsequence matching instead of substring matching
    #[serde(default)]
    pub fuzzy: bool,
    /// Also search the diff and raw text of each task
    #[serde(default)]
    pub full_content: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub wrap_details: bool,
    /// Hex color overrides keyed by theme slot (`ok`, `failed`, `header_bg`, ...)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            wrap_details: true,
            colors: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Where `--debug` appends diagnostics; `debug.log` when unset
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: ViewerConfig = toml::from_str("").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert!(config.ui.wrap_details);
        assert!(!config.filter.fuzzy);
    }

    #[test]
    fn partial_document() {
        let config: ViewerConfig = toml::from_str(
            r##"
[filter]
fuzzy = true

[ui.colors]
failed = "#AA0000"

[debug]
log_file = "/tmp/alv.log"
"##,
        )
        .unwrap();
        assert!(config.filter.fuzzy);
        assert!(!config.filter.full_content);
        assert!(config.ui.wrap_details);
        assert_eq!(config.ui.colors.get("failed").map(String::as_str), Some("#AA0000"));
        assert_eq!(config.debug.log_file.as_deref(), Some("/tmp/alv.log"));
    }
}
