use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::ViewerConfig;

/// Error type for reading the viewer configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Get the default config file path, respecting XDG_CONFIG_HOME
pub fn default_config_path() -> PathBuf {
    config_path_from(
        std::env::var("XDG_CONFIG_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

fn config_path_from(xdg_config_home: Option<String>, home: Option<String>) -> PathBuf {
    let config_dir = xdg_config_home
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            home.map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("/"))
                .join(".config")
        });
    config_dir.join("ansible-logs-view").join("config.toml")
}

/// Read and parse a config file at a specific path.
pub fn read_config_from(path: &Path) -> Result<ViewerConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the configuration. An explicitly named file must exist; the
/// default location is optional and falls back to built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<ViewerConfig, ConfigError> {
    match explicit {
        Some(path) => read_config_from(path),
        None => {
            let path = default_config_path();
            if path.exists() {
                read_config_from(&path)
            } else {
                Ok(ViewerConfig::default())
            }
        }
    }
}
