use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::backend::http::DEFAULT_BASE_URL;
use crate::backend::window::{WindowMode, DEFAULT_WINDOW, MAX_WINDOW, MIN_WINDOW};
use crate::backend::ModelTier;
use crate::session::RequestConfig;

pub const BASE_URL_ENV: &str = "CHATSUM_API_BASE";

/// `[backend]` block from config.toml.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct BackendConfig {
    pub base_url: Option<String>,
}

/// `[defaults]` block: request settings used when no flag overrides them.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct DefaultsConfig {
    pub model: Option<String>,
    /// `"all"` or a message count.
    pub window: Option<toml::Value>,
    pub min_window: Option<u32>,
    pub max_window: Option<u32>,
}

/// Top-level chatsum config file structure.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct ChatsumConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

impl ChatsumConfig {
    /// Load config from `path`. Returns default if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(ChatsumConfig::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ChatsumConfig = toml::from_str(content)?;
        if let Some(ref model) = config.defaults.model {
            if ModelTier::from_str(model).is_none() {
                bail!("Unknown model \"{model}\". Use: fast, accurate");
            }
        }
        Ok(config)
    }

    /// Request settings from the `[defaults]` block, filling gaps with built-ins.
    pub fn request_config(&self) -> RequestConfig {
        let d = &self.defaults;
        let mut rc = RequestConfig {
            model: d
                .model
                .as_deref()
                .and_then(ModelTier::from_str)
                .unwrap_or_default(),
            min_window: d.min_window.unwrap_or(MIN_WINDOW),
            max_window: d.max_window.unwrap_or(MAX_WINDOW),
            ..RequestConfig::default()
        };

        match &d.window {
            Some(toml::Value::Integer(n)) => {
                rc.window_mode = WindowMode::Recent;
                rc.window_input = n.to_string();
            }
            Some(toml::Value::String(s)) if !s.trim().eq_ignore_ascii_case("all") => {
                rc.window_mode = WindowMode::Recent;
                rc.window_input = s.trim().to_string();
            }
            _ => {
                rc.window_mode = WindowMode::All;
                rc.window_input = DEFAULT_WINDOW.to_string();
            }
        }

        rc
    }

    /// Display the effective configuration.
    pub fn display(&self, base_url: &str) -> String {
        let rc = self.request_config();
        let window = match rc.window_mode {
            WindowMode::All => "all".to_string(),
            WindowMode::Recent => format!("last {}", rc.effective_window()),
        };
        [
            "[backend]".to_string(),
            format!("  base_url = \"{base_url}\""),
            "[defaults]".to_string(),
            format!("  model = \"{}\"", rc.model.as_str()),
            format!("  window = \"{window}\""),
            format!("  min_window = {}", rc.min_window),
            format!("  max_window = {}", rc.max_window),
        ]
        .join("\n")
    }
}

/// Resolve the backend base URL: CLI flag > env var > config file > built-in default.
pub fn resolve_base_url(cli_flag: Option<&str>, config: &ChatsumConfig) -> String {
    // 1. CLI flag
    if let Some(url) = cli_flag {
        if !url.trim().is_empty() {
            return normalize_url(url);
        }
    }

    // 2. Environment variable
    if let Ok(val) = std::env::var(BASE_URL_ENV) {
        if !val.trim().is_empty() {
            return normalize_url(&val);
        }
    }

    // 3. Config file
    if let Some(ref url) = config.backend.base_url {
        if !url.trim().is_empty() {
            return normalize_url(url);
        }
    }

    DEFAULT_BASE_URL.to_string()
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Path to the config file: ~/.chatsum/config.toml
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".chatsum").join("config.toml"))
}

/// Default config template content.
pub fn default_config_template() -> &'static str {
    r#"# ~/.chatsum/config.toml
# Backend resolution order: --api-base > CHATSUM_API_BASE > base_url

[backend]
# base_url = "http://localhost:8000"

[defaults]
# model = "accurate"   # fast | accurate
# window = "all"       # "all" or the number of most recent messages
# min_window = 10
# max_window = 2000
"#
}

/// Create the config file at `path` if it doesn't already exist.
pub fn init_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, default_config_template())
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_to_defaults() {
        let config = ChatsumConfig::from_toml(default_config_template()).unwrap();
        assert_eq!(config.request_config(), RequestConfig::default());
    }

    #[test]
    fn defaults_block_shapes_request_config() {
        let config = ChatsumConfig::from_toml(
            "[defaults]\nmodel = \"fast\"\nwindow = 300\nmin_window = 20\nmax_window = 400\n",
        )
        .unwrap();
        let rc = config.request_config();

        assert_eq!(rc.model, ModelTier::Fast);
        assert_eq!(rc.window_mode, WindowMode::Recent);
        assert_eq!(rc.effective_window(), 300);
        assert_eq!(rc.min_window, 20);
    }

    #[test]
    fn window_all_string_means_no_trimming() {
        let config = ChatsumConfig::from_toml("[defaults]\nwindow = \"ALL\"\n").unwrap();
        assert_eq!(config.request_config().effective_window(), 0);
    }

    #[test]
    fn unknown_model_is_rejected() {
        assert!(ChatsumConfig::from_toml("[defaults]\nmodel = \"turbo\"\n").is_err());
    }

    #[test]
    fn base_url_flag_wins_and_is_normalized() {
        let config = ChatsumConfig {
            backend: BackendConfig {
                base_url: Some("http://config:8000".to_string()),
            },
            ..Default::default()
        };
        assert_eq!(
            resolve_base_url(Some(" https://tunnel.ngrok.dev/ "), &config),
            "https://tunnel.ngrok.dev"
        );
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ChatsumConfig::load(&dir.path().join("nope.toml")).unwrap();
        assert!(config.backend.base_url.is_none());
    }

    #[test]
    fn init_writes_template_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        assert!(init_config(&path).unwrap());
        assert!(!init_config(&path).unwrap());
        assert!(ChatsumConfig::load(&path).is_ok());
    }
}
