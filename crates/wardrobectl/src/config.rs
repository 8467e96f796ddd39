//! wardrobectl configuration.
//!
//! A TOML file under the XDG config directory decides whether the
//! model-backed parser is wired in at all. No configuration file means
//! deterministic parsing only.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// LLM backend settings, Ollama-style endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "http://127.0.0.1:11434".to_string(),
            model: "llama3.2:3b".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CtlConfig {
    pub llm: LlmConfig,
}

impl CtlConfig {
    /// Config file location: `WARDROBECTL_CONFIG` when set, otherwise the
    /// XDG config directory.
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("WARDROBECTL_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("wardrobectl").join("config.toml"))
    }

    /// Missing file means defaults; a malformed file is a hard error so a
    /// typo does not silently disable the backend. `WARDROBECTL_LLM_*`
    /// environment variables take precedence over the file.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
            }
            _ => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Per-field overrides; unparseable boolean/number values are ignored
    /// rather than failing the command.
    fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(enabled) = get("WARDROBECTL_LLM_ENABLED").and_then(|v| v.parse().ok()) {
            self.llm.enabled = enabled;
        }
        if let Some(endpoint) = get("WARDROBECTL_LLM_ENDPOINT") {
            self.llm.endpoint = endpoint;
        }
        if let Some(model) = get("WARDROBECTL_LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(timeout) = get("WARDROBECTL_LLM_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.llm.timeout_secs = timeout;
        }
    }
}
