//! Ollama-style HTTP backend for the model-backed parser.
//!
//! One request, one timeout, no retries: any failure makes the core fall
//! back to its deterministic parser.

use std::time::Duration;

use wardrobe_core::{BackendError, TextGenerationBackend};

use crate::config::LlmConfig;

pub struct HttpTextBackend {
    config: LlmConfig,
    client: reqwest::blocking::Client,
}

impl HttpTextBackend {
    pub fn new(config: LlmConfig) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }
}

impl TextGenerationBackend for HttpTextBackend {
    fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, BackendError> {
        if !self.config.enabled {
            return Err(BackendError::Disabled);
        }

        let prompt = format!("{}\n\nUser command: {}", system_prompt, user_text);
        let body = serde_json::json!({
            "model": self.config.model,
            "prompt": prompt,
            "stream": false,
        });

        let response = self
            .client
            .post(format!("{}/api/generate", self.config.endpoint))
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout(self.config.timeout_secs)
                } else {
                    BackendError::Http(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(BackendError::Http(format!("status {}", response.status())));
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| BackendError::Http(e.to_string()))?;
        let text = json
            .get("response")
            .and_then(|r| r.as_str())
            .unwrap_or("")
            .to_string();
        if text.is_empty() {
            return Err(BackendError::Empty);
        }
        Ok(text)
    }
}
