use anyhow::{anyhow, Result};
use std::env;

pub const OPENAI_HOST: &str = "https://api.openai.com";

/// Connection configuration for the OpenAI chat completions API.
#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
}

impl OpenAiProviderConfig {
    pub fn new(host: String, api_key: String, model: String) -> Self {
        Self {
            host,
            api_key,
            model,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Load the configuration for `model` from the environment.
    ///
    /// `OPENAI_API_KEY` is required; `OPENAI_API_HOST` falls back to the
    /// public endpoint.
    pub fn from_env(model: &str) -> Result<Self> {
        let api_key = get_env("OPENAI_API_KEY", true, None)?
            .ok_or_else(|| anyhow!("OpenAI API key should be present"))?;

        let host = get_env("OPENAI_API_HOST", false, Some(OPENAI_HOST.to_string()))?
            .unwrap_or_else(|| OPENAI_HOST.to_string());

        Ok(Self::new(host, api_key, model.to_string()))
    }
}

/// Read an environment variable with required/default handling
fn get_env(key: &str, required: bool, default: Option<String>) -> Result<Option<String>> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) if !required => Ok(default),
        Err(env::VarError::NotPresent) => Err(anyhow!(
            "Environment variable '{}' is required but not set.",
            key
        )),
        Err(e) => Err(e.into()),
    }
}
