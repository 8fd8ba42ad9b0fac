use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use super::base::{AgentModel, AgentModelConfig, Model};
use super::configs::OpenAiProviderConfig;
use super::utils::{
    check_openai_context_length_error, messages_to_openai_spec, openai_response_to_message,
    tools_to_openai_spec,
};
use crate::models::message::{LlmMessage, Message};
use crate::models::tool::ToolDefinition;

pub struct OpenAiModel {
    client: Client,
    config: OpenAiProviderConfig,
}

impl OpenAiModel {
    pub fn new(config: OpenAiProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    /// Build a model for `model` with credentials sourced from the environment
    pub fn from_env(model: &str) -> Result<Self> {
        Self::new(OpenAiProviderConfig::from_env(model)?)
    }
}

impl Model for OpenAiModel {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn agent_model(
        &self,
        allow_text_result: bool,
        tools: &[ToolDefinition],
        result_tool_name: Option<&str>,
    ) -> Result<Box<dyn AgentModel>> {
        let tools_spec = if tools.is_empty() {
            Vec::new()
        } else {
            tools_to_openai_spec(tools, result_tool_name)?
        };

        // Leave tool_choice absent when a text result is allowed so the
        // provider default (auto) applies
        let tool_choice = if tools_spec.is_empty() || allow_text_result {
            None
        } else {
            Some(json!("required"))
        };

        Ok(Box::new(OpenAiAgentModel {
            client: self.client.clone(),
            provider_config: self.config.clone(),
            config: AgentModelConfig::new(allow_text_result, tools, result_tool_name),
            tools_spec,
            tool_choice,
        }))
    }
}

/// OpenAI model bound to one agent configuration.
///
/// Holds no mutable state, so concurrent `request` calls on one instance
/// are safe.
pub struct OpenAiAgentModel {
    client: Client,
    provider_config: OpenAiProviderConfig,
    config: AgentModelConfig,
    tools_spec: Vec<Value>,
    tool_choice: Option<Value>,
}

impl OpenAiAgentModel {
    async fn post(&self, payload: Value) -> Result<Value> {
        let url = format!(
            "{}/v1/chat/completions",
            self.provider_config.host.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.provider_config.api_key),
            )
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status if status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() >= 500 => {
                Err(anyhow!("Server error: {}", status))
            }
            _ => Err(anyhow!(
                "Request failed: {}\nPayload: {}",
                response.status(),
                payload
            )),
        }
    }
}

#[async_trait]
impl AgentModel for OpenAiAgentModel {
    fn config(&self) -> &AgentModelConfig {
        &self.config
    }

    async fn request(&self, messages: &[Message]) -> Result<LlmMessage> {
        let messages_spec = messages_to_openai_spec(messages);

        let mut payload = json!({
            "model": self.provider_config.model,
            "messages": messages_spec
        });

        // Add the pre-encoded tool configuration and optional parameters
        if !self.tools_spec.is_empty() {
            payload
                .as_object_mut()
                .unwrap()
                .insert("tools".to_string(), json!(self.tools_spec));
        }
        if let Some(choice) = &self.tool_choice {
            payload
                .as_object_mut()
                .unwrap()
                .insert("tool_choice".to_string(), choice.clone());
        }
        if let Some(temp) = self.provider_config.temperature {
            payload
                .as_object_mut()
                .unwrap()
                .insert("temperature".to_string(), json!(temp));
        }
        if let Some(tokens) = self.provider_config.max_tokens {
            payload
                .as_object_mut()
                .unwrap()
                .insert("max_tokens".to_string(), json!(tokens));
        }

        debug!(model = %self.provider_config.model, "sending chat completion request");
        let response = self.post(payload).await?;

        // Raise specific error if context length is exceeded
        if let Some(error) = response.get("error") {
            if let Some(err) = check_openai_context_length_error(error) {
                return Err(err.into());
            }
            return Err(anyhow!("OpenAI API error: {}", error));
        }

        openai_response_to_message(response)
    }
}
