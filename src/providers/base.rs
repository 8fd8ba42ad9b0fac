use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::models::message::{LlmMessage, Message};
use crate::models::tool::ToolDefinition;

/// The configuration a bound model retains, introspectable after binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentModelConfig {
    /// Whether a plain text final response is permitted
    pub allow_text_result: bool,
    /// The tools exposed to the backend, in caller order
    pub tools: Vec<ToolDefinition>,
    /// The name of the tool that produces the final structured result, if any
    pub result_tool_name: Option<String>,
}

impl AgentModelConfig {
    pub fn new(
        allow_text_result: bool,
        tools: &[ToolDefinition],
        result_tool_name: Option<&str>,
    ) -> Self {
        Self {
            allow_text_result,
            tools: tools.to_vec(),
            result_tool_name: result_tool_name.map(String::from),
        }
    }

    /// The designated result tool, if one was named and is present in the tool set
    pub fn result_tool(&self) -> Option<&ToolDefinition> {
        let name = self.result_tool_name.as_deref()?;
        self.tools.iter().find(|tool| tool.name == name)
    }
}

/// Base trait for models, one implementation per provider backend.
///
/// A `Model` holds provider connection details and manufactures
/// [`AgentModel`]s bound to one agent configuration. Instances are immutable
/// after construction and safe to share across concurrent bindings.
pub trait Model: Send + Sync {
    /// The provider-specific model name this instance was constructed with
    fn model_name(&self) -> &str;

    /// Bind this model to one agent configuration.
    ///
    /// `tools` are exposed to the backend in the given order. If
    /// `result_tool_name` is present it names the tool whose invocation
    /// carries the final structured result. Binding performs no network I/O,
    /// and sibling bindings share no mutable state.
    fn agent_model(
        &self,
        allow_text_result: bool,
        tools: &[ToolDefinition],
        result_tool_name: Option<&str>,
    ) -> Result<Box<dyn AgentModel>> {
        let _ = (allow_text_result, tools, result_tool_name);
        Err(ModelError::NotImplemented("agent_model").into())
    }
}

/// A model bound to one agent configuration.
///
/// Only ever produced by [`Model::agent_model`]. Concrete implementations
/// document whether concurrent `request` calls on one instance are safe.
#[async_trait]
pub trait AgentModel: Send + Sync {
    /// The configuration this model was bound with
    fn config(&self) -> &AgentModelConfig;

    /// Send the conversation history, oldest message first, and return the
    /// model's reply. Suspends while awaiting the provider; transport and
    /// API failures propagate unchanged.
    async fn request(&self, messages: &[Message]) -> Result<LlmMessage> {
        let _ = messages;
        Err(ModelError::NotImplemented("request").into())
    }

    // TODO: streamed responses and non-JSON tool call encodings
}
