use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

use super::base::{AgentModel, AgentModelConfig, Model};
use crate::models::message::{LlmMessage, Message};
use crate::models::tool::ToolDefinition;

/// A mock model that returns pre-configured replies for testing
pub struct MockModel {
    name: String,
    script: Vec<LlmMessage>,
}

impl MockModel {
    /// Create a new mock model with a sequence of replies
    pub fn new(script: Vec<LlmMessage>) -> Self {
        Self {
            name: "mock".to_string(),
            script,
        }
    }

    /// Create a mock model reporting the given model name
    pub fn named(name: impl Into<String>, script: Vec<LlmMessage>) -> Self {
        Self {
            name: name.into(),
            script,
        }
    }
}

impl Model for MockModel {
    fn model_name(&self) -> &str {
        &self.name
    }

    fn agent_model(
        &self,
        allow_text_result: bool,
        tools: &[ToolDefinition],
        result_tool_name: Option<&str>,
    ) -> Result<Box<dyn AgentModel>> {
        // Each binding gets its own copy of the script
        Ok(Box::new(MockAgentModel {
            config: AgentModelConfig::new(allow_text_result, tools, result_tool_name),
            script: Mutex::new(self.script.clone()),
        }))
    }
}

/// Mock binding that pops scripted replies in order.
///
/// Concurrent `request` calls on one instance are serialized by the script
/// lock, but which caller receives which reply is then order-dependent.
pub struct MockAgentModel {
    config: AgentModelConfig,
    script: Mutex<Vec<LlmMessage>>,
}

#[async_trait]
impl AgentModel for MockAgentModel {
    fn config(&self) -> &AgentModelConfig {
        &self.config
    }

    async fn request(&self, _messages: &[Message]) -> Result<LlmMessage> {
        let mut script = self.script.lock().unwrap();
        if script.is_empty() {
            // Return an empty reply if no more pre-configured replies
            Ok(LlmMessage::new().with_text(""))
        } else {
            Ok(script.remove(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_sibling_bindings_are_independent() -> Result<()> {
        let script = vec![
            LlmMessage::new().with_text("first"),
            LlmMessage::new().with_text("second"),
        ];
        let model = MockModel::new(script);

        let a = model.agent_model(true, &[], None)?;
        let b = model.agent_model(true, &[], None)?;

        assert_eq!(a.request(&[]).await?.text(), "first");
        assert_eq!(a.request(&[]).await?.text(), "second");

        // Draining one binding's script must not affect its sibling
        assert_eq!(b.request(&[]).await?.text(), "first");
        assert_eq!(b.request(&[]).await?.text(), "second");

        Ok(())
    }

    #[tokio::test]
    async fn test_exhausted_script_returns_empty_text() -> Result<()> {
        let model = MockModel::new(Vec::new());
        let binding = model.agent_model(true, &[], None)?;

        let reply = binding.request(&[]).await?;
        assert_eq!(reply.text(), "");

        Ok(())
    }

    #[test]
    fn test_binding_retains_configuration() -> Result<()> {
        let tools = vec![
            ToolDefinition::new("get_weather", "Get the weather", json!({"type": "object"})),
            ToolDefinition::new(
                "final_result",
                "Return the final answer",
                json!({"type": "object"}),
            ),
        ];
        let model = MockModel::new(Vec::new());
        let binding = model.agent_model(false, &tools, Some("final_result"))?;

        let config = binding.config();
        assert!(!config.allow_text_result);
        let names: Vec<_> = config.tools.iter().map(|tool| tool.name.as_str()).collect();
        assert_eq!(names, ["get_weather", "final_result"]);
        assert_eq!(config.result_tool().unwrap().name, "final_result");

        Ok(())
    }
}
