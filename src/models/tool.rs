use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A callable capability exposed to a model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    /// The name of the tool, unique within one binding
    pub name: String,
    /// A description of what the tool does
    pub description: String,
    /// JSON Schema describing the arguments the tool accepts
    pub json_schema: Value,
}

impl ToolDefinition {
    /// Create a new tool definition with the given name and description
    pub fn new<N, D>(name: N, description: D, json_schema: Value) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        ToolDefinition {
            name: name.into(),
            description: description.into(),
            json_schema,
        }
    }
}

/// A tool invocation decoded from a model response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// The name of the tool to execute
    pub name: String,
    /// The arguments for the invocation
    pub arguments: Value,
}

impl ToolCall {
    /// Create a new ToolCall with the given name and arguments
    pub fn new<S: Into<String>>(name: S, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}
