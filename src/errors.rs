use serde::{Deserialize, Serialize};
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid model: {0}")]
    UnrecognizedModel(String),

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
}

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Tool execution failed: {0}")]
    ExecutionError(String),
}

pub type ToolResult<T> = Result<T, ToolError>;
