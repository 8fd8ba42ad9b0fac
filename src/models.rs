//! These models represent the objects passed between an agent and a model.
//!
//! Several related formats cross this boundary: the conversation history an
//! agent accumulates, the tool definitions it exposes, and the wire formats
//! of the provider backends (openai messages/tools today). Provider data
//! models are converted to and from these internal structs at the provider
//! boundary, so the internal models are not an exact match for any single
//! wire format.
pub mod content;
pub mod message;
pub mod role;
pub mod tool;
