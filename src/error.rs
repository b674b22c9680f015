use crate::response::NestedSlot;
use thiserror::Error;

/// Errors raised while walking, editing or decoding a response tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Malformed response tree: {context} exceeded the limit of {limit} (cycle or runaway chain)")]
    MalformedTree { limit: usize, context: &'static str },

    #[error("Response '{node}' has a '{slot}' slot that is not a well-formed response: {message}")]
    InvalidNestedBody {
        node: String,
        slot: NestedSlot,
        message: String,
    },

    #[error("Response '{node}' has both 'then' and 'body' populated")]
    PrecluderViolation { node: String },

    #[error("Behavior '{0}' is not registered")]
    UnknownBehavior(String),

    #[error("Param '{key}' of response '{node}' is reserved for tree structure")]
    ReservedParam { node: String, key: String },

    #[error("Invalid response: {message}")]
    InvalidNode { message: String },

    #[error("Failed to parse response JSON: {0}")]
    JsonParseError(String),
}

/// Errors that can occur while building or loading a behavior registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Behavior '{0}' is registered more than once")]
    DuplicateBehavior(String),

    #[error("Failed to parse behavior table JSON: {0}")]
    JsonParseError(String),
}

/// Errors that can occur while loading an `EditorConfig`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to parse editor config JSON: {0}")]
    JsonParseError(String),

    #[error("Invalid editor config: {0}")]
    ValidationError(String),
}
