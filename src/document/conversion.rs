use crate::config::EditorConfig;
use crate::error::TreeError;
use crate::response::Response;
use serde_json::Value;
use std::sync::Arc;

/// Conversion from a stored or transmitted format into a typed response tree.
///
/// Implement this on your own document structs to hand their rule steps to the
/// editor. The JSON wire shape already implements it.
///
/// # Example
///
/// ```rust
/// use rulegraft::prelude::*;
/// use std::sync::Arc;
///
/// struct Step { action: String, id: i32 }
/// struct Script { steps: Vec<Step> }
///
/// impl IntoResponse for Script {
///     fn into_response(
///         self,
///         _config: &EditorConfig,
///     ) -> std::result::Result<Option<Arc<Response>>, TreeError> {
///         Ok(self.steps.into_iter().rev().fold(None, |next, step| {
///             let mut node = Response::new(&step.action, step.id);
///             node.next = next;
///             Some(node.shared())
///         }))
///     }
/// }
///
/// let script = Script { steps: vec![Step { action: "wait".into(), id: 3 }] };
/// let head = script.into_response(&EditorConfig::default()).unwrap();
/// assert_eq!(head.unwrap().name, "wait");
/// ```
pub trait IntoResponse {
    /// Consumes the value and produces the head of a sequence, or `None` for an
    /// empty position.
    fn into_response(self, config: &EditorConfig) -> Result<Option<Arc<Response>>, TreeError>;
}

impl IntoResponse for &Value {
    fn into_response(self, config: &EditorConfig) -> Result<Option<Arc<Response>>, TreeError> {
        super::decode_optional(self, config)
    }
}

impl IntoResponse for &str {
    fn into_response(self, config: &EditorConfig) -> Result<Option<Arc<Response>>, TreeError> {
        super::from_str(self, config)
    }
}
