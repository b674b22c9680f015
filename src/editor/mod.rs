use crate::config::EditorConfig;
use crate::error::{ConfigError, TreeError};
use crate::registry::BehaviorRegistry;
use crate::response::chain::relink_chain;
use crate::response::{Response, Shape};
use std::sync::Arc;

mod actions;

pub use actions::*;

/// Computes structural edits on a response tree.
///
/// Every operation is pure: it reads the node it is given and returns the value
/// that should take that node's place in the enclosing sequence. Inputs are never
/// mutated, and any subtree the edit does not touch is shared with the result.
pub struct Editor {
    config: EditorConfig,
    registry: Arc<dyn BehaviorRegistry>,
}

impl Editor {
    pub fn new(registry: Arc<dyn BehaviorRegistry>) -> Self {
        Self {
            config: EditorConfig::default(),
            registry,
        }
    }

    /// Replaces the editor's limits, rejecting a config that fails
    /// `EditorConfig::validate`.
    pub fn with_config(mut self, config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn registry(&self) -> &dyn BehaviorRegistry {
        self.registry.as_ref()
    }

    /// Checks every chain and nesting level under `root` against this editor's
    /// limits.
    ///
    /// Decoded documents are already bounded. Trees assembled in code, and the
    /// results of splicing edits into them, are not.
    pub fn validate(&self, root: &Arc<Response>) -> Result<(), TreeError> {
        Response::validate(root, &self.config)
    }

    /// Removes `node` from its sequence.
    ///
    /// A node owning a `then` or `body` sub-sequence is replaced by that
    /// sub-sequence, whose tail then continues with the node's own successor.
    /// Any other node is replaced by its successor, which may be absent.
    pub fn remove(&self, node: &Arc<Response>) -> Result<Option<Arc<Response>>, TreeError> {
        match node.nested() {
            Some((slot, nested)) => {
                let promoted = Response::chain(nested, &self.config)?;
                tracing::debug!(
                    node = %node.name,
                    %slot,
                    promoted = promoted.len(),
                    "removing response, promoting nested sequence"
                );
                Ok(relink_chain(&promoted, node.next.clone()))
            }
            None => {
                tracing::debug!(node = %node.name, "removing response");
                Ok(node.next.clone())
            }
        }
    }

    /// Swaps `node` with its successor. Without a successor the same node is returned.
    pub fn move_down(&self, node: &Arc<Response>) -> Arc<Response> {
        let Some(child) = node.next() else {
            return Arc::clone(node);
        };
        tracing::debug!(node = %node.name, below = %child.name, "moving response down");

        let lowered = node.relinked(child.next.clone()).shared();
        child.relinked(Some(lowered)).shared()
    }

    /// Splices `new_response` in front of `node`. Whatever successor
    /// `new_response` carried is replaced by `node`.
    pub fn insert_before(&self, node: &Arc<Response>, new_response: &Response) -> Arc<Response> {
        tracing::debug!(node = %node.name, inserted = %new_response.name, "inserting response");
        new_response.relinked(Some(Arc::clone(node))).shared()
    }

    /// Replaces `node` with a condition whose `then` branch is `node`.
    ///
    /// `node` keeps its own successor, so that successor moves into the `then`
    /// branch; the returned condition has no successor of its own. Callers that
    /// splice the result back get a sequence that ends at the wrapped position.
    pub fn wrap_in_condition(&self, node: &Arc<Response>) -> Result<Arc<Response>, TreeError> {
        let name = self.config.condition_behavior.as_str();
        let behavior_id = self
            .registry
            .behavior_id(name)
            .ok_or_else(|| TreeError::UnknownBehavior(name.to_string()))?;

        if node.has_next() {
            tracing::debug!(
                node = %node.name,
                "wrapping response that has a successor; the successor stays inside the branch"
            );
        } else {
            tracing::debug!(node = %node.name, "wrapping response in condition");
        }

        let mut condition = Response::new(name, behavior_id);
        condition.shape = Shape::Conditional {
            then: Arc::clone(node),
        };
        Ok(condition.shared())
    }

    /// Substitutes `new_response` verbatim. Carrying over the old successor is
    /// left to the caller.
    pub fn replace(&self, node: &Arc<Response>, new_response: Arc<Response>) -> Arc<Response> {
        tracing::debug!(node = %node.name, replacement = %new_response.name, "replacing response");
        new_response
    }

    /// Binds the edit operations to `node`. Each action hands its result to
    /// `on_change` exactly once before returning.
    pub fn actions<F>(&self, node: Arc<Response>, on_change: F) -> ResponseActions<'_, F>
    where
        F: FnMut(Option<Arc<Response>>),
    {
        ResponseActions::new(self, node, on_change)
    }
}

/// Binds `editor`'s operations to `node` and `on_change`.
pub fn make_response_actions<F>(
    editor: &Editor,
    node: Arc<Response>,
    on_change: F,
) -> ResponseActions<'_, F>
where
    F: FnMut(Option<Arc<Response>>),
{
    editor.actions(node, on_change)
}
