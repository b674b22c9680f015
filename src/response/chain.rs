use super::Response;
use crate::config::EditorConfig;
use crate::error::TreeError;
use std::sync::Arc;

impl Response {
    /// Collects the sequence starting at `head` by following `next` links.
    ///
    /// The walk is bounded by `config.max_chain_len`.
    pub fn chain<'a>(
        head: &'a Arc<Response>,
        config: &EditorConfig,
    ) -> Result<Vec<&'a Arc<Response>>, TreeError> {
        let mut nodes = Vec::new();
        let mut cursor = Some(head);
        while let Some(node) = cursor {
            if nodes.len() >= config.max_chain_len {
                tracing::warn!(
                    head = %head.name,
                    limit = config.max_chain_len,
                    "response chain exceeded its length limit"
                );
                return Err(TreeError::MalformedTree {
                    limit: config.max_chain_len,
                    context: "nextResponse chain length",
                });
            }
            nodes.push(node);
            cursor = node.next();
        }
        tracing::trace!(head = %head.name, len = nodes.len(), "walked response chain");
        Ok(nodes)
    }

    /// The last node of the sequence starting at `head`.
    pub fn tail<'a>(
        head: &'a Arc<Response>,
        config: &EditorConfig,
    ) -> Result<&'a Arc<Response>, TreeError> {
        let nodes = Self::chain(head, config)?;
        // `chain` always yields at least the head.
        Ok(nodes.last().copied().unwrap_or(head))
    }

    /// Walks the whole tree under `root`, checking every chain length and the
    /// nesting depth against the configured limits.
    pub(crate) fn validate(root: &Arc<Response>, config: &EditorConfig) -> Result<(), TreeError> {
        Self::validate_at(root, config, 0)
    }

    fn validate_at(
        head: &Arc<Response>,
        config: &EditorConfig,
        depth: usize,
    ) -> Result<(), TreeError> {
        if depth > config.max_nesting_depth {
            return Err(TreeError::MalformedTree {
                limit: config.max_nesting_depth,
                context: "nested body depth",
            });
        }
        for node in Self::chain(head, config)? {
            if let Some((_, nested)) = node.nested() {
                Self::validate_at(nested, config, depth + 1)?;
            }
        }
        Ok(())
    }
}

/// Rebuilds `nodes` as a fresh sequence ending in `tail_next`.
///
/// Only the listed nodes are copied; their nested bodies and `tail_next` are shared.
pub(crate) fn relink_chain(
    nodes: &[&Arc<Response>],
    tail_next: Option<Arc<Response>>,
) -> Option<Arc<Response>> {
    nodes
        .iter()
        .rev()
        .fold(tail_next, |next, node| Some(node.relinked(next).shared()))
}
