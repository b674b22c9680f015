use super::Response;
use crate::config::{DEFAULT_MAX_CHAIN_LEN, DEFAULT_MAX_NESTING_DEPTH, EditorConfig};
use itertools::Itertools;
use std::fmt;

/// Renders a response sequence as an indented tree, one line per step.
///
/// ```text
/// ├── wait #3 [seconds]
/// └── if #16 [condition]
///     └── then
///         └── say #4
/// ```
///
/// Chains and nesting past the limits are cut off with a marker line. The limits
/// default to the `EditorConfig` defaults; `with_limits` takes them from a config.
pub struct DisplayResponse<'a> {
    pub head: Option<&'a Response>,
    max_chain_len: usize,
    max_nesting_depth: usize,
}

impl<'a> DisplayResponse<'a> {
    pub fn new(head: &'a Response) -> Self {
        Self::optional(Some(head))
    }

    /// Renders an empty position as `<empty>`.
    pub fn optional(head: Option<&'a Response>) -> Self {
        Self {
            head,
            max_chain_len: DEFAULT_MAX_CHAIN_LEN,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    pub fn with_limits(mut self, config: &EditorConfig) -> Self {
        self.max_chain_len = config.max_chain_len;
        self.max_nesting_depth = config.max_nesting_depth;
        self
    }
}

impl fmt::Display for DisplayResponse<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.head {
            Some(head) => self.fmt_sequence(head, f, "", 0),
            None => writeln!(f, "└── <empty>"),
        }
    }
}

impl DisplayResponse<'_> {
    fn fmt_sequence(
        &self,
        head: &Response,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        depth: usize,
    ) -> fmt::Result {
        if depth > self.max_nesting_depth {
            return writeln!(f, "{}└── <nesting truncated>", prefix);
        }

        let mut cursor = Some(head);
        let mut count = 0;
        while let Some(node) = cursor {
            if count == self.max_chain_len {
                return writeln!(f, "{}└── <chain truncated>", prefix);
            }
            let is_last = node.next.is_none();
            let node_marker = if is_last { "└── " } else { "├── " };
            writeln!(f, "{}{}{}", prefix, node_marker, Self::label(node))?;

            if let Some((slot, nested)) = node.nested() {
                let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
                writeln!(f, "{}└── {}", child_prefix, slot)?;
                self.fmt_sequence(nested, f, &format!("{}    ", child_prefix), depth + 1)?;
            }

            cursor = node.next.as_deref();
            count += 1;
        }
        Ok(())
    }

    fn label(node: &Response) -> String {
        if node.params.is_empty() {
            format!("{} #{}", node.name, node.behavior_id)
        } else {
            format!(
                "{} #{} [{}]",
                node.name,
                node.behavior_id,
                node.params.keys().sorted().join(", ")
            )
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&DisplayResponse::new(self), f)
    }
}
