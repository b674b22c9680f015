use crate::error::ConfigError;
use serde::Deserialize;

/// Default upper bound on the number of nodes in one `nextResponse` chain.
pub const DEFAULT_MAX_CHAIN_LEN: usize = 1024;
/// Default upper bound on `then`/`body` nesting.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;
/// Behavior name used for the node synthesized by `wrap_in_condition`.
pub const DEFAULT_CONDITION_BEHAVIOR: &str = "if";

/// Tunables for the response tree editor.
///
/// Every chain or nesting walk is bounded by these limits, so a malformed tree
/// surfaces as `TreeError::MalformedTree` instead of an endless traversal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub max_chain_len: usize,
    pub max_nesting_depth: usize,
    pub condition_behavior: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_chain_len: DEFAULT_MAX_CHAIN_LEN,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            condition_behavior: DEFAULT_CONDITION_BEHAVIOR.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_chain_len(mut self, limit: usize) -> Self {
        self.max_chain_len = limit;
        self
    }

    pub fn with_max_nesting_depth(mut self, limit: usize) -> Self {
        self.max_nesting_depth = limit;
        self
    }

    pub fn with_condition_behavior(mut self, name: &str) -> Self {
        self.condition_behavior = name.to_string();
        self
    }

    /// Parses a config from JSON. Missing keys fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::JsonParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chain_len == 0 {
            return Err(ConfigError::ValidationError(
                "maxChainLen must be at least 1".to_string(),
            ));
        }
        if self.condition_behavior.is_empty() {
            return Err(ConfigError::ValidationError(
                "conditionBehavior must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
