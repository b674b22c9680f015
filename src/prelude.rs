//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the rulegraft crate.
//!
//! # Example
//!
//! ```rust
//! use rulegraft::prelude::*;
//! use std::sync::Arc;
//!
//! # fn run_example() -> Result<()> {
//! let registry = BehaviorTable::from_json(r#"[{ "name": "if", "behaviorId": 16 }]"#)?;
//! let editor = Editor::new(Arc::new(registry));
//!
//! let node = Response::new("say", 4).shared();
//! let wrapped = editor.wrap_in_condition(&node)?;
//! assert_eq!(wrapped.name, "if");
//! # Ok(())
//! # }
//! # run_example().unwrap();
//! ```

// Editing
pub use crate::editor::{Editor, MoveDown, ResponseActions, make_response_actions};

// Tree model
pub use crate::response::{BehaviorId, DisplayResponse, NestedSlot, Params, Response, Shape};

// Registry and configuration
pub use crate::config::EditorConfig;
pub use crate::registry::{BehaviorEntry, BehaviorRegistry, BehaviorTable};

// Wire format
pub use crate::document;
pub use crate::document::IntoResponse;

// Error types
pub use crate::error::{ConfigError, RegistryError, TreeError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
