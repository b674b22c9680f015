//! # Rulegraft - Structural Editing for Behavior Rule Trees
//!
//! **Rulegraft** implements the structural edits a visual rule inspector applies to
//! the "responses" of a behavior rule. A rule's responses form a tree: each step
//! points at the next step of its sequence (`nextResponse`), and conditions or
//! loops own a nested sub-sequence (`then` or `body`).
//!
//! ## Core Workflow
//!
//! 1.  **Load a Tree**: Decode the wire shape (`{ name, behaviorId, params }`) with
//!     `document::decode`, or implement `IntoResponse` for your own format.
//! 2.  **Build an Editor**: `Editor::new` takes the behavior registry used to look
//!     up ids for synthesized nodes, and optionally an `EditorConfig`.
//! 3.  **Bind Actions**: `make_response_actions(&editor, node, on_change)` yields the
//!     edit capabilities for one node. Every action computes the replacement for
//!     that node's position and hands it to `on_change`.
//! 4.  **Splice**: The caller puts the replacement back into the full document.
//!
//! Edits never mutate their input. Untouched subtrees are shared between the old
//! and the new tree through `Arc`.
//!
//! ## Quick Start
//!
//! ```rust
//! use rulegraft::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let registry = BehaviorTable::builder()
//!         .with_behavior("if", 16)
//!         .with_behavior("wait", 3)
//!         .with_behavior("say", 4)
//!         .build()?;
//!     let editor = Editor::new(Arc::new(registry));
//!
//!     let wire = json!({
//!         "name": "wait",
//!         "behaviorId": 3,
//!         "params": {
//!             "duration": 1,
//!             "nextResponse": { "name": "say", "behaviorId": 4, "params": {} }
//!         }
//!     });
//!     let node = document::decode(&wire, editor.config())?;
//!
//!     let mut edited = None;
//!     let mut actions = make_response_actions(&editor, node, |replacement| edited = replacement);
//!     if let Some(move_down) = actions.move_down() {
//!         move_down.run();
//!     }
//!     drop(actions);
//!
//!     let edited = edited.expect("move_down reports a replacement");
//!     assert_eq!(edited.name, "say");
//!     assert_eq!(edited.next().map(|n| n.name.as_str()), Some("wait"));
//!     println!("{}", edited);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod prelude;
pub mod registry;
pub mod response;
