//! Unit tests for supporting rulegraft functionality.
mod common;
use common::*;
use rulegraft::prelude::*;
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_error_display() {
    let err = TreeError::InvalidNestedBody {
        node: "if".to_string(),
        slot: NestedSlot::Then,
        message: "the nested sequence is empty".to_string(),
    };
    assert!(err.to_string().contains("'if'"));
    assert!(err.to_string().contains("'then'"));

    let err = TreeError::MalformedTree {
        limit: 12,
        context: "nextResponse chain length",
    };
    assert!(err.to_string().contains("12"));
    assert!(err.to_string().contains("nextResponse"));

    let err = TreeError::PrecluderViolation {
        node: "repeat".to_string(),
    };
    assert!(err.to_string().contains("repeat"));

    let err = RegistryError::DuplicateBehavior("say".to_string());
    assert!(err.to_string().contains("say"));
}

#[test]
fn test_registry_lookups() {
    let registry = create_registry();
    assert_eq!(registry.len(), 5);
    assert_eq!(registry.behavior_id("if"), Some(16));
    assert_eq!(registry.behavior_id("missing"), None);
    assert_eq!(registry.name_of(20), Some("repeat"));
    assert_eq!(registry.entry("say").map(|e| e.behavior_id), Some(4));
}

#[test]
fn test_registry_rejects_duplicates() {
    let result = BehaviorTable::builder()
        .with_behavior("say", 4)
        .with_behavior("say", 5)
        .build();
    assert!(matches!(result, Err(RegistryError::DuplicateBehavior(name)) if name == "say"));
}

#[test]
fn test_registry_from_json_with_initial_params() {
    let registry = BehaviorTable::from_json(
        r#"[
            { "name": "if", "behaviorId": 16 },
            { "name": "wait", "behaviorId": 3, "initialParams": { "duration": 1 } }
        ]"#,
    )
    .unwrap();

    let entry = registry.entry("wait").unwrap();
    let node = Response::from_entry(entry);
    assert_eq!(node.name, "wait");
    assert_eq!(node.behavior_id, 3);
    assert_eq!(node.param("duration"), Some(&json!(1)));
    assert_eq!(node.shape, Shape::Sequential);
    assert!(node.next().is_none());

    assert!(matches!(
        BehaviorTable::from_json("{}"),
        Err(RegistryError::JsonParseError(_))
    ));
}

#[test]
fn test_empty_response_placeholder() {
    assert!(Response::new("none", 0).is_empty_response());
    assert!(!Response::new("say", 4).is_empty_response());
}

fn editor_with(config: EditorConfig) -> Editor {
    create_editor().with_config(config).unwrap()
}

#[test]
fn test_validate_walks_nested_sequences() {
    let node = Response::new("if", 16)
        .with_then(sequence(&["a", "b", "c"]))
        .shared();

    assert!(create_editor().validate(&node).is_ok());
    assert!(matches!(
        editor_with(EditorConfig::default().with_max_chain_len(2)).validate(&node),
        Err(TreeError::MalformedTree { limit: 2, .. })
    ));
    assert!(matches!(
        editor_with(EditorConfig::default().with_max_nesting_depth(0)).validate(&node),
        Err(TreeError::MalformedTree { limit: 0, .. })
    ));
}

#[test]
fn test_validate_catches_splice_past_chain_limit() {
    let editor = editor_with(EditorConfig::default().with_max_chain_len(3));
    let head = sequence(&["a", "b", "c"]);
    assert!(editor.validate(&head).is_ok());

    let new_response = Response::new("say", 4);
    let mut inserted = None;
    make_response_actions(&editor, nth(&head, 2), |r| inserted = r).insert_before(&new_response);
    let edited = splice_at(&head, 2, inserted).unwrap();

    assert_eq!(names(Some(&edited)), ["a", "b", "say", "c"]);
    assert!(matches!(
        editor.validate(&edited),
        Err(TreeError::MalformedTree { limit: 3, .. })
    ));
}

#[test]
fn test_display_marks_sequence_and_branches() {
    let node = Response::new("repeat", 20)
        .with_param("count", json!(2))
        .unwrap()
        .with_body(sequence(&["a", "b"]))
        .with_next(Response::new("say", 4));

    let expected = "\
├── repeat #20 [count]
│   └── body
│       ├── a #1
│       └── b #1
└── say #4
";
    assert_eq!(DisplayResponse::new(&node).to_string(), expected);
}

#[test]
fn test_display_respects_configured_limits() {
    let node = sequence(&["a", "b", "c"]);
    let config = EditorConfig::default().with_max_chain_len(2);

    let expected = "\
├── a #1
├── b #1
└── <chain truncated>
";
    assert_eq!(
        DisplayResponse::new(&node).with_limits(&config).to_string(),
        expected
    );
    assert!(DisplayResponse::new(&node).to_string().contains("└── c #1"));

    let nested = Response::new("if", 16).with_then(Response::new("say", 4));
    let config = EditorConfig::default().with_max_nesting_depth(0);
    let expected = "\
└── if #16
    └── then
        └── <nesting truncated>
";
    assert_eq!(
        DisplayResponse::new(&nested).with_limits(&config).to_string(),
        expected
    );
}

#[test]
fn test_display_nested_branch_and_absent_head() {
    let tree = Response::new("wait", 3)
        .with_param("seconds", json!(1))
        .unwrap()
        .with_next(Response::new("if", 16).with_then(Response::new("say", 4)));

    let expected = "\
├── wait #3 [seconds]
└── if #16
    └── then
        └── say #4
";
    assert_eq!(tree.to_string(), expected);
    assert_eq!(DisplayResponse::optional(None).to_string(), "└── <empty>\n");
}

#[test]
fn test_with_param_rejects_structural_keys() {
    for key in ["then", "body", "nextResponse"] {
        match Response::new("if", 16).with_param(key, json!({ "name": "say", "behaviorId": 4 })) {
            Err(TreeError::ReservedParam { node, key: rejected }) => {
                assert_eq!(node, "if");
                assert_eq!(rejected, key);
            }
            other => panic!("Expected ReservedParam, got {:?}", other),
        }
    }

    let node = Response::new("if", 16)
        .with_param("condition", json!({ "name": "coin flip" }))
        .unwrap();
    assert_eq!(node.param("condition"), Some(&json!({ "name": "coin flip" })));
}

#[test]
fn test_editor_rejects_invalid_config() {
    let result = create_editor().with_config(EditorConfig::default().with_max_chain_len(0));
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));

    let result = create_editor().with_config(EditorConfig::default().with_condition_behavior(""));
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));

    let editor = editor_with(EditorConfig::default().with_max_chain_len(8));
    assert_eq!(editor.config().max_chain_len, 8);
}

#[test]
fn test_config_partial_json_keeps_defaults() {
    let config = EditorConfig::from_json(r#"{ "maxChainLen": 8 }"#).unwrap();
    assert_eq!(config.max_chain_len, 8);
    assert_eq!(config.max_nesting_depth, 64);
    assert_eq!(config.condition_behavior, "if");

    assert!(matches!(
        EditorConfig::from_json(r#"{ "maxChainLen": 0 }"#),
        Err(ConfigError::ValidationError(_))
    ));
}

#[test]
fn test_chain_visits_every_node_in_order() {
    let head = sequence(&["a", "b", "c"]);
    let names: Vec<_> = Response::chain(&head, &EditorConfig::default())
        .unwrap()
        .iter()
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(names, ["a", "b", "c"]);

    let tail = Response::tail(&head, &EditorConfig::default()).unwrap();
    assert_eq!(tail.name, "c");
    assert!(matches!(
        Response::chain(&head, &EditorConfig::default().with_max_chain_len(2)),
        Err(TreeError::MalformedTree { limit: 2, .. })
    ));
}

#[test]
fn test_relinked_keeps_payload_and_shape() {
    let inner = Response::new("say", 4).shared();
    let node = Response::new("if", 16)
        .with_param("condition", json!({ "name": "coin flip" }))
        .unwrap()
        .with_then(Arc::clone(&inner))
        .with_next(Response::new("wait", 3));

    let copy = node.relinked(None);
    assert_eq!(copy.name, "if");
    assert_eq!(copy.params, node.params);
    assert!(copy.next.is_none());
    let (slot, then) = copy.nested().unwrap();
    assert_eq!(slot, NestedSlot::Then);
    assert!(Arc::ptr_eq(then, &inner));
}

#[test]
fn test_later_nested_builder_call_wins() {
    let node = Response::new("repeat", 20)
        .with_then(Response::new("say", 4))
        .with_body(Response::new("say", 4));
    assert_eq!(node.nested_slot(), Some(NestedSlot::Body));
}
