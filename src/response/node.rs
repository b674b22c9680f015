use crate::error::TreeError;
use crate::registry::BehaviorEntry;
use ahash::AHashMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Opaque numeric tag identifying the behavior implementation behind a name.
pub type BehaviorId = i32;

/// Opaque payload slots of a response (condition operands, action arguments).
pub type Params = AHashMap<String, Value>;

/// Params key holding the next response of a sequence.
pub const NEXT_RESPONSE_KEY: &str = "nextResponse";

/// Whether `key` names a params slot that holds tree structure rather than payload.
pub fn is_structural_key(key: &str) -> bool {
    key == NEXT_RESPONSE_KEY || key == NestedSlot::Then.key() || key == NestedSlot::Body.key()
}

/// Name of the placeholder response the inspector renders as an empty slot.
pub const EMPTY_RESPONSE_NAME: &str = "none";

/// The two params slots that may own a nested sub-sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NestedSlot {
    Then,
    Body,
}

impl NestedSlot {
    /// The params key this slot is stored under on the wire.
    pub fn key(&self) -> &'static str {
        match self {
            NestedSlot::Then => "then",
            NestedSlot::Body => "body",
        }
    }
}

impl fmt::Display for NestedSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Structural kind of a response, selected explicitly rather than inferred
/// from which params happen to be present.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A plain step with no nested sub-sequence.
    Sequential,
    /// A condition ("if") owning a `then` sub-sequence.
    Conditional { then: Arc<Response> },
    /// An iterating or acting step ("repeat", "act on") owning a `body` sub-sequence.
    BodyBearing { body: Arc<Response> },
}

/// One node of a behavior rule: an action or condition step.
///
/// Responses are immutable once shared. Edits build new nodes that point at the
/// untouched `Arc`s of the old tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub name: String,
    pub behavior_id: BehaviorId,
    pub params: Params,
    pub shape: Shape,
    pub next: Option<Arc<Response>>,
}

impl Response {
    pub fn new(name: &str, behavior_id: BehaviorId) -> Self {
        Self {
            name: name.to_string(),
            behavior_id,
            params: Params::new(),
            shape: Shape::Sequential,
            next: None,
        }
    }

    /// Creates a fresh response from a registry entry, seeded with its initial params.
    pub fn from_entry(entry: &BehaviorEntry) -> Self {
        Self {
            name: entry.name.clone(),
            behavior_id: entry.behavior_id,
            params: entry.initial_params.clone(),
            shape: Shape::Sequential,
            next: None,
        }
    }

    /// Adds an opaque payload param.
    ///
    /// `then`, `body` and `nextResponse` are rejected; use `with_then`, `with_body`
    /// and `with_next` for those.
    pub fn with_param(mut self, key: &str, value: Value) -> Result<Self, TreeError> {
        if is_structural_key(key) {
            return Err(TreeError::ReservedParam {
                node: self.name,
                key: key.to_string(),
            });
        }
        self.params.insert(key.to_string(), value);
        Ok(self)
    }

    pub fn with_then(mut self, then: impl Into<Arc<Response>>) -> Self {
        self.shape = Shape::Conditional { then: then.into() };
        self
    }

    pub fn with_body(mut self, body: impl Into<Arc<Response>>) -> Self {
        self.shape = Shape::BodyBearing { body: body.into() };
        self
    }

    pub fn with_next(mut self, next: impl Into<Arc<Response>>) -> Self {
        self.next = Some(next.into());
        self
    }

    /// Wraps the response in an `Arc` so it can be shared between tree versions.
    pub fn shared(self) -> Arc<Response> {
        Arc::new(self)
    }

    /// A shallow copy of this node pointing at a different successor.
    pub fn relinked(&self, next: Option<Arc<Response>>) -> Response {
        Response {
            name: self.name.clone(),
            behavior_id: self.behavior_id,
            params: self.params.clone(),
            shape: self.shape.clone(),
            next,
        }
    }

    pub fn next(&self) -> Option<&Arc<Response>> {
        self.next.as_ref()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// The nested sub-sequence and the slot it lives in, if any.
    pub fn nested(&self) -> Option<(NestedSlot, &Arc<Response>)> {
        match &self.shape {
            Shape::Sequential => None,
            Shape::Conditional { then } => Some((NestedSlot::Then, then)),
            Shape::BodyBearing { body } => Some((NestedSlot::Body, body)),
        }
    }

    pub fn nested_slot(&self) -> Option<NestedSlot> {
        self.nested().map(|(slot, _)| slot)
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub fn is_empty_response(&self) -> bool {
        self.name == EMPTY_RESPONSE_NAME
    }
}
