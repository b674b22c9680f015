use super::raw::RawResponse;
use crate::config::EditorConfig;
use crate::error::TreeError;
use crate::response::{NEXT_RESPONSE_KEY, NestedSlot, Response, Shape, is_structural_key};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Validates a wire node (and everything reachable from it) into a typed tree.
pub fn decode(value: &Value, config: &EditorConfig) -> Result<Arc<Response>, TreeError> {
    let head = RawResponse::parse(value).map_err(|message| TreeError::InvalidNode { message })?;
    let root = Decoder { config }.decode_chain(head, 0)?;
    tracing::debug!(root = %root.name, "decoded response tree");
    Ok(root)
}

/// Like `decode`, but a JSON `null` decodes to an empty position.
pub fn decode_optional(
    value: &Value,
    config: &EditorConfig,
) -> Result<Option<Arc<Response>>, TreeError> {
    if value.is_null() {
        Ok(None)
    } else {
        decode(value, config).map(Some)
    }
}

/// Parses and decodes a response document.
///
/// Each step nests two JSON levels below its predecessor, so the parser runs
/// without serde_json's recursion limit and on a growable stack. Runaway input is
/// reported by the decoder's own chain and nesting bounds.
pub fn from_str(json: &str, config: &EditorConfig) -> Result<Option<Arc<Response>>, TreeError> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
        .map_err(|e| TreeError::JsonParseError(e.to_string()))?;
    deserializer
        .end()
        .map_err(|e| TreeError::JsonParseError(e.to_string()))?;
    decode_optional(&value, config)
}

/// Writes a typed tree back into the wire shape.
pub fn encode(node: &Response) -> Value {
    let sequence: Vec<&Response> =
        std::iter::successors(Some(node), |n| n.next.as_deref()).collect();
    sequence
        .iter()
        .rev()
        .fold(None, |next, node| Some(encode_node(node, next)))
        .unwrap_or(Value::Null)
}

pub fn encode_optional(node: Option<&Response>) -> Value {
    node.map(encode).unwrap_or(Value::Null)
}

pub fn to_string_pretty(node: Option<&Response>) -> Result<String, TreeError> {
    serde_json::to_string_pretty(&encode_optional(node))
        .map_err(|e| TreeError::JsonParseError(e.to_string()))
}

fn encode_node(node: &Response, next: Option<Value>) -> Value {
    let mut params: Map<String, Value> = node
        .params
        .iter()
        .filter(|(key, _)| !is_structural_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    if let Some((slot, nested)) = node.nested() {
        params.insert(slot.key().to_string(), encode(nested));
    }
    if let Some(next) = next {
        params.insert(NEXT_RESPONSE_KEY.to_string(), next);
    }

    let mut object = Map::new();
    object.insert("name".to_string(), Value::String(node.name.clone()));
    object.insert("behaviorId".to_string(), Value::from(node.behavior_id));
    object.insert("params".to_string(), Value::Object(params));
    Value::Object(object)
}

struct Decoder<'c> {
    config: &'c EditorConfig,
}

impl Decoder<'_> {
    fn decode_chain(&self, head: RawResponse<'_>, depth: usize) -> Result<Arc<Response>, TreeError> {
        if depth > self.config.max_nesting_depth {
            tracing::warn!(node = head.name, depth, "response nesting exceeded its limit");
            return Err(TreeError::MalformedTree {
                limit: self.config.max_nesting_depth,
                context: "nested body depth",
            });
        }

        let mut sequence = vec![head];
        let mut cursor = head.next();
        while let Some(value) = cursor {
            if sequence.len() >= self.config.max_chain_len {
                tracing::warn!(head = head.name, "response chain exceeded its length limit");
                return Err(TreeError::MalformedTree {
                    limit: self.config.max_chain_len,
                    context: "nextResponse chain length",
                });
            }
            let previous = sequence.last().map(|r| r.name).unwrap_or_default();
            let raw = RawResponse::parse(value).map_err(|message| TreeError::InvalidNode {
                message: format!("nextResponse of '{}': {}", previous, message),
            })?;
            cursor = raw.next();
            sequence.push(raw);
        }

        // Build from the tail so each node can own its successor.
        let mut next = None;
        for raw in sequence[1..].iter().rev() {
            next = Some(self.build(raw, next, depth)?);
        }
        self.build(&head, next, depth)
    }

    fn build(
        &self,
        raw: &RawResponse<'_>,
        next: Option<Arc<Response>>,
        depth: usize,
    ) -> Result<Arc<Response>, TreeError> {
        let shape = match (raw.has_slot(NestedSlot::Then), raw.has_slot(NestedSlot::Body)) {
            (true, true) => {
                return Err(TreeError::PrecluderViolation {
                    node: raw.name.to_string(),
                });
            }
            (true, false) => Shape::Conditional {
                then: self.decode_nested(raw, NestedSlot::Then, depth)?,
            },
            (false, true) => Shape::BodyBearing {
                body: self.decode_nested(raw, NestedSlot::Body, depth)?,
            },
            (false, false) => Shape::Sequential,
        };

        Ok(Arc::new(Response {
            name: raw.name.to_string(),
            behavior_id: raw.behavior_id,
            params: raw.payload(),
            shape,
            next,
        }))
    }

    fn decode_nested(
        &self,
        owner: &RawResponse<'_>,
        slot: NestedSlot,
        depth: usize,
    ) -> Result<Arc<Response>, TreeError> {
        let invalid = |message: String| TreeError::InvalidNestedBody {
            node: owner.name.to_string(),
            slot,
            message,
        };
        let value = owner
            .slot(slot)
            .filter(|v| !v.is_null())
            .ok_or_else(|| invalid("the nested sequence is empty".to_string()))?;
        let head = RawResponse::parse(value).map_err(invalid)?;
        self.decode_chain(head, depth + 1)
    }
}
