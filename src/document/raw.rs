use crate::response::{BehaviorId, NEXT_RESPONSE_KEY, NestedSlot, Params, is_structural_key};
use serde_json::{Map, Value};

/// A borrowed view of one wire node: `{ "name", "behaviorId", "params" }`.
///
/// Structural params (`then`, `body`, `nextResponse`) are kept as raw values so a
/// chain can be walked without copying the subtrees hanging off it.
#[derive(Debug, Clone, Copy)]
pub struct RawResponse<'a> {
    pub name: &'a str,
    pub behavior_id: BehaviorId,
    pub params: Option<&'a Map<String, Value>>,
}

impl<'a> RawResponse<'a> {
    pub fn parse(value: &'a Value) -> Result<Self, String> {
        let object = value
            .as_object()
            .ok_or_else(|| format!("expected an object, found {}", type_name(value)))?;

        let name = object
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| "missing string field 'name'".to_string())?;

        let behavior_id = object
            .get("behaviorId")
            .and_then(Value::as_i64)
            .ok_or_else(|| format!("'{}' is missing integer field 'behaviorId'", name))?;
        let behavior_id = BehaviorId::try_from(behavior_id)
            .map_err(|_| format!("'{}' has out-of-range behaviorId {}", name, behavior_id))?;

        let params = match object.get("params") {
            None | Some(Value::Null) => None,
            Some(Value::Object(params)) => Some(params),
            Some(other) => {
                return Err(format!(
                    "'{}' has params of type {}, expected an object",
                    name,
                    type_name(other)
                ));
            }
        };

        Ok(Self {
            name,
            behavior_id,
            params,
        })
    }

    /// The successor on the wire; a `null` successor counts as absent.
    pub fn next(&self) -> Option<&'a Value> {
        self.params
            .and_then(|p| p.get(NEXT_RESPONSE_KEY))
            .filter(|v| !v.is_null())
    }

    /// Whether the params carry `slot`'s key, whatever its value.
    pub fn has_slot(&self, slot: NestedSlot) -> bool {
        self.params.is_some_and(|p| p.contains_key(slot.key()))
    }

    pub fn slot(&self, slot: NestedSlot) -> Option<&'a Value> {
        self.params.and_then(|p| p.get(slot.key()))
    }

    /// The opaque payload: every param that is not structural.
    pub fn payload(&self) -> Params {
        self.params
            .map(|p| {
                p.iter()
                    .filter(|(key, _)| !is_structural_key(key))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
