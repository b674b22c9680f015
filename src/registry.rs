use crate::error::RegistryError;
use crate::response::{BehaviorId, Params};
use ahash::AHashMap;
use serde::Deserialize;

/// Maps behavior names to the numeric ids the runtime knows them by.
///
/// The editor never hardcodes ids: whenever it synthesizes a node (the "if" of
/// `wrap_in_condition`) it asks the registry it was built with.
pub trait BehaviorRegistry: Send + Sync {
    fn behavior_id(&self, name: &str) -> Option<BehaviorId>;

    fn entry(&self, name: &str) -> Option<&BehaviorEntry>;
}

/// One registered behavior, as the rule picker offers it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorEntry {
    pub name: String,
    pub behavior_id: BehaviorId,
    #[serde(default)]
    pub initial_params: Params,
}

impl BehaviorEntry {
    pub fn new(name: &str, behavior_id: BehaviorId) -> Self {
        Self {
            name: name.to_string(),
            behavior_id,
            initial_params: Params::new(),
        }
    }
}

/// An in-memory behavior registry keyed by name.
#[derive(Debug, Clone, Default)]
pub struct BehaviorTable {
    entries: AHashMap<String, BehaviorEntry>,
}

pub struct BehaviorTableBuilder {
    entries: Vec<BehaviorEntry>,
}

impl BehaviorTableBuilder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_behavior(self, name: &str, behavior_id: BehaviorId) -> Self {
        self.with_entry(BehaviorEntry::new(name, behavior_id))
    }

    pub fn with_entry(mut self, entry: BehaviorEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn build(self) -> Result<BehaviorTable, RegistryError> {
        BehaviorTable::from_entries(self.entries)
    }
}

impl Default for BehaviorTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BehaviorTable {
    pub fn builder() -> BehaviorTableBuilder {
        BehaviorTableBuilder::new()
    }

    pub fn from_entries(
        entries: impl IntoIterator<Item = BehaviorEntry>,
    ) -> Result<Self, RegistryError> {
        let mut table = AHashMap::new();
        for entry in entries {
            if table.contains_key(&entry.name) {
                return Err(RegistryError::DuplicateBehavior(entry.name));
            }
            table.insert(entry.name.clone(), entry);
        }
        tracing::debug!(behaviors = table.len(), "built behavior table");
        Ok(Self { entries: table })
    }

    /// Loads a table from a JSON list of `{ name, behaviorId, initialParams? }`.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let entries: Vec<BehaviorEntry> =
            serde_json::from_str(json).map_err(|e| RegistryError::JsonParseError(e.to_string()))?;
        Self::from_entries(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reverse lookup of a behavior name by id.
    pub fn name_of(&self, behavior_id: BehaviorId) -> Option<&str> {
        self.entries
            .values()
            .find(|e| e.behavior_id == behavior_id)
            .map(|e| e.name.as_str())
    }
}

impl BehaviorRegistry for BehaviorTable {
    fn behavior_id(&self, name: &str) -> Option<BehaviorId> {
        self.entries.get(name).map(|e| e.behavior_id)
    }

    fn entry(&self, name: &str) -> Option<&BehaviorEntry> {
        self.entries.get(name)
    }
}
