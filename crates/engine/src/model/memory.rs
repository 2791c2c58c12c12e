use anyhow::{Result, bail};
use formwright_types::{AttributeValue, Lifecycle};
use formwright_util::humanize;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};
use tracing::debug;

use super::{AssociationProvider, ColumnType, EnumMap, EnumProvider, ModelAccessor, Reflection};

/// A model described entirely by data.
///
/// Used by the preview CLI (deserialized from a YAML fixture) and by tests.
/// Candidate records for associations live in `records`, keyed by target
/// class; named scopes are stored as equality conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryModel {
    /// Resource key (`post`).
    pub name: String,
    #[serde(default)]
    pub human_name: Option<String>,
    #[serde(default)]
    pub lifecycle: Lifecycle,
    #[serde(default)]
    pub attributes: IndexMap<String, Value>,
    #[serde(default)]
    pub human_attributes: IndexMap<String, String>,
    #[serde(default)]
    pub columns: IndexMap<String, ColumnType>,
    #[serde(default)]
    pub enums: IndexMap<String, EnumMap>,
    #[serde(default)]
    pub associations: IndexMap<String, Reflection>,
    #[serde(default)]
    pub records: IndexMap<String, Vec<Value>>,
    #[serde(default)]
    pub scopes: IndexMap<String, JsonMap<String, Value>>,
}

impl InMemoryModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn with_column(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.columns.insert(name.into(), column_type);
        self
    }

    pub fn with_enum(mut self, attribute: impl Into<String>, values: EnumMap) -> Self {
        self.enums.insert(attribute.into(), values);
        self
    }

    pub fn with_association(mut self, attribute: impl Into<String>, reflection: Reflection) -> Self {
        self.associations.insert(attribute.into(), reflection);
        self
    }

    pub fn with_records(mut self, target: impl Into<String>, records: Vec<Value>) -> Self {
        self.records.insert(target.into(), records);
        self
    }

    pub fn with_scope(mut self, name: impl Into<String>, conditions: JsonMap<String, Value>) -> Self {
        self.scopes.insert(name.into(), conditions);
        self
    }

    fn owns(&self, model_name: &str) -> bool {
        self.name == model_name
    }
}

impl ModelAccessor for InMemoryModel {
    fn model_name(&self) -> Option<&str> {
        Some(self.name.as_str()).filter(|name| !name.is_empty())
    }

    fn attribute_value(&self, name: &str) -> AttributeValue {
        self.attributes.get(name).map(AttributeValue::from_json).unwrap_or_default()
    }

    fn is_new_record(&self) -> bool {
        self.lifecycle == Lifecycle::New
    }

    fn is_persisted(&self) -> bool {
        self.lifecycle == Lifecycle::Persisted
    }

    fn human_attribute_name(&self, name: &str) -> Option<String> {
        self.human_attributes.get(name).cloned()
    }

    fn human_model_name(&self) -> Option<String> {
        self.human_name
            .clone()
            .or_else(|| Some(humanize(&self.name)))
            .filter(|name| !name.is_empty())
    }

    fn column_type(&self, name: &str) -> Option<ColumnType> {
        if let Some(column_type) = self.columns.get(name) {
            return Some(*column_type);
        }
        match self.attributes.get(name) {
            Some(Value::Bool(_)) => Some(ColumnType::Boolean),
            _ => None,
        }
    }
}

impl AssociationProvider for InMemoryModel {
    fn reflect(&self, model_name: &str, attribute: &str) -> Option<Reflection> {
        if !self.owns(model_name) {
            return None;
        }
        self.associations.get(attribute).cloned()
    }

    fn fetch_candidates(&self, target: &str, scope: Option<&str>, conditions: Option<&JsonMap<String, Value>>) -> Result<Vec<Value>> {
        let mut filters: Vec<&JsonMap<String, Value>> = Vec::new();
        if let Some(scope) = scope {
            let Some(scope_conditions) = self.scopes.get(scope) else {
                bail!("unknown scope `{scope}` for {target}");
            };
            filters.push(scope_conditions);
        }
        filters.extend(conditions);

        let records = self.records.get(target).map(Vec::as_slice).unwrap_or_default();
        let matching: Vec<Value> = records
            .iter()
            .filter(|record| filters.iter().all(|filter| record_matches(record, filter)))
            .cloned()
            .collect();
        debug!(
            target = %target,
            scope = scope.unwrap_or("-"),
            record_count = matching.len(),
            "in-memory candidate fetch completed"
        );
        Ok(matching)
    }
}

impl EnumProvider for InMemoryModel {
    fn declared_enum(&self, model_name: &str, attribute: &str) -> Option<EnumMap> {
        if !self.owns(model_name) {
            return None;
        }
        self.enums.get(attribute).cloned()
    }
}

fn record_matches(record: &Value, conditions: &JsonMap<String, Value>) -> bool {
    conditions.iter().all(|(key, expected)| record.get(key) == Some(expected))
}
