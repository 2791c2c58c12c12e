//! Label and value extraction from association records.

use formwright_types::Scalar;
use formwright_util::FormConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which record fields become an option's label and value.
///
/// Unset fields fall back to the configured method lists
/// (`collection_label_methods`, `collection_value_methods`). Field names may
/// be dotted paths (`profile.display_name`) and may index arrays
/// (`aliases[0]`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSelection {
    #[serde(default)]
    pub label_field: Option<String>,
    #[serde(default)]
    pub value_field: Option<String>,
}

impl MemberSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label_field(mut self, field: impl Into<String>) -> Self {
        self.label_field = Some(field.into());
        self
    }

    pub fn with_value_field(mut self, field: impl Into<String>) -> Self {
        self.value_field = Some(field.into());
        self
    }

    /// Display label of `record`. Falls back to the first string field, then
    /// to the record's value.
    pub(crate) fn label_of(&self, record: &Value, config: &FormConfig) -> Option<String> {
        let fields = self.label_field.iter().chain(&config.collection_label_methods);
        fields
            .filter_map(|field| select_path(record, field))
            .find_map(scalar_text)
            .or_else(|| first_text_field(record))
            .or_else(|| self.value_of(record, config).map(|value| value.to_param()))
    }

    /// Identity of `record`.
    pub(crate) fn value_of(&self, record: &Value, config: &FormConfig) -> Option<Scalar> {
        let fields = self.value_field.iter().chain(&config.collection_value_methods);
        fields
            .filter_map(|field| select_path(record, field))
            .find_map(Scalar::from_json)
            .or_else(|| Scalar::from_json(record))
    }
}

/// Walks a dotted path with optional `[n]` indices into `value`.
fn select_path<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut current = value;
    for segment in trimmed.split('.').filter(|segment| !segment.is_empty()) {
        let (key, indices) = split_indices(segment);
        if !key.is_empty() {
            current = current.get(key)?;
        }
        for index in indices {
            current = current.get(index)?;
        }
    }
    Some(current)
}

fn split_indices(segment: &str) -> (&str, Vec<usize>) {
    let Some(open) = segment.find('[') else {
        return (segment, Vec::new());
    };
    let indices = segment[open..]
        .split(['[', ']'])
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse().ok())
        .collect();
    (&segment[..open], indices)
}

fn scalar_text(value: &Value) -> Option<String> {
    Scalar::from_json(value)
        .map(|scalar| scalar.to_param())
        .filter(|text| !text.trim().is_empty())
}

fn first_text_field(record: &Value) -> Option<String> {
    match record {
        Value::String(text) => Some(text.clone()),
        Value::Object(map) => map
            .values()
            .find_map(|value| value.as_str().filter(|text| !text.trim().is_empty()).map(str::to_string)),
        _ => None,
    }
}
