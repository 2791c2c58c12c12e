//! Classification of untyped collection data (JSON or YAML) into a
//! `CollectionSource`.

use formwright_types::Scalar;
use indexmap::IndexSet;
use serde_json::{Map as JsonMap, Value};

use super::CollectionSource;
use crate::error::FieldError;

/// Recognizes the shape of `value`.
///
/// | data                                  | source                 |
/// |---------------------------------------|------------------------|
/// | string                                | `PreRendered`          |
/// | `[scalar, ...]`                       | `Scalars`              |
/// | `[[label, scalar], ...]`              | `Pairs`                |
/// | `[[label, [...]], ...]`               | `Grouped`              |
/// | `[{...}, ...]`                        | `AssociationResultSet` |
/// | `{label: scalar, ...}`                | `Pairs`                |
/// | `{label: [...], ...}`                 | `Grouped`              |
/// | `{range: [first, last]}`              | `Range`                |
/// | `{set: [scalar, ...]}`                | `Set`                  |
pub fn classify(field: &str, value: &Value) -> Result<CollectionSource, FieldError> {
    match value {
        Value::String(markup) => Ok(CollectionSource::PreRendered(markup.clone())),
        Value::Array(items) => classify_array(field, items),
        Value::Object(map) => classify_object(field, map),
        Value::Null => Err(FieldError::shape(field, "null")),
        Value::Bool(_) | Value::Number(_) => Err(FieldError::shape(field, "bare scalar")),
    }
}

fn classify_array(field: &str, items: &[Value]) -> Result<CollectionSource, FieldError> {
    if let Some(scalars) = items.iter().map(Scalar::from_json).collect::<Option<Vec<_>>>() {
        return Ok(CollectionSource::Scalars(scalars));
    }
    if items.iter().all(Value::is_object) {
        return Ok(CollectionSource::AssociationResultSet(items.to_vec()));
    }
    if items.iter().all(|item| matches!(item, Value::Array(pair) if pair.len() == 2)) {
        return classify_pairs(field, items);
    }
    Err(FieldError::shape(field, "array mixing scalars, records and pairs"))
}

fn classify_pairs(field: &str, items: &[Value]) -> Result<CollectionSource, FieldError> {
    let mut pairs = Vec::with_capacity(items.len());
    let mut groups = Vec::new();
    for item in items {
        let Some([label, member]) = item.as_array().map(Vec::as_slice) else {
            return Err(FieldError::shape(field, "pair without two elements"));
        };
        let label = label_text(label).ok_or_else(|| FieldError::shape(field, "pair label is not a scalar"))?;
        match member {
            Value::Array(_) | Value::Object(_) => groups.push((label, classify(field, member)?)),
            other => {
                let value = Scalar::from_json(other).ok_or_else(|| FieldError::shape(field, "pair value is not a scalar"))?;
                pairs.push((label, value));
            }
        }
    }
    match (pairs.is_empty(), groups.is_empty()) {
        (_, true) => Ok(CollectionSource::Pairs(pairs)),
        (true, false) => Ok(CollectionSource::Grouped(groups)),
        (false, false) => Err(FieldError::shape(field, "pairs mixed with groups")),
    }
}

fn classify_object(field: &str, map: &JsonMap<String, Value>) -> Result<CollectionSource, FieldError> {
    if map.len() == 1 {
        if let Some(bounds @ Value::Array(_)) = map.get("range") {
            return classify_range(field, bounds);
        }
        if let Some(Value::Array(items)) = map.get("set") {
            let members = items
                .iter()
                .map(Scalar::from_json)
                .collect::<Option<IndexSet<_>>>()
                .ok_or_else(|| FieldError::shape(field, "set with non-scalar members"))?;
            return Ok(CollectionSource::Set(members));
        }
    }

    if map.values().all(|value| Scalar::from_json(value).is_some()) {
        let pairs = map
            .iter()
            .filter_map(|(label, value)| Scalar::from_json(value).map(|value| (label.clone(), value)))
            .collect();
        return Ok(CollectionSource::Pairs(pairs));
    }
    if map.values().all(|value| value.is_array() || value.is_object()) {
        let groups = map
            .iter()
            .map(|(label, inner)| classify(field, inner).map(|source| (label.clone(), source)))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(CollectionSource::Grouped(groups));
    }
    Err(FieldError::shape(field, "mapping mixing scalar values and groups"))
}

fn classify_range(field: &str, bounds: &Value) -> Result<CollectionSource, FieldError> {
    match bounds.as_array().map(Vec::as_slice) {
        Some([first, last]) => match (first.as_i64(), last.as_i64()) {
            (Some(first), Some(last)) => Ok(CollectionSource::Range(first..=last)),
            _ => Err(FieldError::shape(field, "range bounds must be integers")),
        },
        _ => Err(FieldError::shape(field, "range must be [first, last]")),
    }
}

fn label_text(value: &Value) -> Option<String> {
    Scalar::from_json(value).map(|scalar| scalar.to_param())
}
