//! Shared type definitions for Formwright.
//!
//! The values here are built fresh for each field render and handed between
//! the label engine, the collection adapter, the option list builder and
//! whatever renderer sits on top of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number as JsonNumber, Value as JsonValue};

pub mod collection;
pub mod field;

pub use collection::{CollectionEntry, NormalizedCollection, OptionGroup};
pub use field::{ActionKind, FieldContext, FieldKind, Lifecycle};

/// A comparable, hashable option value.
///
/// Deserialization is untagged: booleans, integers, other numbers and
/// strings map onto the first four variants. `Symbol` is only produced by
/// Rust callers that want to mark a value as a symbolic token; it compares
/// equal to `Text` holding the same name when used for selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Boolean(bool),
    Integer(i64),
    /// Fractional numbers and integers beyond `i64`.
    Number(NumberText),
    Text(String),
    Symbol(String),
}

/// A number kept in the text form it was written in, so it can be hashed,
/// ordered and posted back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NumberText(String);

impl NumberText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&JsonNumber> for NumberText {
    fn from(number: &JsonNumber) -> Self {
        NumberText(number.to_string())
    }
}

impl Serialize for NumberText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match JsonNumber::from_str(&self.0) {
            Ok(number) => number.serialize(serializer),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for NumberText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonNumber::deserialize(deserializer).map(|number| NumberText::from(&number))
    }
}

impl Scalar {
    /// The empty text value carried by blank and prompt entries.
    pub fn blank() -> Self {
        Scalar::Text(String::new())
    }

    /// Canonical string form used when the value is submitted with a form.
    pub fn to_param(&self) -> String {
        match self {
            Scalar::Boolean(value) => value.to_string(),
            Scalar::Integer(value) => value.to_string(),
            Scalar::Number(value) => value.as_str().to_string(),
            Scalar::Text(value) | Scalar::Symbol(value) => value.clone(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Scalar::Text(text) | Scalar::Symbol(text) if text.trim().is_empty())
    }

    /// Value equality on the submitted form of both sides.
    ///
    /// `Integer(1)` matches `Text("1")` because that is what the browser posts
    /// back for either of them.
    pub fn matches(&self, other: &Scalar) -> bool {
        self == other || self.to_param() == other.to_param()
    }

    /// Converts a JSON scalar into a `Scalar`. Arrays, objects and null are
    /// rejected.
    pub fn from_json(value: &JsonValue) -> Option<Scalar> {
        match value {
            JsonValue::Bool(flag) => Some(Scalar::Boolean(*flag)),
            JsonValue::Number(number) => Some(
                number
                    .as_i64()
                    .map(Scalar::Integer)
                    .unwrap_or_else(|| Scalar::Number(NumberText::from(number))),
            ),
            JsonValue::String(text) => Some(Scalar::Text(text.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_param())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Boolean(value)
    }
}

/// Current value of a model attribute as read through the model accessor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    #[default]
    Absent,
    One(Scalar),
    Many(Vec<Scalar>),
}

impl AttributeValue {
    /// Builds an attribute value from arbitrary JSON; unsupported shapes are
    /// treated as absent.
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => AttributeValue::Absent,
            JsonValue::Array(items) => AttributeValue::Many(items.iter().filter_map(Scalar::from_json).collect()),
            other => Scalar::from_json(other).map(AttributeValue::One).unwrap_or_default(),
        }
    }

    pub fn is_absent(&self) -> bool {
        match self {
            AttributeValue::Absent => true,
            AttributeValue::One(value) => value.is_blank(),
            AttributeValue::Many(values) => values.is_empty(),
        }
    }

    pub fn is_many(&self) -> bool {
        matches!(self, AttributeValue::Many(_))
    }

    /// Returns true when `candidate` is one of the current values.
    pub fn contains(&self, candidate: &Scalar) -> bool {
        match self {
            AttributeValue::Absent => false,
            AttributeValue::One(value) => !value.is_blank() && value.matches(candidate),
            AttributeValue::Many(values) => values.iter().any(|value| value.matches(candidate)),
        }
    }
}

impl From<Scalar> for AttributeValue {
    fn from(value: Scalar) -> Self {
        AttributeValue::One(value)
    }
}

impl From<Vec<Scalar>> for AttributeValue {
    fn from(values: Vec<Scalar>) -> Self {
        AttributeValue::Many(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_and_text_values_match_on_param_form() {
        assert!(Scalar::Integer(3).matches(&Scalar::Text("3".into())));
        assert!(Scalar::Symbol("active".into()).matches(&Scalar::Text("active".into())));
        assert!(!Scalar::Boolean(true).matches(&Scalar::Text("false".into())));
    }

    #[test]
    fn attribute_value_from_json_keeps_sequences() {
        let value = AttributeValue::from_json(&json!([1, "two", null]));
        assert_eq!(value, AttributeValue::Many(vec![Scalar::Integer(1), Scalar::Text("two".into())]));
        assert!(AttributeValue::from_json(&json!(null)).is_absent());
        assert!(AttributeValue::from_json(&json!("")).is_absent());
    }

    #[test]
    fn blank_scalar_is_never_selected() {
        let value = AttributeValue::One(Scalar::blank());
        assert!(!value.contains(&Scalar::blank()));
    }

    #[test]
    fn scalars_deserialize_untagged() {
        let values: Vec<Scalar> = serde_yaml::from_str("[true, 4, hands]").expect("parse scalars");
        assert_eq!(values, vec![Scalar::Boolean(true), Scalar::Integer(4), Scalar::Text("hands".into())]);
    }

    #[test]
    fn fractional_and_oversized_numbers_are_scalars() {
        let half = Scalar::from_json(&json!(0.5)).expect("fractional scalar");
        assert_eq!(half.to_param(), "0.5");
        assert!(matches!(half, Scalar::Number(_)));
        let huge = Scalar::from_json(&json!(u64::MAX)).expect("oversized scalar");
        assert_eq!(huge.to_param(), u64::MAX.to_string());
        assert!(half.matches(&Scalar::Text("0.5".into())));

        let values: Vec<Scalar> = serde_yaml::from_str("[1.5, 2, weight]").expect("parse scalars");
        assert_eq!(values[0].to_param(), "1.5");
        assert_eq!(values[1], Scalar::Integer(2));
        assert_eq!(serde_json::to_string(&values[0]).expect("serialize"), "1.5");
    }
}
