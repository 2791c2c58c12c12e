//! # Model collaborators
//!
//! The engines never own model state. Everything they need to know about the
//! object behind a form is read through the traits in this module:
//!
//! - **`ModelAccessor`**: attribute values, lifecycle and human names
//! - **`AssociationProvider`**: association reflection and candidate records
//! - **`EnumProvider`**: enums declared on the model's class
//!
//! Two implementations ship with the crate: `NoModel` for forms rendered
//! without an object, and `InMemoryModel`, a serde-backed fixture that
//! implements all three traits.

use anyhow::Result;
use formwright_types::{AttributeValue, Lifecycle};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};

mod memory;
mod null;

pub use memory::InMemoryModel;
pub use null::NoModel;

/// Declared enum values in declaration order (`active => 0`, `inactive => 1`).
pub type EnumMap = IndexMap<String, i64>;

/// Storage type of a model attribute, when the model can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    String,
    Integer,
    Boolean,
    Other,
}

/// Read access to the object a form is built for.
pub trait ModelAccessor: Send + Sync {
    /// Underlying resource key (`post`). `None` when there is no object.
    fn model_name(&self) -> Option<&str>;
    fn attribute_value(&self, name: &str) -> AttributeValue;
    fn is_new_record(&self) -> bool;
    fn is_persisted(&self) -> bool;
    fn human_attribute_name(&self, name: &str) -> Option<String>;
    fn human_model_name(&self) -> Option<String>;

    fn column_type(&self, _name: &str) -> Option<ColumnType> {
        None
    }
}

/// Lifecycle derived from the accessor; persistence wins over newness.
pub fn lifecycle_of(model: &dyn ModelAccessor) -> Lifecycle {
    if model.is_persisted() {
        Lifecycle::Persisted
    } else if model.is_new_record() {
        Lifecycle::New
    } else {
        Lifecycle::None
    }
}

/// Whether an association maps one related record or many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    One,
    Many,
}

/// Association metadata for one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    pub cardinality: Cardinality,
    /// Target class name (`Author`).
    pub target: String,
    /// Attribute holding the current selection (`author_id`, `post_ids`).
    pub foreign_key: String,
    /// Named scope applied when fetching candidates.
    #[serde(default)]
    pub scope: Option<String>,
    /// Equality conditions applied when fetching candidates.
    #[serde(default)]
    pub conditions: Option<JsonMap<String, Value>>,
}

/// Association reflection and candidate lookup.
pub trait AssociationProvider: Send + Sync {
    fn reflect(&self, model_name: &str, attribute: &str) -> Option<Reflection>;

    /// Fetches candidate records for `target`, optionally narrowed by a named
    /// scope and equality conditions.
    fn fetch_candidates(&self, target: &str, scope: Option<&str>, conditions: Option<&JsonMap<String, Value>>) -> Result<Vec<Value>>;
}

/// Enum declarations on the model's class.
pub trait EnumProvider: Send + Sync {
    fn declared_enum(&self, model_name: &str, attribute: &str) -> Option<EnumMap>;
}
