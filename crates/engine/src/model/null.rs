use anyhow::Result;
use formwright_types::AttributeValue;
use serde_json::{Map as JsonMap, Value};

use super::{AssociationProvider, EnumMap, EnumProvider, ModelAccessor, Reflection};

/// Stand-in for forms built without an object.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoModel;

impl ModelAccessor for NoModel {
    fn model_name(&self) -> Option<&str> {
        None
    }

    fn attribute_value(&self, _name: &str) -> AttributeValue {
        AttributeValue::Absent
    }

    fn is_new_record(&self) -> bool {
        false
    }

    fn is_persisted(&self) -> bool {
        false
    }

    fn human_attribute_name(&self, _name: &str) -> Option<String> {
        None
    }

    fn human_model_name(&self) -> Option<String> {
        None
    }
}

impl AssociationProvider for NoModel {
    fn reflect(&self, _model_name: &str, _attribute: &str) -> Option<Reflection> {
        None
    }

    fn fetch_candidates(&self, _target: &str, _scope: Option<&str>, _conditions: Option<&JsonMap<String, Value>>) -> Result<Vec<Value>> {
        Ok(Vec::new())
    }
}

impl EnumProvider for NoModel {
    fn declared_enum(&self, _model_name: &str, _attribute: &str) -> Option<EnumMap> {
        None
    }
}
