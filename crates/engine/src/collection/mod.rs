//! # Collection Normalization
//!
//! Turns any supported collection representation into a canonical, ordered
//! list of `CollectionEntry` values and marks the entries matching the
//! field's current value as selected.
//!
//! Modules:
//! - `classify`: shape recognition for untyped JSON/YAML collections
//! - `members`: label/value extraction from association records
//!
//! When the caller gives no collection, one is derived from the model: a
//! declared enum, then an association (candidates fetched through the
//! `AssociationProvider`), then a boolean column. Pre-rendered markup is
//! never parsed and is handed back untouched.

mod classify;
mod members;

pub use classify::classify;
pub use members::MemberSelection;

use std::ops::RangeInclusive;

use formwright_types::{AttributeValue, CollectionEntry, FieldContext, NormalizedCollection, Scalar};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::FieldError;
use crate::label::LabelResolver;
use crate::model::{AssociationProvider, Cardinality, ColumnType, EnumMap, EnumProvider, ModelAccessor, Reflection};

/// Every collection shape the adapter understands.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionSource {
    /// Each element is both label and value.
    Scalars(Vec<Scalar>),
    /// Like `Scalars`, in the set's own iteration order.
    Set(IndexSet<Scalar>),
    /// Expanded eagerly in ascending order.
    Range(RangeInclusive<i64>),
    /// `(label, value)` pairs.
    Pairs(Vec<(String, Scalar)>),
    /// Group label followed by a non-grouped inner collection.
    Grouped(Vec<(String, CollectionSource)>),
    /// Markup rendered elsewhere; passed through verbatim.
    PreRendered(String),
    /// Enum declared on the model, keys in declaration order.
    Enum(EnumMap),
    /// Records fetched for an association.
    AssociationResultSet(Vec<Value>),
}

impl CollectionSource {
    fn shape_name(&self) -> &'static str {
        match self {
            CollectionSource::Scalars(_) => "scalars",
            CollectionSource::Set(_) => "set",
            CollectionSource::Range(_) => "range",
            CollectionSource::Pairs(_) => "pairs",
            CollectionSource::Grouped(_) => "grouped",
            CollectionSource::PreRendered(_) => "pre-rendered markup",
            CollectionSource::Enum(_) => "enum",
            CollectionSource::AssociationResultSet(_) => "association records",
        }
    }
}

/// Converts a normalized collection back into a source.
///
/// Blank and prompt entries are builder output and are dropped, so feeding
/// the result back through the adapter reproduces the same entries.
impl From<&NormalizedCollection> for CollectionSource {
    fn from(collection: &NormalizedCollection) -> Self {
        let pairs_of = |entries: &[&CollectionEntry]| -> Vec<(String, Scalar)> {
            entries
                .iter()
                .filter(|entry| !entry.is_blank())
                .map(|entry| (entry.label.clone(), entry.value.clone()))
                .collect()
        };
        if !collection.is_grouped {
            let entries: Vec<&CollectionEntry> = collection.entries.iter().collect();
            return CollectionSource::Pairs(pairs_of(entries.as_slice()));
        }
        let groups = collection
            .groups()
            .into_iter()
            .map(|group| (group.label.unwrap_or_default().to_string(), pairs_of(group.entries.as_slice())))
            .filter(|(_, pairs)| !pairs.is_empty())
            .map(|(label, pairs)| (label, CollectionSource::Pairs(pairs)))
            .collect();
        CollectionSource::Grouped(groups)
    }
}

/// Per-call normalization options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Replaces the model's current value when computing selection.
    pub selected: Option<AttributeValue>,
    /// Which record fields become labels and values.
    pub member: MemberSelection,
    /// Forces multi- or single-select presentation.
    pub multiple: Option<bool>,
}

/// Adapter output: either canonical entries or opaque markup.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Options(NormalizedCollection),
    PreRendered(String),
}

impl Normalized {
    pub fn options(&self) -> Option<&NormalizedCollection> {
        match self {
            Normalized::Options(collection) => Some(collection),
            Normalized::PreRendered(_) => None,
        }
    }

    pub fn into_options(self) -> Option<NormalizedCollection> {
        match self {
            Normalized::Options(collection) => Some(collection),
            Normalized::PreRendered(_) => None,
        }
    }
}

/// Source resolved for a field together with where its selection comes from.
struct ResolvedSource {
    source: CollectionSource,
    selection_attribute: String,
    to_many: bool,
}

/// Normalizes collections for fields on one model.
pub struct CollectionAdapter<'a> {
    labels: LabelResolver<'a>,
    model: &'a dyn ModelAccessor,
    associations: &'a dyn AssociationProvider,
    enums: &'a dyn EnumProvider,
}

impl<'a> CollectionAdapter<'a> {
    pub fn new(
        labels: LabelResolver<'a>,
        model: &'a dyn ModelAccessor,
        associations: &'a dyn AssociationProvider,
        enums: &'a dyn EnumProvider,
    ) -> Self {
        Self {
            labels,
            model,
            associations,
            enums,
        }
    }

    /// Normalizes `source`, or the collection implied by the model when
    /// `source` is `None`.
    pub fn normalize(&self, context: &FieldContext, source: Option<CollectionSource>, options: &NormalizeOptions) -> Result<Normalized, FieldError> {
        let field = context.field_name.as_str();
        let reflection = self.reflection(field);
        let resolved = match source {
            Some(source) => ResolvedSource {
                source,
                selection_attribute: reflection
                    .as_ref()
                    .map(|reflection| reflection.foreign_key.clone())
                    .unwrap_or_else(|| field.to_string()),
                to_many: reflection.as_ref().is_some_and(|reflection| reflection.cardinality == Cardinality::Many),
            },
            None => self.implicit_source(context, reflection)?,
        };

        if options.multiple == Some(true) && (matches!(resolved.source, CollectionSource::Enum(_)) || self.is_enum_backed(field)) {
            return Err(FieldError::UnsupportedEnumMultiple { field: field.to_string() });
        }
        if let CollectionSource::PreRendered(markup) = &resolved.source {
            debug!(field = %field, "passing pre-rendered collection through");
            return Ok(Normalized::PreRendered(markup.clone()));
        }

        let selection = options
            .selected
            .clone()
            .unwrap_or_else(|| self.model.attribute_value(&resolved.selection_attribute));
        let mut entries = self.entries(context, &resolved.source, &options.member)?;
        for entry in &mut entries {
            entry.selected = selection.contains(&entry.value);
        }

        let mut collection = NormalizedCollection::new(entries);
        collection.is_multiple = options.multiple.unwrap_or(resolved.to_many || selection.is_many());
        debug!(
            field = %field,
            shape = resolved.source.shape_name(),
            entry_count = collection.len(),
            is_grouped = collection.is_grouped,
            is_multiple = collection.is_multiple,
            "normalized collection"
        );
        Ok(Normalized::Options(collection))
    }

    /// True when the model declares an enum for `field`, whatever collection
    /// the caller passed.
    fn is_enum_backed(&self, field: &str) -> bool {
        self.model
            .model_name()
            .is_some_and(|model_name| self.enums.declared_enum(model_name, field).is_some())
    }

    fn reflection(&self, field: &str) -> Option<Reflection> {
        let model_name = self.model.model_name()?;
        self.associations.reflect(model_name, field)
    }

    fn implicit_source(&self, context: &FieldContext, reflection: Option<Reflection>) -> Result<ResolvedSource, FieldError> {
        let field = context.field_name.as_str();
        let model_name = self.model.model_name();

        if let Some(values) = model_name.and_then(|model_name| self.enums.declared_enum(model_name, field)) {
            return Ok(ResolvedSource {
                source: CollectionSource::Enum(values),
                selection_attribute: field.to_string(),
                to_many: false,
            });
        }

        if let Some(reflection) = reflection {
            let records = self
                .associations
                .fetch_candidates(&reflection.target, reflection.scope.as_deref(), reflection.conditions.as_ref())
                .map_err(|source| FieldError::CandidateFetch {
                    field: field.to_string(),
                    target: reflection.target.clone(),
                    source,
                })?;
            return Ok(ResolvedSource {
                source: CollectionSource::AssociationResultSet(records),
                selection_attribute: reflection.foreign_key,
                to_many: reflection.cardinality == Cardinality::Many,
            });
        }

        if self.model.column_type(field) == Some(ColumnType::Boolean) {
            let pairs = [true, false]
                .into_iter()
                .map(|flag| (self.labels.boolean_label(flag), Scalar::Boolean(flag)))
                .collect();
            return Ok(ResolvedSource {
                source: CollectionSource::Pairs(pairs),
                selection_attribute: field.to_string(),
                to_many: false,
            });
        }

        Err(FieldError::MissingAssociationMetadata {
            field: field.to_string(),
            resource: model_name.unwrap_or(context.resource_name.as_str()).to_string(),
        })
    }

    fn entries(&self, context: &FieldContext, source: &CollectionSource, member: &MemberSelection) -> Result<Vec<CollectionEntry>, FieldError> {
        let field = context.field_name.as_str();
        let entries = match source {
            CollectionSource::Scalars(values) => values.iter().map(scalar_entry).collect(),
            CollectionSource::Set(values) => values.iter().map(scalar_entry).collect(),
            CollectionSource::Range(range) => range.clone().map(|value| scalar_entry(&Scalar::Integer(value))).collect(),
            CollectionSource::Pairs(pairs) => pairs
                .iter()
                .map(|(label, value)| CollectionEntry::new(label.clone(), value.clone()))
                .collect(),
            CollectionSource::Enum(values) => {
                let resource = self.model.model_name().unwrap_or(context.resource_name.as_str());
                values
                    .keys()
                    .map(|key| CollectionEntry::new(self.labels.enum_value_label(resource, field, key), key.as_str()))
                    .collect()
            }
            CollectionSource::AssociationResultSet(records) => {
                let config = self.labels.config();
                records
                    .iter()
                    .map(|record| {
                        let value = member
                            .value_of(record, config)
                            .ok_or_else(|| FieldError::shape(field, format!("record without a value field: {record}")))?;
                        let label = member.label_of(record, config).unwrap_or_else(|| value.to_param());
                        Ok(CollectionEntry::new(label, value))
                    })
                    .collect::<Result<_, FieldError>>()?
            }
            CollectionSource::Grouped(groups) => {
                let mut entries = Vec::new();
                for (label, inner) in groups {
                    if matches!(inner, CollectionSource::Grouped(_) | CollectionSource::PreRendered(_)) {
                        return Err(FieldError::shape(field, format!("{} inside group `{label}`", inner.shape_name())));
                    }
                    entries.extend(self.entries(context, inner, member)?.into_iter().map(|entry| entry.in_group(label.clone())));
                }
                entries
            }
            CollectionSource::PreRendered(_) => return Err(FieldError::shape(field, "pre-rendered markup cannot be expanded")),
        };
        Ok(entries)
    }
}

fn scalar_entry(value: &Scalar) -> CollectionEntry {
    CollectionEntry::new(value.to_param(), value.clone())
}
