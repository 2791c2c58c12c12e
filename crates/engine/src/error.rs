//! Errors surfaced while normalizing a field's collection.
//!
//! All of these are usage or configuration errors detected synchronously;
//! none of them is retried. Translation misses are not errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("collection for `{field}` has an unsupported shape: {shape}")]
    UnsupportedCollectionShape { field: String, shape: String },

    #[error("`{field}` is backed by an enum and cannot be rendered as a multiple select")]
    UnsupportedEnumMultiple { field: String },

    #[error("no collection given for `{field}` and `{resource}` has no association, enum or boolean column to derive one from")]
    MissingAssociationMetadata { field: String, resource: String },

    #[error("failed to fetch `{target}` candidates for `{field}`: {source}")]
    CandidateFetch {
        field: String,
        target: String,
        #[source]
        source: anyhow::Error,
    },
}

impl FieldError {
    pub(crate) fn shape(field: &str, shape: impl Into<String>) -> Self {
        FieldError::UnsupportedCollectionShape {
            field: field.to_string(),
            shape: shape.into(),
        }
    }
}
