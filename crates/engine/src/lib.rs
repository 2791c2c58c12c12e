//! # Formwright Engine
//!
//! The Formwright Engine resolves the visible text of form fields and turns
//! loosely-shaped collections into canonical, render-ready option lists.
//!
//! ## Key Features
//!
//! - **Label Resolution**: explicit labels, ordered translation candidates,
//!   lifecycle-aware key families (`create`/`update`) and humanized defaults
//! - **Collection Normalization**: scalars, sets, ranges, pairs, groups,
//!   enums and association records reduced to one entry type
//! - **Option Lists**: blank and prompt policy plus multiplicity overrides
//!
//! ## Usage
//!
//! ```rust
//! use formwright_engine::{FieldEnvironment, InMemoryModel, LocaleTable};
//! use formwright_types::{ActionKind, FieldContext, Lifecycle};
//! use formwright_util::FormConfig;
//!
//! let locales = LocaleTable::from_yaml_str("en:\n  submit: \"Save %{model}\"\n")?;
//! let config = FormConfig::default();
//! let model = InMemoryModel::new("post").with_lifecycle(Lifecycle::New);
//! let environment = FieldEnvironment::for_model(&locales, &config, &model);
//!
//! let button = environment.present_action(&FieldContext::action(ActionKind::Submit, "post"));
//! assert_eq!(button.label, "Save Post");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - **`translation`**: locale stores and ordered candidate lookup
//! - **`label`**: the label resolution engine
//! - **`collection`**: collection sources, classification and normalization
//! - **`options`**: the option list builder
//! - **`model`**: collaborator traits plus in-memory and null models
//! - **`field`**: per-field presentation for renderers

pub mod collection;
pub mod error;
pub mod field;
pub mod label;
pub mod model;
pub mod options;
pub mod translation;

pub use collection::{CollectionAdapter, CollectionSource, MemberSelection, NormalizeOptions, Normalized, classify};
pub use error::FieldError;
pub use field::{FieldBody, FieldEnvironment, FieldPresentation, SelectOptions};
pub use label::{LabelResolver, LookupKind};
pub use model::{AssociationProvider, Cardinality, ColumnType, EnumMap, EnumProvider, InMemoryModel, ModelAccessor, NoModel, Reflection};
pub use options::{BuildOptions, OptionListBuilder};
pub use translation::{CandidateKey, LocaleError, LocaleStore, LocaleTable, TranslationLookup};
