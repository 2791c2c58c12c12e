//! Everything a renderer needs for one field, assembled from the engines.
//!
//! `FieldEnvironment` bundles the collaborators lent in by the host and wires
//! the label resolver, collection adapter and option list builder together.
//! Markup generation stays with the renderer.

use formwright_types::{ActionKind, FieldContext, FieldKind, Lifecycle, NormalizedCollection};
use formwright_util::FormConfig;
use serde::{Deserialize, Serialize};

use crate::collection::{CollectionAdapter, CollectionSource, NormalizeOptions, Normalized};
use crate::error::FieldError;
use crate::label::{LabelResolver, LookupKind};
use crate::model::{AssociationProvider, EnumProvider, ModelAccessor, lifecycle_of};
use crate::options::{BuildOptions, OptionListBuilder};
use crate::translation::LocaleStore;

/// Options for presenting a select field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectOptions {
    pub normalize: NormalizeOptions,
    pub build: BuildOptions,
    pub required: bool,
    pub hint: Option<String>,
}

/// Body of a presented field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldBody {
    Options { collection: NormalizedCollection },
    PreRendered { markup: String },
    Button,
}

/// Resolved text and options for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldPresentation {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accesskey: Option<String>,
    /// Whether the renderer should emit the `required` attribute.
    pub required_attribute: bool,
    pub body: FieldBody,
}

impl FieldPresentation {
    /// Multi-selects need an accompanying hidden empty value so that
    /// deselecting everything still submits the field.
    pub fn needs_hidden_input(&self) -> bool {
        matches!(&self.body, FieldBody::Options { collection } if collection.is_multiple)
    }

    pub fn options(&self) -> Option<&NormalizedCollection> {
        match &self.body {
            FieldBody::Options { collection } => Some(collection),
            _ => None,
        }
    }
}

/// Collaborators shared by every field of one form.
#[derive(Clone, Copy)]
pub struct FieldEnvironment<'a> {
    locales: &'a dyn LocaleStore,
    config: &'a FormConfig,
    model: &'a dyn ModelAccessor,
    associations: &'a dyn AssociationProvider,
    enums: &'a dyn EnumProvider,
}

impl<'a> FieldEnvironment<'a> {
    pub fn new(
        locales: &'a dyn LocaleStore,
        config: &'a FormConfig,
        model: &'a dyn ModelAccessor,
        associations: &'a dyn AssociationProvider,
        enums: &'a dyn EnumProvider,
    ) -> Self {
        Self {
            locales,
            config,
            model,
            associations,
            enums,
        }
    }

    /// Environment for a model that provides every collaborator itself.
    pub fn for_model<M>(locales: &'a dyn LocaleStore, config: &'a FormConfig, model: &'a M) -> Self
    where
        M: ModelAccessor + AssociationProvider + EnumProvider,
    {
        Self::new(locales, config, model, model, model)
    }

    pub fn labels(&self) -> LabelResolver<'a> {
        LabelResolver::new(self.locales, self.config).with_model(self.model)
    }

    pub fn adapter(&self) -> CollectionAdapter<'a> {
        CollectionAdapter::new(self.labels(), self.model, self.associations, self.enums)
    }

    pub fn builder(&self) -> OptionListBuilder<'a> {
        OptionListBuilder::new(self.config)
    }

    /// Fills the lifecycle and human resource name from the model where the
    /// caller left them unset.
    pub fn contextualize(&self, mut context: FieldContext) -> FieldContext {
        if context.lifecycle == Lifecycle::None {
            context.lifecycle = lifecycle_of(self.model);
        }
        if context.resource_human_name.is_none() {
            context.resource_human_name = self.model.human_model_name();
        }
        context
    }

    /// Presents an action button.
    pub fn present_action(&self, context: &FieldContext) -> FieldPresentation {
        let context = self.contextualize(context.clone());
        let accesskey = match context.kind() {
            FieldKind::Action(ActionKind::Submit) => self.config.default_commit_button_accesskey.clone(),
            _ => None,
        };
        FieldPresentation {
            label: self.labels().resolve_label(&context),
            hint: None,
            placeholder: None,
            accesskey,
            required_attribute: false,
            body: FieldBody::Button,
        }
    }

    /// Presents a select: label, hint and the built option list.
    ///
    /// A `multiple` given to the builder takes precedence over the one given
    /// to the adapter, and both are checked against enum-backed attributes.
    pub fn present_select(&self, context: &FieldContext, source: Option<CollectionSource>, options: &SelectOptions) -> Result<FieldPresentation, FieldError> {
        let context = self.contextualize(context.clone());
        let labels = self.labels();
        let normalize = NormalizeOptions {
            multiple: options.build.multiple.or(options.normalize.multiple),
            ..options.normalize.clone()
        };
        let body = match self.adapter().normalize(&context, source, &normalize)? {
            Normalized::Options(collection) => FieldBody::Options {
                collection: self.builder().build(collection, &options.build),
            },
            Normalized::PreRendered(markup) => FieldBody::PreRendered { markup },
        };
        Ok(FieldPresentation {
            label: labels.resolve_label(&context),
            hint: labels.resolve_localized(LookupKind::Hint, &context, options.hint.as_deref()),
            placeholder: labels.resolve_localized(LookupKind::Placeholder, &context, None),
            accesskey: None,
            required_attribute: options.required && self.config.use_required_attribute,
            body,
        })
    }
}
