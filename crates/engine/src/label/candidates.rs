//! Candidate key construction for labels, hints, placeholders and prompts.
//!
//! Every list is built fresh from the field context and is evaluated strictly
//! in order by `TranslationLookup`.

use formwright_types::{ActionKind, FieldContext, FieldKind, Lifecycle};
use formwright_util::{FormConfig, Interpolations};

use crate::translation::CandidateKey;

/// Translation scope a lookup runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Action,
    Label,
    Hint,
    Placeholder,
    Prompt,
}

impl LookupKind {
    pub fn scope(&self) -> &'static str {
        match self {
            LookupKind::Action => "actions",
            LookupKind::Label => "labels",
            LookupKind::Hint => "hints",
            LookupKind::Placeholder => "placeholders",
            LookupKind::Prompt => "prompts",
        }
    }

    /// Lookup kind used for the visible text of `context`.
    pub fn for_field(context: &FieldContext) -> Self {
        match context.kind() {
            FieldKind::Action(_) => LookupKind::Action,
            FieldKind::Input => LookupKind::Label,
        }
    }
}

/// Action or attribute name after the lifecycle substitution: a submit button
/// becomes `create` on new records and `update` on persisted ones.
pub fn effective_name(context: &FieldContext) -> String {
    match (context.action, context.lifecycle) {
        (ActionKind::Submit, Lifecycle::New) => "create".to_string(),
        (ActionKind::Submit, Lifecycle::Persisted) => "update".to_string(),
        (ActionKind::None, _) => context.field_name.clone(),
        (action, _) => action.as_str().unwrap_or_default().to_string(),
    }
}

/// Resource-scoped keys tried under `kind`'s scope, most specific first:
/// namespaced resource key, lifecycle-nested key (inputs only), resource
/// key, then the generic key.
pub(crate) fn scoped_candidates(kind: LookupKind, context: &FieldContext, config: &FormConfig, values: &Interpolations) -> Vec<CandidateKey> {
    let scope = kind.scope();
    let effective = effective_name(context);
    let resource = context.resource_name.as_str();
    let mut paths = Vec::new();

    if !resource.is_empty() {
        if let Some(namespace) = context.namespace.as_deref().filter(|namespace| !namespace.is_empty()) {
            paths.push(config.scoped_path([scope, namespace, resource, effective.as_str()]));
        }
        if kind != LookupKind::Action
            && let Some(state) = lifecycle_segment(context.lifecycle)
        {
            paths.push(config.scoped_path([scope, resource, state, effective.as_str()]));
        }
        paths.push(config.scoped_path([scope, resource, effective.as_str()]));
    }
    paths.push(config.scoped_path([scope, effective.as_str()]));

    paths.into_iter().map(|path| CandidateKey::new(path).with_all(values)).collect()
}

/// Fallback key family, tried regardless of the i18n switch.
pub(crate) fn fallback_candidates(context: &FieldContext, config: &FormConfig, values: &Interpolations) -> Vec<CandidateKey> {
    let family: Vec<&str> = match (context.action, context.lifecycle) {
        (ActionKind::Submit, Lifecycle::New) => vec!["create", "submit"],
        (ActionKind::Submit, Lifecycle::Persisted) => vec!["update", "save", "submit"],
        (ActionKind::None, _) => vec![context.field_name.as_str()],
        (action, _) => action.as_str().into_iter().collect(),
    };
    family
        .into_iter()
        .filter(|key| !key.is_empty())
        .map(|key| CandidateKey::new(config.scoped_path([key])).with_all(values))
        .collect()
}

fn lifecycle_segment(lifecycle: Lifecycle) -> Option<&'static str> {
    match lifecycle {
        Lifecycle::New => Some("new"),
        Lifecycle::Persisted => Some("edit"),
        Lifecycle::None => None,
    }
}
