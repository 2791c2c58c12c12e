//! # Label Resolution
//!
//! Picks the visible text of an action button or input from a prioritized
//! chain of sources:
//!
//! 1. the caller's explicit label (and, for buttons, the explicit value)
//! 2. resource-scoped and generic translation keys, when i18n lookups are on
//! 3. the fallback key family for the field, always tried
//! 4. the model's human attribute name (inputs only)
//! 5. a humanized default, which is never empty
//!
//! Submit buttons look up `create` on new records and `update` on persisted
//! ones; the humanized default keeps the declared action name. A resource
//! alias only changes what `%{model}` expands to, never a lookup path.

mod candidates;

pub use candidates::{LookupKind, effective_name};

use formwright_types::{ActionKind, FieldContext, FieldKind};
use formwright_util::{FormConfig, Interpolations, humanize, pluralize};
use tracing::debug;

use crate::model::ModelAccessor;
use crate::translation::{CandidateKey, LocaleStore, TranslationLookup};

/// Resolves labels and other localized field text for one render call.
#[derive(Clone, Copy)]
pub struct LabelResolver<'a> {
    lookup: TranslationLookup<'a>,
    config: &'a FormConfig,
    model: Option<&'a dyn ModelAccessor>,
}

impl<'a> LabelResolver<'a> {
    pub fn new(store: &'a dyn LocaleStore, config: &'a FormConfig) -> Self {
        Self {
            lookup: TranslationLookup::new(store),
            config,
            model: None,
        }
    }

    pub fn with_model(mut self, model: &'a dyn ModelAccessor) -> Self {
        self.model = Some(model);
        self
    }

    pub fn config(&self) -> &'a FormConfig {
        self.config
    }

    /// Resolves the label using the configured i18n switch.
    pub fn resolve_label(&self, context: &FieldContext) -> String {
        self.resolve_label_with(context, self.config.i18n_lookups_by_default)
    }

    pub fn resolve_label_with(&self, context: &FieldContext, use_i18n: bool) -> String {
        if let Some(label) = &context.explicit_label {
            return label.clone();
        }
        if let FieldKind::Action(_) = context.kind()
            && let Some(value) = context.explicit_value.as_deref().filter(|value| !value.trim().is_empty())
        {
            return value.to_string();
        }

        let candidates = self.candidate_keys(context, use_i18n);
        if let Some(text) = self.lookup.resolve(&candidates).filter(|text| !text.trim().is_empty()) {
            return text;
        }

        if context.kind() == FieldKind::Input
            && let Some(human) = self
                .model
                .and_then(|model| model.human_attribute_name(&context.field_name))
                .filter(|human| !human.trim().is_empty())
        {
            return human;
        }

        let fallback = self.humanized_default(context);
        debug!(
            field = %context.field_name,
            resource = %context.resource_name,
            label = %fallback,
            "no translation found; using humanized label"
        );
        fallback
    }

    /// Ordered translation candidates for the field's label.
    pub fn candidate_keys(&self, context: &FieldContext, use_i18n: bool) -> Vec<CandidateKey> {
        let values = self.interpolations(context);
        let mut keys = Vec::new();
        if use_i18n {
            keys.extend(candidates::scoped_candidates(LookupKind::for_field(context), context, self.config, &values));
        }
        keys.extend(candidates::fallback_candidates(context, self.config, &values));
        keys
    }

    /// Localized hint, placeholder or prompt text.
    ///
    /// A non-blank `explicit` value wins. Otherwise the scoped keys are tried
    /// regardless of the i18n switch; there is no humanized fallback.
    pub fn resolve_localized(&self, kind: LookupKind, context: &FieldContext, explicit: Option<&str>) -> Option<String> {
        if let Some(text) = explicit.filter(|text| !text.trim().is_empty()) {
            return Some(text.to_string());
        }
        let values = self.interpolations(context);
        let keys = candidates::scoped_candidates(kind, context, self.config, &values);
        self.lookup.resolve(&keys).filter(|text| !text.trim().is_empty())
    }

    /// Human-readable label of a declared enum value.
    ///
    /// Tries `<model scope>.attributes.<resource>.<attribute plural>.<key>`,
    /// then `<form scope>.<attribute plural>.<key>`, then humanizes the key.
    pub fn enum_value_label(&self, resource: &str, attribute: &str, key: &str) -> String {
        let plural = pluralize(attribute);
        let mut keys = Vec::with_capacity(2);
        if !resource.is_empty() {
            keys.push(CandidateKey::new(self.config.model_scoped_path(["attributes", resource, plural.as_str(), key])));
        }
        keys.push(CandidateKey::new(self.config.scoped_path([plural.as_str(), key])));
        self.lookup
            .resolve(&keys)
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| humanize(key))
    }

    /// Label for one side of a boolean select (`yes`/`no` keys).
    pub fn boolean_label(&self, value: bool) -> String {
        let (key, default) = if value { ("yes", "Yes") } else { ("no", "No") };
        self.lookup
            .resolve(&[CandidateKey::new(self.config.scoped_path([key]))])
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    /// Name substituted for `%{model}` and appended to humanized action
    /// labels. `None` only when the field has no resource at all.
    pub fn display_name(&self, context: &FieldContext) -> Option<String> {
        if let Some(name) = context.display_name() {
            return Some(name.to_string());
        }
        if let Some(name) = self.model.and_then(|model| model.human_model_name()).filter(|name| !name.trim().is_empty()) {
            return Some(name);
        }
        Some(humanize(&context.resource_name)).filter(|name| !name.is_empty())
    }

    /// Text used when no translation applies.
    pub fn humanized_default(&self, context: &FieldContext) -> String {
        let display_name = self.display_name(context);
        let base = match context.action {
            ActionKind::None => humanize(&context.field_name),
            action => humanize(action.as_str().unwrap_or_default()),
        };
        match (context.kind(), display_name) {
            (FieldKind::Action(_), Some(name)) => format!("{base} {name}"),
            (_, name) if base.trim().is_empty() => name.unwrap_or_else(|| "Field".to_string()),
            _ => base,
        }
    }

    fn interpolations(&self, context: &FieldContext) -> Interpolations {
        let mut values = Interpolations::new();
        if let Some(name) = self.display_name(context) {
            values.insert("model".to_string(), name);
        }
        if context.kind() == FieldKind::Input && !context.field_name.is_empty() {
            values.insert("attribute".to_string(), humanize(&context.field_name));
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InMemoryModel;
    use crate::translation::LocaleTable;
    use formwright_types::Lifecycle;
    use serde_json::json;

    fn table(tree: serde_json::Value) -> LocaleTable {
        let mut table = LocaleTable::new("en");
        table.store_translations("en", tree);
        table
    }

    #[test]
    fn submit_on_new_post_without_translations_is_humanized() {
        let locales = LocaleTable::default();
        let config = FormConfig::default();
        let model = InMemoryModel::new("post").with_lifecycle(Lifecycle::New);
        let resolver = LabelResolver::new(&locales, &config).with_model(&model);
        let context = FieldContext::action(ActionKind::Submit, "post").with_lifecycle(Lifecycle::New);
        assert_eq!(resolver.resolve_label(&context), "Submit Post");
    }

    #[test]
    fn alias_only_changes_the_interpolated_name() {
        let locales = table(json!({"submit": "Submit %{model}"}));
        let config = FormConfig::default();
        let resolver = LabelResolver::new(&locales, &config);
        let context = FieldContext::action(ActionKind::Submit, "post").with_alias("message");
        assert_eq!(resolver.resolve_label(&context), "Submit message");
    }

    #[test]
    fn resource_scoped_action_key_beats_generic_keys() {
        let locales = table(json!({
            "submit": "Submit %{model}",
            "actions": {"submit": "Generic", "post": {"update": "Save changes to %{model}"}},
        }));
        let config = FormConfig::default();
        let resolver = LabelResolver::new(&locales, &config);
        let context = FieldContext::action(ActionKind::Submit, "post")
            .with_lifecycle(Lifecycle::Persisted)
            .with_human_name("Post");
        assert_eq!(resolver.resolve_label(&context), "Save changes to Post");
    }

    #[test]
    fn fallback_keys_apply_when_i18n_lookups_are_off() {
        let locales = table(json!({
            "actions": {"post": {"update": "Never used"}},
            "save": "Save %{model}",
        }));
        let config = FormConfig::default();
        let resolver = LabelResolver::new(&locales, &config);
        let context = FieldContext::action(ActionKind::Submit, "post")
            .with_lifecycle(Lifecycle::Persisted)
            .with_human_name("Post");
        assert_eq!(resolver.resolve_label_with(&context, false), "Save Post");
    }

    #[test]
    fn explicit_label_bypasses_translations() {
        let locales = table(json!({"submit": "Submit %{model}"}));
        let config = FormConfig::default();
        let resolver = LabelResolver::new(&locales, &config);
        let context = FieldContext::action(ActionKind::Submit, "post").with_label("Go");
        assert_eq!(resolver.resolve_label(&context), "Go");
        let context = FieldContext::action(ActionKind::Submit, "post").with_value("Publish");
        assert_eq!(resolver.resolve_label(&context), "Publish");
    }

    #[test]
    fn blank_translations_fall_through_to_the_default() {
        let locales = table(json!({"reset": "  "}));
        let config = FormConfig::default();
        let resolver = LabelResolver::new(&locales, &config);
        let context = FieldContext::action(ActionKind::Reset, "blog_post");
        assert_eq!(resolver.resolve_label(&context), "Reset Blog post");
    }

    #[test]
    fn resourceless_actions_omit_the_name() {
        let locales = LocaleTable::default();
        let config = FormConfig::default();
        let resolver = LabelResolver::new(&locales, &config);
        let context = FieldContext::action(ActionKind::Cancel, "");
        assert_eq!(resolver.resolve_label(&context), "Cancel");
    }

    #[test]
    fn input_labels_prefer_translations_then_model_names() {
        let locales = table(json!({"labels": {"post": {"new": {"title": "Choose a %{attribute}"}}}}));
        let config = FormConfig::default();
        let mut model = InMemoryModel::new("post");
        model.human_attributes.insert("author_id".into(), "Writer".into());
        let resolver = LabelResolver::new(&locales, &config).with_model(&model);

        let title = FieldContext::input("title", "post").with_lifecycle(Lifecycle::New);
        assert_eq!(resolver.resolve_label(&title), "Choose a Title");
        assert_eq!(resolver.resolve_label(&FieldContext::input("author_id", "post")), "Writer");
        assert_eq!(resolver.resolve_label(&FieldContext::input("published_at", "post")), "Published at");
    }

    #[test]
    fn localized_hints_have_no_default() {
        let locales = table(json!({"hints": {"post": {"title": "Keep it short"}}}));
        let config = FormConfig::default();
        let resolver = LabelResolver::new(&locales, &config);
        let context = FieldContext::input("title", "post");
        assert_eq!(resolver.resolve_localized(LookupKind::Hint, &context, None).as_deref(), Some("Keep it short"));
        assert_eq!(resolver.resolve_localized(LookupKind::Placeholder, &context, None), None);
        assert_eq!(
            resolver.resolve_localized(LookupKind::Hint, &context, Some("Override")).as_deref(),
            Some("Override")
        );
    }

    #[test]
    fn enum_and_boolean_labels() {
        let locales = table(json!({
            "activerecord": {"attributes": {"post": {"statuses": {"active": "Live"}}}},
            "yes": "Oui",
        }));
        let config = FormConfig::default();
        let resolver = LabelResolver::new(&locales, &config);
        assert_eq!(resolver.enum_value_label("post", "status", "active"), "Live");
        assert_eq!(resolver.enum_value_label("post", "status", "in_review"), "In review");
        assert_eq!(resolver.boolean_label(true), "Oui");
        assert_eq!(resolver.boolean_label(false), "No");
    }
}
