use formwright_engine::{FieldEnvironment, InMemoryModel, LabelResolver, LocaleTable, NoModel};
use formwright_types::{ActionKind, FieldContext, Lifecycle};
use formwright_util::FormConfig;

const LOCALE: &str = include_str!("data/en.yml");

#[test]
fn new_post_submit_without_translations() {
    let locales = LocaleTable::default();
    let config = FormConfig::default();
    let model = InMemoryModel::new("post").with_lifecycle(Lifecycle::New);
    let environment = FieldEnvironment::for_model(&locales, &config, &model);
    let button = environment.present_action(&FieldContext::action(ActionKind::Submit, "post"));
    assert_eq!(button.label, "Submit Post");
}

#[test]
fn aliased_resource_only_changes_the_model_name() {
    let mut locales = LocaleTable::default();
    locales.merge_yaml_str("en:\n  submit: \"Submit message\"\n").expect("merge locale");
    let config = FormConfig::default();
    let resolver = LabelResolver::new(&locales, &config);
    let context = FieldContext::action(ActionKind::Submit, "post").with_alias("message");
    assert_eq!(resolver.resolve_label(&context), "Submit message");

    let locales = LocaleTable::from_yaml_str(LOCALE).expect("parse locale fixture");
    let resolver = LabelResolver::new(&locales, &config);
    assert_eq!(resolver.resolve_label(&context), "Submit message");
}

#[test]
fn persisted_records_use_the_update_family() {
    let locales = LocaleTable::from_yaml_str(LOCALE).expect("parse locale fixture");
    let config = FormConfig::default();
    let model = InMemoryModel::new("post").with_lifecycle(Lifecycle::Persisted);
    let environment = FieldEnvironment::for_model(&locales, &config, &model);
    let button = environment.present_action(&FieldContext::action(ActionKind::Submit, "post"));
    assert_eq!(button.label, "Update Post");
}

#[test]
fn resource_scoped_keys_use_the_effective_action() {
    let locales = LocaleTable::from_yaml_str(LOCALE).expect("parse locale fixture");
    let config = FormConfig::default();
    let model = InMemoryModel::new("comment").with_lifecycle(Lifecycle::New);
    let environment = FieldEnvironment::for_model(&locales, &config, &model);
    let button = environment.present_action(&FieldContext::action(ActionKind::Submit, "comment"));
    assert_eq!(button.label, "Leave a Comment");

    let config = FormConfig {
        i18n_lookups_by_default: false,
        ..FormConfig::default()
    };
    let environment = FieldEnvironment::for_model(&locales, &config, &model);
    let button = environment.present_action(&FieldContext::action(ActionKind::Submit, "comment"));
    assert_eq!(button.label, "Submit Comment");
}

#[test]
fn forms_without_a_model_still_get_labels() {
    let locales = LocaleTable::default();
    let config = FormConfig::default();
    let environment = FieldEnvironment::new(&locales, &config, &NoModel, &NoModel, &NoModel);
    let button = environment.present_action(&FieldContext::action(ActionKind::Cancel, "search_form"));
    assert_eq!(button.label, "Cancel Search form");
    let button = environment.present_action(&FieldContext::action(ActionKind::Reset, ""));
    assert_eq!(button.label, "Reset");
}

#[test]
fn explicit_text_always_wins() {
    let locales = LocaleTable::from_yaml_str(LOCALE).expect("parse locale fixture");
    let config = FormConfig::default();
    let resolver = LabelResolver::new(&locales, &config);
    let context = FieldContext::action(ActionKind::Submit, "post")
        .with_lifecycle(Lifecycle::Persisted)
        .with_label("Ship it");
    assert_eq!(resolver.resolve_label(&context), "Ship it");
}
