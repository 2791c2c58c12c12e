//! Final option list assembly: blank and prompt entries, multiplicity.

use formwright_types::{CollectionEntry, NormalizedCollection};
use formwright_util::FormConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Caller options for one select field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// `Some(true)` always adds a blank entry, `Some(false)` never does.
    pub include_blank: Option<bool>,
    /// Label of the blank entry. Implies a blank entry.
    pub prompt: Option<String>,
    /// Overrides the multiplicity derived by the adapter.
    pub multiple: Option<bool>,
}

impl BuildOptions {
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_include_blank(mut self, include_blank: bool) -> Self {
        self.include_blank = Some(include_blank);
        self
    }

    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = Some(multiple);
        self
    }
}

/// Produces the render-ready option list from a normalized collection.
#[derive(Clone, Copy)]
pub struct OptionListBuilder<'a> {
    config: &'a FormConfig,
}

impl<'a> OptionListBuilder<'a> {
    pub fn new(config: &'a FormConfig) -> Self {
        Self { config }
    }

    /// Applies the blank/prompt policy and the multiplicity override.
    ///
    /// Single selects without a selection get a blank entry unless the
    /// configuration turns that off; multi-selects only get one on request.
    /// A prompt always yields exactly one blank entry carrying its label.
    /// Only a blank added by an earlier build is replaced; source entries with
    /// an empty value are kept.
    pub fn build(&self, mut collection: NormalizedCollection, options: &BuildOptions) -> NormalizedCollection {
        let multiple = options.multiple.unwrap_or(collection.is_multiple);
        let prompt = options.prompt.as_deref().filter(|prompt| !prompt.is_empty());
        let wants_blank = match (prompt, options.include_blank) {
            (Some(_), _) => true,
            (None, Some(include_blank)) => include_blank,
            (None, None) => !multiple && !collection.has_selection() && self.config.include_blank_for_select_by_default,
        };

        if wants_blank {
            collection.entries.retain(|entry| !entry.is_blank());
            collection.entries.insert(0, CollectionEntry::blank(prompt.unwrap_or_default()));
        }
        collection.is_multiple = multiple;
        debug!(
            entry_count = collection.len(),
            blank = wants_blank,
            is_multiple = multiple,
            "built option list"
        );
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwright_types::Scalar;

    fn collection(selected: Option<&str>, multiple: bool) -> NormalizedCollection {
        let entries = ["bob", "fred", "sue"]
            .into_iter()
            .map(|name| {
                let mut entry = CollectionEntry::new(name, name);
                entry.selected = selected == Some(name);
                entry
            })
            .collect();
        let mut collection = NormalizedCollection::new(entries);
        collection.is_multiple = multiple;
        collection
    }

    #[test]
    fn single_select_without_selection_gets_a_blank() {
        let config = FormConfig::default();
        let built = OptionListBuilder::new(&config).build(collection(None, false), &BuildOptions::default());
        assert_eq!(built.len(), 4);
        assert_eq!(built.entries[0], CollectionEntry::blank(""));
    }

    #[test]
    fn single_select_with_selection_gets_no_blank() {
        let config = FormConfig::default();
        let built = OptionListBuilder::new(&config).build(collection(Some("fred"), false), &BuildOptions::default());
        assert_eq!(built.len(), 3);
        assert!(built.blank_entry().is_none());
    }

    #[test]
    fn multi_select_blank_only_on_request() {
        let config = FormConfig::default();
        let builder = OptionListBuilder::new(&config);
        assert_eq!(builder.build(collection(None, true), &BuildOptions::default()).len(), 3);
        let built = builder.build(collection(None, true), &BuildOptions::default().with_include_blank(true));
        assert_eq!(built.len(), 4);
        assert!(built.is_multiple);
    }

    #[test]
    fn prompt_replaces_the_blank_label_once() {
        let config = FormConfig::default();
        let builder = OptionListBuilder::new(&config);
        let options = BuildOptions::default().with_prompt("Choose an author").with_include_blank(true);
        let built = builder.build(collection(Some("sue"), false), &options);
        let rebuilt = builder.build(built.clone(), &options);
        for list in [&built, &rebuilt] {
            assert_eq!(list.entries.iter().filter(|entry| entry.is_blank()).count(), 1);
            assert_eq!(list.entries[0].label, "Choose an author");
            assert_eq!(list.entries[0].value, Scalar::blank());
        }
        assert_eq!(built, rebuilt);
    }

    #[test]
    fn explicit_multiple_wins_over_cardinality() {
        let config = FormConfig::default();
        let builder = OptionListBuilder::new(&config);
        let built = builder.build(collection(None, true), &BuildOptions::default().with_multiple(false));
        assert!(!built.is_multiple);
        assert_eq!(built.entries[0], CollectionEntry::blank(""));
    }

    #[test]
    fn empty_valued_source_entries_survive_the_blank() {
        let config = FormConfig::default();
        let builder = OptionListBuilder::new(&config);
        let source = NormalizedCollection::new(vec![CollectionEntry::new("None", ""), CollectionEntry::new("A", "a")]);
        let built = builder.build(source, &BuildOptions::default());
        let labels: Vec<_> = built.entries.iter().map(|entry| entry.label.as_str()).collect();
        assert_eq!(labels, vec!["", "None", "A"]);

        let rebuilt = builder.build(built.clone(), &BuildOptions::default());
        assert_eq!(rebuilt, built);
    }

    #[test]
    fn configuration_can_disable_the_automatic_blank() {
        let config = FormConfig {
            include_blank_for_select_by_default: false,
            ..FormConfig::default()
        };
        let built = OptionListBuilder::new(&config).build(collection(None, false), &BuildOptions::default());
        assert_eq!(built.len(), 3);
    }
}
