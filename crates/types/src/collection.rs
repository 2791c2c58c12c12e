//! Canonical option entries produced by collection normalization.

use serde::{Deserialize, Serialize};

use crate::Scalar;

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub label: String,
    pub value: Scalar,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub selected: bool,
    /// Set only on the blank or prompt entry added by the option list builder.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub blank: bool,
}

impl CollectionEntry {
    pub fn new(label: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            group: None,
            selected: false,
            blank: false,
        }
    }

    /// Blank or prompt entry; always top-level with an empty value.
    pub fn blank(label: impl Into<String>) -> Self {
        Self {
            blank: true,
            ..Self::new(label, Scalar::blank())
        }
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// True for the builder's blank or prompt entry. Source entries whose
    /// value happens to be empty are ordinary options.
    pub fn is_blank(&self) -> bool {
        self.blank
    }
}

/// Ordered option list plus the flags a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizedCollection {
    pub entries: Vec<CollectionEntry>,
    #[serde(default)]
    pub is_grouped: bool,
    #[serde(default)]
    pub is_multiple: bool,
}

/// Borrowed view of consecutive entries sharing a group label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup<'a> {
    pub label: Option<&'a str>,
    pub entries: Vec<&'a CollectionEntry>,
}

impl NormalizedCollection {
    pub fn new(entries: Vec<CollectionEntry>) -> Self {
        let is_grouped = entries.iter().any(|entry| entry.group.is_some());
        Self {
            entries,
            is_grouped,
            is_multiple: false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected(&self) -> impl Iterator<Item = &CollectionEntry> {
        self.entries.iter().filter(|entry| entry.selected)
    }

    pub fn has_selection(&self) -> bool {
        self.entries.iter().any(|entry| entry.selected)
    }

    /// Returns the leading blank/prompt entry, if any.
    pub fn blank_entry(&self) -> Option<&CollectionEntry> {
        self.entries.first().filter(|entry| entry.is_blank())
    }

    /// Splits entries into runs of consecutive entries with the same group,
    /// preserving order. Top-level entries form runs with `label: None`.
    pub fn groups(&self) -> Vec<OptionGroup<'_>> {
        let mut groups: Vec<OptionGroup<'_>> = Vec::new();
        for entry in &self.entries {
            let label = entry.group.as_deref();
            match groups.last_mut() {
                Some(current) if current.label == label => current.entries.push(entry),
                _ => groups.push(OptionGroup {
                    label,
                    entries: vec![entry],
                }),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_split_on_label_changes() {
        let collection = NormalizedCollection::new(vec![
            CollectionEntry::blank(""),
            CollectionEntry::new("pencil", "pencil").in_group("one"),
            CollectionEntry::new("crayon", "crayon").in_group("one"),
            CollectionEntry::new("eyes", "eyes").in_group("two"),
        ]);
        let groups = collection.groups();
        assert!(collection.is_grouped);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].label, None);
        assert_eq!(groups[1].label, Some("one"));
        assert_eq!(groups[1].entries.len(), 2);
        assert_eq!(groups[2].label, Some("two"));
    }

    #[test]
    fn blank_entry_is_only_reported_at_the_front() {
        let collection = NormalizedCollection::new(vec![CollectionEntry::new("a", "a"), CollectionEntry::blank("")]);
        assert!(collection.blank_entry().is_none());
    }

    #[test]
    fn empty_valued_source_entries_are_not_blanks() {
        let collection = NormalizedCollection::new(vec![CollectionEntry::new("None", ""), CollectionEntry::new("a", "a")]);
        assert!(collection.blank_entry().is_none());
        assert!(CollectionEntry::blank("Pick one").is_blank());
    }
}
