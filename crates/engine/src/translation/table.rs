//! In-memory locale table loaded from Rails-style YAML documents.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Value};
use thiserror::Error;
use tracing::debug;

use super::LocaleStore;

/// Errors raised while loading locale documents.
#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("failed to read locale file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse locale document: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("locale document must map locale names to translation trees")]
    NotAMapping,
}

/// Translations keyed by locale, each a nested tree of string leaves.
///
/// The table is filled by its owner before being lent to the engines; the
/// engines only read it through `LocaleStore`.
#[derive(Debug, Clone)]
pub struct LocaleTable {
    locale: String,
    translations: IndexMap<String, Value>,
}

impl Default for LocaleTable {
    fn default() -> Self {
        Self::new("en")
    }
}

impl LocaleTable {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            translations: IndexMap::new(),
        }
    }

    /// Parses a document shaped like `en: { actions: { submit: ... } }`.
    pub fn from_yaml_str(document: &str) -> Result<Self, LocaleError> {
        let mut table = Self::default();
        table.merge_yaml_str(document)?;
        Ok(table)
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.translations.keys().map(String::as_str)
    }

    /// Deep-merges `tree` into the translations of `locale`. Later values win.
    pub fn store_translations(&mut self, locale: &str, tree: Value) {
        let existing = self
            .translations
            .entry(locale.to_string())
            .or_insert_with(|| Value::Object(JsonMap::new()));
        deep_merge(existing, tree);
    }

    pub fn merge_yaml_str(&mut self, document: &str) -> Result<(), LocaleError> {
        let parsed: Value = serde_yaml::from_str(document)?;
        let Value::Object(locales) = parsed else {
            return Err(LocaleError::NotAMapping);
        };
        for (locale, tree) in locales {
            self.store_translations(&locale, tree);
        }
        Ok(())
    }

    pub fn load_file(&mut self, path: &Path) -> Result<(), LocaleError> {
        let document = fs::read_to_string(path).map_err(|source| LocaleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_yaml_str(&document)?;
        debug!(path = %path.display(), "loaded locale file");
        Ok(())
    }

    /// Drops every stored translation.
    pub fn reload(&mut self) {
        self.translations.clear();
    }
}

impl LocaleStore for LocaleTable {
    fn lookup(&self, locale: &str, path: &str) -> Option<String> {
        let mut current = self.translations.get(locale)?;
        for segment in path.split('.').filter(|segment| !segment.is_empty()) {
            current = current.get(segment)?;
        }
        match current {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }

    fn current_locale(&self) -> &str {
        &self.locale
    }
}

fn deep_merge(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match existing.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
