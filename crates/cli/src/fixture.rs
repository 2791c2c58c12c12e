//! YAML fixtures describing one field render.
//!
//! ```yaml
//! model:            # optional; omitted for forms without an object
//!   name: post
//!   lifecycle: new
//! field:
//!   field_name: submit
//!   action: submit
//!   resource_name: post
//! collection: [[one, [pencil]], [two, [eyes, hands]]]   # optional
//! select: { build: { prompt: "Pick one" } }             # optional
//! locale: en                                            # optional
//! translations:                                         # optional
//!   en: { submit: "Submit %{model}" }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use formwright_engine::{InMemoryModel, LocaleStore, LocaleTable, SelectOptions};
use formwright_types::FieldContext;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub model: Option<InMemoryModel>,
    pub field: FieldContext,
    #[serde(default)]
    pub collection: Option<Value>,
    #[serde(default)]
    pub select: SelectOptions,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub translations: Option<Value>,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| format!("read fixture {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parse fixture {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Builds the locale table from inline translations plus `extra_files`,
    /// later sources overriding earlier ones.
    pub fn locale_table(&self, extra_files: &[impl AsRef<Path>]) -> Result<LocaleTable> {
        let mut table = LocaleTable::default();
        if let Some(Value::Object(locales)) = &self.translations {
            for (locale, tree) in locales {
                table.store_translations(locale, tree.clone());
            }
        }
        for file in extra_files {
            let file = file.as_ref();
            table.load_file(file).with_context(|| format!("load locale file {}", file.display()))?;
        }
        if let Some(locale) = &self.locale {
            table.set_locale(locale.clone());
        }
        let locales: Vec<&str> = table.locales().collect();
        debug!(locales = ?locales, current = %table.current_locale(), "prepared locale table");
        Ok(table)
    }
}
