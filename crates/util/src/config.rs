//! Application-wide form configuration.
//!
//! The configuration is a small JSON document read once by the host
//! application (`~/.config/formwright/config.json` on most platforms, or the
//! path named by `FORMWRIGHT_CONFIG_PATH`). The engines only ever borrow it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::{config_dir, home_dir};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Environment variable allowing callers to override the configuration path.
pub const CONFIG_PATH_ENV: &str = "FORMWRIGHT_CONFIG_PATH";

/// Default filename for the JSON payload.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Error surfaced when the configuration file cannot be read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Read-only switches consulted while resolving labels and building options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Try `actions.*`/`labels.*` translations before the fallback keys.
    pub i18n_lookups_by_default: bool,
    /// Root scope prefixed to every form lookup path (`formwright`).
    pub i18n_scope: Option<String>,
    /// Root scope of model translations (enum values).
    pub model_i18n_scope: String,
    /// Give single selects without a value a leading blank option.
    pub include_blank_for_select_by_default: bool,
    pub default_commit_button_accesskey: Option<String>,
    /// Whether renderers emit the `required` attribute.
    pub use_required_attribute: bool,
    /// Record fields tried, in order, for an option's label.
    pub collection_label_methods: Vec<String>,
    /// Record fields tried, in order, for an option's value.
    pub collection_value_methods: Vec<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            i18n_lookups_by_default: true,
            i18n_scope: None,
            model_i18n_scope: "activerecord".to_string(),
            include_blank_for_select_by_default: true,
            default_commit_button_accesskey: None,
            use_required_attribute: false,
            collection_label_methods: ["to_label", "display_name", "full_name", "name", "title", "username", "login", "value"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            collection_value_methods: vec!["id".to_string()],
        }
    }
}

impl FormConfig {
    /// Loads the configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&default_config_path())
    }

    /// Loads the configuration at `path`.
    ///
    /// A missing file yields the defaults. A file that fails to parse is
    /// logged and also yields the defaults; only other I/O failures are errors.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(config) => Ok(config),
                Err(error) => {
                    warn!(
                        path = %path.display(),
                        error = %error,
                        "Failed to parse form config; using defaults"
                    );
                    Ok(Self::default())
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(ConfigError::Io(error)),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Joins `segments` under the configured form scope.
    pub fn scoped_path<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> String {
        scope_join(self.i18n_scope.as_deref(), segments)
    }

    /// Joins `segments` under the model translation scope.
    pub fn model_scoped_path<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> String {
        scope_join(Some(self.model_i18n_scope.as_str()), segments)
    }
}

fn scope_join<'a>(scope: Option<&str>, segments: impl IntoIterator<Item = &'a str>) -> String {
    scope
        .map(|scope| scope.trim().to_string())
        .into_iter()
        .chain(segments.into_iter().map(|segment| segment.trim().to_string()))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// Get the default path for the configuration file.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("formwright")
        .join(CONFIG_FILE_NAME)
}

/// Expands a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    if trimmed == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    match trimmed.strip_prefix("~/").or_else(|| trimmed.strip_prefix("~\\")) {
        Some(rest) => home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest),
        None => PathBuf::from(trimmed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let config = FormConfig::load_from(&temp_dir.path().join("absent.json")).expect("load config");
        assert_eq!(config, FormConfig::default());
        assert!(config.i18n_lookups_by_default);
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{"i18n_lookups_by_default": false, "i18n_scope": "formwright"}"#).expect("write config");

        let config = FormConfig::load_from(&path).expect("load config");
        assert!(!config.i18n_lookups_by_default);
        assert_eq!(config.i18n_scope.as_deref(), Some("formwright"));
        assert!(config.include_blank_for_select_by_default);
        assert_eq!(config.collection_value_methods, vec!["id".to_string()]);
    }

    #[test]
    fn unparsable_file_falls_back_to_defaults() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ not json").expect("write config");
        assert_eq!(FormConfig::load_from(&path).expect("load config"), FormConfig::default());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("nested").join(CONFIG_FILE_NAME);
        let config = FormConfig {
            default_commit_button_accesskey: Some("s".into()),
            ..FormConfig::default()
        };
        config.save_to(&path).expect("save config");
        assert_eq!(FormConfig::load_from(&path).expect("load config"), config);
    }

    #[test]
    fn config_path_honours_environment_override() {
        temp_env::with_var(CONFIG_PATH_ENV, Some("/tmp/formwright-test.json"), || {
            assert_eq!(default_config_path(), PathBuf::from("/tmp/formwright-test.json"));
        });
    }

    #[test]
    fn scoped_paths_skip_missing_scope() {
        let mut config = FormConfig::default();
        assert_eq!(config.scoped_path(["actions", "submit"]), "actions.submit");
        config.i18n_scope = Some("formwright".into());
        assert_eq!(config.scoped_path(["actions", "submit"]), "formwright.actions.submit");
        assert_eq!(config.model_scoped_path(["attributes", "post"]), "activerecord.attributes.post");
    }

    #[test]
    fn scoped_paths_accept_segments_borrowed_from_callers() {
        let config = FormConfig {
            i18n_scope: Some(" formwright ".into()),
            ..FormConfig::default()
        };
        let resource = String::from("post");
        let attribute = String::from("author_id");
        let segments = vec!["labels", resource.as_str(), "", attribute.as_str()];
        assert_eq!(config.scoped_path(segments), "formwright.labels.post.author_id");
    }
}
