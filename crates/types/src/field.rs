//! Field context handed to the label engine for a single render call.

use serde::{Deserialize, Serialize};

/// Which button a field renders, or `None` for plain inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Submit,
    Reset,
    Cancel,
    #[default]
    None,
}

impl ActionKind {
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            ActionKind::Submit => Some("submit"),
            ActionKind::Reset => Some("reset"),
            ActionKind::Cancel => Some("cancel"),
            ActionKind::None => None,
        }
    }
}

/// Persistence state of the model backing the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    New,
    Persisted,
    /// The form has no model identity (for example a form built for a bare
    /// resource name).
    #[default]
    None,
}

/// Whether the context describes an action button or an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Action(ActionKind),
    Input,
}

/// Immutable description of the field being rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldContext {
    /// Attribute or action name (`title`, `author`, `submit`).
    pub field_name: String,
    #[serde(default)]
    pub action: ActionKind,
    #[serde(default)]
    pub lifecycle: Lifecycle,
    /// Caller-supplied label; bypasses every lookup.
    #[serde(default)]
    pub explicit_label: Option<String>,
    /// Caller-supplied value. For action buttons this is also their text.
    #[serde(default)]
    pub explicit_value: Option<String>,
    /// Underlying resource key used in lookup paths (`post`).
    pub resource_name: String,
    /// Display alias (`as: message`). Only ever substituted into `%{model}`.
    #[serde(default)]
    pub resource_alias: Option<String>,
    /// Human name supplied by the model accessor; absent without a model.
    #[serde(default)]
    pub resource_human_name: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
}

impl FieldContext {
    /// Context for an action button on `resource_name`.
    pub fn action(action: ActionKind, resource_name: impl Into<String>) -> Self {
        Self {
            field_name: action.as_str().unwrap_or_default().to_string(),
            action,
            resource_name: resource_name.into(),
            ..Self::default()
        }
    }

    /// Context for an input bound to `field_name` on `resource_name`.
    pub fn input(field_name: impl Into<String>, resource_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            resource_name: resource_name.into(),
            ..Self::default()
        }
    }

    pub fn with_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.explicit_label = Some(label.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.explicit_value = Some(value.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.resource_alias = Some(alias.into());
        self
    }

    pub fn with_human_name(mut self, human_name: impl Into<String>) -> Self {
        self.resource_human_name = Some(human_name.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn kind(&self) -> FieldKind {
        match self.action {
            ActionKind::None => FieldKind::Input,
            action => FieldKind::Action(action),
        }
    }

    /// Name substituted for `%{model}`: the alias when present, otherwise the
    /// human name.
    pub fn display_name(&self) -> Option<&str> {
        self.resource_alias
            .as_deref()
            .or(self.resource_human_name.as_deref())
            .filter(|name| !name.trim().is_empty())
    }
}
