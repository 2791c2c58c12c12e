//! `%{name}` placeholder interpolation for translated strings.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

static PLACEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"%\{([A-Za-z0-9_]+)\}").expect("placeholder regex should compile"));

/// Named values substituted into a template, in insertion order.
pub type Interpolations = IndexMap<String, String>;

/// Replaces every `%{name}` in `template` with the matching value.
///
/// Placeholders without a value are left in place verbatim. This never fails.
///
/// # Example
/// ```rust
/// use formwright_util::interpolation::{Interpolations, interpolate};
///
/// let mut values = Interpolations::new();
/// values.insert("model".into(), "Post".into());
/// assert_eq!(interpolate("Create %{model}", &values), "Create Post");
/// assert_eq!(interpolate("Create %{other}", &values), "Create %{other}");
/// ```
pub fn interpolate(template: &str, values: &Interpolations) -> String {
    if !template.contains("%{") {
        return template.to_string();
    }
    PLACEHOLDER_PATTERN
        .replace_all(template, |captures: &Captures| {
            let name = &captures[1];
            match values.get(name) {
                Some(value) => value.clone(),
                None => {
                    debug!(placeholder = %name, "leaving unresolved placeholder in translation");
                    captures[0].to_string()
                }
            }
        })
        .into_owned()
}

/// Names of the placeholders referenced by `template`, in order of appearance.
pub fn placeholder_names(template: &str) -> Vec<String> {
    PLACEHOLDER_PATTERN
        .captures_iter(template)
        .map(|captures| captures[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> Interpolations {
        pairs.iter().map(|(key, value)| (key.to_string(), value.to_string())).collect()
    }

    #[test]
    fn substitutes_every_occurrence() {
        let rendered = interpolate("%{model}: save %{model}", &values(&[("model", "Post")]));
        assert_eq!(rendered, "Post: save Post");
    }

    #[test]
    fn unknown_placeholders_stay_literal() {
        let rendered = interpolate("Submit %{model} to %{target}", &values(&[("model", "Post")]));
        assert_eq!(rendered, "Submit Post to %{target}");
    }

    #[test]
    fn malformed_placeholders_are_ignored() {
        let rendered = interpolate("100%{ done %{}", &values(&[("model", "Post")]));
        assert_eq!(rendered, "100%{ done %{}");
    }

    #[test]
    fn lists_placeholder_names() {
        assert_eq!(placeholder_names("%{a} and %{b_2}"), vec!["a".to_string(), "b_2".to_string()]);
    }
}
