//! # Text Processing Utilities
//!
//! Helpers that turn identifiers (attribute names, action names, enum keys)
//! into human-readable text and derive the plural forms used in locale paths.

use heck::ToSnakeCase;

/// Irregular plural forms checked before the suffix rules.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[("person", "people"), ("child", "children")];

/// Words whose plural equals the singular.
const UNCOUNTABLE: &[&str] = &["equipment", "information", "series", "species", "sheep", "fish", "news"];

/// Converts an identifier into a human-readable phrase.
///
/// Underscores and camel-case boundaries become spaces, a trailing `_id` is
/// dropped, and only the first letter is capitalized. Input that already
/// contains whitespace is treated as prose and only has its first letter
/// capitalized. Multi-word names stay plural or singular as given.
///
/// # Example
/// ```rust
/// use formwright_util::text_processing::humanize;
///
/// assert_eq!(humanize("submit"), "Submit");
/// assert_eq!(humanize("author_id"), "Author");
/// assert_eq!(humanize("BlogPost"), "Blog post");
/// assert_eq!(humanize("post_ids"), "Post ids");
/// ```
pub fn humanize(identifier: &str) -> String {
    let trimmed = identifier.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.chars().any(char::is_whitespace) {
        return capitalize_first(trimmed);
    }

    let snake = trimmed.to_snake_case();
    let without_id = match snake.strip_suffix("_id") {
        Some(stem) if !stem.is_empty() => stem,
        _ => snake.as_str(),
    };
    let spaced = without_id.trim_matches('_').replace('_', " ");
    if spaced.is_empty() {
        return capitalize_first(trimmed);
    }
    capitalize_first(&spaced)
}

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut characters = text.chars();
    match characters.next() {
        Some(first) => first.to_uppercase().chain(characters).collect(),
        None => String::new(),
    }
}

/// English pluralization good enough for attribute names (`status` ->
/// `statuses`, `category` -> `categories`).
pub fn pluralize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if lower.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((singular, plural)) = IRREGULAR_PLURALS.iter().find(|(singular, _)| lower.ends_with(singular)) {
        return format!("{}{}", &word[..word.len() - singular.len()], plural);
    }
    if lower.ends_with('s') || lower.ends_with('x') || lower.ends_with('z') || lower.ends_with("ch") || lower.ends_with("sh") {
        return format!("{word}es");
    }
    if let Some(stem) = word.strip_suffix('y')
        && !stem.ends_with(['a', 'e', 'i', 'o', 'u'])
    {
        return format!("{stem}ies");
    }
    format!("{word}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_handles_camel_and_snake_segments() {
        assert_eq!(humanize("meta_description"), "Meta description");
        assert_eq!(humanize("authorStatus"), "Author status");
        assert_eq!(humanize("Post"), "Post");
        assert_eq!(humanize("blind mice"), "Blind mice");
    }

    #[test]
    fn humanize_keeps_bare_id() {
        assert_eq!(humanize("id"), "Id");
        assert_eq!(humanize("_id"), "Id");
    }

    #[test]
    fn humanize_of_empty_identifier_is_empty() {
        assert_eq!(humanize("  "), "");
    }

    #[test]
    fn pluralize_covers_suffix_rules() {
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("post"), "posts");
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("sales_person"), "sales_people");
        assert_eq!(pluralize("series"), "series");
    }
}
