//! Translation lookup over an injected, read-only locale store.
//!
//! Modules:
//! - `table`: YAML-backed in-memory `LocaleTable`

mod table;

pub use table::{LocaleError, LocaleTable};

use formwright_util::{Interpolations, interpolate};
use tracing::debug;

/// Read-only access to translations owned by the host application.
///
/// Stores return raw templates; interpolation happens in `TranslationLookup`.
/// Locale fallback, if any, is the store's business.
pub trait LocaleStore: Send + Sync {
    fn lookup(&self, locale: &str, path: &str) -> Option<String>;
    fn current_locale(&self) -> &str;
}

/// One dotted lookup path plus the values substituted into its template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateKey {
    pub path: String,
    pub interpolations: Interpolations,
}

impl CandidateKey {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            interpolations: Interpolations::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.interpolations.insert(name.into(), value.into());
        self
    }

    pub fn with_all(mut self, interpolations: &Interpolations) -> Self {
        self.interpolations.extend(interpolations.iter().map(|(name, value)| (name.clone(), value.clone())));
        self
    }
}

/// Resolves the first candidate present in the store's current locale.
#[derive(Clone, Copy)]
pub struct TranslationLookup<'a> {
    store: &'a dyn LocaleStore,
}

impl<'a> TranslationLookup<'a> {
    pub fn new(store: &'a dyn LocaleStore) -> Self {
        Self { store }
    }

    /// Tries `candidates` strictly in order and returns the interpolated text
    /// of the first hit. `None` is the normal not-found outcome.
    pub fn resolve(&self, candidates: &[CandidateKey]) -> Option<String> {
        let locale = self.store.current_locale();
        for candidate in candidates {
            if let Some(template) = self.store.lookup(locale, &candidate.path) {
                debug!(locale = %locale, key = %candidate.path, "translation hit");
                return Some(interpolate(&template, &candidate.interpolations));
            }
        }
        debug!(
            locale = %locale,
            candidate_count = candidates.len(),
            "no translation matched any candidate"
        );
        None
    }

    /// Looks up a single path without interpolation.
    pub fn raw(&self, path: &str) -> Option<String> {
        self.store.lookup(self.store.current_locale(), path)
    }
}
