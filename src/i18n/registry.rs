//! Language registry: in-memory language catalog built from a snapshot.
//!
//! The registry owns an ordered list of languages plus the id of the default
//! one. Construction validates the snapshot so lookups never fail later.

use crate::error::{NegotiationError, Result};
use crate::i18n::{Language, LanguageCatalog};
use std::collections::HashSet;

/// Ordered, validated set of languages.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    languages: Vec<Language>,
    default_index: usize,
}

impl LanguageRegistry {
    /// Build a registry from languages in catalog order.
    ///
    /// # Errors
    /// * `InvalidCatalog` if the list is empty, an id repeats, or
    ///   `default_id` does not name a listed language.
    pub fn new(languages: Vec<Language>, default_id: &str) -> Result<Self> {
        if languages.is_empty() {
            return Err(NegotiationError::InvalidCatalog(
                "at least one language is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for language in &languages {
            if !seen.insert(language.id.as_str()) {
                return Err(NegotiationError::InvalidCatalog(format!(
                    "duplicate language id '{}'",
                    language.id
                )));
            }
        }

        let default_index = languages
            .iter()
            .position(|language| language.id == default_id)
            .ok_or_else(|| {
                NegotiationError::InvalidCatalog(format!(
                    "default language '{}' is not configured",
                    default_id
                ))
            })?;

        Ok(Self {
            languages,
            default_index,
        })
    }

    /// Number of configured languages.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Always false for a constructed registry; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl LanguageCatalog for LanguageRegistry {
    fn languages(&self) -> Vec<Language> {
        self.languages.clone()
    }

    fn default_language(&self) -> Language {
        self.languages[self.default_index].clone()
    }

    fn language(&self, id: &str) -> Option<Language> {
        self.languages.iter().find(|language| language.id == id).cloned()
    }

    fn is_multilingual(&self) -> bool {
        self.languages.len() > 1
    }
}
