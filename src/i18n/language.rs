//! Language type and the language catalog collaborator.
//!
//! Languages are supplied by the host; this crate never creates them on its
//! own. The catalog is read-only for the duration of a negotiation call.

use serde::{Deserialize, Serialize};

/// A configured language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "LanguageRecord")]
pub struct Language {
    /// Unique identifier within the catalog (e.g., "en", "pt-br")
    pub id: String,

    /// Code used in URL prefixes; equal to `id` unless configured otherwise
    pub iso_code: String,

    /// Display name (e.g., "Spanish")
    pub name: String,

    /// Name of the language in its own script (e.g., "Español")
    pub native_name: String,
}

/// Wire form of a language record with optional fields filled from `id`/`name`.
#[derive(Deserialize)]
struct LanguageRecord {
    id: String,
    #[serde(default)]
    iso_code: Option<String>,
    name: String,
    #[serde(default)]
    native_name: Option<String>,
}

impl From<LanguageRecord> for Language {
    fn from(record: LanguageRecord) -> Self {
        Language {
            iso_code: record.iso_code.unwrap_or_else(|| record.id.clone()),
            native_name: record.native_name.unwrap_or_else(|| record.name.clone()),
            id: record.id,
            name: record.name,
        }
    }
}

impl Language {
    /// Create a language whose prefix code equals its id.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        let name = name.into();
        Self {
            iso_code: id.clone(),
            native_name: name.clone(),
            id,
            name,
        }
    }

    /// Set the native name.
    pub fn with_native_name(mut self, native_name: impl Into<String>) -> Self {
        self.native_name = native_name.into();
        self
    }

    /// Set a prefix code distinct from the id.
    pub fn with_iso_code(mut self, iso_code: impl Into<String>) -> Self {
        self.iso_code = iso_code.into();
        self
    }

    /// The same language with its display name replaced by the native name.
    pub fn to_native(&self) -> Language {
        Language {
            name: self.native_name.clone(),
            ..self.clone()
        }
    }
}

/// Read access to the host's configured languages.
pub trait LanguageCatalog: Send + Sync {
    /// All configured languages in catalog order.
    fn languages(&self) -> Vec<Language>;

    /// The language used when nothing else resolves.
    fn default_language(&self) -> Language;

    /// Look up a language by id.
    ///
    /// # Arguments
    /// * `id` - The language id (not its prefix code)
    ///
    /// # Returns
    /// * `Some(Language)` if the id is configured
    /// * `None` otherwise
    fn language(&self, id: &str) -> Option<Language> {
        self.languages().into_iter().find(|language| language.id == id)
    }

    /// Languages with display names in their native form, in catalog order.
    fn native_languages(&self) -> Vec<Language> {
        self.languages().iter().map(Language::to_native).collect()
    }

    /// Whether more than one language is configured.
    fn is_multilingual(&self) -> bool {
        self.languages().len() > 1
    }
}
