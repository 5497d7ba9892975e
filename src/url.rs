//! URL values and outbound options.
//!
//! `LinkUrl` is an owned value. Every generated link gets its own copy, so
//! setting a prefix or query on one link never shows up on another.

use crate::i18n::{Country, Language};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Cache context varied on by any URL whose prefix came from negotiation.
pub const URL_LANGUAGE_CACHE_CONTEXT: &str = "languages:language_url";

/// Language requested for an outbound URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageOption {
    /// Already-resolved language, used as given.
    Resolved(Language),
    /// Language id to look up in the catalog.
    Id(String),
}

impl From<Language> for LanguageOption {
    fn from(language: Language) -> Self {
        Self::Resolved(language)
    }
}

impl From<&str> for LanguageOption {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

/// Caller-supplied hints for outbound rewriting.
///
/// Both sides are optional; whatever is left open is negotiated from the
/// request or defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlOptions {
    pub language: Option<LanguageOption>,
    pub country: Option<Country>,
}

impl UrlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(mut self, language: impl Into<LanguageOption>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_country(mut self, country: Country) -> Self {
        self.country = Some(country);
        self
    }
}

/// Options after outbound resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedOptions {
    pub language: Option<Language>,
    pub country: Option<Country>,

    /// `"<country>-<language>/"` when both sides resolved
    pub prefix: Option<String>,

    /// Cache contexts the rendered URL varies by
    pub cache_contexts: Vec<&'static str>,
}

impl ResolvedOptions {
    /// Whether URL assembly must prepend a prefix.
    pub fn has_prefix(&self) -> bool {
        self.prefix.is_some()
    }
}

/// Result of outbound processing. `path` is the input path, untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundPath {
    pub path: String,
    pub options: ResolvedOptions,
}

/// A link target: path plus the options rendering attaches to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkUrl {
    pub path: String,
    pub prefix: Option<String>,
    pub query: BTreeMap<String, String>,
}

impl LinkUrl {
    /// Create a link to `path` with no prefix and an empty query.
    ///
    /// # Arguments
    /// * `path` - Path of the target, with or without a leading slash
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Take the prefix from resolved outbound options.
    pub fn apply(&mut self, options: &ResolvedOptions) {
        self.prefix = options.prefix.clone();
    }

    /// Assemble `/<prefix><path>?<query>`.
    ///
    /// # Returns
    /// The href. The query is form-urlencoded in key order and left out when
    /// empty.
    pub fn render(&self) -> String {
        let mut url = String::from("/");
        if let Some(prefix) = &self.prefix {
            url.push_str(prefix);
        }
        url.push_str(self.path.trim_start_matches('/'));

        if !self.query.is_empty() {
            match serde_urlencoded::to_string(&self.query) {
                Ok(query) => {
                    url.push('?');
                    url.push_str(&query);
                }
                Err(e) => warn!(path = %self.path, error = %e, "dropping unencodable query"),
            }
        }
        url
    }
}
