//! Country records and the country catalog collaborator.
//!
//! Countries live in a hierarchical term store owned by the host. The
//! negotiation core only ever asks for the flat, depth-1 listing.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Identifier of a country term in the host's store.
pub type TermId = u64;

/// A country term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    /// Term id in the host's store
    pub id: TermId,

    /// Prefix code, usually ISO 3166 alpha-2 ("us", "fr"); not validated
    pub code: String,

    /// Display name, used as the country switch link title
    pub name: String,

    /// Parent term; `None` for root entries
    #[serde(default)]
    pub parent: Option<TermId>,
}

impl Country {
    /// Create a root-level country term.
    ///
    /// # Arguments
    /// * `id` - Term id in the store
    /// * `code` - Code used as the left half of the URL prefix
    /// * `name` - Display name
    pub fn new(id: TermId, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            parent: None,
        }
    }

    /// Attach the country under a parent term.
    pub fn with_parent(mut self, parent: TermId) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Read access to the host's country store.
///
/// Both methods may fail when the backing store is unreachable; such failures
/// surface as `NegotiationError::UpstreamUnavailable` and are never retried here.
pub trait CountryCatalog: Send + Sync {
    /// Root-level countries in store order.
    fn list(&self) -> Result<Vec<Country>>;

    /// Load any country term by id.
    fn load_by_id(&self, id: TermId) -> Result<Option<Country>>;
}

/// In-memory country store holding terms in insertion order.
#[derive(Debug, Clone, Default)]
pub struct CountryList {
    terms: Vec<Country>,
}

impl CountryList {
    /// Wrap terms in store order. Nested terms may appear anywhere.
    pub fn new(terms: Vec<Country>) -> Self {
        Self { terms }
    }

    /// Every stored term, including nested ones.
    pub fn all(&self) -> &[Country] {
        &self.terms
    }
}

impl CountryCatalog for CountryList {
    fn list(&self) -> Result<Vec<Country>> {
        Ok(self
            .terms
            .iter()
            .filter(|term| term.parent.is_none())
            .cloned()
            .collect())
    }

    fn load_by_id(&self, id: TermId) -> Result<Option<Country>> {
        Ok(self.terms.iter().find(|term| term.id == id).cloned())
    }
}
