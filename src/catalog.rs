//! Catalog snapshot loader.
//!
//! Reads languages and countries from a JSON document and builds the
//! in-memory catalogs the demo host serves from.

use crate::error::{NegotiationError, Result};
use crate::i18n::{Country, CountryList, Language, LanguageRegistry};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// On-disk catalog document.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub default_language: String,
    pub languages: Vec<Language>,
    #[serde(default)]
    pub countries: Vec<Country>,
}

/// Validated catalogs ready for negotiation.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub languages: LanguageRegistry,
    pub countries: CountryList,
}

impl CatalogFile {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| NegotiationError::InvalidCatalog(e.to_string()))
    }

    /// Validate and build the catalogs.
    pub fn into_catalogs(self) -> Result<Catalogs> {
        let mut seen = HashSet::new();
        for country in &self.countries {
            if !seen.insert(country.id) {
                return Err(NegotiationError::InvalidCatalog(format!(
                    "duplicate country id {}",
                    country.id
                )));
            }
        }

        let mut codes = HashSet::new();
        for country in self.countries.iter().filter(|c| c.parent.is_none()) {
            if !codes.insert(country.code.as_str()) {
                warn!(code = %country.code, id = country.id, "duplicate country code, first entry wins");
            }
        }

        if self.countries.is_empty() {
            warn!("country catalog is empty, outbound prefixes cannot default");
        }

        let languages = LanguageRegistry::new(self.languages, &self.default_language)?;
        Ok(Catalogs {
            languages,
            countries: CountryList::new(self.countries),
        })
    }
}

/// Load catalogs from a JSON file.
///
/// # Errors
/// * `UpstreamUnavailable` if the file cannot be read
/// * `InvalidCatalog` if it does not parse or fails validation
pub fn load(path: impl AsRef<Path>) -> Result<Catalogs> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| NegotiationError::upstream(format!("reading {}", path.display()), e))?;

    let catalogs = CatalogFile::parse(&raw)?.into_catalogs()?;
    info!(
        path = %path.display(),
        languages = catalogs.languages.len(),
        countries = catalogs.countries.all().len(),
        "loaded catalog snapshot"
    );
    Ok(catalogs)
}
