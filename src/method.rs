//! The "language and country by URL" negotiation method.
//!
//! Binds the pure negotiation core to the host's catalog collaborators. Every
//! call takes a fresh snapshot of the country list; failures to obtain it are
//! returned unchanged as `UpstreamUnavailable`.
//!
//! Request negotiation and inbound stripping look prefixes up in a
//! [`PrefixIndex`]. The index is kept for the last snapshot seen and rebuilt
//! only when the languages or countries change.

use crate::error::{NegotiationError, Result};
use crate::i18n::{
    negotiator, rewriter, switch_links, Country, CountryCatalog, Language, LanguageCatalog,
    NegotiationMetrics, NegotiationResult, PrefixIndex, SwitchLink, TermId,
};
use crate::request::RequestContext;
use crate::url::{LinkUrl, OutboundPath, UrlOptions};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

/// Identifier of this negotiation method.
pub const METHOD_ID: &str = "language-and-country-url";

/// Prefix index together with the snapshot it was built from.
struct IndexedSnapshot {
    languages: Vec<Language>,
    countries: Vec<Country>,
    index: Arc<PrefixIndex>,
}

/// Negotiation method bound to a language catalog and a country catalog.
///
/// Cheap to clone; clones share the catalogs and the cached prefix index.
#[derive(Clone)]
pub struct LanguageAndCountryUrl {
    languages: Arc<dyn LanguageCatalog>,
    countries: Arc<dyn CountryCatalog>,
    index: Arc<RwLock<Option<IndexedSnapshot>>>,
}

impl LanguageAndCountryUrl {
    /// Create the method.
    ///
    /// # Arguments
    /// * `languages` - Catalog of configured languages
    /// * `countries` - Country term store, listed afresh on every call
    pub fn new(languages: Arc<dyn LanguageCatalog>, countries: Arc<dyn CountryCatalog>) -> Self {
        Self {
            languages,
            countries,
            index: Arc::new(RwLock::new(None)),
        }
    }

    /// Prefix index for the current snapshot, rebuilt when the catalogs changed.
    fn prefix_index(&self, countries: &[Country]) -> Arc<PrefixIndex> {
        let languages = self.languages.languages();
        {
            let cached = self.index.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(snapshot) = cached.as_ref() {
                if snapshot.languages == languages && snapshot.countries == countries {
                    return Arc::clone(&snapshot.index);
                }
            }
        }

        let index = Arc::new(PrefixIndex::build(&languages, countries));
        debug!(prefixes = index.len(), "rebuilt prefix index");
        *self.index.write().unwrap_or_else(PoisonError::into_inner) = Some(IndexedSnapshot {
            languages,
            countries: countries.to_vec(),
            index: Arc::clone(&index),
        });
        index
    }

    /// Decode the request's prefix. No request means no match.
    ///
    /// # Errors
    /// * `UpstreamUnavailable` if the country list cannot be fetched
    pub fn negotiate(&self, request: Option<&RequestContext>) -> Result<NegotiationResult> {
        let Some(request) = request else {
            return Ok(NegotiationResult::none());
        };

        let countries = self.countries.list()?;
        let index = self.prefix_index(&countries);
        let result = negotiator::negotiate_indexed(request.path(), &index);

        let metrics = NegotiationMetrics::global();
        if result.is_match() {
            metrics.record_prefix_match();
        } else {
            metrics.record_prefix_miss();
        }
        Ok(result)
    }

    pub fn negotiate_language(&self, request: Option<&RequestContext>) -> Result<Option<Language>> {
        Ok(self.negotiate(request)?.language)
    }

    pub fn negotiate_country(&self, request: Option<&RequestContext>) -> Result<Option<Country>> {
        Ok(self.negotiate(request)?.country)
    }

    /// Like [`negotiate_country`](Self::negotiate_country) but reloads the
    /// matched term from the store by id.
    pub fn negotiate_country_term(&self, request: Option<&RequestContext>) -> Result<Option<Country>> {
        match self.negotiate(request)?.country {
            Some(country) => self.load_country_term(country.id),
            None => Ok(None),
        }
    }

    /// Load a country term from the store.
    pub fn load_country_term(&self, id: TermId) -> Result<Option<Country>> {
        self.countries.load_by_id(id)
    }

    /// First country in the store's listing.
    pub fn default_country(&self) -> Result<Country> {
        let countries = self.countries.list()?;
        negotiator::default_country(&countries).cloned()
    }

    /// The default country loaded as a term.
    pub fn default_country_term(&self) -> Result<Country> {
        let default = self.default_country()?;
        self.load_country_term(default.id)?.ok_or_else(|| {
            NegotiationError::InvalidCatalog(format!(
                "country term {} is listed but cannot be loaded",
                default.id
            ))
        })
    }

    /// Strip a recognized prefix before route matching.
    ///
    /// Strips exactly when [`negotiate`](Self::negotiate) would match the same path.
    ///
    /// # Errors
    /// * `UpstreamUnavailable` if the country list cannot be fetched
    pub fn rewrite_inbound(&self, path: &str) -> Result<String> {
        let countries = self.countries.list()?;
        let index = self.prefix_index(&countries);
        let rewritten = rewriter::process_inbound_indexed(path, &index);
        if rewritten != path {
            NegotiationMetrics::global().record_inbound_rewrite();
        }
        Ok(rewritten)
    }

    /// Work out the prefix for a generated URL.
    ///
    /// # Arguments
    /// * `path` - Path of the generated URL, returned untouched
    /// * `options` - Explicit language and country, if the caller has them
    /// * `request` - Current request, used when `options` leaves a side open
    ///
    /// # Errors
    /// * `NoCountriesConfigured` if the country has to default and none exist
    /// * `UpstreamUnavailable` if the country list cannot be fetched
    pub fn rewrite_outbound(
        &self,
        path: &str,
        options: UrlOptions,
        request: Option<&RequestContext>,
    ) -> Result<OutboundPath> {
        let metrics = NegotiationMetrics::global();
        let countries = self.countries.list()?;

        match rewriter::process_outbound(path, options, request, self.languages.as_ref(), &countries) {
            Ok(outbound) => {
                if outbound.options.has_prefix() {
                    metrics.record_outbound_prefixed();
                }
                Ok(outbound)
            }
            Err(err) => {
                warn!(path, error = %err, "outbound rewrite failed");
                metrics.record_outbound_failure();
                Err(err)
            }
        }
    }

    /// One link per configured language, titled with native names.
    pub fn language_switch_links(
        &self,
        request: Option<&RequestContext>,
        base: &LinkUrl,
    ) -> Result<Vec<SwitchLink>> {
        let countries = self.countries.list()?;
        let links = switch_links::build_language_switch_links(
            request,
            base,
            &self.languages.native_languages(),
            &countries,
        );
        debug!(count = links.len(), "built language switch links");
        Ok(links)
    }

    /// One link per listed country, keyed by term id.
    pub fn country_switch_links(
        &self,
        request: Option<&RequestContext>,
        base: &LinkUrl,
    ) -> Result<Vec<SwitchLink>> {
        let countries = self.countries.list()?;
        let links = switch_links::build_country_switch_links(
            request,
            base,
            &self.languages.languages(),
            &countries,
        );
        debug!(count = links.len(), "built country switch links");
        Ok(links)
    }

    /// Switchers only make sense with more than one language configured.
    pub fn switcher_visible(&self) -> bool {
        self.languages.is_multilingual()
    }
}
