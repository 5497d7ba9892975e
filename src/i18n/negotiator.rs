//! Negotiation of the active (language, country) pair from a request path.
//!
//! Only the first path segment is ever considered. The rest of the path is
//! ignored.

use crate::error::{NegotiationError, Result};
use crate::i18n::prefix::{self, NegotiationResult, PrefixIndex};
use crate::i18n::{Country, Language};
use tracing::debug;

/// Decode the prefix of `path` against the catalogs.
///
/// # Arguments
/// * `path` - Request path; only its first segment is read
/// * `languages` - Languages of the current snapshot
/// * `countries` - Countries of the current snapshot
///
/// # Returns
/// The matched pair, or [`NegotiationResult::none`] for the root path and for
/// segments that are not a known prefix.
pub fn negotiate(path: &str, languages: &[Language], countries: &[Country]) -> NegotiationResult {
    negotiate_with(path, |segment| prefix::decode(segment, languages, countries))
}

/// [`negotiate`] against a prebuilt [`PrefixIndex`].
pub fn negotiate_indexed(path: &str, index: &PrefixIndex) -> NegotiationResult {
    negotiate_with(path, |segment| index.lookup(segment))
}

fn negotiate_with(path: &str, lookup: impl Fn(&str) -> NegotiationResult) -> NegotiationResult {
    let Some(segment) = prefix::first_segment(path) else {
        debug!(path, "root path, nothing to negotiate");
        return NegotiationResult::none();
    };

    let result = lookup(&segment);
    debug!(path, segment = %segment, matched = result.is_match(), "negotiated path prefix");
    result
}

/// Language of the matched prefix, if any.
///
/// Comes from the same pair as [`resolve_country`] for the same path.
pub fn resolve_language(path: &str, languages: &[Language], countries: &[Country]) -> Option<Language> {
    negotiate(path, languages, countries).language
}

/// Country of the matched prefix, if any.
pub fn resolve_country(path: &str, languages: &[Language], countries: &[Country]) -> Option<Country> {
    negotiate(path, languages, countries).country
}

/// First country in catalog order.
///
/// # Errors
/// * `NoCountriesConfigured` if the catalog is empty
pub fn default_country(countries: &[Country]) -> Result<&Country> {
    countries.first().ok_or(NegotiationError::NoCountriesConfigured)
}
