//! Inbound and outbound path processing.
//!
//! Inbound strips a recognized prefix before route matching. Outbound works
//! out which prefix a generated link should carry; it never edits the path.

use crate::error::Result;
use crate::i18n::negotiator;
use crate::i18n::prefix::{self, NegotiationResult, PrefixIndex};
use crate::i18n::{Country, Language, LanguageCatalog};
use crate::request::RequestContext;
use crate::url::{LanguageOption, OutboundPath, ResolvedOptions, UrlOptions, URL_LANGUAGE_CACHE_CONTEXT};
use tracing::{debug, warn};

/// Remove a recognized prefix segment from `path`.
///
/// At most the first segment is removed, and only when it decodes. Any other
/// path comes back exactly as given. The segment is taken the way negotiation
/// takes it (see [`prefix::split_first_segment`]), so a path is stripped
/// exactly when it negotiates to a pair. The rest of the path stays encoded.
///
/// # Arguments
/// * `path` - Request path as received
/// * `languages` - Languages of the current snapshot
/// * `countries` - Countries of the current snapshot
///
/// # Returns
/// The path without its prefix, always starting with `/`, or `path` unchanged.
pub fn process_inbound(path: &str, languages: &[Language], countries: &[Country]) -> String {
    strip_prefix(path, |segment| prefix::decode(segment, languages, countries))
}

/// [`process_inbound`] against a prebuilt [`PrefixIndex`].
pub fn process_inbound_indexed(path: &str, index: &PrefixIndex) -> String {
    strip_prefix(path, |segment| index.lookup(segment))
}

fn strip_prefix(path: &str, lookup: impl Fn(&str) -> NegotiationResult) -> String {
    let Some((segment, rest)) = prefix::split_first_segment(path) else {
        return path.to_string();
    };
    if segment.is_empty() || !lookup(&segment).is_match() {
        return path.to_string();
    }

    let rewritten = format!("/{}", rest);
    debug!(from = path, to = %rewritten, "stripped locale prefix");
    rewritten
}

/// Resolve the language and country a generated URL should carry.
///
/// Language: explicit value, then a known explicit id, then the context's
/// prefix, then the catalog default. Country: explicit value, then the
/// context's prefix, then the first catalog country.
///
/// # Errors
/// * `NoCountriesConfigured` if the country has to default and the catalog is empty
pub fn process_outbound(
    path: &str,
    options: UrlOptions,
    context: Option<&RequestContext>,
    languages: &dyn LanguageCatalog,
    countries: &[Country],
) -> Result<OutboundPath> {
    let language_list = languages.languages();
    let negotiated = context.map(|context| negotiator::negotiate(context.path(), &language_list, countries));

    let language = match options.language {
        Some(LanguageOption::Resolved(language)) => Some(language),
        Some(LanguageOption::Id(id)) => match languages.language(&id) {
            Some(language) => Some(language),
            None => {
                warn!(language = %id, "unknown language requested for outbound URL");
                None
            }
        },
        None => None,
    }
    .or_else(|| negotiated.as_ref().and_then(|result| result.language.clone()))
    .unwrap_or_else(|| languages.default_language());

    let country = match options
        .country
        .or_else(|| negotiated.and_then(|result| result.country))
    {
        Some(country) => country,
        None => negotiator::default_country(countries)?.clone(),
    };

    let prefix = format!("{}/", prefix::encode(&country, &language));
    debug!(path, prefix = %prefix, "resolved outbound prefix");

    Ok(OutboundPath {
        path: path.to_string(),
        options: ResolvedOptions {
            language: Some(language),
            country: Some(country),
            prefix: Some(prefix),
            cache_contexts: vec![URL_LANGUAGE_CACHE_CONTEXT],
        },
    })
}
