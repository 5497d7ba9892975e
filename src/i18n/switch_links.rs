//! Switch links: one alternative link per language or per country.
//!
//! Each link receives its own copy of the base URL. Rendering later writes a
//! prefix and query onto that copy, so sharing one value would leak options
//! from one link into the next.

use crate::i18n::negotiator;
use crate::i18n::{Country, Language, TermId};
use crate::request::RequestContext;
use crate::url::LinkUrl;
use serde::Serialize;
use std::collections::BTreeMap;

/// CSS class carried by language switch links.
pub const LANGUAGE_LINK_CLASS: &str = "language-link";

/// CSS class carried by country switch links.
pub const COUNTRY_LINK_CLASS: &str = "country-link";

/// Key a switch link is listed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SwitchKey {
    /// Language id
    Language(String),
    /// Country term id
    Country(TermId),
}

/// An alternative link for a language or country switcher.
///
/// `language` and `country` are the options handed to outbound rewriting
/// when the link is rendered; an absent side is negotiated or defaulted then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchLink {
    pub key: SwitchKey,

    /// This link's own copy of the base URL
    pub url: LinkUrl,

    /// Native language name or country name
    pub title: String,

    pub language: Option<Language>,
    pub country: Option<Country>,

    /// Query parameters of the current request, carried over unchanged
    pub query: BTreeMap<String, String>,

    /// [`LANGUAGE_LINK_CLASS`] or [`COUNTRY_LINK_CLASS`]
    pub css_class: &'static str,
}

/// One link per language, in the order given, titled with native names.
///
/// # Arguments
/// * `context` - Current request; its prefix fixes the country of every link
/// * `base` - URL cloned into each link
/// * `native_languages` - Languages already carrying native display names
/// * `countries` - Countries of the current snapshot
///
/// # Returns
/// One link per language. The country is `None` without a request or prefix.
pub fn build_language_switch_links(
    context: Option<&RequestContext>,
    base: &LinkUrl,
    native_languages: &[Language],
    countries: &[Country],
) -> Vec<SwitchLink> {
    let country = context.and_then(|context| {
        negotiator::resolve_country(context.path(), native_languages, countries)
    });
    let query = context.map(|context| context.query_params().clone()).unwrap_or_default();

    native_languages
        .iter()
        .map(|language| SwitchLink {
            key: SwitchKey::Language(language.id.clone()),
            url: base.clone(),
            title: language.name.clone(),
            language: Some(language.clone()),
            country: country.clone(),
            query: query.clone(),
            css_class: LANGUAGE_LINK_CLASS,
        })
        .collect()
}

/// One link per country, in catalog order, keyed by country id.
///
/// The language of every link is the one negotiated from `context`, if any.
pub fn build_country_switch_links(
    context: Option<&RequestContext>,
    base: &LinkUrl,
    languages: &[Language],
    countries: &[Country],
) -> Vec<SwitchLink> {
    let language = context.and_then(|context| {
        negotiator::resolve_language(context.path(), languages, countries)
    });
    let query = context.map(|context| context.query_params().clone()).unwrap_or_default();

    countries
        .iter()
        .map(|country| SwitchLink {
            key: SwitchKey::Country(country.id),
            url: base.clone(),
            title: country.name.clone(),
            language: language.clone(),
            country: Some(country.clone()),
            query: query.clone(),
            css_class: COUNTRY_LINK_CLASS,
        })
        .collect()
}
