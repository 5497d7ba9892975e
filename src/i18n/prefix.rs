//! Prefix codec: the single source of truth for the `<country>-<language>`
//! URL segment grammar.
//!
//! Codes are opaque and compared byte for byte. There is no case folding and
//! no Unicode normalization. When the catalogs contain duplicate codes the
//! first pair met while iterating countries (outer) then languages (inner)
//! wins.

use crate::i18n::{Country, Language};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use std::collections::HashMap;

/// Outcome of decoding a prefix. Both fields are set together or not at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NegotiationResult {
    pub language: Option<Language>,
    pub country: Option<Country>,
}

impl NegotiationResult {
    /// The "no match" outcome.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether a (country, language) pair was found.
    ///
    /// # Returns
    /// * `true` when both the language and the country are set
    /// * `false` for the "no match" outcome
    pub fn is_match(&self) -> bool {
        self.language.is_some() && self.country.is_some()
    }
}

/// Build the prefix segment for a pair.
///
/// # Arguments
/// * `country` - Country whose `code` forms the left half
/// * `language` - Language whose `iso_code` (not its id) forms the right half
///
/// # Returns
/// The segment `"<country code>-<language iso code>"`, without slashes.
pub fn encode(country: &Country, language: &Language) -> String {
    format!("{}-{}", country.code, language.iso_code)
}

/// Find the first (country, language) pair whose encoded prefix equals `segment`.
///
/// # Arguments
/// * `segment` - A single, already decoded path segment
/// * `languages` - Candidate languages, inner loop
/// * `countries` - Candidate countries, outer loop
///
/// # Returns
/// The first matching pair, or [`NegotiationResult::none`].
pub fn decode(segment: &str, languages: &[Language], countries: &[Country]) -> NegotiationResult {
    for country in countries {
        for language in languages {
            if matches_pair(segment, country, language) {
                return NegotiationResult {
                    language: Some(language.clone()),
                    country: Some(country.clone()),
                };
            }
        }
    }
    NegotiationResult::none()
}

/// Compare without allocating the encoded prefix.
fn matches_pair(segment: &str, country: &Country, language: &Language) -> bool {
    segment.len() == country.code.len() + 1 + language.iso_code.len()
        && segment.starts_with(country.code.as_str())
        && segment[country.code.len()..].starts_with('-')
        && segment.ends_with(language.iso_code.as_str())
}

/// First path segment after trimming slashes and percent-decoding.
///
/// Returns `None` for the root path.
pub fn first_segment(path: &str) -> Option<String> {
    split_first_segment(path)
        .map(|(segment, _)| segment)
        .filter(|segment| !segment.is_empty())
}

/// Split `path` into its decoded first segment and the raw text after it.
///
/// Slashes are trimmed from both ends and the path is percent-decoded, so an
/// encoded `%2F` separates segments just like `/`. The remainder is returned
/// still encoded and without its leading separator.
///
/// # Returns
/// * `Some((segment, rest))` for any non-root path
/// * `None` for the root path
pub fn split_first_segment(path: &str) -> Option<(String, &str)> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return None;
    }

    let bytes = trimmed.as_bytes();
    let mut decoded = Vec::new();
    let mut offset = 0;
    while offset < trimmed.len() {
        let width = escape_width(bytes, offset)
            .unwrap_or_else(|| trimmed[offset..].chars().next().map_or(1, char::len_utf8));
        let unit: Vec<u8> = percent_decode_str(&trimmed[offset..offset + width]).collect();
        offset += width;
        if unit == b"/" {
            return Some((String::from_utf8_lossy(&decoded).into_owned(), &trimmed[offset..]));
        }
        decoded.extend(unit);
    }
    Some((String::from_utf8_lossy(&decoded).into_owned(), ""))
}

/// Width of a `%XX` escape starting at `offset`, if there is one.
fn escape_width(bytes: &[u8], offset: usize) -> Option<usize> {
    match bytes.get(offset..offset + 3) {
        Some([b'%', high, low]) if high.is_ascii_hexdigit() && low.is_ascii_hexdigit() => Some(3),
        _ => None,
    }
}

/// Precomputed prefix lookup for one catalog snapshot.
///
/// Equivalent to [`decode`] including first-match-wins on duplicate codes.
/// Build it once per snapshot and reuse it while the catalogs are unchanged.
#[derive(Debug, Clone, Default)]
pub struct PrefixIndex {
    pairs: HashMap<String, (Country, Language)>,
}

impl PrefixIndex {
    /// Index every pair of the snapshot under its encoded prefix.
    ///
    /// # Arguments
    /// * `languages` - Languages of the snapshot
    /// * `countries` - Countries of the snapshot, in listing order
    ///
    /// When two pairs encode to the same prefix, the one met first (countries
    /// outer, languages inner) is kept.
    pub fn build(languages: &[Language], countries: &[Country]) -> Self {
        let mut pairs = HashMap::with_capacity(languages.len() * countries.len());
        for country in countries {
            for language in languages {
                pairs
                    .entry(encode(country, language))
                    .or_insert_with(|| (country.clone(), language.clone()));
            }
        }
        Self { pairs }
    }

    /// Look up a decoded segment.
    ///
    /// # Returns
    /// The same result [`decode`] gives for the snapshot the index was built from.
    pub fn lookup(&self, segment: &str) -> NegotiationResult {
        match self.pairs.get(segment) {
            Some((country, language)) => NegotiationResult {
                language: Some(language.clone()),
                country: Some(country.clone()),
            },
            None => NegotiationResult::none(),
        }
    }

    /// Number of distinct prefixes.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::TermId;
    use proptest::prelude::*;

    fn languages() -> Vec<Language> {
        vec![Language::new("en", "English"), Language::new("fr", "French")]
    }

    fn countries() -> Vec<Country> {
        vec![Country::new(1, "us", "United States"), Country::new(2, "fr", "France")]
    }

    // ==================== Encode Tests ====================

    #[test]
    fn test_encode() {
        let prefix = encode(&Country::new(2, "fr", "France"), &Language::new("en", "English"));
        assert_eq!(prefix, "fr-en");
    }

    #[test]
    fn test_encode_uses_iso_code_not_id() {
        let language = Language::new("pt-br", "Portuguese").with_iso_code("pt");
        assert_eq!(encode(&Country::new(5, "br", "Brazil"), &language), "br-pt");
    }

    // ==================== Decode Tests ====================

    #[test]
    fn test_decode_match() {
        let result = decode("fr-en", &languages(), &countries());
        assert!(result.is_match());
        assert_eq!(result.country.map(|c| c.id), Some(2));
        assert_eq!(result.language.map(|l| l.id), Some("en".to_string()));
    }

    #[test]
    fn test_decode_no_match() {
        assert_eq!(decode("de-en", &languages(), &countries()), NegotiationResult::none());
        assert_eq!(decode("", &languages(), &countries()), NegotiationResult::none());
        assert_eq!(decode("us", &languages(), &countries()), NegotiationResult::none());
    }

    #[test]
    fn test_decode_is_case_sensitive() {
        assert!(!decode("US-en", &languages(), &countries()).is_match());
        assert!(!decode("us-EN", &languages(), &countries()).is_match());
    }

    #[test]
    fn test_decode_duplicate_code_first_wins() {
        let countries = vec![
            Country::new(7, "us", "United States"),
            Country::new(8, "us", "United States (duplicate)"),
        ];
        let result = decode("us-en", &languages(), &countries);
        assert_eq!(result.country.map(|c| c.id), Some(7));
    }

    #[test]
    fn test_decode_ambiguous_hyphenated_codes() {
        // "a-b" + "c" and "a" + "b-c" both encode to "a-b-c"; countries iterate first.
        let countries = vec![Country::new(1, "a", "A"), Country::new(2, "a-b", "A-B")];
        let languages = vec![Language::new("c", "C"), Language::new("b-c", "B-C")];
        let result = decode("a-b-c", &languages, &countries);
        assert_eq!(result.country.map(|c| c.id), Some(1));
        assert_eq!(result.language.map(|l| l.id), Some("b-c".to_string()));
    }

    // ==================== Segment Tests ====================

    #[test]
    fn test_first_segment() {
        assert_eq!(first_segment("/fr-en/about"), Some("fr-en".to_string()));
        assert_eq!(first_segment("fr-en"), Some("fr-en".to_string()));
        assert_eq!(first_segment("//fr-en//"), Some("fr-en".to_string()));
    }

    #[test]
    fn test_first_segment_root() {
        assert_eq!(first_segment("/"), None);
        assert_eq!(first_segment(""), None);
    }

    #[test]
    fn test_first_segment_percent_decoded() {
        assert_eq!(first_segment("/%75%73-en/x"), Some("us-en".to_string()));
        assert_eq!(first_segment("/caf%C3%A9/x"), Some("café".to_string()));
    }

    #[test]
    fn test_first_segment_encoded_separator() {
        assert_eq!(first_segment("/fr-en%2Fabout"), Some("fr-en".to_string()));
        assert_eq!(first_segment("/%2Ffr-en"), None);
    }

    #[test]
    fn test_split_keeps_rest_encoded() {
        assert_eq!(
            split_first_segment("/us%2Den/x%20y/"),
            Some(("us-en".to_string(), "x%20y"))
        );
        assert_eq!(
            split_first_segment("/fr-en%2fabout%2Fteam"),
            Some(("fr-en".to_string(), "about%2Fteam"))
        );
        assert_eq!(split_first_segment("/fr-en"), Some(("fr-en".to_string(), "")));
        assert_eq!(split_first_segment("//"), None);
    }

    #[test]
    fn test_split_passes_through_bad_escapes() {
        assert_eq!(split_first_segment("/100%/x"), Some(("100%".to_string(), "x")));
        assert_eq!(split_first_segment("/caf%C3%A9/x"), Some(("café".to_string(), "x")));
    }

    // ==================== Index Tests ====================

    #[test]
    fn test_index_lookup() {
        let index = PrefixIndex::build(&languages(), &countries());
        assert_eq!(index.len(), 4);
        assert_eq!(index.lookup("us-fr").country.map(|c| c.id), Some(1));
        assert!(!index.lookup("xx-en").is_match());
    }

    #[test]
    fn test_index_keeps_first_duplicate() {
        let countries = vec![Country::new(7, "us", "First"), Country::new(8, "us", "Second")];
        let index = PrefixIndex::build(&languages(), &countries);
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("us-en").country.map(|c| c.id), Some(7));
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_round_trip(code in "[a-z]{2}", iso in "[a-z]{2,3}") {
            let country = Country::new(1, code, "Country");
            let language = Language::new(iso, "Language");
            let result = decode(
                &encode(&country, &language),
                std::slice::from_ref(&language),
                std::slice::from_ref(&country),
            );
            prop_assert_eq!(result.country, Some(country));
            prop_assert_eq!(result.language, Some(language));
        }

        #[test]
        fn prop_split_agrees_with_full_decode(path in "(/([a-z-]|%2[dDfF]|%20){0,5}){0,4}") {
            let expected = {
                let trimmed = path.trim_matches('/');
                let decoded = percent_decode_str(trimmed).decode_utf8_lossy().into_owned();
                decoded.split('/').next().filter(|s| !s.is_empty()).map(str::to_string)
            };
            prop_assert_eq!(first_segment(&path), expected);
        }

        #[test]
        fn prop_index_matches_scan(
            codes in proptest::collection::vec("[a-c]{1,2}", 1..5),
            isos in proptest::collection::vec("[a-c]{1,2}", 1..5),
            segment in "[a-c]{1,2}-[a-c]{1,2}",
        ) {
            let countries: Vec<_> = codes
                .into_iter()
                .enumerate()
                .map(|(i, code)| Country::new(i as TermId, code, "C"))
                .collect();
            let languages: Vec<_> = isos
                .into_iter()
                .enumerate()
                .map(|(i, iso)| Language::new(format!("l{}", i), "L").with_iso_code(iso))
                .collect();
            let index = PrefixIndex::build(&languages, &countries);
            prop_assert_eq!(index.lookup(&segment), decode(&segment, &languages, &countries));
        }
    }
}
