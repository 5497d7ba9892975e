//! Locale model and the prefix negotiation core.
//!
//! # Architecture
//!
//! - `language` / `registry`: languages and the in-memory language catalog
//! - `country`: country terms and the country catalog collaborator
//! - `prefix`: the `<country>-<language>` segment codec
//! - `negotiator`: resolves the active pair from a request path
//! - `rewriter`: inbound prefix stripping and outbound prefix synthesis
//! - `switch_links`: per-language and per-country alternative links
//! - `metrics`: negotiation counters
//!
//! # Example
//!
//! ```rust
//! use language_and_country::i18n::{prefix, Country, Language};
//!
//! let countries = vec![Country::new(1, "us", "United States"), Country::new(2, "fr", "France")];
//! let languages = vec![Language::new("en", "English"), Language::new("fr", "French")];
//!
//! let result = prefix::decode("fr-en", &languages, &countries);
//! assert_eq!(result.country.map(|c| c.id), Some(2));
//! ```

mod country;
mod language;
mod metrics;
pub mod negotiator;
pub mod prefix;
mod registry;
pub mod rewriter;
pub mod switch_links;

pub use country::{Country, CountryCatalog, CountryList, TermId};
pub use language::{Language, LanguageCatalog};
pub use metrics::{MetricsReport, NegotiationMetrics};
pub use prefix::{NegotiationResult, PrefixIndex};
pub use registry::LanguageRegistry;
pub use switch_links::{SwitchKey, SwitchLink};
