//! Language and country negotiation from `<country>-<language>` URL prefixes.
//!
//! Incoming paths like `/fr-en/about` resolve to the country with code `fr`
//! and the language with code `en`, and are rewritten to `/about` before
//! routing. Outgoing links get the matching prefix back.

pub mod catalog;
pub mod config;
pub mod error;
pub mod i18n;
pub mod method;
pub mod request;
pub mod server;
pub mod url;

pub use error::{NegotiationError, Result};
pub use method::{LanguageAndCountryUrl, METHOD_ID};
pub use request::RequestContext;
pub use url::{LanguageOption, LinkUrl, OutboundPath, ResolvedOptions, UrlOptions};
