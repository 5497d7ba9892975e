//! Error taxonomy for language and country negotiation.
//!
//! A prefix that does not decode is not an error: resolvers return `None`
//! and the outbound chain falls through to its defaults. Only configuration
//! problems and collaborator failures cross the crate boundary.

use thiserror::Error;

/// Result alias used throughout the negotiation core.
pub type Result<T, E = NegotiationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum NegotiationError {
    /// A default country was required but the country catalog is empty.
    #[error("no countries configured: a default country is required")]
    NoCountriesConfigured,

    /// A catalog collaborator failed to produce its snapshot.
    #[error("catalog unavailable: {context}")]
    UpstreamUnavailable {
        context: String,
        #[source]
        source: anyhow::Error,
    },

    /// The catalog snapshot is malformed.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl NegotiationError {
    /// Wrap a collaborator error without altering it.
    pub fn upstream(context: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::UpstreamUnavailable {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Whether the error stems from catalog configuration rather than transport.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::NoCountriesConfigured | Self::InvalidCatalog(_))
    }
}
