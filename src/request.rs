//! Request context handed to the negotiation core by the host.

use axum::http::Uri;
use std::collections::BTreeMap;

/// Path and query of the request being served.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    path: String,
    query: BTreeMap<String, String>,
}

impl RequestContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: BTreeMap::new(),
        }
    }

    pub fn with_query(mut self, query: BTreeMap<String, String>) -> Self {
        self.query = query;
        self
    }

    /// Build from a request URI. An unparsable query string yields no parameters.
    pub fn from_uri(uri: &Uri) -> Self {
        let query = uri
            .query()
            .and_then(|raw| serde_urlencoded::from_str::<BTreeMap<String, String>>(raw).ok())
            .unwrap_or_default();
        Self {
            path: uri.path().to_string(),
            query,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &BTreeMap<String, String> {
        &self.query
    }
}
