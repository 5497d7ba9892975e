//! Demo host: serves pages under `<country>-<language>` prefixes.
//!
//! A middleware negotiates the locale and strips the prefix before the
//! router sees the request. Pages answer with the negotiated locale and the
//! switch links rendered for it.

use crate::config::Config;
use crate::error::NegotiationError;
use crate::i18n::{Country, Language, MetricsReport, NegotiationMetrics, SwitchLink};
use crate::method::LanguageAndCountryUrl;
use crate::request::RequestContext;
use crate::url::{LanguageOption, LinkUrl, UrlOptions};
use anyhow::Context;
use axum::{
    extract::{Request, State},
    http::{uri::PathAndQuery, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub method: Arc<LanguageAndCountryUrl>,
}

/// Locale negotiated from the original request, before prefix stripping.
#[derive(Debug, Clone)]
pub struct NegotiatedLocale {
    pub request: RequestContext,
    pub language: Option<Language>,
    pub country: Option<Country>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Negotiation(#[from] NegotiationError),

    #[error("invalid rewritten uri: {0}")]
    InvalidUri(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Negotiation(e) if e.is_configuration() => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Negotiation(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InvalidUri(_) => StatusCode::BAD_REQUEST,
        };
        error!(error = %self, "request failed");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// A switch link together with the href rendered from its own URL value.
#[derive(Debug, Serialize)]
pub struct RenderedLink {
    #[serde(flatten)]
    pub link: SwitchLink,
    pub href: String,
}

#[derive(Debug, Serialize)]
pub struct PageDocument {
    pub path: String,
    pub language: Option<Language>,
    pub country: Option<Country>,
    pub language_links: Vec<RenderedLink>,
    pub country_links: Vec<RenderedLink>,
}

/// Build the application router.
pub fn app(method: LanguageAndCountryUrl) -> Router {
    let state = AppState {
        method: Arc::new(method),
    };

    let routes = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .fallback(page)
        .with_state(state.clone());

    // The prefix has to be gone before routing, so the middleware wraps the
    // whole inner router instead of being layered onto it.
    Router::new()
        .fallback_service(routes)
        .layer(middleware::from_fn_with_state(state, negotiate_locale))
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &Config, method: LanguageAndCountryUrl) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);
    axum::serve(listener, app(method))
        .await
        .context("Server error")?;
    Ok(())
}

async fn negotiate_locale(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let context = RequestContext::from_uri(request.uri());
    let negotiated = state.method.negotiate(Some(&context))?;
    let country = match negotiated.country {
        Some(country) => state.method.load_country_term(country.id)?,
        None => None,
    };

    let rewritten = state.method.rewrite_inbound(context.path())?;
    if rewritten != context.path() {
        *request.uri_mut() = replace_path(request.uri(), &rewritten)?;
    }

    request.extensions_mut().insert(NegotiatedLocale {
        request: context,
        language: negotiated.language,
        country,
    });
    Ok(next.run(request).await)
}

/// Swap the path of `uri`, keeping its query.
fn replace_path(uri: &Uri, path: &str) -> Result<Uri, AppError> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(
        path_and_query
            .parse::<PathAndQuery>()
            .map_err(|e| AppError::InvalidUri(e.to_string()))?,
    );
    Uri::from_parts(parts).map_err(|e| AppError::InvalidUri(e.to_string()))
}

async fn health() -> &'static str {
    "OK"
}

async fn metrics() -> Json<MetricsReport> {
    Json(NegotiationMetrics::global().report())
}

async fn page(
    State(state): State<AppState>,
    Extension(locale): Extension<NegotiatedLocale>,
    uri: Uri,
) -> Result<Json<PageDocument>, AppError> {
    let base = LinkUrl::new(uri.path());

    let (language_links, country_links) = if state.method.switcher_visible() {
        let languages = state.method.language_switch_links(Some(&locale.request), &base)?;
        let countries = state.method.country_switch_links(Some(&locale.request), &base)?;
        (
            render_links(&state.method, &locale.request, languages)?,
            render_links(&state.method, &locale.request, countries)?,
        )
    } else {
        (Vec::new(), Vec::new())
    };

    Ok(Json(PageDocument {
        path: uri.path().to_string(),
        language: locale.language,
        country: locale.country,
        language_links,
        country_links,
    }))
}

/// Render each link through outbound rewriting, writing prefix and query
/// onto that link's own URL.
fn render_links(
    method: &LanguageAndCountryUrl,
    request: &RequestContext,
    links: Vec<SwitchLink>,
) -> Result<Vec<RenderedLink>, AppError> {
    links
        .into_iter()
        .map(|mut link| -> Result<RenderedLink, AppError> {
            let options = UrlOptions {
                language: link.language.clone().map(LanguageOption::Resolved),
                country: link.country.clone(),
            };
            let outbound = method.rewrite_outbound(&link.url.path, options, Some(request))?;
            link.url.apply(&outbound.options);
            link.url.query = link.query.clone();
            let href = link.url.render();
            Ok(RenderedLink { link, href })
        })
        .collect()
}
