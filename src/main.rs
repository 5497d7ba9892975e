use anyhow::Result;
use language_and_country::i18n::LanguageCatalog;
use language_and_country::{catalog, config::Config, server, LanguageAndCountryUrl};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("language_and_country=info".parse()?),
        )
        .init();

    info!("Starting language and country negotiation host");

    let config = Config::from_env()?;

    let catalogs = catalog::load(&config.catalog_path)?;
    if !catalogs.languages.is_multilingual() {
        info!("Only one language configured, switch links are suppressed");
    }

    let method = LanguageAndCountryUrl::new(
        Arc::new(catalogs.languages),
        Arc::new(catalogs.countries),
    );

    server::serve(&config, method).await
}
