use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use marquee_api::{
    api::{create_router, AppState},
    catalog::Catalog,
    config::Config,
    services::providers::{CatalogProvider, OmdbProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("marquee_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load_from_path(path)?,
        None => Catalog::starter(),
    };
    tracing::info!(movies = catalog.len(), "Catalog ready");

    let provider: Option<Arc<dyn CatalogProvider>> = config
        .omdb_api_key
        .clone()
        .map(|key| {
            Arc::new(OmdbProvider::new(key, config.omdb_api_url.clone()))
                as Arc<dyn CatalogProvider>
        });
    if provider.is_none() {
        tracing::info!("No OMDb API key configured, catalog refresh disabled");
    }

    let state = AppState::with_provider(catalog, provider);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(host = %config.host, port = config.port, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
