use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{catalog::Catalog, services::engine::RecommendationEngine, services::providers::CatalogProvider};

/// Shared application state
///
/// Queries take a read lock on the engine; a catalog refresh builds the new
/// snapshot first and takes a short write lock only for the swap.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<RecommendationEngine>>,
    pub provider: Option<Arc<dyn CatalogProvider>>,
}

impl AppState {
    /// Creates state without a catalog provider (refresh disabled)
    pub fn new(catalog: Catalog) -> Self {
        Self::with_provider(catalog, None)
    }

    pub fn with_provider(catalog: Catalog, provider: Option<Arc<dyn CatalogProvider>>) -> Self {
        Self {
            engine: Arc::new(RwLock::new(RecommendationEngine::new(catalog))),
            provider,
        }
    }
}
