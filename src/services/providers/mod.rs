//! Catalog data provider abstraction
//!
//! Pluggable sources of movie metadata (OMDb today, other ratings APIs
//! later) used to enrich the catalog at runtime. Providers look titles up
//! by name and return raw records in the same shape the catalog loader
//! consumes.

use crate::{
    catalog::RawMovieRecord,
    error::{AppError, AppResult},
};

pub mod omdb;

pub use omdb::OmdbProvider;

/// Outcome of a batch lookup: partial failure is expected and reported,
/// not fatal, as long as at least one title resolved
#[derive(Debug)]
pub struct BatchLookup {
    pub records: Vec<RawMovieRecord>,
    /// Titles that could not be resolved, in request order
    pub failed: Vec<String>,
}

/// Trait for catalog data providers
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Look up a single title by name
    async fn lookup_title(&self, title: &str) -> AppResult<RawMovieRecord>;

    /// Look up multiple titles in parallel
    ///
    /// Default implementation spawns one task per title. Fails only when
    /// every lookup failed; otherwise failed titles are reported alongside
    /// the resolved records.
    async fn lookup_batch(&self, titles: Vec<String>) -> AppResult<BatchLookup> {
        let mut tasks = Vec::new();
        for title in titles {
            let provider = self.clone_for_task();
            tasks.push(tokio::spawn(async move {
                let record = provider.lookup_title(&title).await;
                (title, record)
            }));
        }

        let mut records = Vec::new();
        let mut failed = Vec::new();
        for task in tasks {
            match task.await {
                Ok((_, Ok(record))) => records.push(record),
                Ok((title, Err(e))) => {
                    tracing::error!(title = %title, error = %e, "Title lookup failed");
                    failed.push(title);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Lookup task join error");
                    return Err(AppError::Internal(e.to_string()));
                }
            }
        }

        if records.is_empty() && !failed.is_empty() {
            return Err(AppError::ExternalApi(
                "Failed to resolve any requested title".to_string(),
            ));
        }

        if !failed.is_empty() {
            tracing::warn!(
                resolved = records.len(),
                failed = failed.len(),
                "Partial batch lookup failure"
            );
        }

        Ok(BatchLookup { records, failed })
    }

    /// Clone provider for parallel task execution
    fn clone_for_task(&self) -> Box<dyn CatalogProvider>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
