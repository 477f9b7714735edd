//! Application state for the web layer.

use std::sync::Arc;

use crate::split::AnalysisConfig;

/// Shared application state.
///
/// Generic over the journey search and booking resolver so the same router
/// can run against the live services or the mock.
pub struct AppState<S, R> {
    /// Journey search client
    pub search: Arc<S>,

    /// Booking token resolver
    pub resolver: Arc<R>,

    /// Split analysis configuration
    pub config: Arc<AnalysisConfig>,
}

impl<S, R> AppState<S, R> {
    /// Create a new app state.
    pub fn new(search: S, resolver: R, config: AnalysisConfig) -> Self {
        Self {
            search: Arc::new(search),
            resolver: Arc::new(resolver),
            config: Arc::new(config),
        }
    }
}

impl<S, R> Clone for AppState<S, R> {
    fn clone(&self) -> Self {
        Self {
            search: Arc::clone(&self.search),
            resolver: Arc::clone(&self.resolver),
            config: Arc::clone(&self.config),
        }
    }
}
