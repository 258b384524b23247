use std::sync::Arc;

use crate::jsearch::JobSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Where raw job pages come from. `JSearchClient` in production.
    pub source: Arc<dyn JobSource>,
}
