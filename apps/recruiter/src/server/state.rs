use std::sync::Arc;

use crate::backend::RecruitingBackend;

/// Shared state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Backend whose capabilities are exposed over HTTP. In the shipped binary this is
    /// the simulated `MockBackend`.
    pub backend: Arc<dyn RecruitingBackend>,
}
