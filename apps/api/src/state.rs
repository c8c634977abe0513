use std::sync::Arc;

use crate::config::Config;
use crate::enhancer::Enhancer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing in here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable pipeline. Local by default; hosted model with ENHANCER_MODE=llm.
    pub enhancer: Arc<dyn Enhancer>,
    pub config: Config,
}
