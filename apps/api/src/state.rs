use std::sync::Arc;

use crate::config::Config;
use crate::keywords::Tokenizer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once at startup; read-only afterwards, so it is shared across requests.
    pub tokenizer: Arc<dyn Tokenizer>,
}
