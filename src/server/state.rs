//! Shared state of the proxy handlers

use crate::config::AppConfig;
use crate::core::Backend;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>, config: AppConfig) -> Self {
        Self {
            backend,
            config: Arc::new(config),
        }
    }
}
