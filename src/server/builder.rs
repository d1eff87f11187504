//! ServerBuilder for fluent API to build the proxy

use super::router::{API_PREFIX, api_routes, health_routes};
use super::state::AppState;
use crate::config::AppConfig;
use crate::core::Backend;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the pass-through proxy
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_backend(HttpBackend::from_config(&config)?)
///     .with_config(config)
///     .build()?;
/// ```
pub struct ServerBuilder {
    backend: Option<Arc<dyn Backend>>,
    config: AppConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            backend: None,
            config: AppConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the backend every route forwards to (required)
    pub fn with_backend(mut self, backend: impl Backend + 'static) -> Self {
        self.backend = Some(Arc::new(backend));
        self
    }

    /// Same as [`with_backend`](Self::with_backend) for an already shared backend
    pub fn with_shared_backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Add routes outside `/api/v1`, merged at the root
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the router: `/api/v1/*`, `/health`, custom routes, then
    /// request tracing and permissive CORS for the browser client
    pub fn build(self) -> Result<Router> {
        self.config.validate()?;
        let backend = self
            .backend
            .ok_or_else(|| anyhow::anyhow!("Backend is required. Call .with_backend()"))?;

        let state = AppState::new(backend, self.config);
        let mut app = Router::new()
            .nest(API_PREFIX, api_routes(state))
            .merge(health_routes());

        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()))
    }

    /// Serve the proxy with graceful shutdown on SIGTERM and Ctrl+C
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Proxy listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
