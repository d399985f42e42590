//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{build_health_routes, build_invoice_routes};
use crate::config::DashboardConfig;
use crate::core::service::{InvoiceActions, InvoiceSource};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for the dashboard's HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryInvoiceStore::new())
///     .with_config(DashboardConfig::from_yaml_file("dashboard.yaml")?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    source: Option<Arc<dyn InvoiceSource>>,
    actions: Option<Arc<dyn InvoiceActions>>,
    config: DashboardConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            source: None,
            actions: None,
            config: DashboardConfig::default_config(),
            custom_routes: Vec::new(),
        }
    }

    /// Use one backend for both reads and the create action
    pub fn with_store<S>(self, store: S) -> Self
    where
        S: InvoiceSource + InvoiceActions + 'static,
    {
        let store = Arc::new(store);
        let source: Arc<dyn InvoiceSource> = store.clone();
        let actions: Arc<dyn InvoiceActions> = store;
        self.with_source(source).with_actions(actions)
    }

    /// Set the read side of the data layer (required)
    pub fn with_source(mut self, source: Arc<dyn InvoiceSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the create action (required)
    pub fn with_actions(mut self, actions: Arc<dyn InvoiceActions>) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the shared handler state
    pub fn build_state(&mut self) -> Result<AppState> {
        self.config.validate()?;

        let source = self
            .source
            .take()
            .ok_or_else(|| anyhow::anyhow!("InvoiceSource is required. Call .with_source()"))?;
        let actions = self
            .actions
            .take()
            .ok_or_else(|| anyhow::anyhow!("InvoiceActions is required. Call .with_actions()"))?;

        Ok(AppState::new(source, actions, Arc::new(self.config.clone())))
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let state = self.build_state()?;

        let mut app = build_health_routes().merge(build_invoice_routes(state));
        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve on the configured bind address with graceful shutdown
    pub async fn serve_from_config(self) -> Result<()> {
        let addr = self.config.bind_addr()?.to_string();
        self.serve(&addr).await
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

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
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
