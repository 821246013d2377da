//! Router construction and server lifecycle.

use std::net::SocketAddr;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use tokenmint_auth::http::{introspect_handler, token_handler};

use crate::{config::AppConfig, handlers, state::AppState};

pub struct TokenmintServer {
    addr: SocketAddr,
    app: Router,
}

/// Builds the application router.
///
/// # Errors
/// Returns an error when the auth state cannot be built from the
/// configuration (bad key material).
pub fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let state = AppState::from_config(&cfg.auth)?;
    Ok(build_app_with_state(cfg, state))
}

/// Builds the router around pre-built state. Used directly by tests.
pub fn build_app_with_state(cfg: &AppConfig, state: AppState) -> Router {
    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // OAuth endpoints
        .route("/oauth/token", post(token_handler))
        .route("/oauth/introspect", post(introspect_handler))
        // Protected demo resource
        .route(
            "/api/data",
            get(handlers::get_data).post(handlers::create_data),
        )
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http.request",
                    http.method = %req.method(),
                    http.target = %req.uri(),
                )
            }),
        )
        .layer(axum::extract::DefaultBodyLimit::max(cfg.server.body_limit_bytes))
        .with_state(state)
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    #[must_use]
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
        }
    }

    #[must_use]
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    #[must_use]
    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    /// Builds the server.
    ///
    /// # Errors
    /// Returns an error when the router cannot be built.
    pub fn build(self) -> anyhow::Result<TokenmintServer> {
        let app = build_app(&self.config)?;

        Ok(TokenmintServer {
            addr: self.addr,
            app,
        })
    }
}

impl TokenmintServer {
    /// Binds the listener and serves until shutdown.
    ///
    /// # Errors
    /// Returns an error if binding or serving fails.
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
