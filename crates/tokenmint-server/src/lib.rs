//! # tokenmint-server
//!
//! HTTP server for the tokenmint OAuth 2.0 token service.
//!
//! Wires the auth crate's issuer, validator, and introspector into an
//! Axum application with three surfaces:
//!
//! - `POST /oauth/token` - client-credentials token issuance
//! - `POST /oauth/introspect` - token introspection
//! - `/api/*` - demo resource endpoints guarded by bearer tokens

pub mod config;
pub mod handlers;
pub mod observability;
pub mod server;
pub mod state;

pub use config::AppConfig;
pub use server::{ServerBuilder, TokenmintServer, build_app, build_app_with_state};
pub use state::AppState;
