//! HTTP middleware for bearer-token authentication.
//!
//! This module provides Axum extractors for:
//!
//! - Bearer token extraction and validation
//! - Authorization context injection
//! - Scope enforcement on protected routes
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::get};
//! use tokenmint_auth::middleware::{AuthState, BearerAuth};
//!
//! async fn protected_handler(BearerAuth(auth): BearerAuth) -> String {
//!     format!("Hello, {}!", auth.client_id())
//! }
//!
//! let app = Router::new()
//!     .route("/protected", get(protected_handler))
//!     .with_state(auth_state);
//! ```

pub mod auth;
pub mod error;
pub mod types;

pub use auth::{AuthState, BearerAuth};
pub use types::AuthContext;
