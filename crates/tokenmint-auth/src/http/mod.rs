//! HTTP handlers for the OAuth 2.0 endpoints.
//!
//! This module provides Axum handlers for:
//!
//! - [`token`] - Token endpoint (`POST /oauth/token`)
//! - [`introspect`] - Introspection endpoint (`POST /oauth/introspect`)

pub mod introspect;
pub mod token;

pub use introspect::{IntrospectionState, introspect_handler};
pub use token::{TokenState, token_handler};
