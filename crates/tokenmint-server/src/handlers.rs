//! HTTP handlers for the health and demo resource endpoints.
//!
//! The resource handlers show the two-stage guard: `BearerAuth` rejects
//! requests without a valid token (401), then `require_scope` rejects
//! tokens lacking the route's scope (403).

use axum::Json;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use tokenmint_auth::error::AuthError;
use tokenmint_auth::middleware::BearerAuth;

/// Service info at the root path.
pub async fn root() -> Json<Value> {
    Json(json!({
        "service": "tokenmint",
        "token_endpoint": "/oauth/token",
        "introspection_endpoint": "/oauth/introspect",
    }))
}

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Protected read endpoint. Requires the `read:data` scope.
pub async fn get_data(BearerAuth(auth): BearerAuth) -> Result<Json<Value>, AuthError> {
    auth.require_scope("read:data")?;

    tracing::debug!(client_id = %auth.client_id(), "Serving protected data");

    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| AuthError::internal(format!("Timestamp formatting failed: {e}")))?;

    Ok(Json(json!({
        "message": "This is protected data",
        "accessed_by": auth.client_id(),
        "granted_scope": auth.token_claims.scope,
        "timestamp": timestamp,
        "data": [
            { "id": 1, "name": "Item 1", "value": 100 },
            { "id": 2, "name": "Item 2", "value": 200 },
            { "id": 3, "name": "Item 3", "value": 300 },
        ],
    })))
}

/// Item accepted by the protected write endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataItem {
    pub id: u64,
    pub name: String,
    pub value: i64,
}

/// Protected write endpoint. Requires the `write:data` scope.
pub async fn create_data(
    BearerAuth(auth): BearerAuth,
    Json(item): Json<DataItem>,
) -> Result<(StatusCode, Json<Value>), AuthError> {
    auth.require_scope("write:data")?;

    tracing::info!(client_id = %auth.client_id(), item_id = item.id, "Data item created");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Data created successfully",
            "created_by": auth.client_id(),
            "item": item,
        })),
    ))
}
