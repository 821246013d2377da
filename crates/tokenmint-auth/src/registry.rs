//! In-memory client registry.
//!
//! The registry maps client identifiers to their shared secrets. It is
//! loaded once at process start, is read-only afterwards, and is safe to
//! share across any number of request handlers via `Arc`.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

/// A registered OAuth 2.0 client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    /// The OAuth client identifier.
    pub client_id: String,

    /// The shared secret used to authenticate the client.
    pub secret: String,
}

impl Client {
    /// Creates a new client.
    #[must_use]
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            secret: secret.into(),
        }
    }
}

/// Immutable registry of machine clients, keyed by exact client id.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: HashMap<String, Client>,
}

impl ClientRegistry {
    /// Creates a registry from an iterator of clients.
    ///
    /// Later entries with a duplicate `client_id` replace earlier ones.
    #[must_use]
    pub fn new(clients: impl IntoIterator<Item = Client>) -> Self {
        Self {
            clients: clients
                .into_iter()
                .map(|c| (c.client_id.clone(), c))
                .collect(),
        }
    }

    /// Finds a client by its exact client id.
    #[must_use]
    pub fn lookup(&self, client_id: &str) -> Option<&Client> {
        self.clients.get(client_id)
    }

    /// Verifies a client secret.
    ///
    /// Returns `false` for an unknown client id or a mismatched secret.
    /// SHA-256 digests of both secrets are compared instead of the raw
    /// strings, so the comparison time does not depend on where the
    /// secrets first differ.
    #[must_use]
    pub fn verify_secret(&self, client_id: &str, secret: &str) -> bool {
        let Some(client) = self.clients.get(client_id) else {
            return false;
        };
        Sha256::digest(client.secret.as_bytes()) == Sha256::digest(secret.as_bytes())
    }

    /// Returns the number of registered clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Returns `true` if no clients are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
