//! Port interfaces for the identity provider
//!
//! These traits define the boundary between core business logic and the
//! infrastructure binding of the external identity provider.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;
use unilink_domain::{AuthState, Identity};

/// Error reported by a remote collaborator (identity provider or document
/// store) before translation into a user-facing message.
///
/// Adapters return this type; the account service runs it through the error
/// translator so raw provider errors never reach callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider rejected the request with a machine-readable code.
    #[error("provider error {code}: {message}")]
    Api { code: String, message: String },

    /// The request never produced a provider response.
    #[error("network error: {0}")]
    Network(String),

    /// Anything else (malformed response, adapter bug).
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api { code: code.into(), message: message.into() }
    }
}

/// Trait for the external identity provider.
///
/// The provider owns credential storage, token issuance, and session
/// persistence. State changes are observed through a watch channel whose
/// initial value is [`AuthState::Unknown`] until the provider first reports.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a new identity from credentials.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, ProviderError>;

    /// Authenticate an existing identity.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, ProviderError>;

    /// End the current session. Idempotent.
    async fn sign_out(&self) -> Result<(), ProviderError>;

    /// Destroy the currently signed-in identity (registration rollback only).
    async fn delete_current_identity(&self) -> Result<(), ProviderError>;

    /// Current bearer token for store access.
    async fn token(&self) -> Result<String, ProviderError>;

    /// Observe authentication state changes.
    fn watch_state(&self) -> watch::Receiver<AuthState>;
}
