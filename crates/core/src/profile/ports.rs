//! Port interface for the remote document store
//!
//! The store holds one profile record per identity, keyed by uid.

use async_trait::async_trait;
use unilink_domain::DocumentFields;

use crate::auth::ports::ProviderError;

/// Trait for keyed-record access to the remote document store.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a record, `None` when absent.
    async fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<DocumentFields>, ProviderError>;

    /// Write a full record (creates or replaces).
    async fn set(
        &self,
        collection: &str,
        key: &str,
        fields: &DocumentFields,
    ) -> Result<(), ProviderError>;

    /// Update only the fields present; absent fields stay untouched.
    async fn patch(
        &self,
        collection: &str,
        key: &str,
        fields: &DocumentFields,
    ) -> Result<(), ProviderError>;
}
