//! REST document store
//!
//! Binds the `ProfileStore` port to a document REST API: GET and PATCH over
//! `{base}/{collection}/{key}`, bearer-authenticated, speaking the typed
//! wire format. A 404 on GET means "absent", never an error.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use unilink_core::{ProfileStore, ProviderError};
use unilink_domain::DocumentFields;

use crate::http::HttpClient;
use crate::store::wire::WireDocument;

/// Source of bearer tokens for store requests; the identity client is the
/// production implementation.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn bearer_token(&self) -> Result<String, ProviderError>;
}

#[async_trait]
impl TokenSource for crate::auth::RestIdentityProvider {
    async fn bearer_token(&self) -> Result<String, ProviderError> {
        use unilink_core::IdentityProvider;
        self.token().await
    }
}

#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    error: StoreErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StoreErrorDetail {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

/// REST binding of the document store port.
pub struct RestDocumentStore {
    http: HttpClient,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl RestDocumentStore {
    pub fn new(http: HttpClient, base_url: &str, tokens: Arc<dyn TokenSource>) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_string(), tokens }
    }

    fn document_url(&self, collection: &str, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            urlencoding::encode(collection),
            urlencoding::encode(key)
        )
    }

    async fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, ProviderError> {
        let token = self.tokens.bearer_token().await?;
        Ok(builder.bearer_auth(token))
    }

    async fn write(
        &self,
        collection: &str,
        key: &str,
        fields: &DocumentFields,
        mask: Option<&DocumentFields>,
    ) -> Result<(), ProviderError> {
        let mut url = self.document_url(collection, key);
        if let Some(mask) = mask {
            let mask_query = mask
                .keys()
                .map(|field| format!("updateMask.fieldPaths={}", urlencoding::encode(field)))
                .collect::<Vec<_>>()
                .join("&");
            url = format!("{url}?{mask_query}");
        }

        let document = WireDocument::from_fields(fields);
        let request = self.http.request(Method::PATCH, &url).json(&document);
        let response = self.http.send(self.authorized(request).await?).await?;

        if !response.status().is_success() {
            return Err(store_error(response).await);
        }
        debug!(collection, key, fields = fields.len(), masked = mask.is_some(), "document written");
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for RestDocumentStore {
    async fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<DocumentFields>, ProviderError> {
        let request = self.http.request(Method::GET, self.document_url(collection, key));
        let response = self.http.send(self.authorized(request).await?).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let document: WireDocument = response.json().await.map_err(|err| {
                    ProviderError::from(crate::errors::InfraError::from(err))
                })?;
                Ok(Some(document.into_fields()))
            }
            _ => Err(store_error(response).await),
        }
    }

    async fn set(
        &self,
        collection: &str,
        key: &str,
        fields: &DocumentFields,
    ) -> Result<(), ProviderError> {
        self.write(collection, key, fields, None).await
    }

    async fn patch(
        &self,
        collection: &str,
        key: &str,
        fields: &DocumentFields,
    ) -> Result<(), ProviderError> {
        self.write(collection, key, fields, Some(fields)).await
    }
}

async fn store_error(response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<StoreErrorBody>(&body) {
        Ok(parsed) if !parsed.error.status.is_empty() => {
            ProviderError::api(parsed.error.status, parsed.error.message)
        }
        Ok(parsed) => ProviderError::api(status.as_str(), parsed.error.message),
        Err(_) => ProviderError::api(status.as_str(), body),
    }
}
