//! REST identity provider
//!
//! Binds the `IdentityProvider` port to a password-based auth REST API:
//! sign-up, sign-in, account deletion, and token refresh. The API key rides
//! as a query parameter; the current session (id token, refresh token,
//! expiry) lives behind an async lock and tokens are refreshed transparently
//! when close to expiry.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use reqwest::{Method, Response, StatusCode};
use serde::Deserialize;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};
use unilink_core::{IdentityProvider, ProviderError};
use unilink_domain::{AuthConfig, AuthState, Identity};

use crate::http::HttpClient;

/// Refresh the id token this long before it actually expires.
const TOKEN_EXPIRY_LEEWAY_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct AuthSession {
    identity: Identity,
    id_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl AuthSession {
    fn needs_refresh(&self) -> bool {
        Utc::now() + ChronoDuration::seconds(TOKEN_EXPIRY_LEEWAY_SECS) >= self.expires_at
    }
}

/// Sign-up / sign-in response. Expiry arrives as a string of seconds.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialResponse {
    local_id: String,
    email: String,
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

/// Token refresh response (snake_case on this endpoint).
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    email: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// REST binding of the identity provider port.
pub struct RestIdentityProvider {
    http: HttpClient,
    base_url: String,
    api_key: String,
    session: RwLock<Option<AuthSession>>,
    /// Reports go through `send_replace` so a state issued before anyone
    /// subscribes (session restore runs ahead of the shell) is kept as the
    /// channel's current value.
    state_tx: watch::Sender<AuthState>,
}

impl RestIdentityProvider {
    pub fn new(http: HttpClient, config: &AuthConfig) -> Self {
        let (state_tx, _) = watch::channel(AuthState::Unknown);
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            session: RwLock::new(None),
            state_tx,
        }
    }

    /// Restore a persisted session, or report signed-out when there is none.
    ///
    /// A rejected refresh token (revoked or expired) resolves to signed-out;
    /// transport failures propagate so the caller can retry.
    pub async fn restore(&self, refresh_token: Option<&str>) -> Result<AuthState, ProviderError> {
        let Some(refresh_token) = refresh_token else {
            self.state_tx.send_replace(AuthState::SignedOut);
            return Ok(AuthState::SignedOut);
        };

        match self.refresh(refresh_token).await {
            Ok(session) => {
                let state = AuthState::SignedIn(session.identity.clone());
                *self.session.write().await = Some(session);
                self.state_tx.send_replace(state.clone());
                info!("session restored from refresh token");
                Ok(state)
            }
            Err(ProviderError::Api { code, .. }) => {
                debug!(code, "persisted session rejected, starting signed out");
                self.state_tx.send_replace(AuthState::SignedOut);
                Ok(AuthState::SignedOut)
            }
            Err(err) => Err(err),
        }
    }

    /// Refresh token of the current session, for persistence across runs.
    pub async fn session_refresh_token(&self) -> Option<String> {
        self.session.read().await.as_ref().map(|s| s.refresh_token.clone())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}?key={}", self.base_url, path, urlencoding::encode(&self.api_key))
    }

    async fn credential_call(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ProviderError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        let response = self
            .http
            .send(self.http.request(Method::POST, self.endpoint(path)).json(&body))
            .await?;
        let credential: CredentialResponse = decode(response).await?;

        Ok(AuthSession {
            identity: Identity::new(credential.local_id, credential.email),
            id_token: credential.id_token,
            refresh_token: credential.refresh_token,
            expires_at: expiry(&credential.expires_in),
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, ProviderError> {
        let response = self
            .http
            .send(
                self.http
                    .request(Method::POST, self.endpoint("token"))
                    .form(&[("grant_type", "refresh_token"), ("refresh_token", refresh_token)]),
            )
            .await?;
        let refreshed: RefreshResponse = decode(response).await?;
        let email = self.lookup_email(&refreshed.id_token).await?;

        Ok(AuthSession {
            identity: Identity::new(refreshed.user_id, email),
            id_token: refreshed.id_token,
            refresh_token: refreshed.refresh_token,
            expires_at: expiry(&refreshed.expires_in),
        })
    }

    async fn lookup_email(&self, id_token: &str) -> Result<String, ProviderError> {
        let body = serde_json::json!({ "idToken": id_token });
        let response = self
            .http
            .send(self.http.request(Method::POST, self.endpoint("accounts:lookup")).json(&body))
            .await?;
        let lookup: LookupResponse = decode(response).await?;
        lookup
            .users
            .into_iter()
            .next()
            .map(|user| user.email)
            .ok_or_else(|| ProviderError::Other("account lookup returned no users".into()))
    }

    async fn install_session(&self, session: AuthSession) -> Identity {
        let identity = session.identity.clone();
        *self.session.write().await = Some(session);
        self.state_tx.send_replace(AuthState::SignedIn(identity.clone()));
        identity
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, ProviderError> {
        let session = self.credential_call("accounts:signUp", email, password).await?;
        info!(uid = %session.identity.uid, "account created");
        Ok(self.install_session(session).await)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, ProviderError> {
        let session = self.credential_call("accounts:signInWithPassword", email, password).await?;
        info!(uid = %session.identity.uid, "signed in");
        Ok(self.install_session(session).await)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        *self.session.write().await = None;
        self.state_tx.send_replace(AuthState::SignedOut);
        Ok(())
    }

    async fn delete_current_identity(&self) -> Result<(), ProviderError> {
        let id_token = {
            let session = self.session.read().await;
            session
                .as_ref()
                .map(|s| s.id_token.clone())
                .ok_or_else(|| ProviderError::Other("no current identity to delete".into()))?
        };

        let body = serde_json::json!({ "idToken": id_token });
        let response = self
            .http
            .send(self.http.request(Method::POST, self.endpoint("accounts:delete")).json(&body))
            .await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        *self.session.write().await = None;
        self.state_tx.send_replace(AuthState::SignedOut);
        warn!("current identity deleted");
        Ok(())
    }

    async fn token(&self) -> Result<String, ProviderError> {
        {
            let session = self.session.read().await;
            match session.as_ref() {
                None => return Err(ProviderError::Other("not signed in".into())),
                Some(current) if !current.needs_refresh() => {
                    return Ok(current.id_token.clone());
                }
                Some(_) => {}
            }
        }

        // Token is stale: refresh outside the read lock, then swap.
        let refresh_token = self
            .session_refresh_token()
            .await
            .ok_or_else(|| ProviderError::Other("not signed in".into()))?;
        let refreshed = self.refresh(&refresh_token).await?;
        let id_token = refreshed.id_token.clone();
        *self.session.write().await = Some(refreshed);
        debug!("id token refreshed");
        Ok(id_token)
    }

    fn watch_state(&self) -> watch::Receiver<AuthState> {
        self.state_tx.subscribe()
    }
}

fn expiry(expires_in: &str) -> DateTime<Utc> {
    let seconds = expires_in.parse::<i64>().unwrap_or(0);
    Utc::now() + ChronoDuration::seconds(seconds)
}

/// Decode a JSON body, turning non-success statuses into API errors.
async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ProviderError::from(crate::errors::InfraError::from(err)))
}

/// Extract the provider's error code from a failed response body.
///
/// The code string sometimes carries a trailing explanation
/// (`"WEAK_PASSWORD : ..."`); only the leading token is the code.
async fn api_error(response: Response) -> ProviderError {
    let status: StatusCode = response.status();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) => {
            let message = parsed.error.message;
            let code = message
                .split([' ', ':'])
                .next()
                .unwrap_or(&message)
                .trim()
                .to_string();
            ProviderError::api(code, message)
        }
        Err(_) => ProviderError::api(status.as_str(), body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_parses_seconds() {
        let at = expiry("3600");
        let delta = at - Utc::now();
        assert!(delta > ChronoDuration::seconds(3590) && delta <= ChronoDuration::seconds(3600));
    }

    #[test]
    fn session_near_expiry_needs_refresh() {
        let session = AuthSession {
            identity: Identity::new("u1", "a@b.com"),
            id_token: "t".into(),
            refresh_token: "r".into(),
            expires_at: Utc::now() + ChronoDuration::seconds(30),
        };
        assert!(session.needs_refresh());

        let fresh = AuthSession { expires_at: Utc::now() + ChronoDuration::seconds(3600), ..session };
        assert!(!fresh.needs_refresh());
    }
}
