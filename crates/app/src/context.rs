//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use unilink_core::{translate, AccountService};
use unilink_domain::{AuthState, Config, Result};
use unilink_infra::{HttpClient, RestDocumentStore, RestIdentityProvider, TokenSource};

use crate::shell::AppShell;

/// Application context - holds all services and dependencies.
pub struct AppContext {
    pub config: Config,
    pub provider: Arc<RestIdentityProvider>,
    pub store: Arc<RestDocumentStore>,
    pub account: Arc<AccountService>,
}

impl AppContext {
    /// Wire the REST adapters and the account service from configuration.
    pub fn new(config: Config) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("unilink/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(translate)?;

        let provider = Arc::new(RestIdentityProvider::new(http.clone(), &config.auth));
        let tokens: Arc<dyn TokenSource> = provider.clone();
        let store =
            Arc::new(RestDocumentStore::new(http, &config.store.base_url, tokens));
        let account = Arc::new(AccountService::new(
            provider.clone(),
            store.clone(),
            config.store.collection.clone(),
        ));

        info!(collection = %config.store.collection, "application context ready");
        Ok(Self { config, provider, store, account })
    }

    /// Load configuration and wire everything.
    pub fn from_environment() -> Result<Self> {
        let config = unilink_infra::config::load()?;
        Self::new(config)
    }

    /// Restore a persisted session before the shell starts, so the first
    /// provider report reflects it.
    pub async fn restore_session(&self, refresh_token: Option<&str>) -> Result<AuthState> {
        self.provider.restore(refresh_token).await.map_err(translate)
    }

    /// Start the application shell on top of this context.
    pub fn start_shell(&self) -> Arc<AppShell> {
        use unilink_core::IdentityProvider;
        AppShell::start(self.account.clone(), self.provider.watch_state(), &self.config.session)
    }
}
