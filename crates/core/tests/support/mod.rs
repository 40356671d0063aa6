//! Mock port implementations for testing
//!
//! Provides in-memory mocks for the identity provider and document store
//! ports, enabling deterministic tests without network dependencies.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use unilink_core::{IdentityProvider, ProfileStore, ProviderError};
use unilink_domain::{AuthState, DocumentFields, Identity};

/// In-memory mock for `IdentityProvider`.
///
/// Accounts live in a map keyed by email; state reports flow through the
/// same watch channel the real adapter uses.
pub struct MockIdentityProvider {
    state_tx: watch::Sender<AuthState>,
    accounts: Mutex<HashMap<String, (String, String)>>,
    current: Mutex<Option<Identity>>,
    sign_up_calls: AtomicU32,
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(AuthState::Unknown);
        Self {
            state_tx,
            accounts: Mutex::new(HashMap::new()),
            current: Mutex::new(None),
            sign_up_calls: AtomicU32::new(0),
        }
    }

    /// Simulate the provider's first report for a fresh install.
    pub fn report_signed_out(&self) {
        self.state_tx.send_replace(AuthState::SignedOut);
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.accounts.lock().unwrap().contains_key(email)
    }

    pub fn sign_up_calls(&self) -> u32 {
        self.sign_up_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, ProviderError> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);

        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(ProviderError::api("EMAIL_EXISTS", "EMAIL_EXISTS"));
        }
        let uid = format!("uid-{}", uuid::Uuid::new_v4());
        accounts.insert(email.to_string(), (password.to_string(), uid.clone()));
        drop(accounts);

        let identity = Identity::new(uid, email);
        *self.current.lock().unwrap() = Some(identity.clone());
        self.state_tx.send_replace(AuthState::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, ProviderError> {
        let accounts = self.accounts.lock().unwrap();
        let (stored_password, uid) = accounts
            .get(email)
            .ok_or_else(|| ProviderError::api("EMAIL_NOT_FOUND", "EMAIL_NOT_FOUND"))?;
        if stored_password != password {
            return Err(ProviderError::api("INVALID_PASSWORD", "INVALID_PASSWORD"));
        }
        let identity = Identity::new(uid.clone(), email);
        drop(accounts);

        *self.current.lock().unwrap() = Some(identity.clone());
        self.state_tx.send_replace(AuthState::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        *self.current.lock().unwrap() = None;
        self.state_tx.send_replace(AuthState::SignedOut);
        Ok(())
    }

    async fn delete_current_identity(&self) -> Result<(), ProviderError> {
        let identity = self
            .current
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| ProviderError::Other("no current identity".into()))?;
        self.accounts.lock().unwrap().remove(&identity.email);
        self.state_tx.send_replace(AuthState::SignedOut);
        Ok(())
    }

    async fn token(&self) -> Result<String, ProviderError> {
        self.current
            .lock()
            .unwrap()
            .as_ref()
            .map(|identity| format!("token-{}", identity.uid))
            .ok_or_else(|| ProviderError::Other("not signed in".into()))
    }

    fn watch_state(&self) -> watch::Receiver<AuthState> {
        self.state_tx.subscribe()
    }
}

/// In-memory mock for `ProfileStore` with failure injection.
#[derive(Default)]
pub struct MockProfileStore {
    records: Mutex<HashMap<(String, String), DocumentFields>>,
    get_failures: AtomicU32,
    set_failures: AtomicU32,
    get_calls: AtomicU32,
}

impl MockProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` get calls fail with a network error.
    pub fn fail_next_gets(&self, n: u32) {
        self.get_failures.store(n, Ordering::SeqCst);
    }

    /// Make the next `n` set calls fail with a store error.
    pub fn fail_next_sets(&self, n: u32) {
        self.set_failures.store(n, Ordering::SeqCst);
    }

    pub fn get_calls(&self) -> u32 {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn seed(&self, collection: &str, key: &str, fields: DocumentFields) {
        self.records
            .lock()
            .unwrap()
            .insert((collection.to_string(), key.to_string()), fields);
    }

    pub fn record(&self, collection: &str, key: &str) -> Option<DocumentFields> {
        self.records
            .lock()
            .unwrap()
            .get(&(collection.to_string(), key.to_string()))
            .cloned()
    }

    fn take_failure(counter: &AtomicU32) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl ProfileStore for MockProfileStore {
    async fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<DocumentFields>, ProviderError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if Self::take_failure(&self.get_failures) {
            return Err(ProviderError::Network("connection reset".into()));
        }
        Ok(self.record(collection, key))
    }

    async fn set(
        &self,
        collection: &str,
        key: &str,
        fields: &DocumentFields,
    ) -> Result<(), ProviderError> {
        if Self::take_failure(&self.set_failures) {
            return Err(ProviderError::api("STORE_WRITE_FAILED", "write rejected"));
        }
        self.seed(collection, key, fields.clone());
        Ok(())
    }

    async fn patch(
        &self,
        collection: &str,
        key: &str,
        fields: &DocumentFields,
    ) -> Result<(), ProviderError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .entry((collection.to_string(), key.to_string()))
            .or_default();
        for (name, value) in fields {
            record.insert(name.clone(), value.clone());
        }
        Ok(())
    }
}

/// Await a snapshot on `rx` matching `predicate`, with a generous timeout.
pub async fn wait_for<T, F>(rx: &mut watch::Receiver<T>, mut predicate: F) -> T
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    tokio::time::timeout(Duration::from_secs(30), async {
        loop {
            if predicate(&rx.borrow()) {
                return rx.borrow().clone();
            }
            rx.changed().await.expect("watch sender dropped");
        }
    })
    .await
    .expect("timed out waiting for snapshot")
}
