//! In-memory port fakes for shell tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::watch;
use unilink_core::{IdentityProvider, ProfileStore, ProviderError};
use unilink_domain::{AuthState, DocumentFields, Identity};

pub struct FakeIdentityProvider {
    state_tx: watch::Sender<AuthState>,
    accounts: Mutex<HashMap<String, (String, String)>>,
    current: Mutex<Option<Identity>>,
}

impl Default for FakeIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeIdentityProvider {
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(AuthState::Unknown);
        Self { state_tx, accounts: Mutex::new(HashMap::new()), current: Mutex::new(None) }
    }

    pub fn report_signed_out(&self) {
        self.state_tx.send_replace(AuthState::SignedOut);
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, ProviderError> {
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
        let (stored, uid) = accounts
            .get(email)
            .ok_or_else(|| ProviderError::api("EMAIL_NOT_FOUND", "EMAIL_NOT_FOUND"))?;
        if stored != password {
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

#[derive(Default)]
pub struct FakeProfileStore {
    records: Mutex<HashMap<(String, String), DocumentFields>>,
    get_failures: AtomicU32,
}

impl FakeProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_gets(&self, n: u32) {
        self.get_failures.store(n, Ordering::SeqCst);
    }

    pub fn seed(&self, collection: &str, key: &str, fields: DocumentFields) {
        self.records
            .lock()
            .unwrap()
            .insert((collection.to_string(), key.to_string()), fields);
    }
}

#[async_trait]
impl ProfileStore for FakeProfileStore {
    async fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<DocumentFields>, ProviderError> {
        if self
            .get_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(ProviderError::Network("connection reset".into()));
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(&(collection.to_string(), key.to_string()))
            .cloned())
    }

    async fn set(
        &self,
        collection: &str,
        key: &str,
        fields: &DocumentFields,
    ) -> Result<(), ProviderError> {
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
