//! Session store
//!
//! Observes the identity provider's state reports for the lifetime of the
//! process and publishes the session picture (identity, profile, load state)
//! to the navigation layer. Profile loads run under the bounded retry policy;
//! completions belonging to a superseded auth report are discarded.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use unilink_domain::{AuthState, UserProfile};

use crate::profile::service::AccountService;
use crate::session::retry::{retry, RetryPolicy};

/// What the session store publishes to the navigation layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub auth: AuthState,
    pub profile: Option<UserProfile>,
    /// True once the profile has been fetched for the current identity.
    pub profile_loaded: bool,
    /// True when the load exhausted its retry budget; navigation falls back
    /// to the unauthenticated state.
    pub load_failed: bool,
}

/// The session store. `start` acquires the provider subscription and returns
/// the owned handle that releases it.
pub struct SessionStore;

impl SessionStore {
    /// Subscribe to the identity provider and start the session task.
    ///
    /// The subscription is a process-lifetime resource: it is acquired here
    /// exactly once and released exactly once when the returned handle is
    /// stopped or dropped.
    pub fn start(
        mut auth_rx: watch::Receiver<AuthState>,
        account: Arc<AccountService>,
        policy: RetryPolicy,
    ) -> SessionHandle {
        let (tx, snapshot_rx) = watch::channel(SessionSnapshot::default());

        let task = tokio::spawn(async move {
            loop {
                let state = auth_rx.borrow_and_update().clone();

                match &state {
                    AuthState::SignedIn(identity) => {
                        let _ = tx.send(SessionSnapshot {
                            auth: state.clone(),
                            profile: None,
                            profile_loaded: false,
                            load_failed: false,
                        });

                        let uid = identity.uid.clone();
                        let outcome =
                            retry(policy, |_| account.fetch_profile(&uid)).await;

                        // A newer report arrived while the load ran; its
                        // outcome no longer describes the current identity.
                        if auth_rx.has_changed().unwrap_or(false) {
                            debug!(uid = %uid, "discarding stale profile load");
                        } else {
                            match outcome {
                                Ok(profile) => {
                                    info!(uid = %uid, "profile loaded");
                                    let _ = tx.send(SessionSnapshot {
                                        auth: state.clone(),
                                        profile: Some(profile),
                                        profile_loaded: true,
                                        load_failed: false,
                                    });
                                }
                                Err(err) => {
                                    warn!(uid = %uid, error = %err, "profile load failed");
                                    let _ = tx.send(SessionSnapshot {
                                        auth: state.clone(),
                                        profile: None,
                                        profile_loaded: false,
                                        load_failed: true,
                                    });
                                }
                            }
                        }
                    }
                    _ => {
                        let _ = tx.send(SessionSnapshot {
                            auth: state.clone(),
                            ..SessionSnapshot::default()
                        });
                    }
                }

                if auth_rx.changed().await.is_err() {
                    debug!("identity provider dropped, session task ending");
                    break;
                }
            }
        });

        SessionHandle { task, snapshot_rx }
    }
}

/// Owned handle to the running session task.
///
/// Dropping the handle releases the provider subscription; `stop` makes the
/// release explicit at teardown.
pub struct SessionHandle {
    task: JoinHandle<()>,
    snapshot_rx: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Subscribe to published session snapshots.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Clone of the current snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Release the subscription and stop the session task.
    pub fn stop(self) {
        // Drop does the actual release.
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
