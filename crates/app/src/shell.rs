//! Application shell
//!
//! Single dispatch point for the UI layer: owns the navigation state machine
//! behind a mutex, consumes the session store's snapshots, and runs the
//! splash timer. `start`/`shutdown` bracket the process-lifetime
//! subscriptions.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use unilink_core::{
    AccountService, BackAction, Navigator, ResolvedScreen, RetryPolicy, SessionHandle,
    SessionSnapshot, SessionStore, SplashGate,
};
use unilink_domain::{AuthState, Identity, Result, Screen, SessionConfig, UserProfile};

pub struct AppShell {
    account: Arc<AccountService>,
    navigator: Mutex<Navigator>,
    /// Latest profile, kept current by the session consumer and by
    /// `refresh_profile`.
    profile: Mutex<Option<UserProfile>>,
    snapshot_rx: watch::Receiver<SessionSnapshot>,
    session: Mutex<Option<SessionHandle>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl AppShell {
    /// Start the shell: subscribe to the identity provider (via the session
    /// store), start the splash timer, and begin consuming snapshots.
    pub fn start(
        account: Arc<AccountService>,
        auth_rx: watch::Receiver<AuthState>,
        config: &SessionConfig,
    ) -> Arc<Self> {
        let policy = RetryPolicy::profile_load(config);
        let session = SessionStore::start(auth_rx, account.clone(), policy);
        let snapshot_rx = session.subscribe();

        let shell = Arc::new(Self {
            account,
            navigator: Mutex::new(Navigator::new()),
            profile: Mutex::new(None),
            snapshot_rx: snapshot_rx.clone(),
            session: Mutex::new(Some(session)),
            tasks: Mutex::new(Vec::new()),
        });

        let gate = SplashGate::new(Duration::from_millis(config.splash_min_duration_ms));
        let splash_shell = shell.clone();
        let splash_task = tokio::spawn(async move {
            gate.wait_floor().await;
            splash_shell.navigator.lock().unwrap().set_splash_elapsed();
            debug!("splash floor elapsed");
        });

        let consumer_shell = shell.clone();
        let mut rx = snapshot_rx;
        let consumer_task = tokio::spawn(async move {
            loop {
                let snapshot = rx.borrow_and_update().clone();
                {
                    let mut navigator = consumer_shell.navigator.lock().unwrap();
                    navigator.apply_session(
                        snapshot.auth.clone(),
                        snapshot.profile_loaded,
                        snapshot.load_failed,
                    );
                }
                *consumer_shell.profile.lock().unwrap() = snapshot.profile;

                if rx.changed().await.is_err() {
                    break;
                }
            }
        });

        shell.tasks.lock().unwrap().extend([splash_task, consumer_task]);
        info!("application shell started");
        shell
    }

    /// Release the session subscription and stop the shell's tasks.
    pub fn shutdown(&self) {
        if let Some(session) = self.session.lock().unwrap().take() {
            session.stop();
        }
        for task in self.tasks.lock().unwrap().drain(..) {
            task.abort();
        }
        info!("application shell stopped");
    }

    pub fn account(&self) -> &Arc<AccountService> {
        &self.account
    }

    pub fn navigate(&self, target: Screen) {
        self.navigator.lock().unwrap().navigate(target);
    }

    pub fn go_back(&self) {
        self.navigator.lock().unwrap().go_back();
    }

    pub fn back_request(&self) -> BackAction {
        self.navigator.lock().unwrap().back_request()
    }

    pub fn current_screen(&self) -> Screen {
        self.navigator.lock().unwrap().current_screen()
    }

    pub fn can_go_back(&self) -> bool {
        self.navigator.lock().unwrap().can_go_back()
    }

    /// What the UI should render right now.
    pub fn resolve(&self) -> ResolvedScreen {
        self.navigator.lock().unwrap().resolve()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.snapshot_rx.borrow().auth.identity().cloned()
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.profile.lock().unwrap().clone()
    }

    pub fn profile_loaded(&self) -> bool {
        self.navigator.lock().unwrap().profile_loaded()
    }

    /// Re-fetch the current identity's profile, e.g. after an edit.
    pub async fn refresh_profile(&self) -> Result<UserProfile> {
        let identity = self
            .identity()
            .ok_or_else(|| unilink_domain::UnilinkError::validation(["uid"]))?;
        let profile = self.account.fetch_profile(&identity.uid).await?;
        *self.profile.lock().unwrap() = Some(profile.clone());
        Ok(profile)
    }
}

impl Drop for AppShell {
    fn drop(&mut self) {
        self.shutdown();
    }
}
