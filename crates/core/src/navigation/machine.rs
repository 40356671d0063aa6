//! Navigation state machine
//!
//! Owns the current screen, the back-navigation history, and the gating that
//! substitutes loading/auth screens at render time. Purely synchronous: all
//! mutation is serialized through these methods by the caller.

use tracing::debug;
use unilink_domain::{AuthState, Screen};

/// Outcome of a hardware back request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// History was popped (or reset); nothing further to do.
    Handled,
    /// A root screen intercepted the request; the embedder should show an
    /// exit-confirmation prompt (accept terminates, cancel no-ops).
    ConfirmExit,
}

/// What should actually be rendered for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedScreen {
    /// Splash is held until the minimum display floor has elapsed AND the
    /// provider has reported its first auth state.
    Splash,
    /// Identity present but its profile has not been fetched yet.
    LoadingProfile,
    Screen(Screen),
}

/// The navigation state machine.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Screen,
    history: Vec<Screen>,
    auth: AuthState,
    profile_loaded: bool,
    load_failed: bool,
    splash_elapsed: bool,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Initial mount: `Register` with a single-entry history.
    pub fn new() -> Self {
        Self {
            current: Screen::Register,
            history: vec![Screen::Register],
            auth: AuthState::Unknown,
            profile_loaded: false,
            load_failed: false,
            splash_elapsed: false,
        }
    }

    pub fn current_screen(&self) -> Screen {
        self.current
    }

    pub fn history(&self) -> &[Screen] {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn profile_loaded(&self) -> bool {
        self.profile_loaded
    }

    /// Push `target` onto the history. No-op when already there.
    pub fn navigate(&mut self, target: Screen) {
        if target == self.current {
            debug!(screen = %target, "already on screen");
            return;
        }
        self.history.push(target);
        self.current = target;
        debug!(screen = %target, depth = self.history.len(), "navigated");
    }

    /// Replace the whole history with `[target]`. Used on auth changes.
    pub fn navigate_reset(&mut self, target: Screen) {
        self.history.clear();
        self.history.push(target);
        self.current = target;
        debug!(screen = %target, "history reset");
    }

    /// Pop to the previous screen; with a single-entry history, reset to the
    /// default root for the current auth state.
    pub fn go_back(&mut self) {
        if self.history.len() > 1 {
            self.history.pop();
            self.current = *self.history.last().unwrap_or(&Screen::Login);
            debug!(screen = %self.current, "went back");
        } else {
            let root = if self.auth.identity().is_some() { Screen::Home } else { Screen::Login };
            self.navigate_reset(root);
        }
    }

    /// Hardware back request: root screens convert it into an exit prompt,
    /// everything else pops history.
    pub fn back_request(&mut self) -> BackAction {
        if self.current.is_root() {
            BackAction::ConfirmExit
        } else {
            self.go_back();
            BackAction::Handled
        }
    }

    /// Mark the splash minimum-display floor as elapsed.
    pub fn set_splash_elapsed(&mut self) {
        self.splash_elapsed = true;
    }

    /// Feed the latest session picture into the machine.
    ///
    /// Auth transitions reset the history: sign-in lands on `Home`, sign-out
    /// or an exhausted profile load lands on `Login`.
    pub fn apply_session(&mut self, auth: AuthState, profile_loaded: bool, load_failed: bool) {
        let auth_changed = auth != self.auth;
        let load_just_failed = load_failed && !self.load_failed;
        // A re-login with the same identity clears `load_failed` without
        // changing the auth value; that recovery resets like a fresh sign-in.
        let load_recovered = !load_failed && self.load_failed;

        self.auth = auth;
        self.profile_loaded = profile_loaded;
        self.load_failed = load_failed;

        if load_just_failed {
            self.navigate_reset(Screen::Login);
        } else if auth_changed || load_recovered {
            match &self.auth {
                AuthState::SignedIn(_) => self.navigate_reset(Screen::Home),
                AuthState::SignedOut => self.navigate_reset(Screen::Login),
                AuthState::Unknown => {}
            }
        }
    }

    /// Resolve what to render for the current state.
    pub fn resolve(&self) -> ResolvedScreen {
        if !self.splash_elapsed || !self.auth.is_checked() {
            return ResolvedScreen::Splash;
        }

        if self.current.requires_auth() {
            return match self.auth.identity() {
                None => ResolvedScreen::Screen(Screen::Login),
                Some(_) if !self.profile_loaded => ResolvedScreen::LoadingProfile,
                Some(_) => ResolvedScreen::Screen(self.current),
            };
        }

        ResolvedScreen::Screen(self.current)
    }
}
