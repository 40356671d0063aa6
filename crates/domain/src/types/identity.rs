//! Identity types
//!
//! The identity itself lives in the external provider; the core only holds
//! an opaque reference to it.

use serde::{Deserialize, Serialize};

/// Opaque reference to an identity owned by the external provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
}

impl Identity {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self { uid: uid.into(), email: email.into() }
    }
}

/// Authentication state as reported by the identity provider.
///
/// `Unknown` is the state before the provider has reported anything; the
/// navigation layer derives `auth_checked` from it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AuthState {
    #[default]
    Unknown,
    SignedOut,
    SignedIn(Identity),
}

impl AuthState {
    /// True once the provider has reported its first state.
    pub fn is_checked(&self) -> bool {
        !matches!(self, AuthState::Unknown)
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthState::SignedIn(identity) => Some(identity),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_state_is_not_checked() {
        assert!(!AuthState::Unknown.is_checked());
        assert!(AuthState::SignedOut.is_checked());
        assert!(AuthState::SignedIn(Identity::new("u1", "a@b.com")).is_checked());
    }

    #[test]
    fn identity_accessor() {
        let state = AuthState::SignedIn(Identity::new("u1", "a@b.com"));
        assert_eq!(state.identity().map(|i| i.uid.as_str()), Some("u1"));
        assert!(AuthState::SignedOut.identity().is_none());
    }
}
