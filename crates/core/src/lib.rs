//! # Unilink Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the identity provider and document store
//! - The account service (auth operations + profile CRUD)
//! - The session store with bounded retry
//! - The navigation state machine and splash gate
//!
//! ## Architecture Principles
//! - Only depends on `unilink-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod auth;
pub mod navigation;
pub mod profile;
pub mod session;

// Re-export specific items to avoid ambiguity
pub use auth::messages::{translate, user_message};
pub use auth::ports::{IdentityProvider, ProviderError};
pub use navigation::machine::{BackAction, Navigator, ResolvedScreen};
pub use navigation::splash::SplashGate;
pub use profile::ports::ProfileStore;
pub use profile::service::AccountService;
pub use session::retry::{retry, RetryPolicy};
pub use session::store::{SessionHandle, SessionSnapshot, SessionStore};
