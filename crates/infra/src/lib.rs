//! # Unilink Infrastructure
//!
//! Transport bindings for the core ports.
//!
//! This crate contains:
//! - The REST identity provider (auth endpoints, token refresh)
//! - The REST document store (typed wire format, bearer auth)
//! - The shared HTTP client with retry and timeout support
//! - The configuration loader (environment first, file fallback)
//!
//! ## Architecture
//! - Implements traits defined in `unilink-core`
//! - Depends on `unilink-domain` and `unilink-core`
//! - Contains all "impure" code (network I/O, process environment)

pub mod auth;
pub mod config;
pub mod errors;
pub mod http;
pub mod store;

pub use auth::RestIdentityProvider;
pub use errors::InfraError;
pub use http::HttpClient;
pub use store::{RestDocumentStore, TokenSource};
