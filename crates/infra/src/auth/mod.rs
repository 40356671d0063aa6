pub mod client;

pub use client::RestIdentityProvider;
