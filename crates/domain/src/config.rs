//! Configuration structures

use serde::{Deserialize, Serialize};

use crate::constants::{
    PROFILE_COLLECTION, PROFILE_LOAD_MAX_ATTEMPTS, PROFILE_LOAD_RETRY_DELAY_MS,
    SPLASH_MIN_DURATION_MS,
};

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub auth: AuthConfig,
    pub store: StoreConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Identity provider endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the identity provider REST API.
    pub base_url: String,
    /// Provider API key, passed as a query parameter.
    pub api_key: String,
}

/// Document store endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the document transport, e.g. `https://store.example.com/v1`.
    pub base_url: String,
    /// Collection holding profile records.
    #[serde(default = "default_collection")]
    pub collection: String,
}

/// Session establishment tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Attempts for the profile load after sign-in.
    #[serde(default = "default_load_attempts")]
    pub profile_load_attempts: u32,
    /// Fixed delay between profile load attempts, in milliseconds.
    #[serde(default = "default_load_delay_ms")]
    pub profile_load_delay_ms: u64,
    /// Minimum splash display duration, in milliseconds.
    #[serde(default = "default_splash_ms")]
    pub splash_min_duration_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            profile_load_attempts: default_load_attempts(),
            profile_load_delay_ms: default_load_delay_ms(),
            splash_min_duration_ms: default_splash_ms(),
        }
    }
}

fn default_collection() -> String {
    PROFILE_COLLECTION.to_string()
}

fn default_load_attempts() -> u32 {
    PROFILE_LOAD_MAX_ATTEMPTS
}

fn default_load_delay_ms() -> u64 {
    PROFILE_LOAD_RETRY_DELAY_MS
}

fn default_splash_ms() -> u64 {
    SPLASH_MIN_DURATION_MS
}
