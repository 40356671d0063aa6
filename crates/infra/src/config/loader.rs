//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `UNILINK_AUTH_BASE_URL`: Identity provider base URL
//! - `UNILINK_AUTH_API_KEY`: Identity provider API key
//! - `UNILINK_STORE_BASE_URL`: Document store base URL
//! - `UNILINK_STORE_COLLECTION`: Profile collection name (optional)
//! - `UNILINK_PROFILE_LOAD_ATTEMPTS`: Profile load retry attempts (optional)
//! - `UNILINK_PROFILE_LOAD_DELAY_MS`: Delay between attempts (optional)
//! - `UNILINK_SPLASH_MIN_DURATION_MS`: Splash minimum display (optional)
//!
//! ## File Locations
//! The loader probes `config.{json,toml}` and `unilink.{json,toml}` in the
//! working directory, up to two parent directories, and next to the
//! executable.

use std::path::{Path, PathBuf};

use unilink_domain::{Config, Result, SessionConfig, UnilinkError};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `UnilinkError::Config` if configuration cannot be loaded from
/// either source, the file format is invalid, or required fields are missing.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// The auth and store variables are required; collection and session tuning
/// knobs fall back to their defaults.
///
/// # Errors
/// Returns `UnilinkError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<Config> {
    let auth_base_url = env_var("UNILINK_AUTH_BASE_URL")?;
    let auth_api_key = env_var("UNILINK_AUTH_API_KEY")?;
    let store_base_url = env_var("UNILINK_STORE_BASE_URL")?;
    let store_collection = std::env::var("UNILINK_STORE_COLLECTION")
        .unwrap_or_else(|_| unilink_domain::constants::PROFILE_COLLECTION.to_string());

    let defaults = SessionConfig::default();
    let session = SessionConfig {
        profile_load_attempts: env_number(
            "UNILINK_PROFILE_LOAD_ATTEMPTS",
            defaults.profile_load_attempts,
        )?,
        profile_load_delay_ms: env_number(
            "UNILINK_PROFILE_LOAD_DELAY_MS",
            defaults.profile_load_delay_ms,
        )?,
        splash_min_duration_ms: env_number(
            "UNILINK_SPLASH_MIN_DURATION_MS",
            defaults.splash_min_duration_ms,
        )?,
    };

    let config = Config {
        auth: unilink_domain::AuthConfig { base_url: auth_base_url, api_key: auth_api_key },
        store: unilink_domain::StoreConfig {
            base_url: store_base_url,
            collection: store_collection,
        },
        session,
    };
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `UnilinkError::Config` if no file is found, the format is
/// invalid, or required fields are missing.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(UnilinkError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            UnilinkError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| UnilinkError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Parse configuration from string content; format is detected by file
/// extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| UnilinkError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| UnilinkError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(UnilinkError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the working directory, up to two parent directories, and the
/// executable's directory, preferring `config.*` over `unilink.*` and JSON
/// over TOML within a location.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        for dir in [cwd.clone(), cwd.join(".."), cwd.join("../..")] {
            push_candidates(&mut candidates, &dir);
        }
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            push_candidates(&mut candidates, exe_dir);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn push_candidates(candidates: &mut Vec<PathBuf>, dir: &Path) {
    for name in ["config.json", "config.toml", "unilink.json", "unilink.toml"] {
        candidates.push(dir.join(name));
    }
}

/// Reject configurations whose base URLs cannot be parsed.
fn validate(config: &Config) -> Result<()> {
    for (label, value) in
        [("auth.base_url", &config.auth.base_url), ("store.base_url", &config.store.base_url)]
    {
        url::Url::parse(value)
            .map_err(|e| UnilinkError::Config(format!("Invalid {}: {}", label, e)))?;
    }
    if config.auth.api_key.trim().is_empty() {
        return Err(UnilinkError::Config("auth.api_key must not be empty".into()));
    }
    Ok(())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        UnilinkError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional numeric environment variable, with a default.
fn env_number<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| UnilinkError::Config(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}
