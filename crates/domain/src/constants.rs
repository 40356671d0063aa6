//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Profile validation bounds
pub const GRADUATION_YEAR_MIN: i64 = 1950;
pub const GRADUATION_YEAR_FUTURE_SLACK: i64 = 10;
pub const UNIVERSITY_TITLE_MIN_LEN: usize = 3;

// Document store layout
pub const PROFILE_COLLECTION: &str = "users";

// Session establishment
pub const PROFILE_LOAD_MAX_ATTEMPTS: u32 = 3;
pub const PROFILE_LOAD_RETRY_DELAY_MS: u64 = 1_000;

// Splash screen minimum display floor
pub const SPLASH_MIN_DURATION_MS: u64 = 4_000;
