//! Field validation rules for profile records
//!
//! All rules operate on trimmed input. Validation is local and pre-flight:
//! it runs before any remote call is issued.

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use unilink_domain::constants::{
    GRADUATION_YEAR_FUTURE_SLACK, GRADUATION_YEAR_MIN, UNIVERSITY_TITLE_MIN_LEN,
};

/// Static email regex pattern compiled once at first use
static EMAIL_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("EMAIL_REGEX pattern is valid and well-formed")
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

pub fn is_valid_name(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn is_valid_university_title(value: &str) -> bool {
    value.trim().len() >= UNIVERSITY_TITLE_MIN_LEN
}

/// Inclusive upper bound for graduation years, relative to the wall clock.
pub fn graduation_year_max() -> i64 {
    i64::from(Utc::now().year()) + GRADUATION_YEAR_FUTURE_SLACK
}

pub fn is_valid_graduation_year(year: i64) -> bool {
    (GRADUATION_YEAR_MIN..=graduation_year_max()).contains(&year)
}

/// Parse a graduation year typed as text, `None` when not a valid integer
/// or out of range.
pub fn parse_graduation_year(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|year| is_valid_graduation_year(*year))
}

/// Normalize an email for storage and provider calls.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
