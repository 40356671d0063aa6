//! Error translator
//!
//! Maps provider error codes to user-facing messages. Total: every input
//! yields a message, unknown codes fall back to the provider's raw message
//! or a generic default.

use unilink_domain::UnilinkError;

use super::ports::ProviderError;

const GENERIC_MESSAGE: &str = "Something went wrong. Please try again";

/// Translate a provider error code into a user-facing message.
///
/// `fallback` is the provider's raw message, used verbatim for unknown codes
/// when non-empty.
pub fn user_message(code: &str, fallback: &str) -> String {
    let known = match code {
        "EMAIL_EXISTS" => "This email is already registered",
        "WEAK_PASSWORD" => "The password must be at least 6 characters",
        "INVALID_EMAIL" => "Invalid email address",
        "EMAIL_NOT_FOUND" => "No account found for this email",
        "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => "Incorrect email or password",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts. Try again later",
        "NETWORK_REQUEST_FAILED" => "Connection error. Check your internet",
        "USER_DISABLED" => "This account has been disabled",
        "TOKEN_EXPIRED" => "Your session has expired. Sign in again",
        _ => {
            return if fallback.trim().is_empty() {
                GENERIC_MESSAGE.to_string()
            } else {
                fallback.to_string()
            };
        }
    };
    known.to_string()
}

/// Translate a [`ProviderError`] into the domain error taxonomy.
pub fn translate(err: ProviderError) -> UnilinkError {
    match err {
        ProviderError::Api { code, message } => {
            UnilinkError::Remote(user_message(&code, &message))
        }
        ProviderError::Network(message) => UnilinkError::Network(message),
        ProviderError::Other(message) => {
            if message.trim().is_empty() {
                UnilinkError::Remote(GENERIC_MESSAGE.to_string())
            } else {
                UnilinkError::Remote(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_messages() {
        assert_eq!(user_message("EMAIL_EXISTS", ""), "This email is already registered");
        assert_eq!(user_message("INVALID_PASSWORD", ""), "Incorrect email or password");
        assert_eq!(
            user_message("INVALID_LOGIN_CREDENTIALS", ""),
            "Incorrect email or password"
        );
        assert_eq!(user_message("NETWORK_REQUEST_FAILED", ""), "Connection error. Check your internet");
    }

    #[test]
    fn unknown_code_falls_back_to_raw_message() {
        assert_eq!(user_message("QUOTA_EXCEEDED", "Quota exceeded"), "Quota exceeded");
    }

    #[test]
    fn unknown_code_with_empty_message_uses_generic_default() {
        assert_eq!(user_message("SOMETHING_NEW", ""), GENERIC_MESSAGE);
        assert_eq!(user_message("SOMETHING_NEW", "   "), GENERIC_MESSAGE);
    }

    #[test]
    fn translate_keeps_the_taxonomy() {
        let remote = translate(ProviderError::api("EMAIL_EXISTS", "raw"));
        assert_eq!(remote, UnilinkError::Remote("This email is already registered".into()));

        let network = translate(ProviderError::Network("timed out".into()));
        assert_eq!(network, UnilinkError::Network("timed out".into()));

        let other = translate(ProviderError::Other(String::new()));
        assert_eq!(other, UnilinkError::Remote(GENERIC_MESSAGE.into()));
    }
}
