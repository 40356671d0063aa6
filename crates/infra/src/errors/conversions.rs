//! Conversions from external transport errors into port errors.

use reqwest::Error as HttpError;
use unilink_core::ProviderError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the port error.
#[derive(Debug)]
pub struct InfraError(pub ProviderError);

impl From<InfraError> for ProviderError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ProviderError> for InfraError {
    fn from(value: ProviderError) -> Self {
        InfraError(value)
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ProviderError */
/* -------------------------------------------------------------------------- */

fn http_error_to_provider(err: HttpError) -> ProviderError {
    if err.is_timeout() {
        return ProviderError::Network(format!("http request timed out: {err}"));
    }
    if err.is_connect() {
        return ProviderError::Network(format!("http connection failed: {err}"));
    }
    if err.is_request() || err.is_body() {
        return ProviderError::Network(format!("http transport error: {err}"));
    }
    if err.is_decode() {
        return ProviderError::Other(format!("failed to decode http response: {err}"));
    }
    ProviderError::Other(format!("http error: {err}"))
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(http_error_to_provider(value))
    }
}
