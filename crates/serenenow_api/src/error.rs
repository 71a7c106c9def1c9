use serenenow_common::CoreError;
use thiserror::Error;

/// Errors raised by the booking backend client.
///
/// A transport failure (`RequestError`) means no response was received and
/// a retry may be sensible; an `ApiError` carries a parsed non-2xx status
/// and message, so the backend definitely saw the request.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response received (DNS, connection refused, timeout, abort)
    #[error("Backend request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("Backend returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// A 2xx response whose body did not match the expected shape
    #[error("Failed to parse backend response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or invalid client configuration
    #[error("API client configuration error: {0}")]
    ConfigError(String),
}

impl From<ApiError> for CoreError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::RequestError(e) => CoreError::Transport(e.to_string()),
            ApiError::ApiError {
                status_code,
                message,
            } => CoreError::Application {
                status: status_code,
                message,
            },
            ApiError::ParseError(e) => CoreError::Parse(e.to_string()),
            ApiError::ConfigError(msg) => CoreError::Config(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_errors_keep_their_status() {
        let err = ApiError::ApiError {
            status_code: 404,
            message: "code not found".into(),
        };
        let core: CoreError = err.into();
        assert_eq!(core.status(), Some(404));
        assert!(!core.is_transport());
    }

    #[test]
    fn config_errors_map_to_config() {
        let core: CoreError = ApiError::ConfigError("missing base url".into()).into();
        assert!(matches!(core, CoreError::Config(_)));
    }
}
