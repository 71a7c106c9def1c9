use thiserror::Error;

/// The base error taxonomy for the SereneNow booking core.
///
/// Every component error (API client, checkout adapter, stores) converts
/// into one of these variants so callers can handle outcomes exhaustively.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input rejected before any network call was made
    #[error("Validation failed: {0}")]
    LocalValidation(String),

    /// No response received (DNS failure, connection refused, timeout, abort)
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status and a structured message
    #[error("Backend returned an error: {message} (Status: {status})")]
    Application { status: u16, message: String },

    /// A well-formed response describing an undesirable state
    /// (zero services, slot gone, payment declined)
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// A 2xx response whose body could not be decoded
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local persistence failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// Returns the HTTP status reported by the backend, if this error
    /// originated from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::Application { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when retrying the same request might succeed (nothing was
    /// received, so the backend may never have seen it).
    pub fn is_transport(&self) -> bool {
        matches!(self, CoreError::Transport(_))
    }
}

// Common error conversions
impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        CoreError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_only_present_for_application_errors() {
        let app = CoreError::Application {
            status: 404,
            message: "no such code".into(),
        };
        assert_eq!(app.status(), Some(404));
        assert_eq!(CoreError::Transport("connection refused".into()).status(), None);
        assert_eq!(CoreError::BusinessRule("no services".into()).status(), None);
    }

    #[test]
    fn transport_errors_are_flagged_retryable() {
        assert!(CoreError::Transport("timed out".into()).is_transport());
        let app = CoreError::Application {
            status: 500,
            message: "boom".into(),
        };
        assert!(!app.is_transport());
    }
}
