use serenenow_common::CoreError;
use thiserror::Error;

/// Checkout-provider specific error types.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Error occurred during a provider API request
    #[error("Checkout provider request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the provider API
    #[error("Checkout provider returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing a provider API response
    #[error("Failed to parse checkout provider response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or incomplete checkout configuration
    #[error("Checkout configuration missing or incomplete")]
    ConfigError,

    /// The session references a different order than the one being settled
    #[error("Checkout session {session_id} does not belong to order {order_id}")]
    OrderMismatch {
        session_id: String,
        order_id: String,
    },
}

impl From<CheckoutError> for CoreError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::RequestError(e) => CoreError::Transport(e.to_string()),
            CheckoutError::ApiError {
                status_code,
                message,
            } => CoreError::Application {
                status: status_code,
                message,
            },
            CheckoutError::ParseError(e) => CoreError::Parse(e.to_string()),
            CheckoutError::ConfigError => {
                CoreError::Config("checkout configuration missing or incomplete".to_string())
            }
            CheckoutError::OrderMismatch {
                session_id,
                order_id,
            } => CoreError::BusinessRule(format!(
                "checkout session {} does not belong to order {}",
                session_id, order_id
            )),
        }
    }
}
