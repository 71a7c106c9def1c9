//! Client for the hosted checkout provider's session API.
//!
//! The booking backend opens the payment session; this client only reads
//! the session back after the hosted checkout returns control, to decide
//! whether the booking can be confirmed.

use serde::Deserialize;
use tracing::{info, warn};

use serenenow_common::http::HTTP_CLIENT;
use serenenow_common::CheckoutOutcome;
use serenenow_config::CheckoutConfig;

use crate::error::CheckoutError;

/// State of a hosted checkout session as reported by the provider.
#[derive(Deserialize, Debug, Clone)]
pub struct CheckoutSessionData {
    pub id: String,
    /// The order the backend attached when opening the session.
    pub order_reference: Option<String>,
    /// e.g. "paid", "unpaid", "failed"
    pub payment_status: Option<String>,
    /// e.g. "open", "complete", "expired", "cancelled"
    pub status: Option<String>,
}

/// Client for the hosted payment checkout.
pub struct HostedCheckoutClient {
    base_url: String,
}

impl HostedCheckoutClient {
    pub fn new(config: &CheckoutConfig) -> Result<Self, CheckoutError> {
        if config.base_url.is_empty() {
            return Err(CheckoutError::ConfigError);
        }
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Retrieves the state of a checkout session.
    pub async fn fetch_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSessionData, CheckoutError> {
        let url = format!("{}/v1/checkout/sessions/{}", self.base_url, session_id);

        let response = HTTP_CLIENT.get(&url).send().await?;
        let status = response.status();
        let body_text = response.text().await?;

        if status.is_success() {
            let session: CheckoutSessionData = serde_json::from_str(&body_text)?;
            if session.payment_status.as_deref() != Some("paid")
                && session.status.as_deref() != Some("complete")
            {
                // User can hit the return URL while payment is still
                // processing or after it failed.
                warn!(
                    "Checkout session {} status is {:?}, payment_status is {:?}",
                    session_id, session.status, session.payment_status
                );
            }
            Ok(session)
        } else {
            let message = match serde_json::from_str::<serde_json::Value>(&body_text) {
                Ok(json_body) => json_body
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .unwrap_or(&body_text)
                    .to_string(),
                Err(_) => body_text,
            };
            info!(
                "Failed to retrieve checkout session {}: {} - {}",
                session_id, status, message
            );
            Err(CheckoutError::ApiError {
                status_code: status.as_u16(),
                message,
            })
        }
    }
}

/// Maps a session's state onto a checkout outcome.
///
/// A settled session is `Paid`; a still-open one is `Pending` (the client
/// can return before the gateway finishes processing); an expired or
/// abandoned one is `Cancelled`; anything else that is no longer open
/// counts as `Declined`.
pub fn outcome_from_session(session: &CheckoutSessionData) -> CheckoutOutcome {
    if session.payment_status.as_deref() == Some("paid") {
        return CheckoutOutcome::Paid;
    }
    match session.status.as_deref() {
        Some("open") => CheckoutOutcome::Pending,
        Some("expired") | Some("cancelled") | Some("canceled") => CheckoutOutcome::Cancelled,
        _ => CheckoutOutcome::Declined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(payment_status: Option<&str>, status: Option<&str>) -> CheckoutSessionData {
        CheckoutSessionData {
            id: "cs_test_1".into(),
            order_reference: Some("order_1".into()),
            payment_status: payment_status.map(String::from),
            status: status.map(String::from),
        }
    }

    #[test]
    fn paid_sessions_win_regardless_of_status() {
        assert_eq!(
            outcome_from_session(&session(Some("paid"), Some("complete"))),
            CheckoutOutcome::Paid
        );
        assert_eq!(
            outcome_from_session(&session(Some("paid"), None)),
            CheckoutOutcome::Paid
        );
    }

    #[test]
    fn open_sessions_are_still_pending() {
        assert_eq!(
            outcome_from_session(&session(Some("unpaid"), Some("open"))),
            CheckoutOutcome::Pending
        );
    }

    #[test]
    fn expired_and_cancelled_sessions_are_cancellations() {
        assert_eq!(
            outcome_from_session(&session(Some("unpaid"), Some("expired"))),
            CheckoutOutcome::Cancelled
        );
        assert_eq!(
            outcome_from_session(&session(None, Some("cancelled"))),
            CheckoutOutcome::Cancelled
        );
    }

    #[test]
    fn anything_else_is_a_decline() {
        assert_eq!(
            outcome_from_session(&session(Some("failed"), Some("complete"))),
            CheckoutOutcome::Declined
        );
        assert_eq!(
            outcome_from_session(&session(None, None)),
            CheckoutOutcome::Declined
        );
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let result = HostedCheckoutClient::new(&CheckoutConfig {
            base_url: String::new(),
            success_url: "https://serenenow.in/success".into(),
            cancel_url: "https://serenenow.in/cancel".into(),
        });
        assert!(matches!(result, Err(CheckoutError::ConfigError)));
    }
}
