//! HTTP client for the SereneNow booking backend.
//!
//! Translates typed requests into JSON-over-HTTPS calls against one
//! configured base URL and normalizes non-2xx responses into [`ApiError`].
//! Every method is a single round trip: no retry, no backoff, no fan-out.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Mutex;
use tracing::{debug, error};

use serenenow_common::http::{create_client, DEFAULT_TIMEOUT_SECS};
use serenenow_common::models::{
    AppointmentResult, ClientProfile, CodeValidationOutcome, CreateBookingRequest, DaySlots,
    RegisterClientRequest, RegisteredClient, SlotQuery,
};
use serenenow_config::ApiConfig;

use crate::error::ApiError;

#[derive(Serialize, Debug)]
struct ValidateCodeRequest<'a> {
    code: &'a str,
}

/// Client for the booking backend's public REST surface.
pub struct BookingApiClient {
    client: Client,
    base_url: String,
    /// Bearer token attached to requests once a client session exists.
    bearer_token: Mutex<Option<String>>,
}

impl BookingApiClient {
    /// Creates a new client from the API section of the app config.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        if config.base_url.is_empty() {
            return Err(ApiError::ConfigError("api.base_url is empty".into()));
        }
        let timeout = config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = create_client(timeout, true)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: Mutex::new(None),
        })
    }

    /// Attach (or drop) the bearer token used for authenticated endpoints.
    /// Overwrites, never merges.
    pub fn set_bearer_token(&self, token: Option<String>) {
        let mut guard = self
            .bearer_token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = token;
    }

    fn current_token(&self) -> Option<String> {
        self.bearer_token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a prepared request and decodes the response, mapping non-2xx
    /// statuses to [`ApiError::ApiError`] with the backend's message.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = match self.current_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let body_text = response.text().await?;

        if status.is_success() {
            Ok(serde_json::from_str(&body_text)?)
        } else {
            let message = extract_error_message(&body_text);
            error!("Backend request failed: {} - {}", status, message);
            Err(ApiError::ApiError {
                status_code: status.as_u16(),
                message,
            })
        }
    }

    /// Resolves a 6-digit invite code into client, expert and services.
    pub async fn validate_code(&self, code: &str) -> Result<CodeValidationOutcome, ApiError> {
        debug!("Validating invite code");
        let url = self.endpoint("/public/codes/validate");
        self.execute(self.client.post(&url).json(&ValidateCodeRequest { code }))
            .await
    }

    /// Fetches available appointment windows for an expert+service+date
    /// tuple, rendered in the requested timezone.
    pub async fn fetch_slots(&self, query: &SlotQuery) -> Result<Vec<DaySlots>, ApiError> {
        let url = self.endpoint(&format!("/public/experts/{}/slots", query.expert_id));
        let mut params: Vec<(&str, String)> = vec![
            ("service_id", query.service_id.clone()),
            ("timezone", query.timezone.clone()),
        ];
        if let Some(date) = query.date {
            params.push(("date", date.format("%Y-%m-%d").to_string()));
        }
        debug!("Fetching slots for expert {}", query.expert_id);
        self.execute(self.client.get(&url).query(&params)).await
    }

    /// Registers (or invites) a client; the response establishes their
    /// identity and bearer token.
    pub async fn register_client(
        &self,
        request: &RegisterClientRequest,
    ) -> Result<RegisteredClient, ApiError> {
        debug!("Registering client with expert {}", request.expert_id);
        let url = self.endpoint("/public/clients/register");
        self.execute(self.client.post(&url).json(request)).await
    }

    /// Creates an appointment. A 409 means the slot was taken between
    /// lookup and submission.
    pub async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> Result<AppointmentResult, ApiError> {
        debug!(
            "Creating booking for service {} on {}",
            request.service_id, request.date
        );
        let url = self.endpoint("/bookings");
        self.execute(self.client.post(&url).json(request)).await
    }

    /// Confirms a stored bearer token against the backend. The local
    /// `is_authenticated` check is optimistic; this is the real one.
    pub async fn validate_token(&self, token: &str) -> Result<ClientProfile, ApiError> {
        let url = self.endpoint("/clients/me");
        self.execute(self.client.get(&url).bearer_auth(token)).await
    }
}

/// Pulls a human-readable message out of a backend error body, falling
/// back to the raw body when it isn't the conventional JSON shape.
pub(crate) fn extract_error_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json_body) => json_body
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .or_else(|| json_body.get("message").and_then(|m| m.as_str()))
            .unwrap_or(body)
            .to_string(),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> BookingApiClient {
        BookingApiClient::new(&ApiConfig {
            base_url: "https://api.serenenow.in/".into(),
            timeout_secs: Some(5),
        })
        .expect("client should build")
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = test_client();
        assert_eq!(
            client.endpoint("/public/codes/validate"),
            "https://api.serenenow.in/public/codes/validate"
        );
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let result = BookingApiClient::new(&ApiConfig {
            base_url: String::new(),
            timeout_secs: None,
        });
        assert!(matches!(result, Err(ApiError::ConfigError(_))));
    }

    #[test]
    fn error_message_extraction_handles_both_shapes() {
        assert_eq!(
            extract_error_message(r#"{"error": {"message": "Code not found"}}"#),
            "Code not found"
        );
        assert_eq!(
            extract_error_message(r#"{"message": "Slot no longer available"}"#),
            "Slot no longer available"
        );
        assert_eq!(extract_error_message("502 Bad Gateway"), "502 Bad Gateway");
        assert_eq!(extract_error_message(r#"{"code": 17}"#), r#"{"code": 17}"#);
    }
}
