//! [`BookingApi`] implementation backed by the HTTP client.
//!
//! The orchestrator only knows the trait; this adapter maps the client's
//! concrete errors into the shared [`CoreError`] taxonomy.

use serenenow_common::models::{
    AppointmentResult, ClientProfile, CodeValidationOutcome, CreateBookingRequest, DaySlots,
    RegisterClientRequest, RegisteredClient, SlotQuery,
};
use serenenow_common::{BookingApi, BoxFuture, CoreError};

use crate::client::BookingApiClient;

impl BookingApi for BookingApiClient {
    fn validate_code(&self, code: &str) -> BoxFuture<'_, CodeValidationOutcome, CoreError> {
        let code = code.to_string();
        Box::pin(async move { self.validate_code(&code).await.map_err(CoreError::from) })
    }

    fn fetch_slots(&self, query: SlotQuery) -> BoxFuture<'_, Vec<DaySlots>, CoreError> {
        Box::pin(async move { self.fetch_slots(&query).await.map_err(CoreError::from) })
    }

    fn register_client(
        &self,
        request: RegisterClientRequest,
    ) -> BoxFuture<'_, RegisteredClient, CoreError> {
        Box::pin(async move {
            self.register_client(&request)
                .await
                .map_err(CoreError::from)
        })
    }

    fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> BoxFuture<'_, AppointmentResult, CoreError> {
        Box::pin(async move {
            self.create_booking(&request)
                .await
                .map_err(CoreError::from)
        })
    }

    fn validate_token(&self, token: &str) -> BoxFuture<'_, ClientProfile, CoreError> {
        let token = token.to_string();
        Box::pin(async move { self.validate_token(&token).await.map_err(CoreError::from) })
    }

    fn set_bearer_token(&self, token: Option<String>) {
        BookingApiClient::set_bearer_token(self, token)
    }
}
