// Declare modules within this crate
pub mod client; // HTTP client for the booking backend
pub mod error; // API error types
pub mod service; // BookingApi trait implementation

pub use client::BookingApiClient;
pub use error::ApiError;
