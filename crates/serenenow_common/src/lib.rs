// Declare modules within this crate
pub mod error; // Error taxonomy shared by every component
pub mod http; // Shared HTTP client
pub mod logging; // Logging utilities
pub mod models; // Domain data structures
pub mod services; // Service abstractions
pub mod validation; // Pure input validators

// Re-export error types for easier access
pub use error::CoreError;

// Re-export HTTP utilities for easier access
pub use http::{create_client, HTTP_CLIENT};

// Re-export the service seams used by the orchestrator
pub use services::{BookingApi, BoxFuture, CheckoutOutcome, CheckoutProvider};
