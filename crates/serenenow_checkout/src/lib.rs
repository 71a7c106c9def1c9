// Declare modules within this crate
pub mod client; // Hosted checkout session client
pub mod error; // Checkout error types
pub mod service; // CheckoutProvider trait implementation

pub use client::{outcome_from_session, CheckoutSessionData, HostedCheckoutClient};
pub use error::CheckoutError;
