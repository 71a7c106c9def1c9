// Declare modules within this crate
pub mod cache; // Read-through slot cache
pub mod error; // Flow error types
pub mod flow; // The booking orchestrator
pub mod state; // Observable flow states

pub use cache::{SlotCache, SlotCacheKey, ALL_DATES};
pub use error::FlowError;
pub use flow::BookingFlow;
pub use state::{BookingState, FailureReason};
