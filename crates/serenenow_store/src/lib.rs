// Declare modules within this crate
pub mod error; // Store error types
pub mod file; // JSON-file-backed session store
pub mod memory; // In-memory stores
pub mod repository; // Repository traits

pub use error::StoreError;
pub use file::FileSessionStore;
pub use memory::{MemoryFlowStore, MemorySessionStore};
pub use repository::{FlowRepository, SessionRepository};
