use serde::{Deserialize, Serialize};

// --- Booking backend API ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the remote booking backend, without a trailing slash.
    pub base_url: String,
    /// Per-request deadline. Falls back to the shared client default.
    pub timeout_secs: Option<u64>,
}

// --- Hosted checkout provider ---
// Holds non-secret checkout config. API secrets are loaded directly from
// env vars by the deployment, never from config files.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CheckoutConfig {
    /// Base URL of the payment provider's session API.
    pub base_url: String,
    pub success_url: String,
    pub cancel_url: String,
}

// --- Local persistence ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StorageConfig {
    /// Where the durable client session file lives. None keeps sessions
    /// in memory only.
    pub session_path: Option<String>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // The backend API is mandatory; everything else is optional
    pub api: ApiConfig,

    #[serde(default)]
    pub checkout: Option<CheckoutConfig>,
    #[serde(default)]
    pub storage: Option<StorageConfig>,
}
