pub mod models;

pub use models::{ApiConfig, AppConfig, CheckoutConfig, StorageConfig};

use config::{Config, ConfigError, Environment, File};
use std::env;
use tracing::debug;

/// Loads the application configuration.
///
/// Sources are layered, later ones overriding earlier ones:
/// 1. `config/default.*` (optional)
/// 2. `config/{SERENE_RUN_MODE}.*` (optional, e.g. `config/production`)
/// 3. Environment variables prefixed `SERENE_`, with `__` as the section
///    separator (e.g. `SERENE_API__BASE_URL`).
///
/// A `.env` file is loaded first so local development can keep overrides
/// out of the shell profile.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenv::dotenv().ok();

    let run_mode = env::var("SERENE_RUN_MODE").unwrap_or_else(|_| "default".into());
    debug!("Loading configuration for run mode: {}", run_mode);

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
        .add_source(Environment::with_prefix("SERENE").separator("__"))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn load_from_json(raw: &str) -> Result<AppConfig, ConfigError> {
        Config::builder()
            .add_source(File::from_str(raw, FileFormat::Json))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn minimal_config_only_needs_the_api_section() {
        let cfg = load_from_json(r#"{"api": {"base_url": "https://api.serenenow.in"}}"#)
            .expect("minimal config should deserialize");
        assert_eq!(cfg.api.base_url, "https://api.serenenow.in");
        assert_eq!(cfg.api.timeout_secs, None);
        assert!(cfg.checkout.is_none());
        assert!(cfg.storage.is_none());
    }

    #[test]
    fn full_config_round_trips() {
        let cfg = load_from_json(
            r#"{
                "api": {"base_url": "https://api.serenenow.in", "timeout_secs": 10},
                "checkout": {
                    "base_url": "https://pay.example.com",
                    "success_url": "https://serenenow.in/booking/success",
                    "cancel_url": "https://serenenow.in/booking/cancel"
                },
                "storage": {"session_path": "/tmp/serenenow-session.json"}
            }"#,
        )
        .expect("full config should deserialize");
        assert_eq!(cfg.api.timeout_secs, Some(10));
        let checkout = cfg.checkout.expect("checkout section");
        assert_eq!(checkout.base_url, "https://pay.example.com");
        let storage = cfg.storage.expect("storage section");
        assert_eq!(
            storage.session_path.as_deref(),
            Some("/tmp/serenenow-session.json")
        );
    }

    #[test]
    fn missing_api_section_is_an_error() {
        assert!(load_from_json(r#"{"storage": {}}"#).is_err());
    }
}
