//! Service settings loaded with the `config` crate
//!
//! Defaults can be overridden through `FITTRACK_AUTH_*` environment variables,
//! with `__` separating nested keys (e.g. `FITTRACK_AUTH_RATE_LIMIT__MAX_ATTEMPTS`).

use ::config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::rate_limiter::RateLimiterConfig;

/// Authentication service settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    #[serde(default)]
    pub rate_limit: RateLimiterConfig,
}

impl AuthConfig {
    /// Load settings from defaults and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000_i64)?
            .set_default("cors_origin", "http://localhost:5173")?
            .add_source(
                Environment::with_prefix("FITTRACK_AUTH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Socket address to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
