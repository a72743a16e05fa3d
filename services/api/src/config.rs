//! Service settings loaded with the `config` crate
//!
//! Defaults can be overridden through `FITTRACK_API_*` environment variables,
//! with `__` separating nested keys. The metric constants live under
//! `metrics`, e.g. `FITTRACK_API_METRICS__ACTIVITY_FACTORS__SEDENTARY=1.25`.

use ::config::{Config, Environment};
use fitness::MetricsConfig;
use serde::Deserialize;

/// API service settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl ApiConfig {
    /// Load settings from defaults and the environment, then validate them
    pub fn load() -> anyhow::Result<Self> {
        let settings: ApiConfig = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3001_i64)?
            .set_default("cors_origin", "http://localhost:5173")?
            .add_source(
                Environment::with_prefix("FITTRACK_API")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.metrics.validate()?;
        Ok(settings)
    }

    /// Socket address to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults() {
        let config = ApiConfig::load().unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:3001");
        assert_eq!(config.metrics, MetricsConfig::default());
    }

    #[test]
    #[serial]
    fn test_metric_overrides() {
        unsafe {
            std::env::set_var("FITTRACK_API_METRICS__ACTIVITY_FACTORS__SEDENTARY", "1.25");
            std::env::set_var("FITTRACK_API_METRICS__CALORIE_ADJUSTMENTS__WEIGHT_LOSS", "-400");
        }

        let config = ApiConfig::load().unwrap();
        assert_eq!(config.metrics.activity_factors.sedentary, 1.25);
        assert_eq!(config.metrics.calorie_adjustments.weight_loss, -400.0);
        assert_eq!(config.metrics.activity_factors.very_active, 1.725);

        unsafe {
            std::env::set_var("FITTRACK_API_METRICS__ACTIVITY_FACTORS__SEDENTARY", "0");
        }
        assert!(ApiConfig::load().is_err());

        unsafe {
            std::env::remove_var("FITTRACK_API_METRICS__ACTIVITY_FACTORS__SEDENTARY");
            std::env::remove_var("FITTRACK_API_METRICS__CALORIE_ADJUSTMENTS__WEIGHT_LOSS");
        }
    }
}
