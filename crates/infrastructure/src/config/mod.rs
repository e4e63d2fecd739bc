//! Application configuration
//!
//! Loaded from an optional TOML file and `MANPASIK_*` environment variables,
//! environment winning. Nested keys use `__` (e.g.
//! `MANPASIK_FLOWS__REQUEST_TIMEOUT_SECS=5`).

mod flows;

use std::path::Path;
use std::time::Duration;

use domain::SubscriptionTier;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use flows::{DemoConfig, FlowConfig};

use crate::telemetry::TelemetryConfig;

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "MANPASIK";

/// Base name of the optional config file in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "manpasik";

/// Configuration loading or validation failure
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Values were read but are not usable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Orchestration settings
    #[serde(default)]
    pub flows: FlowConfig,

    /// Demo seed identities
    #[serde(default)]
    pub demo: DemoConfig,
}

impl AppConfig {
    /// Load configuration from `manpasik.toml` (if present) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(
            config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
            Self::env_source(),
        )
    }

    /// Load configuration from an explicit file and the environment
    ///
    /// Unlike [`AppConfig::load`], the file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(config::File::from(path).required(true), Self::env_source())
    }

    fn env_source() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn build<F>(file: F, env: config::Environment) -> Result<Self, ConfigError>
    where
        F: config::Source + Send + Sync + 'static,
    {
        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flows.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "flows.request_timeout_secs must be greater than 0".into(),
            ));
        }
        if SubscriptionTier::parse(&self.demo.tier).is_none() {
            return Err(ConfigError::Invalid(format!(
                "demo.tier '{}' is not a known subscription tier",
                self.demo.tier
            )));
        }
        Ok(())
    }

    /// Deadline applied to each orchestration call
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.flows.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::env_source().source(Some(map))
    }

    fn no_file() -> impl config::Source + Send + Sync + 'static {
        config::File::with_name("does-not-exist-manpasik").required(false)
    }

    #[test]
    fn defaults_apply_without_sources() {
        let config = AppConfig::build(no_file(), env(&[])).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.demo.tier, "premium");
    }

    #[test]
    fn environment_overrides_nested_keys() {
        let config = AppConfig::build(
            no_file(),
            env(&[
                ("MANPASIK_FLOWS__REQUEST_TIMEOUT_SECS", "3"),
                ("MANPASIK_TELEMETRY__JSON", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(config.flows.request_timeout_secs, 3);
        assert!(config.telemetry.json);
    }

    #[test]
    fn file_values_are_read_and_env_wins() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[flows]\nrequest_timeout_secs = 30\n\n[demo]\nuser_id = \"kim\"\ntier = \"enterprise\""
        )
        .unwrap();

        let config = AppConfig::build(
            config::File::from(file.path()),
            env(&[("MANPASIK_FLOWS__REQUEST_TIMEOUT_SECS", "7")]),
        )
        .unwrap();

        assert_eq!(config.flows.request_timeout_secs, 7);
        assert_eq!(config.demo.user_id, "kim");
        assert_eq!(config.demo.tier, "enterprise");
        assert_eq!(config.demo.provider_id, "hospital-001");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = AppConfig::build(no_file(), env(&[("MANPASIK_FLOWS__REQUEST_TIMEOUT_SECS", "0")]))
            .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(ref m) if m.contains("request_timeout_secs")));
    }

    #[test]
    fn unknown_demo_tier_is_rejected() {
        let config = AppConfig {
            demo: DemoConfig {
                tier: "platinum".into(),
                ..DemoConfig::default()
            },
            ..AppConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::load_from(Path::new("/nonexistent/manpasik.toml"));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn toml_round_trip_keeps_defaults() {
        let parsed: AppConfig = toml::from_str("[flows]\nrequest_timeout_secs = 4\n").unwrap();
        assert_eq!(parsed.flows.request_timeout_secs, 4);
        assert_eq!(parsed.demo, DemoConfig::default());
    }
}
