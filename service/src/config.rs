//! Service configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use harvest_types::StakingParams;

use crate::ServiceError;

/// Configuration for a harvest service instance.
///
/// Can be loaded from a TOML file via [`ServiceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Staking parameters are fixed
/// at construction; a config change requires a restart.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Annual reward rate in basis points.
    #[serde(default = "default_rate_bps")]
    pub rate_bps: u32,

    /// Seconds in a reward year.
    #[serde(default = "default_seconds_per_year")]
    pub seconds_per_year: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_rate_bps() -> u32 {
    StakingParams::default().rate_bps
}

fn default_seconds_per_year() -> u64 {
    StakingParams::default().seconds_per_year
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            rate_bps: default_rate_bps(),
            seconds_per_year: default_seconds_per_year(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file. Missing keys take their
    /// defaults; unknown keys are rejected upstream by serde.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&raw).map_err(|e| ServiceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the ledger cannot operate under.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.seconds_per_year == 0 {
            return Err(ServiceError::Config(
                "seconds_per_year must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The staking parameters this configuration describes.
    pub fn staking_params(&self) -> StakingParams {
        StakingParams {
            rate_bps: self.rate_bps,
            seconds_per_year: self.seconds_per_year,
        }
    }
}
