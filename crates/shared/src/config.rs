//! Application configuration management.
//!
//! Policy constants (time limit, alert thresholds, sweep cadence) are
//! configuration, not literals embedded in the state machine.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Occupancy policy (time limit and alert thresholds).
    #[serde(default)]
    pub occupancy: OccupancyPolicy,
    /// Expiry sweeper configuration.
    #[serde(default)]
    pub sweeper: SweeperConfig,
}

/// Occupancy time-limit and alert-threshold policy.
///
/// Thresholds are expressed in minutes of *remaining* time:
/// `critical` when `0 < remaining <= critical_threshold_minutes`,
/// `warning` when `critical < remaining <= warning_threshold_minutes`,
/// `expired` when `remaining <= 0`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OccupancyPolicy {
    /// Allowed occupancy duration before forced checkout.
    #[serde(default = "default_time_limit")]
    pub time_limit_minutes: i64,
    /// Remaining-minutes threshold for the warning bucket.
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold_minutes: i64,
    /// Remaining-minutes threshold for the critical bucket.
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold_minutes: i64,
}

fn default_time_limit() -> i64 {
    60
}

fn default_warning_threshold() -> i64 {
    15
}

fn default_critical_threshold() -> i64 {
    5
}

impl Default for OccupancyPolicy {
    fn default() -> Self {
        Self {
            time_limit_minutes: default_time_limit(),
            warning_threshold_minutes: default_warning_threshold(),
            critical_threshold_minutes: default_critical_threshold(),
        }
    }
}

/// Expiry sweeper configuration.
///
/// The periodic trigger lives outside the core; this is the cadence it is
/// expected to use.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SweeperConfig {
    /// Suggested interval between sweep invocations.
    #[serde(default = "default_sweep_interval")]
    pub interval_minutes: u64,
}

fn default_sweep_interval() -> u64 {
    5
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_sweep_interval(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CLUBHOUSE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
