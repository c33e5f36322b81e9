//! Supervisor configuration loading.
//!
//! TOML-based configuration in the same shape as the rest of the DV
//! tooling: load, parse, then semantic validation.
//!
//! # TOML Example
//!
//! ```toml
//! [supervisor]
//! cycle_time_ms = 10
//! ready_delay_s = 5.0
//! inputs_path = "config/inputs.toml"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// TOML parsing failed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("configuration validation failed: {0}")]
    ValidationError(String),
}

/// Default guard-check cycle period [ms].
pub const DEFAULT_CYCLE_TIME_MS: u64 = 10;

/// Default Ready→Driving dwell time [s] (DV rulebook: go signal is only
/// honoured 5 s after entering Ready).
pub const DEFAULT_READY_DELAY_S: f64 = 5.0;

/// Supervisor runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SupervisorConfig {
    /// Guard-check cycle period [ms]. Must be > 0.
    pub cycle_time_ms: u64,
    /// Minimum time in Ready before a go signal is honoured [s].
    pub ready_delay_s: f64,
    /// Optional TOML file re-read every cycle by the file-backed input
    /// source. Absent means the embedding host supplies inputs itself.
    pub inputs_path: Option<PathBuf>,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            cycle_time_ms: DEFAULT_CYCLE_TIME_MS,
            ready_delay_s: DEFAULT_READY_DELAY_S,
            inputs_path: None,
        }
    }
}

impl SupervisorConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `cycle_time_ms` is zero
    /// - `ready_delay_s` is negative or not finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle_time_ms == 0 {
            return Err(ConfigError::ValidationError(
                "cycle_time_ms must be > 0".to_string(),
            ));
        }
        if !self.ready_delay_s.is_finite() || self.ready_delay_s < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "ready_delay_s must be a non-negative number, got {}",
                self.ready_delay_s
            )));
        }
        Ok(())
    }
}

/// On-disk layout: the supervisor table plus room for sibling tool
/// sections later.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    supervisor: SupervisorConfig,
}

/// Load and validate a `SupervisorConfig` from a TOML file.
///
/// # Errors
///
/// - `ConfigError::FileNotFound` if the file does not exist
/// - `ConfigError::ParseError` if TOML syntax or field types are invalid
/// - `ConfigError::ValidationError` if semantic validation fails
pub fn load_config(path: &Path) -> Result<SupervisorConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;
    let file: ConfigFile =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    file.supervisor.validate()?;
    Ok(file.supervisor)
}

// ─── Tests ──────────────────────────────────────────────────────────
