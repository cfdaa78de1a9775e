//! CourseCalc configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CourseCalcError, Result};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseCalcConfig {
    /// Base URL of the Director scheduler service.
    #[serde(default = "default_director_url")]
    pub director_url: String,
    /// Base URL of the Assets Manager configuration store.
    #[serde(default = "default_assets_url")]
    pub assets_url: String,
    /// Authorization token for privileged Director endpoints
    /// (`COURSECALC_AUTHORIZATION` env var takes precedence).
    #[serde(default)]
    pub authorization: String,
    /// Per-call HTTP timeout. A timeout counts as a transport failure.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
    #[serde(default)]
    pub defaults: CalcDefaults,
    #[serde(default)]
    pub optimization: OptimizationConfig,
}

fn default_director_url() -> String {
    "http://localhost:5800".into()
}
fn default_assets_url() -> String {
    "http://localhost:5200".into()
}
fn default_http_timeout() -> u64 {
    30
}

impl Default for CourseCalcConfig {
    fn default() -> Self {
        Self {
            director_url: default_director_url(),
            assets_url: default_assets_url(),
            authorization: String::new(),
            http_timeout_secs: default_http_timeout(),
            defaults: CalcDefaults::default(),
            optimization: OptimizationConfig::default(),
        }
    }
}

impl CourseCalcConfig {
    /// Load config from the default path (~/.coursecalc/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CourseCalcError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| CourseCalcError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| CourseCalcError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".coursecalc")
            .join("config.toml")
    }
}

/// Fallback scheduling defaults used when no window document is available.
/// Process-wide configuration, not user state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalcDefaults {
    /// Calculation horizon (`end - init`) in milliseconds. Roughly 7 months.
    #[serde(default = "default_horizon_ms")]
    pub horizon_ms: i64,
    /// Recurrence interval in milliseconds. One hour.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: i64,
}

fn default_horizon_ms() -> i64 {
    7 * 30 * 24 * 60 * 60 * 1000
}
fn default_interval_ms() -> i64 {
    3_600_000
}

impl Default for CalcDefaults {
    fn default() -> Self {
        Self {
            horizon_ms: default_horizon_ms(),
            interval_ms: default_interval_ms(),
        }
    }
}

/// Scheduling-period optimization pass configuration.
///
/// The filter matches task identifiers by substring, so tasks of other
/// courses sharing the tag are re-timed too. That cross-course effect is
/// intended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationConfig {
    #[serde(default = "default_filename_filter")]
    pub filename_must_include_all: Vec<String>,
    /// Start of the submission window, "HH:MM".
    #[serde(default = "default_starting_time")]
    pub starting_time: String,
    /// End of the submission window, "HH:MM".
    #[serde(default = "default_ending_time")]
    pub ending_time: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
    /// Override path for the optimization script. The embedded copy is used
    /// when unset.
    #[serde(default)]
    pub script_path: Option<String>,
}

fn default_filename_filter() -> Vec<String> {
    vec!["tpa-".into()]
}
fn default_starting_time() -> String {
    "10:00".into()
}
fn default_ending_time() -> String {
    "10:59".into()
}
fn default_batch_size() -> u32 {
    1
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            filename_must_include_all: default_filename_filter(),
            starting_time: default_starting_time(),
            ending_time: default_ending_time(),
            batch_size: default_batch_size(),
            script_path: None,
        }
    }
}
