//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/solvetrack/config.toml`
//!
//! Paths follow the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/solvetrack/` (~/.config/solvetrack/)
//! - State/Logs: `$XDG_STATE_HOME/solvetrack/` (~/.local/state/solvetrack/)

use crate::analytics::distribution::DEFAULT_TREND_WEEKS;
use crate::analytics::period::MonthPeriod;
use crate::analytics::ranking::DEFAULT_TOP_DAYS;
use crate::analytics::snapshot::DEFAULT_TRAILING_WINDOW;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Monthly goal
    #[serde(default)]
    pub goal: GoalConfig,

    /// Window sizes for derived views
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Monthly goal configuration
///
/// ```toml
/// [goal]
/// target_xp = 100
///
/// [goal.months]
/// "2024-06" = 150
/// ```
#[derive(Debug, Deserialize, Default, Clone)]
pub struct GoalConfig {
    /// Monthly XP target used when a month has no entry of its own.
    /// Absent or 0 means no goal.
    pub target_xp: Option<u32>,

    /// Per-month targets keyed by `YYYY-MM`
    #[serde(default)]
    pub months: BTreeMap<String, u32>,
}

impl GoalConfig {
    /// Target for `period`: its own entry, else `target_xp`.
    pub fn target_for(&self, period: MonthPeriod) -> Option<u32> {
        self.months
            .iter()
            .find(|(key, _)| key.parse::<MonthPeriod>().ok() == Some(period))
            .map(|(_, target)| *target)
            .or(self.target_xp)
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        for key in self.months.keys() {
            if key.parse::<MonthPeriod>().is_err() {
                return Err(Error::Config(format!(
                    "goal.months key {:?} is not a YYYY-MM month",
                    key
                )));
            }
        }
        Ok(())
    }
}

/// Analytics window configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AnalyticsConfig {
    /// Daily entries used by windowed charts
    #[serde(default = "default_trailing_window")]
    pub trailing_window: usize,

    /// Number of ranked days
    #[serde(default = "default_top_days")]
    pub top_days: usize,

    /// Weekly buckets kept in the time trend
    #[serde(default = "default_trend_weeks")]
    pub trend_weeks: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trailing_window: default_trailing_window(),
            top_days: default_top_days(),
            trend_weeks: default_trend_weeks(),
        }
    }
}

impl AnalyticsConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.trailing_window == 0 {
            return Err(Error::Config(
                "analytics.trailing_window must be at least 1".to_string(),
            ));
        }
        if self.top_days == 0 {
            return Err(Error::Config(
                "analytics.top_days must be at least 1".to_string(),
            ));
        }
        if self.trend_weeks == 0 {
            return Err(Error::Config(
                "analytics.trend_weeks must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_trailing_window() -> usize {
    DEFAULT_TRAILING_WINDOW
}

fn default_top_days() -> usize {
    DEFAULT_TOP_DAYS
}

fn default_trend_weeks() -> usize {
    DEFAULT_TREND_WEEKS
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Check every section
    pub fn validate(&self) -> Result<()> {
        self.goal.validate()?;
        self.analytics.validate()
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/solvetrack/config.toml` (~/.config/solvetrack/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("solvetrack").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/solvetrack/` (~/.local/state/solvetrack/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("solvetrack")
    }

    /// Returns the base log file path
    ///
    /// `$XDG_STATE_HOME/solvetrack/solvetrack.log` (~/.local/state/solvetrack/solvetrack.log).
    /// Daily rotation appends `.YYYY-MM-DD` to this name.
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("solvetrack.log")
    }
}
