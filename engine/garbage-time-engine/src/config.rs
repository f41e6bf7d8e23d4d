//! # Configuration Management
//!
//! Analysis parameters for a garbage-time run. Layered as defaults, then an
//! optional TOML file, then `GT_*` environment variables.

use crate::error::ConfigError;
use crate::models::SelectionThresholds;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SEASON: i32 = 2023;
pub const DEFAULT_WIN_PROBABILITY_CUTOFF: f64 = 0.05;
pub const DEFAULT_MIN_FANTASY_POINTS: f64 = 100.0;
pub const DEFAULT_MIN_TARGETS: u32 = 50;
pub const DEFAULT_REPORT_TOP_N: usize = 15;
pub const DEFAULT_CHART_TOP_N: usize = 20;

/// Configuration for one garbage-time analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Season the event log covers (e.g., 2023)
    pub season: i32,

    /// Plays with win probability below this, or above `1 - cutoff`, are garbage time
    pub win_probability_cutoff: f64,

    /// Minimum season PPR points to be ranked (inclusive)
    pub min_fantasy_points: f64,

    /// Minimum season targets to be ranked (inclusive)
    pub min_targets: u32,

    /// Rows in the text report
    pub report_top_n: usize,

    /// Bars in the chart series
    pub chart_top_n: usize,

    /// Garbage-time percentages the summary counts players above
    pub summary_thresholds: Vec<f64>,

    /// Fold player partitions on the rayon pool
    pub parallel: bool,

    /// Points-per-reception scoring weights
    pub scoring: ScoringRules,
}

/// PPR scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Points per reception
    pub reception: f64,

    /// Points per receiving yard
    pub receiving_yard: f64,

    /// Points per rushing yard
    pub rushing_yard: f64,

    /// Points per touchdown
    pub touchdown: f64,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            reception: 1.0,
            receiving_yard: 0.1,
            rushing_yard: 0.1,
            touchdown: 6.0,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            season: DEFAULT_SEASON,
            win_probability_cutoff: DEFAULT_WIN_PROBABILITY_CUTOFF,
            min_fantasy_points: DEFAULT_MIN_FANTASY_POINTS,
            min_targets: DEFAULT_MIN_TARGETS,
            report_top_n: DEFAULT_REPORT_TOP_N,
            chart_top_n: DEFAULT_CHART_TOP_N,
            summary_thresholds: vec![20.0, 30.0],
            parallel: false,
            scoring: ScoringRules::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file. Missing keys keep their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Override fields from `GT_*` keys; the binary passes `std::env::var`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(season) = lookup("GT_SEASON") {
            self.season = parse_value("GT_SEASON", &season)?;
        }

        if let Some(cutoff) = lookup("GT_WP_CUTOFF") {
            self.win_probability_cutoff = parse_value("GT_WP_CUTOFF", &cutoff)?;
        }

        if let Some(min_points) = lookup("GT_MIN_POINTS") {
            self.min_fantasy_points = parse_value("GT_MIN_POINTS", &min_points)?;
        }

        if let Some(min_targets) = lookup("GT_MIN_TARGETS") {
            self.min_targets = parse_value("GT_MIN_TARGETS", &min_targets)?;
        }

        if let Some(top_n) = lookup("GT_TOP_N") {
            self.report_top_n = parse_value("GT_TOP_N", &top_n)?;
        }

        if let Some(parallel) = lookup("GT_PARALLEL") {
            self.parallel = parse_value("GT_PARALLEL", &parallel)?;
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cutoff = self.win_probability_cutoff;
        if !(cutoff > 0.0 && cutoff < 0.5) {
            return Err(ConfigError::Invalid(format!(
                "win_probability_cutoff must be in (0, 0.5), got {cutoff}"
            )));
        }

        if !self.min_fantasy_points.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "min_fantasy_points must be finite, got {}",
                self.min_fantasy_points
            )));
        }

        if self.report_top_n == 0 || self.chart_top_n == 0 {
            return Err(ConfigError::Invalid("top-N lengths must be positive".to_string()));
        }

        if self.summary_thresholds.iter().any(|t| !t.is_finite()) {
            return Err(ConfigError::Invalid("summary thresholds must be finite".to_string()));
        }

        let ScoringRules { reception, receiving_yard, rushing_yard, touchdown } = self.scoring;
        if ![reception, receiving_yard, rushing_yard, touchdown].iter().all(|w| w.is_finite()) {
            return Err(ConfigError::Invalid("scoring weights must be finite".to_string()));
        }

        Ok(())
    }

    /// Volume thresholds for the selector
    pub fn thresholds(&self) -> SelectionThresholds {
        SelectionThresholds {
            min_fantasy_points: self.min_fantasy_points,
            min_targets: self.min_targets,
        }
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key: key.to_string(),
        value: value.to_string(),
    })
}
