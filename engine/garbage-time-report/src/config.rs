//! Report configuration management

use anyhow::{Context, Result};
use garbage_time_engine::AnalysisConfig;
use pbp_fetcher::{FetcherConfig, PlayByPlaySource};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cli::Cli;

/// Main report configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Analysis parameters
    pub analysis: AnalysisConfig,

    /// Event-log provider
    pub fetcher: FetcherConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "compact".to_string() }
    }
}

/// Defaults, then the config file, then environment, then CLI flags
pub fn load_config(cli: &Cli) -> Result<ReportConfig> {
    load_layered(cli, |key| std::env::var(key).ok())
}

fn load_layered<F>(cli: &Cli, lookup: F) -> Result<ReportConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config {
        Some(path) => load_from_file(path)?,
        None => ReportConfig::default(),
    };

    apply_env_overrides(&mut config, &lookup)?;
    apply_cli_overrides(&mut config, cli)?;
    validate_config(&config)?;

    Ok(config)
}

/// Load configuration from a TOML file
pub fn load_from_file(path: &Path) -> Result<ReportConfig> {
    tracing::debug!("Loading configuration from file: {:?}", path);
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Apply `GT_*` overrides from environment-style key lookups
fn apply_env_overrides<F>(config: &mut ReportConfig, lookup: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    config.analysis.apply_overrides(lookup)?;

    if let Some(level) = lookup("GT_LOG_LEVEL") {
        config.logging.level = level;
    }

    if let Some(format) = lookup("GT_LOG_FORMAT") {
        config.logging.format = format;
    }

    config.fetcher.apply_overrides(lookup)?;

    Ok(())
}

fn apply_cli_overrides(config: &mut ReportConfig, cli: &Cli) -> Result<()> {
    if let Some(season) = cli.season {
        config.analysis.season = season;
    }
    if let Some(source) = &cli.source {
        config.fetcher.source = PlayByPlaySource::parse(source)?;
    }
    if let Some(min_points) = cli.min_points {
        config.analysis.min_fantasy_points = min_points;
    }
    if let Some(min_targets) = cli.min_targets {
        config.analysis.min_targets = min_targets;
    }
    if let Some(cutoff) = cli.wp_cutoff {
        config.analysis.win_probability_cutoff = cutoff;
    }
    if let Some(top) = cli.top {
        config.analysis.report_top_n = top;
    }
    if cli.parallel {
        config.analysis.parallel = true;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
    Ok(())
}

/// Validate configuration
fn validate_config(config: &ReportConfig) -> Result<()> {
    config.analysis.validate()?;

    match config.logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow::anyhow!("Invalid log level: {}", config.logging.level)),
    }

    match config.logging.format.as_str() {
        "json" | "pretty" | "compact" => {}
        _ => return Err(anyhow::anyhow!("Invalid log format: {}", config.logging.format)),
    }

    if config.fetcher.timeout_secs == 0 {
        return Err(anyhow::anyhow!("Fetcher timeout must be positive"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_report_config_default() {
        let config = ReportConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.analysis, AnalysisConfig::default());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("garbage-time.toml");
        std::fs::write(
            &path,
            r#"
            [analysis]
            season = 2022
            min_targets = 60

            [fetcher.source]
            kind = "file"
            path = "data/pbp_{season}.csv"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.analysis.season, 2022);
        assert_eq!(config.analysis.min_targets, 60);
        assert_eq!(config.analysis.min_fantasy_points, 100.0);
        assert_eq!(
            config.fetcher.source,
            PlayByPlaySource::File { path: "data/pbp_{season}.csv".into() }
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "compact");
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let cli = Cli::parse_from([
            "garbage-time",
            "--season",
            "2021",
            "--min-targets",
            "25",
            "--source",
            "pbp.csv",
            "--parallel",
            "report",
        ]);

        let mut config = ReportConfig::default();
        apply_cli_overrides(&mut config, &cli).unwrap();

        assert_eq!(config.analysis.season, 2021);
        assert_eq!(config.analysis.min_targets, 25);
        assert!(config.analysis.parallel);
        assert_eq!(config.fetcher.source, PlayByPlaySource::File { path: "pbp.csv".into() });
    }

    #[test]
    fn test_validate_rejects_bad_log_format() {
        let mut config = ReportConfig::default();
        config.logging.format = "xml".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_layers_apply_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("garbage-time.toml");
        std::fs::write(
            &path,
            r#"
            [analysis]
            season = 2020
            min_targets = 60
            min_fantasy_points = 80.0
            report_top_n = 10

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        let cli = Cli::parse_from([
            "garbage-time",
            "--config",
            path.to_str().unwrap(),
            "--min-targets",
            "25",
            "report",
        ]);

        let config = load_layered(&cli, |key| match key {
            "GT_MIN_TARGETS" => Some("40".to_string()),
            "GT_MIN_POINTS" => Some("90".to_string()),
            "GT_LOG_FORMAT" => Some("json".to_string()),
            _ => None,
        })
        .unwrap();

        // default
        assert_eq!(config.analysis.win_probability_cutoff, 0.05);
        // file
        assert_eq!(config.analysis.season, 2020);
        assert_eq!(config.analysis.report_top_n, 10);
        assert_eq!(config.logging.level, "debug");
        // env over file
        assert_eq!(config.analysis.min_fantasy_points, 90.0);
        assert_eq!(config.logging.format, "json");
        // cli over env
        assert_eq!(config.analysis.min_targets, 25);
    }

    #[test]
    fn test_invalid_env_value_fails_load() {
        let cli = Cli::parse_from(["garbage-time", "report"]);
        let result = load_layered(&cli, |key| (key == "GT_SEASON").then(|| "latest".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = ReportConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: ReportConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
