//! # Command Line Interface
//!
//! CLI for running the garbage-time analysis and rendering its results.

use crate::config::ReportConfig;
use crate::report::{self, ExportFormat};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use garbage_time_engine::{AnalysisOutcome, GarbageTimeEngine};
use pbp_fetcher::PlayByPlayFetcher;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Garbage-time share of PPR fantasy production
#[derive(Parser, Debug)]
#[command(name = "garbage-time")]
#[command(about = "Rank players by the share of fantasy points scored in garbage time")]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Season to analyze
    #[arg(long, global = true)]
    pub season: Option<i32>,

    /// Play-by-play source: file path or http(s) URL, `{season}` is substituted
    #[arg(long, global = true)]
    pub source: Option<String>,

    /// Minimum season PPR points to be ranked
    #[arg(long, global = true)]
    pub min_points: Option<f64>,

    /// Minimum season targets to be ranked
    #[arg(long, global = true)]
    pub min_targets: Option<u32>,

    /// Win-probability cutoff for garbage time
    #[arg(long, global = true)]
    pub wp_cutoff: Option<f64>,

    /// Rows in the text report
    #[arg(long, global = true)]
    pub top: Option<usize>,

    /// Aggregate players on the rayon pool
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, pretty, compact)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the top-N ranking with summary statistics
    Report,
    /// Write the full ranked list to a file
    Export {
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Write the top chart-N series as CSV for plotting
    Chart {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// CLI handler
pub struct CliHandler {
    config: ReportConfig,
}

impl CliHandler {
    /// Create new CLI handler
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Handle CLI commands
    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Report => {
                let outcome = self.analyze().await?;
                print!("{}", report::render_text_report(&outcome, self.config.analysis.report_top_n)?);
            }
            Commands::Export { format, output } => {
                let outcome = self.analyze().await?;
                Self::write_file(&output, |w| report::write_export(&outcome, format, w))?;
                println!("✅ Exported {} players to {}", outcome.ranking.len(), output.display());
            }
            Commands::Chart { output } => {
                let outcome = self.analyze().await?;
                let top_n = self.config.analysis.chart_top_n;
                Self::write_file(&output, |w| report::write_chart_series(&outcome, top_n, w))?;
                println!("✅ Wrote chart series to {}", output.display());
            }
            Commands::Config => {
                let text = toml::to_string_pretty(&self.config)
                    .context("Failed to serialize configuration")?;
                print!("{text}");
            }
        }
        Ok(())
    }

    /// Load the season's plays and run the pipeline. Provider failures abort here.
    async fn analyze(&self) -> Result<AnalysisOutcome> {
        let season = self.config.analysis.season;
        let engine = GarbageTimeEngine::new(self.config.analysis.clone())?;
        let fetcher = PlayByPlayFetcher::new(self.config.fetcher.clone())?;

        let events = fetcher.fetch_season(season).await.with_context(|| {
            format!(
                "Failed to load play-by-play for season {} from {}",
                season,
                self.config.fetcher.source.for_season(season).describe()
            )
        })?;

        let outcome = engine.run(&events);
        info!("Analysis finished: {} ranked players", outcome.ranking.len());
        Ok(outcome)
    }

    fn write_file<F>(path: &Path, write: F) -> Result<()>
    where
        F: FnOnce(&mut dyn Write) -> Result<()>,
    {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write(&mut writer)?;
        writer.flush().with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
