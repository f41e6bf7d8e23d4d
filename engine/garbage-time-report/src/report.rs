//! Text, JSON and CSV renderings of an analysis outcome

use anyhow::Result;
use chrono::Utc;
use clap::ValueEnum;
use garbage_time_engine::{
    AnalysisOutcome, DataQualityReport, PlayerAggregate, RankingSummary, SelectionThresholds,
};
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

/// Flat row for CSV export
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    rank: usize,
    player_id: &'a str,
    player_name: &'a str,
    team: &'a str,
    total_points: f64,
    regular_points: f64,
    garbage_points: f64,
    garbage_time_pct: f64,
    total_targets: u32,
    garbage_targets: u32,
    total_receptions: u32,
    total_yards: f64,
    total_touchdowns: u32,
}

impl<'a> ExportRow<'a> {
    fn new(rank: usize, player: &'a PlayerAggregate) -> Self {
        Self {
            rank,
            player_id: &player.player_id,
            player_name: player.display_name(),
            team: player.team.as_deref().unwrap_or(""),
            total_points: round2(player.total.fantasy_points),
            regular_points: round2(player.regular.fantasy_points),
            garbage_points: round2(player.garbage.fantasy_points),
            garbage_time_pct: round2(player.garbage_time_pct),
            total_targets: player.total.targets,
            garbage_targets: player.garbage.targets,
            total_receptions: player.total.receptions,
            total_yards: player.total.yards,
            total_touchdowns: player.total.touchdowns,
        }
    }
}

/// JSON export document
#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    season: i32,
    generated_at: String,
    thresholds: SelectionThresholds,
    summary: &'a RankingSummary,
    players: &'a [PlayerAggregate],
}

/// Chart series row: one bar per player
#[derive(Debug, Serialize)]
struct ChartRow<'a> {
    rank: usize,
    player: &'a str,
    garbage_time_pct: f64,
    regular_points: f64,
    garbage_points: f64,
}

/// Render the console report: top-N table, summary block and data-quality counts
pub fn render_text_report(outcome: &AnalysisOutcome, top_n: usize) -> Result<String> {
    let mut out = String::new();
    write_ranking(&mut out, outcome, top_n)?;
    write_summary(&mut out, &outcome.summary)?;
    write_data_quality(&mut out, &outcome.data_quality)?;
    Ok(out)
}

fn write_ranking(out: &mut String, outcome: &AnalysisOutcome, top_n: usize) -> fmt::Result {
    let thresholds = outcome.ranking.thresholds;

    writeln!(out, "🏈 Garbage-Time Fantasy Share, {} season", outcome.season)?;
    writeln!(
        out,
        "Qualifying: ≥ {:.0} PPR points and ≥ {} targets",
        thresholds.min_fantasy_points, thresholds.min_targets
    )?;
    writeln!(out, "{}", "=".repeat(86))?;

    if outcome.is_empty() {
        return writeln!(out, "No qualifying players");
    }

    writeln!(
        out,
        "{:>4}  {:<24} {:<5} {:>9} {:>9} {:>8} {:>8} {:>9}",
        "Rank", "Player", "Team", "Total", "Garbage", "GT %", "Targets", "GT Tgts"
    )?;
    writeln!(out, "{}", "-".repeat(86))?;

    for (i, player) in outcome.ranking.top(top_n).iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {:<24} {:<5} {:>9.1} {:>9.1} {:>7.1}% {:>8} {:>9}",
            i + 1,
            truncate(player.display_name(), 24),
            player.team.as_deref().unwrap_or("-"),
            player.total.fantasy_points,
            player.garbage.fantasy_points,
            player.garbage_time_pct,
            player.total.targets,
            player.garbage.targets,
        )?;
    }
    Ok(())
}

fn write_summary(out: &mut String, summary: &RankingSummary) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "📊 Summary")?;
    writeln!(out, "{}", "=".repeat(86))?;
    writeln!(out, "Qualifying players: {}", summary.player_count)?;
    writeln!(out, "Mean garbage-time share: {}", format_pct(summary.mean_pct))?;
    writeln!(out, "Median garbage-time share: {}", format_pct(summary.median_pct))?;
    for count in &summary.above_thresholds {
        writeln!(out, "Players above {:.0}%: {}", count.threshold_pct, count.players)?;
    }
    Ok(())
}

fn write_data_quality(out: &mut String, quality: &DataQualityReport) -> fmt::Result {
    if !quality.has_issues() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "⚠️  Data quality ({} plays)", quality.total_events)?;
    writeln!(out, "Missing win probability: {}", quality.missing_win_probability)?;
    writeln!(out, "Invalid win probability: {}", quality.invalid_win_probability)?;
    writeln!(out, "Invalid yardage: {}", quality.invalid_yardage)?;
    writeln!(out, "Scored plays without yardage: {}", quality.missing_yardage)?;
    writeln!(out, "Undefined fantasy points: {}", quality.coerced_fantasy_points)?;
    writeln!(out, "Negative season totals: {}", quality.negative_season_totals)
}

/// Write the full ranked list as JSON or CSV
pub fn write_export(outcome: &AnalysisOutcome, format: ExportFormat, writer: &mut dyn Write) -> Result<()> {
    match format {
        ExportFormat::Json => {
            let document = ExportDocument {
                season: outcome.season,
                generated_at: Utc::now().to_rfc3339(),
                thresholds: outcome.ranking.thresholds,
                summary: &outcome.summary,
                players: &outcome.ranking.players,
            };
            serde_json::to_writer_pretty(&mut *writer, &document)?;
            writeln!(writer)?;
        }
        ExportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for (i, player) in outcome.ranking.iter().enumerate() {
                csv_writer.serialize(ExportRow::new(i + 1, player))?;
            }
            csv_writer.flush()?;
        }
    }
    Ok(())
}

/// Write the top-N players as a CSV series for an external plotter
pub fn write_chart_series(outcome: &AnalysisOutcome, top_n: usize, writer: &mut dyn Write) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (i, player) in outcome.ranking.top(top_n).iter().enumerate() {
        csv_writer.serialize(ChartRow {
            rank: i + 1,
            player: player.display_name(),
            garbage_time_pct: round2(player.garbage_time_pct),
            regular_points: round2(player.regular.fantasy_points),
            garbage_points: round2(player.garbage.fantasy_points),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(pct) => format!("{pct:.1}%"),
        None => "n/a".to_string(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
