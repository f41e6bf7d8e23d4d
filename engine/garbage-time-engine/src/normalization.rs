//! # Event Normalization
//!
//! Cleans raw provider plays once at ingestion so later stages only see
//! well-defined values. Every correction is counted in a [`DataQualityReport`].

use crate::models::{PlayEvent, PlayType};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Counts of defaulted or suspicious inputs seen during one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQualityReport {
    /// Plays received from the provider
    pub total_events: usize,
    /// Plays with no receiver/rusher; ignored by aggregation
    pub missing_player_id: usize,
    /// Plays with no win probability; classified as regular time
    pub missing_win_probability: usize,
    /// Win probabilities outside [0, 1] or not finite; cleared
    pub invalid_win_probability: usize,
    /// Non-finite yardage values; cleared
    pub invalid_yardage: usize,
    /// Completed passes or runs with no usable yardage; they score 0
    pub missing_yardage: usize,
    /// Plays whose fantasy points were undefined and coerced to 0
    pub coerced_fantasy_points: usize,
    /// Players finishing the season with negative total points
    pub negative_season_totals: usize,
}

impl DataQualityReport {
    pub fn has_issues(&self) -> bool {
        self.missing_win_probability > 0
            || self.invalid_win_probability > 0
            || self.invalid_yardage > 0
            || self.missing_yardage > 0
            || self.coerced_fantasy_points > 0
            || self.negative_season_totals > 0
    }

    /// Emit one warning line per non-zero counter. Plays without a player id
    /// are routine (kickoffs, punts, penalties) and only logged at debug.
    pub fn log_summary(&self) {
        if self.missing_player_id > 0 {
            debug!(
                "Data quality: {} plays without a player id (of {} plays)",
                self.missing_player_id, self.total_events
            );
        }

        let counters = [
            ("plays without win probability", self.missing_win_probability),
            ("plays with invalid win probability", self.invalid_win_probability),
            ("plays with invalid yardage", self.invalid_yardage),
            ("scored plays without yardage", self.missing_yardage),
            ("plays with undefined fantasy points", self.coerced_fantasy_points),
            ("players with negative season totals", self.negative_season_totals),
        ];

        for (label, count) in counters {
            if count > 0 {
                warn!("Data quality: {} {} (of {} plays)", count, label, self.total_events);
            }
        }
    }
}

/// Normalize a batch of plays in place of the provider's raw values
pub fn normalize(events: Vec<PlayEvent>) -> (Vec<PlayEvent>, DataQualityReport) {
    let mut report = DataQualityReport { total_events: events.len(), ..Default::default() };

    let events = events
        .into_iter()
        .map(|event| normalize_event(event, &mut report))
        .collect();

    (events, report)
}

fn normalize_event(mut event: PlayEvent, report: &mut DataQualityReport) -> PlayEvent {
    event.player_id = clean_text(event.player_id);
    event.player_name = clean_text(event.player_name);
    event.team = clean_text(event.team);

    if event.player_id.is_none() {
        report.missing_player_id += 1;
    }

    match event.win_probability {
        None => report.missing_win_probability += 1,
        Some(wp) if !wp.is_finite() || !(0.0..=1.0).contains(&wp) => {
            report.invalid_win_probability += 1;
            event.win_probability = None;
        }
        Some(_) => {}
    }

    for yards in [&mut event.receiving_yards, &mut event.rushing_yards] {
        if matches!(yards, Some(y) if !y.is_finite()) {
            report.invalid_yardage += 1;
            *yards = None;
        }
    }

    let yardage = match event.play_type {
        PlayType::Pass if event.complete_pass == Some(true) => Some(event.receiving_yards),
        PlayType::Run => Some(event.rushing_yards),
        _ => None,
    };
    if event.player_id.is_some() && yardage == Some(None) {
        report.missing_yardage += 1;
    }

    event
}

fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "NA")
}
