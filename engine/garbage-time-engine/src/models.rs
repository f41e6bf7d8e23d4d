use serde::{Deserialize, Serialize};
use std::fmt;

/// Play type as reported by the play-by-play provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayType {
    Pass,
    Run,
    Other,
}

impl PlayType {
    /// Map a provider play type string ("pass", "run", ...) to a play type
    pub fn from_provider(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pass" => PlayType::Pass,
            "run" => PlayType::Run,
            _ => PlayType::Other,
        }
    }
}

impl fmt::Display for PlayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayType::Pass => write!(f, "pass"),
            PlayType::Run => write!(f, "run"),
            PlayType::Other => write!(f, "other"),
        }
    }
}

/// One play from the event log. Optional fields mirror provider columns that may be NA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayEvent {
    /// Receiver on pass plays, rusher on run plays
    pub player_id: Option<String>,
    pub player_name: Option<String>,
    /// Possessing team
    pub team: Option<String>,
    pub play_type: PlayType,
    pub complete_pass: Option<bool>,
    pub receiving_yards: Option<f64>,
    pub rushing_yards: Option<f64>,
    pub pass_touchdown: Option<bool>,
    pub rush_touchdown: Option<bool>,
    /// Possessing team's live win probability, in [0, 1]
    pub win_probability: Option<f64>,
}

impl PlayEvent {
    /// Bare event of the given type with every optional field unset
    pub fn new(play_type: PlayType) -> Self {
        Self {
            player_id: None,
            player_name: None,
            team: None,
            play_type,
            complete_pass: None,
            receiving_yards: None,
            rushing_yards: None,
            pass_touchdown: None,
            rush_touchdown: None,
            win_probability: None,
        }
    }

    /// Completed pass thrown to a player
    pub fn reception(player_id: &str, yards: f64, touchdown: bool, win_probability: f64) -> Self {
        Self {
            player_id: Some(player_id.to_string()),
            complete_pass: Some(true),
            receiving_yards: Some(yards),
            pass_touchdown: Some(touchdown),
            win_probability: Some(win_probability),
            ..Self::new(PlayType::Pass)
        }
    }

    /// Incomplete pass thrown to a player
    pub fn incompletion(player_id: &str, win_probability: f64) -> Self {
        Self {
            player_id: Some(player_id.to_string()),
            complete_pass: Some(false),
            receiving_yards: Some(0.0),
            pass_touchdown: Some(false),
            win_probability: Some(win_probability),
            ..Self::new(PlayType::Pass)
        }
    }

    /// Designed run by a player
    pub fn rush(player_id: &str, yards: f64, touchdown: bool, win_probability: f64) -> Self {
        Self {
            player_id: Some(player_id.to_string()),
            rushing_yards: Some(yards),
            rush_touchdown: Some(touchdown),
            win_probability: Some(win_probability),
            ..Self::new(PlayType::Run)
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.player_name = Some(name.to_string());
        self
    }

    pub fn with_team(mut self, team: &str) -> Self {
        self.team = Some(team.to_string());
        self
    }

    /// True for a pass play flagged complete
    pub fn is_reception(&self) -> bool {
        self.play_type == PlayType::Pass && self.complete_pass == Some(true)
    }

    /// Touchdown flag for the play's own type; other play types never count
    pub fn is_touchdown(&self) -> bool {
        match self.play_type {
            PlayType::Pass => self.pass_touchdown == Some(true),
            PlayType::Run => self.rush_touchdown == Some(true),
            PlayType::Other => false,
        }
    }
}

/// Time regime a play falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Regular,
    Garbage,
}

impl Regime {
    pub fn from_garbage_flag(garbage_time: bool) -> Self {
        if garbage_time {
            Regime::Garbage
        } else {
            Regime::Regular
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedEvent {
    pub event: PlayEvent,
    pub garbage_time: bool,
}

impl ClassifiedEvent {
    pub fn regime(&self) -> Regime {
        Regime::from_garbage_flag(self.garbage_time)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEvent {
    pub event: PlayEvent,
    pub garbage_time: bool,
    /// Always finite; undefined scores were coerced to 0 by the scorer
    pub fantasy_points: f64,
}

impl ScoredEvent {
    pub fn regime(&self) -> Regime {
        Regime::from_garbage_flag(self.garbage_time)
    }
}

/// Counting stats for one player within one regime
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RegimeStats {
    pub fantasy_points: f64,
    pub receptions: u32,
    pub yards: f64,
    pub touchdowns: u32,
    pub targets: u32,
}

impl RegimeStats {
    /// Fold one scored event into the running sums
    pub fn record(&mut self, scored: &ScoredEvent) {
        self.fantasy_points += scored.fantasy_points;
        self.targets += 1;
        if scored.event.is_reception() {
            self.receptions += 1;
            self.yards += scored
                .event
                .receiving_yards
                .filter(|y| y.is_finite())
                .unwrap_or(0.0);
        }
        if scored.event.is_touchdown() {
            self.touchdowns += 1;
        }
    }

    /// Elementwise sum of two regimes
    pub fn combined(&self, other: &RegimeStats) -> RegimeStats {
        RegimeStats {
            fantasy_points: self.fantasy_points + other.fantasy_points,
            receptions: self.receptions + other.receptions,
            yards: self.yards + other.yards,
            touchdowns: self.touchdowns + other.touchdowns,
            targets: self.targets + other.targets,
        }
    }
}

/// Per-player season record merging both regimes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAggregate {
    pub player_id: String,
    pub player_name: Option<String>,
    pub team: Option<String>,
    pub regular: RegimeStats,
    pub garbage: RegimeStats,
    pub total: RegimeStats,
    /// Share of total fantasy points scored in garbage time, in [0, 100]
    pub garbage_time_pct: f64,
}

impl PlayerAggregate {
    /// Merge the two regime summaries. Totals and the percentage are derived here only.
    pub fn from_regimes(
        player_id: String,
        player_name: Option<String>,
        team: Option<String>,
        regular: RegimeStats,
        garbage: RegimeStats,
    ) -> Self {
        let total = regular.combined(&garbage);
        let garbage_time_pct = garbage_share_pct(garbage.fantasy_points, total.fantasy_points);

        Self {
            player_id,
            player_name,
            team,
            regular,
            garbage,
            total,
            garbage_time_pct,
        }
    }

    /// Display name, falling back to the provider id
    pub fn display_name(&self) -> &str {
        self.player_name.as_deref().unwrap_or(&self.player_id)
    }
}

/// `100 * garbage / total`, 0 when total is 0, clamped to [0, 100].
///
/// Clamping only matters when negative run plays push one regime below zero.
pub fn garbage_share_pct(garbage_points: f64, total_points: f64) -> f64 {
    if total_points == 0.0 || !total_points.is_finite() || !garbage_points.is_finite() {
        return 0.0;
    }
    (100.0 * garbage_points / total_points).clamp(0.0, 100.0)
}

/// Volume cutoffs a player must meet to be ranked. Both are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionThresholds {
    pub min_fantasy_points: f64,
    pub min_targets: u32,
}

impl Default for SelectionThresholds {
    fn default() -> Self {
        Self {
            min_fantasy_points: 100.0,
            min_targets: 50,
        }
    }
}

/// Qualifying players ordered by garbage-time share, highest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPlayerList {
    pub thresholds: SelectionThresholds,
    pub players: Vec<PlayerAggregate>,
}

impl RankedPlayerList {
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn top(&self, n: usize) -> &[PlayerAggregate] {
        &self.players[..n.min(self.players.len())]
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerAggregate> {
        self.players.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_type_from_provider() {
        assert_eq!(PlayType::from_provider("pass"), PlayType::Pass);
        assert_eq!(PlayType::from_provider(" Run "), PlayType::Run);
        assert_eq!(PlayType::from_provider("punt"), PlayType::Other);
        assert_eq!(PlayType::from_provider(""), PlayType::Other);
    }

    #[test]
    fn test_touchdown_follows_play_type() {
        let mut event = PlayEvent::reception("00-1", 12.0, false, 0.5);
        event.rush_touchdown = Some(true);
        assert!(!event.is_touchdown());

        let rush = PlayEvent::rush("00-2", 3.0, true, 0.5);
        assert!(rush.is_touchdown());
        assert!(!rush.is_reception());
    }

    #[test]
    fn test_garbage_share_pct_zero_guard() {
        assert_eq!(garbage_share_pct(0.0, 0.0), 0.0);
        assert_eq!(garbage_share_pct(5.0, 0.0), 0.0);
        assert_eq!(garbage_share_pct(25.0, 100.0), 25.0);
        assert_eq!(garbage_share_pct(-3.0, 10.0), 0.0);
        assert_eq!(garbage_share_pct(12.0, 10.0), 100.0);
    }

    #[test]
    fn test_player_aggregate_totals() {
        let regular = RegimeStats {
            fantasy_points: 30.0,
            receptions: 5,
            yards: 150.0,
            touchdowns: 1,
            targets: 8,
        };
        let garbage = RegimeStats {
            fantasy_points: 10.0,
            receptions: 2,
            yards: 40.0,
            touchdowns: 0,
            targets: 3,
        };

        let agg = PlayerAggregate::from_regimes("00-1".into(), None, None, regular, garbage);
        assert_eq!(agg.total.fantasy_points, 40.0);
        assert_eq!(agg.total.receptions, 7);
        assert_eq!(agg.total.yards, 190.0);
        assert_eq!(agg.total.touchdowns, 1);
        assert_eq!(agg.total.targets, 11);
        assert_eq!(agg.garbage_time_pct, 25.0);
        assert_eq!(agg.display_name(), "00-1");
    }
}
