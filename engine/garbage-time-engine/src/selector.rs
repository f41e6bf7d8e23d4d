use crate::error::{EngineError, Result};
use crate::models::{PlayerAggregate, RankedPlayerList, SelectionThresholds};
use std::cmp::Ordering;

/// Filters players on volume and ranks them by garbage-time share
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerSelector {
    thresholds: SelectionThresholds,
}

impl PlayerSelector {
    pub fn new(thresholds: SelectionThresholds) -> Result<Self> {
        if !thresholds.min_fantasy_points.is_finite() {
            return Err(EngineError::InvalidThresholds(format!(
                "min_fantasy_points must be finite, got {}",
                thresholds.min_fantasy_points
            )));
        }
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> SelectionThresholds {
        self.thresholds
    }

    pub fn qualifies(&self, player: &PlayerAggregate) -> bool {
        player.total.fantasy_points >= self.thresholds.min_fantasy_points
            && player.total.targets >= self.thresholds.min_targets
    }

    /// Keep qualifying players, sorted by `garbage_time_pct` descending.
    /// The sort is stable, so ties keep input order.
    pub fn select(&self, players: &[PlayerAggregate]) -> RankedPlayerList {
        let mut selected: Vec<PlayerAggregate> =
            players.iter().filter(|p| self.qualifies(p)).cloned().collect();

        selected.sort_by(|a, b| {
            b.garbage_time_pct
                .partial_cmp(&a.garbage_time_pct)
                .unwrap_or(Ordering::Equal)
        });

        RankedPlayerList { thresholds: self.thresholds, players: selected }
    }
}
