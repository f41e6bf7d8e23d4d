//! # Player Aggregation
//!
//! Groups scored plays by player and regime, sums the counting stats, then
//! merges both regimes into one [`PlayerAggregate`] per player.

use crate::models::{PlayerAggregate, Regime, RegimeStats, ScoredEvent};
use crate::normalization::DataQualityReport;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Folds scored plays into per-player season records
#[derive(Debug, Clone, Default)]
pub struct PlayerAggregator {
    parallel: bool,
}

/// Running sums for one player's partition
#[derive(Debug, Clone)]
struct PlayerAccumulator {
    player_id: String,
    player_name: Option<String>,
    team: Option<String>,
    regular: RegimeStats,
    garbage: RegimeStats,
}

impl PlayerAccumulator {
    fn new(player_id: &str) -> Self {
        Self {
            player_id: player_id.to_string(),
            player_name: None,
            team: None,
            regular: RegimeStats::default(),
            garbage: RegimeStats::default(),
        }
    }

    fn record(&mut self, scored: &ScoredEvent) {
        if self.player_name.is_none() {
            self.player_name = scored.event.player_name.clone();
        }
        if self.team.is_none() {
            self.team = scored.event.team.clone();
        }

        match scored.regime() {
            Regime::Regular => self.regular.record(scored),
            Regime::Garbage => self.garbage.record(scored),
        }
    }

    fn finish(self) -> PlayerAggregate {
        PlayerAggregate::from_regimes(
            self.player_id,
            self.player_name,
            self.team,
            self.regular,
            self.garbage,
        )
    }
}

impl PlayerAggregator {
    /// Create new aggregator
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    /// Aggregate all plays. Players come out in order of first appearance,
    /// and plays without a player id are skipped.
    pub fn aggregate(
        &self,
        events: &[ScoredEvent],
        quality: &mut DataQualityReport,
    ) -> Vec<PlayerAggregate> {
        let aggregates = if self.parallel {
            Self::aggregate_parallel(events)
        } else {
            Self::aggregate_sequential(events)
        };

        for aggregate in aggregates.iter().filter(|a| a.total.fantasy_points < 0.0) {
            quality.negative_season_totals += 1;
            warn!(
                "Player {} finished with negative total points: {:.2}",
                aggregate.display_name(),
                aggregate.total.fantasy_points
            );
        }

        debug!("Aggregated {} plays into {} players", events.len(), aggregates.len());
        aggregates
    }

    fn aggregate_sequential(events: &[ScoredEvent]) -> Vec<PlayerAggregate> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut players: Vec<PlayerAccumulator> = Vec::new();

        for scored in events {
            let Some(player_id) = scored.event.player_id.as_deref() else {
                continue;
            };

            let slot = *index.entry(player_id).or_insert_with(|| {
                players.push(PlayerAccumulator::new(player_id));
                players.len() - 1
            });
            players[slot].record(scored);
        }

        players.into_iter().map(PlayerAccumulator::finish).collect()
    }

    /// Partitions are disjoint, so each player folds independently on the pool.
    fn aggregate_parallel(events: &[ScoredEvent]) -> Vec<PlayerAggregate> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut partitions: Vec<(&str, Vec<&ScoredEvent>)> = Vec::new();

        for scored in events {
            let Some(player_id) = scored.event.player_id.as_deref() else {
                continue;
            };

            let slot = *index.entry(player_id).or_insert_with(|| {
                partitions.push((player_id, Vec::new()));
                partitions.len() - 1
            });
            partitions[slot].1.push(scored);
        }

        partitions
            .into_par_iter()
            .map(|(player_id, plays)| {
                let mut acc = PlayerAccumulator::new(player_id);
                for scored in plays {
                    acc.record(scored);
                }
                acc.finish()
            })
            .collect()
    }
}
