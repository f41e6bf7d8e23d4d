use crate::aggregation::PlayerAggregator;
use crate::classifier::GarbageTimeClassifier;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::{PlayEvent, PlayerAggregate, RankedPlayerList};
use crate::normalization::{self, DataQualityReport};
use crate::scoring::PprScorer;
use crate::selector::PlayerSelector;
use crate::summary::RankingSummary;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// Everything one run produces. Built in a single pass and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub season: i32,
    /// Every player seen, in first-appearance order
    pub aggregates: Vec<PlayerAggregate>,
    pub ranking: RankedPlayerList,
    pub summary: RankingSummary,
    pub data_quality: DataQualityReport,
}

impl AnalysisOutcome {
    /// True when no player met the volume thresholds
    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }
}

/// Runs classify, score, aggregate, select and summarize over one season
#[derive(Debug, Clone)]
pub struct GarbageTimeEngine {
    config: AnalysisConfig,
    classifier: GarbageTimeClassifier,
    scorer: PprScorer,
    aggregator: PlayerAggregator,
    selector: PlayerSelector,
}

impl GarbageTimeEngine {
    /// Create a new engine. Fails on invalid configuration.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            classifier: GarbageTimeClassifier::new(config.win_probability_cutoff),
            scorer: PprScorer::new(config.scoring),
            aggregator: PlayerAggregator::new(config.parallel),
            selector: PlayerSelector::new(config.thresholds())?,
            config,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full pipeline over an already-loaded event log
    pub fn run(&self, events: &[PlayEvent]) -> AnalysisOutcome {
        let started = Instant::now();
        info!("Analyzing {} plays for season {}", events.len(), self.config.season);

        let (events, mut data_quality) = normalization::normalize(events.to_vec());
        let classified = self.classifier.classify_all(events);
        let garbage_plays = classified.iter().filter(|c| c.garbage_time).count();
        let scored = self.scorer.score_all(classified, &mut data_quality);
        let aggregates = self.aggregator.aggregate(&scored, &mut data_quality);
        let ranking = self.selector.select(&aggregates);
        let summary = RankingSummary::from_ranking(&ranking, &self.config.summary_thresholds);

        data_quality.log_summary();
        info!(
            "Classified {} of {} plays as garbage time; {} of {} players qualified ({:?})",
            garbage_plays,
            scored.len(),
            ranking.len(),
            aggregates.len(),
            started.elapsed()
        );

        AnalysisOutcome {
            season: self.config.season,
            aggregates,
            ranking,
            summary,
            data_quality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayType, SelectionThresholds};
    use proptest::prelude::*;

    fn low_volume_config() -> AnalysisConfig {
        AnalysisConfig { min_fantasy_points: 0.0, min_targets: 1, ..Default::default() }
    }

    #[test]
    fn test_regular_time_catch() {
        let engine = GarbageTimeEngine::new(low_volume_config()).unwrap();
        let outcome = engine.run(&[PlayEvent::reception("00-1", 10.0, false, 0.5)]);

        let player = &outcome.aggregates[0];
        assert_eq!(player.regular.fantasy_points, 2.0);
        assert_eq!(player.garbage.targets, 0);
        assert_eq!(player.garbage_time_pct, 0.0);
    }

    #[test]
    fn test_garbage_time_only_target() {
        let engine = GarbageTimeEngine::new(low_volume_config()).unwrap();
        let outcome = engine.run(&[PlayEvent::reception("00-1", 10.0, false, 0.02)]);

        let player = &outcome.ranking.players[0];
        assert_eq!(player.garbage.fantasy_points, 2.0);
        assert_eq!(player.total.fantasy_points, 2.0);
        assert_eq!(player.garbage_time_pct, 100.0);
    }

    #[test]
    fn test_incomplete_pass_counts_target_in_its_regime() {
        let engine = GarbageTimeEngine::new(low_volume_config()).unwrap();
        let outcome = engine.run(&[
            PlayEvent::reception("00-1", 10.0, false, 0.5),
            PlayEvent::incompletion("00-1", 0.99),
        ]);

        let player = &outcome.aggregates[0];
        assert_eq!(player.garbage.targets, 1);
        assert_eq!(player.garbage.fantasy_points, 0.0);
        assert_eq!(player.total.targets, 2);
    }

    #[test]
    fn test_empty_input_is_valid() {
        let engine = GarbageTimeEngine::new(AnalysisConfig::default()).unwrap();
        let outcome = engine.run(&[]);

        assert!(outcome.is_empty());
        assert!(outcome.aggregates.is_empty());
        assert_eq!(outcome.summary.player_count, 0);
        assert_eq!(outcome.data_quality.total_events, 0);
    }

    #[test]
    fn test_malformed_plays_degrade_to_zero() {
        let engine = GarbageTimeEngine::new(low_volume_config()).unwrap();

        let mut missing_wp = PlayEvent::reception("00-1", 10.0, false, 0.01);
        missing_wp.win_probability = None;
        let mut missing_yards = PlayEvent::reception("00-1", 10.0, false, 0.5);
        missing_yards.receiving_yards = None;
        let mut kneel = PlayEvent::new(PlayType::Other);
        kneel.win_probability = Some(0.99);

        let outcome = engine.run(&[missing_wp, missing_yards, kneel]);
        let player = &outcome.aggregates[0];

        assert_eq!(outcome.aggregates.len(), 1);
        assert_eq!(player.regular.targets, 2);
        assert_eq!(player.regular.fantasy_points, 2.0);
        assert_eq!(outcome.data_quality.missing_win_probability, 1);
        assert_eq!(outcome.data_quality.coerced_fantasy_points, 1);
        assert_eq!(outcome.data_quality.missing_player_id, 1);
        assert_eq!(outcome.data_quality.missing_yardage, 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = AnalysisConfig { win_probability_cutoff: 0.6, ..Default::default() };
        assert!(GarbageTimeEngine::new(config).is_err());
    }

    #[test]
    fn test_default_thresholds_apply() {
        let engine = GarbageTimeEngine::new(AnalysisConfig::default()).unwrap();
        assert_eq!(engine.config().thresholds(), SelectionThresholds::default());

        // 50 catches of 10 yards: 100.0 points on exactly 50 targets
        let events: Vec<PlayEvent> = (0..50)
            .map(|i| PlayEvent::reception("00-1", 10.0, false, if i < 10 { 0.99 } else { 0.5 }))
            .collect();

        let outcome = engine.run(&events);
        assert_eq!(outcome.ranking.len(), 1);
        assert_eq!(outcome.ranking.players[0].total.targets, 50);
        assert!((outcome.ranking.players[0].garbage_time_pct - 20.0).abs() < 1e-9);
    }

    fn arb_play() -> impl Strategy<Value = PlayEvent> {
        (0usize..8, 0u8..3, -5.0f64..40.0, any::<bool>(), 0.0f64..=1.0).prop_map(
            |(player, kind, yards, td, wp)| {
                let id = format!("00-{player}");
                match kind {
                    0 => PlayEvent::reception(&id, yards, td, wp),
                    1 => PlayEvent::incompletion(&id, wp),
                    _ => PlayEvent::rush(&id, yards, td, wp),
                }
            },
        )
    }

    proptest! {
        #[test]
        fn prop_run_is_idempotent(plays in prop::collection::vec(arb_play(), 0..300)) {
            let engine = GarbageTimeEngine::new(AnalysisConfig {
                min_fantasy_points: 5.0,
                min_targets: 3,
                ..Default::default()
            }).unwrap();

            prop_assert_eq!(engine.run(&plays), engine.run(&plays));
        }
    }
}
