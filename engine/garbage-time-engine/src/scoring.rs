use crate::config::ScoringRules;
use crate::models::{ClassifiedEvent, PlayEvent, PlayType, ScoredEvent};
use crate::normalization::DataQualityReport;
use tracing::debug;

/// PPR fantasy scorer for single plays
#[derive(Debug, Clone, Default)]
pub struct PprScorer {
    rules: ScoringRules,
}

impl PprScorer {
    /// Create a new scorer
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Point value of one play, or `None` when a needed field is missing or
    /// the arithmetic is not finite.
    ///
    /// Run plays are not floored: a loss of yardage scores negative.
    pub fn points(&self, event: &PlayEvent) -> Option<f64> {
        let points = match event.play_type {
            PlayType::Pass => match event.complete_pass? {
                true => {
                    let yards = event.receiving_yards?;
                    let touchdown = event.pass_touchdown?;
                    self.rules.reception
                        + self.rules.receiving_yard * yards
                        + self.touchdown_points(touchdown)
                }
                false => 0.0,
            },
            PlayType::Run => {
                let yards = event.rushing_yards?;
                let touchdown = event.rush_touchdown?;
                self.rules.rushing_yard * yards + self.touchdown_points(touchdown)
            }
            PlayType::Other => 0.0,
        };

        points.is_finite().then_some(points)
    }

    /// Score a classified play. Undefined values become 0 and are counted in `quality`.
    pub fn score(&self, classified: ClassifiedEvent, quality: &mut DataQualityReport) -> ScoredEvent {
        let fantasy_points = match self.points(&classified.event) {
            Some(points) => points,
            None => {
                quality.coerced_fantasy_points += 1;
                debug!(
                    "Coerced undefined fantasy points to 0 for {} play (player: {:?})",
                    classified.event.play_type, classified.event.player_id
                );
                0.0
            }
        };

        ScoredEvent {
            event: classified.event,
            garbage_time: classified.garbage_time,
            fantasy_points,
        }
    }

    pub fn score_all(
        &self,
        events: Vec<ClassifiedEvent>,
        quality: &mut DataQualityReport,
    ) -> Vec<ScoredEvent> {
        events.into_iter().map(|event| self.score(event, quality)).collect()
    }

    fn touchdown_points(&self, touchdown: bool) -> f64 {
        if touchdown {
            self.rules.touchdown
        } else {
            0.0
        }
    }
}
