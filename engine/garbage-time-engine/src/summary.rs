use crate::models::RankedPlayerList;
use serde::{Deserialize, Serialize};

/// Number of ranked players whose garbage-time share exceeds a threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdCount {
    pub threshold_pct: f64,
    pub players: usize,
}

/// Read-only reductions over a ranked list for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingSummary {
    pub player_count: usize,
    /// `None` when no player qualified
    pub mean_pct: Option<f64>,
    pub median_pct: Option<f64>,
    pub above_thresholds: Vec<ThresholdCount>,
}

impl RankingSummary {
    pub fn from_ranking(ranking: &RankedPlayerList, thresholds: &[f64]) -> Self {
        let pcts: Vec<f64> = ranking.iter().map(|p| p.garbage_time_pct).collect();

        let above_thresholds = thresholds
            .iter()
            .map(|&threshold_pct| ThresholdCount {
                threshold_pct,
                players: pcts.iter().filter(|&&pct| pct > threshold_pct).count(),
            })
            .collect();

        Self {
            player_count: pcts.len(),
            mean_pct: mean(&pcts),
            median_pct: median(&pcts),
            above_thresholds,
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}
