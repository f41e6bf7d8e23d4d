//! Garbage-Time Engine
//!
//! Measures how much of each player's PPR fantasy production came in
//! low-leverage game states, using the live win probability on every play.
//! A season runs as one batch: normalize, classify, score, aggregate per
//! player and regime, then rank qualifying players by garbage-time share.

pub mod aggregation;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod normalization;
pub mod scoring;
pub mod selector;
pub mod summary;

pub use aggregation::PlayerAggregator;
pub use classifier::GarbageTimeClassifier;
pub use config::{AnalysisConfig, ScoringRules};
pub use engine::{AnalysisOutcome, GarbageTimeEngine};
pub use error::{ConfigError, EngineError, Result};
pub use models::*;
pub use normalization::DataQualityReport;
pub use scoring::PprScorer;
pub use selector::PlayerSelector;
pub use summary::{RankingSummary, ThresholdCount};
