//! Play-by-Play Fetcher
//!
//! Loads a season of nflverse play-by-play (plain or gzipped CSV, local or
//! over HTTP) and maps provider rows to engine `PlayEvent`s.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;

pub use config::{FetcherConfig, PlayByPlaySource, DEFAULT_URL_TEMPLATE};
pub use error::{FetchError, Result};
pub use fetcher::{load_from_reader, parse_play_by_play, PlayByPlayFetcher};
pub use models::RawPlay;
