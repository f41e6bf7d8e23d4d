use crate::error::{FetchError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// nflverse release asset for one season's play-by-play
pub const DEFAULT_URL_TEMPLATE: &str =
    "https://github.com/nflverse/nflverse-data/releases/download/pbp/play_by_play_{season}.csv.gz";

/// Configuration for the play-by-play fetcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Where to read the event log from
    pub source: PlayByPlaySource,
}

/// Location of a season's event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlayByPlaySource {
    /// Local CSV or CSV.gz file
    File { path: PathBuf },
    /// HTTP(S) URL; `{season}` is replaced with the season
    Url { url: String },
}

impl Default for PlayByPlaySource {
    fn default() -> Self {
        PlayByPlaySource::Url { url: DEFAULT_URL_TEMPLATE.to_string() }
    }
}

impl PlayByPlaySource {
    /// Parse an operator-supplied source: URLs start with `http://` or `https://`,
    /// anything else is a file path.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(FetchError::InvalidSource("empty source".to_string()));
        }

        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(PlayByPlaySource::Url { url: value.to_string() })
        } else {
            Ok(PlayByPlaySource::File { path: PathBuf::from(value) })
        }
    }

    /// Substitute the season into a URL template or file path
    pub fn for_season(&self, season: i32) -> Self {
        let season = season.to_string();
        match self {
            PlayByPlaySource::Url { url } => {
                PlayByPlaySource::Url { url: url.replace("{season}", &season) }
            }
            PlayByPlaySource::File { path } => PlayByPlaySource::File {
                path: PathBuf::from(path.to_string_lossy().replace("{season}", &season)),
            },
        }
    }

    pub fn describe(&self) -> String {
        match self {
            PlayByPlaySource::Url { url } => url.clone(),
            PlayByPlaySource::File { path } => path.display().to_string(),
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self { timeout_secs: 120, source: PlayByPlaySource::default() }
    }
}

impl FetcherConfig {
    /// Override fields from `GT_PBP_*` keys; the binary passes `std::env::var`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = lookup("GT_PBP_SOURCE") {
            self.source = PlayByPlaySource::parse(&source)?;
        }

        if let Some(timeout) = lookup("GT_PBP_TIMEOUT_SECS") {
            self.timeout_secs = timeout.trim().parse().map_err(|_| {
                FetchError::InvalidSource(format!("invalid GT_PBP_TIMEOUT_SECS: {timeout}"))
            })?;
        }

        Ok(())
    }
}
