use crate::config::{FetcherConfig, PlayByPlaySource};
use crate::error::{FetchError, Result};
use crate::models::RawPlay;
use flate2::read::GzDecoder;
use garbage_time_engine::PlayEvent;
use reqwest::Client;
use std::io::Read;
use std::time::Duration;
use tracing::{debug, info};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Loads one season's play-by-play log from a file or URL
pub struct PlayByPlayFetcher {
    config: FetcherConfig,
    client: Client,
}

impl PlayByPlayFetcher {
    /// Create a new fetcher instance
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Fetch and parse the season's plays. Any failure here is fatal to the run.
    pub async fn fetch_season(&self, season: i32) -> Result<Vec<PlayEvent>> {
        let source = self.config.source.for_season(season);
        info!("Loading {} play-by-play from {}", season, source.describe());

        let bytes = match &source {
            PlayByPlaySource::File { path } => {
                tokio::fs::read(path).await.map_err(|source| FetchError::Io {
                    path: path.display().to_string(),
                    source,
                })?
            }
            PlayByPlaySource::Url { url } => self.download(url).await?,
        };

        let events = parse_play_by_play(&bytes)?;
        info!("Loaded {} plays for season {}", events.len(), season);
        Ok(events)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        debug!("Downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

/// Parse a CSV payload, gunzipping first when it starts with the gzip magic bytes
pub fn parse_play_by_play(bytes: &[u8]) -> Result<Vec<PlayEvent>> {
    if bytes.starts_with(&GZIP_MAGIC) {
        debug!("Detected gzip payload ({} bytes)", bytes.len());
        load_from_reader(GzDecoder::new(bytes))
    } else {
        load_from_reader(bytes)
    }
}

/// Parse plain CSV play-by-play rows from any reader
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<PlayEvent>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let mut events = Vec::new();
    for row in csv_reader.deserialize::<RawPlay>() {
        events.push(row?.into_play_event());
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use garbage_time_engine::PlayType;
    use std::io::Write;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
play_id,play_type,posteam,receiver_player_id,receiver_player_name,rusher_player_id,rusher_player_name,complete_pass,receiving_yards,rushing_yards,pass_touchdown,rush_touchdown,wp
1,pass,KC,00-0033040,T.Kelce,NA,NA,1,10,NA,0,0,0.5
2,run,KC,NA,NA,00-0036000,I.Pacheco,0,NA,-3,0,0,0.97
3,pass,KC,00-0033040,T.Kelce,NA,NA,0,NA,NA,0,0,0.02
4,punt,BUF,NA,NA,NA,NA,0,NA,NA,0,0,NA
";

    fn gzip(data: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_parse_plain_csv() {
        let events = parse_play_by_play(SAMPLE.as_bytes()).unwrap();
        assert_eq!(events.len(), 4);

        assert_eq!(events[0].player_id.as_deref(), Some("00-0033040"));
        assert_eq!(events[0].complete_pass, Some(true));
        assert_eq!(events[0].receiving_yards, Some(10.0));

        assert_eq!(events[1].play_type, PlayType::Run);
        assert_eq!(events[1].player_name.as_deref(), Some("I.Pacheco"));
        assert_eq!(events[1].rushing_yards, Some(-3.0));

        assert_eq!(events[3].play_type, PlayType::Other);
        assert_eq!(events[3].player_id, None);
        assert_eq!(events[3].win_probability, None);
    }

    #[test]
    fn test_parse_gzip_csv() {
        let plain = parse_play_by_play(SAMPLE.as_bytes()).unwrap();
        let gzipped = parse_play_by_play(&gzip(SAMPLE)).unwrap();
        assert_eq!(plain, gzipped);
    }

    #[test]
    fn test_malformed_row_is_provider_failure() {
        let data = "play_type,wp\npass,0.5,extra\n";
        let result = parse_play_by_play(data.as_bytes());
        assert!(matches!(result, Err(FetchError::Csv(_))));
    }

    #[test]
    fn test_header_only_is_empty() {
        let events = parse_play_by_play(b"play_type,wp\n").unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_season_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("play_by_play_2023.csv.gz");
        std::fs::write(&path, gzip(SAMPLE)).unwrap();

        let template = temp_dir.path().join("play_by_play_{season}.csv.gz");
        let config = FetcherConfig {
            source: PlayByPlaySource::File { path: template },
            ..Default::default()
        };

        let fetcher = PlayByPlayFetcher::new(config).unwrap();
        let events = fetcher.fetch_season(2023).await.unwrap();
        assert_eq!(events.len(), 4);
    }

    #[tokio::test]
    async fn test_missing_file_is_provider_failure() {
        let config = FetcherConfig {
            source: PlayByPlaySource::File { path: "/nonexistent/pbp.csv".into() },
            ..Default::default()
        };

        let fetcher = PlayByPlayFetcher::new(config).unwrap();
        let result = fetcher.fetch_season(2023).await;
        assert!(matches!(result, Err(FetchError::Io { .. })));
    }
}
