use garbage_time_engine::{PlayEvent, PlayType};
use serde::{Deserialize, Deserializer};

/// nflverse play-by-play row, restricted to the columns the analysis reads.
///
/// nflverse writes missing values as `NA`; every column here tolerates that,
/// an empty cell, or the column being absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPlay {
    #[serde(default, deserialize_with = "de_text")]
    pub play_type: Option<String>,

    #[serde(default, deserialize_with = "de_text")]
    pub receiver_player_id: Option<String>,

    #[serde(default, deserialize_with = "de_text")]
    pub receiver_player_name: Option<String>,

    #[serde(default, deserialize_with = "de_text")]
    pub rusher_player_id: Option<String>,

    #[serde(default, deserialize_with = "de_text")]
    pub rusher_player_name: Option<String>,

    #[serde(default, deserialize_with = "de_text")]
    pub posteam: Option<String>,

    #[serde(default, deserialize_with = "de_flag")]
    pub complete_pass: Option<bool>,

    #[serde(default, deserialize_with = "de_number")]
    pub receiving_yards: Option<f64>,

    #[serde(default, deserialize_with = "de_number")]
    pub rushing_yards: Option<f64>,

    #[serde(default, deserialize_with = "de_flag")]
    pub pass_touchdown: Option<bool>,

    #[serde(default, deserialize_with = "de_flag")]
    pub rush_touchdown: Option<bool>,

    #[serde(default, deserialize_with = "de_number")]
    pub wp: Option<f64>,
}

impl RawPlay {
    /// Convert to an engine event. Pass plays credit the receiver, run plays the rusher.
    pub fn into_play_event(self) -> PlayEvent {
        let play_type = self
            .play_type
            .as_deref()
            .map(PlayType::from_provider)
            .unwrap_or(PlayType::Other);

        let (player_id, player_name) = match play_type {
            PlayType::Run => (self.rusher_player_id, self.rusher_player_name),
            PlayType::Pass | PlayType::Other => {
                (self.receiver_player_id, self.receiver_player_name)
            }
        };

        PlayEvent {
            player_id,
            player_name,
            team: self.posteam,
            play_type,
            complete_pass: self.complete_pass,
            receiving_yards: self.receiving_yards,
            rushing_yards: self.rushing_yards,
            pass_touchdown: self.pass_touchdown,
            rush_touchdown: self.rush_touchdown,
            win_probability: self.wp,
        }
    }
}

fn is_missing(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("na") || value.eq_ignore_ascii_case("nan")
}

fn de_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| v.trim().to_string()).filter(|v| !is_missing(v)))
}

/// Unparseable numbers become `None`, the same as `NA`. Normalization only counts
/// the ones that matter: win probability and yardage on scored plays.
fn de_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        let v = v.trim();
        if is_missing(v) {
            None
        } else {
            v.parse::<f64>().ok()
        }
    }))
}

/// Accepts `0`/`1`, `0.0`/`1.0` and `TRUE`/`FALSE`
fn de_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        let v = v.trim();
        if v.eq_ignore_ascii_case("true") {
            return Some(true);
        }
        if v.eq_ignore_ascii_case("false") {
            return Some(false);
        }
        v.parse::<f64>().ok().filter(|n| n.is_finite()).map(|n| n != 0.0)
    }))
}
