use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::http_cache::fetch_api_json;
use crate::http_client::http_client;

const CHESSCOM_API_URL: &str = "https://api.chess.com/pub/player";

/// Failure taxonomy for the upstream chess.com API. `NotFound` stays distinct
/// from other non-success statuses so the presentation layer can map an
/// unknown handle to a not-found-class error instead of a generic one.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("player not found")]
    NotFound,
    #[error("upstream returned http {0}")]
    Upstream(u16),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("http client init failed: {0}")]
    Client(String),
    #[error("no game archives found for this player")]
    NoArchives,
}

impl ApiError {
    pub(crate) fn decode(err: impl std::fmt::Display) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// One seat of a finished game: who sat there and that side's result code
/// (`win`, `checkmated`, `resigned`, `timeout`, `agreed`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct GameSeat {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub result: String,
}

/// One game from a monthly archive, taken verbatim from upstream. `eco` is
/// the opening-classification URL and is absent on some game types.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchivedGame {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub eco: Option<String>,
    #[serde(default)]
    pub end_time: i64,
    #[serde(default)]
    pub time_class: String,
    pub white: GameSeat,
    pub black: GameSeat,
}

#[derive(Debug, Deserialize)]
struct ArchiveIndexResponse {
    #[serde(default)]
    archives: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct MonthlyArchiveResponse {
    #[serde(default)]
    games: Vec<ArchivedGame>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerProfile {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub joined: Option<i64>,
}

/// Rating snapshots per time class. Any section, or the rating inside it,
/// may be missing; upstream has also served ratings as strings, hence the
/// lenient number decoding.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerStats {
    #[serde(default)]
    pub chess_blitz: Option<TimeClassStats>,
    #[serde(default)]
    pub chess_rapid: Option<TimeClassStats>,
    #[serde(default)]
    pub chess_bullet: Option<TimeClassStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeClassStats {
    #[serde(default)]
    pub last: Option<RatingSnapshot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingSnapshot {
    #[serde(default, deserialize_with = "float_or_none")]
    pub rating: Option<f64>,
}

pub fn archives_url(username: &str) -> String {
    format!("{CHESSCOM_API_URL}/{username}/games/archives")
}

pub fn profile_url(username: &str) -> String {
    format!("{CHESSCOM_API_URL}/{username}")
}

pub fn stats_url(username: &str) -> String {
    format!("{CHESSCOM_API_URL}/{username}/stats")
}

/// Ordered list of monthly archive URLs, oldest first as upstream sends them.
pub fn fetch_archive_index(username: &str) -> Result<Vec<String>, ApiError> {
    let client = http_client().map_err(|err| ApiError::Client(err.to_string()))?;
    let body = fetch_api_json(client, &archives_url(username))?;
    parse_archive_index_json(&body)
}

pub fn fetch_archive_games(archive_url: &str) -> Result<Vec<ArchivedGame>, ApiError> {
    let client = http_client().map_err(|err| ApiError::Client(err.to_string()))?;
    let body = fetch_api_json(client, archive_url)?;
    parse_archive_games_json(&body)
}

pub fn fetch_player_profile(username: &str) -> Result<PlayerProfile, ApiError> {
    let client = http_client().map_err(|err| ApiError::Client(err.to_string()))?;
    let body = fetch_api_json(client, &profile_url(username))?;
    parse_player_profile_json(&body)
}

pub fn fetch_player_stats(username: &str) -> Result<PlayerStats, ApiError> {
    let client = http_client().map_err(|err| ApiError::Client(err.to_string()))?;
    let body = fetch_api_json(client, &stats_url(username))?;
    parse_player_stats_json(&body)
}

pub fn parse_archive_index_json(raw: &str) -> Result<Vec<String>, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let parsed: ArchiveIndexResponse = serde_json::from_str(trimmed).map_err(ApiError::decode)?;
    Ok(parsed.archives)
}

pub fn parse_archive_games_json(raw: &str) -> Result<Vec<ArchivedGame>, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let parsed: MonthlyArchiveResponse = serde_json::from_str(trimmed).map_err(ApiError::decode)?;
    Ok(parsed.games)
}

pub fn parse_player_profile_json(raw: &str) -> Result<PlayerProfile, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(ApiError::decode("empty profile response"));
    }
    serde_json::from_str(trimmed).map_err(ApiError::decode)
}

pub fn parse_player_stats_json(raw: &str) -> Result<PlayerStats, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(PlayerStats::default());
    }
    serde_json::from_str(trimmed).map_err(ApiError::decode)
}

fn float_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(n) => Ok(n.as_f64()),
        serde_json::Value::String(s) => Ok(s.parse::<f64>().ok()),
        _ => Ok(None),
    }
}
