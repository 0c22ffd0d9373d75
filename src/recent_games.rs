use chrono::{DateTime, Local};

use crate::api::{self, ApiError, ArchivedGame};

const RECENT_GAMES_LIMIT: usize = 10;

/// One row of the recent-games table, shaped for display.
#[derive(Debug, Clone)]
pub struct RecentGame {
    pub white_name: String,
    pub black_name: String,
    /// Result code of the requesting player's seat, verbatim from upstream.
    pub result: String,
    pub game_url: String,
    pub time_class: String,
    pub date: String,
}

/// Latest-archive view of a player's games. Unlike the opening scan this
/// backs a single profile render, so every failure propagates: a missing
/// index, an empty index, or a bad latest-archive fetch is a hard error.
pub fn fetch_recent_games(username: &str) -> Result<Vec<RecentGame>, ApiError> {
    let archives = api::fetch_archive_index(username)?;
    let latest = archives.last().ok_or(ApiError::NoArchives)?;
    let games = api::fetch_archive_games(latest)?;
    Ok(build_recent_games(username, games))
}

/// Newest ten games, shaped for the table.
pub fn build_recent_games(username: &str, mut games: Vec<ArchivedGame>) -> Vec<RecentGame> {
    games.sort_by(|a, b| b.end_time.cmp(&a.end_time));
    games.truncate(RECENT_GAMES_LIMIT);
    games
        .into_iter()
        .map(|game| {
            let is_white = game.white.username.eq_ignore_ascii_case(username);
            let own = if is_white { &game.white } else { &game.black };
            RecentGame {
                white_name: game.white.username.to_lowercase(),
                black_name: game.black.username.to_lowercase(),
                result: own.result.clone(),
                time_class: game.time_class.to_uppercase(),
                date: format_end_date(game.end_time),
                game_url: game.url,
            }
        })
        .collect()
}

fn format_end_date(end_time: i64) -> String {
    match DateTime::from_timestamp(end_time, 0) {
        Some(utc) => utc.with_timezone(&Local).format("%x").to_string(),
        None => "-".to_string(),
    }
}
