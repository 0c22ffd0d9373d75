use crate::api::{self, ApiError, PlayerProfile, PlayerStats};

#[derive(Debug, Clone)]
pub struct PlayerOverview {
    pub profile: PlayerProfile,
    pub stats: PlayerStats,
}

/// Mean of the rating snapshots that actually exist. Distinguishes "no rated
/// games" from a zero rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AverageRating {
    Rated(u32),
    Unrated,
}

pub fn fetch_player_overview(username: &str) -> Result<PlayerOverview, ApiError> {
    let profile = api::fetch_player_profile(username)?;
    let stats = api::fetch_player_stats(username)?;
    Ok(PlayerOverview { profile, stats })
}

/// Average of the blitz/rapid/bullet `last` ratings, counting only the ones
/// present and numeric. Truncates like the site-facing display does.
pub fn average_rating(stats: &PlayerStats) -> AverageRating {
    let snapshots = [&stats.chess_blitz, &stats.chess_rapid, &stats.chess_bullet];
    let ratings: Vec<f64> = snapshots
        .into_iter()
        .filter_map(|tc| tc.as_ref()?.last.as_ref()?.rating)
        .collect();
    if ratings.is_empty() {
        return AverageRating::Unrated;
    }
    let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
    AverageRating::Rated(mean as u32)
}
