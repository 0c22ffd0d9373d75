use std::fs;
use std::path::PathBuf;

use chess_scout::api::{
    parse_archive_games_json, parse_archive_index_json, parse_player_profile_json,
    parse_player_stats_json,
};
use chess_scout::profile::{AverageRating, average_rating};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_archive_index_fixture() {
    let raw = read_fixture("archives.json");
    let archives = parse_archive_index_json(&raw).expect("fixture should parse");
    assert_eq!(archives.len(), 3);
    assert_eq!(
        archives[0],
        "https://api.chess.com/pub/player/alice/games/2023/11"
    );
    // Oldest first, as upstream sends them.
    assert!(archives.last().unwrap().ends_with("2024/01"));
}

#[test]
fn parses_monthly_games_fixture() {
    let raw = read_fixture("monthly_games.json");
    let games = parse_archive_games_json(&raw).expect("fixture should parse");
    assert_eq!(games.len(), 3);

    assert_eq!(games[0].white.username, "Alice");
    assert_eq!(games[0].white.result, "win");
    assert_eq!(
        games[0].eco.as_deref(),
        Some("https://www.chess.com/openings/B20-Sicilian-Defense")
    );
    assert_eq!(games[0].time_class, "rapid");
    assert_eq!(games[0].end_time, 1704067200);

    // Third game carries no eco classification at all.
    assert!(games[2].eco.is_none());
}

#[test]
fn parses_player_stats_with_ragged_ratings() {
    let raw = read_fixture("player_stats.json");
    let stats = parse_player_stats_json(&raw).expect("fixture should parse");

    let rapid = stats.chess_rapid.as_ref().and_then(|tc| tc.last.as_ref());
    assert_eq!(rapid.and_then(|s| s.rating), Some(1423.0));

    // Blitz rating arrives as a string; the lenient decoder keeps it.
    let blitz = stats.chess_blitz.as_ref().and_then(|tc| tc.last.as_ref());
    assert_eq!(blitz.and_then(|s| s.rating), Some(1315.0));

    // Bullet has a snapshot but no rating inside it.
    let bullet = stats.chess_bullet.as_ref().and_then(|tc| tc.last.as_ref());
    assert_eq!(bullet.and_then(|s| s.rating), None);

    // (1423 + 1315) / 2, truncated.
    assert_eq!(average_rating(&stats), AverageRating::Rated(1369));
}

#[test]
fn parses_player_profile_fixture() {
    let raw = read_fixture("player_profile.json");
    let profile = parse_player_profile_json(&raw).expect("fixture should parse");
    assert_eq!(profile.username, "alice");
    assert_eq!(profile.name.as_deref(), Some("Alice Example"));
    assert_eq!(profile.title.as_deref(), Some("WFM"));
    assert_eq!(profile.url, "https://www.chess.com/member/alice");
}

#[test]
fn null_bodies_decode_to_empty() {
    assert!(
        parse_archive_index_json("null")
            .expect("null should parse")
            .is_empty()
    );
    assert!(
        parse_archive_games_json("null")
            .expect("null should parse")
            .is_empty()
    );
    let stats = parse_player_stats_json("null").expect("null should parse");
    assert_eq!(average_rating(&stats), AverageRating::Unrated);
}

#[test]
fn missing_archives_key_is_empty_index() {
    let archives = parse_archive_index_json("{}").expect("empty object should parse");
    assert!(archives.is_empty());
}
