use chess_scout::api::{ArchivedGame, GameSeat};
use chess_scout::openings::{
    ArchiveFetch, Color, EXAMINED_GAMES_CEILING, MIN_GAMES_THRESHOLD, accumulate_openings,
    summarize,
};

fn game(white: &str, white_result: &str, black: &str, black_result: &str, eco: Option<&str>) -> ArchivedGame {
    ArchivedGame {
        url: "https://www.chess.com/game/live/1".to_string(),
        eco: eco.map(|code| format!("https://www.chess.com/openings/{code}")),
        end_time: 1704067200,
        time_class: "blitz".to_string(),
        white: GameSeat {
            username: white.to_string(),
            result: white_result.to_string(),
        },
        black: GameSeat {
            username: black.to_string(),
            result: black_result.to_string(),
        },
    }
}

fn alice_white(result: &str, opponent_result: &str, eco: &str) -> ArchivedGame {
    game("alice", result, "rival", opponent_result, Some(eco))
}

#[test]
fn alice_scenario_reports_only_the_qualifying_opening() {
    // 6 games of B20 as white: 3 wins, 2 losses, 1 draw. 4 games of C50
    // stay below the sample threshold. Games as black and games without an
    // opening code never count.
    let mut games = vec![
        alice_white("win", "checkmated", "B20"),
        alice_white("win", "resigned", "B20"),
        alice_white("win", "timeout", "B20"),
        alice_white("checkmated", "win", "B20"),
        alice_white("resigned", "win", "B20"),
        alice_white("agreed", "agreed", "B20"),
        alice_white("win", "checkmated", "C50"),
        alice_white("win", "checkmated", "C50"),
        alice_white("checkmated", "win", "C50"),
        alice_white("agreed", "agreed", "C50"),
    ];
    for _ in 0..8 {
        games.push(game("rival", "win", "alice", "checkmated", Some("B20")));
    }
    games.push(game("alice", "win", "rival", "checkmated", None));

    let stats = accumulate_openings("alice", Color::White, [ArchiveFetch::Games(games)]);
    let summaries = summarize(stats);

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].eco, "B20");
    assert_eq!(summaries[0].total, 6);
    assert_eq!(summaries[0].win_rate, 50.0);
}

#[test]
fn stat_totals_always_balance() {
    let games = vec![
        alice_white("win", "checkmated", "A40"),
        alice_white("timeout", "win", "A40"),
        alice_white("stalemate", "stalemate", "A40"),
        alice_white("abandoned", "abandoned", "A40"),
        alice_white("win", "resigned", "E60"),
        alice_white("insufficient", "insufficient", "E60"),
    ];
    let stats = accumulate_openings("alice", Color::White, [ArchiveFetch::Games(games)]);
    for stat in stats.values() {
        assert_eq!(stat.total, stat.wins + stat.losses + stat.draws);
    }
    // Neither-side-wins results all land in the draw bucket.
    assert_eq!(stats["A40"].draws, 2);
    assert_eq!(stats["E60"].draws, 1);
}

#[test]
fn threshold_boundary_is_inclusive_at_five() {
    let mut games = Vec::new();
    for _ in 0..MIN_GAMES_THRESHOLD {
        games.push(alice_white("win", "resigned", "B01"));
    }
    for _ in 0..MIN_GAMES_THRESHOLD - 1 {
        games.push(alice_white("win", "resigned", "D02"));
    }
    let summaries = summarize(accumulate_openings(
        "alice",
        Color::White,
        [ArchiveFetch::Games(games)],
    ));
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].eco, "B01");
    assert_eq!(summaries[0].total, 5);
    assert_eq!(summaries[0].win_rate, 100.0);
}

#[test]
fn zero_wins_reports_zero_rate() {
    let games = (0..5)
        .map(|_| alice_white("checkmated", "win", "C20"))
        .collect();
    let summaries = summarize(accumulate_openings(
        "alice",
        Color::White,
        [ArchiveFetch::Games(games)],
    ));
    assert_eq!(summaries[0].win_rate, 0.0);
}

#[test]
fn black_seat_is_matched_case_insensitively() {
    let games = (0..6)
        .map(|_| game("rival", "checkmated", "ALICE", "win", Some("B07")))
        .collect();
    let summaries = summarize(accumulate_openings(
        "alice",
        Color::Black,
        [ArchiveFetch::Games(games)],
    ));
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].eco, "B07");
    assert_eq!(summaries[0].win_rate, 100.0);
}

#[test]
fn skipped_archive_leaves_other_months_intact() {
    let month = |n: usize| -> Vec<ArchivedGame> {
        (0..n).map(|_| alice_white("win", "resigned", "B20")).collect()
    };
    let fetches = [
        ArchiveFetch::Games(month(3)),
        ArchiveFetch::Skipped("http 500 for 2023/12".to_string()),
        ArchiveFetch::Games(month(4)),
    ];
    let summaries = summarize(accumulate_openings("alice", Color::White, fetches));
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total, 7);
}

#[test]
fn ceiling_stops_before_the_next_archive_but_finishes_the_current_one() {
    let bulk = |eco: &str, n: usize| -> Vec<ArchivedGame> {
        (0..n).map(|_| alice_white("win", "resigned", eco)).collect()
    };
    // 2600 + 2600 crosses the 5000-game bound, so the third archive must
    // never be consumed while the second is still fully tallied.
    assert!(2 * 2600 > EXAMINED_GAMES_CEILING);
    let fetches = [
        ArchiveFetch::Games(bulk("B20", 2600)),
        ArchiveFetch::Games(bulk("B20", 2600)),
        ArchiveFetch::Games(bulk("Z99", 2600)),
    ];
    let stats = accumulate_openings("alice", Color::White, fetches);
    assert_eq!(stats["B20"].total, 5200);
    assert!(!stats.contains_key("Z99"));
}

#[test]
fn identical_input_yields_identical_summaries() {
    let games: Vec<ArchivedGame> = (0..6)
        .map(|_| alice_white("win", "resigned", "B20"))
        .chain((0..6).map(|_| alice_white("checkmated", "win", "A00")))
        .collect();

    let run = || {
        summarize(accumulate_openings(
            "alice",
            Color::White,
            [ArchiveFetch::Games(games.clone())],
        ))
    };
    let first = run();
    let second = run();
    assert_eq!(first, second);
    // Deterministic order: sorted by opening code.
    let codes: Vec<&str> = first.iter().map(|s| s.eco.as_str()).collect();
    assert_eq!(codes, vec!["A00", "B20"]);
}
