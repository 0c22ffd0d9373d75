use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use chess_scout::api::{ArchivedGame, GameSeat, parse_archive_games_json};
use chess_scout::openings::{ArchiveFetch, Color, accumulate_openings, summarize};
use chess_scout::recent_games::build_recent_games;

const MONTHLY_JSON: &str = include_str!("../tests/fixtures/monthly_games.json");

fn synthetic_month(len: usize) -> Vec<ArchivedGame> {
    (0..len)
        .map(|i| {
            let eco = ["B20", "C50", "A40", "E60", "D02"][i % 5];
            let (white_result, black_result) = match i % 3 {
                0 => ("win", "checkmated"),
                1 => ("resigned", "win"),
                _ => ("agreed", "agreed"),
            };
            ArchivedGame {
                url: format!("https://www.chess.com/game/live/{i}"),
                eco: Some(format!("https://www.chess.com/openings/{eco}")),
                end_time: 1_700_000_000 + i as i64,
                time_class: "blitz".to_string(),
                white: GameSeat {
                    username: "alice".to_string(),
                    result: white_result.to_string(),
                },
                black: GameSeat {
                    username: "rival".to_string(),
                    result: black_result.to_string(),
                },
            }
        })
        .collect()
}

fn bench_monthly_parse(c: &mut Criterion) {
    c.bench_function("monthly_games_parse", |b| {
        b.iter(|| {
            let games = parse_archive_games_json(black_box(MONTHLY_JSON)).unwrap();
            black_box(games.len());
        })
    });
}

fn bench_opening_aggregation(c: &mut Criterion) {
    // Roughly the ceiling's worth of games split across monthly archives.
    let months: Vec<Vec<ArchivedGame>> = (0..10).map(|_| synthetic_month(500)).collect();
    c.bench_function("opening_aggregation_5000_games", |b| {
        b.iter(|| {
            let fetches = months.iter().cloned().map(ArchiveFetch::Games);
            let stats = accumulate_openings("alice", Color::White, fetches);
            black_box(summarize(stats));
        })
    });
}

fn bench_recent_games(c: &mut Criterion) {
    let month = synthetic_month(300);
    c.bench_function("recent_games_build", |b| {
        b.iter(|| {
            black_box(build_recent_games("alice", month.clone()));
        })
    });
}

criterion_group!(
    benches,
    bench_monthly_parse,
    bench_opening_aggregation,
    bench_recent_games
);
criterion_main!(benches);
