use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::api::{self, ArchivedGame};

/// Opening buckets below this sample size are noise, not a tendency.
pub const MIN_GAMES_THRESHOLD: u32 = 5;

/// Safety bound on how deep into a player's history one analysis walks.
/// Checked before consuming the next archive, so an archive that has already
/// been fetched is always fully tallied even if it pushes past the bound.
pub const EXAMINED_GAMES_CEILING: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn complement(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Color::White => "WHITE",
            Color::Black => "BLACK",
        }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_uppercase().as_str() {
            "WHITE" | "W" => Ok(Color::White),
            "BLACK" | "B" => Ok(Color::Black),
            other => Err(format!("invalid color '{other}', expected WHITE or BLACK")),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win,
    Loss,
    Draw,
}

/// Running tally for one opening code. Lives only for the duration of a
/// single aggregation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpeningStat {
    pub total: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl OpeningStat {
    pub fn record(&mut self, outcome: GameOutcome) {
        self.total += 1;
        match outcome {
            GameOutcome::Win => self.wins += 1,
            GameOutcome::Loss => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    /// Win percentage rounded to one decimal place.
    pub fn win_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.wins as f64 / self.total as f64 * 1000.0).round() / 10.0
    }
}

/// Reportable projection of a stat that met the sample threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningSummary {
    pub eco: String,
    pub total: u32,
    pub win_rate: f64,
}

/// One archive's contribution to the fold: either its games, or the reason
/// it was skipped. A skipped month is an observability event, not a failure.
#[derive(Debug, Clone)]
pub enum ArchiveFetch {
    Games(Vec<ArchivedGame>),
    Skipped(String),
}

/// Outcome of a whole analysis. `Empty` is "insufficient data", never an
/// error; `Failed` carries the reason the archive index could not be read.
#[derive(Debug, Clone)]
pub enum OpeningAnalysis {
    Report(Vec<OpeningSummary>),
    Empty,
    Failed(String),
}

impl OpeningAnalysis {
    /// Degrade to whatever summaries exist. Callers that tolerate missing
    /// data (the scouting composer) fold `Empty` and `Failed` into nothing.
    pub fn into_summaries(self) -> Vec<OpeningSummary> {
        match self {
            OpeningAnalysis::Report(summaries) => summaries,
            OpeningAnalysis::Empty | OpeningAnalysis::Failed(_) => Vec::new(),
        }
    }
}

/// Opening-repertoire scan for one player on one color.
///
/// Walks the monthly archives oldest-first, tallies win/loss/draw per opening
/// code, and reports only openings with at least [`MIN_GAMES_THRESHOLD`]
/// games. Index-fetch failures become `Failed`; a single bad month is skipped
/// inside the fold and the call still succeeds with partial data.
pub fn analyze_openings(username: &str, color: Color) -> OpeningAnalysis {
    let archives = match api::fetch_archive_index(username) {
        Ok(archives) => archives,
        Err(err) => {
            eprintln!("[WARN] {username}: archive index fetch failed: {err}");
            return OpeningAnalysis::Failed(err.to_string());
        }
    };
    if archives.is_empty() {
        return OpeningAnalysis::Empty;
    }

    // Lazy map keeps archives past the ceiling from ever being fetched.
    let fetches = archives.iter().map(|url| match api::fetch_archive_games(url) {
        Ok(games) => ArchiveFetch::Games(games),
        Err(err) => ArchiveFetch::Skipped(format!("{url}: {err}")),
    });
    let stats = accumulate_openings(username, color, fetches);
    let summaries = summarize(stats);
    if summaries.is_empty() {
        OpeningAnalysis::Empty
    } else {
        OpeningAnalysis::Report(summaries)
    }
}

/// Fold archive fetch results into per-opening tallies. The accumulator map
/// is owned by this call; nothing is shared across analyses.
pub fn accumulate_openings(
    username: &str,
    color: Color,
    fetches: impl IntoIterator<Item = ArchiveFetch>,
) -> HashMap<String, OpeningStat> {
    let mut stats: HashMap<String, OpeningStat> = HashMap::new();
    let mut examined = 0usize;

    for fetch in fetches {
        if examined > EXAMINED_GAMES_CEILING {
            break;
        }
        let games = match fetch {
            ArchiveFetch::Games(games) => games,
            ArchiveFetch::Skipped(reason) => {
                eprintln!("[WARN] {username}: archive skipped: {reason}");
                continue;
            }
        };
        // The examined count covers every game in the archive, matching or
        // not, so the ceiling bounds work done rather than games kept.
        examined += games.len();
        for game in &games {
            if !seat_matches(game, username, color) {
                continue;
            }
            let Some(eco) = game.eco.as_deref().and_then(extract_opening_code) else {
                continue;
            };
            let outcome = classify_outcome(game, color);
            stats.entry(eco.to_string()).or_default().record(outcome);
        }
    }

    stats
}

/// Threshold filter plus projection. Sorted by opening code so repeated runs
/// over identical data yield an identical sequence.
pub fn summarize(stats: HashMap<String, OpeningStat>) -> Vec<OpeningSummary> {
    let mut out: Vec<OpeningSummary> = stats
        .into_iter()
        .filter(|(_, stat)| stat.total >= MIN_GAMES_THRESHOLD)
        .map(|(eco, stat)| OpeningSummary {
            total: stat.total,
            win_rate: stat.win_rate(),
            eco,
        })
        .collect();
    out.sort_by(|a, b| a.eco.cmp(&b.eco));
    out
}

fn seat_matches(game: &ArchivedGame, username: &str, color: Color) -> bool {
    let seat = match color {
        Color::White => &game.white,
        Color::Black => &game.black,
    };
    seat.username.eq_ignore_ascii_case(username)
}

/// WIN if the player's own seat holds the upstream `win` sentinel, LOSS if
/// the opponent's does, DRAW otherwise. The DRAW arm also absorbs
/// abandonments and timeouts where neither side is credited a win.
pub fn classify_outcome(game: &ArchivedGame, color: Color) -> GameOutcome {
    let (own, opponent) = match color {
        Color::White => (&game.white, &game.black),
        Color::Black => (&game.black, &game.white),
    };
    if own.result == "win" {
        GameOutcome::Win
    } else if opponent.result == "win" {
        GameOutcome::Loss
    } else {
        GameOutcome::Draw
    }
}

/// Last path segment of the upstream classification URL, e.g.
/// `https://www.chess.com/openings/B20-Sicilian-Defense` -> `B20-Sicilian-Defense`.
pub fn extract_opening_code(url: &str) -> Option<&str> {
    url.rsplit('/').next().filter(|segment| !segment.is_empty())
}
