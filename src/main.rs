use std::env;
use std::process::ExitCode;

use chess_scout::api::ApiError;
use chess_scout::openings::Color;
use chess_scout::profile::{AverageRating, average_rating, fetch_player_overview};
use chess_scout::recent_games::fetch_recent_games;
use chess_scout::scout::{ScoutingSide, build_scouting_report};
use chess_scout::study::{NewStudyEntry, StudyError, StudyLog, parse_entry_id};

// Exit codes mirror the error taxonomy the way a web front-end would map
// http statuses: 2 for bad input, 4 for not-found, 1 for everything else.
const EXIT_BAD_INPUT: u8 = 2;
const EXIT_NOT_FOUND: u8 = 4;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["profile", username] => run_profile(username),
        ["recent", username] => run_recent(username),
        ["scout", player, opponent, color] => run_scout(player, opponent, color),
        ["study", rest @ ..] => run_study(rest),
        _ => {
            print_usage();
            ExitCode::from(EXIT_BAD_INPUT)
        }
    }
}

fn print_usage() {
    eprintln!("usage: chess_scout <command>");
    eprintln!();
    eprintln!("  profile <username>                       profile, average rating, recent games");
    eprintln!("  recent  <username>                       ten most recent games");
    eprintln!("  scout   <player> <opponent> <color>      opening report, color is WHITE or BLACK");
    eprintln!("  study   add <title> <played> [eco] [url] [description...]");
    eprintln!("  study   list");
    eprintln!("  study   view <id>");
}

fn api_exit(context: &str, err: &ApiError) -> ExitCode {
    match err {
        ApiError::NotFound => {
            eprintln!("{context}: username not found");
            ExitCode::from(EXIT_NOT_FOUND)
        }
        other => {
            eprintln!("{context}: {other}");
            ExitCode::FAILURE
        }
    }
}

fn run_profile(username: &str) -> ExitCode {
    let overview = match fetch_player_overview(username) {
        Ok(overview) => overview,
        Err(err) => return api_exit("profile", &err),
    };

    println!("Player:  {}", overview.profile.username);
    if let Some(name) = overview.profile.name.as_deref() {
        println!("Name:    {name}");
    }
    if let Some(title) = overview.profile.title.as_deref() {
        println!("Title:   {title}");
    }
    if !overview.profile.url.is_empty() {
        println!("URL:     {}", overview.profile.url);
    }
    match average_rating(&overview.stats) {
        AverageRating::Rated(elo) => println!("Avg Elo: {elo}"),
        AverageRating::Unrated => println!("Avg Elo: never played rated chess"),
    }

    println!();
    run_recent(username)
}

fn run_recent(username: &str) -> ExitCode {
    let games = match fetch_recent_games(username) {
        Ok(games) => games,
        Err(err) => return api_exit("recent games", &err),
    };

    println!(
        "{:<18} {:<18} {:<12} {:<8} {:<10} URL",
        "WHITE", "BLACK", "RESULT", "CLASS", "DATE"
    );
    for game in &games {
        println!(
            "{:<18} {:<18} {:<12} {:<8} {:<10} {}",
            game.white_name, game.black_name, game.result, game.time_class, game.date, game.game_url
        );
    }
    ExitCode::SUCCESS
}

fn run_scout(player: &str, opponent: &str, color: &str) -> ExitCode {
    let color: Color = match color.parse() {
        Ok(color) => color,
        Err(err) => {
            eprintln!("scout: {err}");
            return ExitCode::from(EXIT_BAD_INPUT);
        }
    };

    let report = build_scouting_report(player, opponent, color);
    println!(
        "Scouting report: {} ({}) vs {} ({})",
        report.player.username,
        report.color,
        report.opponent.username,
        report.color.complement()
    );
    println!();
    print_side(&report.player);
    println!();
    print_side(&report.opponent);
    ExitCode::SUCCESS
}

fn print_side(side: &ScoutingSide) {
    println!("--- {} ---", side.username);
    if side.games_analyzed == 0 {
        println!("insufficient data (fewer than 5 games in any single opening)");
        return;
    }
    println!("Most common openings:");
    for (rank, summary) in side.most_common.iter().enumerate() {
        println!("  {}. {:<40} {} games", rank + 1, summary.eco, summary.total);
    }
    println!("Weakest openings:");
    for (rank, summary) in side.weakest.iter().enumerate() {
        println!(
            "  {}. {:<40} {:.1}% wins",
            rank + 1,
            summary.eco,
            summary.win_rate
        );
    }
    println!("Games analyzed: {}", side.games_analyzed);
}

fn run_study(args: &[&str]) -> ExitCode {
    let log = match StudyLog::open_default() {
        Ok(log) => log,
        Err(err) => {
            eprintln!("study: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = match args {
        ["add", title, played, rest @ ..] => study_add(&log, title, played, rest),
        ["list"] => study_list(&log),
        ["view", id] => study_view(&log, id),
        _ => {
            print_usage();
            return ExitCode::from(EXIT_BAD_INPUT);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(StudyError::BadInput(msg)) => {
            eprintln!("study: invalid input: {msg}");
            ExitCode::from(EXIT_BAD_INPUT)
        }
        Err(StudyError::NotFound(id)) => {
            eprintln!("study: entry {id} not found");
            ExitCode::from(EXIT_NOT_FOUND)
        }
        Err(err) => {
            eprintln!("study: {err}");
            ExitCode::FAILURE
        }
    }
}

fn study_add(log: &StudyLog, title: &str, played: &str, rest: &[&str]) -> Result<(), StudyError> {
    let eco_code = rest.first().map(|s| s.to_string()).filter(|s| !s.is_empty());
    let url = rest.get(1).map(|s| s.to_string()).unwrap_or_default();
    let description = rest.get(2..).map(|s| s.join(" ")).unwrap_or_default();
    let id = log.add(NewStudyEntry {
        title: title.to_string(),
        eco_code,
        played: played.to_string(),
        url,
        description,
    })?;
    println!("Added study entry {id}");
    Ok(())
}

fn study_list(log: &StudyLog) -> Result<(), StudyError> {
    let entries = log.list()?;
    if entries.is_empty() {
        println!("No study entries logged yet.");
        return Ok(());
    }
    println!("{:<6} {:<12} {:<24} TITLE", "ID", "PLAYED", "ECO");
    for entry in &entries {
        println!(
            "{:<6} {:<12} {:<24} {}",
            entry.id,
            entry.played,
            entry.eco_code.as_deref().unwrap_or("-"),
            entry.title
        );
    }
    Ok(())
}

fn study_view(log: &StudyLog, id: &str) -> Result<(), StudyError> {
    let entry = log.get(parse_entry_id(id)?)?;
    println!("Title:       {}", entry.title);
    println!("Played:      {}", entry.played);
    println!("ECO:         {}", entry.eco_code.as_deref().unwrap_or("-"));
    if !entry.url.is_empty() {
        println!("URL:         {}", entry.url);
    }
    if !entry.description.is_empty() {
        println!("Description: {}", entry.description);
    }
    println!("Logged at:   {}", entry.created_at);
    Ok(())
}
