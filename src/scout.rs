use crate::openings::{Color, OpeningAnalysis, OpeningSummary, analyze_openings};

const TOP_OPENINGS: usize = 5;

/// One player's half of a scouting report.
#[derive(Debug, Clone)]
pub struct ScoutingSide {
    pub username: String,
    /// Top openings by sample size, descending.
    pub most_common: Vec<OpeningSummary>,
    /// Top openings by win rate, ascending. Low win rate = weak spot.
    pub weakest: Vec<OpeningSummary>,
    pub games_analyzed: u32,
}

#[derive(Debug, Clone)]
pub struct ScoutingReport {
    pub color: Color,
    pub player: ScoutingSide,
    pub opponent: ScoutingSide,
}

/// Head-to-head report: the player on `color`, the opponent on the
/// complement. The two scans are independent with no shared accumulator, so
/// they run side by side.
pub fn build_scouting_report(player: &str, opponent: &str, color: Color) -> ScoutingReport {
    let (player_analysis, opponent_analysis) = rayon::join(
        || analyze_openings(player, color),
        || analyze_openings(opponent, color.complement()),
    );
    compose_report(player, opponent, color, player_analysis, opponent_analysis)
}

/// Pure composition step. An `Empty` or `Failed` analysis degrades to empty
/// top-5 lists and a zero game count; composing never fails.
pub fn compose_report(
    player: &str,
    opponent: &str,
    color: Color,
    player_analysis: OpeningAnalysis,
    opponent_analysis: OpeningAnalysis,
) -> ScoutingReport {
    ScoutingReport {
        color,
        player: compose_side(player, player_analysis),
        opponent: compose_side(opponent, opponent_analysis),
    }
}

fn compose_side(username: &str, analysis: OpeningAnalysis) -> ScoutingSide {
    let summaries = analysis.into_summaries();
    ScoutingSide {
        username: username.to_string(),
        most_common: top_by_total(&summaries),
        weakest: top_by_win_rate(&summaries),
        games_analyzed: summaries.iter().map(|s| s.total).sum(),
    }
}

/// Most-played openings, largest sample first. Stable sort keeps the
/// summarize order (opening code) as the tiebreak.
pub fn top_by_total(summaries: &[OpeningSummary]) -> Vec<OpeningSummary> {
    let mut sorted = summaries.to_vec();
    sorted.sort_by(|a, b| b.total.cmp(&a.total));
    sorted.truncate(TOP_OPENINGS);
    sorted
}

/// Weakest openings, lowest win rate first.
pub fn top_by_win_rate(summaries: &[OpeningSummary]) -> Vec<OpeningSummary> {
    let mut sorted = summaries.to_vec();
    sorted.sort_by(|a, b| a.win_rate.total_cmp(&b.win_rate));
    sorted.truncate(TOP_OPENINGS);
    sorted
}
