//! Head-to-head evaluation harness.
//!
//! Plays repeated games between two agents and aggregates the results into
//! serializable statistics, for self-play checks and strategy comparisons.

use crate::agent::Agent;
use crate::errors::SearchError;
use crate::game::{play_game, GameRecord, GameResult};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Aggregated results of a match between two agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchStats {
    pub white: String,
    pub black: String,
    pub games: u32,
    pub white_wins: u32,
    pub black_wins: u32,
    pub draws: u32,
    /// White's score in [0, 1]: wins plus half of draws, over games played.
    pub white_score: f64,
    pub avg_plies: f64,
    pub elapsed_secs: f64,
}

/// Full match report: the aggregate plus per-game records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub stats: MatchStats,
    pub records: Vec<GameRecord>,
}

/// Plays `games` games with fixed colors and aggregates the results.
pub fn run_match(
    white: &mut dyn Agent,
    black: &mut dyn Agent,
    games: u32,
    max_plies: u32,
) -> Result<MatchReport, SearchError> {
    let start = Instant::now();
    let mut records = Vec::with_capacity(games as usize);

    for _ in 0..games {
        records.push(play_game(white, black, max_plies)?);
    }

    let white_wins = records
        .iter()
        .filter(|r| r.result == GameResult::WhiteWin)
        .count() as u32;
    let black_wins = records
        .iter()
        .filter(|r| r.result == GameResult::BlackWin)
        .count() as u32;
    let draws = games - white_wins - black_wins;
    let total_plies: u64 = records.iter().map(|r| u64::from(r.plies)).sum();

    let stats = MatchStats {
        white: white.name().to_string(),
        black: black.name().to_string(),
        games,
        white_wins,
        black_wins,
        draws,
        white_score: if games == 0 {
            0.5
        } else {
            (white_wins as f64 + 0.5 * draws as f64) / games as f64
        },
        avg_plies: if games == 0 {
            0.0
        } else {
            total_plies as f64 / games as f64
        },
        elapsed_secs: start.elapsed().as_secs_f64(),
    };

    Ok(MatchReport { stats, records })
}

/// Writes a JSON report to `path`.
pub fn save_report(report: &MatchReport, path: &Path) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.write_all(json.as_bytes())
}
