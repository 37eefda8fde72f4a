//! Game orchestration: drives two agents from the starting position to a
//! result.

use crate::agent::Agent;
use crate::errors::SearchError;
use crate::state::ChessState;
use serde::{Deserialize, Serialize};
use shakmaty::{Color, Outcome};

/// Final result of a game, from White's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    WhiteWin,
    BlackWin,
    Draw,
}

impl GameResult {
    pub fn score_for_white(&self) -> f64 {
        match self {
            GameResult::WhiteWin => 1.0,
            GameResult::BlackWin => 0.0,
            GameResult::Draw => 0.5,
        }
    }

    pub fn from_outcome(outcome: Outcome) -> GameResult {
        match outcome {
            Outcome::Decisive {
                winner: Color::White,
            } => GameResult::WhiteWin,
            Outcome::Decisive {
                winner: Color::Black,
            } => GameResult::BlackWin,
            Outcome::Draw => GameResult::Draw,
        }
    }
}

/// Record of one completed game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub white: String,
    pub black: String,
    pub result: GameResult,
    pub plies: u32,
    /// Moves in UCI notation, in play order.
    pub moves: Vec<String>,
}

/// Maximum game length before the game is scored as a draw.
pub const DEFAULT_MAX_PLIES: u32 = 500;

/// Plays a full game between two agents from the starting position.
/// Games that reach `max_plies` are scored as draws. An agent returning an
/// illegal move is a contract violation and aborts the game with an error.
pub fn play_game(
    white: &mut dyn Agent,
    black: &mut dyn Agent,
    max_plies: u32,
) -> Result<GameRecord, SearchError> {
    let mut state = ChessState::new();
    let mut moves = Vec::new();

    while !state.is_terminal() {
        if moves.len() as u32 >= max_plies {
            return Ok(GameRecord {
                white: white.name().to_string(),
                black: black.name().to_string(),
                result: GameResult::Draw,
                plies: moves.len() as u32,
                moves,
            });
        }

        let agent: &mut dyn Agent = match state.turn() {
            Color::White => white,
            Color::Black => black,
        };
        let mv = agent.propose_move(&state)?;
        moves.push(state.move_to_uci(&mv));
        state = state.apply(&mv)?;
    }

    let outcome = state
        .outcome()
        .expect("terminal position must have an outcome");

    Ok(GameRecord {
        white: white.name().to_string(),
        black: black.name().to_string(),
        result: GameResult::from_outcome(outcome),
        plies: moves.len() as u32,
        moves,
    })
}
