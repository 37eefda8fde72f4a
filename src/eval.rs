//! Multi-factor position evaluation.
//!
//! Scores a non-terminal position as a weighted sum of five sub-scores:
//! material, piece placement, mobility, king safety, and pawn structure.
//! Every call is a stateless full-board scan; nothing is cached across
//! calls. Scores are in approximate pawn units, positive favoring the
//! queried side, and evaluating a position and its color-reversed mirror
//! yields negated scores.
//!
//! Minimax uses this for leaf scoring; MCTS touches it only as the fallback
//! when a rollout hits its depth cap.

use crate::errors::SearchError;
use crate::state::ChessState;
use serde::{Deserialize, Serialize};
use shakmaty::{
    CastlingMode, Chess, Color, EnPassantMode, File, FromSetup, Position, Rank, Role, Square,
};

/// Tolerance for the weight-sum invariant.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Scale applied to each point of mobility difference.
const MOBILITY_PER_MOVE: f64 = 0.1;

/// King safety terms.
const CASTLED_KING_BONUS: f64 = 0.6;
const EXPOSED_KING_PENALTY: f64 = 0.5;

/// Pawn structure terms.
const DOUBLED_PAWN_PENALTY: f64 = 0.5;
const ISOLATED_PAWN_PENALTY: f64 = 0.4;
const PASSED_PAWN_BONUS_PER_RANK: f64 = 0.15;

/// Piece-square tables are in centipawns; evaluation works in pawn units.
const PST_SCALE: f64 = 0.01;

/// The five evaluation coefficients. Must be non-negative and sum to 1.0;
/// validated at construction and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalWeights {
    pub material: f64,
    pub position: f64,
    pub mobility: f64,
    pub king_safety: f64,
    pub pawn_structure: f64,
}

impl EvalWeights {
    pub fn new(
        material: f64,
        position: f64,
        mobility: f64,
        king_safety: f64,
        pawn_structure: f64,
    ) -> Result<Self, SearchError> {
        let weights = EvalWeights {
            material,
            position,
            mobility,
            king_safety,
            pawn_structure,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn sum(&self) -> f64 {
        self.material + self.position + self.mobility + self.king_safety + self.pawn_structure
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        let all_non_negative = self.material >= 0.0
            && self.position >= 0.0
            && self.mobility >= 0.0
            && self.king_safety >= 0.0
            && self.pawn_structure >= 0.0;
        if !all_non_negative || (self.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(SearchError::InvalidWeights(self.sum()));
        }
        Ok(())
    }
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            material: 0.80,
            position: 0.05,
            mobility: 0.05,
            king_safety: 0.07,
            pawn_structure: 0.03,
        }
    }
}

/// The evaluation function. Cheap to construct and safe to share between
/// concurrent searches; it holds only the weight vector.
#[derive(Debug, Clone)]
pub struct Evaluator {
    weights: EvalWeights,
}

impl Evaluator {
    pub fn new() -> Evaluator {
        Evaluator {
            weights: EvalWeights::default(),
        }
    }

    pub fn with_weights(weights: EvalWeights) -> Result<Evaluator, SearchError> {
        weights.validate()?;
        Ok(Evaluator { weights })
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    /// Scores `state` from `player`'s perspective. The caller is responsible
    /// for detecting terminal positions first; calling this on one is an
    /// error.
    pub fn evaluate(&self, state: &ChessState, player: Color) -> Result<f64, SearchError> {
        if state.is_terminal() {
            return Err(SearchError::TerminalEvaluation);
        }

        // Each sub-score is a white-minus-black balance; the total is signed
        // for the queried side at the end. This keeps color symmetry exact.
        let score = self.weights.material * self.material_balance(state)
            + self.weights.position * self.positional_balance(state)
            + self.weights.mobility * self.mobility_balance(state)
            + self.weights.king_safety * self.king_safety_balance(state)
            + self.weights.pawn_structure * self.pawn_structure_balance(state);

        Ok(match player {
            Color::White => score,
            Color::Black => -score,
        })
    }

    fn material_balance(&self, state: &ChessState) -> f64 {
        let board = state.board();
        let mut balance = 0.0;
        for color in [Color::White, Color::Black] {
            let sign = if color == Color::White { 1.0 } else { -1.0 };
            for role in [Role::Pawn, Role::Knight, Role::Bishop, Role::Rook, Role::Queen] {
                let count = (board.by_color(color) & board.by_role(role))
                    .into_iter()
                    .count();
                balance += sign * piece_value(role) * count as f64;
            }
        }
        balance
    }

    fn positional_balance(&self, state: &ChessState) -> f64 {
        let board = state.board();
        let mut balance = 0.0;
        for color in [Color::White, Color::Black] {
            let sign = if color == Color::White { 1.0 } else { -1.0 };
            for role in [Role::Pawn, Role::Knight, Role::Bishop, Role::Rook, Role::Queen] {
                let table = piece_square_table(role);
                for sq in board.by_color(color) & board.by_role(role) {
                    balance += sign * PST_SCALE * table[table_index(sq, color)] as f64;
                }
            }
        }
        balance
    }

    fn mobility_balance(&self, state: &ChessState) -> f64 {
        let white = self.mobility_count(state, Color::White) as f64;
        let black = self.mobility_count(state, Color::Black) as f64;
        MOBILITY_PER_MOVE * (white - black)
    }

    /// Legal-move count for one side. The side not to move is counted by
    /// flipping the turn in a copied setup; if the flipped setup is invalid
    /// (the original side to move would be left in check), that side counts
    /// zero.
    fn mobility_count(&self, state: &ChessState, color: Color) -> usize {
        let pos = state.position();
        if pos.turn() == color {
            return pos.legal_moves().len();
        }
        let mut setup = pos.clone().into_setup(EnPassantMode::Legal);
        setup.turn = color;
        setup.ep_square = None;
        match Chess::from_setup(setup, CastlingMode::Standard) {
            Ok(flipped) => flipped.legal_moves().len(),
            Err(_) => 0,
        }
    }

    fn king_safety_balance(&self, state: &ChessState) -> f64 {
        self.king_safety_for(state, Color::White) - self.king_safety_for(state, Color::Black)
    }

    fn king_safety_for(&self, state: &ChessState, color: Color) -> f64 {
        let king = match state.board().king_of(color) {
            Some(sq) => sq,
            None => return 0.0,
        };
        let home_rank = match color {
            Color::White => Rank::First,
            Color::Black => Rank::Eighth,
        };
        let on_home_rank = king.rank() == home_rank;
        let mut score = 0.0;
        if on_home_rank && matches!(king.file(), File::B | File::C | File::G | File::H) {
            score += CASTLED_KING_BONUS;
        }
        if !on_home_rank || matches!(king.file(), File::D | File::E) {
            score -= EXPOSED_KING_PENALTY;
        }
        score
    }

    fn pawn_structure_balance(&self, state: &ChessState) -> f64 {
        self.pawn_structure_for(state, Color::White) - self.pawn_structure_for(state, Color::Black)
    }

    fn pawn_structure_for(&self, state: &ChessState, color: Color) -> f64 {
        let board = state.board();
        let friendly: Vec<Square> = (board.by_color(color) & board.by_role(Role::Pawn))
            .into_iter()
            .collect();
        let enemy: Vec<Square> = (board.by_color(!color) & board.by_role(Role::Pawn))
            .into_iter()
            .collect();

        let mut file_counts = [0u32; 8];
        for sq in &friendly {
            file_counts[sq.file() as usize] += 1;
        }

        let mut score = 0.0;

        for count in file_counts {
            if count > 1 {
                score -= DOUBLED_PAWN_PENALTY * (count - 1) as f64;
            }
        }

        for sq in &friendly {
            let file = sq.file() as usize;
            let left = file.checked_sub(1).map_or(0, |f| file_counts[f]);
            let right = if file + 1 < 8 { file_counts[file + 1] } else { 0 };
            if left + right == 0 {
                score -= ISOLATED_PAWN_PENALTY;
            }

            if is_passed(*sq, color, &enemy) {
                score += PASSED_PAWN_BONUS_PER_RANK * relative_rank(*sq, color) as f64;
            }
        }

        score
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::new()
    }
}

fn piece_value(role: Role) -> f64 {
    match role {
        Role::Pawn => 1.0,
        Role::Knight => 3.0,
        Role::Bishop => 3.2,
        Role::Rook => 5.0,
        Role::Queen => 9.0,
        Role::King => 0.0,
    }
}

/// Rank counted from the side's own back rank (0 = home rank).
fn relative_rank(sq: Square, color: Color) -> u32 {
    match color {
        Color::White => sq.rank() as u32,
        Color::Black => 7 - sq.rank() as u32,
    }
}

/// No enemy pawn ahead on the same or an adjacent file.
fn is_passed(sq: Square, color: Color, enemy_pawns: &[Square]) -> bool {
    let file = sq.file() as i32;
    let rank = sq.rank() as i32;
    !enemy_pawns.iter().any(|e| {
        let file_close = (e.file() as i32 - file).abs() <= 1;
        let ahead = match color {
            Color::White => (e.rank() as i32) > rank,
            Color::Black => (e.rank() as i32) < rank,
        };
        file_close && ahead
    })
}

/// Tables are written from White's point of view with rank 8 as the first
/// row, so White indexes through a vertical flip and Black directly.
fn table_index(sq: Square, color: Color) -> usize {
    match color {
        Color::White => sq.flip_vertical() as usize,
        Color::Black => sq as usize,
    }
}

fn piece_square_table(role: Role) -> &'static [i32; 64] {
    match role {
        Role::Pawn => &PAWN_TABLE,
        Role::Knight => &KNIGHT_TABLE,
        Role::Bishop => &BISHOP_TABLE,
        Role::Rook => &ROOK_TABLE,
        Role::Queen => &QUEEN_TABLE,
        // The king has no table; its placement is scored by king safety.
        Role::King => &ZERO_TABLE,
    }
}

const ZERO_TABLE: [i32; 64] = [0; 64];

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];
