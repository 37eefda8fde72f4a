//! Depth-bounded minimax with alpha-beta pruning.

use crate::errors::SearchError;
use crate::eval::Evaluator;
use crate::openings::OpeningBook;
use crate::state::ChessState;
use shakmaty::{Color, Move, Outcome};

/// Score magnitude for a decisive terminal position. Dominates any
/// evaluator output.
pub const MATE_SCORE: f64 = 10_000.0;

/// Alpha-beta searcher. Depth is fixed at construction; the opening book,
/// when present, short-circuits the search entirely on a hit.
pub struct MinimaxSearcher<'a> {
    depth: u32,
    evaluator: &'a Evaluator,
    book: Option<&'a OpeningBook>,
    nodes_evaluated: u64,
}

impl<'a> MinimaxSearcher<'a> {
    /// Builds a searcher. `depth < 1` is a configuration error, rejected
    /// eagerly.
    pub fn new(
        depth: u32,
        evaluator: &'a Evaluator,
        book: Option<&'a OpeningBook>,
    ) -> Result<MinimaxSearcher<'a>, SearchError> {
        if depth < 1 {
            return Err(SearchError::InvalidDepth(depth));
        }
        Ok(MinimaxSearcher {
            depth,
            evaluator,
            book,
            nodes_evaluated: 0,
        })
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Nodes visited by the last `search` call.
    pub fn nodes_evaluated(&self) -> u64 {
        self.nodes_evaluated
    }

    /// Best move for the side to move at `state`. Checks the opening book
    /// first; on a miss, runs alpha-beta to the configured depth. Root ties
    /// are broken by first-encountered order, which is stable because the
    /// oracle's move ordering is deterministic.
    pub fn search(&mut self, state: &ChessState) -> Result<Move, SearchError> {
        if let Some(book) = self.book {
            if let Some(mv) = book.lookup(state) {
                return Ok(mv);
            }
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let player = state.turn();
        self.nodes_evaluated = 0;

        let mut best: Option<(f64, Move)> = None;
        for mv in moves {
            let successor = state.apply(&mv)?;
            let score = self.minimax(
                &successor,
                self.depth - 1,
                f64::NEG_INFINITY,
                f64::INFINITY,
                false,
                player,
            )?;
            let better = match &best {
                Some((best_score, _)) => score > *best_score,
                None => true,
            };
            if better {
                best = Some((score, mv));
            }
        }

        best.map(|(_, mv)| mv).ok_or(SearchError::NoLegalMoves)
    }

    fn minimax(
        &mut self,
        state: &ChessState,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
        player: Color,
    ) -> Result<f64, SearchError> {
        self.nodes_evaluated += 1;

        // Terminal positions override the evaluator regardless of depth.
        if let Some(outcome) = state.outcome() {
            return Ok(terminal_score(outcome, player));
        }
        if depth == 0 {
            return self.evaluator.evaluate(state, player);
        }

        let moves = state.legal_moves();
        if maximizing {
            let mut best = f64::NEG_INFINITY;
            for mv in moves {
                let successor = state.apply(&mv)?;
                let score = self.minimax(&successor, depth - 1, alpha, beta, false, player)?;
                best = best.max(score);
                alpha = alpha.max(score);
                if alpha >= beta {
                    break;
                }
            }
            Ok(best)
        } else {
            let mut best = f64::INFINITY;
            for mv in moves {
                let successor = state.apply(&mv)?;
                let score = self.minimax(&successor, depth - 1, alpha, beta, true, player)?;
                best = best.min(score);
                beta = beta.min(score);
                if alpha >= beta {
                    break;
                }
            }
            Ok(best)
        }
    }
}

/// Fixed terminal scores from `player`'s perspective: decisive results at
/// mate magnitude, draws at zero.
fn terminal_score(outcome: Outcome, player: Color) -> f64 {
    match outcome {
        Outcome::Decisive { winner } if winner == player => MATE_SCORE,
        Outcome::Decisive { .. } => -MATE_SCORE,
        Outcome::Draw => 0.0,
    }
}
