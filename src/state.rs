//! Position oracle wrapper around the `shakmaty` rules engine.
//!
//! The search components never talk to `shakmaty` directly; everything goes
//! through [`ChessState`], which exposes exactly the oracle contract the
//! engine needs: legal move generation, immutable move application, terminal
//! detection, and a canonical position encoding for opening-book lookup.

use crate::errors::SearchError;
use shakmaty::fen::{Epd, Fen};
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Outcome, Position};

/// A full game state. Immutable: applying a move produces a new state.
#[derive(Debug, Clone)]
pub struct ChessState {
    pos: Chess,
}

impl ChessState {
    /// The standard starting position.
    pub fn new() -> Self {
        ChessState {
            pos: Chess::default(),
        }
    }

    /// Builds a state from a FEN string. Used by tests and demos.
    pub fn from_fen(fen: &str) -> Result<Self, SearchError> {
        let parsed: Fen = fen
            .parse()
            .map_err(|_| SearchError::InvalidFen(fen.to_string()))?;
        let pos = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|_| SearchError::InvalidFen(fen.to_string()))?;
        Ok(ChessState { pos })
    }

    /// Legal moves in a deterministic order. Move ordering is stable across
    /// repeated calls on the same position, which the search tie-breaks
    /// depend on.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.pos.legal_moves().into_iter().collect()
    }

    /// Applies a move, producing the successor position. The original state
    /// is untouched. An illegal move is a contract violation.
    pub fn apply(&self, mv: &Move) -> Result<Self, SearchError> {
        let uci = self.move_to_uci(mv);
        let pos = self
            .pos
            .clone()
            .play(mv)
            .map_err(|_| SearchError::IllegalMove(uci))?;
        Ok(ChessState { pos })
    }

    /// Whether the game is over (checkmate, stalemate, or insufficient
    /// material).
    pub fn is_terminal(&self) -> bool {
        self.pos.is_game_over()
    }

    /// Terminal outcome, `None` for ongoing games.
    pub fn outcome(&self) -> Option<Outcome> {
        self.pos.outcome()
    }

    /// Side to move.
    pub fn turn(&self) -> Color {
        self.pos.turn()
    }

    /// Canonical encoding used as the opening-book key: piece placement,
    /// side to move, castling rights, and en-passant target. Move counters
    /// are deliberately excluded so that transpositions identical in all
    /// game-relevant respects encode identically.
    pub fn encode(&self) -> String {
        Epd::from_position(self.pos.clone(), EnPassantMode::Legal).to_string()
    }

    /// Read access to the underlying board, for evaluation scans.
    pub fn board(&self) -> &shakmaty::Board {
        self.pos.board()
    }

    pub(crate) fn position(&self) -> &Chess {
        &self.pos
    }

    /// UCI text for a move in this position.
    pub fn move_to_uci(&self, mv: &Move) -> String {
        mv.to_uci(CastlingMode::Standard).to_string()
    }

    /// Resolves UCI text to a legal move in this position, if there is one.
    pub fn parse_uci(&self, uci: &str) -> Option<Move> {
        let parsed: UciMove = uci.parse().ok()?;
        parsed.to_move(&self.pos).ok()
    }
}

impl Default for ChessState {
    fn default() -> Self {
        ChessState::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_twenty_moves() {
        let state = ChessState::new();
        assert_eq!(state.legal_moves().len(), 20);
        assert!(!state.is_terminal());
        assert_eq!(state.turn(), Color::White);
    }

    #[test]
    fn apply_does_not_mutate() {
        let state = ChessState::new();
        let mv = state.parse_uci("e2e4").unwrap();
        let next = state.apply(&mv).unwrap();
        assert_eq!(state.legal_moves().len(), 20);
        assert_eq!(next.turn(), Color::Black);
    }

    #[test]
    fn encode_excludes_move_counters() {
        let state = ChessState::new();
        assert_eq!(
            state.encode(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"
        );
    }

    #[test]
    fn transpositions_encode_identically() {
        // 1.e4 e5 2.Nf3 Nc6 and 1.Nf3 Nc6 2.e4 e5 reach the same position.
        let mut a = ChessState::new();
        for uci in ["e2e4", "e7e5", "g1f3", "b8c6"] {
            let mv = a.parse_uci(uci).unwrap();
            a = a.apply(&mv).unwrap();
        }
        let mut b = ChessState::new();
        for uci in ["g1f3", "b8c6", "e2e4", "e7e5"] {
            let mv = b.parse_uci(uci).unwrap();
            b = b.apply(&mv).unwrap();
        }
        assert_eq!(a.encode(), b.encode());
    }

    #[test]
    fn checkmate_is_terminal() {
        // Fool's mate.
        let state = ChessState::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 3",
        )
        .unwrap();
        assert!(state.is_terminal());
        assert_eq!(
            state.outcome(),
            Some(Outcome::Decisive {
                winner: Color::Black
            })
        );
    }

    #[test]
    fn invalid_fen_is_rejected() {
        assert!(matches!(
            ChessState::from_fen("not a fen"),
            Err(SearchError::InvalidFen(_))
        ));
    }
}
