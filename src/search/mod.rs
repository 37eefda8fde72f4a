//! Classical game-tree search.

pub mod minimax;

pub use minimax::{MinimaxSearcher, MATE_SCORE};
