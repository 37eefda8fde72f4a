//! Peregrine: a chess move-selection engine.
//!
//! Two search strategies over a shared evaluation core:
//!
//! - **MCTS** ([`mcts`]): UCT selection, uniform-random rollouts, and
//!   sign-flipping backpropagation, under an iteration or wall-clock budget.
//! - **Minimax** ([`search`]): depth-limited alpha-beta with a weighted
//!   positional evaluator at the leaves.
//!
//! Both consult a small opening book ([`openings`]) before searching, keyed
//! on a canonical position encoding so transpositions hit the same entry.
//! The [`agent`] module wraps each strategy behind a common interface, and
//! [`game`]/[`arena`] drive agents through full games and head-to-head
//! matches.

pub mod agent;
pub mod arena;
pub mod config;
pub mod errors;
pub mod eval;
pub mod game;
pub mod mcts;
pub mod openings;
pub mod search;
pub mod state;

pub use agent::{Agent, MctsAgent, MinimaxAgent, RandomAgent};
pub use config::{EngineConfig, SearchStrategy};
pub use errors::SearchError;
pub use eval::{EvalWeights, Evaluator};
pub use game::{play_game, GameRecord, GameResult, DEFAULT_MAX_PLIES};
pub use mcts::{mcts_search, MctsConfig, MctsStats, SearchBudget};
pub use openings::OpeningBook;
pub use search::MinimaxSearcher;
pub use state::ChessState;
