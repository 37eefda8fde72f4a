//! Monte Carlo Tree Search.
//!
//! Iterative tree-building search: UCT selection, deterministic expansion,
//! random-policy rollouts, and sign-flipping backpropagation. Each `search`
//! call builds and discards its own tree; nothing is shared between calls.

pub mod node;
pub mod search;
pub mod simulation;

pub use self::node::MctsNode;
pub use self::search::{mcts_search, MctsConfig, MctsStats, SearchBudget};
pub use self::simulation::{simulate_random_rollout, ROLLOUT_DEPTH_CAP};

/// Default exploration constant for UCT (sqrt(2)).
pub const EXPLORATION_CONSTANT: f64 = std::f64::consts::SQRT_2;
