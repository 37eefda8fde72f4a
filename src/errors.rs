//! Error types for the move-selection engine.
//!
//! There is no transient-failure class anywhere in the engine: every variant
//! is either a configuration error (caught eagerly at construction) or a
//! contract violation that is fatal to the call that triggered it. Opening
//! book misses are ordinary control flow, not errors.

/// Errors raised by search construction and execution.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The search root has no legal continuation. Callers are expected to
    /// check terminal status via the position oracle before searching.
    NoLegalMoves,
    /// Minimax depth below 1.
    InvalidDepth(u32),
    /// Zero or otherwise unusable MCTS budget.
    InvalidBudget(String),
    /// Evaluation weights rejected at construction; payload is the offending sum.
    InvalidWeights(f64),
    /// Configuration surface violated an invariant (e.g. conflicting budgets).
    InvalidConfig(String),
    /// A move was applied that is not legal in the current position. This
    /// can only happen through misuse of the oracle contract.
    IllegalMove(String),
    /// The evaluator was called on a terminal position.
    TerminalEvaluation,
    /// Unparseable or illegal FEN input.
    InvalidFen(String),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::NoLegalMoves => write!(f, "no legal moves at the search root"),
            SearchError::InvalidDepth(d) => write!(f, "invalid search depth: {} (must be >= 1)", d),
            SearchError::InvalidBudget(s) => write!(f, "invalid search budget: {}", s),
            SearchError::InvalidWeights(sum) => {
                write!(f, "evaluation weights must sum to 1.0, got {}", sum)
            }
            SearchError::InvalidConfig(s) => write!(f, "invalid configuration: {}", s),
            SearchError::IllegalMove(m) => write!(f, "illegal move applied: {}", m),
            SearchError::TerminalEvaluation => {
                write!(f, "evaluator called on a terminal position")
            }
            SearchError::InvalidFen(s) => write!(f, "invalid FEN: {}", s),
        }
    }
}

impl std::error::Error for SearchError {}
