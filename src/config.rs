//! Engine configuration surface.
//!
//! Everything the host application can tune: search strategy, minimax
//! depth, opening-book toggle, MCTS budget, exploration constant, and the
//! evaluation weight vector. All invariants are checked eagerly by
//! [`EngineConfig::validate`]; a bad configuration is fatal, never retried.

use crate::agent::{Agent, MctsAgent, MinimaxAgent};
use crate::errors::SearchError;
use crate::eval::{EvalWeights, Evaluator};
use crate::mcts::{MctsConfig, SearchBudget, EXPLORATION_CONSTANT};
use crate::openings::OpeningBook;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which search engine selects moves on an opening-book miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    Minimax,
    Mcts,
}

/// Complete engine configuration. Exactly one of `mcts_iterations` and
/// `mcts_time_limit_ms` must be set when the MCTS strategy is selected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub strategy: SearchStrategy,
    pub minimax_depth: u32,
    pub use_opening_book: bool,
    pub mcts_iterations: Option<u32>,
    pub mcts_time_limit_ms: Option<u64>,
    pub exploration_constant: f64,
    pub eval_weights: EvalWeights,
    /// Rollout RNG seed; `None` means entropy-seeded.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            strategy: SearchStrategy::Mcts,
            minimax_depth: 3,
            use_opening_book: true,
            mcts_iterations: Some(1000),
            mcts_time_limit_ms: None,
            exploration_constant: EXPLORATION_CONSTANT,
            eval_weights: EvalWeights::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Checks every configuration invariant. Call before building agents;
    /// `build_agent` also calls this.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.minimax_depth < 1 {
            return Err(SearchError::InvalidDepth(self.minimax_depth));
        }
        self.eval_weights.validate()?;
        if self.strategy == SearchStrategy::Mcts {
            self.budget()?.validate()?;
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration constant must be a non-negative real, got {}",
                self.exploration_constant
            )));
        }
        Ok(())
    }

    /// Resolves the MCTS budget. Setting both or neither of the iteration
    /// and time limits is a configuration error.
    pub fn budget(&self) -> Result<SearchBudget, SearchError> {
        match (self.mcts_iterations, self.mcts_time_limit_ms) {
            (Some(iterations), None) => Ok(SearchBudget::Iterations(iterations)),
            (None, Some(ms)) => Ok(SearchBudget::TimeLimit(Duration::from_millis(ms))),
            (Some(_), Some(_)) => Err(SearchError::InvalidConfig(
                "iteration and time budgets are mutually exclusive".to_string(),
            )),
            (None, None) => Err(SearchError::InvalidConfig(
                "an iteration or time budget is required for MCTS".to_string(),
            )),
        }
    }

    /// Builds the configured agent against a shared evaluator and book.
    pub fn build_agent<'a>(
        &self,
        evaluator: &'a Evaluator,
        book: &'a OpeningBook,
    ) -> Result<Box<dyn Agent + 'a>, SearchError> {
        self.validate()?;
        let book = self.use_opening_book.then_some(book);
        match self.strategy {
            SearchStrategy::Minimax => Ok(Box::new(MinimaxAgent::new(
                self.minimax_depth,
                evaluator,
                book,
            )?)),
            SearchStrategy::Mcts => {
                let config = MctsConfig {
                    budget: self.budget()?,
                    exploration_constant: self.exploration_constant,
                    seed: self.seed,
                };
                Ok(Box::new(MctsAgent::new(config, evaluator, book)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_depth_is_rejected() {
        let config = EngineConfig {
            minimax_depth: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(SearchError::InvalidDepth(0)));
    }

    #[test]
    fn conflicting_budgets_are_rejected() {
        let config = EngineConfig {
            mcts_iterations: Some(100),
            mcts_time_limit_ms: Some(100),
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SearchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn missing_budget_is_rejected() {
        let config = EngineConfig {
            mcts_iterations: None,
            mcts_time_limit_ms: None,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SearchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn bad_weights_are_rejected() {
        let config = EngineConfig {
            eval_weights: EvalWeights {
                material: 0.9,
                position: 0.05,
                mobility: 0.05,
                king_safety: 0.07,
                pawn_structure: 0.03,
            },
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SearchError::InvalidWeights(_))
        ));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: EngineConfig = serde_json::from_str(&json).unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.strategy, config.strategy);
        assert_eq!(parsed.minimax_depth, config.minimax_depth);
    }
}
