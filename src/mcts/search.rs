//! The four-phase MCTS loop: selection, expansion, simulation,
//! backpropagation.

use crate::errors::SearchError;
use crate::eval::Evaluator;
use crate::mcts::node::MctsNode;
use crate::mcts::simulation::{outcome_reward, simulate_random_rollout};
use crate::mcts::EXPLORATION_CONSTANT;
use crate::state::ChessState;
use rand::rngs::StdRng;
use shakmaty::Move;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Search budget: a fixed iteration count or a wall-clock limit. The two are
/// mutually exclusive by construction. Wall-clock budgets are enforced
/// between iterations only; a rollout in progress is never interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBudget {
    Iterations(u32),
    TimeLimit(Duration),
}

impl SearchBudget {
    pub fn validate(&self) -> Result<(), SearchError> {
        match self {
            SearchBudget::Iterations(0) => Err(SearchError::InvalidBudget(
                "iteration budget must be at least 1".to_string(),
            )),
            SearchBudget::TimeLimit(t) if t.is_zero() => Err(SearchError::InvalidBudget(
                "time budget must be positive".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn exhausted(&self, iterations: u32, start: Instant) -> bool {
        match self {
            SearchBudget::Iterations(max) => iterations >= *max,
            SearchBudget::TimeLimit(limit) => start.elapsed() >= *limit,
        }
    }
}

/// MCTS configuration. Validated eagerly; an invalid budget or exploration
/// constant is a fatal configuration error, never retried.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    pub budget: SearchBudget,
    pub exploration_constant: f64,
    /// RNG seed for the rollout policy. `None` seeds from entropy; tests
    /// pass a fixed seed for reproducible searches.
    pub seed: Option<u64>,
}

impl MctsConfig {
    pub fn new(budget: SearchBudget) -> Result<MctsConfig, SearchError> {
        let config = MctsConfig {
            budget,
            ..MctsConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        self.budget.validate()?;
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration constant must be a non-negative real, got {}",
                self.exploration_constant
            )));
        }
        Ok(())
    }
}

impl Default for MctsConfig {
    fn default() -> Self {
        MctsConfig {
            budget: SearchBudget::Iterations(1000),
            exploration_constant: EXPLORATION_CONSTANT,
            seed: None,
        }
    }
}

/// Statistics from one completed search.
#[derive(Debug, Clone, Default)]
pub struct MctsStats {
    pub iterations: u32,
    pub tree_size: usize,
    pub search_time: Duration,
}

/// Runs MCTS from `state` until the budget is exhausted and returns the move
/// to the most-visited root child (first-encountered on ties), along with
/// search statistics and the root of the tree for inspection.
pub fn mcts_search(
    state: &ChessState,
    evaluator: &Evaluator,
    config: &MctsConfig,
    rng: &mut StdRng,
) -> Result<(Move, MctsStats, Rc<RefCell<MctsNode>>), SearchError> {
    config.validate()?;
    if state.legal_moves().is_empty() {
        return Err(SearchError::NoLegalMoves);
    }

    let start = Instant::now();
    let root = MctsNode::new_root(state.clone());
    let mut iterations = 0u32;

    // At least one iteration always runs, so even the shortest time budget
    // yields a visited root child.
    loop {
        run_iteration(&root, evaluator, config.exploration_constant, rng)?;
        iterations += 1;
        if config.budget.exhausted(iterations, start) {
            break;
        }
    }

    let stats = MctsStats {
        iterations,
        tree_size: root.borrow().subtree_size(),
        search_time: start.elapsed(),
    };

    let best = best_root_move(&root).ok_or(SearchError::NoLegalMoves)?;
    Ok((best, stats, root))
}

fn run_iteration(
    root: &Rc<RefCell<MctsNode>>,
    evaluator: &Evaluator,
    exploration_constant: f64,
    rng: &mut StdRng,
) -> Result<(), SearchError> {
    // Selection: descend while fully expanded and non-terminal.
    let mut node = Rc::clone(root);
    loop {
        let descend = {
            let n = node.borrow();
            !n.is_terminal && n.is_fully_expanded() && !n.children.is_empty()
        };
        if !descend {
            break;
        }
        let next = node.borrow().select_best_child(exploration_constant);
        node = next;
    }

    // Expansion: take the next untried move, if any.
    let untried = node.borrow_mut().pop_untried_move();
    if let Some(mv) = untried {
        let next_state = node.borrow().state.apply(&mv)?;
        let child = MctsNode::new_child(Rc::downgrade(&node), mv, next_state);
        node.borrow_mut().children.push(Rc::clone(&child));
        node = child;
    }

    // Simulation: terminal positions short-circuit to their exact outcome.
    let reward = {
        let n = node.borrow();
        match n.state.outcome() {
            Some(outcome) => outcome_reward(outcome, n.state.turn()),
            None => simulate_random_rollout(&n.state, evaluator, rng)?,
        }
    };

    // Backpropagation.
    MctsNode::backpropagate(node, reward);
    Ok(())
}

/// Most-visited root child, first-encountered on ties (strict comparison).
fn best_root_move(root: &Rc<RefCell<MctsNode>>) -> Option<Move> {
    let root_ref = root.borrow();
    let mut best: Option<(u32, Move)> = None;
    for child in &root_ref.children {
        let c = child.borrow();
        let better = match &best {
            Some((visits, _)) => c.visits > *visits,
            None => true,
        };
        if better {
            let action = c.action.clone()?;
            best = Some((c.visits, action));
        }
    }
    best.map(|(_, mv)| mv)
}
