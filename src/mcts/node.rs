//! Defines the node structure for the MCTS tree.
//!
//! Children are owned exclusively by their parent through `Rc` handles held
//! only in the parent's `children` vector; the parent link is a `Weak`
//! back-reference used solely for backpropagation, never for lifetime
//! management. The whole tree for one move decision is dropped at once when
//! the best move has been extracted.

use crate::state::ChessState;
use shakmaty::Move;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A node in the Monte Carlo search tree.
#[derive(Debug)]
pub struct MctsNode {
    /// The position at this node.
    pub state: ChessState,

    /// The move that led to this position (`None` for the root).
    pub action: Option<Move>,

    /// Number of backpropagation passes that have touched this node.
    pub visits: u32,

    /// Accumulated value, from the perspective of the player to move at the
    /// parent (the player who chose `action`).
    pub total_value: f64,

    /// Non-owning link to the parent; `None` for the root.
    pub parent: Option<Weak<RefCell<MctsNode>>>,

    /// Expanded children, in expansion order.
    pub children: Vec<Rc<RefCell<MctsNode>>>,

    /// Legal moves not yet expanded into children. Stored reversed so that
    /// `pop` yields them in legal-move order, keeping expansion
    /// deterministic.
    pub untried_moves: Vec<Move>,

    /// Whether the position is terminal (no legal continuation).
    pub is_terminal: bool,
}

impl MctsNode {
    /// Creates the root node for a search, with every legal move untried.
    pub fn new_root(state: ChessState) -> Rc<RefCell<Self>> {
        let mut untried = state.legal_moves();
        untried.reverse();
        let is_terminal = untried.is_empty();
        Rc::new(RefCell::new(MctsNode {
            state,
            action: None,
            visits: 0,
            total_value: 0.0,
            parent: None,
            children: Vec::new(),
            untried_moves: untried,
            is_terminal,
        }))
    }

    /// Creates a child node reached by playing `action` from the parent.
    pub fn new_child(
        parent: Weak<RefCell<MctsNode>>,
        action: Move,
        state: ChessState,
    ) -> Rc<RefCell<Self>> {
        let mut untried = state.legal_moves();
        untried.reverse();
        let is_terminal = untried.is_empty();
        Rc::new(RefCell::new(MctsNode {
            state,
            action: Some(action),
            visits: 0,
            total_value: 0.0,
            parent: Some(parent),
            children: Vec::new(),
            untried_moves: untried,
            is_terminal,
        }))
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried_moves.is_empty()
    }

    /// Next untried move, in legal-move order.
    pub fn pop_untried_move(&mut self) -> Option<Move> {
        self.untried_moves.pop()
    }

    /// UCT score of this node as a candidate child: exploitation term `Q/N`
    /// plus the exploration bonus. An unvisited node scores infinity so it
    /// is always selected first.
    pub fn uct_value(&self, parent_visits: u32, exploration_constant: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let q_value = self.total_value / self.visits as f64;
        let exploration =
            exploration_constant * ((parent_visits as f64).ln() / self.visits as f64).sqrt();
        q_value + exploration
    }

    /// Child with the highest UCT score. Must not be called on a childless
    /// node; the selection loop guarantees that.
    pub fn select_best_child(&self, exploration_constant: f64) -> Rc<RefCell<MctsNode>> {
        let parent_visits = self.visits;
        self.children
            .iter()
            .max_by(|a, b| {
                let ua = a.borrow().uct_value(parent_visits, exploration_constant);
                let ub = b.borrow().uct_value(parent_visits, exploration_constant);
                ua.partial_cmp(&ub).unwrap_or(std::cmp::Ordering::Equal)
            })
            .cloned()
            .expect("select_best_child called on node with no children")
    }

    /// Walks from `node` back to the root, updating statistics. `reward` is
    /// from the perspective of the player to move at `node`; since each
    /// node's value is scored from its parent mover's perspective, the sign
    /// flips before the first update and again at every step up.
    pub fn backpropagate(node: Rc<RefCell<MctsNode>>, reward: f64) {
        let mut value = -reward;
        let mut current = Some(node);
        while let Some(rc) = current {
            {
                let mut n = rc.borrow_mut();
                n.visits += 1;
                n.total_value += value;
            }
            value = -value;
            current = {
                let n = rc.borrow();
                n.parent.as_ref().and_then(|weak| weak.upgrade())
            };
        }
    }

    /// Total nodes in the subtree rooted here, for search statistics.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|c| c.borrow().subtree_size())
            .sum::<usize>()
    }
}
