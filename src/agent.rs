//! Move-selection agents.
//!
//! Each strategy (minimax, MCTS, random baseline) is an independent
//! implementation of the [`Agent`] capability interface; the caller picks
//! one through the configuration layer. The opening-book short-circuit is a
//! guard clause at the top of each search-backed agent.

use crate::errors::SearchError;
use crate::eval::Evaluator;
use crate::mcts::{mcts_search, MctsConfig, MctsStats};
use crate::openings::OpeningBook;
use crate::search::MinimaxSearcher;
use crate::state::ChessState;
use rand::prelude::*;
use rand::rngs::StdRng;
use shakmaty::Move;

/// Interface all move-selection strategies implement.
pub trait Agent {
    fn name(&self) -> &str;

    /// Proposes a move for the side to move at `state`. A terminal position
    /// is a precondition violation, reported as `NoLegalMoves`.
    fn propose_move(&mut self, state: &ChessState) -> Result<Move, SearchError>;
}

/// Alpha-beta agent with integrated opening book.
pub struct MinimaxAgent<'a> {
    searcher: MinimaxSearcher<'a>,
    name: String,
}

impl<'a> MinimaxAgent<'a> {
    pub fn new(
        depth: u32,
        evaluator: &'a Evaluator,
        book: Option<&'a OpeningBook>,
    ) -> Result<MinimaxAgent<'a>, SearchError> {
        let searcher = MinimaxSearcher::new(depth, evaluator, book)?;
        Ok(MinimaxAgent {
            name: format!("Minimax(depth={})", depth),
            searcher,
        })
    }

    pub fn nodes_evaluated(&self) -> u64 {
        self.searcher.nodes_evaluated()
    }
}

impl Agent for MinimaxAgent<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn propose_move(&mut self, state: &ChessState) -> Result<Move, SearchError> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        if moves.len() == 1 {
            return Ok(moves.into_iter().next().expect("len checked"));
        }
        self.searcher.search(state)
    }
}

/// MCTS agent. Owns its rollout RNG, seeded from the configuration for
/// reproducible searches; consults the opening book before building a tree.
pub struct MctsAgent<'a> {
    evaluator: &'a Evaluator,
    book: Option<&'a OpeningBook>,
    config: MctsConfig,
    rng: StdRng,
    name: String,
    last_stats: Option<MctsStats>,
}

impl<'a> MctsAgent<'a> {
    pub fn new(
        config: MctsConfig,
        evaluator: &'a Evaluator,
        book: Option<&'a OpeningBook>,
    ) -> Result<MctsAgent<'a>, SearchError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(MctsAgent {
            evaluator,
            book,
            name: format!("MCTS({:?})", config.budget),
            config,
            rng,
            last_stats: None,
        })
    }

    /// Statistics from the last full tree search; `None` if the last move
    /// came from the opening book or the single-reply fast path.
    pub fn last_stats(&self) -> Option<&MctsStats> {
        self.last_stats.as_ref()
    }
}

impl Agent for MctsAgent<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn propose_move(&mut self, state: &ChessState) -> Result<Move, SearchError> {
        self.last_stats = None;

        if let Some(book) = self.book {
            if let Some(mv) = book.lookup(state) {
                return Ok(mv);
            }
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        if moves.len() == 1 {
            return Ok(moves.into_iter().next().expect("len checked"));
        }

        let (best, stats, _root) = mcts_search(state, self.evaluator, &self.config, &mut self.rng)?;
        self.last_stats = Some(stats);
        Ok(best)
    }
}

/// Uniform random baseline.
pub struct RandomAgent {
    rng: StdRng,
    name: String,
}

impl RandomAgent {
    pub fn new(seed: Option<u64>) -> RandomAgent {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        RandomAgent {
            rng,
            name: "Random".to_string(),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn propose_move(&mut self, state: &ChessState) -> Result<Move, SearchError> {
        state
            .legal_moves()
            .choose(&mut self.rng)
            .cloned()
            .ok_or(SearchError::NoLegalMoves)
    }
}
