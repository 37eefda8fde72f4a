//! Random-policy rollouts for the simulation phase.

use crate::errors::SearchError;
use crate::eval::Evaluator;
use crate::state::ChessState;
use rand::prelude::*;
use rand::rngs::StdRng;
use shakmaty::{Color, Outcome};

/// Safety cap on rollout length, in plies. Bounds worst-case cost; a rollout
/// that reaches the cap without terminating falls back to the evaluator.
pub const ROLLOUT_DEPTH_CAP: u32 = 100;

/// Divisor applied to the evaluator's pawn-unit score before squashing it
/// into the reward range with `tanh`.
const EVAL_SQUASH_SCALE: f64 = 10.0;

/// Plays uniformly random moves from `state` until a terminal position or
/// the depth cap. Returns a reward in [-1, 1] from the perspective of the
/// player to move at `state`: +1 win, 0 draw, -1 loss, or the squashed
/// evaluator score when the cap was hit first.
pub fn simulate_random_rollout(
    state: &ChessState,
    evaluator: &Evaluator,
    rng: &mut StdRng,
) -> Result<f64, SearchError> {
    let perspective = state.turn();
    let mut current = state.clone();

    for _ in 0..ROLLOUT_DEPTH_CAP {
        if current.is_terminal() {
            break;
        }
        let moves = current.legal_moves();
        let mv = moves
            .choose(rng)
            .cloned()
            .expect("non-terminal position must have a legal move");
        current = current.apply(&mv)?;
    }

    match current.outcome() {
        Some(outcome) => Ok(outcome_reward(outcome, perspective)),
        None => {
            let score = evaluator.evaluate(&current, perspective)?;
            Ok((score / EVAL_SQUASH_SCALE).tanh())
        }
    }
}

/// Maps a terminal outcome to a scalar reward for `perspective`.
pub fn outcome_reward(outcome: Outcome, perspective: Color) -> f64 {
    match outcome {
        Outcome::Decisive { winner } if winner == perspective => 1.0,
        Outcome::Decisive { .. } => -1.0,
        Outcome::Draw => 0.0,
    }
}
