//! Integration tests for the weighted evaluator.

use peregrine::{ChessState, EvalWeights, Evaluator, SearchError};
use shakmaty::Color;

#[test]
fn default_weights_sum_to_one() {
    let weights = EvalWeights::default();
    assert!((weights.sum() - 1.0).abs() < 1e-12);
    assert!(weights.validate().is_ok());
}

#[test]
fn bad_weight_sum_is_rejected() {
    let result = EvalWeights::new(0.9, 0.05, 0.05, 0.07, 0.03);
    assert!(matches!(result, Err(SearchError::InvalidWeights(_))));
}

#[test]
fn negative_weight_is_rejected() {
    let result = EvalWeights::new(1.1, -0.1, 0.0, 0.0, 0.0);
    assert!(matches!(result, Err(SearchError::InvalidWeights(_))));
}

#[test]
fn starting_position_is_balanced() {
    let evaluator = Evaluator::default();
    let state = ChessState::new();
    let score = evaluator.evaluate(&state, Color::White).unwrap();
    assert!(score.abs() < 1e-12);
}

#[test]
fn missing_rook_shows_in_the_score() {
    // Black is down a rook.
    let state =
        ChessState::from_fen("rnbqkbn1/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQq - 0 1").unwrap();
    let evaluator = Evaluator::default();

    let white_score = evaluator.evaluate(&state, Color::White).unwrap();
    let black_score = evaluator.evaluate(&state, Color::Black).unwrap();

    assert!(white_score > 0.0);
    assert!(black_score < 0.0);
}

#[test]
fn perspectives_are_exact_negations() {
    let state = ChessState::from_fen(
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
    )
    .unwrap();
    let evaluator = Evaluator::default();

    let white_score = evaluator.evaluate(&state, Color::White).unwrap();
    let black_score = evaluator.evaluate(&state, Color::Black).unwrap();

    assert_eq!(white_score, -black_score);
}

#[test]
fn mirrored_position_negates_the_score() {
    // After 1.e4, and its color-reversed mirror (Black having played ...e5
    // from an otherwise untouched board).
    let position = ChessState::from_fen(
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
    )
    .unwrap();
    let mirror = ChessState::from_fen(
        "rnbqkbnr/pppp1ppp/8/4p3/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    )
    .unwrap();
    let evaluator = Evaluator::default();

    let score = evaluator.evaluate(&position, Color::White).unwrap();
    let mirror_score = evaluator.evaluate(&mirror, Color::White).unwrap();

    assert!((score + mirror_score).abs() < 1e-9);
}

#[test]
fn pure_material_weights_count_pawn_units() {
    // White is up exactly one pawn.
    let state =
        ChessState::from_fen("rnbqkbnr/ppppppp1/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    let weights = EvalWeights::new(1.0, 0.0, 0.0, 0.0, 0.0).unwrap();
    let evaluator = Evaluator::with_weights(weights).unwrap();

    let score = evaluator.evaluate(&state, Color::White).unwrap();
    assert!((score - 1.0).abs() < 1e-12);
}

#[test]
fn terminal_position_is_an_error() {
    let state =
        ChessState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 3")
            .unwrap();
    let evaluator = Evaluator::default();

    assert_eq!(
        evaluator.evaluate(&state, Color::White).unwrap_err(),
        SearchError::TerminalEvaluation
    );
}

#[test]
fn stalemate_is_terminal_for_evaluation() {
    // Black to move, stalemated in the corner.
    let state = ChessState::from_fen("7k/5Q2/5K2/8/8/8/8/8 b - - 0 1").unwrap();
    let evaluator = Evaluator::default();

    assert_eq!(
        evaluator.evaluate(&state, Color::White).unwrap_err(),
        SearchError::TerminalEvaluation
    );
}
