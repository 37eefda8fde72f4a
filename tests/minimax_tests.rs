//! Integration tests for the alpha-beta searcher.

use peregrine::{Agent, ChessState, Evaluator, MinimaxAgent, MinimaxSearcher, OpeningBook, SearchError};

#[test]
fn zero_depth_is_rejected() {
    let evaluator = Evaluator::default();
    assert!(matches!(
        MinimaxSearcher::new(0, &evaluator, None),
        Err(SearchError::InvalidDepth(0))
    ));
}

#[test]
fn finds_mate_in_one() {
    // Scholar's mate pattern: Qh5xf7 is mate, supported by the c4 bishop.
    let state = ChessState::from_fen(
        "r1bqkbnr/pppp1ppp/2n5/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 3",
    )
    .unwrap();
    let evaluator = Evaluator::default();
    let mut searcher = MinimaxSearcher::new(2, &evaluator, None).unwrap();

    let best = searcher.search(&state).unwrap();
    assert_eq!(state.move_to_uci(&best), "h5f7");
}

#[test]
fn captures_a_hanging_queen() {
    let state = ChessState::from_fen("k7/8/8/3q4/4P3/8/8/7K w - - 0 1").unwrap();
    let evaluator = Evaluator::default();
    let mut searcher = MinimaxSearcher::new(2, &evaluator, None).unwrap();

    let best = searcher.search(&state).unwrap();
    assert_eq!(state.move_to_uci(&best), "e4d5");
}

#[test]
fn search_is_deterministic() {
    let state = ChessState::from_fen(
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
    )
    .unwrap();
    let evaluator = Evaluator::default();
    let mut searcher = MinimaxSearcher::new(2, &evaluator, None).unwrap();

    let first = searcher.search(&state).unwrap();
    let second = searcher.search(&state).unwrap();
    assert_eq!(state.move_to_uci(&first), state.move_to_uci(&second));
}

#[test]
fn terminal_root_is_an_error() {
    let state =
        ChessState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 3")
            .unwrap();
    let evaluator = Evaluator::default();
    let mut searcher = MinimaxSearcher::new(3, &evaluator, None).unwrap();

    assert_eq!(searcher.search(&state).unwrap_err(), SearchError::NoLegalMoves);
}

#[test]
fn book_hit_skips_the_search() {
    let evaluator = Evaluator::default();
    let book = OpeningBook::new();
    let mut searcher = MinimaxSearcher::new(3, &evaluator, Some(&book)).unwrap();

    let state = ChessState::new();
    let best = searcher.search(&state).unwrap();

    assert_eq!(state.move_to_uci(&best), "e2e4");
    assert_eq!(searcher.nodes_evaluated(), 0);
}

#[test]
fn off_book_position_is_searched() {
    // 1.a3 is not a booked line.
    let state = ChessState::new();
    let mv = state.parse_uci("a2a3").unwrap();
    let state = state.apply(&mv).unwrap();

    let evaluator = Evaluator::default();
    let book = OpeningBook::new();
    let mut searcher = MinimaxSearcher::new(2, &evaluator, Some(&book)).unwrap();

    let best = searcher.search(&state).unwrap();
    assert!(searcher.nodes_evaluated() > 0);
    assert!(state
        .legal_moves()
        .iter()
        .any(|m| state.move_to_uci(m) == state.move_to_uci(&best)));
}

#[test]
fn forced_move_is_returned_without_search() {
    // White is in check from the a1 rook; Kg2 is the only legal move (h2 is
    // covered by the g3 pawn, g1 by the rook). The single-reply fast path
    // answers before the searcher runs, whatever the depth.
    let state = ChessState::from_fen("k7/8/8/8/8/6p1/8/r6K w - - 0 1").unwrap();
    let evaluator = Evaluator::default();
    let mut agent = MinimaxAgent::new(5, &evaluator, None).unwrap();

    let mv = agent.propose_move(&state).unwrap();

    assert_eq!(state.move_to_uci(&mv), "h1g2");
    assert_eq!(agent.nodes_evaluated(), 0);
}

#[test]
fn deeper_search_visits_more_nodes() {
    let state = ChessState::from_fen(
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
    )
    .unwrap();
    let evaluator = Evaluator::default();

    let mut shallow = MinimaxSearcher::new(1, &evaluator, None).unwrap();
    shallow.search(&state).unwrap();
    let shallow_nodes = shallow.nodes_evaluated();

    let mut deep = MinimaxSearcher::new(3, &evaluator, None).unwrap();
    deep.search(&state).unwrap();
    let deep_nodes = deep.nodes_evaluated();

    assert!(deep_nodes > shallow_nodes);
}
