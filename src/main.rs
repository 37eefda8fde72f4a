//! Demo binary: plays one game of Minimax vs. MCTS and prints the moves.

use peregrine::{
    play_game, EngineConfig, Evaluator, OpeningBook, SearchStrategy, DEFAULT_MAX_PLIES,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let evaluator = Evaluator::default();
    let book = OpeningBook::new();

    let white_config = EngineConfig {
        strategy: SearchStrategy::Minimax,
        minimax_depth: 2,
        ..EngineConfig::default()
    };
    let black_config = EngineConfig {
        strategy: SearchStrategy::Mcts,
        mcts_iterations: Some(400),
        seed: Some(7),
        ..EngineConfig::default()
    };

    let mut white = white_config.build_agent(&evaluator, &book)?;
    let mut black = black_config.build_agent(&evaluator, &book)?;

    println!("{} (White) vs {} (Black)", white.name(), black.name());

    let record = play_game(white.as_mut(), black.as_mut(), DEFAULT_MAX_PLIES)?;

    for (i, pair) in record.moves.chunks(2).enumerate() {
        match pair {
            [w, b] => println!("{:3}. {} {}", i + 1, w, b),
            [w] => println!("{:3}. {}", i + 1, w),
            _ => {}
        }
    }
    println!("result: {:?} in {} plies", record.result, record.plies);
    Ok(())
}
