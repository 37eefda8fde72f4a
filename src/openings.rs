//! Static opening book.
//!
//! A read-only mapping from canonical position encodings to precomputed
//! replies, built once at startup and consulted before either search engine
//! runs. Lookup is an exact match on [`ChessState::encode`] output, so a
//! position reached by transposition hits the book whenever its encoding is
//! identical to a booked line; a miss is ordinary control flow, not an
//! error.
//!
//! Where two lines share a position with different replies (the Italian and
//! the Ruy Lopez diverge at White's third move), the later-inserted line
//! wins.

use crate::state::ChessState;
use shakmaty::Move;
use std::collections::HashMap;

/// One booked reply: the move in UCI notation plus the name of the line it
/// belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningEntry {
    pub uci: String,
    pub name: String,
}

/// The opening book. Holds no interior mutability; safe for unsynchronized
/// concurrent reads.
#[derive(Debug, Clone)]
pub struct OpeningBook {
    entries: HashMap<String, OpeningEntry>,
}

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";

impl OpeningBook {
    /// Builds the book with the supported named lines, each booked along the
    /// encodings of the positions its first few plies actually reach.
    pub fn new() -> OpeningBook {
        let mut book = OpeningBook {
            entries: HashMap::new(),
        };

        // Italian Game: 1.e4 e5 2.Nf3 Nc6 3.Bc4
        book.add_line(
            "Italian Game",
            &[
                (START, "e2e4"),
                ("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq -", "e7e5"),
                ("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq -", "g1f3"),
                ("rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq -", "b8c6"),
                ("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq -", "f1c4"),
            ],
        );

        // Ruy Lopez: 1.e4 e5 2.Nf3 Nc6 3.Bb5 (diverges from the Italian at
        // White's third move and takes precedence for it).
        book.add_line(
            "Ruy Lopez",
            &[
                (START, "e2e4"),
                ("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq -", "e7e5"),
                ("rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq -", "b8c6"),
                ("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq -", "f1b5"),
            ],
        );

        // French Defense: 1.e4 e6 2.d4
        book.add_line(
            "French Defense",
            &[
                (START, "e2e4"),
                ("rnbqkbnr/pppp1ppp/4p3/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq -", "d2d4"),
            ],
        );

        // Sicilian Dragon skeleton: 1.e4 c5 2.Nf3 d6 3.d4
        book.add_line(
            "Sicilian Dragon",
            &[
                (START, "e2e4"),
                ("rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq -", "g1f3"),
                ("rnbqkbnr/pp2pppp/3p4/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq -", "d2d4"),
            ],
        );

        // Caro-Kann Defense: 1.e4 c6 2.d4
        book.add_line(
            "Caro-Kann Defense",
            &[
                (START, "e2e4"),
                ("rnbqkbnr/pp1ppppp/2p5/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq -", "d2d4"),
            ],
        );

        // English Opening: 1.c4, meeting 1...e5 with 2.Nc3 and the
        // Symmetrical 1...c5 with 2.Nf3.
        book.add_line(
            "English Opening",
            &[
                (START, "c2c4"),
                ("rnbqkbnr/pppp1ppp/8/4p3/2P5/8/PP1PPPPP/RNBQKBNR w KQkq -", "b1c3"),
                ("rnbqkbnr/pp1ppppp/8/2p5/2P5/8/PP1PPPPP/RNBQKBNR w KQkq -", "g1f3"),
            ],
        );

        // Queen's Gambit: 1.d4 d5 2.c4
        book.add_line(
            "Queen's Gambit",
            &[
                (START, "d2d4"),
                ("rnbqkbnr/ppp1pppp/8/3p4/3P4/8/PPP1PPPP/RNBQKBNR w KQkq -", "c2c4"),
            ],
        );

        // Indian Defense: 1.d4 Nf6 2.c4
        book.add_line(
            "Indian Defense",
            &[
                (START, "d2d4"),
                ("rnbqkb1r/pppppppp/5n2/8/3P4/8/PPP1PPPP/RNBQKBNR w KQkq -", "c2c4"),
            ],
        );

        // Scandinavian Defense: 1.e4 d5 2.exd5
        book.add_line(
            "Scandinavian Defense",
            &[
                (START, "e2e4"),
                ("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq -", "e4d5"),
            ],
        );

        // Alekhine's Defense: 1.e4 Nf6 2.e5 (last writer for the starting
        // position, so the book opens with the king-pawn advance).
        book.add_line(
            "Alekhine's Defense",
            &[
                (START, "e2e4"),
                ("rnbqkb1r/pppppppp/5n2/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq -", "e4e5"),
            ],
        );

        book
    }

    fn add_line(&mut self, name: &str, entries: &[(&str, &str)]) {
        for (encoding, uci) in entries {
            self.entries.insert(
                (*encoding).to_string(),
                OpeningEntry {
                    uci: (*uci).to_string(),
                    name: name.to_string(),
                },
            );
        }
    }

    /// Looks up the booked reply for a position. Returns `None` on a miss or
    /// if the stored move is not legal in the position (which would indicate
    /// a corrupt entry and is treated as a miss).
    pub fn lookup(&self, state: &ChessState) -> Option<Move> {
        let entry = self.entries.get(&state.encode())?;
        state.parse_uci(&entry.uci)
    }

    /// The raw entry for a position, including the line name.
    pub fn entry(&self, state: &ChessState) -> Option<&OpeningEntry> {
        self.entries.get(&state.encode())
    }

    pub fn contains(&self, state: &ChessState) -> bool {
        self.entries.contains_key(&state.encode())
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Distinct line names, sorted, for reporting.
    pub fn lines(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .values()
            .map(|e| e.name.clone())
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();
        names.sort();
        names
    }
}

impl Default for OpeningBook {
    fn default() -> Self {
        OpeningBook::new()
    }
}
