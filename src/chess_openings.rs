//! Named openings keyed by piece placement (the first FEN field).
//! The table is static; lookups ignore side to move, castling and counters.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Opening {
    pub name: &'static str,
    pub description: &'static str,
}

struct BookEntry {
    key: &'static str,
    opening: Opening,
}

const fn entry(key: &'static str, name: &'static str, description: &'static str) -> BookEntry {
    BookEntry { key, opening: Opening { name, description } }
}

static OPENING_BOOK: &[BookEntry] = &[
    entry(
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR",
        "King's Pawn Opening",
        "The most popular first move, controlling the center",
    ),
    entry(
        "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR",
        "Queen's Pawn Opening",
        "Solid opening, preparing for a strong center",
    ),
    entry(
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR",
        "Open Game",
        "Both sides fight for the center with pawns",
    ),
    entry(
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R",
        "King's Knight Opening",
        "Developing the knight to attack the center",
    ),
    entry(
        "rnbqkb1r/pppp1ppp/5n2/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R",
        "Petrov Defense",
        "Symmetrical defense, solid but passive",
    ),
    entry(
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R",
        "Italian Game (start)",
        "Classical opening aiming for rapid development",
    ),
    entry(
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR",
        "Sicilian Defense",
        "Asymmetrical reply fighting for d4 from the flank",
    ),
    entry(
        "rnbqkbnr/pppp1ppp/4p3/8/4P3/8/PPPP1PPP/RNBQKBNR",
        "French Defense",
        "Solid pawn chain, preparing ...d5 to challenge the center",
    ),
    entry(
        "rnbqkbnr/pp1ppppp/2p5/8/4P3/8/PPPP1PPP/RNBQKBNR",
        "Caro-Kann Defense",
        "Preparing ...d5 while keeping the light-squared bishop free",
    ),
    entry(
        "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR",
        "Scandinavian Defense",
        "Immediate strike at the e4 pawn",
    ),
    entry(
        "rnbqkb1r/pppppppp/5n2/8/4P3/8/PPPP1PPP/RNBQKBNR",
        "Alekhine's Defense",
        "Provoking White's pawns forward to attack them later",
    ),
    entry(
        "rnbqkb1r/ppp1pppp/3p1n2/8/3PP3/8/PPP2PPP/RNBQKBNR",
        "Pirc Defense",
        "Hypermodern setup inviting a broad white center",
    ),
    entry(
        "rnbqkbnr/pppppppp/8/8/2P5/8/PP1PPPPP/RNBQKBNR",
        "English Opening",
        "Flank opening controlling d5 from the side",
    ),
    entry(
        "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R",
        "Réti Opening",
        "Flexible knight development keeping pawn options open",
    ),
    entry(
        "rnbqkbnr/ppppp1pp/8/5p2/3P4/8/PPP1PPPP/RNBQKBNR",
        "Dutch Defense",
        "Aggressive kingside stance against the queen's pawn",
    ),
    entry(
        "rnbqkb1r/pppppppp/5n2/8/3P4/8/PPP1PPPP/RNBQKBNR",
        "Indian Defense",
        "Knight first, keeping Black's pawn structure flexible",
    ),
    entry(
        "rnbqkbnr/ppp1pppp/8/3p4/2PP4/8/PP2PPPP/RNBQKBNR",
        "Queen's Gambit",
        "Offering a wing pawn to pull Black's pawn from the center",
    ),
    entry(
        "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R",
        "Ruy Lopez",
        "Pressure on the knight that defends e5",
    ),
    entry(
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R",
        "Italian Game",
        "Bishop aims at f7, the weakest point in Black's camp",
    ),
    entry(
        "r1bqkbnr/pppp1ppp/2n5/4p3/3PP3/5N2/PPP2PPP/RNBQKB1R",
        "Scotch Game",
        "Opening the center at once with d4",
    ),
    entry(
        "rnbqkbnr/pppp1ppp/8/4p3/4PP2/8/PPPP2PP/RNBQKBNR",
        "King's Gambit",
        "Sacrificing a pawn for rapid development and the f-file",
    ),
    entry(
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/2N5/PPPP1PPP/R1BQKBNR",
        "Vienna Game",
        "Knight supports a later f4 pawn break",
    ),
];

/// Looks up a placement-only key.
pub fn lookup(key: &str) -> Option<&'static Opening> {
    OPENING_BOOK.iter().find(|e| e.key == key).map(|e| &e.opening)
}

/// All table entries as `(key, opening)`.
pub fn openings() -> impl Iterator<Item = (&'static str, &'static Opening)> {
    OPENING_BOOK.iter().map(|e| (e.key, &e.opening))
}
