//! Error types for the coach engine.
//!
//! Errors only arise at the boundary (parsing positions and move text, session
//! rules) or when a bounded search is abandoned. Search and evaluation over an
//! accepted position are total.

use thiserror::Error;

/// Errors returned by the coach engine and the single-player session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Position string could not be parsed
    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },

    /// Move text does not name a legal move in the current position
    #[error("illegal or unrecognised move `{0}`")]
    IllegalMove(String),

    /// Player tried to move while the engine is to move
    #[error("it is not the player's turn")]
    NotPlayersTurn,

    /// Engine asked to move while the player is to move
    #[error("it is not the engine's turn")]
    NotEnginesTurn,

    /// Action requested on a finished game
    #[error("the game is already over")]
    GameOver,

    /// Action not offered in the session's mode
    #[error("{action} is only available in {expected} mode")]
    WrongMode { action: &'static str, expected: &'static str },

    /// Takeback requested with an empty move history
    #[error("there is no move to take back")]
    NothingToUndo,

    /// Search hit its deadline or was cancelled before finishing
    #[error("search abandoned before completing depth {depth}")]
    SearchAbandoned { depth: u32 },

    /// Background search thread panicked before reporting a result
    #[error("search thread panicked")]
    SearchPanicked,

    /// Difficulty name not recognised
    #[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    /// Session mode name not recognised
    #[error("unknown mode `{0}` (expected computer or learning)")]
    UnknownMode(String),

    /// Environment override could not be parsed
    #[error("invalid value `{value}` for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Result alias for coach operations
pub type Result<T> = std::result::Result<T, EngineError>;
