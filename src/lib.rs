//! Heuristic chess coach: a bounded alpha-beta opponent in three tiers, with
//! move classification, opening names and learning-mode feedback.

pub mod board;
pub mod chess_openings;
pub mod classify;
pub mod coach;
pub mod config;
pub mod error;
pub mod perft;
pub mod protocol;
pub mod search;
pub mod session;

pub use board::cozy::Position;
pub use board::{ChessMove, MoveGenerator};
pub use coach::{Engine, EngineMove};
pub use config::{Difficulty, EngineConfig};
pub use error::{EngineError, Result};
pub use session::{GameStatus, Mode, Session};
