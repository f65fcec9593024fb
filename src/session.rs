//! A single-player game against the coach: one human side, one engine side,
//! in either computer or learning mode.

use cozy_chess::Color;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::board::cozy::Position;
use crate::board::MoveGenerator;
use crate::chess_openings::Opening;
use crate::coach::{Engine, EngineMove};
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// The engine answers every player move.
    #[default]
    Computer,
    /// Hints and position feedback are offered on the player's turn.
    Learning,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Computer => "computer",
            Mode::Learning => "learning",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "computer" => Ok(Mode::Computer),
            "learning" => Ok(Mode::Learning),
            _ => Err(EngineError::UnknownMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    YourTurn,
    ComputerThinking,
    OpponentTurn,
    YouWon,
    YouLost,
    Draw,
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::YouWon | GameStatus::YouLost | GameStatus::Draw | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameStatus::YourTurn => "Your Turn",
            GameStatus::ComputerThinking => "Computer Thinking...",
            GameStatus::OpponentTurn => "Opponent's Turn",
            GameStatus::YouWon => "You Won!",
            GameStatus::YouLost => "You Lost!",
            GameStatus::Draw => "Draw",
            GameStatus::Stalemate => "Stalemate",
        };
        f.write_str(s)
    }
}

/// What the coach says about a move the player just made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerMoveReport {
    pub san: String,
    pub feedback: Vec<String>,
    /// Opening reached by this move, if it is in the table.
    pub opening: Option<&'static Opening>,
}

pub struct Session {
    position: Position,
    engine: Engine,
    player: Color,
    mode: Mode,
    history: Vec<String>,
    current_opening: Option<&'static Opening>,
}

impl Session {
    pub fn new(engine: Engine, player: Color, mode: Mode) -> Self {
        Self::with_position(engine, player, mode, Position::startpos())
    }

    pub fn with_position(engine: Engine, player: Color, mode: Mode, position: Position) -> Self {
        info!("new {mode} session: player {player:?}, {} engine", engine.difficulty());
        Self { position, engine, player, mode, history: Vec::new(), current_opening: None }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn player(&self) -> Color {
        self.player
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Moves played so far, in SAN.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Most recent named opening reached in this game.
    pub fn current_opening(&self) -> Option<&'static Opening> {
        self.current_opening
    }

    pub fn is_players_turn(&self) -> bool {
        self.position.side_to_move() == self.player
    }

    pub fn status(&self) -> GameStatus {
        let pos = &self.position;
        if pos.is_checkmate() {
            if self.is_players_turn() { GameStatus::YouLost } else { GameStatus::YouWon }
        } else if pos.is_stalemate() {
            GameStatus::Stalemate
        } else if pos.is_draw() {
            GameStatus::Draw
        } else if self.is_players_turn() {
            GameStatus::YourTurn
        } else if self.mode == Mode::Computer {
            GameStatus::ComputerThinking
        } else {
            GameStatus::OpponentTurn
        }
    }

    fn ensure_running(&self) -> Result<()> {
        if self.status().is_over() { Err(EngineError::GameOver) } else { Ok(()) }
    }

    pub fn play_player_move(&mut self, text: &str) -> Result<PlayerMoveReport> {
        self.ensure_running()?;
        if !self.is_players_turn() {
            return Err(EngineError::NotPlayersTurn);
        }
        let mv = self.position.find_move(text)?;
        let san = self.position.san(&mv);
        let feedback = self.engine.analyze_player_move(&mut self.position, &mv);
        self.position.apply(&mv);
        self.history.push(san.clone());
        let opening = self.engine.detect_opening(&self.position);
        if opening.is_some() {
            self.current_opening = opening;
        }
        info!("player plays {san}");
        Ok(PlayerMoveReport { san, feedback, opening })
    }

    /// Lets the engine move for the side opposite the player. In learning mode
    /// this is how the other side gets played.
    pub fn play_engine_move(&mut self) -> Result<Option<EngineMove>> {
        self.ensure_running()?;
        if self.is_players_turn() {
            return Err(EngineError::NotEnginesTurn);
        }
        let Some(reply) = self.engine.best_move(&mut self.position) else {
            return Ok(None);
        };
        self.position.apply(&reply.mv);
        self.history.push(reply.notation.clone());
        if let Some(opening) = self.engine.detect_opening(&self.position) {
            self.current_opening = Some(opening);
        }
        Ok(Some(reply))
    }

    fn ensure_learning_turn(&self, action: &'static str) -> Result<()> {
        if self.mode != Mode::Learning {
            return Err(EngineError::WrongMode { action, expected: "learning" });
        }
        self.ensure_running()?;
        if !self.is_players_turn() {
            return Err(EngineError::NotPlayersTurn);
        }
        Ok(())
    }

    pub fn hint(&mut self) -> Result<Option<EngineMove>> {
        self.ensure_learning_turn("hint")?;
        Ok(self.engine.hint(&mut self.position))
    }

    pub fn learning_feedback(&mut self) -> Result<Vec<String>> {
        self.ensure_learning_turn("feedback")?;
        Ok(self.engine.analyze_position(&mut self.position))
    }

    /// Takes back the player's last move, and the reply after it when the
    /// player is to move. Returns the SANs taken back, latest first.
    pub fn undo(&mut self) -> Result<Vec<String>> {
        if self.history.is_empty() {
            return Err(EngineError::NothingToUndo);
        }
        let plies = if self.is_players_turn() { 2 } else { 1 };
        let mut taken = Vec::with_capacity(plies);
        for _ in 0..plies {
            if self.position.undo().is_none() {
                break;
            }
            if let Some(san) = self.history.pop() {
                taken.push(san);
            }
        }
        self.current_opening = self.opening_along_history();
        info!("took back {}", taken.join(" "));
        Ok(taken)
    }

    fn opening_along_history(&self) -> Option<&'static Opening> {
        let mut rewind = self.position.clone();
        while rewind.ply_count() > 0 {
            if let Some(opening) = self.engine.detect_opening(&rewind) {
                return Some(opening);
            }
            rewind.undo();
        }
        None
    }

    pub fn new_game(&mut self) {
        self.position = Position::startpos();
        self.history.clear();
        self.current_opening = None;
        info!("new game");
    }
}
