//! The coach engine: picks computer moves by difficulty tier and explains
//! them, and exposes the narrative helpers used by learning mode.
//!
//! An [`Engine`] holds no game state. Every call borrows the caller's
//! position, and the position is restored before the call returns.

pub mod narrative;

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::{ChessMove, MoveGenerator};
use crate::chess_openings::Opening;
use crate::classify::classify_move;
use crate::config::{Difficulty, EngineConfig};
use crate::error::Result;
use crate::search::noise::choose_uniform;
use crate::search::{SearchLimits, Searcher};

/// A chosen move with its coaching explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineMove {
    /// SAN, e.g. `Nf3`.
    pub notation: String,
    pub uci: String,
    pub explanation: String,
    /// White-positive score of the searched line; absent for the easy tier.
    pub score_cp: Option<i32>,
    #[serde(skip)]
    pub mv: ChessMove,
}

#[derive(Debug, Clone)]
pub struct Engine {
    cfg: EngineConfig,
    rng: SmallRng,
}

impl Engine {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::from_config(&EngineConfig::new(difficulty))
    }

    /// Reproducible easy-tier choices.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::from_config(&EngineConfig { seed: Some(seed), ..EngineConfig::new(difficulty) })
    }

    pub fn from_config(cfg: &EngineConfig) -> Self {
        let rng = match cfg.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self { cfg: cfg.clone(), rng }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    pub fn difficulty(&self) -> Difficulty {
        self.cfg.difficulty
    }

    /// Switches tier; the seeded picker and the move budget carry over.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.cfg.difficulty = difficulty;
    }

    /// The tier's move for the side to move, or `None` when there is no legal
    /// move. A search that overruns the configured budget also yields `None`.
    pub fn best_move<G: MoveGenerator + ?Sized>(&mut self, pos: &mut G) -> Option<EngineMove> {
        let limits = self.cfg.limits();
        match self.best_move_within(pos, &limits) {
            Ok(found) => found,
            Err(e) => {
                warn!("no move from {} engine: {e}", self.cfg.difficulty);
                None
            }
        }
    }

    /// Like [`Engine::best_move`], reporting an abandoned search as an error.
    pub fn best_move_within<G: MoveGenerator + ?Sized>(
        &mut self,
        pos: &mut G,
        limits: &SearchLimits,
    ) -> Result<Option<EngineMove>> {
        let difficulty = self.cfg.difficulty;
        let (mv, score_cp) = match difficulty.search_depth() {
            None => {
                let moves = pos.legal_moves();
                match choose_uniform(&moves, &mut self.rng) {
                    Some(mv) => (mv, None),
                    None => return Ok(None),
                }
            }
            Some(depth) => {
                let res = Searcher::new(limits).search_depth(pos, depth)?;
                match res.bestmove {
                    Some(mv) => (mv, Some(res.score_cp)),
                    None => return Ok(None),
                }
            }
        };

        let notation = pos.san(&mv);
        let explanation = explain(difficulty, &mv, &notation);
        info!("{difficulty} engine plays {notation}: {explanation}");
        Ok(Some(EngineMove { uci: mv.uci(), notation, explanation, score_cp, mv }))
    }

    /// Suggestion for the player to move; the same choice the engine would make.
    pub fn hint<G: MoveGenerator + ?Sized>(&mut self, pos: &mut G) -> Option<EngineMove> {
        self.best_move(pos)
    }

    pub fn classify<G: MoveGenerator + ?Sized>(&self, pos: &G, mv: &ChessMove) -> Vec<String> {
        debug_assert!(pos.legal_moves().contains(mv), "classify called with an illegal move");
        classify_move(mv)
    }

    pub fn detect_opening<G: MoveGenerator + ?Sized>(&self, pos: &G) -> Option<&'static Opening> {
        narrative::detect_opening(pos)
    }

    pub fn analyze_player_move<G: MoveGenerator + ?Sized>(&self, pos: &mut G, mv: &ChessMove) -> Vec<String> {
        narrative::analyze_player_move(pos, mv)
    }

    pub fn analyze_position<G: MoveGenerator + ?Sized>(&self, pos: &mut G) -> Vec<String> {
        narrative::analyze_position(pos)
    }
}

/// Tier-flavoured one-liner for a chosen move.
pub fn explain(difficulty: Difficulty, mv: &ChessMove, san: &str) -> String {
    let tags = classify_move(mv);
    let first = tags.first();
    match difficulty {
        Difficulty::Easy => match first {
            Some(tag) => tag.clone(),
            None => format!("Playing {san}"),
        },
        Difficulty::Medium => match first {
            Some(tag) => format!("{tag} (Tactical play)"),
            None => format!("Strong move: {san}"),
        },
        Difficulty::Hard => {
            if mv.is_capture() {
                format!("Winning material with {san}")
            } else if let Some(tag) = first {
                format!("{tag} (Strategic depth)")
            } else {
                format!("Optimal move: {san}")
            }
        }
    }
}
