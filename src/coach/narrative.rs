//! Coaching text: opening names, feedback on a player's move, and a survey of
//! the current position for learning mode.

use crate::board::{Applied, ChessMove, MoveGenerator};
use crate::chess_openings::{self, Opening};
use crate::classify::classify_move;
use crate::search::eval::{eval_cp, material_balance, MaterialBalance};

/// Openings are only announced this early in the game.
pub const OPENING_WINDOW_PLIES: usize = 10;

pub const IN_CHECK_WARNING: &str = "⚠️ You are in check! You must move your king or block the attack.";
pub const MATERIAL_AHEAD: &str = "📊 You have a material advantage!";
pub const MATERIAL_BEHIND: &str = "📊 You are behind in material. Look for tactics!";
pub const MATERIAL_LEVEL: &str = "⚖️ Material is roughly equal. Focus on position!";

const CAPTURES_LISTED: usize = 3;

pub fn detect_opening<G: MoveGenerator + ?Sized>(pos: &G) -> Option<&'static Opening> {
    chess_openings::lookup(&pos.canonical_key())
}

/// Tags for `mv`, followed by the opening it reaches when it is played within
/// the opening window.
pub fn analyze_player_move<G: MoveGenerator + ?Sized>(pos: &mut G, mv: &ChessMove) -> Vec<String> {
    let mut feedback = classify_move(mv);
    let after = Applied::new(pos, mv);
    if after.ply_count() <= OPENING_WINDOW_PLIES {
        if let Some(opening) = detect_opening(&*after) {
            feedback.push(format!("📖 {}: {}", opening.name, opening.description));
        }
    }
    feedback
}

/// Check warning, the first mate in one, a few captures and a material verdict.
pub fn analyze_position<G: MoveGenerator + ?Sized>(pos: &mut G) -> Vec<String> {
    let mut feedback = Vec::new();
    let in_check = pos.is_check();
    if in_check {
        feedback.push(IN_CHECK_WARNING.to_string());
    }

    let moves = pos.legal_moves();
    if let Some(san) = first_mate_in_one(pos, &moves) {
        feedback.push(format!("✨ Checkmate available with {san}!"));
    }

    if !in_check {
        let captures: Vec<String> =
            moves.iter().filter(|m| m.is_capture()).take(CAPTURES_LISTED).map(|m| pos.san(m)).collect();
        if !captures.is_empty() {
            feedback.push(format!("💡 Possible captures: {}", captures.join(", ")));
        }
    }

    let verdict = match material_balance(eval_cp(pos)) {
        MaterialBalance::Ahead => MATERIAL_AHEAD,
        MaterialBalance::Behind => MATERIAL_BEHIND,
        MaterialBalance::Level => MATERIAL_LEVEL,
    };
    feedback.push(verdict.to_string());
    feedback
}

fn first_mate_in_one<G: MoveGenerator + ?Sized>(pos: &mut G, moves: &[ChessMove]) -> Option<String> {
    for mv in moves {
        let san = pos.san(mv);
        let mates = Applied::new(pos, mv).is_checkmate();
        if mates {
            return Some(san);
        }
    }
    None
}
