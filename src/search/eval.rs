use cozy_chess::{Color, Piece};

use crate::board::MoveGenerator;

pub const PAWN: i32 = 100;
pub const KNIGHT: i32 = 320;
pub const BISHOP: i32 = 330;
pub const ROOK: i32 = 500;
pub const QUEEN: i32 = 900;
pub const KING: i32 = 20_000;

/// Bonus for the side to move keeping any castling right.
pub const CASTLING_RIGHTS_BONUS: i32 = 30;

/// Material swing above which one side is considered ahead.
pub const MATERIAL_EDGE_CP: i32 = 300;

// Piece-square tables from White's point of view, row 0 = rank 8.
// Black squares are read at `63 - i`.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,   0,   0,   0,   0,  0,  0,
    50, 50,  50,  50,  50,  50, 50, 50,
    10, 10,  20,  30,  30,  20, 10, 10,
     5,  5,  10,  25,  25,  10,  5,  5,
     0,  0,   0,  20,  20,   0,  0,  0,
     5, -5, -10,   0,   0, -10, -5,  5,
     5, 10,  10, -20, -20,  10, 10,  5,
     0,  0,   0,   0,   0,   0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN,
        Piece::Knight => KNIGHT,
        Piece::Bishop => BISHOP,
        Piece::Rook => ROOK,
        Piece::Queen => QUEEN,
        Piece::King => KING,
    }
}

fn positional(piece: Piece, table_index: usize) -> i32 {
    match piece {
        Piece::Pawn => PAWN_TABLE[table_index],
        Piece::Knight => KNIGHT_TABLE[table_index],
        _ => 0,
    }
}

// Only the side to move is looked at: White keeping a right scores +30, Black
// keeping one scores -30, so the term flips sign from ply to ply.
fn castling_term<G: MoveGenerator + ?Sized>(pos: &G) -> i32 {
    let stm = pos.side_to_move();
    if !pos.castling_rights(stm).any() {
        return 0;
    }
    if stm == Color::White { CASTLING_RIGHTS_BONUS } else { -CASTLING_RIGHTS_BONUS }
}

/// Side-agnostic evaluation in centipawns: positive means White is better.
pub fn eval_cp<G: MoveGenerator + ?Sized>(pos: &G) -> i32 {
    let grid = pos.board_squares();
    let mut score = 0;
    for (row, cells) in grid.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let Some(placed) = cell else { continue };
            let idx = row * 8 + col;
            let (sign, table_index) = match placed.color {
                Color::White => (1, idx),
                Color::Black => (-1, 63 - idx),
            };
            score += sign * (piece_value(placed.piece) + positional(placed.piece, table_index));
        }
    }
    score + castling_term(pos)
}

/// Coarse material verdict used by position analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialBalance {
    Ahead,
    Behind,
    Level,
}

pub fn material_balance(score_cp: i32) -> MaterialBalance {
    if score_cp > MATERIAL_EDGE_CP {
        MaterialBalance::Ahead
    } else if score_cp < -MATERIAL_EDGE_CP {
        MaterialBalance::Behind
    } else {
        MaterialBalance::Level
    }
}
