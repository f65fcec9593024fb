//! Move generator capability and the move vocabulary shared by search,
//! classification and narrative.
//!
//! The core never implements chess rules. It talks to a rules-correct backend
//! through [`MoveGenerator`]; [`cozy::Position`] is the backend shipped with the
//! crate.

pub mod cozy;

use cozy_chess::{Color, Piece, Square};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Special-move markers carried by a generated move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MoveFlags {
    pub castle_kingside: bool,
    pub castle_queenside: bool,
    pub en_passant: bool,
    pub promotion: bool,
}

impl MoveFlags {
    pub fn is_castle(&self) -> bool {
        self.castle_kingside || self.castle_queenside
    }
}

/// A legal move in verbose form.
///
/// Castling is expressed as the king's two-square step (`e1g1`), en passant
/// reports a captured pawn even though the destination square is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promotion: Option<Piece>,
    pub flags: MoveFlags,
}

impl ChessMove {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Coordinate notation, e.g. `e2e4` or `e7e8q`.
    pub fn uci(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(p) = self.promotion {
            write!(f, "{}", piece_letter(p).to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Piece and owner on an occupied square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedPiece {
    pub piece: Piece,
    pub color: Color,
}

/// 8x8 grid; row 0 is rank 8 and column 0 is file a.
pub type BoardGrid = [[Option<PlacedPiece>; 8]; 8];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CastlingRights {
    pub kingside: bool,
    pub queenside: bool,
}

impl CastlingRights {
    pub fn any(&self) -> bool {
        self.kingside || self.queenside
    }
}

/// Capabilities the engine needs from a rules-correct move generator.
///
/// `legal_moves` must enumerate in the same order on repeated calls over an
/// unchanged position. `apply` only accepts moves returned by `legal_moves`
/// for the current position, and every `apply` must be matched by one `undo`
/// in reverse order.
pub trait MoveGenerator {
    fn legal_moves(&self) -> Vec<ChessMove>;
    fn apply(&mut self, mv: &ChessMove);
    /// Reverses the most recent `apply`, returning the move it undid.
    fn undo(&mut self) -> Option<ChessMove>;
    fn side_to_move(&self) -> Color;
    fn is_game_over(&self) -> bool;
    fn is_check(&self) -> bool;
    fn is_checkmate(&self) -> bool;
    fn board_squares(&self) -> BoardGrid;
    fn castling_rights(&self, color: Color) -> CastlingRights;
    /// Piece placement only: no side to move, castling, en passant or counters.
    fn canonical_key(&self) -> String;
    /// Standard algebraic notation of a legal move in the current position.
    fn san(&self, mv: &ChessMove) -> String;
    /// Half-moves applied since the position was set up.
    fn ply_count(&self) -> usize;
}

/// Scoped apply: the move is undone when the guard drops, on every exit path.
pub struct Applied<'a, G: MoveGenerator + ?Sized> {
    pos: &'a mut G,
}

impl<'a, G: MoveGenerator + ?Sized> Applied<'a, G> {
    pub fn new(pos: &'a mut G, mv: &ChessMove) -> Self {
        pos.apply(mv);
        Self { pos }
    }
}

impl<G: MoveGenerator + ?Sized> Deref for Applied<'_, G> {
    type Target = G;
    fn deref(&self) -> &G {
        &*self.pos
    }
}

impl<G: MoveGenerator + ?Sized> DerefMut for Applied<'_, G> {
    fn deref_mut(&mut self) -> &mut G {
        &mut *self.pos
    }
}

impl<G: MoveGenerator + ?Sized> Drop for Applied<'_, G> {
    fn drop(&mut self) {
        let undone = self.pos.undo();
        debug_assert!(undone.is_some(), "undo without a matching apply");
    }
}

/// Upper-case SAN letter for a piece (`P` for pawns).
pub fn piece_letter(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'P',
        Piece::Knight => 'N',
        Piece::Bishop => 'B',
        Piece::Rook => 'R',
        Piece::Queen => 'Q',
        Piece::King => 'K',
    }
}

pub fn file_char(sq: Square) -> char {
    (b'a' + sq.file() as u8) as char
}

pub fn rank_char(sq: Square) -> char {
    (b'1' + sq.rank() as u8) as char
}

/// Parses a square name such as `e4`.
pub fn parse_square(s: &str) -> Option<Square> {
    let b = s.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let (f, r) = (b[0], b[1]);
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    let file = cozy_chess::File::ALL[(f - b'a') as usize];
    let rank = cozy_chess::Rank::ALL[(r - b'1') as usize];
    Some(Square::new(file, rank))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_coordinate_notation() {
        let mv = ChessMove {
            from: parse_square("e7").unwrap(),
            to: parse_square("e8").unwrap(),
            piece: Piece::Pawn,
            captured: None,
            promotion: Some(Piece::Queen),
            flags: MoveFlags { promotion: true, ..Default::default() },
        };
        assert_eq!(mv.uci(), "e7e8q");
    }

    #[test]
    fn square_parsing_rejects_garbage() {
        assert!(parse_square("i1").is_none());
        assert!(parse_square("a9").is_none());
        assert!(parse_square("e44").is_none());
        let sq = parse_square("d5").unwrap();
        assert_eq!((file_char(sq), rank_char(sq)), ('d', '5'));
    }
}
