use cozy_chess::{Board as CozyBoard, Color, File, Move, Piece, Rank, Square};

use crate::board::{
    file_char, piece_letter, rank_char, BoardGrid, CastlingRights, ChessMove, MoveFlags,
    MoveGenerator, PlacedPiece,
};
use crate::error::{EngineError, Result};

/// Board state before a move, kept so `undo` restores it exactly.
#[derive(Clone, Debug)]
struct Undo {
    board: CozyBoard,
    mv: ChessMove,
}

/// Reversible cozy-chess position: the board plus a make/unmake stack.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
    stack: Vec<Undo>,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default(), stack: Vec::with_capacity(128) }
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        CozyBoard::from_fen(fen.trim(), false)
            .map(|b| Self { board: b, stack: Vec::with_capacity(128) })
            .map_err(|e| EngineError::InvalidFen { fen: fen.to_string(), reason: format!("{e:?}") })
    }

    /// `startpos`, or a FEN string.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim() == "startpos" { Ok(Self::startpos()) } else { Self::from_fen(text) }
    }

    pub fn board(&self) -> &CozyBoard { &self.board }

    pub fn fen(&self) -> String { format!("{}", self.board) }

    /// Resolves SAN (`Nf3`, `exd5`, `O-O`, `e8=Q+`) or coordinate text
    /// (`g1f3`, `e7e8q`) to a legal move. A coordinate promotion without a
    /// piece letter promotes to a queen.
    pub fn find_move(&self, text: &str) -> Result<ChessMove> {
        let wanted = normalize_san(text);
        let moves = self.legal_moves();
        let by_uci = moves.iter().find(|m| m.uci() == wanted).or_else(|| {
            moves.iter().find(|m| m.promotion == Some(Piece::Queen) && &m.uci()[..4] == wanted.as_str())
        });
        if let Some(mv) = by_uci {
            return Ok(*mv);
        }
        moves
            .iter()
            .find(|m| normalize_san(&self.san(m)) == wanted)
            .copied()
            .ok_or_else(|| EngineError::IllegalMove(text.trim().to_string()))
    }

    /// Boundary entry point: parses and plays a move given as text.
    pub fn play(&mut self, text: &str) -> Result<ChessMove> {
        let mv = self.find_move(text)?;
        self.apply(&mv);
        Ok(mv)
    }

    /// Plays a sequence of moves; stops at the first one that fails.
    pub fn play_line<I>(&mut self, moves: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for m in moves { self.play(m.as_ref())?; }
        Ok(())
    }

    pub fn is_stalemate(&self) -> bool {
        self.board.checkers().is_empty() && !has_legal_moves(&self.board)
    }

    /// Stalemate, fifty-move rule, insufficient material or threefold repetition.
    pub fn is_draw(&self) -> bool {
        self.is_stalemate()
            || self.board.halfmove_clock() >= 100
            || self.is_insufficient_material()
            || self.is_threefold_repetition()
    }

    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !heavy.is_empty() { return false; }
        let knights = b.pieces(Piece::Knight).len();
        let bishops = b.pieces(Piece::Bishop);
        if knights + bishops.len() <= 1 { return true; }
        if knights > 0 { return false; }
        // Only bishops left: dead if they all live on one square colour.
        let mut shades = bishops.into_iter().map(|sq| (sq.file() as usize + sq.rank() as usize) % 2);
        let first = shades.next();
        shades.all(|s| Some(s) == first)
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let current = self.board.hash();
        let seen = self.stack.iter().filter(|u| u.board.hash() == current).count();
        seen >= 2
    }

    /// Describes a raw cozy move. Cozy encodes castling as king-takes-own-rook.
    fn describe(&self, raw: Move, piece: Piece) -> ChessMove {
        let us = self.board.side_to_move();
        if piece == Piece::King && self.board.color_on(raw.to) == Some(us) {
            let kingside = raw.to.file() as usize > raw.from.file() as usize;
            let file = if kingside { File::G } else { File::C };
            return ChessMove {
                from: raw.from,
                to: Square::new(file, raw.from.rank()),
                piece,
                captured: None,
                promotion: None,
                flags: MoveFlags { castle_kingside: kingside, castle_queenside: !kingside, ..Default::default() },
            };
        }
        let en_passant = piece == Piece::Pawn
            && raw.from.file() != raw.to.file()
            && self.board.piece_on(raw.to).is_none();
        let captured = if en_passant { Some(Piece::Pawn) } else { self.board.piece_on(raw.to) };
        ChessMove {
            from: raw.from,
            to: raw.to,
            piece,
            captured,
            promotion: raw.promotion,
            flags: MoveFlags { en_passant, promotion: raw.promotion.is_some(), ..Default::default() },
        }
    }

    fn to_raw(&self, mv: &ChessMove) -> Move {
        if mv.flags.is_castle() {
            let rights = self.board.castle_rights(self.board.side_to_move());
            let rook_file = if mv.flags.castle_kingside {
                rights.short.unwrap_or(File::H)
            } else {
                rights.long.unwrap_or(File::A)
            };
            return Move { from: mv.from, to: Square::new(rook_file, mv.from.rank()), promotion: None };
        }
        Move { from: mv.from, to: mv.to, promotion: mv.promotion }
    }
}

fn has_legal_moves(board: &CozyBoard) -> bool {
    let mut any = false;
    board.generate_moves(|_| { any = true; true });
    any
}

/// Strips check/annotation suffixes and normalises castling zeros.
fn normalize_san(text: &str) -> String {
    text.trim()
        .trim_end_matches(|c| matches!(c, '+' | '#' | '!' | '?'))
        .replace('0', "O")
}

impl MoveGenerator for Position {
    fn legal_moves(&self) -> Vec<ChessMove> {
        let mut out = Vec::with_capacity(64);
        self.board.generate_moves(|moves| {
            let piece = moves.piece;
            for m in moves { out.push(self.describe(m, piece)); }
            false
        });
        out
    }

    fn apply(&mut self, mv: &ChessMove) {
        let raw = self.to_raw(mv);
        let before = self.board.clone();
        self.board.play(raw);
        self.stack.push(Undo { board: before, mv: *mv });
    }

    fn undo(&mut self) -> Option<ChessMove> {
        let u = self.stack.pop()?;
        self.board = u.board;
        Some(u.mv)
    }

    fn side_to_move(&self) -> Color { self.board.side_to_move() }

    fn is_game_over(&self) -> bool {
        !has_legal_moves(&self.board) || self.is_draw()
    }

    fn is_check(&self) -> bool { !self.board.checkers().is_empty() }

    fn is_checkmate(&self) -> bool {
        self.is_check() && !has_legal_moves(&self.board)
    }

    fn board_squares(&self) -> BoardGrid {
        let mut grid: BoardGrid = [[None; 8]; 8];
        for (row, cells) in grid.iter_mut().enumerate() {
            let rank = Rank::ALL[7 - row];
            for (col, cell) in cells.iter_mut().enumerate() {
                let sq = Square::new(File::ALL[col], rank);
                if let (Some(piece), Some(color)) = (self.board.piece_on(sq), self.board.color_on(sq)) {
                    *cell = Some(PlacedPiece { piece, color });
                }
            }
        }
        grid
    }

    fn castling_rights(&self, color: Color) -> CastlingRights {
        let r = self.board.castle_rights(color);
        CastlingRights { kingside: r.short.is_some(), queenside: r.long.is_some() }
    }

    fn canonical_key(&self) -> String {
        let fen = self.fen();
        fen.split_whitespace().next().unwrap_or_default().to_string()
    }

    fn san(&self, mv: &ChessMove) -> String {
        let mut out = String::with_capacity(8);
        if mv.flags.castle_kingside {
            out.push_str("O-O");
        } else if mv.flags.castle_queenside {
            out.push_str("O-O-O");
        } else {
            if mv.piece == Piece::Pawn {
                if mv.is_capture() {
                    out.push(file_char(mv.from));
                    out.push('x');
                }
            } else {
                out.push(piece_letter(mv.piece));
                let rivals: Vec<ChessMove> = self
                    .legal_moves()
                    .into_iter()
                    .filter(|m| m.piece == mv.piece && m.to == mv.to && m.from != mv.from)
                    .collect();
                if !rivals.is_empty() {
                    let file_unique = rivals.iter().all(|m| m.from.file() != mv.from.file());
                    let rank_unique = rivals.iter().all(|m| m.from.rank() != mv.from.rank());
                    if file_unique {
                        out.push(file_char(mv.from));
                    } else if rank_unique {
                        out.push(rank_char(mv.from));
                    } else {
                        out.push(file_char(mv.from));
                        out.push(rank_char(mv.from));
                    }
                }
                if mv.is_capture() { out.push('x'); }
            }
            out.push_str(&mv.to.to_string());
            if let Some(p) = mv.promotion {
                out.push('=');
                out.push(piece_letter(p));
            }
        }
        let mut child = self.board.clone();
        child.play(self.to_raw(mv));
        if !child.checkers().is_empty() {
            out.push(if has_legal_moves(&child) { '+' } else { '#' });
        }
        out
    }

    fn ply_count(&self) -> usize { self.stack.len() }
}
