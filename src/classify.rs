//! Human-readable tags for a single move, independent of search.

use cozy_chess::{Piece, Rank, Square};

use crate::board::{piece_letter, ChessMove};

pub const CASTLING_TAG: &str = "🏰 Castling: Securing the king";
pub const EN_PASSANT_TAG: &str = "⚡ En Passant: Special pawn capture";
pub const PROMOTION_TAG: &str = "👑 Promotion: Pawn becomes a queen!";
pub const DEVELOPMENT_TAG: &str = "🎯 Development: Bringing pieces into play";
pub const CENTER_TAG: &str = "⭐ Center Control: Dominating the board";

const CENTER: [Square; 4] = [Square::D4, Square::D5, Square::E4, Square::E5];

pub fn capture_tag(captured: Piece) -> String {
    format!("📍 Capture: Takes {}", piece_letter(captured))
}

/// Every matching rule contributes a tag, in a fixed order: capture, castling,
/// en passant, promotion, development, center control.
pub fn classify_move(mv: &ChessMove) -> Vec<String> {
    let mut tags = Vec::new();
    if let Some(captured) = mv.captured {
        tags.push(capture_tag(captured));
    }
    if mv.flags.is_castle() {
        tags.push(CASTLING_TAG.to_string());
    }
    if mv.flags.en_passant {
        tags.push(EN_PASSANT_TAG.to_string());
    }
    if mv.flags.promotion {
        tags.push(PROMOTION_TAG.to_string());
    }
    let minor = matches!(mv.piece, Piece::Knight | Piece::Bishop);
    if minor && matches!(mv.from.rank(), Rank::First | Rank::Eighth) {
        tags.push(DEVELOPMENT_TAG.to_string());
    }
    if CENTER.contains(&mv.to) {
        tags.push(CENTER_TAG.to_string());
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::cozy::Position;
    use pretty_assertions::assert_eq;

    fn tags(fen: &str, mv: &str) -> Vec<String> {
        let pos = Position::from_fen(fen).unwrap();
        classify_move(&pos.find_move(mv).unwrap())
    }

    #[test]
    fn quiet_flank_move_has_no_tags() {
        assert!(tags("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", "a2a3").is_empty());
    }

    #[test]
    fn knight_leaving_back_rank_is_development() {
        let t = tags("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", "Nf3");
        assert_eq!(t, vec![DEVELOPMENT_TAG.to_string()]);
    }

    #[test]
    fn capture_into_center_carries_both_tags_in_order() {
        let t = tags("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2", "exd5");
        assert_eq!(t, vec![capture_tag(Piece::Pawn), CENTER_TAG.to_string()]);
    }

    #[test]
    fn capturing_promotion() {
        let t = tags("1r5k/P7/8/8/8/8/8/K7 w - - 0 1", "axb8=Q");
        assert_eq!(t, vec![capture_tag(Piece::Rook), PROMOTION_TAG.to_string()]);
    }

    #[test]
    fn castling_and_en_passant() {
        assert_eq!(tags("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "O-O"), vec![CASTLING_TAG.to_string()]);
        let ep = tags("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 2", "dxe6");
        assert_eq!(ep, vec![capture_tag(Piece::Pawn), EN_PASSANT_TAG.to_string()]);
    }

    #[test]
    fn bishop_from_eighth_rank_develops() {
        let t = tags("rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2", "Bc5");
        assert_eq!(t, vec![DEVELOPMENT_TAG.to_string()]);
    }
}
