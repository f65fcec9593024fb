use cozy_chess::{Piece, Rank, Square};
use piecoach::board::MoveGenerator;
use piecoach::classify::{
    capture_tag, classify_move, CASTLING_TAG, CENTER_TAG, DEVELOPMENT_TAG, EN_PASSANT_TAG, PROMOTION_TAG,
};
use piecoach::Position;

const POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
    "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N w - - 0 1",
];

fn expected_tags(mv: &piecoach::ChessMove) -> Vec<String> {
    let mut tags = Vec::new();
    if let Some(p) = mv.captured { tags.push(capture_tag(p)); }
    if mv.flags.is_castle() { tags.push(CASTLING_TAG.to_string()); }
    if mv.flags.en_passant { tags.push(EN_PASSANT_TAG.to_string()); }
    if mv.flags.promotion { tags.push(PROMOTION_TAG.to_string()); }
    let minor = matches!(mv.piece, Piece::Knight | Piece::Bishop);
    if minor && matches!(mv.from.rank(), Rank::First | Rank::Eighth) { tags.push(DEVELOPMENT_TAG.to_string()); }
    if [Square::D4, Square::D5, Square::E4, Square::E5].contains(&mv.to) { tags.push(CENTER_TAG.to_string()); }
    tags
}

#[test]
fn every_legal_move_gets_exactly_its_tags() {
    for fen in POSITIONS {
        let pos = Position::from_fen(fen).unwrap();
        for mv in pos.legal_moves() {
            assert_eq!(classify_move(&mv), expected_tags(&mv), "{} in {fen}", pos.san(&mv));
        }
    }
}

#[test]
fn special_moves_are_all_seen() {
    let mut seen = [false; 3];
    for fen in POSITIONS {
        let pos = Position::from_fen(fen).unwrap();
        for mv in pos.legal_moves() {
            let tags = classify_move(&mv);
            seen[0] |= tags.iter().any(|t| t == CASTLING_TAG);
            seen[1] |= tags.iter().any(|t| t == EN_PASSANT_TAG);
            seen[2] |= tags.iter().any(|t| t == PROMOTION_TAG);
        }
    }
    assert_eq!(seen, [true; 3]);
}

#[test]
fn classification_ignores_search_state() {
    let pos = Position::startpos();
    let nf3 = pos.find_move("Nf3").unwrap();
    let engine = piecoach::Engine::new(piecoach::Difficulty::Hard);
    assert_eq!(engine.classify(&pos, &nf3), vec![DEVELOPMENT_TAG.to_string()]);
}
