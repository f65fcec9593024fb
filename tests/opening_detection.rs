use piecoach::chess_openings::openings;
use piecoach::coach::narrative::{analyze_player_move, analyze_position, OPENING_WINDOW_PLIES};
use piecoach::{Difficulty, Engine, Position};

#[test]
fn kings_pawn_after_e4_only() {
    let engine = Engine::new(Difficulty::Easy);
    let mut pos = Position::startpos();
    assert!(engine.detect_opening(&pos).is_none());
    pos.play("e4").unwrap();
    assert_eq!(engine.detect_opening(&pos).map(|o| o.name), Some("King's Pawn Opening"));
    pos.play("e5").unwrap();
    assert_eq!(engine.detect_opening(&pos).map(|o| o.name), Some("Open Game"));
}

#[test]
fn opening_key_ignores_move_order_and_counters() {
    let engine = Engine::new(Difficulty::Easy);
    let mut a = Position::startpos();
    for m in ["Nf3", "Nc6", "e4", "e5"] { a.play(m).unwrap(); }
    let b = Position::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 7 30").unwrap();
    assert_eq!(engine.detect_opening(&a).map(|o| o.name), Some("Italian Game (start)"));
    assert_eq!(engine.detect_opening(&a), engine.detect_opening(&b));
}

#[test]
fn player_move_feedback_respects_window() {
    assert_eq!(OPENING_WINDOW_PLIES, 10);
    let mut pos = Position::startpos();
    let mv = pos.find_move("d4").unwrap();
    let feedback = analyze_player_move(&mut pos, &mv);
    assert_eq!(feedback.last().map(String::as_str), Some("📖 Queen's Pawn Opening: Solid opening, preparing for a strong center"));
    assert!(openings().count() >= 6);
}

#[test]
fn position_analysis_orders_lines() {
    // Fool's mate is on the board and Black has nothing to capture.
    let mut pos = Position::startpos();
    for m in ["f3", "e5", "g4"] { pos.play(m).unwrap(); }
    let feedback = analyze_position(&mut pos);
    assert_eq!(feedback.len(), 2, "{feedback:?}");
    assert_eq!(feedback[0], "✨ Checkmate available with Qh4#!");
    assert!(feedback[1].starts_with("⚖️") || feedback[1].starts_with("📊"));
}
