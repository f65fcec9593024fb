use piecoach::search::eval::{eval_cp, CASTLING_RIGHTS_BONUS};
use piecoach::Position;

fn eval(fen: &str) -> i32 {
    eval_cp(&Position::from_fen(fen).expect("valid fen"))
}

#[test]
fn knight_center_better_than_rim() {
    // White: Kh1, Nd4; Black: Ka8. White to move.
    let c = eval("k7/8/8/8/3N4/8/8/7K w - - 0 1");
    let r = eval("k7/8/8/8/8/8/8/N6K w - - 0 1");
    assert!(c > r, "center eval {c} should be greater than rim {r}");
}

#[test]
fn pawn_advanced_better_than_back() {
    let a = eval("k7/8/8/8/4P3/8/8/7K w - - 0 1");
    let b = eval("k7/8/8/8/8/8/4P3/7K w - - 0 1");
    assert!(a > b, "advanced pawn eval {a} should exceed back pawn {b}");
}

#[test]
fn black_tables_are_mirrored() {
    assert_eq!(eval("k7/8/8/8/3N4/8/8/7K w - - 0 1"), 340);
    assert_eq!(eval("k7/8/8/3n4/8/8/8/7K w - - 0 1"), -340);
}

#[test]
fn castling_term_follows_side_to_move() {
    assert_eq!(eval_cp(&Position::startpos()), CASTLING_RIGHTS_BONUS);
    let mut pos = Position::startpos();
    pos.play("e4").unwrap();
    // +40 for the pawn, and Black to move with rights left costs 30.
    assert_eq!(eval_cp(&pos), 10);
    pos.play("e5").unwrap();
    assert_eq!(eval_cp(&pos), 30);
}

#[test]
fn no_rights_no_castling_term() {
    assert_eq!(eval("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1"), 0);
    assert_eq!(eval("r3k2r/8/8/8/8/8/8/R3K2R b kq - 0 1"), -CASTLING_RIGHTS_BONUS);
    assert_eq!(eval("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1"), 0);
}
