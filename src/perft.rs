use crate::board::{Applied, MoveGenerator};

/// Leaf count of the legal move tree to `depth`, using make/unmake through
/// the generator (no cloning).
pub fn perft<G: MoveGenerator + ?Sized>(pos: &mut G, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let moves = pos.legal_moves();
    if depth == 1 { return moves.len() as u64; }
    let mut nodes = 0u64;
    for mv in &moves {
        let mut child = Applied::new(pos, mv);
        nodes += perft(&mut *child, depth - 1);
    }
    nodes
}

/// Per-root-move counts, as printed by `perft --divide`.
pub fn divide<G: MoveGenerator + ?Sized>(pos: &mut G, depth: u32) -> Vec<(String, u64)> {
    if depth == 0 { return Vec::new(); }
    let moves = pos.legal_moves();
    moves
        .iter()
        .map(|mv| {
            let mut child = Applied::new(&mut *pos, mv);
            (mv.uci(), perft(&mut *child, depth - 1))
        })
        .collect()
}
