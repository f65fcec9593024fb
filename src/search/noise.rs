use rand::Rng;

use crate::board::ChessMove;

/// Choose a move uniformly from the legal list; no search, no filtering.
pub fn choose_uniform<R: Rng + ?Sized>(moves: &[ChessMove], rng: &mut R) -> Option<ChessMove> {
    if moves.is_empty() { return None; }
    let idx = rng.gen_range(0..moves.len());
    Some(moves[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::cozy::Position;
    use crate::board::MoveGenerator;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn empty_list_gives_none() {
        let mut rng = SmallRng::seed_from_u64(7);
        assert!(choose_uniform(&[], &mut rng).is_none());
    }

    #[test]
    fn same_seed_same_choice() {
        let moves = Position::startpos().legal_moves();
        let a = choose_uniform(&moves, &mut SmallRng::seed_from_u64(42));
        let b = choose_uniform(&moves, &mut SmallRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
