use cozy_chess::Color;
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::board::{Applied, ChessMove, MoveGenerator};
use crate::error::{EngineError, Result};
use crate::search::eval::eval_cp;

/// Window bound; larger than any reachable evaluation.
pub const SCORE_BOUND: i32 = 1_000_000;

/// Optional stop conditions for a search. A stopped search is abandoned as a
/// whole: no partial result below the requested depth is reported.
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    pub deadline: Option<Instant>,
    pub abort: Option<Arc<AtomicBool>>,
}

impl SearchLimits {
    pub fn unbounded() -> Self { Self::default() }

    pub fn with_movetime(movetime: Duration) -> Self {
        Self { deadline: Some(Instant::now() + movetime), abort: None }
    }

    pub fn with_abort(mut self, flag: Arc<AtomicBool>) -> Self {
        self.abort = Some(flag);
        self
    }
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub bestmove: Option<ChessMove>,
    /// White-positive score of the chosen line.
    pub score_cp: i32,
    pub nodes: u64,
}

/// Fixed-depth minimax with alpha-beta pruning over any [`MoveGenerator`].
#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
    deadline: Option<Instant>,
    abort: Option<Arc<AtomicBool>>,
    stopped: bool,
}

impl Searcher {
    pub fn new(limits: &SearchLimits) -> Self {
        Self { nodes: 0, deadline: limits.deadline, abort: limits.abort.clone(), stopped: false }
    }

    fn should_stop(&mut self) -> bool {
        if self.stopped { return true; }
        if let Some(ref flag) = self.abort {
            if flag.load(Ordering::Relaxed) { self.stopped = true; }
        }
        if let Some(dl) = self.deadline {
            if Instant::now() >= dl { self.stopped = true; }
        }
        self.stopped
    }

    /// Best white-positive score reachable in `depth` plies when the side to
    /// move maximises (`maximizing`) or minimises. Leaves `pos` unchanged.
    pub fn minimax<G: MoveGenerator + ?Sized>(
        &mut self,
        pos: &mut G,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;
        if depth == 0 || pos.is_game_over() || self.should_stop() {
            return eval_cp(pos);
        }
        let moves = pos.legal_moves();
        if maximizing {
            let mut best = -SCORE_BOUND;
            for mv in &moves {
                let score = {
                    let mut child = Applied::new(pos, mv);
                    self.minimax(&mut *child, depth - 1, alpha, beta, false)
                };
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha { break; }
            }
            best
        } else {
            let mut best = SCORE_BOUND;
            for mv in &moves {
                let score = {
                    let mut child = Applied::new(pos, mv);
                    self.minimax(&mut *child, depth - 1, alpha, beta, true)
                };
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha { break; }
            }
            best
        }
    }

    /// Picks the root move with the strictly best value for the side to move,
    /// searching `reply_depth` plies below each root move. Ties keep the first
    /// move in enumeration order.
    pub fn search_depth<G: MoveGenerator + ?Sized>(&mut self, pos: &mut G, reply_depth: u32) -> Result<SearchResult> {
        let root_max = pos.side_to_move() == Color::White;
        let moves = pos.legal_moves();
        let mut bestmove: Option<ChessMove> = None;
        let mut best_score = if root_max { -SCORE_BOUND } else { SCORE_BOUND };

        for mv in &moves {
            // The running best narrows the window; a move that cannot beat it
            // returns a bound no better than it and is never selected.
            let (alpha, beta) = match bestmove {
                None => (-SCORE_BOUND, SCORE_BOUND),
                Some(_) if root_max => (best_score, SCORE_BOUND),
                Some(_) => (-SCORE_BOUND, best_score),
            };
            let score = {
                let mut child = Applied::new(pos, mv);
                self.minimax(&mut *child, reply_depth, alpha, beta, !root_max)
            };
            if self.stopped {
                return Err(EngineError::SearchAbandoned { depth: reply_depth + 1 });
            }
            let better = bestmove.is_none() || if root_max { score > best_score } else { score < best_score };
            if better {
                best_score = score;
                bestmove = Some(*mv);
            }
        }

        if bestmove.is_none() {
            best_score = eval_cp(pos);
        }
        debug!(
            "search depth={} best={:?} score_cp={} nodes={}",
            reply_depth + 1,
            bestmove.map(|m| m.uci()),
            best_score,
            self.nodes
        );
        Ok(SearchResult { bestmove, score_cp: best_score, nodes: self.nodes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::cozy::Position;

    #[test]
    fn leaves_position_untouched() {
        let mut pos = Position::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3").unwrap();
        let before = pos.fen();
        let mut s = Searcher::default();
        s.search_depth(&mut pos, 2).unwrap();
        assert_eq!(pos.fen(), before);
        assert_eq!(pos.ply_count(), 0);
    }

    #[test]
    fn no_moves_means_no_bestmove() {
        let mut pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let res = Searcher::default().search_depth(&mut pos, 3).unwrap();
        assert!(res.bestmove.is_none());
    }

    #[test]
    fn expired_deadline_abandons_search() {
        let mut pos = Position::startpos();
        let limits = SearchLimits { deadline: Some(Instant::now()), abort: None };
        let err = Searcher::new(&limits).search_depth(&mut pos, 3).unwrap_err();
        assert_eq!(err, EngineError::SearchAbandoned { depth: 4 });
        assert_eq!(pos.ply_count(), 0);
    }

    #[test]
    fn raised_abort_flag_abandons_search() {
        let mut pos = Position::startpos();
        let flag = Arc::new(AtomicBool::new(true));
        let limits = SearchLimits::unbounded().with_abort(flag);
        assert!(Searcher::new(&limits).search_depth(&mut pos, 2).is_err());
    }
}
