//! Alpha-beta negamax with quiescence.
//!
//! One kernel serves both sides: each ply flips the perspective and negates
//! the returned bound. The public entry keeps a `side_is_white` flag and
//! reports white-relative scores, which is what the driver and the tools
//! around it speak.
//!
//! Cancellation is a return-value convention, not an error: once the stop
//! flag is up or the deadline has passed, every frame returns the
//! unreliable sentinel 0 and the caller must discard the result and any PV.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chess_core::{generate_captures, generate_legal, Color, Move, Position, TimeControl};

use crate::context::ThreadContext;
use crate::eval::evaluate;
use crate::heuristics::{Bound, HistoryTable, KillerTable, MAX_PLY};

pub const INF: i32 = 1_000_000;
pub const MATE_SCORE: i32 = 30_000;

/// True when a score can only come from a forced mate line.
pub fn is_mate_score(score: i32) -> bool {
    score.abs() > MATE_SCORE - MAX_PLY as i32
}

/// Everything a worker needs while walking one subtree.
pub struct SearchEnv<'a> {
    pub ctx: &'a mut ThreadContext,
    pub nodes: &'a AtomicU64,
    pub tc: &'a TimeControl,
    pub deadline: Option<Instant>,
}

impl SearchEnv<'_> {
    #[inline]
    pub fn cancelled(&self) -> bool {
        self.tc.is_stopped() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Search `pos` to `depth` and write the principal variation into `pv`.
///
/// Returns the white-relative score; `side_is_white` must match the side to
/// move and is kept on the surface for the callers that think in
/// maximizer/minimizer terms. A cancelled call returns 0 and leaves `pv`
/// untouched; the caller must not commit either.
pub fn alpha_beta(
    pos: &Position,
    depth: u8,
    alpha: i32,
    beta: i32,
    side_is_white: bool,
    env: &mut SearchEnv,
    pv: &mut Vec<Move>,
) -> i32 {
    debug_assert_eq!(side_is_white, pos.side_to_move == Color::White);
    if side_is_white {
        negamax(pos, depth, alpha, beta, 0, env, pv)
    } else {
        -negamax(pos, depth, -beta, -alpha, 0, env, pv)
    }
}

fn negamax(
    pos: &Position,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    ply: usize,
    env: &mut SearchEnv,
    pv: &mut Vec<Move>,
) -> i32 {
    env.nodes.fetch_add(1, Ordering::Relaxed);
    if env.cancelled() {
        return 0;
    }
    if pos.halfmove_clock >= 100 {
        return 0;
    }
    if depth == 0 {
        return quiescence(pos, alpha, beta, env);
    }

    let mut moves = generate_legal(pos);
    if moves.is_empty() {
        // Mate is worse the sooner it lands; stalemate is dead equal.
        return if pos.in_check(pos.side_to_move) {
            -(MATE_SCORE - ply as i32)
        } else {
            0
        };
    }

    let tt_best = env.ctx.tt.probe(pos.hash).and_then(|e| e.best);
    order_moves(
        &mut moves,
        tt_best,
        &env.ctx.killers,
        &env.ctx.history,
        ply,
        pos.side_to_move,
    );

    let alpha_in = alpha;
    let mut best_score = -INF;
    let mut best_move = moves[0];
    let mut best_line: Vec<Move> = Vec::new();

    for mv in moves {
        let next = pos.apply(mv);
        let mut child_line = Vec::new();
        let score = -negamax(&next, depth - 1, -beta, -alpha, ply + 1, env, &mut child_line);
        if env.cancelled() {
            return 0;
        }

        if score > best_score {
            best_score = score;
            best_move = mv;
            best_line = child_line;
        }
        if best_score > alpha {
            alpha = best_score;
        }
        if alpha >= beta {
            // Quiet cutoff moves feed the killer and history tables.
            let quiet =
                pos.piece_at(mv.to).is_none() && !mv.is_en_passant && mv.promo.is_none();
            if quiet {
                env.ctx.killers.add(ply, mv);
                env.ctx.history.add(
                    pos.side_to_move,
                    mv.from,
                    mv.to,
                    depth as i32 * depth as i32,
                );
            }
            break;
        }
    }

    pv.clear();
    pv.push(best_move);
    pv.extend(best_line);

    let flag = if best_score <= alpha_in {
        Bound::Upper
    } else if best_score >= beta {
        Bound::Lower
    } else {
        Bound::Exact
    };
    env.ctx
        .tt
        .store(pos.hash, best_score, depth, flag, Some(best_move), env.ctx.age);

    best_score
}

/// Captures-and-promotions extension at the horizon. Terminates because
/// every recursion consumes a capture.
fn quiescence(pos: &Position, mut alpha: i32, beta: i32, env: &mut SearchEnv) -> i32 {
    env.nodes.fetch_add(1, Ordering::Relaxed);
    if env.cancelled() {
        return 0;
    }

    let stand_pat = eval_for_side(pos);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let mut moves = generate_captures(pos);
    moves.sort_by_key(|m| std::cmp::Reverse(m.score));
    for mv in moves {
        let score = -quiescence(&pos.apply(mv), -beta, -alpha, env);
        if env.cancelled() {
            return 0;
        }
        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }
    alpha
}

/// Static evaluation from the side to move's perspective.
#[inline]
pub fn eval_for_side(pos: &Position) -> i32 {
    let e = evaluate(pos);
    match pos.side_to_move {
        Color::White => e,
        Color::Black => -e,
    }
}

/// Sort moves for the search: transposition-table move first, then the
/// precomputed capture/promotion scores, killer matches and history as the
/// tie-breaks among quiets. The sort is stable, so equal keys keep
/// generation order and results stay reproducible.
fn order_moves(
    moves: &mut [Move],
    tt_best: Option<Move>,
    killers: &KillerTable,
    history: &HistoryTable,
    ply: usize,
    side: Color,
) {
    moves.sort_by_key(|m| {
        std::cmp::Reverse((
            tt_best == Some(*m),
            m.score,
            killers.rank(ply, *m),
            history.get(side, m.from, m.to),
        ))
    });
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
