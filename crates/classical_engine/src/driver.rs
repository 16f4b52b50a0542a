//! Iterative deepening with root-level parallelism.
//!
//! Each depth distributes the root moves over a fixed pool of workers
//! through an atomic work-queue index. A worker owns a `ThreadContext`
//! seeded from the shared aggregate and merges it back under the aggregate
//! mutex after every root move, so later moves and later depths order with
//! everything learned so far.
//!
//! A depth's result is committed only when every root move finished
//! naturally. When the deadline or a stop request fires mid-depth, the
//! partial results are discarded and the best move of the last completed
//! depth stands. Root moves are searched with a full window, which keeps
//! per-move scores identical whatever the thread count.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use chess_core::{
    generate_legal, Color, InfoSink, Move, Position, SearchInfo, SearchLimits, SearchResult,
};

use crate::context::RootAggregate;
use crate::search::{alpha_beta, SearchEnv, INF};

/// Root search configuration.
pub struct ParallelDriver {
    pub threads: usize,
}

impl Default for ParallelDriver {
    fn default() -> Self {
        ParallelDriver {
            threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

struct RootScore {
    score: i32,
    pv: Vec<Move>,
}

impl ParallelDriver {
    pub fn new(threads: usize) -> Self {
        ParallelDriver {
            threads: threads.max(1),
        }
    }

    /// Run iterative deepening and return the best move of the deepest
    /// fully completed iteration.
    pub fn search(
        &self,
        pos: &Position,
        limits: &SearchLimits,
        aggregate: &Mutex<RootAggregate>,
        info: InfoSink,
    ) -> SearchResult {
        limits.start();
        let tc = &limits.time_control;
        let deadline = tc.deadline();
        let started = Instant::now();
        let nodes = AtomicU64::new(0);

        let root_moves = generate_legal(pos);
        if root_moves.is_empty() {
            return SearchResult {
                best_move: None,
                score: 0,
                depth: 0,
                nodes: 0,
                stopped: false,
            };
        }

        let side_is_white = pos.side_to_move == Color::White;
        // Always have a legal answer ready, even if depth 1 never finishes.
        let mut best_move = root_moves[0];
        let mut best_score = 0;
        let mut completed_depth = 0u8;
        let mut stopped = false;

        for depth in 1..=limits.depth.max(1) {
            if tc.check_time() {
                stopped = true;
                break;
            }

            let next_index = AtomicUsize::new(0);
            let cancelled = AtomicBool::new(false);
            let results: Vec<Mutex<Option<RootScore>>> =
                root_moves.iter().map(|_| Mutex::new(None)).collect();

            let workers = self.threads.min(root_moves.len());
            std::thread::scope(|s| {
                for _ in 0..workers {
                    s.spawn(|| {
                        let mut ctx = aggregate.lock().unwrap().make_context(depth as u16);
                        loop {
                            let i = next_index.fetch_add(1, Ordering::Relaxed);
                            if i >= root_moves.len() {
                                break;
                            }
                            if tc.is_stopped()
                                || deadline.is_some_and(|d| Instant::now() >= d)
                            {
                                cancelled.store(true, Ordering::Relaxed);
                                break;
                            }
                            let mv = root_moves[i];

                            let so_far = nodes.load(Ordering::Relaxed);
                            let elapsed = started.elapsed();
                            info(&SearchInfo::CurrMove {
                                depth,
                                mv,
                                number: i + 1,
                                elapsed,
                                nodes: so_far,
                                nps: nps(so_far, elapsed),
                            });

                            let next = pos.apply(mv);
                            let mut env = SearchEnv {
                                ctx: &mut ctx,
                                nodes: &nodes,
                                tc,
                                deadline,
                            };
                            let mut tail = Vec::new();
                            let score = alpha_beta(
                                &next,
                                depth - 1,
                                -INF,
                                INF,
                                !side_is_white,
                                &mut env,
                                &mut tail,
                            );
                            if env.cancelled() {
                                // The value is unreliable; poison the depth.
                                cancelled.store(true, Ordering::Relaxed);
                                break;
                            }

                            let mut pv = Vec::with_capacity(1 + tail.len());
                            pv.push(mv);
                            pv.extend(tail);
                            *results[i].lock().unwrap() = Some(RootScore { score, pv });

                            aggregate.lock().unwrap().merge_context(&ctx);
                        }
                    });
                }
            });

            if cancelled.load(Ordering::Relaxed) || tc.is_stopped() {
                stopped = true;
                break;
            }

            // Commit this depth: best root move by side-relative score.
            let mut depth_best: Option<(Move, i32, Vec<Move>)> = None;
            let mut complete = true;
            for (i, slot) in results.iter().enumerate() {
                match slot.lock().unwrap().take() {
                    Some(r) => {
                        let norm = if side_is_white { r.score } else { -r.score };
                        if depth_best.as_ref().map_or(true, |cur| norm > cur.1) {
                            depth_best = Some((root_moves[i], norm, r.pv));
                        }
                    }
                    None => {
                        complete = false;
                        break;
                    }
                }
            }
            if !complete {
                stopped = true;
                break;
            }

            let (mv, score, pv) = depth_best.expect("complete depth has a best move");
            best_move = mv;
            best_score = score;
            completed_depth = depth;

            let total = nodes.load(Ordering::Relaxed);
            let elapsed = started.elapsed();
            info(&SearchInfo::Depth {
                depth,
                score_cp: score,
                elapsed,
                nodes: total,
                nps: nps(total, elapsed),
                pv,
            });
        }

        SearchResult {
            best_move: Some(best_move),
            score: best_score,
            depth: completed_depth,
            nodes: nodes.load(Ordering::Relaxed),
            stopped,
        }
    }
}

fn nps(nodes: u64, elapsed: Duration) -> u64 {
    let ms = elapsed.as_millis() as u64;
    if ms == 0 {
        nodes * 1000
    } else {
        nodes * 1000 / ms
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod driver_tests;
