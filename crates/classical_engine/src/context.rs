//! Per-worker search state and the shared root aggregate.
//!
//! Every worker thread owns a `ThreadContext`; the driver owns one
//! `RootAggregate` behind a mutex. Workers start from a snapshot of the
//! aggregate and fold their tables back after each root move, so heuristics
//! learned anywhere reach every worker by the next iteration.

use crate::heuristics::{HistoryTable, KillerTable, TransTable};

/// Heuristic state owned by a single search worker.
pub struct ThreadContext {
    pub history: HistoryTable,
    pub killers: KillerTable,
    pub tt: TransTable,
    /// Stamped into stored TT entries; newer beats equal depth.
    pub age: u16,
}

impl ThreadContext {
    pub fn new(tt_slots: usize) -> Self {
        ThreadContext {
            history: HistoryTable::new(),
            killers: KillerTable::new(),
            tt: TransTable::new(tt_slots),
            age: 0,
        }
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.killers.clear();
        self.tt.clear();
        self.age = 0;
    }
}

/// Merged heuristics shared across workers and across iterations.
pub struct RootAggregate {
    pub history: HistoryTable,
    pub killers: KillerTable,
    pub tt: TransTable,
}

impl RootAggregate {
    pub fn new(tt_slots: usize) -> Self {
        RootAggregate {
            history: HistoryTable::new(),
            killers: KillerTable::new(),
            tt: TransTable::new(tt_slots),
        }
    }

    pub fn with_hash_mb(mb: usize) -> Self {
        let tt = TransTable::with_capacity_mb(mb);
        RootAggregate {
            history: HistoryTable::new(),
            killers: KillerTable::new(),
            tt,
        }
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.killers.clear();
        self.tt.clear();
    }

    /// Snapshot for a worker about to start an iteration.
    pub fn make_context(&self, age: u16) -> ThreadContext {
        ThreadContext {
            history: self.history.clone(),
            killers: self.killers.clone(),
            tt: self.tt.clone(),
            age,
        }
    }

    /// Fold a worker's tables back in. Call with the aggregate mutex held.
    pub fn merge_context(&mut self, ctx: &ThreadContext) {
        self.history.merge_from(&ctx.history);
        self.killers.merge_from(&ctx.killers);
        self.tt.merge_from(&ctx.tt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, Move};

    #[test]
    fn test_context_round_trip_through_aggregate() {
        let mut agg = RootAggregate::new(256);
        let mut ctx = agg.make_context(1);

        ctx.history.add(Color::White, 8, 16, 64);
        ctx.killers.add(2, Move::new(8, 16));
        ctx.tt
            .store(99, 25, 4, crate::heuristics::Bound::Exact, None, 1);

        agg.merge_context(&ctx);
        assert_eq!(agg.history.get(Color::White, 8, 16), 64);
        assert_eq!(agg.killers.rank(2, Move::new(8, 16)), 2);
        assert_eq!(agg.tt.probe(99).unwrap().score, 25);

        // A fresh worker snapshot sees the merged state.
        let ctx2 = agg.make_context(2);
        assert_eq!(ctx2.history.get(Color::White, 8, 16), 64);
        assert_eq!(ctx2.tt.probe(99).unwrap().depth, 4);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut ctx = ThreadContext::new(64);
        ctx.history.add(Color::Black, 0, 8, 5);
        ctx.killers.add(0, Move::new(0, 8));
        ctx.age = 7;
        ctx.reset();
        assert_eq!(ctx.history.get(Color::Black, 0, 8), 0);
        assert_eq!(ctx.killers.rank(0, Move::new(0, 8)), 0);
        assert_eq!(ctx.age, 0);
    }
}
