//! Search heuristics: history table, killer moves and the transposition
//! table. Each worker owns private copies inside its `ThreadContext`; the
//! driver folds them into a shared aggregate between root moves, so none of
//! these types needs interior locking.

use chess_core::{Color, Move};

/// Killer slots per search ply.
pub const MAX_PLY: usize = 128;

/// Bound type of a stored transposition score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

/// History heuristic: quiet moves that caused cutoffs, by (side, from, to).
#[derive(Clone)]
pub struct HistoryTable {
    h: Box<[[[i16; 64]; 64]; 2]>,
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryTable {
    pub fn new() -> Self {
        HistoryTable {
            h: Box::new([[[0; 64]; 64]; 2]),
        }
    }

    pub fn clear(&mut self) {
        self.h.iter_mut().flatten().flatten().for_each(|v| *v = 0);
    }

    #[inline]
    pub fn get(&self, side: Color, from: u8, to: u8) -> i16 {
        self.h[side.idx()][from as usize][to as usize]
    }

    /// Saturating bump; overflow clamps at the i16 range.
    pub fn add(&mut self, side: Color, from: u8, to: u8, v: i32) {
        let cell = &mut self.h[side.idx()][from as usize][to as usize];
        *cell = (*cell as i32 + v).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
    }

    /// Element-wise saturating sum.
    pub fn merge_from(&mut self, other: &HistoryTable) {
        for (dst, src) in self
            .h
            .iter_mut()
            .flatten()
            .flatten()
            .zip(other.h.iter().flatten().flatten())
        {
            *dst = (*dst as i32 + *src as i32).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        }
    }
}

/// Two quiet killer moves per ply. Callers only add non-captures.
#[derive(Clone)]
pub struct KillerTable {
    k1: [Option<Move>; MAX_PLY],
    k2: [Option<Move>; MAX_PLY],
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KillerTable {
    pub fn new() -> Self {
        KillerTable {
            k1: [None; MAX_PLY],
            k2: [None; MAX_PLY],
        }
    }

    pub fn clear(&mut self) {
        self.k1 = [None; MAX_PLY];
        self.k2 = [None; MAX_PLY];
    }

    /// Record a cutoff move. Re-adding a current killer is a no-op;
    /// otherwise the new move displaces the older slot.
    pub fn add(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY {
            return;
        }
        if self.k1[ply] == Some(mv) || self.k2[ply] == Some(mv) {
            return;
        }
        self.k2[ply] = self.k1[ply];
        self.k1[ply] = Some(mv);
    }

    /// Ordering rank for a move at this ply: 2 for the fresher killer,
    /// 1 for the older, 0 for no match.
    #[inline]
    pub fn rank(&self, ply: usize, mv: Move) -> u8 {
        if ply >= MAX_PLY {
            return 0;
        }
        if self.k1[ply] == Some(mv) {
            2
        } else if self.k2[ply] == Some(mv) {
            1
        } else {
            0
        }
    }

    /// Union per ply keeping at most two, earlier entries preferred.
    pub fn merge_from(&mut self, other: &KillerTable) {
        for ply in 0..MAX_PLY {
            let cands = [self.k1[ply], self.k2[ply], other.k1[ply], other.k2[ply]];
            let mut out = [None, None];
            for cand in cands.into_iter().flatten() {
                if out[0].is_none() {
                    out[0] = Some(cand);
                } else if out[0] != Some(cand) && out[1].is_none() {
                    out[1] = Some(cand);
                }
            }
            self.k1[ply] = out[0];
            self.k2[ply] = out[1];
        }
    }
}

/// One transposition table entry. `key == 0` marks an empty slot.
#[derive(Clone, Copy, Debug)]
pub struct TtEntry {
    pub key: u64,
    pub score: i16,
    pub depth: u8,
    pub flag: Bound,
    pub best: Option<Move>,
    pub age: u16,
}

impl TtEntry {
    const fn empty() -> Self {
        TtEntry {
            key: 0,
            score: 0,
            depth: 0,
            flag: Bound::Exact,
            best: None,
            age: 0,
        }
    }
}

/// Open-addressed transposition table with a single probe per key.
#[derive(Clone)]
pub struct TransTable {
    table: Vec<TtEntry>,
}

impl TransTable {
    /// Table with a fixed number of slots (at least one).
    pub fn new(slots: usize) -> Self {
        TransTable {
            table: vec![TtEntry::empty(); slots.max(1)],
        }
    }

    /// Table sized to roughly `mb` megabytes of entries.
    pub fn with_capacity_mb(mb: usize) -> Self {
        let slots = (mb << 20) / std::mem::size_of::<TtEntry>();
        Self::new(slots)
    }

    pub fn slots(&self) -> usize {
        self.table.len()
    }

    pub fn clear(&mut self) {
        self.table.fill(TtEntry::empty());
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key % self.table.len() as u64) as usize
    }

    pub fn probe(&self, key: u64) -> Option<&TtEntry> {
        let e = &self.table[self.index(key)];
        (e.key == key).then_some(e)
    }

    /// Store an entry. The slot is replaced only when empty, when the new
    /// entry is deeper, or at equal depth with a same-or-newer age, so a
    /// slot's depth never silently decreases.
    pub fn store(
        &mut self,
        key: u64,
        score: i32,
        depth: u8,
        flag: Bound,
        best: Option<Move>,
        age: u16,
    ) {
        let i = self.index(key);
        let e = &mut self.table[i];
        if e.key == 0 || depth > e.depth || (depth == e.depth && age >= e.age) {
            *e = TtEntry {
                key,
                score: score.clamp(i16::MIN as i32, i16::MAX as i32) as i16,
                depth,
                flag,
                best,
                age,
            };
        }
    }

    /// Per-slot merge preferring deeper entries, then newer age.
    pub fn merge_from(&mut self, other: &TransTable) {
        debug_assert_eq!(self.table.len(), other.table.len());
        for (dst, src) in self.table.iter_mut().zip(other.table.iter()) {
            if src.key == 0 {
                continue;
            }
            if dst.key == 0 || src.depth > dst.depth || (src.depth == dst.depth && src.age > dst.age)
            {
                *dst = *src;
            }
        }
    }
}

#[cfg(test)]
#[path = "heuristics_tests.rs"]
mod heuristics_tests;
