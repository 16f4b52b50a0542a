pub mod attacks;
pub mod board;
pub mod book;
pub mod fen;
pub mod movegen;
pub mod perft;
pub mod polyglot;
pub mod san;
pub mod time_control;
pub mod types;
pub mod uci;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use attacks::{attacked, mailbox_step, piece_rays};
pub use board::*;
pub use book::{BookError, PolyglotBook};
pub use fen::{parse_fen, to_fen, FenError};
pub use movegen::*;
pub use perft::{perft, perft_divide};
pub use polyglot::polyglot_key;
pub use san::{parse_san, replay_pgn, san_from_move, split_san_moves};
pub use time_control::*;
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;

use std::time::Duration;

// =============================================================================
// Engine trait — the boundary between the command interpreter and a search
// =============================================================================

/// Result of a completed (or cancelled) search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Score in centipawns from the searching side's perspective
    pub score: i32,
    /// Deepest fully completed iteration
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Whether the search was cut short by the clock or a stop request
    pub stopped: bool,
}

/// Incremental progress emitted while a search runs.
#[derive(Debug, Clone)]
pub enum SearchInfo {
    /// A worker is about to search a root move.
    CurrMove {
        depth: u8,
        mv: Move,
        number: usize,
        elapsed: Duration,
        nodes: u64,
        nps: u64,
    },
    /// An iterative-deepening level finished.
    Depth {
        depth: u8,
        score_cp: i32,
        elapsed: Duration,
        nodes: u64,
        nps: u64,
        pv: Vec<Move>,
    },
}

/// Where progress records go. The UCI layer turns them into `info` lines;
/// tests collect them or drop them.
pub type InfoSink<'a> = &'a (dyn Fn(&SearchInfo) + Sync);

/// No-op sink for callers that do not care about progress.
pub fn null_info_sink() -> impl Fn(&SearchInfo) + Sync {
    |_: &SearchInfo| {}
}

/// Trait implemented by engines that can pick a move for a position.
pub trait Engine: Send {
    /// Search the position under the given limits, reporting progress
    /// through `info`.
    fn search(&mut self, pos: &Position, limits: SearchLimits, info: InfoSink) -> SearchResult;

    /// Engine name for the identify handshake.
    fn name(&self) -> &str;

    /// Engine author for the identify handshake.
    fn author(&self) -> &str {
        "castellan"
    }

    /// Reset state for a new game (hash tables, heuristics).
    fn new_game(&mut self) {}

    /// Set a named option. Returns true if the option was recognized.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
