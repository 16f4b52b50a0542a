//! Time management and search limits.
//!
//! A search runs under a depth cap plus an optional wall-clock budget. The
//! budget is either an explicit `movetime` or derived from the remaining
//! clock, and is enforced cooperatively: workers poll a shared stop flag
//! and a monotonic deadline at every node.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default depth cap when `go` names none.
pub const DEFAULT_DEPTH: u8 = 12;
/// Assumed number of remaining moves when the GUI sends none.
pub const DEFAULT_MOVES_TO_GO: u64 = 30;
/// Never budget less than this per move.
pub const MIN_BUDGET_MS: u64 = 50;

/// Search limits: depth cap plus optional time budget.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies.
    pub depth: u8,
    /// Wall-clock budget for this move (None = no time limit).
    pub move_time: Option<Duration>,
    /// Shared controller for cooperative cancellation.
    pub time_control: TimeControl,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
            time_control: TimeControl::new(None),
        }
    }

    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    pub fn start(&self) {
        self.time_control.start();
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.time_control.is_stopped()
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(DEFAULT_DEPTH)
    }
}

/// Raw time fields of a `go` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoParams {
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movetime: Option<u64>,
    pub depth: Option<u8>,
    pub movestogo: Option<u64>,
}

impl GoParams {
    /// Turn `go` arguments into search limits for the side to move.
    ///
    /// Priority: explicit `movetime`, else a slice of the remaining clock
    /// (`remaining / movestogo + increment/2`, floored at 50 ms), else no
    /// time limit at all. The depth cap applies in either case.
    pub fn budget(&self, white_to_move: bool) -> SearchLimits {
        let depth = self.depth.unwrap_or(DEFAULT_DEPTH).max(1);

        let budget_ms = if let Some(mt) = self.movetime {
            Some(mt)
        } else {
            let remaining = if white_to_move { self.wtime } else { self.btime };
            let inc = if white_to_move { self.winc } else { self.binc };
            remaining.filter(|&r| r > 0).map(|r| {
                let slices = self.movestogo.filter(|&m| m > 0).unwrap_or(DEFAULT_MOVES_TO_GO);
                (r / slices + inc.unwrap_or(0) / 2).max(MIN_BUDGET_MS)
            })
        };

        match budget_ms {
            Some(ms) => SearchLimits::depth_and_time(depth, Duration::from_millis(ms)),
            None => SearchLimits::depth(depth),
        }
    }
}

/// Thread-safe cancellation: a shared stop flag plus an optional deadline.
///
/// Cheap to clone and share across workers; `is_stopped` is a relaxed
/// atomic load suitable for polling at every node.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    started: Arc<std::sync::RwLock<Option<Instant>>>,
    time_limit: Option<Duration>,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            started: Arc::new(std::sync::RwLock::new(None)),
            time_limit,
        }
    }

    /// Start the clock. Call when the search begins.
    pub fn start(&self) {
        *self.started.write().unwrap() = Some(Instant::now());
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Request cooperative cancellation.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// The monotonic deadline, if a time limit is set and the clock runs.
    pub fn deadline(&self) -> Option<Instant> {
        let limit = self.time_limit?;
        self.started.read().unwrap().map(|s| s + limit)
    }

    pub fn elapsed(&self) -> Duration {
        self.started
            .read()
            .unwrap()
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Check the clock, latching the stop flag once the deadline passes.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        if let Some(deadline) = self.deadline() {
            if Instant::now() >= deadline {
                self.stop();
                return true;
            }
        }
        false
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
