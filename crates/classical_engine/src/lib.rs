//! Classical chess engine: alpha-beta negamax search over a hand-written
//! evaluation, with killer/history/transposition heuristics, root-parallel
//! iterative deepening and a Polyglot opening book.

pub mod context;
pub mod driver;
pub mod eval;
pub mod heuristics;
pub mod search;

use std::sync::Mutex;

use chess_core::{Engine, InfoSink, PolyglotBook, Position, SearchLimits, SearchResult};

use context::RootAggregate;
use driver::ParallelDriver;

pub use eval::evaluate;
pub use search::{alpha_beta, MATE_SCORE};

const DEFAULT_HASH_MB: usize = 16;
const DEFAULT_BOOK: &str = "book.bin";

/// Engine options settable over the `setoption` surface.
struct Options {
    hash_mb: usize,
    book_path: String,
    use_book: bool,
}

pub struct ClassicalEngine {
    options: Options,
    aggregate: Mutex<RootAggregate>,
    driver: ParallelDriver,
    book: Option<PolyglotBook>,
    book_loaded: bool,
}

impl Default for ClassicalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassicalEngine {
    pub fn new() -> Self {
        ClassicalEngine {
            options: Options {
                hash_mb: DEFAULT_HASH_MB,
                book_path: DEFAULT_BOOK.to_string(),
                use_book: true,
            },
            aggregate: Mutex::new(RootAggregate::with_hash_mb(DEFAULT_HASH_MB)),
            driver: ParallelDriver::default(),
            book: None,
            book_loaded: false,
        }
    }

    pub fn with_threads(threads: usize) -> Self {
        let mut engine = Self::new();
        engine.driver = ParallelDriver::new(threads);
        engine
    }

    /// Book probe; a failed load demotes the book to empty and the engine
    /// falls through to search.
    fn book_move(&mut self, pos: &Position) -> Option<chess_core::Move> {
        if !self.options.use_book {
            return None;
        }
        if !self.book_loaded {
            self.book_loaded = true;
            match PolyglotBook::load(&self.options.book_path) {
                Ok(book) => {
                    log::info!(
                        "loaded book {:?} ({} positions)",
                        self.options.book_path,
                        book.positions()
                    );
                    self.book = Some(book);
                }
                Err(err) => {
                    log::warn!("book {:?} unavailable: {err}", self.options.book_path);
                    self.book = None;
                }
            }
        }
        self.book.as_ref()?.pick_move(pos)
    }
}

impl Engine for ClassicalEngine {
    fn search(&mut self, pos: &Position, limits: SearchLimits, info: InfoSink) -> SearchResult {
        // Book hits bypass the clock entirely.
        if let Some(mv) = self.book_move(pos) {
            return SearchResult {
                best_move: Some(mv),
                score: 0,
                depth: 0,
                nodes: 0,
                stopped: false,
            };
        }
        self.driver.search(pos, &limits, &self.aggregate, info)
    }

    fn name(&self) -> &str {
        "Castellan 0.1"
    }

    fn author(&self) -> &str {
        "the Castellan developers"
    }

    fn new_game(&mut self) {
        self.aggregate.lock().unwrap().clear();
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        match name.to_ascii_lowercase().as_str() {
            "hash" => {
                if let Ok(mb) = value.parse::<usize>() {
                    self.options.hash_mb = mb.clamp(1, 512);
                    *self.aggregate.lock().unwrap() =
                        RootAggregate::with_hash_mb(self.options.hash_mb);
                }
                true
            }
            "book" => {
                self.options.book_path = value.to_string();
                self.book = None;
                self.book_loaded = false;
                true
            }
            "usebook" => {
                self.options.use_book =
                    matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "on");
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod engine_tests {
    use super::*;
    use chess_core::generate_legal;
    use std::io::Write as _;

    #[test]
    fn test_engine_searches_without_book() {
        let mut engine = ClassicalEngine::with_threads(2);
        engine.set_option("UseBook", "false");
        let pos = Position::startpos();
        let sink = chess_core::null_info_sink();
        let result = engine.search(&pos, SearchLimits::depth(2), &sink);
        assert!(generate_legal(&pos).contains(&result.best_move.unwrap()));
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_missing_book_falls_through_to_search() {
        let mut engine = ClassicalEngine::with_threads(1);
        engine.set_option("Book", "definitely-not-here.bin");
        let pos = Position::startpos();
        let sink = chess_core::null_info_sink();
        let result = engine.search(&pos, SearchLimits::depth(1), &sink);
        assert!(result.best_move.is_some());
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_book_hit_bypasses_search() {
        // One-entry book mapping the start position to g1f3.
        let pos = Position::startpos();
        let key = chess_core::polyglot_key(&pos);
        let from = chess_core::coord_to_sq("g1").unwrap();
        let to = chess_core::coord_to_sq("f3").unwrap();
        let raw: u16 = ((to % 8) as u16)
            | (((7 - to / 8) as u16) << 3)
            | (((from % 8) as u16) << 6)
            | (((7 - from / 8) as u16) << 9);
        let mut rec = [0u8; 16];
        rec[0..8].copy_from_slice(&key.to_be_bytes());
        rec[8..10].copy_from_slice(&raw.to_be_bytes());
        rec[10..12].copy_from_slice(&10u16.to_be_bytes());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&rec).unwrap();
        file.flush().unwrap();

        let mut engine = ClassicalEngine::with_threads(1);
        engine.set_option("Book", file.path().to_str().unwrap());
        let sink = chess_core::null_info_sink();
        let result = engine.search(&pos, SearchLimits::depth(4), &sink);
        assert_eq!(result.nodes, 0);
        let mv = result.best_move.unwrap();
        assert_eq!((mv.from, mv.to), (from, to));
    }

    #[test]
    fn test_unknown_option_ignored() {
        let mut engine = ClassicalEngine::new();
        assert!(!engine.set_option("Ponder", "true"));
        assert!(engine.set_option("Hash", "32"));
    }
}
