//! Polyglot opening book.
//!
//! A book file is a concatenation of 16-byte big-endian records: `u64` key,
//! `u16` move, `u16` weight, `u32` learn. Records are grouped by key at load
//! time so probing is a single map lookup. Selection among the moves for a
//! key is weighted-random, matching the reference book probing tools.

use std::collections::HashMap;
use std::path::Path;

use rand::Rng;
use thiserror::Error;

use crate::board::Position;
use crate::movegen::generate_legal;
use crate::polyglot::polyglot_key;
use crate::types::*;

#[derive(Debug, Error)]
pub enum BookError {
    #[error("failed to read book file: {0}")]
    Io(#[from] std::io::Error),
    #[error("book data ends mid-entry at byte {0}")]
    ShortRecord(usize),
}

#[derive(Debug, Clone, Copy)]
pub struct BookEntry {
    pub raw_move: u16,
    pub weight: u16,
    pub learn: u32,
}

/// An in-memory Polyglot book. An unloaded book behaves as empty.
#[derive(Debug, Default)]
pub struct PolyglotBook {
    entries: HashMap<u64, Vec<BookEntry>>,
}

impl PolyglotBook {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BookError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BookError> {
        if bytes.len() % 16 != 0 {
            return Err(BookError::ShortRecord(bytes.len() - bytes.len() % 16));
        }
        let mut entries: HashMap<u64, Vec<BookEntry>> = HashMap::new();
        for rec in bytes.chunks_exact(16) {
            let key = u64::from_be_bytes(rec[0..8].try_into().unwrap());
            let raw_move = u16::from_be_bytes(rec[8..10].try_into().unwrap());
            let weight = u16::from_be_bytes(rec[10..12].try_into().unwrap());
            let learn = u32::from_be_bytes(rec[12..16].try_into().unwrap());
            entries.entry(key).or_default().push(BookEntry {
                raw_move,
                weight,
                learn,
            });
        }
        Ok(PolyglotBook { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn positions(&self) -> usize {
        self.entries.len()
    }

    pub fn has_move(&self, pos: &Position) -> bool {
        self.entries.contains_key(&polyglot_key(pos))
    }

    /// Weighted-random book move for the position, already validated
    /// against the legal move list. `None` on book miss or if the stored
    /// move is not legal here.
    pub fn pick_move(&self, pos: &Position) -> Option<Move> {
        let list = self.entries.get(&polyglot_key(pos))?;
        let total: u32 = list.iter().map(|e| e.weight as u32).sum();
        let mut chosen = *list.first()?;
        if total > 0 {
            let roll = rand::thread_rng().gen_range(1..=10_000u32) % total;
            let mut sum = 0u32;
            for e in list {
                sum += e.weight as u32;
                if roll < sum {
                    chosen = *e;
                    break;
                }
            }
        }
        decode_book_move(pos, chosen.raw_move)
    }
}

/// Decode a Polyglot move against a position.
///
/// Bit layout, low to high: to-file (3), to-rank (3), from-file (3),
/// from-rank (3), promotion (3) with 0 = none, 1..4 = N, B, R, Q. Ranks
/// count from rank 1. Castling is stored as king-takes-own-rook
/// (e1h1, e1a1, e8h8, e8a8) and is rewritten to the castling form when a
/// king stands on the source square.
pub fn decode_book_move(pos: &Position, raw: u16) -> Option<Move> {
    let to_file = (raw & 7) as i8;
    let to_rank = ((raw >> 3) & 7) as i8;
    let from_file = ((raw >> 6) & 7) as i8;
    let from_rank = ((raw >> 9) & 7) as i8;
    let promo = match (raw >> 12) & 7 {
        0 => None,
        1 => Some(PieceKind::Knight),
        2 => Some(PieceKind::Bishop),
        3 => Some(PieceKind::Rook),
        4 => Some(PieceKind::Queen),
        _ => return None,
    };

    let from = sq_at(from_file, 7 - from_rank)?;
    let mut to = sq_at(to_file, 7 - to_rank)?;

    let king_on_from = pos.piece_at(from).map(|p| p.kind) == Some(PieceKind::King);
    if king_on_from {
        to = match (from, to) {
            (E1, H1) => G1,
            (E1, A1) => C1,
            (E8, H8) => G8,
            (E8, A8) => C8,
            _ => to,
        };
    }

    generate_legal(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promo == promo)
}

#[cfg(test)]
#[path = "book_tests.rs"]
mod book_tests;
