//! Engine-local Zobrist keys.
//!
//! One process-wide immutable table, built at compile time: 12 piece x 64
//! square words, one side-to-move word, four castling words and eight
//! en-passant file words. The position hash is the XOR of the words for
//! everything present in the position; `Position::apply` keeps it current
//! incrementally so no node ever recomputes the full hash.
//!
//! These keys identify positions inside the transposition table only. Book
//! lookups use the published Polyglot table in `polyglot` instead.

use crate::types::Piece;

pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square].
    pub pieces: [[[u64; 64]; 6]; 2],
    /// XOR-ed in when black is to move.
    pub side_to_move: u64,
    /// Castling rights in wk, wq, bk, bq order.
    pub castling: [u64; 4],
    /// En-passant target file a..h.
    pub en_passant: [u64; 8],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    /// Generate the key table with a fixed-seed xorshift64 so every build
    /// and every thread sees the same values.
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x51C6_F7E8_2D5A_9B04u64;

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut piece = 0;
            while piece < 6 {
                let mut sq = 0;
                while sq < 64 {
                    state = xorshift64(state);
                    pieces[color][piece][sq] = state;
                    sq += 1;
                }
                piece += 1;
            }
            color += 1;
        }

        state = xorshift64(state);
        let side_to_move = state;

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            state = xorshift64(state);
            castling[i] = state;
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            state = xorshift64(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }

    /// Castling right key by index (0=wk, 1=wq, 2=bk, 3=bq).
    #[inline(always)]
    pub fn castling_key(&self, index: usize) -> u64 {
        self.castling[index]
    }

    /// En-passant key for a file 0..7.
    #[inline(always)]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }
}

/// Global static Zobrist keys, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
