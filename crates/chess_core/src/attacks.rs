//! Attack detection on a 10x12 mailbox board.
//!
//! The 8x8 board is embedded in a 10x12 array whose border cells hold -1.
//! Applying a direction offset to a mailbox index either lands on another
//! real square or on a sentinel, so ray walks need no range arithmetic.

use crate::board::Position;
use crate::types::*;

/// 10x12 overlay: -1 marks off-board, everything else is a 0..63 square.
pub static MAILBOX: [i8; 120] = {
    let mut m = [-1i8; 120];
    let mut sq = 0usize;
    while sq < 64 {
        m[21 + (sq / 8) * 10 + sq % 8] = sq as i8;
        sq += 1;
    }
    m
};

/// Where each 0..63 square sits inside the 10x12 array.
pub static MAILBOX64: [u8; 64] = {
    let mut m = [0u8; 64];
    let mut sq = 0usize;
    while sq < 64 {
        m[sq] = (21 + (sq / 8) * 10 + sq % 8) as u8;
        sq += 1;
    }
    m
};

pub const KNIGHT_OFFSETS: [i32; 8] = [-21, -19, -12, -8, 8, 12, 19, 21];
pub const BISHOP_OFFSETS: [i32; 4] = [-11, -9, 9, 11];
pub const ROOK_OFFSETS: [i32; 4] = [-10, -1, 1, 10];
pub const QUEEN_OFFSETS: [i32; 8] = [-11, -10, -9, -1, 1, 9, 10, 11];
pub const KING_OFFSETS: [i32; 8] = QUEEN_OFFSETS;

/// Direction table and slide flag for a non-pawn piece.
pub fn piece_rays(kind: PieceKind) -> (&'static [i32], bool) {
    match kind {
        PieceKind::Knight => (&KNIGHT_OFFSETS, false),
        PieceKind::Bishop => (&BISHOP_OFFSETS, true),
        PieceKind::Rook => (&ROOK_OFFSETS, true),
        PieceKind::Queen => (&QUEEN_OFFSETS, true),
        PieceKind::King => (&KING_OFFSETS, false),
        PieceKind::Pawn => (&[], false),
    }
}

/// One mailbox step from `from`; `None` when the offset leaves the board.
#[inline(always)]
pub fn mailbox_step(from: u8, offset: i32) -> Option<u8> {
    let idx = MAILBOX64[from as usize] as i32 + offset;
    let sq = MAILBOX[idx as usize];
    if sq < 0 { None } else { Some(sq as u8) }
}

/// True iff any piece of colour `by` attacks `target`.
///
/// Pawn attacks are the diagonal captures only; pushes never attack.
pub fn attacked(pos: &Position, target: u8, by: Color) -> bool {
    for from in 0..64u8 {
        let pc = match pos.piece_at(from) {
            Some(pc) if pc.color == by => pc,
            _ => continue,
        };
        if pc.kind == PieceKind::Pawn {
            let hits = match by {
                Color::White => [
                    (col_of(from) != 0).then(|| from as i32 - 9),
                    (col_of(from) != 7).then(|| from as i32 - 7),
                ],
                Color::Black => [
                    (col_of(from) != 0).then(|| from as i32 + 7),
                    (col_of(from) != 7).then(|| from as i32 + 9),
                ],
            };
            if hits.into_iter().flatten().any(|sq| sq == target as i32) {
                return true;
            }
            continue;
        }
        let (rays, slides) = piece_rays(pc.kind);
        for &off in rays {
            let mut cur = from;
            while let Some(n) = mailbox_step(cur, off) {
                if n == target {
                    return true;
                }
                if pos.piece_at(n).is_some() || !slides {
                    break;
                }
                cur = n;
            }
        }
    }
    false
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
