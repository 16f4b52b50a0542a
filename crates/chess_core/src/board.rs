use crate::attacks;
use crate::types::*;
use crate::zobrist::ZOBRIST;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const fn none() -> Self {
        CastlingRights {
            wk: false,
            wq: false,
            bk: false,
            bq: false,
        }
    }

    pub const fn all() -> Self {
        CastlingRights {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        }
    }

    fn flag(&self, i: usize) -> bool {
        match i {
            0 => self.wk,
            1 => self.wq,
            2 => self.bk,
            _ => self.bq,
        }
    }
}

/// A full position. Squares are indexed 0..63 with a8 = 0 (see `types`).
///
/// Positions are value types: `apply` returns a fresh position and never
/// mutates its input, so the search can hand copies down the tree without
/// undo bookkeeping. The Zobrist `hash` field is maintained incrementally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub hash: u64,
}

impl Position {
    pub fn startpos() -> Self {
        let mut p = Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::all(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        };

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (c, &kind) in back.iter().enumerate() {
            p.board[c] = Some(Piece {
                color: Color::Black,
                kind,
            });
            p.board[56 + c] = Some(Piece {
                color: Color::White,
                kind,
            });
        }
        for c in 0..8 {
            p.board[8 + c] = Some(Piece {
                color: Color::Black,
                kind: PieceKind::Pawn,
            });
            p.board[48 + c] = Some(Piece {
                color: Color::White,
                kind: PieceKind::Pawn,
            });
        }
        p.hash = p.compute_hash();
        p
    }

    #[inline(always)]
    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        (0..64u8).find(|&sq| {
            matches!(self.board[sq as usize], Some(pc) if pc.color == c && pc.kind == PieceKind::King)
        })
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => attacks::attacked(self, ksq, c.other()),
            None => false,
        }
    }

    /// Recompute the Zobrist hash from scratch. Used at construction and by
    /// tests that cross-check the incremental updates in `apply`.
    pub fn compute_hash(&self) -> u64 {
        let mut h = 0u64;
        for sq in 0..64u8 {
            if let Some(pc) = self.board[sq as usize] {
                h ^= ZOBRIST.piece_key(pc, sq);
            }
        }
        if self.side_to_move == Color::Black {
            h ^= ZOBRIST.side_to_move;
        }
        for i in 0..4 {
            if self.castling.flag(i) {
                h ^= ZOBRIST.castling_key(i);
            }
        }
        if let Some(ep) = self.en_passant {
            h ^= ZOBRIST.ep_key(col_of(ep) as u8);
        }
        h
    }

    #[inline(always)]
    fn hash_set(&mut self, sq: u8, pc: Option<Piece>) {
        if let Some(old) = self.board[sq as usize] {
            self.hash ^= ZOBRIST.piece_key(old, sq);
        }
        if let Some(new) = pc {
            self.hash ^= ZOBRIST.piece_key(new, sq);
        }
        self.board[sq as usize] = pc;
    }

    /// Apply a move and return the resulting position.
    ///
    /// The move must come from the generator or have been validated against
    /// the legal move list; `apply` itself performs no legality checking.
    pub fn apply(&self, mv: Move) -> Position {
        let mut next = self.clone();
        let from = mv.from;
        let to = mv.to;
        let moved = next.piece_at(from).expect("apply: no piece on from-square");

        // Old EP target dies with this move; a double push may set a new one.
        if let Some(ep) = next.en_passant {
            next.hash ^= ZOBRIST.ep_key(col_of(ep) as u8);
            next.en_passant = None;
        }

        let mut captured = next.piece_at(to);
        if mv.is_en_passant {
            // The captured pawn sits one row behind the target square.
            let cs = match moved.color {
                Color::White => to + 8,
                Color::Black => to - 8,
            };
            captured = next.piece_at(cs);
            next.hash_set(cs, None);
        }

        let reset_clock = moved.kind == PieceKind::Pawn || captured.is_some();

        next.hash_set(from, None);
        let landing = match (moved.kind, mv.promo) {
            (PieceKind::Pawn, Some(promo)) if row_of(to) == 0 || row_of(to) == 7 => Piece {
                color: moved.color,
                kind: promo,
            },
            _ => moved,
        };
        next.hash_set(to, Some(landing));

        // Castling moves the rook as well.
        if mv.is_castle && moved.kind == PieceKind::King {
            let hop = match (moved.color, from, to) {
                (Color::White, E1, G1) => Some((H1, F1)),
                (Color::White, E1, C1) => Some((A1, D1)),
                (Color::Black, E8, G8) => Some((H8, F8)),
                (Color::Black, E8, C8) => Some((A8, D8)),
                _ => None,
            };
            if let Some((rf, rt)) = hop {
                if let Some(rook) = next.piece_at(rf) {
                    next.hash_set(rf, None);
                    next.hash_set(rt, Some(rook));
                }
            }
        }

        let old_rights = next.castling;
        match moved.color {
            Color::White => {
                if moved.kind == PieceKind::King {
                    next.castling.wk = false;
                    next.castling.wq = false;
                }
                if moved.kind == PieceKind::Rook {
                    if from == A1 {
                        next.castling.wq = false;
                    }
                    if from == H1 {
                        next.castling.wk = false;
                    }
                }
            }
            Color::Black => {
                if moved.kind == PieceKind::King {
                    next.castling.bk = false;
                    next.castling.bq = false;
                }
                if moved.kind == PieceKind::Rook {
                    if from == A8 {
                        next.castling.bq = false;
                    }
                    if from == H8 {
                        next.castling.bk = false;
                    }
                }
            }
        }
        // A rook captured on its home square also loses the right.
        if let Some(cp) = captured {
            if cp.kind == PieceKind::Rook {
                match cp.color {
                    Color::White => {
                        if to == A1 {
                            next.castling.wq = false;
                        }
                        if to == H1 {
                            next.castling.wk = false;
                        }
                    }
                    Color::Black => {
                        if to == A8 {
                            next.castling.bq = false;
                        }
                        if to == H8 {
                            next.castling.bk = false;
                        }
                    }
                }
            }
        }
        for i in 0..4 {
            if old_rights.flag(i) != next.castling.flag(i) {
                next.hash ^= ZOBRIST.castling_key(i);
            }
        }

        // Double pawn push leaves an EP target on the crossed square.
        if moved.kind == PieceKind::Pawn {
            let (fr, tr) = (row_of(from), row_of(to));
            if moved.color == Color::White && fr == 6 && tr == 4 {
                next.en_passant = Some(from - 8);
            } else if moved.color == Color::Black && fr == 1 && tr == 3 {
                next.en_passant = Some(from + 8);
            }
            if let Some(ep) = next.en_passant {
                next.hash ^= ZOBRIST.ep_key(col_of(ep) as u8);
            }
        }

        next.halfmove_clock = if reset_clock {
            0
        } else {
            next.halfmove_clock + 1
        };
        if next.side_to_move == Color::Black {
            next.fullmove_number += 1;
        }
        next.side_to_move = next.side_to_move.other();
        next.hash ^= ZOBRIST.side_to_move;

        next
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
