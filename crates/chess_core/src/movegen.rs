//! Pseudo-legal and legal move generation.
//!
//! Pieces walk the 10x12 mailbox rays from `attacks`; pawns, castling and
//! en passant are handled explicitly. Every generated move carries an
//! ordering score: captures and promotions start at one million (MVV/LVA),
//! quiet moves at zero. Legality is pseudo-legality plus "own king is not
//! left in check" verified on the applied position.

use crate::attacks::{attacked, mailbox_step, piece_rays};
use crate::board::Position;
use crate::types::*;

const CAPTURE_BASE: i32 = 1_000_000;

/// Most-valuable-victim / least-valuable-attacker ordering score.
#[inline]
fn mvv_lva(victim: PieceKind, attacker: PieceKind) -> i32 {
    CAPTURE_BASE + 10 * victim.idx() as i32 - attacker.idx() as i32
}

#[inline]
fn promo_score(promo: PieceKind) -> i32 {
    CAPTURE_BASE + 10 * promo.idx() as i32
}

fn push_promotions(from: u8, to: u8, out: &mut Vec<Move>) {
    for promo in PieceKind::PROMOTIONS {
        out.push(Move::promotion(from, to, promo, promo_score(promo)));
    }
}

/// All pseudo-legal moves for the side to move.
pub fn generate_pseudo_legal(pos: &Position) -> Vec<Move> {
    let us = pos.side_to_move;
    let mut out = Vec::with_capacity(64);

    for from in 0..64u8 {
        let pc = match pos.piece_at(from) {
            Some(pc) if pc.color == us => pc,
            _ => continue,
        };
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, us, &mut out),
            kind => gen_piece(pos, from, kind, us, &mut out),
        }
    }

    gen_castling(pos, us, &mut out);
    gen_en_passant(pos, us, &mut out);
    out
}

/// Pseudo-legal captures and promotions only; the quiescence move source.
pub fn generate_pseudo_captures(pos: &Position) -> Vec<Move> {
    let us = pos.side_to_move;
    let mut out = Vec::with_capacity(16);

    for from in 0..64u8 {
        let pc = match pos.piece_at(from) {
            Some(pc) if pc.color == us => pc,
            _ => continue,
        };
        match pc.kind {
            PieceKind::Pawn => {
                // Quiet push promotions belong to the quiescence horizon too.
                let (step, promo_row): (i32, i8) = match us {
                    Color::White => (-8, 0),
                    Color::Black => (8, 7),
                };
                let push = (from as i32 + step) as u8;
                if pos.piece_at(push).is_none() && row_of(push) == promo_row {
                    push_promotions(from, push, &mut out);
                }
                gen_pawn_captures(pos, from, us, &mut out);
            }
            kind => gen_piece_captures(pos, from, kind, us, &mut out),
        }
    }

    gen_en_passant(pos, us, &mut out);
    out
}

/// Pseudo-legal moves filtered by "own king not left in check".
pub fn generate_legal(pos: &Position) -> Vec<Move> {
    filter_self_check(pos, generate_pseudo_legal(pos))
}

/// Legal captures and promotions.
pub fn generate_captures(pos: &Position) -> Vec<Move> {
    filter_self_check(pos, generate_pseudo_captures(pos))
}

fn filter_self_check(pos: &Position, moves: Vec<Move>) -> Vec<Move> {
    let us = pos.side_to_move;
    moves
        .into_iter()
        .filter(|&mv| !pos.apply(mv).in_check(us))
        .collect()
}

fn gen_pawn(pos: &Position, from: u8, us: Color, out: &mut Vec<Move>) {
    let (step, double_home, promo_row): (i32, bool, i8) = match us {
        // White pawns move up the board (toward row 0).
        Color::White => (-8, from >= 48, 0),
        Color::Black => (8, from < 16, 7),
    };

    let push = (from as i32 + step) as u8;
    if pos.piece_at(push).is_none() {
        if row_of(push) == promo_row {
            push_promotions(from, push, out);
        } else {
            out.push(Move::new(from, push));
        }
        if double_home {
            let double = (from as i32 + 2 * step) as u8;
            if pos.piece_at(double).is_none() {
                out.push(Move::new(from, double));
            }
        }
    }

    gen_pawn_captures(pos, from, us, out);
}

fn gen_pawn_captures(pos: &Position, from: u8, us: Color, out: &mut Vec<Move>) {
    let (left, right, promo_row): (i32, i32, i8) = match us {
        Color::White => (-9, -7, 0),
        Color::Black => (7, 9, 7),
    };
    let targets = [
        (col_of(from) != 0).then(|| (from as i32 + left) as u8),
        (col_of(from) != 7).then(|| (from as i32 + right) as u8),
    ];
    for to in targets.into_iter().flatten() {
        let victim = match pos.piece_at(to) {
            Some(pc) if pc.color != us => pc,
            _ => continue,
        };
        if row_of(to) == promo_row {
            push_promotions(from, to, out);
        } else {
            out.push(Move::scored(from, to, mvv_lva(victim.kind, PieceKind::Pawn)));
        }
    }
}

fn gen_piece(pos: &Position, from: u8, kind: PieceKind, us: Color, out: &mut Vec<Move>) {
    let (rays, slides) = piece_rays(kind);
    for &off in rays {
        let mut cur = from;
        while let Some(to) = mailbox_step(cur, off) {
            match pos.piece_at(to) {
                Some(pc) => {
                    if pc.color != us {
                        out.push(Move::scored(from, to, mvv_lva(pc.kind, kind)));
                    }
                    break;
                }
                None => out.push(Move::new(from, to)),
            }
            if !slides {
                break;
            }
            cur = to;
        }
    }
}

fn gen_piece_captures(pos: &Position, from: u8, kind: PieceKind, us: Color, out: &mut Vec<Move>) {
    let (rays, slides) = piece_rays(kind);
    for &off in rays {
        let mut cur = from;
        while let Some(to) = mailbox_step(cur, off) {
            match pos.piece_at(to) {
                Some(pc) => {
                    if pc.color != us {
                        out.push(Move::scored(from, to, mvv_lva(pc.kind, kind)));
                    }
                    break;
                }
                None => {}
            }
            if !slides {
                break;
            }
            cur = to;
        }
    }
}

fn gen_castling(pos: &Position, us: Color, out: &mut Vec<Move>) {
    let is = |sq: u8, color: Color, kind: PieceKind| {
        pos.piece_at(sq) == Some(Piece { color, kind })
    };
    let empty = |sq: u8| pos.piece_at(sq).is_none();
    let them = us.other();

    // King origin, transit and destination squares must all be safe; the
    // queenside b-file square only has to be empty.
    match us {
        Color::White => {
            if pos.castling.wk
                && empty(F1)
                && empty(G1)
                && is(E1, us, PieceKind::King)
                && is(H1, us, PieceKind::Rook)
                && !attacked(pos, E1, them)
                && !attacked(pos, F1, them)
                && !attacked(pos, G1, them)
            {
                out.push(castle_move(E1, G1));
            }
            if pos.castling.wq
                && empty(B1)
                && empty(C1)
                && empty(D1)
                && is(E1, us, PieceKind::King)
                && is(A1, us, PieceKind::Rook)
                && !attacked(pos, E1, them)
                && !attacked(pos, D1, them)
                && !attacked(pos, C1, them)
            {
                out.push(castle_move(E1, C1));
            }
        }
        Color::Black => {
            if pos.castling.bk
                && empty(F8)
                && empty(G8)
                && is(E8, us, PieceKind::King)
                && is(H8, us, PieceKind::Rook)
                && !attacked(pos, E8, them)
                && !attacked(pos, F8, them)
                && !attacked(pos, G8, them)
            {
                out.push(castle_move(E8, G8));
            }
            if pos.castling.bq
                && empty(B8)
                && empty(C8)
                && empty(D8)
                && is(E8, us, PieceKind::King)
                && is(A8, us, PieceKind::Rook)
                && !attacked(pos, E8, them)
                && !attacked(pos, D8, them)
                && !attacked(pos, C8, them)
            {
                out.push(castle_move(E8, C8));
            }
        }
    }
}

fn castle_move(from: u8, to: u8) -> Move {
    Move {
        is_castle: true,
        ..Move::new(from, to)
    }
}

fn gen_en_passant(pos: &Position, us: Color, out: &mut Vec<Move>) {
    let ep = match pos.en_passant {
        Some(ep) => ep,
        None => return,
    };
    // Always pawn takes pawn.
    let score = mvv_lva(PieceKind::Pawn, PieceKind::Pawn);
    let ep_move = |from: u8| Move {
        is_en_passant: true,
        score,
        ..Move::new(from, ep)
    };
    let pawn = |sq: u8| pos.piece_at(sq) == Some(Piece {
        color: us,
        kind: PieceKind::Pawn,
    });

    match us {
        Color::White if row_of(ep) == 2 => {
            if col_of(ep) != 0 && pawn(ep + 7) {
                out.push(ep_move(ep + 7));
            }
            if col_of(ep) != 7 && pawn(ep + 9) {
                out.push(ep_move(ep + 9));
            }
        }
        Color::Black if row_of(ep) == 5 => {
            if col_of(ep) != 0 && pawn(ep - 9) {
                out.push(ep_move(ep - 9));
            }
            if col_of(ep) != 7 && pawn(ep - 7) {
                out.push(ep_move(ep - 7));
            }
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
