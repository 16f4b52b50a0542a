//! Static evaluation: material, piece-square tables, pawn structure, rook
//! activity and king safety. White-relative centipawns; the search negates
//! per ply.

use chess_core::{col_of, mirror, row_of, Color, PieceKind, Position};

/// Material values in centipawns, indexed by PieceKind::idx().
pub const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

const DOUBLED_PAWN_PENALTY: i32 = 10;
const ISOLATED_PAWN_PENALTY: i32 = 20;
const BACKWARDS_PAWN_PENALTY: i32 = 8;
const PASSED_PAWN_BONUS: i32 = 20;
const ROOK_SEMI_OPEN_FILE_BONUS: i32 = 10;
const ROOK_OPEN_FILE_BONUS: i32 = 15;
const ROOK_ON_SEVENTH_BONUS: i32 = 20;

/// Below this much enemy non-pawn material the king walks to the centre.
const ENDGAME_MATERIAL: i32 = 1200;
/// Divisor scaling king safety by the opponent's attacking potential.
const KING_SAFETY_SCALE: i32 = 3100;

// Piece-square tables from white's point of view; the board is indexed
// with a8 = 0, so row 0 is black's back rank. Black mirrors with sq ^ 56.
#[rustfmt::skip]
const PAWN_PCSQ: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  15,  20,  20,  15,  10,   5,
      4,   8,  12,  16,  16,  12,   8,   4,
      3,   6,   9,  12,  12,   9,   6,   3,
      2,   4,   6,   8,   8,   6,   4,   2,
      1,   2,   3, -10, -10,   3,   2,   1,
      0,   0,   0, -40, -40,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PCSQ: [i32; 64] = [
    -10, -10, -10, -10, -10, -10, -10, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10, -30, -10, -10, -10, -10, -30, -10,
];

#[rustfmt::skip]
const BISHOP_PCSQ: [i32; 64] = [
    -10, -10, -10, -10, -10, -10, -10, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10, -10, -20, -10, -10, -20, -10, -10,
];

#[rustfmt::skip]
const KING_PCSQ: [i32; 64] = [
    -40, -40, -40, -40, -40, -40, -40, -40,
    -40, -40, -40, -40, -40, -40, -40, -40,
    -40, -40, -40, -40, -40, -40, -40, -40,
    -40, -40, -40, -40, -40, -40, -40, -40,
    -40, -40, -40, -40, -40, -40, -40, -40,
    -40, -40, -40, -40, -40, -40, -40, -40,
    -20, -20, -20, -20, -20, -20, -20, -20,
      0,  20,  40, -20,   0, -20,  40,  20,
];

#[rustfmt::skip]
const KING_ENDGAME_PCSQ: [i32; 64] = [
      0,  10,  20,  30,  30,  20,  10,   0,
     10,  20,  30,  40,  40,  30,  20,  10,
     20,  30,  40,  50,  50,  40,  30,  20,
     30,  40,  50,  60,  60,  50,  40,  30,
     30,  40,  50,  60,  60,  50,  40,  30,
     20,  30,  40,  50,  50,  40,  30,  20,
     10,  20,  30,  40,  40,  30,  20,  10,
      0,  10,  20,  30,  30,  20,  10,   0,
];

const WHITE: usize = 0;
const BLACK: usize = 1;

/// Pawn and material scan rebuilt at the start of every evaluation.
///
/// `pawn_rank[side][f]` holds the row of the least advanced pawn of that
/// side on file f-1; files 0 and 9 are sentinels so neighbour-file tests
/// need no bounds checks. A file with no pawn pretends the pawn is
/// impossibly far advanced (row 0 for white, row 7 for black).
struct EvalScratch {
    pawn_rank: [[i8; 10]; 2],
    piece_mat: [i32; 2],
    pawn_mat: [i32; 2],
}

impl EvalScratch {
    fn build(pos: &Position) -> Self {
        let mut s = EvalScratch {
            pawn_rank: [[0; 10], [7; 10]],
            piece_mat: [0; 2],
            pawn_mat: [0; 2],
        };
        for sq in 0..64u8 {
            let pc = match pos.piece_at(sq) {
                Some(pc) => pc,
                None => continue,
            };
            let side = pc.color.idx();
            if pc.kind == PieceKind::Pawn {
                s.pawn_mat[side] += PIECE_VALUES[PieceKind::Pawn.idx()];
                let f = (col_of(sq) + 1) as usize;
                let row = row_of(sq);
                match pc.color {
                    Color::White => {
                        if s.pawn_rank[WHITE][f] < row {
                            s.pawn_rank[WHITE][f] = row;
                        }
                    }
                    Color::Black => {
                        if s.pawn_rank[BLACK][f] > row {
                            s.pawn_rank[BLACK][f] = row;
                        }
                    }
                }
            } else {
                s.piece_mat[side] += PIECE_VALUES[pc.kind.idx()];
            }
        }
        s
    }
}

/// Evaluate a position, white-relative.
///
/// A halfmove clock at or past 100 plies is an immediate draw.
pub fn evaluate(pos: &Position) -> i32 {
    if pos.halfmove_clock >= 100 {
        return 0;
    }

    let s = EvalScratch::build(pos);
    let mut score = [
        s.piece_mat[WHITE] + s.pawn_mat[WHITE],
        s.piece_mat[BLACK] + s.pawn_mat[BLACK],
    ];

    for sq in 0..64u8 {
        let pc = match pos.piece_at(sq) {
            Some(pc) => pc,
            None => continue,
        };
        let side = pc.color.idx();
        let view = match pc.color {
            Color::White => sq as usize,
            Color::Black => mirror(sq) as usize,
        };
        match pc.kind {
            PieceKind::Pawn => score[side] += eval_pawn(&s, sq, pc.color),
            PieceKind::Knight => score[side] += KNIGHT_PCSQ[view],
            PieceKind::Bishop => score[side] += BISHOP_PCSQ[view],
            PieceKind::Rook => score[side] += eval_rook(&s, sq, pc.color),
            PieceKind::Queen => {}
            PieceKind::King => score[side] += eval_king(&s, sq, pc.color),
        }
    }

    score[WHITE] - score[BLACK]
}

fn eval_pawn(s: &EvalScratch, sq: u8, us: Color) -> i32 {
    let row = row_of(sq);
    let f = (col_of(sq) + 1) as usize;
    match us {
        Color::White => {
            let mut r = PAWN_PCSQ[sq as usize];
            // A friendly pawn further back on the same file makes this one
            // doubled; the rearmost pawn of the file is not penalised.
            if s.pawn_rank[WHITE][f] > row {
                r -= DOUBLED_PAWN_PENALTY;
            }
            if s.pawn_rank[WHITE][f - 1] == 0 && s.pawn_rank[WHITE][f + 1] == 0 {
                r -= ISOLATED_PAWN_PENALTY;
            } else if s.pawn_rank[WHITE][f - 1] < row && s.pawn_rank[WHITE][f + 1] < row {
                r -= BACKWARDS_PAWN_PENALTY;
            }
            if s.pawn_rank[BLACK][f - 1] >= row
                && s.pawn_rank[BLACK][f] >= row
                && s.pawn_rank[BLACK][f + 1] >= row
            {
                r += (7 - row as i32) * PASSED_PAWN_BONUS;
            }
            r
        }
        Color::Black => {
            let mut r = PAWN_PCSQ[mirror(sq) as usize];
            if s.pawn_rank[BLACK][f] < row {
                r -= DOUBLED_PAWN_PENALTY;
            }
            if s.pawn_rank[BLACK][f - 1] == 7 && s.pawn_rank[BLACK][f + 1] == 7 {
                r -= ISOLATED_PAWN_PENALTY;
            } else if s.pawn_rank[BLACK][f - 1] > row && s.pawn_rank[BLACK][f + 1] > row {
                r -= BACKWARDS_PAWN_PENALTY;
            }
            if s.pawn_rank[WHITE][f - 1] <= row
                && s.pawn_rank[WHITE][f] <= row
                && s.pawn_rank[WHITE][f + 1] <= row
            {
                r += row as i32 * PASSED_PAWN_BONUS;
            }
            r
        }
    }
}

fn eval_rook(s: &EvalScratch, sq: u8, us: Color) -> i32 {
    let f = (col_of(sq) + 1) as usize;
    let mut r = 0;
    match us {
        Color::White => {
            if s.pawn_rank[WHITE][f] == 0 {
                if s.pawn_rank[BLACK][f] == 7 {
                    r += ROOK_OPEN_FILE_BONUS;
                } else {
                    r += ROOK_SEMI_OPEN_FILE_BONUS;
                }
            }
            if row_of(sq) == 1 {
                r += ROOK_ON_SEVENTH_BONUS;
            }
        }
        Color::Black => {
            if s.pawn_rank[BLACK][f] == 7 {
                if s.pawn_rank[WHITE][f] == 0 {
                    r += ROOK_OPEN_FILE_BONUS;
                } else {
                    r += ROOK_SEMI_OPEN_FILE_BONUS;
                }
            }
            if row_of(sq) == 6 {
                r += ROOK_ON_SEVENTH_BONUS;
            }
        }
    }
    r
}

fn eval_king(s: &EvalScratch, sq: u8, us: Color) -> i32 {
    let (them, view) = match us {
        Color::White => (BLACK, sq as usize),
        Color::Black => (WHITE, mirror(sq) as usize),
    };

    // With little enemy material left the king belongs in the centre and
    // shelter stops mattering.
    if s.piece_mat[them] <= ENDGAME_MATERIAL {
        return KING_ENDGAME_PCSQ[view];
    }

    let mut r = KING_PCSQ[view];
    let col = col_of(sq);
    if col < 3 {
        r += shelter_file(s, 1, us);
        r += shelter_file(s, 2, us);
        r += shelter_file(s, 3, us) / 2;
    } else if col > 4 {
        r += shelter_file(s, 8, us);
        r += shelter_file(s, 7, us);
        r += shelter_file(s, 6, us) / 2;
    } else {
        // Uncastled king: penalise fully open files around it.
        for f in (col as usize)..=(col as usize + 2) {
            if s.pawn_rank[WHITE][f] == 0 && s.pawn_rank[BLACK][f] == 7 {
                r -= 10;
            }
        }
    }

    r * s.piece_mat[them] / KING_SAFETY_SCALE
}

/// Pawn-shelter quality of one file in front of a castled king.
fn shelter_file(s: &EvalScratch, f: usize, us: Color) -> i32 {
    let mut r = 0;
    match us {
        Color::White => {
            match s.pawn_rank[WHITE][f] {
                6 => {}       // shelter pawn still on its home square
                5 => r -= 10, // moved one square
                0 => r -= 25, // no pawn left on this file
                _ => r -= 20, // moved further up
            }
            match s.pawn_rank[BLACK][f] {
                7 => r -= 15, // no enemy pawn to keep the file closed
                5 => r -= 10, // enemy pawn on our 3rd rank
                4 => r -= 5,
                _ => {}
            }
        }
        Color::Black => {
            match s.pawn_rank[BLACK][f] {
                1 => {}
                2 => r -= 10,
                7 => r -= 25,
                _ => r -= 20,
            }
            match s.pawn_rank[WHITE][f] {
                0 => r -= 15,
                2 => r -= 10,
                3 => r -= 5,
                _ => {}
            }
        }
    }
    r
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
