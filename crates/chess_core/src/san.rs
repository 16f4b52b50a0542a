//! Standard Algebraic Notation and PGN move-text replay.

use crate::{board::Position, movegen::generate_legal, types::*};

/// Render a legal move in SAN for the given position.
///
/// Castling is `O-O`/`O-O-O`; pawn captures carry the origin file and an
/// `x`; piece moves are disambiguated by file, then rank, then both; a
/// promotion appends `=<Piece>`; check and checkmate append `+`/`#`.
pub fn san_from_move(pos: &Position, mv: Move) -> String {
    let piece = match pos.piece_at(mv.from) {
        Some(pc) => pc,
        None => return String::new(),
    };

    if mv.is_castle {
        let base = if col_of(mv.to) == 6 { "O-O" } else { "O-O-O" };
        return format!("{base}{}", suffix(pos, mv));
    }

    let is_pawn = piece.kind == PieceKind::Pawn;
    let is_capture = pos.piece_at(mv.to).is_some() || mv.is_en_passant;
    let mut san = String::new();

    if !is_pawn {
        san.push(piece.kind.to_char(Color::White));
        // Another identical piece reaching the same square forces a
        // disambiguator.
        let mut ambiguous = false;
        let mut same_col = false;
        let mut same_row = false;
        for other in generate_legal(pos) {
            if other.to == mv.to && other.from != mv.from {
                if pos.piece_at(other.from).map(|p| p.kind) == Some(piece.kind) {
                    ambiguous = true;
                    if col_of(other.from) == col_of(mv.from) {
                        same_col = true;
                    }
                    if row_of(other.from) == row_of(mv.from) {
                        same_row = true;
                    }
                }
            }
        }
        if ambiguous {
            let coord = sq_to_coord(mv.from);
            if !same_col {
                san.push_str(&coord[0..1]);
            } else if !same_row {
                san.push_str(&coord[1..2]);
            } else {
                san.push_str(&coord);
            }
        }
    }

    if is_capture {
        if is_pawn {
            san.push((b'a' + col_of(mv.from) as u8) as char);
        }
        san.push('x');
    }

    san.push_str(&sq_to_coord(mv.to));

    if let Some(promo) = mv.promo {
        san.push('=');
        san.push(promo.to_char(Color::White));
    }

    san.push_str(&suffix(pos, mv));
    san
}

fn suffix(pos: &Position, mv: Move) -> &'static str {
    let next = pos.apply(mv);
    if next.in_check(next.side_to_move) {
        if generate_legal(&next).is_empty() {
            "#"
        } else {
            "+"
        }
    } else {
        ""
    }
}

/// Match SAN text against the legal moves of the position. Trailing check
/// and mate marks are ignored so `Nf3+`, `Nf3#` and `Nf3` all resolve.
pub fn parse_san(pos: &Position, san: &str) -> Option<Move> {
    if san.is_empty() {
        return None;
    }
    let cleaned: String = san.chars().filter(|&c| c != '+' && c != '#').collect();
    generate_legal(pos).into_iter().find(|&mv| {
        let rendered: String = san_from_move(pos, mv)
            .chars()
            .filter(|&c| c != '+' && c != '#')
            .collect();
        rendered == cleaned
    })
}

/// Split PGN move text into SAN tokens, dropping move numbers.
pub fn split_san_moves(pgn: &str) -> Vec<String> {
    pgn.split_whitespace()
        .filter(|tok| !tok.contains('.'))
        .map(str::to_string)
        .collect()
}

/// Replay PGN move text from the starting position, returning every board
/// state along the way (initial position included). Stops at the first
/// token that does not resolve to a legal move.
pub fn replay_pgn(pgn: &str) -> Vec<Position> {
    let mut pos = Position::startpos();
    let mut history = vec![pos.clone()];
    for san in split_san_moves(pgn) {
        match parse_san(&pos, &san) {
            Some(mv) => {
                pos = pos.apply(mv);
                history.push(pos.clone());
            }
            None => {
                log::warn!("replay stopped at unrecognised SAN token {san:?}");
                break;
            }
        }
    }
    history
}

#[cfg(test)]
#[path = "san_tests.rs"]
mod san_tests;
