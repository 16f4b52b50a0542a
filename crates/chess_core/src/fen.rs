//! FEN (Forsyth-Edwards Notation) parsing and printing.
//!
//! Six space-separated fields: piece placement (ranks 8 down to 1, digits
//! for runs of empty squares), side to move, castling rights, en-passant
//! target, halfmove clock, fullmove number. Printing then parsing any FEN
//! this module emits reproduces the position exactly.

use crate::board::{CastlingRights, Position};
use crate::types::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("missing {0} field")]
    MissingField(&'static str),
    #[error("invalid piece character {0:?}")]
    BadPiece(char),
    #[error("rank {0} does not describe 8 files")]
    BadRank(usize),
    #[error("expected 8 ranks, found {0}")]
    BadRankCount(usize),
    #[error("invalid side to move {0:?}")]
    BadSideToMove(String),
    #[error("invalid castling character {0:?}")]
    BadCastling(char),
    #[error("invalid en-passant square {0:?}")]
    BadEnPassant(String),
    #[error("invalid {0} counter {1:?}")]
    BadCounter(&'static str, String),
}

pub fn parse_fen(fen: &str) -> Result<Position, FenError> {
    let mut fields = fen.split_whitespace();
    let placement = fields.next().ok_or(FenError::MissingField("board"))?;
    let stm = fields.next().ok_or(FenError::MissingField("side to move"))?;
    let castling = fields.next().ok_or(FenError::MissingField("castling"))?;
    let ep = fields.next().ok_or(FenError::MissingField("en passant"))?;
    let halfmove = fields.next().ok_or(FenError::MissingField("halfmove clock"))?;
    let fullmove = fields.next().ok_or(FenError::MissingField("fullmove number"))?;

    let mut board = [None; 64];
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::BadRankCount(ranks.len()));
    }
    for (row, rank) in ranks.iter().enumerate() {
        // Row 0 of the board array is rank 8, which FEN lists first.
        let mut col = 0usize;
        for ch in rank.chars() {
            if let Some(d) = ch.to_digit(10) {
                col += d as usize;
            } else {
                let kind = PieceKind::from_char(ch).ok_or(FenError::BadPiece(ch))?;
                let color = if ch.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                if col >= 8 {
                    return Err(FenError::BadRank(8 - row));
                }
                board[row * 8 + col] = Some(Piece { color, kind });
                col += 1;
            }
        }
        if col != 8 {
            return Err(FenError::BadRank(8 - row));
        }
    }

    let side_to_move = match stm {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::BadSideToMove(other.to_string())),
    };

    let mut rights = CastlingRights::none();
    if castling != "-" {
        for c in castling.chars() {
            match c {
                'K' => rights.wk = true,
                'Q' => rights.wq = true,
                'k' => rights.bk = true,
                'q' => rights.bq = true,
                other => return Err(FenError::BadCastling(other)),
            }
        }
    }

    let en_passant = if ep == "-" {
        None
    } else {
        Some(coord_to_sq(ep).ok_or_else(|| FenError::BadEnPassant(ep.to_string()))?)
    };

    let halfmove_clock: u32 = halfmove
        .parse()
        .map_err(|_| FenError::BadCounter("halfmove", halfmove.to_string()))?;
    let fullmove_number: u32 = fullmove
        .parse()
        .map_err(|_| FenError::BadCounter("fullmove", fullmove.to_string()))?;

    let mut pos = Position {
        board,
        side_to_move,
        castling: rights,
        en_passant,
        halfmove_clock,
        fullmove_number,
        hash: 0,
    };
    pos.hash = pos.compute_hash();
    Ok(pos)
}

pub fn to_fen(pos: &Position) -> String {
    let mut out = String::with_capacity(80);
    for row in 0..8 {
        let mut empty = 0;
        for col in 0..8 {
            match pos.board[row * 8 + col] {
                None => empty += 1,
                Some(pc) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(pc.kind.to_char(pc.color));
                }
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
        if row < 7 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(match pos.side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });

    out.push(' ');
    if pos.castling == CastlingRights::none() {
        out.push('-');
    } else {
        if pos.castling.wk {
            out.push('K');
        }
        if pos.castling.wq {
            out.push('Q');
        }
        if pos.castling.bk {
            out.push('k');
        }
        if pos.castling.bq {
            out.push('q');
        }
    }

    out.push(' ');
    match pos.en_passant {
        Some(sq) => out.push_str(&sq_to_coord(sq)),
        None => out.push('-'),
    }

    out.push_str(&format!(" {} {}", pos.halfmove_clock, pos.fullmove_number));
    out
}

impl Position {
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        parse_fen(fen)
    }

    pub fn to_fen(&self) -> String {
        to_fen(self)
    }
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
