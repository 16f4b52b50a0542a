//! UCI move text and the `position` command body.

use crate::{board::Position, fen::FenError, movegen::generate_legal, types::*};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(match p {
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            _ => 'q',
        });
    }
    s
}

/// Parse a pure-coordinate move and match it against the legal move list so
/// the castle/en-passant flags come out right. `None` for malformed text or
/// an illegal move.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    if txt.len() < 4 {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt.as_bytes().get(4) {
        Some(b) => Some(PieceKind::from_char(*b as char)?),
        None => None,
    };

    generate_legal(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promo == promo)
}

/// Apply a `position` command body: `startpos | fen <6 fields>` followed by
/// an optional `moves <uci> ...` tail. Unknown or illegal moves abort the
/// tail, leaving the position at the last good state.
pub fn set_position_from_uci(pos: &mut Position, args: &[&str]) -> Result<(), FenError> {
    let mut i = 0;
    match args.first() {
        Some(&"startpos") => {
            *pos = Position::startpos();
            i = 1;
        }
        Some(&"fen") => {
            let fen_fields: Vec<&str> = args[1..]
                .iter()
                .take_while(|&&w| w != "moves")
                .copied()
                .collect();
            *pos = Position::from_fen(&fen_fields.join(" "))?;
            i = 1 + fen_fields.len();
        }
        _ => {
            *pos = Position::startpos();
        }
    }

    if args.get(i) == Some(&"moves") {
        for txt in &args[i + 1..] {
            match parse_uci_move(pos, txt) {
                Some(mv) => *pos = pos.apply(mv),
                None => {
                    log::warn!("ignoring unparseable move {txt:?} in position command");
                    break;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
