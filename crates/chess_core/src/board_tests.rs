use super::*;
use crate::types::coord_to_sq;
use crate::uci::parse_uci_move;

fn sq(c: &str) -> u8 {
    coord_to_sq(c).unwrap()
}

#[test]
fn test_startpos_layout() {
    let pos = Position::startpos();
    assert_eq!(
        pos.piece_at(sq("e1")),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::King
        })
    );
    assert_eq!(
        pos.piece_at(sq("d8")),
        Some(Piece {
            color: Color::Black,
            kind: PieceKind::Queen
        })
    );
    assert_eq!(pos.piece_at(sq("e4")), None);
    assert_eq!(pos.king_sq(Color::White), Some(sq("e1")));
    assert_eq!(pos.king_sq(Color::Black), Some(sq("e8")));
}

#[test]
fn test_apply_does_not_mutate_source() {
    let pos = Position::startpos();
    let mv = parse_uci_move(&pos, "e2e4").unwrap();
    let next = pos.apply(mv);
    assert_eq!(pos.piece_at(sq("e2")).map(|p| p.kind), Some(PieceKind::Pawn));
    assert_eq!(next.piece_at(sq("e2")), None);
    assert_eq!(pos.side_to_move, Color::White);
    assert_eq!(next.side_to_move, Color::Black);
}

#[test]
fn test_halfmove_clock_resets_on_pawn_move_and_capture() {
    let mut pos = Position::startpos();
    for (uci, expected) in [
        ("g1f3", 1u32), // knight move ticks
        ("b8c6", 2),
        ("e2e4", 0), // pawn move resets
        ("c6d4", 1),
        ("f3d4", 0), // capture resets
    ] {
        let mv = parse_uci_move(&pos, uci).unwrap();
        pos = pos.apply(mv);
        assert_eq!(pos.halfmove_clock, expected, "after {uci}");
    }
}

#[test]
fn test_fullmove_number_increments_after_black() {
    let mut pos = Position::startpos();
    pos = pos.apply(parse_uci_move(&pos, "e2e4").unwrap());
    assert_eq!(pos.fullmove_number, 1);
    pos = pos.apply(parse_uci_move(&pos, "e7e5").unwrap());
    assert_eq!(pos.fullmove_number, 2);
}

#[test]
fn test_ep_target_set_only_after_double_push() {
    let mut pos = Position::startpos();
    pos = pos.apply(parse_uci_move(&pos, "e2e4").unwrap());
    assert_eq!(pos.en_passant, Some(sq("e3")));
    pos = pos.apply(parse_uci_move(&pos, "g8f6").unwrap());
    assert_eq!(pos.en_passant, None);
    pos = pos.apply(parse_uci_move(&pos, "e4e5").unwrap());
    assert_eq!(pos.en_passant, None);
    pos = pos.apply(parse_uci_move(&pos, "d7d5").unwrap());
    assert_eq!(pos.en_passant, Some(sq("d6")));
}

#[test]
fn test_rights_cleared_when_rook_captured_on_home_square() {
    let pos =
        Position::from_fen("r3k2r/8/8/8/8/8/6B1/R3K2R w KQkq - 0 1").unwrap();
    // The g2 bishop takes the a8 rook along the long diagonal.
    let mv = parse_uci_move(&pos, "g2a8").unwrap();
    let next = pos.apply(mv);
    assert!(!next.castling.bq);
    assert!(next.castling.bk);
    assert!(next.castling.wk);
}

#[test]
fn test_king_move_clears_both_rights() {
    let pos = Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
    let next = pos.apply(parse_uci_move(&pos, "e1d1").unwrap());
    assert!(!next.castling.wk);
    assert!(!next.castling.wq);
    assert!(next.castling.bk);
    assert!(next.castling.bq);
}

#[test]
fn test_promotion_replaces_pawn() {
    let pos = Position::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
    let mv = parse_uci_move(&pos, "a7a8r").unwrap();
    let next = pos.apply(mv);
    assert_eq!(
        next.piece_at(sq("a8")),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::Rook
        })
    );
    assert_eq!(next.piece_at(sq("a7")), None);
    assert_eq!(next.halfmove_clock, 0);
}
