use super::*;
use crate::types::{coord_to_sq, Color};

fn sq(c: &str) -> u8 {
    coord_to_sq(c).unwrap()
}

#[test]
fn test_mailbox_round_trip() {
    for s in 0..64u8 {
        assert_eq!(MAILBOX[MAILBOX64[s as usize] as usize], s as i8);
    }
    // Border cells are sentinels.
    assert_eq!(MAILBOX[0], -1);
    assert_eq!(MAILBOX[119], -1);
}

#[test]
fn test_mailbox_step_edges() {
    // Knight on a8 can only reach b6 and c7.
    let reachable: Vec<u8> = KNIGHT_OFFSETS
        .iter()
        .filter_map(|&o| mailbox_step(sq("a8"), o))
        .collect();
    assert_eq!(reachable.len(), 2);
    assert!(reachable.contains(&sq("b6")));
    assert!(reachable.contains(&sq("c7")));
}

#[test]
fn test_knight_attack() {
    let pos = Position::from_fen("8/8/8/8/4N3/8/8/8 w - - 0 1").unwrap();
    for target in ["d6", "f6", "c5", "g5", "c3", "g3", "d2", "f2"] {
        assert!(attacked(&pos, sq(target), Color::White), "{target}");
    }
    assert!(!attacked(&pos, sq("e5"), Color::White));
}

#[test]
fn test_pawn_attacks_are_diagonal_only() {
    let pos = Position::from_fen("8/8/8/8/4P3/8/8/8 w - - 0 1").unwrap();
    assert!(attacked(&pos, sq("d5"), Color::White));
    assert!(attacked(&pos, sq("f5"), Color::White));
    // A push square is not an attack.
    assert!(!attacked(&pos, sq("e5"), Color::White));

    let pos = Position::from_fen("8/8/8/4p3/8/8/8/8 b - - 0 1").unwrap();
    assert!(attacked(&pos, sq("d4"), Color::Black));
    assert!(attacked(&pos, sq("f4"), Color::Black));
    assert!(!attacked(&pos, sq("e4"), Color::Black));
}

#[test]
fn test_slider_blocked_by_any_piece() {
    // Rook a1 sees up to the blocker on a4 but not past it.
    let pos = Position::from_fen("8/8/8/8/P7/8/8/R7 w - - 0 1").unwrap();
    assert!(attacked(&pos, sq("a2"), Color::White));
    assert!(attacked(&pos, sq("a3"), Color::White));
    assert!(attacked(&pos, sq("a4"), Color::White));
    assert!(!attacked(&pos, sq("a5"), Color::White));
    assert!(attacked(&pos, sq("h1"), Color::White));
}

#[test]
fn test_in_check_rook_on_file() {
    let pos = Position::from_fen("4r3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(pos.in_check(Color::White));
    assert!(!pos.in_check(Color::Black));
}

#[test]
fn test_queen_diagonal_check() {
    let pos = Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
        .unwrap();
    assert!(pos.in_check(Color::White));
}
