use super::*;

// Key fixtures from the Polyglot book format specification.
const KEY_FIXTURES: [(&str, u64); 9] = [
    (
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        0x463B96181691FC9C,
    ),
    (
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        0x823C9B50FD114196,
    ),
    (
        "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
        0x0756B94461C50FB0,
    ),
    (
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2",
        0x662FAFB965DB29D4,
    ),
    (
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        0x22A48B5A8E47FF78,
    ),
    (
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPPKPPP/RNBQ1BNR b kq - 0 3",
        0x652A607CA3F242C1,
    ),
    (
        "rnbq1bnr/ppp1pkpp/8/3pPp2/8/8/PPPPKPPP/RNBQ1BNR w - - 0 4",
        0x00FDD303C946BDD9,
    ),
    (
        "rnbqkbnr/p1pppppp/8/8/PpP4P/8/1P1PPPP1/RNBQKBNR b KQkq c3 0 3",
        0x3C8123EA7B067637,
    ),
    (
        "rnbqkbnr/p1pppppp/8/8/P6P/R1p5/1P1PPPP1/1NBQKBNR b Kkq - 0 4",
        0x5C3F9B829B279560,
    ),
];

#[test]
fn test_published_key_fixtures() {
    for (fen, want) in KEY_FIXTURES {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(polyglot_key(&pos), want, "key mismatch for {fen}");
    }
}

#[test]
fn test_ep_file_hashed_only_when_capture_possible() {
    // After e2e4 the EP square is e3, but no black pawn can take; the key
    // must equal the same position with no EP square at all.
    let with_ep =
        Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
    let without =
        Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1").unwrap();
    assert_eq!(polyglot_key(&with_ep), polyglot_key(&without));

    // With a white pawn on e5 the f6 EP square is live and must be hashed.
    let live =
        Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
            .unwrap();
    let dead =
        Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq - 0 3")
            .unwrap();
    assert_ne!(polyglot_key(&live), polyglot_key(&dead));
}

#[test]
fn test_side_to_move_changes_key() {
    let white =
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    let black =
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1").unwrap();
    assert_eq!(
        polyglot_key(&white) ^ polyglot_key(&black),
        RANDOM64[780]
    );
}
