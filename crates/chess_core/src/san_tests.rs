use super::*;
use crate::uci::parse_uci_move;

#[test]
fn test_checkmate_notation() {
    let pos =
        Position::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4")
            .unwrap();
    let mates: Vec<String> = generate_legal(&pos)
        .into_iter()
        .map(|m| san_from_move(&pos, m))
        .filter(|s| s.ends_with('#'))
        .collect();
    assert_eq!(mates, vec!["Qxf7#".to_string()]);
}

#[test]
fn test_check_notation() {
    let pos = Position::from_fen("rnbqkbnr/ppp2ppp/8/3pp3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 4")
        .unwrap();
    let checks: Vec<String> = generate_legal(&pos)
        .into_iter()
        .map(|m| san_from_move(&pos, m))
        .filter(|s| s.ends_with('+'))
        .collect();
    assert_eq!(checks, vec!["Bb5+".to_string()]);
}

#[test]
fn test_en_passant_is_a_pawn_capture() {
    let pos = Position::from_fen("rnbqkbnr/ppp1pp1p/6p1/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
        .unwrap();
    let ep = generate_legal(&pos)
        .into_iter()
        .find(|m| m.is_en_passant)
        .unwrap();
    assert_eq!(san_from_move(&pos, ep), "exd6");
}

#[test]
fn test_knight_disambiguation_by_file() {
    // Knights on c3 and d4 both reach b5.
    let pos =
        Position::from_fen("r1bqkb1r/pppppp1p/2n2np1/8/3N4/2N5/PPPPPPPP/R1BQKB1R w KQkq - 0 4")
            .unwrap();
    let to_b5: Vec<String> = generate_legal(&pos)
        .into_iter()
        .filter(|m| m.to == coord_to_sq("b5").unwrap())
        .map(|m| san_from_move(&pos, m))
        .collect();
    assert_eq!(to_b5.len(), 2);
    assert!(to_b5.contains(&"Ncb5".to_string()));
    assert!(to_b5.contains(&"Ndb5".to_string()));
}

#[test]
fn test_rook_disambiguation_by_rank() {
    // Rooks on a1 and a5 both reach a3; files match so ranks must be used.
    let pos = Position::from_fen("7k/8/8/R7/8/8/8/R3K3 w - - 0 1").unwrap();
    let to_a3: Vec<String> = generate_legal(&pos)
        .into_iter()
        .filter(|m| m.to == coord_to_sq("a3").unwrap())
        .map(|m| san_from_move(&pos, m))
        .collect();
    assert_eq!(to_a3.len(), 2);
    assert!(to_a3.contains(&"R1a3".to_string()));
    assert!(to_a3.contains(&"R5a3".to_string()));
}

#[test]
fn test_promotion_notation() {
    // The new queen checks along the back rank; the king slips to h7.
    let pos = Position::from_fen("7k/P7/8/8/8/8/7p/7K w - - 0 1").unwrap();
    let promo = generate_legal(&pos)
        .into_iter()
        .find(|m| m.promo == Some(PieceKind::Queen))
        .unwrap();
    assert_eq!(san_from_move(&pos, promo), "a8=Q+");

    // A quiet underpromotion carries no suffix.
    let under = generate_legal(&pos)
        .into_iter()
        .find(|m| m.promo == Some(PieceKind::Bishop))
        .unwrap();
    assert_eq!(san_from_move(&pos, under), "a8=B");
}

#[test]
fn test_castling_notation() {
    let pos = Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
    let sans: Vec<String> = generate_legal(&pos)
        .into_iter()
        .filter(|m| m.is_castle)
        .map(|m| san_from_move(&pos, m))
        .collect();
    assert!(sans.contains(&"O-O".to_string()));
    assert!(sans.contains(&"O-O-O".to_string()));
}

#[test]
fn test_parse_san_round_trip() {
    let pos = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    for mv in generate_legal(&pos) {
        let san = san_from_move(&pos, mv);
        assert_eq!(parse_san(&pos, &san), Some(mv), "{san}");
    }
}

#[test]
fn test_parse_san_ignores_check_marks() {
    let pos = Position::from_fen("rnbqkbnr/ppp2ppp/8/3pp3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 4")
        .unwrap();
    let expected = parse_uci_move(&pos, "f1b5").unwrap();
    assert_eq!(parse_san(&pos, "Bb5"), Some(expected));
    assert_eq!(parse_san(&pos, "Bb5+"), Some(expected));
}

#[test]
fn test_replay_pgn_scholars_mate() {
    let history = replay_pgn("1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6 4. Qxf7#");
    assert_eq!(history.len(), 8);
    let last = history.last().unwrap();
    assert!(last.in_check(Color::Black));
    assert!(generate_legal(last).is_empty());
}

#[test]
fn test_replay_pgn_stops_on_bad_token() {
    let history = replay_pgn("1. e4 e5 2. Qh7 d5");
    // Qh7 is not legal; replay keeps the two positions reached plus start.
    assert_eq!(history.len(), 3);
}
