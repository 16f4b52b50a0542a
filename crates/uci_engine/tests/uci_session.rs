//! Black-box tests driving the engine binary over its UCI pipe.

use assert_cmd::Command;

fn session(input: &str) -> String {
    let output = Command::cargo_bin("uci_engine")
        .unwrap()
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_identify_handshake() {
    let out = session("uci\nisready\nquit\n");
    assert!(out.contains("id name Castellan"));
    assert!(out.contains("id author"));
    assert!(out.contains("option name Hash type spin default 16 min 1 max 512"));
    assert!(out.contains("option name Book type string default book.bin"));
    assert!(out.contains("option name UseBook type check default true"));
    assert!(out.contains("uciok"));
    assert!(out.contains("readyok"));
}

#[test]
fn test_go_emits_info_and_bestmove() {
    let out = session(
        "uci\nisready\nucinewgame\nposition startpos\ngo depth 2\nquit\n",
    );
    assert!(out.contains("info depth 1"));
    assert!(out.contains("score cp"));
    assert!(out.contains(" pv "));
    let best = out
        .lines()
        .find(|l| l.starts_with("bestmove "))
        .expect("bestmove line");
    // A coordinate move like e2e4, never the null marker, from startpos.
    let mv = best.trim_start_matches("bestmove ").trim();
    assert!(mv.len() >= 4 && mv != "0000", "unexpected {best:?}");
}

#[test]
fn test_mate_in_one_bestmove() {
    let out = session(
        "position fen r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4\n\
         go depth 2\nquit\n",
    );
    assert!(out.contains("bestmove h5f7"));
}

#[test]
fn test_no_legal_moves_is_null_bestmove() {
    let out = session("position fen 7k/5Q2/6K1/8/8/8/8/8 b - - 0 1\ngo depth 2\nquit\n");
    assert!(out.contains("bestmove 0000"));
}

#[test]
fn test_setoption_and_moves_tail() {
    // Unknown options are ignored; a position with a moves tail searches
    // from the resulting node.
    let out = session(
        "setoption name Ponder value true\n\
         setoption name UseBook value false\n\
         position startpos moves e2e4 e7e5\n\
         go depth 1\nquit\n",
    );
    let best = out
        .lines()
        .find(|l| l.starts_with("bestmove "))
        .expect("bestmove line");
    assert_ne!(best.trim(), "bestmove 0000");
}

#[test]
fn test_unknown_commands_ignored() {
    let out = session("flarp\nuci\nquit\n");
    assert!(out.contains("uciok"));
}
