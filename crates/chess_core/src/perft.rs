use crate::{board::Position, movegen::generate_legal};

/// Perft node count: the number of leaf positions reachable in exactly
/// `depth` plies. The standard oracle for move generator correctness.
pub fn perft(pos: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generate_legal(pos);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| perft(&pos.apply(mv), depth - 1))
        .sum()
}

/// Per-root-move breakdown, handy for diffing against another engine when
/// a perft total disagrees.
pub fn perft_divide(pos: &Position, depth: u8) -> Vec<(crate::types::Move, u64)> {
    generate_legal(pos)
        .into_iter()
        .map(|mv| {
            let nodes = if depth <= 1 {
                1
            } else {
                perft(&pos.apply(mv), depth - 1)
            };
            (mv, nodes)
        })
        .collect()
}
