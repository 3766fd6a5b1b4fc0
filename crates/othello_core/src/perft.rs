use crate::board::Board;
use crate::zobrist::ZOBRIST;

/// Leaf count of the game tree below `board` to `depth` plies.
///
/// A forced pass counts as a ply. A finished game is a leaf regardless of
/// the remaining depth.
pub fn perft(board: &mut Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves();
    if moves.is_empty() {
        if board.opponent_moves().is_empty() {
            return 1;
        }
        let snapshot = board.pass();
        let nodes = perft(board, depth - 1);
        board.unmake_move(snapshot);
        return nodes;
    }

    if depth == 1 {
        return moves.popcount() as u64;
    }

    let mut nodes = 0u64;
    for sq in moves {
        let flipped = board.flips(sq);
        let snapshot = board.make_move_with_flips(sq, flipped);
        nodes += perft(board, depth - 1);
        board.unmake_move(snapshot);
    }
    nodes
}

/// Like [`perft`], but also checks at every node that the incrementally
/// updated hash matches a from-scratch hash. Returns None on a mismatch.
pub fn perft_hashed(board: &mut Board, depth: u8) -> Option<u64> {
    fn inner(board: &mut Board, depth: u8, hash: u64) -> Option<u64> {
        if hash != ZOBRIST.hash(board) {
            return None;
        }
        if depth == 0 {
            return Some(1);
        }
        let moves = board.legal_moves();
        if moves.is_empty() {
            if board.opponent_moves().is_empty() {
                return Some(1);
            }
            let snapshot = board.pass();
            let nodes = inner(board, depth - 1, ZOBRIST.pass(hash));
            board.unmake_move(snapshot);
            return nodes;
        }

        let mut nodes = 0u64;
        for sq in moves {
            let mover = board.side_to_move;
            let flipped = board.flips(sq);
            let child = ZOBRIST.update(hash, sq, flipped, mover);
            let snapshot = board.make_move_with_flips(sq, flipped);
            let sub = inner(board, depth - 1, child);
            board.unmake_move(snapshot);
            nodes += sub?;
        }
        Some(nodes)
    }

    let hash = ZOBRIST.hash(board);
    inner(board, depth, hash)
}
