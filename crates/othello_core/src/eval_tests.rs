use super::*;
use crate::types::Move;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[test]
fn test_startpos_is_balanced() {
    let board = Board::startpos();
    assert_eq!(evaluate(&board, Side::Black), 0);
    assert_eq!(evaluate(&board, Side::White), 0);
}

#[test]
fn test_square_table_is_symmetric() {
    for sq in 0..64usize {
        let (rank, file) = (sq / 8, sq % 8);
        let mirrored_file = rank * 8 + (7 - file);
        let mirrored_rank = (7 - rank) * 8 + file;
        let transposed = file * 8 + rank;
        assert_eq!(SQUARE_WEIGHTS[sq], SQUARE_WEIGHTS[mirrored_file]);
        assert_eq!(SQUARE_WEIGHTS[sq], SQUARE_WEIGHTS[mirrored_rank]);
        assert_eq!(SQUARE_WEIGHTS[sq], SQUARE_WEIGHTS[transposed]);
    }
}

#[test]
fn test_corner_beats_x_square() {
    let corner: Board = "
        X-------
        --------
        --------
        ---OX---
        ---XO---
        --------
        --------
        --------"
        .parse()
        .expect("valid diagram");
    let x_square: Board = "
        --------
        -X------
        --------
        ---OX---
        ---XO---
        --------
        --------
        --------"
        .parse()
        .expect("valid diagram");
    assert!(evaluate(&corner, Side::Black) > evaluate(&x_square, Side::Black));
    assert!(corners(corner.black, corner.white) == 1);
}

#[test]
fn test_terminal_score_sign_and_dominance() {
    let black_wins: Board = "
        XXXXXXXX
        XXXXXXXX
        XXXXXXXX
        XXXXXXXX
        XXXXXXXX
        XXXXXXXX
        XXXXXXXO
        OOOOOOOO"
        .parse()
        .expect("valid diagram");
    assert!(black_wins.is_game_over());
    let score = evaluate(&black_wins, Side::Black);
    assert_eq!(score, WIN_SCORE + (55 - 9));
    assert_eq!(evaluate(&black_wins, Side::White), -WIN_SCORE - 46);

    let draw: Board = "
        XXXXXXXX
        XXXXXXXX
        XXXXXXXX
        XXXXXXXX
        OOOOOOOO
        OOOOOOOO
        OOOOOOOO
        OOOOOOOO"
        .parse()
        .expect("valid diagram");
    assert!(draw.is_game_over());
    assert_eq!(evaluate(&draw, Side::Black), 0);
}

#[test]
fn test_heuristic_scores_stay_below_win_score() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let mut board = Board::startpos();
        while !board.is_game_over() {
            for side in [Side::Black, Side::White] {
                let score = evaluate(&board, side);
                assert!(score.abs() < WIN_SCORE, "{score}\n{board}");
                assert_eq!(breakdown(&board, side).total(), score);
            }
            let moves: Vec<u8> = board.legal_moves().collect();
            match moves.choose(&mut rng) {
                Some(&sq) => assert!(board.play(Move::new(sq))),
                None => assert!(board.play(Move::PASS)),
            }
        }
        let diff = board.disc_difference(Side::Black);
        let score = evaluate(&board, Side::Black);
        assert_eq!(score.signum(), diff.signum());
        if diff != 0 {
            assert!(score.abs() > WIN_SCORE);
        }
    }
}

#[test]
fn test_frontier_counts_discs_next_to_empties() {
    let board = Board::startpos();
    // All four centre discs touch an empty square.
    assert_eq!(frontier(&board, board.black, board.white), 0);

    let lone: Board = "
        XXX-----
        XXX-----
        XXX-----
        --------
        --------
        --------
        -------O
        --------"
        .parse()
        .expect("valid diagram");
    // a1, b1, a2 and b2 are enclosed by black; the other five touch empties.
    assert_eq!(frontier(&lone, lone.black, lone.white), 1 - 5);
}

#[test]
fn test_stability_counts_corners_and_edges() {
    let mine = Bitboard::from_square(0) | Bitboard::from_square(1) | Bitboard::from_square(27);
    let theirs = Bitboard::from_square(7);
    assert_eq!(stability(mine, theirs), (5 + 1) - 5);
}
