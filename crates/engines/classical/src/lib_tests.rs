use super::*;
use othello_core::Side;
use rand::seq::SliceRandom;

fn random_position(seed: u64, plies: usize) -> Board {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::startpos();
    for _ in 0..plies {
        let moves: Vec<u8> = board.legal_moves().collect();
        match moves.choose(&mut rng) {
            Some(&sq) => assert!(board.play(Move::new(sq))),
            None if board.must_pass() => {
                board.pass();
            }
            None => break,
        }
    }
    board
}

fn engines() -> Vec<Box<dyn Engine>> {
    vec![
        Box::new(MinimaxEngine::with_depth(3)),
        Box::new(AlphaBetaEngine::with_settings(4, 50_000)),
        Box::new(NegamaxEngine::new(1).with_max_depth(5).with_seed(7)),
    ]
}

const WHITE_MUST_PASS: &str = "
    XO------
    --------
    --------
    --------
    --------
    --------
    --------
    --------
    white";

const ONE_MOVE_LEFT: &str = "
    XXXXXXXX
    XXXXXXXX
    XXXXXXXX
    XXXXXXXX
    XXXXXXXO
    XXXXXXXO
    XXXXXXXO
    OOOOOOO-";

#[test]
fn test_every_engine_plays_legal_moves() {
    for mut engine in engines() {
        for seed in 0..4 {
            let board = random_position(seed, 8 + 6 * seed as usize);
            if board.legal_moves().is_empty() {
                continue;
            }
            let result = engine.search(&board, SearchLimits::depth(6));
            assert!(
                board.is_legal(result.best_move),
                "{} played {} in\n{board}",
                engine.name(),
                result.best_move
            );
            assert!(!result.best_move.is_pass());
        }
    }
}

#[test]
fn test_forced_answers() {
    let must_pass: Board = WHITE_MUST_PASS.parse().expect("valid diagram");
    let finished = Board {
        black: othello_core::Bitboard::ALL,
        white: othello_core::Bitboard::EMPTY,
        side_to_move: Side::White,
    };
    for mut engine in engines() {
        let result = engine.search(&must_pass, SearchLimits::depth(4));
        assert_eq!(result.best_move, Move::PASS, "{}", engine.name());
        assert_eq!(result.nodes, 0);

        let result = engine.search(&finished, SearchLimits::depth(4));
        assert_eq!(result.best_move, Move::NONE, "{}", engine.name());
    }
}

#[test]
fn test_names() {
    let names: Vec<String> = engines().iter().map(|e| e.name().to_string()).collect();
    assert_eq!(names, ["Minimax", "AlphaBeta", "Negamax"]);
}

#[test]
fn test_negamax_plays_single_move_without_search() {
    let board: Board = ONE_MOVE_LEFT.parse().expect("valid diagram");
    let mut engine = NegamaxEngine::new(1);
    let result = engine.search(&board, SearchLimits::depth(10));
    assert_eq!(result.best_move, Move::new(63));
    assert_eq!(result.nodes, 0);
    assert!(!result.from_book);
    assert_eq!(engine.last_stats(), SearchStats::default());
}

#[test]
fn test_negamax_uses_book_in_opening() {
    // Two games both opening f5 d6, which black won.
    let mut bytes = vec![0u8; 16];
    bytes[4..8].copy_from_slice(&2u32.to_le_bytes());
    for _ in 0..2 {
        let mut record = vec![0u8; 68];
        record[7] = 40;
        record[8] = 4 * 10 + 5 + 10; // f5
        record[9] = 5 * 10 + 3 + 10; // d6
        bytes.extend_from_slice(&record);
    }
    let mut book = OpeningBook::new();
    book.load_reader(bytes.as_slice()).expect("valid stream");

    let mut engine = NegamaxEngine::new(1).with_book(Arc::new(book)).with_seed(1);
    let board = Board::startpos();
    let result = engine.search(&board, SearchLimits::depth(6));
    assert!(result.from_book);
    assert_eq!(result.best_move, Move::new(37));

    // Out of book after an unrecorded reply
    let mut board = board;
    assert!(board.play(Move::new(37)));
    assert!(board.play(Move::new(45)));
    let result = engine.search(&board, SearchLimits::depth(3));
    assert!(!result.from_book);
    assert!(board.is_legal(result.best_move));
}

#[test]
fn test_negamax_respects_node_budget() {
    let board = random_position(11, 20);
    assert!(!board.legal_moves().is_empty());
    let mut engine = NegamaxEngine::new(4);
    let result = engine.search(&board, SearchLimits::nodes(5_000));
    assert!(result.stopped);
    assert!(board.is_legal(result.best_move));
    assert!(result.nodes < 5_000 + 2 * othello_core::CHECK_INTERVAL);
    assert!(engine.tt_stats().stores > 0);
}

#[test]
fn test_hard_engine_applies_its_node_cap() {
    let board = random_position(3, 24);
    let mut engine = AlphaBetaEngine::with_settings(12, 4_096);
    let result = engine.search(&board, SearchLimits::depth(12));
    assert!(result.stopped);
    assert!(board.is_legal(result.best_move));
    assert_eq!(result.nodes, 4_096);
}

#[test]
fn test_pruned_and_unpruned_scores_agree() {
    for seed in 20..28u64 {
        let board = random_position(seed, 12);
        if board.legal_moves().is_empty() {
            continue;
        }
        let limits = SearchLimits::depth(3);
        limits.start();
        let mut nodes = 0;
        let full = minimax::pick_best_move(&board, 3, &mut nodes, &limits);
        let pruned = alpha_beta::pick_best_move(&board, 3, &mut nodes, &limits);
        assert_eq!(
            full.best_move.map(|(_, s)| s),
            pruned.best_move.map(|(_, s)| s),
            "seed {seed}\n{board}"
        );
    }
}

#[test]
fn test_new_game_clears_state() {
    let mut engine = NegamaxEngine::new(1).with_max_depth(4);
    let board = random_position(2, 14);
    engine.search(&board, SearchLimits::depth(4));
    assert!(engine.last_stats().nodes > 0);
    engine.new_game();
    assert_eq!(engine.last_stats(), SearchStats::default());
}
