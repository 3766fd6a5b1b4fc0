use super::*;

const FULL_CORNERS_BLACK: &str = "
    XOOOOOOX
    OOOOOOOO
    OOOOOOOO
    OOOOXXXX
    XXXXXXXX
    XXXXXXXX
    XXXXXXXX
    XOOOOOOX
";

#[test]
fn test_startpos_layout() {
    let board = Board::startpos();
    assert_eq!(board.disc_count(Side::Black), 2);
    assert_eq!(board.disc_count(Side::White), 2);
    assert_eq!(board.empty_count(), 60);
    assert_eq!(board.side_to_move(), Side::Black);
    assert!(board.white.contains(27) && board.white.contains(36));
    assert!(board.black.contains(28) && board.black.contains(35));
}

#[test]
fn test_startpos_four_moves_one_flip_each() {
    for side in [Side::Black, Side::White] {
        let mut board = Board::startpos();
        board.side_to_move = side;
        let moves = board.legal_moves();
        assert_eq!(moves.popcount(), 4, "{side} should have 4 opening moves");
        for sq in moves {
            assert_eq!(board.flips(sq).popcount(), 1, "{side} move {sq}");
        }
    }
    assert_eq!(
        Board::startpos().legal_moves(),
        Bitboard::from_square(19)
            | Bitboard::from_square(26)
            | Bitboard::from_square(37)
            | Bitboard::from_square(44)
    );
}

#[test]
fn test_make_unmake_restores_board() {
    let mut board = Board::startpos();
    let original = board;
    let snapshot = board.make_move(Move::new(19)).expect("d3 is legal");
    assert_eq!(board.disc_count(Side::Black), 4);
    assert_eq!(board.disc_count(Side::White), 1);
    assert_eq!(board.side_to_move(), Side::White);
    board.unmake_move(snapshot);
    assert_eq!(board, original);
}

#[test]
fn test_illegal_moves_leave_board_unchanged() {
    let mut board = Board::startpos();
    let original = board;

    assert!(!board.play(Move::new(0)), "no line closed from a1");
    assert!(!board.play(Move::new(27)), "occupied square");
    assert!(!board.play(Move::PASS), "pass while moves exist");
    assert!(!board.play(Move::NONE));
    assert_eq!(board, original);
}

#[test]
fn test_pass_accepted_only_when_forced() {
    // White has no move; black still has one on c1.
    let mut board: Board = "
        XO------
        --------
        --------
        --------
        --------
        --------
        --------
        --------
        white"
        .parse()
        .expect("valid diagram");
    assert!(board.legal_moves().is_empty());
    assert!(board.must_pass());
    assert!(!board.is_game_over());
    assert!(board.is_legal(Move::PASS));
    assert!(board.play(Move::PASS));
    assert_eq!(board.side_to_move(), Side::Black);
    assert_eq!(board.legal_moves(), Bitboard::from_square(2));
}

#[test]
fn test_full_board_is_terminal() {
    let board: Board = FULL_CORNERS_BLACK.parse().expect("valid diagram");
    assert_eq!(board.empty_count(), 0);
    assert!(board.legal_moves().is_empty());
    assert!(board.opponent_moves().is_empty());
    assert!(board.is_game_over());
    assert!(!board.must_pass());
    assert_eq!(board.disc_count(Side::Black), 32);
    assert_eq!(board.winner(), None);
}

#[test]
fn test_winner_after_wipeout() {
    let board: Board = "
        XX------
        --------
        --------
        --------
        --------
        --------
        --------
        --------"
        .parse()
        .expect("valid diagram");
    assert!(board.is_game_over());
    assert_eq!(board.winner(), Some(Side::Black));
    assert_eq!(board.disc_difference(Side::White), -2);
}

#[test]
fn test_display_parse_round_trip() {
    let mut board = Board::startpos();
    assert!(board.play(Move::new(37)));
    let text = board.to_string();
    let parsed: Board = text.parse().expect("display output parses");
    assert_eq!(parsed, board);
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        "XO".parse::<Board>(),
        Err(ParseBoardError::WrongCellCount(2))
    );
    let bad = format!("{}Z", "-".repeat(63));
    assert_eq!(bad.parse::<Board>(), Err(ParseBoardError::BadCell('Z')));
    let side = format!("{} purple", "-".repeat(64));
    assert_eq!(
        side.parse::<Board>(),
        Err(ParseBoardError::BadSide("purple".to_string()))
    );

    // A 65th cell is not a side token.
    let extra = format!("{}X", "-".repeat(64));
    assert_eq!(extra.parse::<Board>(), Err(ParseBoardError::WrongCellCount(65)));
    let glued = format!("{}white", "-".repeat(64));
    assert_eq!(glued.parse::<Board>(), Err(ParseBoardError::WrongCellCount(69)));
    let spaced = format!("{} X", "-".repeat(64));
    assert_eq!(spaced.parse::<Board>().map(|b| b.side_to_move()), Ok(Side::Black));
}

#[test]
fn test_from_masks_rejects_overlap() {
    let err = Board::from_masks(Bitboard(0b11), Bitboard(0b10), Side::Black);
    assert_eq!(err, Err(ParseBoardError::Overlap(1)));
}
