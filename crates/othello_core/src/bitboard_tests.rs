use super::*;

#[test]
fn test_from_square() {
    assert_eq!(Bitboard::from_square(0).0, 1); // a1
    assert_eq!(Bitboard::from_square(7).0, 128); // h1
    assert_eq!(Bitboard::from_square(63).0, 1 << 63); // h8
}

#[test]
fn test_popcount() {
    assert_eq!(Bitboard::EMPTY.popcount(), 0);
    assert_eq!(Bitboard::CORNERS.popcount(), 4);
    assert_eq!(Bitboard::X_SQUARES.popcount(), 4);
    assert_eq!(Bitboard::C_SQUARES.popcount(), 8);
    assert_eq!(Bitboard::EDGES.popcount(), 28);
    assert_eq!(Bitboard::ALL.popcount(), 64);
}

#[test]
fn test_square_classes() {
    for sq in [0u8, 7, 56, 63] {
        assert!(Bitboard::CORNERS.contains(sq));
    }
    for sq in [9u8, 14, 49, 54] {
        assert!(Bitboard::X_SQUARES.contains(sq));
    }
    assert!((Bitboard::CORNERS & Bitboard::C_SQUARES).is_empty());
    assert_eq!(Bitboard::C_SQUARES & Bitboard::EDGES, Bitboard::C_SQUARES);
    assert!((Bitboard::X_SQUARES & Bitboard::EDGES).is_empty());
}

#[test]
fn test_iterator() {
    let bb = Bitboard(0b1010);
    let squares: Vec<u8> = bb.collect();
    assert_eq!(squares, vec![1, 3]);
}

#[test]
fn test_bit_scan_forward() {
    assert_eq!(Bitboard::from_square(37).bit_scan_forward(), 37);
    assert_eq!(Bitboard(0b1100).bit_scan_forward(), 2);
    assert_eq!(Bitboard::CORNERS.bit_scan_forward(), 0);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "empty bitboard")]
fn test_bit_scan_forward_empty_panics_in_debug() {
    let _ = Bitboard::EMPTY.bit_scan_forward();
}

#[test]
fn test_shifts() {
    let a1 = Bitboard::from_square(0);
    assert_eq!(a1.shift(Direction::North), Bitboard::from_square(8));
    assert_eq!(a1.shift(Direction::East), Bitboard::from_square(1));
    assert_eq!(a1.shift(Direction::West), Bitboard::EMPTY);
    assert_eq!(a1.shift(Direction::South), Bitboard::EMPTY);

    let h1 = Bitboard::from_square(7);
    assert_eq!(h1.shift(Direction::East), Bitboard::EMPTY);
    assert_eq!(h1.shift(Direction::NorthEast), Bitboard::EMPTY);
    assert_eq!(h1.shift(Direction::West), Bitboard::from_square(6));
    assert_eq!(h1.shift(Direction::NorthWest), Bitboard::from_square(14));
}

#[test]
fn test_shift_never_wraps_from_any_edge_square() {
    for sq in Bitboard::EDGES {
        let file = (sq % 8) as i8;
        let rank = (sq / 8) as i8;
        for dir in Direction::ALL {
            let (df, dr) = dir.file_rank_delta();
            let (f, r) = (file + df, rank + dr);
            let expected = if (0..8).contains(&f) && (0..8).contains(&r) {
                Bitboard::from_square((r * 8 + f) as u8)
            } else {
                Bitboard::EMPTY
            };
            assert_eq!(
                Bitboard::from_square(sq).shift(dir),
                expected,
                "square {sq} direction {dir:?}"
            );
        }
    }
}

#[test]
fn test_neighbours() {
    assert_eq!(
        Bitboard::from_square(0).neighbours(),
        Bitboard::from_square(1) | Bitboard::from_square(8) | Bitboard::from_square(9)
    );
    assert_eq!(Bitboard::from_square(27).neighbours().popcount(), 8);
}
