//! Property tests for board state restoration.

use proptest::prelude::*;

use drop_four::{BitBoard, Player};

/// Play every legal move from `columns` in order, alternating players,
/// and return the moves actually applied.
fn play_all(board: &mut BitBoard, columns: &[usize]) -> Vec<(usize, Player)> {
    let mut applied = Vec::new();
    let mut player = Player::One;
    for &col in columns {
        if board.is_full(col) {
            continue;
        }
        board.place(col, player);
        applied.push((col, player));
        player = player.opponent();
    }
    applied
}

proptest! {
    #[test]
    fn lifo_unwind_restores_exact_state(
        columns in prop::collection::vec(0usize..7, 0..40),
    ) {
        let mut board = BitBoard::new();
        board.init(6, 7, None, &[0; 42]);
        let initial = board.clone();

        let applied = play_all(&mut board, &columns);
        for &(col, player) in applied.iter().rev() {
            board.remove(col, player);
        }

        prop_assert_eq!(board, initial);
    }

    #[test]
    fn reinit_restores_exact_state(
        columns in prop::collection::vec(0usize..7, 0..40),
    ) {
        let mut board = BitBoard::new();
        board.init(6, 7, None, &[0; 42]);
        let initial = board.clone();

        play_all(&mut board, &columns);
        board.reinit();

        prop_assert_eq!(board, initial);
    }

    #[test]
    fn lifo_unwind_restores_exact_state_with_blocked_cell(
        columns in prop::collection::vec(0usize..7, 0..40),
        blocked_row in 0usize..6,
        blocked_col in 0usize..7,
    ) {
        let mut board = BitBoard::new();
        board.init(6, 7, Some((blocked_row, blocked_col)), &[0; 42]);
        let initial = board.clone();

        let applied = play_all(&mut board, &columns);
        for &(col, player) in applied.iter().rev() {
            board.remove(col, player);
        }

        prop_assert_eq!(board, initial);
    }

    #[test]
    fn heights_never_exceed_board(
        columns in prop::collection::vec(0usize..7, 0..60),
    ) {
        let mut board = BitBoard::new();
        board.init(6, 7, None, &[0; 42]);

        play_all(&mut board, &columns);

        for col in 0..7 {
            prop_assert!(board.top(col) <= 6);
        }
    }

    #[test]
    fn tie_iff_all_columns_full(
        columns in prop::collection::vec(0usize..7, 0..80),
    ) {
        let mut board = BitBoard::new();
        board.init(6, 7, None, &[0; 42]);

        play_all(&mut board, &columns);

        let all_full = (0..7).all(|col| board.is_full(col));
        prop_assert_eq!(board.is_tie(), all_full);
    }
}
