use othello_engine::ai::config::SearchConfig;
use othello_engine::ai::heuristic::{WeightTable, score};
use othello_engine::ai::search::Searcher;
use othello_engine::board::Board;
use othello_engine::types::{Coord, Side};
use proptest::prelude::*;

fn random_position(choices: &[u8]) -> Board {
    let mut board = Board::new();
    for &choice in choices {
        let moves = board.legal_moves();
        if moves.is_empty() {
            break;
        }
        board.apply_move(moves[choice as usize % moves.len()]).unwrap();
    }
    board
}

fn minimax(board: &Board, depth: u8, perspective: Side, config: &SearchConfig) -> f32 {
    let mut value = score(board, perspective, WeightTable::shared());
    if depth == 0 || board.legal_mask() == 0 {
        return value;
    }
    let maximizing = board.side_to_move() == perspective;
    for mv in board.legal_moves() {
        let child = board.after(mv).unwrap();
        let child_value = minimax(&child, depth - 1, perspective, config)
            + config.mobility_weight * child.legal_count() as f32;
        value = if maximizing {
            value.max(child_value)
        } else {
            value.min(child_value)
        };
    }
    value
}

/// Root selection without any pruning, first maximum wins.
fn unpruned_best(board: &Board, moves: &[Coord], config: &SearchConfig) -> (usize, f32) {
    let perspective = board.side_to_move();
    let mut best = (0, f32::NEG_INFINITY);
    for (index, &mv) in moves.iter().enumerate() {
        let child = board.after(mv).unwrap();
        let value = minimax(&child, config.depth, perspective, config)
            + config.root_mobility_weight * child.legal_count() as f32;
        if index == 0 || value > best.1 {
            best = (index, value);
        }
    }
    best
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_pruning_never_changes_the_choice(choices in prop::collection::vec(any::<u8>(), 0..24)) {
        let board = random_position(&choices);
        let moves = board.legal_moves();
        prop_assume!(!moves.is_empty());

        let config = SearchConfig::default().with_depth(2);
        let choice = Searcher::new(config).best_move(&board, &moves).unwrap();
        let (index, value) = unpruned_best(&board, &moves, &config);

        prop_assert_eq!(choice.index, index);
        prop_assert_eq!(choice.score, value);
        prop_assert_eq!(choice.coord, moves[index]);
    }

    #[test]
    fn prop_search_is_deterministic(choices in prop::collection::vec(any::<u8>(), 0..30)) {
        let board = random_position(&choices);
        let moves = board.legal_moves();
        prop_assume!(!moves.is_empty());

        let config = SearchConfig::default().with_depth(2);
        let first = Searcher::new(config).best_move(&board, &moves).unwrap();
        let second = Searcher::new(config).best_move(&board, &moves).unwrap();

        prop_assert_eq!(first, second);
    }
}

#[test]
fn depth_three_search_matches_unpruned_choice() {
    let board = random_position(&[3, 1, 4, 1, 5, 9]);
    let moves = board.legal_moves();
    let config = SearchConfig::default().with_depth(3);

    let mut searcher = Searcher::new(config);
    let choice = searcher.best_move(&board, &moves).unwrap();
    let (index, _) = unpruned_best(&board, &moves, &config);

    assert_eq!(choice.index, index);
    assert_eq!(searcher.nodes(), choice.nodes);
}

#[test]
fn white_to_move_searches_for_white() {
    let mut board = Board::new();
    board.apply_move(Coord { row: 2, col: 3 }).unwrap();
    let moves = board.legal_moves();

    let choice = Searcher::new(SearchConfig::default().with_depth(2))
        .best_move(&board, &moves)
        .unwrap();
    let (index, _) = unpruned_best(&board, &moves, &SearchConfig::default().with_depth(2));

    assert_eq!(board.side_to_move(), Side::White);
    assert_eq!(choice.index, index);
}
