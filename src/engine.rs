use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ai::config::SearchConfig;
use crate::ai::heuristic::WeightTable;
use crate::ai::search::Searcher;
use crate::board::Board;
use crate::error::EngineError;
use crate::types::{Coord, Side};

/// Chooses one of the supplied legal moves, returning its index.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, moves: &[Coord]) -> Result<usize, EngineError>;
}

/// Depth-bounded alpha-beta search. The default selector.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlphaBetaSelector {
    pub config: SearchConfig,
}

impl AlphaBetaSelector {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

impl MoveSelector for AlphaBetaSelector {
    fn select_move(&self, board: &Board, moves: &[Coord]) -> Result<usize, EngineError> {
        let mut searcher = Searcher::new(self.config);
        Ok(searcher.best_move(board, moves)?.index)
    }
}

/// Instant, no-lookahead choice: the candidate with the highest base
/// square weight, first one on ties.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionalSelector;

impl MoveSelector for PositionalSelector {
    fn select_move(&self, _board: &Board, moves: &[Coord]) -> Result<usize, EngineError> {
        let table = WeightTable::shared();
        let mut best: Option<(usize, i32)> = None;
        for (index, &mv) in moves.iter().enumerate() {
            let weight = table.weight(mv);
            if best.is_none_or(|(_, top)| weight > top) {
                best = Some((index, weight));
            }
        }
        best.map(|(index, _)| index).ok_or(EngineError::NoLegalMoves)
    }
}

/// Move request as handed over by the I/O layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoveRequest {
    /// 1=black, 2=white.
    pub player: u8,
    /// 64 row-major cells, 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub legal_moves: Vec<Coord>,
    /// Overrides the search depth when present.
    #[serde(default)]
    pub depth: Option<u8>,
}

/// The chosen move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveReply {
    pub index: usize,
    pub row: u8,
    pub col: u8,
}

impl MoveRequest {
    /// Checks the request and builds the root board.
    ///
    /// Every supplied move must be on the board and legal for `player`, and
    /// a depth override must stay within the search limit.
    pub fn validate(&self) -> Result<Board, EngineError> {
        self.default_selector().config.validate()?;
        let side = Side::from_u8(self.player)?;
        let board = Board::from_cells(&self.board, side)?;
        if self.legal_moves.is_empty() {
            return Err(EngineError::NoLegalMoves);
        }
        for &mv in &self.legal_moves {
            mv.check()?;
            if !board.is_legal(mv) {
                return Err(EngineError::InvalidMove {
                    row: mv.row,
                    col: mv.col,
                });
            }
        }
        Ok(board)
    }

    /// Alpha-beta selector honouring the request's depth override.
    pub fn default_selector(&self) -> AlphaBetaSelector {
        let config = match self.depth {
            Some(depth) => SearchConfig::default().with_depth(depth),
            None => SearchConfig::default(),
        };
        AlphaBetaSelector::new(config)
    }
}

/// Validates `request` and asks `selector` for a move.
pub fn choose_move(
    request: &MoveRequest,
    selector: &dyn MoveSelector,
) -> Result<MoveReply, EngineError> {
    let board = request.validate().inspect_err(|err| {
        warn!(error = %err, "rejected move request");
    })?;

    let index = selector.select_move(&board, &request.legal_moves)?;
    let mv = request
        .legal_moves
        .get(index)
        .copied()
        .ok_or(EngineError::NoLegalMoves)?;

    Ok(MoveReply {
        index,
        row: mv.row,
        col: mv.col,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::config::MAX_DEPTH;

    struct FixedMoveSelector {
        index: usize,
    }

    impl MoveSelector for FixedMoveSelector {
        fn select_move(&self, _board: &Board, _moves: &[Coord]) -> Result<usize, EngineError> {
            Ok(self.index)
        }
    }

    fn at(row: u8, col: u8) -> Coord {
        Coord { row, col }
    }

    fn opening_request() -> MoveRequest {
        MoveRequest {
            player: 1,
            board: Board::new().to_array().to_vec(),
            legal_moves: vec![at(2, 3), at(3, 2), at(4, 5), at(5, 4)],
            depth: Some(2),
        }
    }

    #[test]
    fn choose_move_returns_coordinate_from_request_list() {
        let request = opening_request();

        let reply = choose_move(&request, &request.default_selector()).unwrap();

        assert!(request.legal_moves.contains(&at(reply.row, reply.col)));
        assert_eq!(request.legal_moves[reply.index], at(reply.row, reply.col));
    }

    #[test]
    fn empty_move_list_is_rejected() {
        let mut request = opening_request();
        request.legal_moves.clear();

        let err = choose_move(&request, &PositionalSelector).unwrap_err();

        assert_eq!(err, EngineError::NoLegalMoves);
    }

    #[test]
    fn illegal_supplied_move_is_rejected() {
        let mut request = opening_request();
        request.legal_moves.push(at(0, 0));

        let err = choose_move(&request, &PositionalSelector).unwrap_err();

        assert_eq!(err, EngineError::InvalidMove { row: 0, col: 0 });
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        let mut request = opening_request();
        request.player = 3;
        assert_eq!(request.validate().unwrap_err(), EngineError::InvalidPlayer(3));

        let mut request = opening_request();
        request.board.pop();
        assert_eq!(
            request.validate().unwrap_err(),
            EngineError::InvalidBoardLength(63)
        );

        let mut request = opening_request();
        request.legal_moves.push(at(9, 1));
        assert_eq!(
            request.validate().unwrap_err(),
            EngineError::CoordOutOfRange { row: 9, col: 1 }
        );
    }

    #[test]
    fn over_deep_request_is_rejected_before_searching() {
        let mut request = opening_request();
        request.depth = Some(MAX_DEPTH + 1);

        let err = choose_move(&request, &request.default_selector()).unwrap_err();

        assert!(matches!(err, EngineError::InvalidConfig(_)));

        request.depth = Some(255);
        assert!(matches!(
            request.validate(),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn out_of_range_selector_index_is_an_error() {
        let request = opening_request();

        let err = choose_move(&request, &FixedMoveSelector { index: 9 }).unwrap_err();

        assert_eq!(err, EngineError::NoLegalMoves);
    }

    #[test]
    fn positional_selector_picks_highest_base_weight() {
        let board = Board::new();
        // (2,2) weighs 15, the opening moves weigh 3.
        let moves = [at(2, 3), at(2, 2), at(5, 4)];

        assert_eq!(PositionalSelector.select_move(&board, &moves).unwrap(), 1);
        assert_eq!(
            PositionalSelector.select_move(&board, &moves[..1]).unwrap(),
            0
        );
    }

    #[test]
    fn request_deserializes_from_json() {
        let mut cells = vec![0u8; 64];
        cells[27] = 2;
        cells[28] = 1;
        cells[35] = 1;
        cells[36] = 2;
        let json = serde_json::json!({
            "player": 1,
            "board": cells,
            "legal_moves": [{ "row": 2, "col": 3 }, { "row": 5, "col": 4 }],
        });

        let request: MoveRequest = serde_json::from_value(json).unwrap();

        assert_eq!(request.depth, None);
        assert_eq!(request.default_selector().config, SearchConfig::default());
        assert_eq!(request.validate().unwrap(), Board::new());
    }

    #[test]
    fn reply_serializes_row_and_col() {
        let reply = MoveReply {
            index: 1,
            row: 5,
            col: 4,
        };

        assert_eq!(
            serde_json::to_value(reply).unwrap(),
            serde_json::json!({ "index": 1, "row": 5, "col": 4 })
        );
    }
}
