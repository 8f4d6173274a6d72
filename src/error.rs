use thiserror::Error;

/// Errors raised by the board model, the search and the request boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("illegal move at ({row}, {col})")]
    InvalidMove { row: u8, col: u8 },

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("board must have 64 cells, got {0}")]
    InvalidBoardLength(usize),

    #[error("invalid cell value {value} at index {index}")]
    InvalidCell { index: usize, value: u8 },

    #[error("invalid player value: {0}")]
    InvalidPlayer(u8),

    #[error("row/col out of range: ({row}, {col})")]
    CoordOutOfRange { row: u8, col: u8 },

    #[error("invalid search config: {0}")]
    InvalidConfig(String),
}
