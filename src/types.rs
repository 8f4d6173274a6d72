use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const BOARD_WIDTH: usize = 8;
pub const NUM_SQUARES: usize = BOARD_WIDTH * BOARD_WIDTH;

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    /// Builds a coordinate, rejecting rows or columns outside `0..8`.
    pub fn new(row: u8, col: u8) -> Result<Self, EngineError> {
        let coord = Self { row, col };
        coord.check()?;
        Ok(coord)
    }

    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < NUM_SQUARES);
        Self {
            row: (index / BOARD_WIDTH) as u8,
            col: (index % BOARD_WIDTH) as u8,
        }
    }

    /// Bit index `row * 8 + col`.
    pub fn index(self) -> usize {
        self.row as usize * BOARD_WIDTH + self.col as usize
    }

    pub(crate) fn check(self) -> Result<(), EngineError> {
        if self.row as usize >= BOARD_WIDTH || self.col as usize >= BOARD_WIDTH {
            return Err(EngineError::CoordOutOfRange {
                row: self.row,
                col: self.col,
            });
        }
        Ok(())
    }
}

/// The two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// Decodes the wire value: 1=black, 2=white.
    pub fn from_u8(value: u8) -> Result<Self, EngineError> {
        match value {
            1 => Ok(Self::Black),
            2 => Ok(Self::White),
            other => Err(EngineError::InvalidPlayer(other)),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Self::Black => 1,
            Self::White => 2,
        }
    }
}

/// Content of one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Black => 1,
            Self::White => 2,
        }
    }
}

/// Game result. Only meaningful once the board is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    Black,
    White,
    Draw,
    Undetermined,
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Self::Black,
            Side::White => Self::White,
        }
    }
}

/// Number of squares in each state. Always sums to 64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscCount {
    pub black: u8,
    pub white: u8,
    pub empty: u8,
}

impl DiscCount {
    pub(crate) fn of_mut(&mut self, side: Side) -> &mut u8 {
        match side {
            Side::Black => &mut self.black,
            Side::White => &mut self.white,
        }
    }

    pub fn total(&self) -> usize {
        self.black as usize + self.white as usize + self.empty as usize
    }

    /// Winner by disc majority; equal counts are a draw.
    pub fn leader(&self) -> Winner {
        if self.black > self.white {
            Winner::Black
        } else if self.white > self.black {
            Winner::White
        } else {
            Winner::Draw
        }
    }
}

/// Result of a move search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoveChoice {
    /// Position of the chosen move in the candidate list.
    pub index: usize,
    pub coord: Coord,
    pub score: f32,
    pub nodes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_new_rejects_out_of_range() {
        assert_eq!(
            Coord::new(8, 0).unwrap_err(),
            EngineError::CoordOutOfRange { row: 8, col: 0 }
        );
        assert!(Coord::new(7, 7).is_ok());
    }

    #[test]
    fn coord_index_is_row_major() {
        let coord = Coord::new(2, 3).unwrap();

        assert_eq!(coord.index(), 19);
        assert_eq!(Coord::from_index(19), coord);
    }

    #[test]
    fn side_wire_values_round_trip() {
        assert_eq!(Side::from_u8(1).unwrap(), Side::Black);
        assert_eq!(Side::from_u8(2).unwrap(), Side::White);
        assert_eq!(Side::from_u8(0).unwrap_err(), EngineError::InvalidPlayer(0));
        assert_eq!(Side::White.to_u8(), 2);
    }

    #[test]
    fn leader_breaks_ties_as_draw() {
        let even = DiscCount {
            black: 32,
            white: 32,
            empty: 0,
        };
        let black_ahead = DiscCount {
            black: 40,
            white: 20,
            empty: 4,
        };

        assert_eq!(even.leader(), Winner::Draw);
        assert_eq!(black_ahead.leader(), Winner::Black);
    }
}
