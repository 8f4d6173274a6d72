use once_cell::sync::Lazy;

use crate::board::Board;
use crate::types::{BOARD_WIDTH, Coord, NUM_SQUARES, Side};

/// Edge cells next to an opponent-held corner weigh this much.
const CORNER_EDGE_OVERRIDE: i32 = 3;
/// The diagonal cell next to an opponent-held corner weighs this much.
const CORNER_DIAGONAL_OVERRIDE: i32 = 2;

/// `(corner, edge neighbours, diagonal neighbour)` as square indices.
const CORNER_REGIONS: [(usize, [usize; 2], usize); 4] = [
    (0, [1, 8], 9),
    (7, [6, 15], 14),
    (56, [48, 57], 49),
    (63, [55, 62], 54),
];

static REFERENCE: Lazy<WeightTable> = Lazy::new(WeightTable::reference);

/// Positional bonus per square, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    weights: [i32; NUM_SQUARES],
}

impl WeightTable {
    /// Shared instance of [`WeightTable::reference`], built on first use.
    pub fn shared() -> &'static WeightTable {
        &REFERENCE
    }

    /// Corners strongly positive, X/C squares strongly negative, edges and
    /// the inner ring mildly weighted.
    pub fn reference() -> Self {
        let mut grid = [[3i32; BOARD_WIDTH]; BOARD_WIDTH];

        for i in 0..BOARD_WIDTH {
            grid[i][1] = -5;
            grid[1][i] = -5;
            grid[i][6] = -5;
            grid[6][i] = -5;
        }

        let mut mirror = |row: usize, col: usize, value: i32| {
            let far = BOARD_WIDTH - 1;
            for (r, c) in [(row, col), (col, row)] {
                grid[r][c] = value;
                grid[far - r][c] = value;
                grid[r][far - c] = value;
                grid[far - r][far - c] = value;
            }
        };
        mirror(0, 3, 5);
        mirror(2, 2, 15);
        mirror(0, 0, 120);
        mirror(0, 1, -20);
        mirror(0, 2, 20);
        mirror(1, 1, -40);

        Self::from_grid(grid)
    }

    pub fn from_grid(grid: [[i32; BOARD_WIDTH]; BOARD_WIDTH]) -> Self {
        let mut weights = [0i32; NUM_SQUARES];
        for (row, values) in grid.iter().enumerate() {
            weights[row * BOARD_WIDTH..(row + 1) * BOARD_WIDTH].copy_from_slice(values);
        }
        Self { weights }
    }

    /// Base weight, ignoring the board.
    pub fn weight(&self, coord: Coord) -> i32 {
        self.weights[coord.index()]
    }

    /// Weight of `coord` when scoring for `side` on `board`.
    ///
    /// Squares around a corner the opponent already owns stop being
    /// dangerous and get a small positive value instead of the base weight.
    pub fn effective_weight(&self, board: &Board, side: Side, coord: Coord) -> i32 {
        self.effective_at(board.discs(side.opponent()), coord.index())
    }

    fn effective_at(&self, opponent: u64, pos: usize) -> i32 {
        for (corner, edges, diagonal) in CORNER_REGIONS {
            if opponent & (1u64 << corner) == 0 {
                continue;
            }
            if edges.contains(&pos) {
                return CORNER_EDGE_OVERRIDE;
            }
            if pos == diagonal {
                return CORNER_DIAGONAL_OVERRIDE;
            }
        }
        self.weights[pos]
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::reference()
    }
}

/// Material plus positional value of `side`'s discs: each disc counts
/// `1 + effective weight`. The opponent's discs only matter through the
/// corner override.
pub fn score(board: &Board, side: Side, table: &WeightTable) -> f32 {
    let opponent = board.discs(side.opponent());
    let mut mine = board.discs(side);
    let mut total = 0i32;

    while mine != 0 {
        let pos = mine.trailing_zeros() as usize;
        total += 1 + table.effective_at(opponent, pos);
        mine &= mine - 1;
    }

    total as f32
}
