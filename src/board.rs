use crate::error::EngineError;
use crate::types::{BOARD_WIDTH, Cell, Coord, DiscCount, NUM_SQUARES, Side, Winner};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Othello position: two bitboards plus the derived turn state.
///
/// Bit `row * 8 + col` of `black`/`white` marks a disc on that square.
/// `legal` always holds the legal-move mask of `side`; every mutation
/// recomputes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    black: u64,
    white: u64,
    side: Side,
    counts: DiscCount,
    legal: u64,
    terminal: bool,
    winner: Winner,
}

impl Board {
    /// Creates the standard opening with black to move:
    /// (3,3)=white, (3,4)=black, (4,3)=black, (4,4)=white.
    pub fn new() -> Self {
        Self::from_bitboards(bit(28) | bit(35), bit(27) | bit(36), Side::Black)
    }

    /// Builds a board from raw bitboards. Overlapping bits count as black.
    pub fn from_bitboards(black: u64, white: u64, side: Side) -> Self {
        let white = white & !black;
        let mut board = Self {
            black,
            white,
            side,
            counts: recount(black, white),
            legal: 0,
            terminal: false,
            winner: Winner::Undetermined,
        };
        board.refresh_root_status();
        board
    }

    /// Builds a board from 64 row-major cells where 0=empty, 1=black, 2=white.
    pub fn from_cells(cells: &[u8], side: Side) -> Result<Self, EngineError> {
        if cells.len() != NUM_SQUARES {
            return Err(EngineError::InvalidBoardLength(cells.len()));
        }

        let mut black = 0u64;
        let mut white = 0u64;
        for (index, &value) in cells.iter().enumerate() {
            match value {
                0 => {}
                1 => black |= bit(index),
                2 => white |= bit(index),
                _ => return Err(EngineError::InvalidCell { index, value }),
            }
        }

        Ok(Self::from_bitboards(black, white, side))
    }

    pub fn side_to_move(&self) -> Side {
        self.side
    }

    pub fn disc_count(&self) -> DiscCount {
        self.counts
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn winner(&self) -> Winner {
        self.winner
    }

    /// Legal-move mask for the side to move.
    pub fn legal_mask(&self) -> u64 {
        self.legal
    }

    pub fn legal_count(&self) -> u32 {
        self.legal.count_ones()
    }

    /// Legal moves for the side to move, in row-major order.
    pub fn legal_moves(&self) -> Vec<Coord> {
        mask_to_coords(self.legal)
    }

    pub fn is_legal(&self, coord: Coord) -> bool {
        coord.check().is_ok() && (self.legal & bit(coord.index())) != 0
    }

    /// Discs a placement by the side to move would flip. Zero when illegal.
    pub fn flips_for(&self, coord: Coord) -> u64 {
        if coord.check().is_err() || self.terminal {
            return 0;
        }
        let (me, opp) = self.split(self.side);
        collect_flips(coord.index(), me, opp)
    }

    pub fn cell(&self, coord: Coord) -> Cell {
        let square = bit(coord.index());
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// Bitboard of one side's discs.
    pub fn discs(&self, side: Side) -> u64 {
        match side {
            Side::Black => self.black,
            Side::White => self.white,
        }
    }

    /// Places a disc for the side to move and flips captured discs.
    ///
    /// Returns the flipped mask. Afterwards the turn goes to the opponent, or
    /// back to the mover when the opponent has no reply; when neither side
    /// can move the board becomes terminal and the winner is set from the
    /// disc counts. An illegal request leaves the board unchanged.
    pub fn apply_move(&mut self, coord: Coord) -> Result<u64, EngineError> {
        coord.check()?;
        let mover = self.side;
        let (me, opp) = self.split(mover);

        let flips = if self.terminal {
            0
        } else {
            collect_flips(coord.index(), me, opp)
        };
        if flips == 0 {
            return Err(EngineError::InvalidMove {
                row: coord.row,
                col: coord.col,
            });
        }

        let flipped = flips.count_ones() as u8;
        let next_me = me | bit(coord.index()) | flips;
        let next_opp = opp & !flips;
        match mover {
            Side::Black => {
                self.black = next_me;
                self.white = next_opp;
            }
            Side::White => {
                self.white = next_me;
                self.black = next_opp;
            }
        }

        *self.counts.of_mut(mover) += 1 + flipped;
        *self.counts.of_mut(mover.opponent()) -= flipped;
        self.counts.empty -= 1;
        debug_assert_eq!(self.counts, recount(self.black, self.white));

        self.side = mover.opponent();
        self.legal = self.legal_mask_for(self.side);
        if self.legal == 0 {
            self.side = mover;
            self.legal = self.legal_mask_for(mover);
            if self.legal == 0 {
                self.terminal = true;
                self.winner = self.counts.leader();
            }
        }

        Ok(flips)
    }

    /// Returns a copy with `coord` applied.
    pub fn after(&self, coord: Coord) -> Result<Self, EngineError> {
        let mut next = *self;
        next.apply_move(coord)?;
        Ok(next)
    }

    /// Applies `coord`, or forfeits the game for the side to move when the
    /// placement is illegal: the board turns terminal with the opponent as
    /// winner. Returns whether the move was played.
    pub fn play_or_forfeit(&mut self, coord: Coord) -> bool {
        if self.apply_move(coord).is_ok() {
            return true;
        }
        self.winner = self.side.opponent().into();
        self.terminal = true;
        self.legal = 0;
        false
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut cells = [0u8; NUM_SQUARES];
        for (pos, cell) in cells.iter_mut().enumerate() {
            *cell = self.cell(Coord::from_index(pos)).to_u8();
        }
        cells
    }

    fn split(&self, side: Side) -> (u64, u64) {
        match side {
            Side::Black => (self.black, self.white),
            Side::White => (self.white, self.black),
        }
    }

    fn legal_mask_for(&self, side: Side) -> u64 {
        let (me, opp) = self.split(side);
        let occupied = me | opp;
        let mut legal = 0u64;

        for pos in 0..NUM_SQUARES {
            let move_bit = bit(pos);
            if (occupied & move_bit) != 0 {
                continue;
            }
            if collect_flips(pos, me, opp) != 0 {
                legal |= move_bit;
            }
        }

        legal
    }

    // Externally supplied positions keep their side to move; only the
    // "nobody can move" case is resolved here.
    fn refresh_root_status(&mut self) {
        self.legal = self.legal_mask_for(self.side);
        if self.legal == 0 && self.legal_mask_for(self.side.opponent()) == 0 {
            self.terminal = true;
            self.winner = self.counts.leader();
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Lists the set bits of a mask as coordinates, lowest index first.
pub fn mask_to_coords(mut mask: u64) -> Vec<Coord> {
    let mut out = Vec::with_capacity(mask.count_ones() as usize);
    while mask != 0 {
        out.push(Coord::from_index(mask.trailing_zeros() as usize));
        mask &= mask - 1;
    }
    out
}

fn collect_flips(pos: usize, me: u64, opp: u64) -> u64 {
    if pos >= NUM_SQUARES {
        return 0;
    }

    let move_bit = bit(pos);
    if ((me | opp) & move_bit) != 0 {
        return 0;
    }

    let row = (pos / BOARD_WIDTH) as i32;
    let col = (pos % BOARD_WIDTH) as i32;
    let mut flips = 0u64;

    for (dr, dc) in DIRECTIONS {
        let mut r = row + dr;
        let mut c = col + dc;
        let mut line = 0u64;

        while in_bounds(r, c) {
            let square = bit((r as usize) * BOARD_WIDTH + c as usize);
            if (opp & square) != 0 {
                line |= square;
            } else {
                // Own disc closes the line; empty square voids it.
                if (me & square) != 0 {
                    flips |= line;
                }
                break;
            }

            r += dr;
            c += dc;
        }
    }

    flips
}

fn recount(black: u64, white: u64) -> DiscCount {
    let black_count = black.count_ones() as u8;
    let white_count = white.count_ones() as u8;
    DiscCount {
        black: black_count,
        white: white_count,
        empty: NUM_SQUARES as u8 - black_count - white_count,
    }
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_WIDTH as i32).contains(&row) && (0..BOARD_WIDTH as i32).contains(&col)
}
