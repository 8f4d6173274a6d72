use tracing::{debug, trace};
use web_time::Instant;

use crate::ai::config::SearchConfig;
use crate::ai::heuristic::{WeightTable, score};
use crate::board::Board;
use crate::error::EngineError;
use crate::types::{Coord, MoveChoice, Side};

const MIN_SCORE: f32 = f32::NEG_INFINITY;
const MAX_SCORE: f32 = f32::INFINITY;

/// Depth-bounded alpha-beta search over the positional heuristic.
///
/// All values are expressed from one fixed `perspective`, the side to move
/// at the root. A node maximizes when that side is to move and minimizes
/// otherwise, so passes keep max and min aligned with the real mover.
pub struct Searcher<'a> {
    weights: &'a WeightTable,
    config: SearchConfig,
    nodes: u64,
}

impl Searcher<'static> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_weights(WeightTable::shared(), config)
    }
}

impl<'a> Searcher<'a> {
    pub fn with_weights(weights: &'a WeightTable, config: SearchConfig) -> Self {
        Self {
            weights,
            config,
            nodes: 0,
        }
    }

    /// Nodes visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Picks the best of `moves` for the side to move on `board`.
    ///
    /// Each candidate is applied to a copy, searched `depth` plies deeper
    /// with a full window, and credited `root_mobility_weight` per legal
    /// reply. Ties go to the earliest candidate.
    pub fn best_move(&mut self, board: &Board, moves: &[Coord]) -> Result<MoveChoice, EngineError> {
        self.config.validate()?;
        if moves.is_empty() {
            return Err(EngineError::NoLegalMoves);
        }

        let start = Instant::now();
        self.nodes = 0;
        let perspective = board.side_to_move();
        let depth = self.config.depth;

        let mut best_index = 0;
        let mut best_score = MIN_SCORE;

        for (index, &mv) in moves.iter().enumerate() {
            let child = board.after(mv)?;
            let bonus = self.config.root_mobility_weight * child.legal_count() as f32;
            let value = self.alpha_beta(&child, depth, MIN_SCORE, MAX_SCORE, perspective) + bonus;
            trace!(index, row = mv.row, col = mv.col, value, "root candidate scored");

            if index == 0 || value > best_score {
                best_index = index;
                best_score = value;
            }
        }

        let choice = MoveChoice {
            index: best_index,
            coord: moves[best_index],
            score: best_score,
            nodes: self.nodes,
        };
        debug!(
            depth,
            candidates = moves.len(),
            index = choice.index,
            score = choice.score,
            nodes = choice.nodes,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search finished"
        );

        Ok(choice)
    }

    /// Value of `board` for `perspective`, looking `depth` plies ahead.
    ///
    /// The node's own heuristic score seeds the running value, so a node is
    /// worth at least (max) or at most (min) its static score. Each child
    /// adds `mobility_weight` per legal reply; the child window is shifted by
    /// that bonus so cutoffs stay exact.
    pub fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        alpha: f32,
        beta: f32,
        perspective: Side,
    ) -> f32 {
        self.nodes += 1;

        let mut value = score(board, perspective, self.weights);
        if depth == 0 || board.legal_mask() == 0 {
            return value;
        }

        let maximizing = board.side_to_move() == perspective;
        let mut alpha = alpha;
        let mut beta = beta;

        for mv in board.legal_moves() {
            let mut child = *board;
            let applied = child.apply_move(mv);
            debug_assert!(applied.is_ok(), "move from legal_moves() rejected: {mv:?}");
            let bonus = self.config.mobility_weight * child.legal_count() as f32;
            let child_value =
                self.alpha_beta(&child, depth - 1, alpha - bonus, beta - bonus, perspective) + bonus;

            if maximizing {
                value = value.max(child_value);
                alpha = alpha.max(value);
            } else {
                value = value.min(child_value);
                beta = beta.min(value);
            }
            if alpha >= beta {
                break;
            }
        }

        value
    }
}
