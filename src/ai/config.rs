//! Search tuning parameters.

use serde::Deserialize;

use crate::error::EngineError;

/// Deepest search accepted. No time cutoff exists, so depth is the only
/// bound on work; each extra two plies cost roughly ten times more.
pub const MAX_DEPTH: u8 = 12;

/// Configuration for the alpha-beta search.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched below each root candidate.
    pub depth: u8,

    /// Bonus per legal reply added to every child value inside the tree.
    pub mobility_weight: f32,

    /// Bonus per legal reply added to root candidates. Deliberately larger
    /// than `mobility_weight`.
    pub root_mobility_weight: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 6,
            mobility_weight: 1.5,
            root_mobility_weight: 2.0,
        }
    }
}

impl SearchConfig {
    /// Builder pattern: set search depth.
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Builder pattern: set in-tree mobility weight.
    pub fn with_mobility_weight(mut self, weight: f32) -> Self {
        self.mobility_weight = weight;
        self
    }

    /// Builder pattern: set root mobility weight.
    pub fn with_root_mobility_weight(mut self, weight: f32) -> Self {
        self.root_mobility_weight = weight;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.depth > MAX_DEPTH {
            return Err(EngineError::InvalidConfig(format!(
                "depth must be at most {MAX_DEPTH}, got {}",
                self.depth
            )));
        }
        if !self.mobility_weight.is_finite() {
            return Err(EngineError::InvalidConfig(format!(
                "mobility_weight must be finite, got {}",
                self.mobility_weight
            )));
        }
        if !self.root_mobility_weight.is_finite() {
            return Err(EngineError::InvalidConfig(format!(
                "root_mobility_weight must be finite, got {}",
                self.root_mobility_weight
            )));
        }
        Ok(())
    }
}
