//! Session scoring.
//!
//! Every game scores a finished session from three efficiency ratios weighted by a
//! per-game [`WeightTable`]. The weighted sum is scaled by the difficulty multiplier and a
//! fixed damping factor, then clamped to `0..=MAX_SCORE` and rounded.

use serde::{Deserialize, Serialize};

use crate::session::Difficulty;

pub const MAX_SCORE: u32 = 200;

/// Keeps a perfect score out of reach on anything but the hardest tier.
pub const SCORE_DAMPING: f64 = 0.97;

/// Raw figures collected by the session controller when it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreInputs {
    pub completed_levels: u32,
    pub total_levels: u32,
    pub total_moves: u32,
    pub sum_par_moves: u32,
    pub time_remaining: u32,
    pub time_limit: u32,
}

impl ScoreInputs {
    pub fn completion_ratio(&self) -> f64 {
        if self.total_levels == 0 {
            0.0
        } else {
            self.completed_levels as f64 / self.total_levels as f64
        }
    }

    pub fn move_efficiency(&self) -> f64 {
        if self.total_moves == 0 {
            1.0
        } else {
            (self.sum_par_moves as f64 / self.total_moves as f64).min(1.0)
        }
    }

    pub fn time_efficiency(&self) -> f64 {
        if self.time_limit == 0 {
            0.0
        } else {
            (self.time_remaining as f64 / self.time_limit as f64).clamp(0.0, 1.0)
        }
    }
}

/// Points awarded for a perfect ratio in each category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    pub completion: f64,
    pub moves: f64,
    pub time: f64,
}

impl WeightTable {
    pub const SOKOBAN: WeightTable = WeightTable {
        completion: 100.0,
        moves: 60.0,
        time: 40.0,
    };

    /// Minesweeper rewards clearing the field and speed; moves matter less since a
    /// single reveal can open a whole region.
    pub const MINESWEEPER: WeightTable = WeightTable {
        completion: 120.0,
        moves: 20.0,
        time: 60.0,
    };
}

pub trait ScoringModel {
    fn weights(&self) -> WeightTable;

    fn raw_score(&self, inputs: &ScoreInputs) -> f64 {
        let weights = self.weights();
        inputs.completion_ratio() * weights.completion
            + inputs.move_efficiency() * weights.moves
            + inputs.time_efficiency() * weights.time
    }

    fn compute_score(&self, inputs: &ScoreInputs, difficulty: Difficulty) -> u32 {
        finalize_score(self.raw_score(inputs), difficulty)
    }
}

impl ScoringModel for WeightTable {
    fn weights(&self) -> WeightTable {
        *self
    }
}

/// Applies the difficulty multiplier and damping, then clamps and rounds.
pub fn finalize_score(raw: f64, difficulty: Difficulty) -> u32 {
    let scaled = raw * difficulty.score_multiplier() * SCORE_DAMPING;
    if !scaled.is_finite() {
        return 0;
    }
    scaled.clamp(0.0, MAX_SCORE as f64).round() as u32
}

/// Sokoban scoring with the default weight table.
pub fn compute_score(inputs: &ScoreInputs, difficulty: Difficulty) -> u32 {
    WeightTable::SOKOBAN.compute_score(inputs, difficulty)
}
