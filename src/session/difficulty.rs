use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::{EASY_DEFAULTS, HARD_DEFAULTS, MODERATE_DEFAULTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Moderate,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Moderate, Difficulty::Hard];

    pub fn score_multiplier(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.9,
            Difficulty::Moderate => 1.0,
            Difficulty::Hard => 1.1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Budgets granted to a session on a given tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultySettings {
    pub time_limit_seconds: u32,
    pub hints: u32,
    pub lives: u32,
}

impl DifficultySettings {
    pub fn defaults_for(difficulty: Difficulty) -> Self {
        let (time_limit_seconds, hints, lives) = match difficulty {
            Difficulty::Easy => EASY_DEFAULTS,
            Difficulty::Moderate => MODERATE_DEFAULTS,
            Difficulty::Hard => HARD_DEFAULTS,
        };
        DifficultySettings {
            time_limit_seconds,
            hints,
            lives,
        }
    }
}

/// Everything the controller needs besides the levels themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub easy: DifficultySettings,
    pub moderate: DifficultySettings,
    pub hard: DifficultySettings,
    /// Maximum undo depth per level, unbounded when `None`.
    pub undo_capacity: Option<usize>,
    /// When set, a rejected move costs a life.
    pub charge_illegal_moves: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            easy: DifficultySettings::defaults_for(Difficulty::Easy),
            moderate: DifficultySettings::defaults_for(Difficulty::Moderate),
            hard: DifficultySettings::defaults_for(Difficulty::Hard),
            undo_capacity: None,
            charge_illegal_moves: false,
        }
    }
}

impl SessionConfig {
    pub fn settings(&self, difficulty: Difficulty) -> DifficultySettings {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Moderate => self.moderate,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn settings_mut(&mut self, difficulty: Difficulty) -> &mut DifficultySettings {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Moderate => &mut self.moderate,
            Difficulty::Hard => &mut self.hard,
        }
    }
}
