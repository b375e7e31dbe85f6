use serde::{Deserialize, Serialize};

use crate::session::{Difficulty, DifficultySettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ending {
    Solved,
    TimeExpired,
    LivesExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    Ready,
    Playing,
    Finished(Ending),
}

/// Snapshot handed to observers after every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub level_index: u32,
    pub moves_this_level: u32,
    pub total_moves: u32,
    pub levels_completed: u32,
    pub total_levels: u32,
    pub hints_used: u32,
    pub hints_remaining: u32,
    pub lives_remaining: u32,
    pub time_remaining_seconds: u32,
    pub score: u32,
}

impl SessionStats {
    pub fn fresh(settings: DifficultySettings, total_levels: u32) -> Self {
        SessionStats {
            total_levels,
            hints_remaining: settings.hints,
            lives_remaining: settings.lives,
            time_remaining_seconds: settings.time_limit_seconds,
            ..SessionStats::default()
        }
    }
}

/// Sent once to the completion sink when a session finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionPayload {
    pub final_score: u32,
    pub levels_completed: u32,
    pub total_moves: u32,
    pub duration_seconds: u32,
    pub ending: Ending,
    pub difficulty: Difficulty,
}
