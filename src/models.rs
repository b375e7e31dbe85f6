use crate::core::GameChangeType;
use crate::session::{Difficulty, SessionPhase, SessionStats};

/// What the terminal front-end draws on each frame.
pub struct GameRenderState {
    pub board: String,
    pub level_name: Option<String>,
    pub phase: SessionPhase,
    pub difficulty: Difficulty,
    pub stats: SessionStats,
    pub message: Option<String>,
    pub last_change: Option<GameChangeType>,
}
