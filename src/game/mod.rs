mod sokoban;

pub use sokoban::SokobanGame;

use crate::errors::LevelError;
use crate::scoring::WeightTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionOutcome {
    /// The action changed the board.
    Accepted,
    /// The action was illegal and nothing changed.
    Rejected,
    /// The action was carried out but was a wrong guess (a mine, a bad answer).
    Mistake,
}

/// One playable level of a puzzle, as driven by the session controller.
pub trait PuzzleGame: Clone {
    type Level;
    type Action: Copy + std::fmt::Debug;

    const WEIGHTS: WeightTable;

    fn load(level: &Self::Level, undo_capacity: Option<usize>) -> Result<Self, LevelError>;

    fn par_moves(level: &Self::Level) -> u32;

    /// `moves_so_far` is the number of moves already made on this level.
    fn apply(&mut self, action: Self::Action, moves_so_far: u32) -> ActionOutcome;

    /// Reverts the last accepted action, returning the move count it was made at.
    fn undo(&mut self) -> Option<u32> {
        None
    }

    fn is_solved(&self) -> bool;

    fn hint(&self) -> Option<Self::Action> {
        None
    }
}
