use std::sync::Arc;

use log::debug;

use crate::core::{
    Direction, GameChangeType, GameState, GameUpdate, HINT_MAX_NODES, MoveRejection,
    SharedGameState, UndoEntry, UndoLog, UserAction, step,
};
use crate::errors::LevelError;
use crate::game::{ActionOutcome, PuzzleGame};
use crate::levels::Level;
use crate::scoring::WeightTable;
use crate::state_graph::solve;

/// A Sokoban level being played: static board, movable entities and undo history.
#[derive(Clone, Debug)]
pub struct SokobanGame {
    shared: Arc<SharedGameState>,
    state: GameState,
    undo: UndoLog,
    last_change: Option<GameChangeType>,
    last_rejection: Option<MoveRejection>,
}

impl SokobanGame {
    pub fn new(state: GameState, shared: SharedGameState, undo_capacity: Option<usize>) -> Self {
        SokobanGame {
            shared: Arc::new(shared),
            state,
            undo: undo_capacity.map_or_else(UndoLog::new, UndoLog::with_capacity),
            last_change: None,
            last_rejection: None,
        }
    }

    pub fn shared(&self) -> &SharedGameState {
        &self.shared
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn last_change(&self) -> Option<GameChangeType> {
        self.last_change
    }

    pub fn last_rejection(&self) -> Option<MoveRejection> {
        self.last_rejection
    }
}

impl PuzzleGame for SokobanGame {
    type Level = Level;
    type Action = Direction;

    const WEIGHTS: WeightTable = WeightTable::SOKOBAN;

    fn load(level: &Level, undo_capacity: Option<usize>) -> Result<Self, LevelError> {
        let (state, shared) = level.parse()?;
        Ok(SokobanGame::new(state, shared, undo_capacity))
    }

    fn par_moves(level: &Level) -> u32 {
        level.par_moves
    }

    fn apply(&mut self, action: Direction, moves_so_far: u32) -> ActionOutcome {
        match step(&self.shared, &self.state, UserAction::Move(action)) {
            GameUpdate::NextState(next, change_type) => {
                self.undo.push(UndoEntry::new(&self.state, moves_so_far));
                self.state = next;
                self.last_change = Some(change_type);
                self.last_rejection = None;
                ActionOutcome::Accepted
            }
            GameUpdate::Rejected(reason) => {
                debug!("Rejected move {action:?}: {reason}");
                self.last_change = None;
                self.last_rejection = Some(reason);
                ActionOutcome::Rejected
            }
        }
    }

    fn undo(&mut self) -> Option<u32> {
        let entry = self.undo.pop()?;
        let moves = entry.moves_at_snapshot;
        self.state = entry.into_state();
        self.last_change = None;
        self.last_rejection = None;
        Some(moves)
    }

    fn is_solved(&self) -> bool {
        self.state.is_won(&self.shared)
    }

    fn hint(&self) -> Option<Direction> {
        let solution = solve(&self.shared, &self.state, HINT_MAX_NODES)?;
        solution.directions().next()
    }
}
