use std::collections::VecDeque;

use crate::core::{GameState, Vec2};

/// Snapshot taken right before an accepted move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UndoEntry {
    pub player: Vec2,
    pub boxes: Vec<Vec2>,
    pub moves_at_snapshot: u32,
}

impl UndoEntry {
    pub fn new(state: &GameState, moves_at_snapshot: u32) -> Self {
        UndoEntry {
            player: state.player,
            boxes: state.boxes.clone(),
            moves_at_snapshot,
        }
    }

    pub fn into_state(self) -> GameState {
        GameState {
            boxes: self.boxes,
            player: self.player,
        }
    }
}

/// Undo history for one level. When a capacity is set the oldest snapshots are dropped.
#[derive(Clone, Debug, Default)]
pub struct UndoLog {
    entries: VecDeque<UndoEntry>,
    capacity: Option<usize>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        UndoLog {
            entries: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    pub fn push(&mut self, entry: UndoEntry) {
        match self.capacity {
            Some(0) => return,
            Some(capacity) if self.entries.len() >= capacity => {
                self.entries.pop_front();
            }
            _ => {}
        }
        self.entries.push_back(entry);
    }

    pub fn pop(&mut self) -> Option<UndoEntry> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
