use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::bounded_grid::BoundedGrid;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Cell {
    Wall,
    Floor,
}

/// A (row, column) position on the board. `i` grows downwards, `j` grows to the right.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct Vec2 {
    pub i: i32,
    pub j: i32,
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Self) -> Self::Output {
        Vec2 {
            i: self.i + rhs.i,
            j: self.j + rhs.j,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UserAction {
    Move(Direction),
}

/// Level data which never changes while the level is played.
#[derive(Clone, Debug)]
pub struct SharedGameState {
    pub grid: BoundedGrid<Cell>,
    pub targets: HashSet<Vec2>,
}

/// Positions of the movable entities. Boxes are kept sorted so two states with
/// the same boxes in a different order compare equal.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct GameState {
    pub boxes: Vec<Vec2>,
    pub player: Vec2,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameUpdate {
    NextState(GameState, GameChangeType),
    Rejected(MoveRejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameChangeType {
    PlayerMove,
    PlayerAndBoxMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveRejection {
    OutOfBounds,
    Wall,
    BlockedPush,
}

impl std::fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveRejection::OutOfBounds => write!(f, "Cannot move out of bounds"),
            MoveRejection::Wall => write!(f, "Cannot walk into a wall"),
            MoveRejection::BlockedPush => write!(f, "Cannot push block"),
        }
    }
}
