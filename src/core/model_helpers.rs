use crate::core::{Cell, Direction, GameState, GameUpdate, SharedGameState, UserAction, Vec2};

impl GameState {
    /// True when there is at least one box and every box rests on a target.
    pub fn is_won(&self, shared: &SharedGameState) -> bool {
        !self.boxes.is_empty() && self.boxes.iter().all(|b| shared.targets.contains(b))
    }
}

impl GameUpdate {
    pub fn is_accepted(&self) -> bool {
        matches!(self, GameUpdate::NextState(..))
    }
}

impl SharedGameState {
    pub fn height(&self) -> i32 {
        self.grid.size().height
    }

    pub fn width(&self) -> i32 {
        self.grid.size().width
    }

    pub fn is_walkable(&self, pos: &Vec2) -> bool {
        matches!(self.grid.get(pos), Some(Cell::Floor))
    }

    pub fn total_targets(&self) -> usize {
        self.targets.len()
    }
}

impl UserAction {
    pub fn all_actions() -> Vec<UserAction> {
        vec![
            UserAction::Move(Direction::Up),
            UserAction::Move(Direction::Down),
            UserAction::Move(Direction::Left),
            UserAction::Move(Direction::Right),
        ]
    }
}
