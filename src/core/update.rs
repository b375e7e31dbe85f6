use crate::core::models::Cell::Wall;
use crate::core::{
    Direction, GameChangeType, GameState, GameUpdate, MoveRejection, SharedGameState, UserAction,
    Vec2,
};

/// Applies one action to `game` without mutating it.
pub fn step(shared: &SharedGameState, game: &GameState, action: UserAction) -> GameUpdate {
    let dir = match action {
        UserAction::Move(d) => vec_from_dir(d),
    };

    let next = game.player + dir;
    match shared.grid.get(&next) {
        None => return GameUpdate::Rejected(MoveRejection::OutOfBounds),
        Some(Wall) => return GameUpdate::Rejected(MoveRejection::Wall),
        Some(_) => {}
    }

    let Some(pushed_index) = game.boxes.iter().position(|b| *b == next) else {
        return GameUpdate::NextState(
            GameState {
                boxes: game.boxes.clone(),
                player: next,
            },
            GameChangeType::PlayerMove,
        );
    };

    let beyond = next + dir;
    let beyond_free = matches!(shared.grid.get(&beyond), Some(cell) if *cell != Wall)
        && !game.boxes.contains(&beyond);
    if !beyond_free {
        return GameUpdate::Rejected(MoveRejection::BlockedPush);
    }

    let mut boxes = game.boxes.clone();
    boxes[pushed_index] = beyond;
    boxes.sort_unstable();

    GameUpdate::NextState(
        GameState {
            boxes,
            player: next,
        },
        GameChangeType::PlayerAndBoxMove,
    )
}

pub fn vec_from_dir(dir: Direction) -> Vec2 {
    match dir {
        Direction::Up => Vec2 { i: -1, j: 0 },
        Direction::Down => Vec2 { i: 1, j: 0 },
        Direction::Left => Vec2 { i: 0, j: -1 },
        Direction::Right => Vec2 { i: 0, j: 1 },
    }
}
