use crate::core::models::Vec2;
use crate::core::{GameState, SharedGameState};

#[derive(Eq, PartialEq, Debug)]
pub enum WinnableState {
    WinMaybePossible,
    WinImpossible,
}

const DIRECTIONS_AROUND: [Vec2; 4] = [
    Vec2 { i: 1, j: 0 },
    Vec2 { i: 0, j: 1 },
    Vec2 { i: -1, j: 0 },
    Vec2 { i: 0, j: -1 },
];

/// Cheap deadlock check: a box wedged into a corner off target can never reach one.
pub fn is_winnable(shared: &SharedGameState, game: &GameState) -> WinnableState {
    let total_trapped_boxes = game
        .boxes
        .iter()
        .filter(|&&game_box| is_box_trapped(shared, game_box))
        .count();

    if total_trapped_boxes == 0 {
        WinnableState::WinMaybePossible
    } else {
        WinnableState::WinImpossible
    }
}

/// a box is trapped if the player can never move it, and it is not on a target
fn is_box_trapped(shared: &SharedGameState, game_box: Vec2) -> bool {
    if shared.targets.contains(&game_box) {
        return false;
    }

    // if any 2 consecutive directions are blocked, then we are in a corner, and we are trapped
    let blocked_directions = DIRECTIONS_AROUND.map(|dir| !shared.is_walkable(&(game_box + dir)));

    (0..4).any(|i| blocked_directions[i] && blocked_directions[(i + 1) % 4])
}
