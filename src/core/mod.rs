mod bounded_grid;
mod bounds;
mod consts;
mod heuristics;
mod model_helpers;
mod models;
mod parse;
mod undo;
mod update;

pub use bounded_grid::BoundedGrid;
pub use bounds::BoundsOriginRoot;
pub use consts::*;
pub use heuristics::{WinnableState, is_winnable};
pub use models::{
    Cell, Direction, GameChangeType, GameState, GameUpdate, MoveRejection, SharedGameState,
    UserAction, Vec2,
};
pub use parse::{parse_level, parse_level_rows};
pub use undo::{UndoEntry, UndoLog};
pub use update::{step, vec_from_dir};
