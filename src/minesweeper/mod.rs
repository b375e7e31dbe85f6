//! Lives-based Minesweeper, played through the same session controller as Sokoban.
//!
//! Revealing a mine does not end the level: it costs the session a life and the mine stays
//! exposed. The level is solved once every safe cell is revealed.

mod board;

pub use board::{MineAction, MineCell, MinesweeperGame};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinefieldLevel {
    pub name: String,
    pub height: i32,
    pub width: i32,
    pub mines: usize,
    /// Seed for mine placement, so a level is the same board every time it is loaded.
    pub seed: u64,
    pub par_moves: u32,
}

impl MinefieldLevel {
    pub fn new(name: &str, height: i32, width: i32, mines: usize, seed: u64, par_moves: u32) -> Self {
        MinefieldLevel {
            name: name.to_string(),
            height,
            width,
            mines,
            seed,
            par_moves,
        }
    }
}
