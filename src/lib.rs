//! Puzzle session engine: a Sokoban rules core and a generic timed session lifecycle
//! (ready, playing, finished) with scoring, hint and lives budgets.

pub mod console_interface;
pub mod core;
pub mod errors;
pub mod game;
pub mod levels;
pub mod minesweeper;
pub mod models;
pub mod scoring;
pub mod session;
pub mod state_graph;
pub mod ticker;

#[cfg(test)]
mod test;
