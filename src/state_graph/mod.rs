mod graph;
mod models;
mod populate;
mod solve;

pub use models::{Edge, PopulateResult, Solution, StateGraph};
pub use populate::{populate_node, populate_step};
pub use solve::solve;
