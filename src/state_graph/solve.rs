use log::debug;

use crate::core::{GameState, SharedGameState};
use crate::state_graph::models::{PopulateResult, Solution, StateGraph};
use crate::state_graph::populate::populate_step;

/// Breadth-first search for the shortest move sequence that wins from `start`.
///
/// Gives up with `None` once more than `max_nodes` states are known or the reachable space
/// is exhausted without a win.
pub fn solve(shared: &SharedGameState, start: &GameState, max_nodes: usize) -> Option<Solution> {
    if start.is_won(shared) {
        return Some(Solution { steps: Vec::new() });
    }

    let mut graph = StateGraph::new();
    graph.upsert_state(start.clone());

    loop {
        if graph.len() > max_nodes {
            debug!("Solver gave up after {} states", graph.len());
            return None;
        }
        match populate_step(&mut graph, shared) {
            PopulateResult::Populated => {}
            PopulateResult::AllVisited => {
                debug!("No solution among {} states", graph.len());
                return None;
            }
            PopulateResult::Won(won_id) => {
                let steps = graph
                    .path_to(won_id)
                    .into_iter()
                    .map(|edge| (edge.direction, edge.game_change_type))
                    .collect();
                debug!("Solved after exploring {} states", graph.len());
                return Some(Solution { steps });
            }
        }
    }
}
