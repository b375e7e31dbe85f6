use crate::core::{
    GameUpdate, SharedGameState, TRIM_UNWINNABLE, UserAction, WinnableState, is_winnable, step,
};
use crate::state_graph::models::{Edge, PopulateResult, StateGraph};

/// Expands one node, returning the id of a won successor if one was found.
pub fn populate_node(graph: &mut StateGraph, shared: &SharedGameState, from_id: usize) -> Option<usize> {
    let from_state = graph.get_state(from_id)?.clone();

    for action in UserAction::all_actions() {
        let GameUpdate::NextState(new_state, change_type) = step(shared, &from_state, action) else {
            continue;
        };
        if TRIM_UNWINNABLE
            && change_type == crate::core::GameChangeType::PlayerAndBoxMove
            && is_winnable(shared, &new_state) == WinnableState::WinImpossible
        {
            continue;
        }

        let won = new_state.is_won(shared);
        let (to_id, is_new) = graph.upsert_state(new_state);
        let UserAction::Move(direction) = action;
        let edge = Edge {
            from: from_id,
            to: to_id,
            direction,
            game_change_type: change_type,
        };
        graph.add_edge(edge);
        if is_new {
            graph.discovered_by.insert(to_id, edge);
            if won {
                return Some(to_id);
            }
        }
    }

    None
}

pub fn populate_step(graph: &mut StateGraph, shared: &SharedGameState) -> PopulateResult {
    let Some(node_id) = graph.get_unvisited_node() else {
        return PopulateResult::AllVisited;
    };
    match populate_node(graph, shared, node_id) {
        Some(won_id) => PopulateResult::Won(won_id),
        None => PopulateResult::Populated,
    }
}
