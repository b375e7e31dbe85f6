use std::collections::{HashMap, HashSet, VecDeque};

use crate::core::GameState;
use crate::state_graph::models::{Edge, StateGraph};

impl Default for StateGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl StateGraph {
    pub fn new() -> Self {
        StateGraph {
            nodes: bimap::BiMap::new(),
            edges: HashSet::new(),
            unvisited: VecDeque::new(),
            discovered_by: HashMap::new(),
            next_id: 0,
        }
    }

    /// Returns the node id and whether the state was new to the graph.
    pub fn upsert_state(&mut self, state: GameState) -> (usize, bool) {
        if let Some(&id) = self.nodes.get_by_left(&state) {
            (id, false)
        } else {
            let id = self.next_id;
            self.next_id += 1;
            self.nodes.insert(state, id);
            self.unvisited.push_back(id);
            (id, true)
        }
    }

    pub fn get_state(&self, id: usize) -> Option<&GameState> {
        self.nodes.get_by_right(&id)
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.insert(edge);
    }

    pub fn get_unvisited_node(&mut self) -> Option<usize> {
        self.unvisited.pop_front()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walks `discovered_by` back from `node_id` to the root.
    pub fn path_to(&self, node_id: usize) -> Vec<Edge> {
        let mut path = Vec::new();
        let mut current = node_id;
        while let Some(edge) = self.discovered_by.get(&current) {
            path.push(*edge);
            current = edge.from;
        }
        path.reverse();
        path
    }
}
