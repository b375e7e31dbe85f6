use std::collections::{HashMap, HashSet, VecDeque};

use crate::core::{Direction, GameChangeType, GameState};

#[derive(Clone, Debug)]
pub struct StateGraph {
    // map from game state to node id
    pub nodes: bimap::BiMap<GameState, usize>,
    pub edges: HashSet<Edge>,
    /// Frontier in discovery order, so expansion is breadth first.
    pub unvisited: VecDeque<usize>,
    /// Edge through which each node was first reached.
    pub discovered_by: HashMap<usize, Edge>,
    pub next_id: usize,
}

#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    pub game_change_type: GameChangeType,
}

#[derive(Debug, PartialEq, Eq)]
pub enum PopulateResult {
    AllVisited,
    Populated,
    Won(usize),
}

/// Moves leading from a start state to a won state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub steps: Vec<(Direction, GameChangeType)>,
}

impl Solution {
    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.steps.iter().map(|&(direction, _)| direction)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn pushes(&self) -> usize {
        self.steps
            .iter()
            .filter(|(_, change)| *change == GameChangeType::PlayerAndBoxMove)
            .count()
    }
}
