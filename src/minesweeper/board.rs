use std::collections::VecDeque;

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::core::{BoundedGrid, BoundsOriginRoot, Vec2};
use crate::errors::{LevelError, MalformedReason};
use crate::game::{ActionOutcome, PuzzleGame};
use crate::minesweeper::MinefieldLevel;
use crate::scoring::WeightTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MineCell {
    pub has_mine: bool,
    pub revealed: bool,
    pub flagged: bool,
    /// Number of adjacent mines (0-8).
    pub adjacent_mines: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MineAction {
    Reveal(Vec2),
    ToggleFlag(Vec2),
}

const NEIGHBORS: [Vec2; 8] = [
    Vec2 { i: -1, j: -1 },
    Vec2 { i: -1, j: 0 },
    Vec2 { i: -1, j: 1 },
    Vec2 { i: 0, j: -1 },
    Vec2 { i: 0, j: 1 },
    Vec2 { i: 1, j: -1 },
    Vec2 { i: 1, j: 0 },
    Vec2 { i: 1, j: 1 },
];

#[derive(Debug, Clone)]
pub struct MinesweeperGame {
    cells: BoundedGrid<MineCell>,
    safe_hidden: usize,
}

impl MinesweeperGame {
    /// Builds a board with mines at exactly `mines`.
    pub fn with_mines(height: i32, width: i32, mines: &[Vec2]) -> Self {
        let mut cells = BoundedGrid::new(BoundsOriginRoot::new(height, width), MineCell::default());
        for mine in mines {
            if cells.contains(mine) {
                cells[mine].has_mine = true;
            }
        }
        for pos in cells.positions().collect::<Vec<_>>() {
            let count = NEIGHBORS
                .iter()
                .filter(|&&offset| cells.get(&(pos + offset)).is_some_and(|c| c.has_mine))
                .count();
            cells[&pos].adjacent_mines = count as u8;
        }
        let safe_hidden = cells.positions().filter(|pos| !cells[pos].has_mine).count();
        MinesweeperGame { cells, safe_hidden }
    }

    pub fn cell(&self, pos: &Vec2) -> Option<&MineCell> {
        self.cells.get(pos)
    }

    pub fn size(&self) -> BoundsOriginRoot {
        self.cells.size()
    }

    pub fn safe_cells_hidden(&self) -> usize {
        self.safe_hidden
    }

    fn reveal(&mut self, pos: Vec2) -> ActionOutcome {
        let Some(cell) = self.cells.get(&pos) else {
            return ActionOutcome::Rejected;
        };
        if cell.revealed || cell.flagged {
            return ActionOutcome::Rejected;
        }
        if cell.has_mine {
            debug!("Mine revealed at {pos:?}");
            self.cells[&pos].revealed = true;
            return ActionOutcome::Mistake;
        }

        // Flood fill with an explicit queue: zero cells open their neighbours.
        let mut queue = VecDeque::from([pos]);
        while let Some(next) = queue.pop_front() {
            let cell = &mut self.cells[&next];
            if cell.revealed || cell.flagged || cell.has_mine {
                continue;
            }
            cell.revealed = true;
            self.safe_hidden -= 1;
            if cell.adjacent_mines > 0 {
                continue;
            }
            for offset in NEIGHBORS {
                let neighbor = next + offset;
                if self.cells.get(&neighbor).is_some_and(|c| !c.revealed) {
                    queue.push_back(neighbor);
                }
            }
        }
        ActionOutcome::Accepted
    }

    fn toggle_flag(&mut self, pos: Vec2) -> ActionOutcome {
        match self.cells.get(&pos) {
            Some(&cell) if !cell.revealed => {
                self.cells[&pos].flagged = !cell.flagged;
                ActionOutcome::Accepted
            }
            _ => ActionOutcome::Rejected,
        }
    }
}

impl PuzzleGame for MinesweeperGame {
    type Level = MinefieldLevel;
    type Action = MineAction;

    const WEIGHTS: WeightTable = WeightTable::MINESWEEPER;

    fn load(level: &MinefieldLevel, _undo_capacity: Option<usize>) -> Result<Self, LevelError> {
        let area = match level.height.checked_mul(level.width) {
            Some(area) if level.height > 0 && level.width > 0 => area as usize,
            _ => return Err(MalformedReason::InvalidDimensions.into()),
        };
        if level.mines >= area {
            return Err(MalformedReason::TooManyMines.into());
        }

        let mut rng = StdRng::seed_from_u64(level.seed);
        let mines: Vec<Vec2> = rand::seq::index::sample(&mut rng, area, level.mines)
            .into_iter()
            .map(|index| Vec2 {
                i: index as i32 / level.width,
                j: index as i32 % level.width,
            })
            .collect();
        Ok(MinesweeperGame::with_mines(level.height, level.width, &mines))
    }

    fn par_moves(level: &MinefieldLevel) -> u32 {
        level.par_moves
    }

    fn apply(&mut self, action: MineAction, _moves_so_far: u32) -> ActionOutcome {
        match action {
            MineAction::Reveal(pos) => self.reveal(pos),
            MineAction::ToggleFlag(pos) => self.toggle_flag(pos),
        }
    }

    fn is_solved(&self) -> bool {
        self.safe_hidden == 0
    }

    /// Points at the first hidden safe cell that is not flagged.
    fn hint(&self) -> Option<MineAction> {
        self.cells
            .positions()
            .find(|pos| {
                let cell = &self.cells[pos];
                !cell.has_mine && !cell.revealed && !cell.flagged
            })
            .map(MineAction::Reveal)
    }
}
