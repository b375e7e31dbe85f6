use std::collections::HashSet;

use crate::core::bounded_grid::BoundedGrid;
use crate::core::models::Cell::{Floor, Wall};
use crate::core::models::{Cell, GameState, SharedGameState, Vec2};
use crate::errors::{LevelError, MalformedReason};

/// Parses a multi-line level layout.
///
/// Tiles: '#' wall, '@' player, '$' box, '.' target, '*' box on target, '+' player on target,
/// ' ' floor. Unknown characters are floor. Leading and trailing blank lines are ignored.
pub fn parse_level(s: &str) -> Result<(GameState, SharedGameState), LevelError> {
    let rows: Vec<&str> = s.lines().collect();
    parse_level_rows(&rows)
}

/// Same as [`parse_level`] for a layout already split into rows.
pub fn parse_level_rows<S: AsRef<str>>(
    rows: &[S],
) -> Result<(GameState, SharedGameState), LevelError> {
    let is_blank = |row: &S| row.as_ref().trim().is_empty();
    let first = rows.iter().position(|row| !is_blank(row));
    let last = rows.iter().rposition(|row| !is_blank(row));
    let (Some(first), Some(last)) = (first, last) else {
        return Err(MalformedReason::NoRows.into());
    };
    let rows = &rows[first..=last];

    let max_width = rows
        .iter()
        .map(|row| row.as_ref().chars().count())
        .max()
        .unwrap_or(0);

    let mut grid: Vec<Vec<Cell>> = Vec::with_capacity(rows.len());
    let mut player: Option<Vec2> = None;
    let mut boxes: Vec<Vec2> = Vec::new();
    let mut targets: HashSet<Vec2> = HashSet::new();

    for (i, line) in rows.iter().enumerate() {
        let mut row = Vec::with_capacity(max_width);
        for (j, ch) in line.as_ref().chars().enumerate() {
            let pos = Vec2 {
                i: i as i32,
                j: j as i32,
            };
            if matches!(ch, '.' | '*' | '+') {
                targets.insert(pos);
            }
            if matches!(ch, '$' | '*') {
                boxes.push(pos);
            }
            if matches!(ch, '@' | '+') && player.replace(pos).is_some() {
                return Err(MalformedReason::MultiplePlayers.into());
            }
            row.push(if ch == '#' { Wall } else { Floor });
        }
        // Pad row to max width with Floor
        row.resize(max_width, Floor);
        grid.push(row);
    }

    let Some(player) = player else {
        return Err(MalformedReason::MissingPlayer.into());
    };
    boxes.sort_unstable();

    Ok((
        GameState { boxes, player },
        SharedGameState {
            grid: BoundedGrid::from_rows(grid),
            targets,
        },
    ))
}
