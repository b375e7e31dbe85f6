//! Level records, level packs and the built-in Sokoban levels.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{Direction, GameChangeType, GameState, SharedGameState, parse_level, parse_level_rows};
use crate::errors::LevelError;
use crate::session::{Difficulty, DifficultySettings, SessionConfig};

/// A layout is either one multi-line string or a list of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelLayout {
    Text(String),
    Rows(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub par_moves: u32,
    pub layout: LevelLayout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution_hint: Option<String>,
}

impl Level {
    pub fn new(name: &str, par_moves: u32, layout: &str, solution_hint: Option<&str>) -> Self {
        Level {
            name: name.to_string(),
            par_moves,
            layout: LevelLayout::Text(layout.to_string()),
            solution_hint: solution_hint.map(str::to_string),
        }
    }

    pub fn parse(&self) -> Result<(GameState, SharedGameState), LevelError> {
        match &self.layout {
            LevelLayout::Text(text) => parse_level(text),
            LevelLayout::Rows(rows) => parse_level_rows(rows),
        }
    }

    pub fn solution(&self) -> Option<Result<Vec<Direction>, LevelError>> {
        self.solution_hint.as_deref().map(parse_solution)
    }
}

/// Supplies the ordered levels of each difficulty tier.
pub trait LevelProvider<L> {
    fn levels(&self, difficulty: Difficulty) -> Result<Vec<L>, LevelError>;
}

/// The same level list on every tier.
impl<L: Clone> LevelProvider<L> for Vec<L> {
    fn levels(&self, _difficulty: Difficulty) -> Result<Vec<L>, LevelError> {
        Ok(self.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierPack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<DifficultySettings>,
    #[serde(default)]
    pub levels: Vec<Level>,
}

/// Levels for all tiers, as stored in a JSON level pack file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelPack {
    #[serde(default)]
    pub easy: TierPack,
    #[serde(default)]
    pub moderate: TierPack,
    #[serde(default)]
    pub hard: TierPack,
}

impl LevelPack {
    pub fn from_json(contents: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, LevelError> {
        debug!("Level pack file: {path:?}");
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn tier(&self, difficulty: Difficulty) -> &TierPack {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Moderate => &self.moderate,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Overrides the tier budgets of `config` with the ones stored in the pack.
    pub fn apply_settings(&self, config: &mut SessionConfig) {
        for difficulty in Difficulty::ALL {
            if let Some(settings) = self.tier(difficulty).settings {
                *config.settings_mut(difficulty) = settings;
            }
        }
    }

    pub fn builtin() -> Self {
        let two_targets = Level::new("Two Targets", 12, TWO_TARGETS, Some("rruULuRldLullddrU"));
        LevelPack {
            easy: TierPack {
                settings: None,
                levels: vec![
                    Level::new("Corridor", 3, CORRIDOR, Some("rRR")),
                    Level::new("Corner", 5, CORNER, Some("dRurD")),
                ],
            },
            moderate: TierPack {
                settings: None,
                levels: vec![
                    Level::new("Parallel", 11, PARALLEL, Some("rRRRllldRRR")),
                    Level::new("Split", 11, SPLIT, Some("ulDrdLLUruL")),
                    two_targets.clone(),
                ],
            },
            hard: TierPack {
                settings: None,
                levels: vec![
                    two_targets,
                    Level::new("Twin Alcoves", 25, TWIN_ALCOVES, Some("lUdrrruullLrrrddlUdlluurR")),
                ],
            },
        }
    }
}

impl LevelProvider<Level> for LevelPack {
    fn levels(&self, difficulty: Difficulty) -> Result<Vec<Level>, LevelError> {
        let levels = &self.tier(difficulty).levels;
        if levels.is_empty() {
            return Err(LevelError::EmptyTier(difficulty.to_string()));
        }
        Ok(levels.clone())
    }
}

/// Parses LURD notation. Case only marks pushes, so it is ignored; whitespace is skipped.
pub fn parse_solution(s: &str) -> Result<Vec<Direction>, LevelError> {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c.to_ascii_lowercase() {
            'u' => Ok(Direction::Up),
            'd' => Ok(Direction::Down),
            'l' => Ok(Direction::Left),
            'r' => Ok(Direction::Right),
            _ => Err(LevelError::InvalidSolution(c)),
        })
        .collect()
}

/// Formats moves in LURD notation, upper case for pushes.
pub fn format_solution(steps: &[(Direction, GameChangeType)]) -> String {
    steps
        .iter()
        .map(|&(direction, change)| {
            let c = match direction {
                Direction::Up => 'u',
                Direction::Down => 'd',
                Direction::Left => 'l',
                Direction::Right => 'r',
            };
            match change {
                GameChangeType::PlayerMove => c,
                GameChangeType::PlayerAndBoxMove => c.to_ascii_uppercase(),
            }
        })
        .collect()
}

const CORRIDOR: &str = r#"
#######
#@ $ .#
#######
"#;

const CORNER: &str = r#"
######
#@   #
# $  #
#  . #
######
"#;

const PARALLEL: &str = r#"
########
#@ $  .#
#  $  .#
########
"#;

const SPLIT: &str = r#"
#######
#.    #
# $$@ #
#.    #
#######
"#;

const TWO_TARGETS: &str = "########\n# .   .#\n#   $$ #\n#  #   #\n#  @   #\n########";

const TWIN_ALCOVES: &str = r#"
#######
#.   .#
# $#$ #
#  @  #
#######
"#;
