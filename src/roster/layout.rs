//! Starting layouts: who stands where when a match begins
//!
//! Layouts are plain data. They can come from the built-in default or from a
//! TOML file under `data/layouts/`, and are validated before any unit exists.

use std::fs;
use std::path::Path;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::error::{Result, TacticsError};
use crate::core::types::Coord;

/// Definition of one unit in a layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub name: String,
    pub symbol: String,
    pub position: Coord,
    pub reach: u32,
    pub attack_power: i32,
    pub health: i32,
}

impl UnitSpec {
    pub fn new(
        name: &str,
        symbol: &str,
        position: Coord,
        reach: u32,
        attack_power: i32,
        health: i32,
    ) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            position,
            reach,
            attack_power,
            health,
        }
    }
}

/// Definition of one obstacle in a layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub symbol: String,
    pub position: Coord,
}

impl ObstacleSpec {
    pub fn new(symbol: &str, position: Coord) -> Self {
        Self {
            symbol: symbol.to_string(),
            position,
        }
    }
}

/// Full starting layout for a match
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchLayout {
    #[serde(default)]
    pub controlled: Vec<UnitSpec>,
    /// Order here is the opposing side's action order
    #[serde(default)]
    pub opposing: Vec<UnitSpec>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
}

impl MatchLayout {
    /// Four heroes against three monsters around a small wood
    pub fn classic() -> Self {
        Self {
            controlled: vec![
                UnitSpec::new("Hero", "🦸", Coord::new(0, 3), 3, 2, 10),
                UnitSpec::new("Fighter", "⚔️", Coord::new(1, 2), 1, 3, 8),
                UnitSpec::new("Archer", "🏹", Coord::new(1, 4), 4, 2, 6),
                UnitSpec::new("Mage", "🧙", Coord::new(2, 3), 2, 4, 5),
            ],
            opposing: vec![
                UnitSpec::new("Goblin", "👺", Coord::new(7, 3), 2, 2, 8),
                UnitSpec::new("Wolf", "🐺", Coord::new(6, 2), 1, 3, 6),
                UnitSpec::new("Vampire", "🧛", Coord::new(6, 4), 3, 2, 7),
            ],
            obstacles: vec![
                ObstacleSpec::new("🌳", Coord::new(3, 1)),
                ObstacleSpec::new("🌳", Coord::new(3, 5)),
                ObstacleSpec::new("🪨", Coord::new(4, 3)),
            ],
        }
    }

    /// Parse and validate a layout from TOML text against `board`
    pub fn from_toml_str(contents: &str, board: &Board) -> Result<Self> {
        let layout: MatchLayout = toml::from_str(contents)?;
        layout.validate(board)?;
        Ok(layout)
    }

    /// Load a layout file from disk
    pub fn load(path: impl AsRef<Path>, board: &Board) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents, board)
    }

    /// Check that every entity fits on `board` and no two share a cell
    pub fn validate(&self, board: &Board) -> Result<()> {
        let mut claimed: AHashSet<Coord> = AHashSet::new();

        let units = self.controlled.iter().chain(self.opposing.iter());
        for spec in units {
            if spec.symbol.is_empty() {
                return Err(TacticsError::InvalidLayout(format!(
                    "unit '{}' has an empty symbol",
                    spec.name
                )));
            }
            if spec.health <= 0 {
                return Err(TacticsError::InvalidLayout(format!(
                    "unit '{}' starts with non-positive health {}",
                    spec.name, spec.health
                )));
            }
            if spec.attack_power < 0 {
                return Err(TacticsError::InvalidLayout(format!(
                    "unit '{}' has negative attack power {}",
                    spec.name, spec.attack_power
                )));
            }
            claim(board, &mut claimed, spec.position)?;
        }

        for obstacle in &self.obstacles {
            if obstacle.symbol.is_empty() {
                return Err(TacticsError::InvalidLayout(format!(
                    "obstacle at {} has an empty symbol",
                    obstacle.position
                )));
            }
            claim(board, &mut claimed, obstacle.position)?;
        }

        Ok(())
    }
}

fn claim(board: &Board, claimed: &mut AHashSet<Coord>, pos: Coord) -> Result<()> {
    if !board.in_bounds(pos) {
        return Err(TacticsError::OutOfBounds {
            pos,
            grid_size: board.size,
        });
    }
    if !claimed.insert(pos) {
        return Err(TacticsError::CellConflict(pos));
    }
    Ok(())
}
