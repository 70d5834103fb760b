//! Units and obstacles placed on the board

use serde::{Deserialize, Serialize};

use crate::core::types::Coord;

/// Stable handle for a unit, assigned once at match creation
///
/// Handles are never reused, so a handle taken before a removal keeps
/// pointing at the same unit (or at nothing) afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A combatant on either side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub symbol: String,
    pub position: Coord,
    /// Movement budget and attack range (one shared stat)
    pub reach: u32,
    pub attack_power: i32,
    pub health: i32,
    /// Set after a successful move or attack; controlled side only
    pub has_acted: bool,
}

impl Unit {
    pub fn new(
        id: UnitId,
        name: impl Into<String>,
        symbol: impl Into<String>,
        position: Coord,
        reach: u32,
        attack_power: i32,
        health: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            symbol: symbol.into(),
            position,
            reach,
            attack_power,
            health,
            has_acted: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Manhattan distance between two units
    pub fn distance_to(&self, other: &Unit) -> u32 {
        self.position.distance(&other.position)
    }
}

/// Static terrain piece; never moves, never destroyed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub symbol: String,
    pub position: Coord,
}

impl Obstacle {
    pub fn new(symbol: impl Into<String>, position: Coord) -> Self {
        Self {
            symbol: symbol.into(),
            position,
        }
    }
}
