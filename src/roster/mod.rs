//! Unit rosters for both sides plus the static obstacle set
//!
//! Units are only ever removed, never added, after a match starts. Removal
//! keeps the relative order of the survivors, which matters for the
//! opposing side because roster order is its action order.

pub mod layout;
pub mod unit;

pub use layout::{MatchLayout, ObstacleSpec, UnitSpec};
pub use unit::{Obstacle, Unit, UnitId};

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Occupancy};
use crate::core::error::Result;
use crate::core::types::{Coord, Side};

/// Ordered collection of living units for one side
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Roster {
    units: Vec<Unit>,
}

impl Roster {
    pub fn new(units: Vec<Unit>) -> Self {
        Self { units }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.iter_mut()
    }

    /// Handles in roster order
    pub fn ids(&self) -> Vec<UnitId> {
        self.units.iter().map(|u| u.id).collect()
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.get(id).is_some()
    }

    pub fn unit_at(&self, pos: Coord) -> Option<&Unit> {
        self.units.iter().find(|u| u.position == pos)
    }

    /// Remove a unit, keeping the order of the rest
    ///
    /// Removing a unit that is not present is a no-op.
    pub fn remove(&mut self, id: UnitId) -> Option<Unit> {
        let idx = self.units.iter().position(|u| u.id == id)?;
        Some(self.units.remove(idx))
    }
}

/// Everything standing on the board
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rosters {
    pub controlled: Roster,
    pub opposing: Roster,
    pub obstacles: Vec<Obstacle>,
}

impl Rosters {
    /// Build rosters from a validated layout, handing out fresh unit handles
    pub fn from_layout(layout: &MatchLayout, board: &Board) -> Result<Self> {
        layout.validate(board)?;

        let mut next_id = 0u32;
        let mut build = |specs: &[UnitSpec]| -> Roster {
            Roster::new(
                specs
                    .iter()
                    .map(|spec| {
                        let id = UnitId(next_id);
                        next_id += 1;
                        Unit::new(
                            id,
                            spec.name.clone(),
                            spec.symbol.clone(),
                            spec.position,
                            spec.reach,
                            spec.attack_power,
                            spec.health,
                        )
                    })
                    .collect(),
            )
        };

        let controlled = build(&layout.controlled);
        let opposing = build(&layout.opposing);
        let obstacles = layout
            .obstacles
            .iter()
            .map(|o| Obstacle::new(o.symbol.clone(), o.position))
            .collect();

        Ok(Self {
            controlled,
            opposing,
            obstacles,
        })
    }

    pub fn roster(&self, side: Side) -> &Roster {
        match side {
            Side::Controlled => &self.controlled,
            Side::Opposing => &self.opposing,
        }
    }

    pub fn roster_mut(&mut self, side: Side) -> &mut Roster {
        match side {
            Side::Controlled => &mut self.controlled,
            Side::Opposing => &mut self.opposing,
        }
    }

    pub fn get(&self, side: Side, id: UnitId) -> Option<&Unit> {
        self.roster(side).get(id)
    }

    pub fn get_mut(&mut self, side: Side, id: UnitId) -> Option<&mut Unit> {
        self.roster_mut(side).get_mut(id)
    }

    pub fn unit_at(&self, side: Side, pos: Coord) -> Option<&Unit> {
        self.roster(side).unit_at(pos)
    }

    /// Remove a unit from `side` only; absent units are ignored
    pub fn remove(&mut self, side: Side, id: UnitId) -> Option<Unit> {
        self.roster_mut(side).remove(id)
    }

    /// Every living unit, controlled side first
    pub fn all_living(&self) -> impl Iterator<Item = &Unit> {
        self.controlled.iter().chain(self.opposing.iter())
    }

    pub fn obstacle_at(&self, pos: Coord) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.position == pos)
    }

    /// Snapshot of all taken cells, for repeated occupancy checks
    pub fn occupied_cells(&self) -> AHashSet<Coord> {
        self.all_living()
            .map(|u| u.position)
            .chain(self.obstacles.iter().map(|o| o.position))
            .collect()
    }
}

impl Occupancy for Rosters {
    fn occupied(&self, pos: Coord) -> bool {
        self.all_living().any(|u| u.position == pos) || self.obstacle_at(pos).is_some()
    }
}

impl Occupancy for AHashSet<Coord> {
    fn occupied(&self, pos: Coord) -> bool {
        self.contains(&pos)
    }
}
