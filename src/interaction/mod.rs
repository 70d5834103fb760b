//! Selection / interaction surface
//!
//! The thin contract a front-end calls into. Everything takes grid cells
//! (or raw pointer pixels) and answers with an `ActionResult`; input that
//! does not amount to a legal action returns `NotApplied` and leaves the
//! match untouched.

pub mod snapshot;

pub use snapshot::{MatchSnapshot, UnitView};

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::combat::{attack, move_unit, reachable_cells, DamageResult, MoveResult};
use crate::core::types::{Coord, Side};
use crate::roster::UnitId;
use crate::turn::controller::Match;
use crate::turn::events::MatchEventType;

/// Result of one interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionResult {
    Selected { unit: UnitId },
    Moved(MoveResult),
    Attacked(DamageResult),
    NotApplied,
}

impl ActionResult {
    pub fn is_applied(&self) -> bool {
        !matches!(self, ActionResult::NotApplied)
    }
}

impl Match {
    /// Raw pointer entry point; pixels are floored into cells
    pub fn handle_pointer_at(&mut self, px: f32, py: f32) -> ActionResult {
        let cell = Board::pixel_to_cell(px, py, self.config.cell_size);
        self.handle_cell(cell)
    }

    /// Click on a cell: act with the selected unit, or select one
    ///
    /// With a unit selected, clicking another controlled unit is treated as
    /// a move onto an occupied cell and fails.
    pub fn handle_cell(&mut self, pos: Coord) -> ActionResult {
        if self.selected.is_some() {
            self.act_at(pos)
        } else {
            self.select_at(pos)
        }
    }

    /// Select the controlled unit at `pos`
    ///
    /// Only during the controlled turn, only with nothing selected, and only
    /// for units that have not acted yet this turn.
    pub fn select_at(&mut self, pos: Coord) -> ActionResult {
        if !self.phase.is_controlled_turn() || self.selected.is_some() {
            return ActionResult::NotApplied;
        }
        let Some(unit) = self.rosters.unit_at(Side::Controlled, pos) else {
            return ActionResult::NotApplied;
        };
        if unit.has_acted {
            return ActionResult::NotApplied;
        }

        let id = unit.id;
        self.highlighted = reachable_cells(&self.board, &self.rosters, unit);
        self.selected = Some(id);
        tracing::debug!(unit = %id, %pos, reachable = self.highlighted.len(), "unit selected");
        self.log.push(
            MatchEventType::UnitSelected { unit: id },
            format!("{} selected at {}", id, pos),
            self.clock,
        );

        ActionResult::Selected { unit: id }
    }

    /// Use the selected unit on `pos`: attack an opposing unit there, or
    /// move onto the cell
    pub fn act_at(&mut self, pos: Coord) -> ActionResult {
        if !self.phase.is_controlled_turn() {
            return ActionResult::NotApplied;
        }
        let Some(actor) = self.selected else {
            return ActionResult::NotApplied;
        };

        let defender = self.rosters.unit_at(Side::Opposing, pos).map(|u| u.id);
        let result = match defender {
            Some(defender) => match attack(&mut self.rosters, Side::Controlled, actor, defender) {
                Some(hit) => {
                    self.record_hit(&hit);
                    ActionResult::Attacked(hit)
                }
                None => return ActionResult::NotApplied,
            },
            None => match move_unit(&self.board, &mut self.rosters, Side::Controlled, actor, pos) {
                Some(step) => {
                    self.record_move(Side::Controlled, &step);
                    ActionResult::Moved(step)
                }
                None => return ActionResult::NotApplied,
            },
        };

        self.complete_controlled_action(actor);
        result
    }

    /// Drop the selection; false when nothing was selected
    pub fn cancel_selection(&mut self) -> bool {
        if self.selected.is_none() {
            return false;
        }
        self.clear_selection();
        true
    }
}
