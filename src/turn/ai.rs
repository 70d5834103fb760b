//! Opposing-side decision policy
//!
//! Greedy and stateless: each opposing unit picks the nearest controlled
//! unit, hits it if it can, otherwise takes one step toward it. Decisions
//! are computed from an immutable view of the board and applied afterwards
//! by the controller.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::combat::is_in_range;
use crate::core::types::{Coord, Side};
use crate::roster::{Rosters, Unit, UnitId};

/// What one opposing unit does with its action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpposingAction {
    Attack { target: UnitId },
    Step { to: Coord },
    Hold,
}

/// Nearest candidate by Manhattan distance
///
/// Ties go to the candidate seen first.
pub fn nearest_target<'a>(
    actor: &Unit,
    candidates: impl IntoIterator<Item = &'a Unit>,
) -> Option<&'a Unit> {
    candidates
        .into_iter()
        .fold(None, |best: Option<(&'a Unit, u32)>, candidate| {
            let distance = actor.distance_to(candidate);
            match best {
                Some((_, best_distance)) if distance >= best_distance => best,
                _ => Some((candidate, distance)),
            }
        })
        .map(|(unit, _)| unit)
}

/// Choose an action for `actor` against the controlled roster
pub fn decide(board: &Board, rosters: &Rosters, actor: &Unit) -> OpposingAction {
    let Some(target) = nearest_target(actor, rosters.roster(Side::Controlled).iter()) else {
        return OpposingAction::Hold;
    };

    if is_in_range(actor, target) {
        return OpposingAction::Attack { target: target.id };
    }

    let to = actor.position.step_toward(&target.position);
    if board.in_bounds(to) && !board.is_occupied(rosters, to) {
        OpposingAction::Step { to }
    } else {
        OpposingAction::Hold
    }
}
