//! Turn phases and match outcome

use serde::{Deserialize, Serialize};

use crate::core::types::{Side, Timestamp};
use crate::roster::UnitId;

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Opposing roster wiped out
    Victory,
    /// Controlled roster wiped out
    Defeat,
}

/// Turn state machine
///
/// ```text
/// ControlledTurn --all acted / end_turn--> OpposingTurn(0)
/// OpposingTurn(i) --interval elapsed, i < n--> OpposingTurn(i + 1)
/// OpposingTurn(n) --interval elapsed--> ControlledTurn
/// any --side eliminated--> Finished
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the player's units to act
    #[default]
    ControlledTurn,
    /// Opposing units act one at a time, paced by the clock
    OpposingTurn {
        /// Opposing roster captured when the turn began; its length is the
        /// iteration bound even if units disappear mid-turn
        order: Vec<UnitId>,
        action_index: usize,
        last_action_at: Timestamp,
    },
    /// No further input or ticks are processed
    Finished(MatchOutcome),
}

impl TurnPhase {
    /// Side whose units currently act, if any
    pub fn active_side(&self) -> Option<Side> {
        match self {
            TurnPhase::ControlledTurn => Some(Side::Controlled),
            TurnPhase::OpposingTurn { .. } => Some(Side::Opposing),
            TurnPhase::Finished(_) => None,
        }
    }

    pub fn is_controlled_turn(&self) -> bool {
        matches!(self, TurnPhase::ControlledTurn)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, TurnPhase::Finished(_))
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        match self {
            TurnPhase::Finished(outcome) => Some(*outcome),
            _ => None,
        }
    }
}
