//! Match event log
//!
//! The engine never draws anything. Front-ends drain these events to drive
//! animations (kills carry the cell so an explosion can be spawned there).

use serde::{Deserialize, Serialize};

use crate::core::types::{Coord, Side, Timestamp};
use crate::roster::UnitId;
use crate::turn::phase::MatchOutcome;

/// Log entry for match events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub at: Timestamp,
    pub event_type: MatchEventType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEventType {
    UnitSelected {
        unit: UnitId,
    },
    SelectionCleared,
    UnitMoved {
        side: Side,
        unit: UnitId,
        from: Coord,
        to: Coord,
    },
    UnitAttacked {
        side: Side,
        attacker: UnitId,
        defender: UnitId,
        damage: i32,
        remaining_health: i32,
    },
    UnitKilled {
        side: Side,
        unit: UnitId,
        position: Coord,
    },
    ScoreGained {
        points: u32,
        total: u32,
    },
    OpposingHeld {
        unit: UnitId,
    },
    TurnStarted {
        side: Side,
    },
    MatchEnded {
        outcome: MatchOutcome,
    },
}

/// Append-only event buffer, drained by the front-end
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchEventLog {
    pub events: Vec<MatchEvent>,
}

impl MatchEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event_type: MatchEventType, description: String, at: Timestamp) {
        self.events.push(MatchEvent {
            at,
            event_type,
            description,
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take all buffered events
    pub fn drain(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_log() {
        let mut log = MatchEventLog::new();
        log.push(
            MatchEventType::TurnStarted { side: Side::Opposing },
            "Opposing turn".into(),
            5,
        );
        assert_eq!(log.len(), 1);
        let drained = log.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].at, 5);
        assert!(log.is_empty());
    }
}
