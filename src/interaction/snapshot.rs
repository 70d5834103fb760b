//! Read-only view of a match for rendering

use serde::{Deserialize, Serialize};

use crate::core::types::{Coord, MatchId, Side, Timestamp};
use crate::roster::{Obstacle, Unit, UnitId};
use crate::turn::controller::Match;
use crate::turn::phase::MatchOutcome;

/// What a renderer needs to know about one unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitView {
    pub id: UnitId,
    pub name: String,
    pub symbol: String,
    pub position: Coord,
    pub health: i32,
    pub has_acted: bool,
}

impl From<&Unit> for UnitView {
    fn from(unit: &Unit) -> Self {
        Self {
            id: unit.id,
            name: unit.name.clone(),
            symbol: unit.symbol.clone(),
            position: unit.position,
            health: unit.health,
            has_acted: unit.has_acted,
        }
    }
}

/// Point-in-time copy of everything observable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub match_id: MatchId,
    pub grid_size: i32,
    pub clock: Timestamp,
    pub controlled: Vec<UnitView>,
    pub opposing: Vec<UnitView>,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub active_side: Option<Side>,
    pub selected: Option<UnitId>,
    pub highlighted: Vec<Coord>,
    pub outcome: Option<MatchOutcome>,
}

impl MatchSnapshot {
    /// Plain-text board, one row per line, `+` marking reachable cells
    pub fn render_text(&self) -> String {
        let size = self.grid_size.max(0);
        let mut out = String::new();

        for y in 0..size {
            for x in 0..size {
                let pos = Coord::new(x, y);
                let symbol = self
                    .controlled
                    .iter()
                    .chain(self.opposing.iter())
                    .find(|u| u.position == pos)
                    .map(|u| u.symbol.as_str())
                    .or_else(|| {
                        self.obstacles
                            .iter()
                            .find(|o| o.position == pos)
                            .map(|o| o.symbol.as_str())
                    })
                    .unwrap_or(if self.highlighted.contains(&pos) { "+" } else { "." });
                out.push_str(symbol);
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}

impl Match {
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            match_id: self.id,
            grid_size: self.board.size,
            clock: self.clock,
            controlled: self.rosters.controlled.iter().map(UnitView::from).collect(),
            opposing: self.rosters.opposing.iter().map(UnitView::from).collect(),
            obstacles: self.rosters.obstacles.clone(),
            score: self.score.points,
            active_side: self.phase.active_side(),
            selected: self.selected,
            highlighted: self.highlighted.clone(),
            outcome: self.phase.outcome(),
        }
    }
}
