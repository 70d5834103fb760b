//! Controlled-side score keeping

use serde::{Deserialize, Serialize};

use crate::combat::rules::DamageResult;
use crate::core::types::Side;

/// Running score; only ever grows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub points: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a hit landed by the controlled side
    ///
    /// Returns the points gained. Hits by the opposing side score nothing.
    pub fn award(&mut self, hit: &DamageResult, kill_bonus: u32) -> u32 {
        if hit.attacker_side != Side::Controlled {
            return 0;
        }
        let mut gained = hit.damage.max(0) as u32;
        if hit.defender_died {
            gained += kill_bonus;
        }
        self.points = self.points.saturating_add(gained);
        gained
    }
}
