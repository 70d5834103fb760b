//! Match state and the turn controller
//!
//! `Match` owns everything: board, rosters, selection, score, phase and the
//! event log. The environment drives it with pointer events (see
//! `interaction`) and with `tick(now)` at render cadence.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::combat::{apply_damage, relocate, DamageResult, MoveResult, Score};
use crate::core::config::MatchConfig;
use crate::core::error::Result;
use crate::core::types::{Coord, MatchId, Side, Timestamp};
use crate::roster::{MatchLayout, Rosters, UnitId};
use crate::turn::ai::{decide, OpposingAction};
use crate::turn::events::{MatchEvent, MatchEventLog, MatchEventType};
use crate::turn::phase::{MatchOutcome, TurnPhase};

/// Complete match state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub(crate) id: MatchId,
    pub(crate) config: MatchConfig,
    pub(crate) board: Board,
    pub(crate) rosters: Rosters,
    pub(crate) phase: TurnPhase,
    pub(crate) selected: Option<UnitId>,
    /// Legal destinations of the selected unit
    pub(crate) highlighted: Vec<Coord>,
    pub(crate) score: Score,
    /// Latest clock reading seen by `tick`
    pub(crate) clock: Timestamp,
    pub(crate) log: MatchEventLog,
}

/// What a call to `tick` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// Nothing due yet (or not the opposing turn)
    Idle,
    /// One opposing unit took its action
    Acted { unit: UnitId, action: OpposingAction },
    /// The opposing unit was gone by the time its slot came up
    Skipped { unit: UnitId },
    /// Turn handed back to the controlled side
    TurnPassed,
}

impl Match {
    /// Create a match from a config and starting layout
    pub fn new(config: MatchConfig, layout: &MatchLayout) -> Result<Self> {
        config.validate()?;
        let board = Board::new(config.grid_size);
        let rosters = Rosters::from_layout(layout, &board)?;

        let mut game = Self {
            id: MatchId::new(),
            config,
            board,
            rosters,
            phase: TurnPhase::ControlledTurn,
            selected: None,
            highlighted: Vec::new(),
            score: Score::new(),
            clock: 0,
            log: MatchEventLog::new(),
        };

        tracing::info!(
            match_id = %game.id.0,
            controlled = game.rosters.controlled.len(),
            opposing = game.rosters.opposing.len(),
            "match created"
        );
        game.check_outcome();
        Ok(game)
    }

    /// The classic four-versus-three skirmish with default settings
    pub fn classic() -> Result<Self> {
        Self::new(MatchConfig::default(), &MatchLayout::classic())
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rosters(&self) -> &Rosters {
        &self.rosters
    }

    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    pub fn active_side(&self) -> Option<Side> {
        self.phase.active_side()
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.phase.outcome()
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn selected(&self) -> Option<UnitId> {
        self.selected
    }

    pub fn highlighted(&self) -> &[Coord] {
        &self.highlighted
    }

    pub fn score(&self) -> u32 {
        self.score.points
    }

    pub fn clock(&self) -> Timestamp {
        self.clock
    }

    /// Events not yet drained
    pub fn events(&self) -> &[MatchEvent] {
        &self.log.events
    }

    /// Take every buffered event
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        self.log.drain()
    }

    /// Advance the clock and, during the opposing turn, run at most one
    /// opposing action if the action interval has elapsed
    pub fn tick(&mut self, now: Timestamp) -> TickResult {
        self.clock = self.clock.max(now);

        let interval = self.config.opposing_action_interval_ms;
        let due = match &mut self.phase {
            TurnPhase::OpposingTurn {
                order,
                action_index,
                last_action_at,
            } => {
                if now.saturating_sub(*last_action_at) < interval {
                    return TickResult::Idle;
                }
                match order.get(*action_index).copied() {
                    Some(unit) => {
                        *action_index += 1;
                        *last_action_at = now;
                        Some(unit)
                    }
                    None => None,
                }
            }
            _ => return TickResult::Idle,
        };

        let Some(unit) = due else {
            self.begin_controlled_turn();
            return TickResult::TurnPassed;
        };

        let result = match self.run_opposing_action(unit) {
            Some(action) => TickResult::Acted { unit, action },
            None => TickResult::Skipped { unit },
        };
        self.check_outcome();
        result
    }

    /// Hand the turn to the opposing side even if some units have not acted
    ///
    /// Returns false outside the controlled turn.
    pub fn end_turn(&mut self) -> bool {
        if !self.phase.is_controlled_turn() {
            return false;
        }
        tracing::debug!("controlled turn ended early");
        self.begin_opposing_turn();
        true
    }

    /// Drop the current selection and its highlights
    pub(crate) fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.highlighted.clear();
            self.log.push(
                MatchEventType::SelectionCleared,
                "Selection cleared".into(),
                self.clock,
            );
        }
    }

    /// Book-keeping after a successful controlled move or attack
    pub(crate) fn complete_controlled_action(&mut self, actor: UnitId) {
        if let Some(unit) = self.rosters.get_mut(Side::Controlled, actor) {
            unit.has_acted = true;
        }
        self.clear_selection();
        self.check_outcome();
        self.check_turn_end();
    }

    pub(crate) fn record_move(&mut self, side: Side, step: &MoveResult) {
        self.log.push(
            MatchEventType::UnitMoved {
                side,
                unit: step.unit,
                from: step.from,
                to: step.to,
            },
            format!("{} moved {} -> {}", step.unit, step.from, step.to),
            self.clock,
        );
    }

    pub(crate) fn record_hit(&mut self, hit: &DamageResult) {
        self.log.push(
            MatchEventType::UnitAttacked {
                side: hit.attacker_side,
                attacker: hit.attacker,
                defender: hit.defender,
                damage: hit.damage,
                remaining_health: hit.remaining_health,
            },
            format!("{} hit {} for {}", hit.attacker, hit.defender, hit.damage),
            self.clock,
        );

        if hit.defender_died {
            self.log.push(
                MatchEventType::UnitKilled {
                    side: hit.attacker_side.opponent(),
                    unit: hit.defender,
                    position: hit.defender_position,
                },
                format!("{} fell at {}", hit.defender, hit.defender_position),
                self.clock,
            );
        }

        let gained = self.score.award(hit, self.config.kill_bonus);
        if gained > 0 {
            self.log.push(
                MatchEventType::ScoreGained {
                    points: gained,
                    total: self.score.points,
                },
                format!("+{} (score {})", gained, self.score.points),
                self.clock,
            );
        }
    }

    /// Move to the opposing turn once every living controlled unit has acted
    fn check_turn_end(&mut self) {
        if self.phase.is_controlled_turn() && self.rosters.controlled.iter().all(|u| u.has_acted) {
            self.begin_opposing_turn();
        }
    }

    fn begin_opposing_turn(&mut self) {
        for unit in self.rosters.controlled.iter_mut() {
            unit.has_acted = false;
        }
        self.clear_selection();

        let order = self.rosters.opposing.ids();
        tracing::info!(units = order.len(), at = self.clock, "opposing turn started");
        self.phase = TurnPhase::OpposingTurn {
            order,
            action_index: 0,
            last_action_at: self.clock,
        };
        self.log.push(
            MatchEventType::TurnStarted { side: Side::Opposing },
            "Opposing turn".into(),
            self.clock,
        );
    }

    fn begin_controlled_turn(&mut self) {
        for unit in self.rosters.controlled.iter_mut() {
            unit.has_acted = false;
        }
        self.clear_selection();

        tracing::info!(at = self.clock, "controlled turn started");
        self.phase = TurnPhase::ControlledTurn;
        self.log.push(
            MatchEventType::TurnStarted { side: Side::Controlled },
            "Your turn".into(),
            self.clock,
        );
    }

    /// Decide and apply one opposing unit's action
    ///
    /// Returns None when the unit no longer exists.
    fn run_opposing_action(&mut self, unit: UnitId) -> Option<OpposingAction> {
        let actor = self.rosters.get(Side::Opposing, unit)?;
        let action = decide(&self.board, &self.rosters, actor);
        tracing::debug!(unit = %unit, ?action, "opposing decision");

        match action {
            OpposingAction::Attack { target } => {
                if let Some(hit) = apply_damage(&mut self.rosters, Side::Opposing, unit, target) {
                    self.record_hit(&hit);
                }
            }
            OpposingAction::Step { to } => {
                if let Some(step) = relocate(&self.board, &mut self.rosters, Side::Opposing, unit, to) {
                    self.record_move(Side::Opposing, &step);
                }
            }
            OpposingAction::Hold => {
                self.log.push(
                    MatchEventType::OpposingHeld { unit },
                    format!("{} holds", unit),
                    self.clock,
                );
            }
        }

        Some(action)
    }

    /// Enter `Finished` when a roster is empty and elimination ends matches
    fn check_outcome(&mut self) {
        if !self.config.end_on_elimination || self.phase.is_finished() {
            return;
        }

        let outcome = if self.rosters.opposing.is_empty() {
            MatchOutcome::Victory
        } else if self.rosters.controlled.is_empty() {
            MatchOutcome::Defeat
        } else {
            return;
        };

        self.selected = None;
        self.highlighted.clear();
        self.phase = TurnPhase::Finished(outcome);
        tracing::info!(?outcome, score = self.score.points, "match ended");
        self.log.push(
            MatchEventType::MatchEnded { outcome },
            format!("Match ended: {:?}", outcome),
            self.clock,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{ObstacleSpec, UnitSpec};

    const INTERVAL: Timestamp = crate::core::config::DEFAULT_OPPOSING_ACTION_INTERVAL_MS;

    fn classic() -> Match {
        Match::classic().unwrap()
    }

    #[test]
    fn test_starts_in_controlled_turn() {
        let game = classic();
        assert_eq!(game.active_side(), Some(Side::Controlled));
        assert_eq!(game.score(), 0);
        assert!(game.selected().is_none());
        assert!(game.highlighted().is_empty());
    }

    #[test]
    fn test_tick_idle_during_controlled_turn() {
        let mut game = classic();
        assert_eq!(game.tick(INTERVAL * 3), TickResult::Idle);
        assert_eq!(game.clock(), INTERVAL * 3);
        assert!(game.phase().is_controlled_turn());
    }

    #[test]
    fn test_end_turn_resets_flags_and_snapshots_order() {
        let mut game = classic();
        game.rosters.controlled.iter_mut().next().unwrap().has_acted = true;
        game.tick(500);
        assert!(game.end_turn());

        assert!(game.rosters.controlled.iter().all(|u| !u.has_acted));
        match game.phase() {
            TurnPhase::OpposingTurn {
                order,
                action_index,
                last_action_at,
            } => {
                assert_eq!(order, &game.rosters.opposing.ids());
                assert_eq!(*action_index, 0);
                assert_eq!(*last_action_at, 500);
            }
            other => panic!("unexpected phase {:?}", other),
        }
        assert!(!game.end_turn());
    }

    #[test]
    fn test_opposing_actions_are_paced() {
        let mut game = classic();
        game.end_turn();

        assert_eq!(game.tick(INTERVAL - 1), TickResult::Idle);
        let first = game.tick(INTERVAL);
        assert!(matches!(first, TickResult::Acted { .. }));
        assert_eq!(game.tick(INTERVAL + 1), TickResult::Idle);
        assert!(matches!(game.tick(INTERVAL * 2), TickResult::Acted { .. }));
        assert!(matches!(game.tick(INTERVAL * 3), TickResult::Acted { .. }));
        assert_eq!(game.tick(INTERVAL * 4 - 1), TickResult::Idle);
        assert_eq!(game.tick(INTERVAL * 4), TickResult::TurnPassed);
        assert!(game.phase().is_controlled_turn());
    }

    #[test]
    fn test_first_opposing_round_of_classic_layout() {
        let mut game = classic();
        game.end_turn();
        for i in 1..=3 {
            game.tick(INTERVAL * i);
        }
        let positions: Vec<Coord> = game.rosters.opposing.iter().map(|u| u.position).collect();
        assert_eq!(
            positions,
            vec![Coord::new(6, 3), Coord::new(5, 2), Coord::new(5, 4)]
        );
    }

    #[test]
    fn test_vanished_unit_keeps_iteration_bound() {
        let mut game = classic();
        game.end_turn();
        let order = game.rosters.opposing.ids();
        game.rosters.remove(Side::Opposing, order[1]);

        assert!(matches!(game.tick(INTERVAL), TickResult::Acted { .. }));
        assert_eq!(game.tick(INTERVAL * 2), TickResult::Skipped { unit: order[1] });
        assert!(matches!(game.tick(INTERVAL * 3), TickResult::Acted { .. }));
        assert_eq!(game.tick(INTERVAL * 4), TickResult::TurnPassed);
    }

    #[test]
    fn test_opposing_kill_removes_without_score() {
        let layout = MatchLayout {
            controlled: vec![
                UnitSpec::new("Page", "P", Coord::new(3, 3), 1, 1, 2),
                UnitSpec::new("Knight", "K", Coord::new(0, 0), 1, 1, 9),
            ],
            opposing: vec![UnitSpec::new("Ogre", "O", Coord::new(4, 3), 1, 5, 9)],
            obstacles: vec![],
        };
        let mut game = Match::new(MatchConfig::default(), &layout).unwrap();
        game.end_turn();
        let result = game.tick(INTERVAL);
        assert!(matches!(
            result,
            TickResult::Acted { action: OpposingAction::Attack { .. }, .. }
        ));
        assert_eq!(game.rosters.controlled.len(), 1);
        assert_eq!(game.score(), 0);
        assert!(game
            .events()
            .iter()
            .any(|e| matches!(e.event_type, MatchEventType::UnitKilled { side: Side::Controlled, .. })));
    }

    #[test]
    fn test_defeat_when_controlled_wiped_out() {
        let layout = MatchLayout {
            controlled: vec![UnitSpec::new("Page", "P", Coord::new(3, 3), 1, 1, 2)],
            opposing: vec![UnitSpec::new("Ogre", "O", Coord::new(4, 3), 1, 5, 9)],
            obstacles: vec![],
        };
        let mut game = Match::new(MatchConfig::default(), &layout).unwrap();
        game.end_turn();
        game.tick(INTERVAL);
        assert_eq!(game.outcome(), Some(MatchOutcome::Defeat));
        assert_eq!(game.tick(INTERVAL * 5), TickResult::Idle);
        assert!(!game.end_turn());
    }

    #[test]
    fn test_without_elimination_play_continues() {
        let layout = MatchLayout {
            controlled: vec![UnitSpec::new("Page", "P", Coord::new(3, 3), 1, 1, 2)],
            opposing: vec![UnitSpec::new("Ogre", "O", Coord::new(4, 3), 1, 5, 9)],
            obstacles: vec![ObstacleSpec::new("#", Coord::new(7, 7))],
        };
        let config = MatchConfig {
            end_on_elimination: false,
            ..MatchConfig::default()
        };
        let mut game = Match::new(config, &layout).unwrap();
        game.end_turn();
        game.tick(INTERVAL);
        assert!(game.rosters.controlled.is_empty());
        assert!(game.outcome().is_none());
        assert_eq!(game.tick(INTERVAL * 2), TickResult::TurnPassed);
        assert!(game.phase().is_controlled_turn());
    }

    #[test]
    fn test_empty_opposing_layout_is_immediate_victory() {
        let layout = MatchLayout {
            controlled: vec![UnitSpec::new("Page", "P", Coord::new(3, 3), 1, 1, 2)],
            opposing: vec![],
            obstacles: vec![],
        };
        let game = Match::new(MatchConfig::default(), &layout).unwrap();
        assert_eq!(game.outcome(), Some(MatchOutcome::Victory));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MatchConfig {
            grid_size: -2,
            ..MatchConfig::default()
        };
        assert!(Match::new(config, &MatchLayout::classic()).is_err());
    }
}
