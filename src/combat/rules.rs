//! Movement legality, attack range and damage application
//!
//! Every check here is a predicate: illegal requests return `false` or
//! `None` and leave the rosters untouched.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Occupancy};
use crate::core::types::{Coord, Side};
use crate::roster::{Rosters, Unit, UnitId};

/// A move that was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub unit: UnitId,
    pub from: Coord,
    pub to: Coord,
}

/// Damage that was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageResult {
    pub attacker_side: Side,
    pub attacker: UnitId,
    pub defender: UnitId,
    /// Cell the defender stood on when hit
    pub defender_position: Coord,
    pub damage: i32,
    /// Health after the hit; may be negative when the defender died
    pub remaining_health: i32,
    pub defender_died: bool,
}

/// Can `mover` relocate to `target`?
///
/// Manhattan distance within reach, on the board, and not occupied. Nothing
/// between the two cells blocks the move.
pub fn is_valid_move(board: &Board, occupancy: &impl Occupancy, mover: &Unit, target: Coord) -> bool {
    board.in_bounds(target)
        && mover.position.distance(&target) <= mover.reach
        && !board.is_occupied(occupancy, target)
}

/// Is `target` within `attacker`'s reach?
pub fn is_in_range(attacker: &Unit, target: &Unit) -> bool {
    attacker.distance_to(target) <= attacker.reach
}

/// Every cell `mover` may legally move to, in `Board::cells` order
pub fn reachable_cells(board: &Board, rosters: &Rosters, mover: &Unit) -> Vec<Coord> {
    let occupied = rosters.occupied_cells();
    board
        .cells()
        .filter(|&cell| is_valid_move(board, &occupied, mover, cell))
        .collect()
}

/// Validate and apply a move for unit `id` of `side`
pub fn move_unit(
    board: &Board,
    rosters: &mut Rosters,
    side: Side,
    id: UnitId,
    target: Coord,
) -> Option<MoveResult> {
    let mover = rosters.get(side, id)?;
    if !is_valid_move(board, &*rosters, mover, target) {
        return None;
    }
    let from = mover.position;

    let unit = rosters.get_mut(side, id)?;
    unit.position = target;
    tracing::debug!(unit = %id, %from, to = %target, "unit moved");

    Some(MoveResult {
        unit: id,
        from,
        to: target,
    })
}

/// Put unit `id` on `target` if that cell is on the board and free
///
/// Unlike `move_unit` this ignores reach; the opposing side's single step
/// toward its target may be diagonal.
pub fn relocate(
    board: &Board,
    rosters: &mut Rosters,
    side: Side,
    id: UnitId,
    target: Coord,
) -> Option<MoveResult> {
    if !board.in_bounds(target) || board.is_occupied(&*rosters, target) {
        return None;
    }
    let unit = rosters.get_mut(side, id)?;
    let from = unit.position;
    unit.position = target;

    Some(MoveResult {
        unit: id,
        from,
        to: target,
    })
}

/// Subtract the attacker's power from the defender's health
///
/// A defender left at zero or below is removed from its roster at once.
/// No range check; callers that need one go through `attack`.
pub fn apply_damage(
    rosters: &mut Rosters,
    attacker_side: Side,
    attacker: UnitId,
    defender: UnitId,
) -> Option<DamageResult> {
    let defender_side = attacker_side.opponent();
    let damage = rosters.get(attacker_side, attacker)?.attack_power;

    let target = rosters.get_mut(defender_side, defender)?;
    target.health -= damage;
    let remaining_health = target.health;
    let defender_position = target.position;
    let defender_died = !target.is_alive();

    if defender_died {
        rosters.remove(defender_side, defender);
    }

    tracing::debug!(
        attacker = %attacker,
        defender = %defender,
        damage,
        remaining_health,
        defender_died,
        "damage applied"
    );

    Some(DamageResult {
        attacker_side,
        attacker,
        defender,
        defender_position,
        damage,
        remaining_health,
        defender_died,
    })
}

/// Range-checked attack
pub fn attack(
    rosters: &mut Rosters,
    attacker_side: Side,
    attacker: UnitId,
    defender: UnitId,
) -> Option<DamageResult> {
    let striker = rosters.get(attacker_side, attacker)?;
    let target = rosters.get(attacker_side.opponent(), defender)?;
    if !is_in_range(striker, target) {
        return None;
    }
    apply_damage(rosters, attacker_side, attacker, defender)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::MatchLayout;

    fn classic() -> (Board, Rosters) {
        let board = Board::new(8);
        let rosters = Rosters::from_layout(&MatchLayout::classic(), &board).unwrap();
        (board, rosters)
    }

    fn controlled_at(rosters: &Rosters, x: i32, y: i32) -> UnitId {
        rosters.unit_at(Side::Controlled, Coord::new(x, y)).unwrap().id
    }

    fn opposing_at(rosters: &Rosters, x: i32, y: i32) -> UnitId {
        rosters.unit_at(Side::Opposing, Coord::new(x, y)).unwrap().id
    }

    #[test]
    fn test_hero_move_within_reach() {
        let (board, mut rosters) = classic();
        let hero = controlled_at(&rosters, 0, 3);
        let result = move_unit(&board, &mut rosters, Side::Controlled, hero, Coord::new(2, 4));
        assert_eq!(
            result,
            Some(MoveResult { unit: hero, from: Coord::new(0, 3), to: Coord::new(2, 4) })
        );
        assert_eq!(rosters.get(Side::Controlled, hero).unwrap().position, Coord::new(2, 4));
        assert!(rosters.unit_at(Side::Controlled, Coord::new(0, 3)).is_none());
    }

    #[test]
    fn test_move_beyond_reach_rejected() {
        let (board, mut rosters) = classic();
        let fighter = controlled_at(&rosters, 1, 2);
        let before = rosters.clone();
        assert!(move_unit(&board, &mut rosters, Side::Controlled, fighter, Coord::new(2, 1)).is_none());
        assert_eq!(rosters, before);
    }

    #[test]
    fn test_move_onto_occupied_rejected() {
        let (board, mut rosters) = classic();
        let hero = controlled_at(&rosters, 0, 3);
        let mage = controlled_at(&rosters, 2, 3);
        // rock
        assert!(move_unit(&board, &mut rosters, Side::Controlled, mage, Coord::new(4, 3)).is_none());
        // fighter
        assert!(move_unit(&board, &mut rosters, Side::Controlled, hero, Coord::new(1, 2)).is_none());
    }

    #[test]
    fn test_move_ignores_path_blocking() {
        let board = Board::new(8);
        let layout = MatchLayout {
            controlled: vec![crate::roster::UnitSpec::new("Scout", "S", Coord::new(0, 0), 2, 1, 3)],
            opposing: vec![],
            obstacles: vec![
                crate::roster::ObstacleSpec::new("#", Coord::new(1, 0)),
                crate::roster::ObstacleSpec::new("#", Coord::new(0, 1)),
            ],
        };
        let mut rosters = Rosters::from_layout(&layout, &board).unwrap();
        let scout = controlled_at(&rosters, 0, 0);
        assert!(move_unit(&board, &mut rosters, Side::Controlled, scout, Coord::new(1, 1)).is_some());
    }

    #[test]
    fn test_move_out_of_bounds_rejected() {
        let (board, mut rosters) = classic();
        let hero = controlled_at(&rosters, 0, 3);
        assert!(move_unit(&board, &mut rosters, Side::Controlled, hero, Coord::new(-1, 3)).is_none());
    }

    #[test]
    fn test_move_to_own_cell_rejected() {
        let (board, mut rosters) = classic();
        let hero = controlled_at(&rosters, 0, 3);
        assert!(move_unit(&board, &mut rosters, Side::Controlled, hero, Coord::new(0, 3)).is_none());
    }

    #[test]
    fn test_reachable_cells_match_predicate() {
        let (board, rosters) = classic();
        let hero = rosters.unit_at(Side::Controlled, Coord::new(0, 3)).unwrap();
        let cells = reachable_cells(&board, &rosters, hero);
        assert!(cells.contains(&Coord::new(2, 4)));
        assert!(!cells.contains(&Coord::new(1, 2)));
        assert!(!cells.contains(&Coord::new(0, 3)));
        for cell in &cells {
            assert!(is_valid_move(&board, &rosters, hero, *cell));
        }
    }

    #[test]
    fn test_in_range_boundary() {
        let (_, mut rosters) = classic();
        let archer = controlled_at(&rosters, 1, 4);
        let vampire = rosters.unit_at(Side::Opposing, Coord::new(6, 4)).unwrap().clone();
        assert!(!is_in_range(rosters.get(Side::Controlled, archer).unwrap(), &vampire));

        rosters.get_mut(Side::Controlled, archer).unwrap().position = Coord::new(2, 4);
        assert!(is_in_range(rosters.get(Side::Controlled, archer).unwrap(), &vampire));
    }

    #[test]
    fn test_range_uses_attacker_reach() {
        let (_, rosters) = classic();
        let wolf = rosters.unit_at(Side::Opposing, Coord::new(6, 2)).unwrap();
        let goblin = rosters.unit_at(Side::Opposing, Coord::new(7, 3)).unwrap();
        // distance 2: goblin reaches, wolf does not
        assert!(!is_in_range(wolf, goblin));
        assert!(is_in_range(goblin, wolf));
    }

    #[test]
    fn test_apply_damage_kills_and_removes() {
        let (_, mut rosters) = classic();
        let fighter = controlled_at(&rosters, 1, 2);
        let wolf = opposing_at(&rosters, 6, 2);
        rosters.get_mut(Side::Opposing, wolf).unwrap().health = 2;

        let result = apply_damage(&mut rosters, Side::Controlled, fighter, wolf).unwrap();
        assert_eq!(result.damage, 3);
        assert_eq!(result.remaining_health, -1);
        assert!(result.defender_died);
        assert!(!rosters.opposing.contains(wolf));
        assert_eq!(rosters.opposing.len(), 2);
    }

    #[test]
    fn test_apply_damage_survivor_keeps_slot() {
        let (_, mut rosters) = classic();
        let hero = controlled_at(&rosters, 0, 3);
        let goblin = opposing_at(&rosters, 7, 3);
        let result = apply_damage(&mut rosters, Side::Controlled, hero, goblin).unwrap();
        assert!(!result.defender_died);
        assert_eq!(rosters.get(Side::Opposing, goblin).unwrap().health, 6);
    }

    #[test]
    fn test_attack_out_of_range_rejected() {
        let (_, mut rosters) = classic();
        let fighter = controlled_at(&rosters, 1, 2);
        let wolf = opposing_at(&rosters, 6, 2);
        let before = rosters.clone();
        assert!(attack(&mut rosters, Side::Controlled, fighter, wolf).is_none());
        assert_eq!(rosters, before);
    }

    #[test]
    fn test_relocate_allows_diagonal_beyond_reach() {
        let (board, mut rosters) = classic();
        let wolf = opposing_at(&rosters, 6, 2);
        let result = relocate(&board, &mut rosters, Side::Opposing, wolf, Coord::new(5, 3)).unwrap();
        assert_eq!(result.from, Coord::new(6, 2));
        assert_eq!(rosters.get(Side::Opposing, wolf).unwrap().position, Coord::new(5, 3));
    }

    #[test]
    fn test_relocate_onto_unit_rejected() {
        let (board, mut rosters) = classic();
        let wolf = opposing_at(&rosters, 6, 2);
        assert!(relocate(&board, &mut rosters, Side::Opposing, wolf, Coord::new(7, 3)).is_none());
        assert!(relocate(&board, &mut rosters, Side::Opposing, wolf, Coord::new(8, 2)).is_none());
    }

    #[test]
    fn test_attack_missing_defender_rejected() {
        let (_, mut rosters) = classic();
        let hero = controlled_at(&rosters, 0, 3);
        let fighter = controlled_at(&rosters, 1, 2);
        // friendly fire: the fighter is not on the opposing roster
        assert!(attack(&mut rosters, Side::Controlled, hero, fighter).is_none());
    }
}
