//! Combat rules - movement legality, reach checks, damage and scoring

pub mod constants;
pub mod rules;
pub mod score;

pub use constants::KILL_BONUS;
pub use rules::{
    apply_damage, attack, is_in_range, is_valid_move, move_unit, reachable_cells, relocate,
    DamageResult, MoveResult,
};
pub use score::Score;
