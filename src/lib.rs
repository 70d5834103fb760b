//! Tacticmoji - Turn-based grid tactics engine

pub mod board;
pub mod combat;
pub mod core;
pub mod interaction;
pub mod roster;
pub mod turn;
