use thiserror::Error;

use crate::core::types::Coord;

#[derive(Error, Debug)]
pub enum TacticsError {
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Position {pos} is outside the {grid_size}x{grid_size} grid")]
    OutOfBounds { pos: Coord, grid_size: i32 },

    #[error("Cell {0} is claimed by more than one entity")]
    CellConflict(Coord),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TacticsError>;
