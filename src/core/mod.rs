pub mod config;
pub mod error;
pub mod types;

pub use config::MatchConfig;
pub use error::{Result, TacticsError};
pub use types::{Coord, MatchId, Side, Timestamp};
