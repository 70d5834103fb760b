//! Turn controller - phase machine, opposing AI pacing and match outcome
//!
//! The controlled side acts through the interaction surface until every
//! living unit has acted (or the turn is ended explicitly). The opposing
//! side then acts one unit per elapsed interval, driven by `Match::tick`.

pub mod ai;
pub mod controller;
pub mod events;
pub mod phase;

pub use ai::{decide, nearest_target, OpposingAction};
pub use controller::{Match, TickResult};
pub use events::{MatchEvent, MatchEventLog, MatchEventType};
pub use phase::{MatchOutcome, TurnPhase};
