//! The match driver.
//!
//! Owns the match state and the seated table, soliciting exactly one
//! decision from exactly one player at a time and broadcasting every
//! phase transition. Gameplay is strictly sequential: the driver
//! suspends on each solicited reply before anything else proceeds.

mod orchestration;
mod player_actions;

use crate::domain::state::MatchState;
use crate::session::table::Table;

pub struct GameFlow {
    table: Table,
    state: MatchState,
}
