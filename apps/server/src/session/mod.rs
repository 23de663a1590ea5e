//! Transport-facing layer: wire framing, the seated-player table, and
//! pre-match onboarding.

pub mod framing;
pub mod lobby;
pub mod table;

/// Retry prefix shown to a player whose input was rejected.
pub const INVALID_RESPONSE: &str = "Invalid. try again\n";
