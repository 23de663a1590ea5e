//! Domain layer: pure game rules, no I/O.

pub mod bidding;
pub mod cards_logic;
pub mod cards_types;
pub mod dealing;
pub mod rules;
pub mod scoring;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use cards_logic::{hand_has_suit, play_beats};
pub use cards_types::{Card, Hokm, Rank, Suit};
pub use state::{MatchState, Phase, RoundState, Seat, TeamId};
