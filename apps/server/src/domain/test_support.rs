//! Shared builders for domain tests.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::bidding::{self, BidAction};
use crate::domain::cards_types::{Card, Rank, Suit};
use crate::domain::dealing;
use crate::domain::state::{MatchState, Seat};

pub fn card(suit: Suit, rank: Rank) -> Card {
    Card { suit, rank }
}

/// Fresh match with the usual interleaved seating.
pub fn fresh_match() -> MatchState {
    MatchState::new([0, 1, 0, 1]).unwrap()
}

/// Match with a seeded shuffle and the first deal done.
pub fn dealt_match(seed: u64) -> MatchState {
    let mut state = fresh_match();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    dealing::shuffle(&mut state.deck, &mut rng);
    dealing::deal(&mut state).unwrap();
    state
}

/// Deal, run a bid pass where only `bid_seat` bids, close the bidding,
/// and fold the winner back down to the common hand size.
pub fn match_after_fold(seed: u64, bid_seat: Seat, bid: u8) -> MatchState {
    let mut state = dealt_match(seed);
    for seat in 0..4u8 {
        let action = if seat == bid_seat {
            BidAction::Bid(bid)
        } else {
            BidAction::Pass
        };
        bidding::record_bid(&mut state, seat, action).unwrap();
    }
    let closed = bidding::close_bidding(&mut state).unwrap();
    assert_eq!(closed, Some((bid_seat, bid)));
    for _ in 0..4 {
        bidding::fold_card(&mut state, bid_seat, 0).unwrap();
    }
    state
}
