//! Deck construction, shuffling, dealing, and end-of-round collection.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::cards_types::{Card, Rank, Suit};
use crate::domain::rules::{COMMON_HAND_SIZE, DECK_SIZE, SEATS, STOCK_SIZE};
use crate::domain::state::{MatchState, RoundState};
use crate::errors::domain::{DomainError, ValidationKind};

/// Full 52-card deck in canonical order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Uniform in-place shuffle.
pub fn shuffle(deck: &mut [Card], rng: &mut impl Rng) {
    deck.shuffle(rng);
}

/// Start a round: set aside the stock and deal 12 cards to every seat
/// in field order. Hands come out sorted.
pub fn deal(state: &mut MatchState) -> Result<(), DomainError> {
    if state.deck.len() != DECK_SIZE {
        return Err(DomainError::validation(
            ValidationKind::DeckIncomplete,
            format!("deal needs a full deck, have {} cards", state.deck.len()),
        ));
    }
    if state.hands.iter().any(|hand| !hand.is_empty()) {
        return Err(DomainError::validation_other(
            "hands must be empty before dealing",
        ));
    }
    state.round = RoundState::empty();
    state.round.stock = state.deck.drain(..STOCK_SIZE).collect();
    for seat in 0..SEATS {
        let mut hand: Vec<Card> = state.deck.drain(..COMMON_HAND_SIZE).collect();
        hand.sort();
        state.hands[seat] = hand;
    }
    debug_assert!(state.deck.is_empty());
    state.round_no += 1;
    Ok(())
}

/// Rebuild the full deck from everything in play: collected piles,
/// remaining hands, unused stock, and any cards left on the ground.
/// Used between rounds and after an all-pass redeal.
pub fn collect_deck(state: &mut MatchState) {
    let mut deck = std::mem::take(&mut state.deck);
    for hand in state.hands.iter_mut() {
        deck.append(hand);
    }
    deck.append(&mut state.round.stock);
    deck.append(&mut state.round.folded);
    deck.extend(state.round.trick.plays.drain(..).map(|(_, card)| card));
    for team in state.teams.iter_mut() {
        for mut pile in team.collected.drain(..) {
            deck.append(&mut pile);
        }
    }
    state.deck = deck;
    debug_assert_eq!(state.deck.len(), DECK_SIZE);
}
