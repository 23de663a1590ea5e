//! Bidding, the bid winner's stock pickup and fold-down, and hokm
//! selection.

use crate::domain::cards_types::{Card, Hokm, Suit};
use crate::domain::rules::{COMMON_HAND_SIZE, MAX_BID, MIN_BID};
use crate::domain::state::{require_bid, MatchState, Phase, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

/// A single seat's response to the bid prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidAction {
    Pass,
    Bid(u8),
}

/// Outcome of recording one bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidProgress {
    /// Seat currently holding the highest bid, if any.
    pub leader: Option<(Seat, u8)>,
    /// A bid of 13 ends the bidding pass immediately.
    pub closed: bool,
}

/// Record one seat's bid or pass.
///
/// Only a strictly higher bid displaces the current leader, so the
/// earliest of equal bids keeps the win.
pub fn record_bid(
    state: &mut MatchState,
    seat: Seat,
    action: BidAction,
) -> Result<BidProgress, DomainError> {
    if state.round.phase != Phase::Bidding {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "not in the bidding phase",
        ));
    }
    if let BidAction::Bid(bid) = action {
        if !(MIN_BID..=MAX_BID).contains(&bid) {
            return Err(DomainError::validation(
                ValidationKind::BidOutOfRange,
                format!("bid {bid} outside {MIN_BID}..={MAX_BID}"),
            ));
        }
        if state.round.bid.is_none_or(|(_, high)| bid > high) {
            state.round.bid = Some((seat, bid));
        }
    }
    Ok(BidProgress {
        leader: state.round.bid,
        closed: state.round.bid.is_some_and(|(_, high)| high == MAX_BID),
    })
}

/// Close the bidding pass.
///
/// On a standing bid the stock moves into the winner's hand and the
/// round advances to fold-down; on an all-pass the caller abandons the
/// deal, rebuilds the deck, and deals again.
pub fn close_bidding(state: &mut MatchState) -> Result<Option<(Seat, u8)>, DomainError> {
    if state.round.phase != Phase::Bidding {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "not in the bidding phase",
        ));
    }
    let Some((winner, bid)) = state.round.bid else {
        return Ok(None);
    };
    let stock: Vec<Card> = state.round.stock.drain(..).collect();
    let hand = &mut state.hands[winner as usize];
    hand.extend(stock);
    hand.sort();
    state.round.phase = Phase::FoldDown;
    Ok(Some((winner, bid)))
}

/// Discard one card by index during fold-down.
///
/// Returns the folded card. Once the hand is back at the common size,
/// the folded pile is credited to the winner's team as a taken trick
/// and the round advances to hokm selection.
pub fn fold_card(state: &mut MatchState, seat: Seat, index: usize) -> Result<Card, DomainError> {
    if state.round.phase != Phase::FoldDown {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "not in the fold-down phase",
        ));
    }
    let (winner, _) = require_bid(state, "fold_card")?;
    if seat != winner {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "only the bid winner folds",
        ));
    }
    let hand = &mut state.hands[seat as usize];
    if index >= hand.len() {
        return Err(DomainError::validation(
            ValidationKind::IndexOutOfRange,
            format!("no card at index {index}"),
        ));
    }
    let card = hand.remove(index);
    state.round.folded.push(card);
    if state.hands[seat as usize].len() == COMMON_HAND_SIZE {
        let folded = std::mem::take(&mut state.round.folded);
        let team = state.team_of(seat);
        state.teams[team as usize].collected.push(folded);
        state.round.phase = Phase::HokmSelect;
    }
    Ok(card)
}

/// Hokm choices offered for a winning bid, in prompt order. The three
/// suitless modes appear only on a bid of 13.
pub fn offered_hokms(bid: u8) -> Vec<Hokm> {
    let mut offered: Vec<Hokm> = Suit::ALL.iter().copied().map(Hokm::Trump).collect();
    if bid == MAX_BID {
        offered.extend([Hokm::Naras, Hokm::Saras, Hokm::TakNaras]);
    }
    offered
}

/// Pick the hokm by index into `offered_hokms`.
pub fn select_hokm(state: &mut MatchState, seat: Seat, index: usize) -> Result<Hokm, DomainError> {
    if state.round.phase != Phase::HokmSelect {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "not in the hokm selection phase",
        ));
    }
    let (winner, bid) = require_bid(state, "select_hokm")?;
    if seat != winner {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "only the bid winner picks the hokm",
        ));
    }
    let offered = offered_hokms(bid);
    let hokm = *offered.get(index).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::HokmNotOffered,
            format!("hokm index {index} not offered for a bid of {bid}"),
        )
    })?;
    state.round.hokm = Some(hokm);
    state.round.phase = Phase::Trick;
    Ok(hokm)
}
