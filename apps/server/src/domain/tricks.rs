//! The trick state machine: leading, follow-suit enforcement, and
//! winner resolution.

use crate::domain::cards_logic::{hand_has_suit, play_beats};
use crate::domain::cards_types::{Card, Hokm, Suit};
use crate::domain::rules::SEATS;
use crate::domain::scoring;
use crate::domain::state::{nth_from, require_hokm, require_leader, MatchState, Phase, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of playing one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayResult {
    pub card: Card,
    pub trick_completed: bool,
    /// Winner of the completed trick, if one was completed.
    pub trick_winner: Option<Seat>,
    /// Set when the round outcome became decided with this play.
    pub round_over: bool,
}

/// Seat expected to act, per field order from the trick's leader.
pub fn expected_player(state: &MatchState) -> Result<Seat, DomainError> {
    let leader = require_leader(state, "expected_player")?;
    Ok(nth_from(leader, state.round.trick.plays.len() as u8))
}

/// Play the card at `index` from `seat`'s hand into the current trick.
///
/// The first play fixes the led suit; followers holding the led suit
/// must play it. No state changes on a rejected play.
pub fn play_card(state: &mut MatchState, seat: Seat, index: usize) -> Result<PlayResult, DomainError> {
    if state.round.phase != Phase::Trick {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "not in the trick phase",
        ));
    }
    let turn = expected_player(state)?;
    if turn != seat {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("seat {seat} played out of turn"),
        ));
    }
    let hand = &state.hands[seat as usize];
    let Some(&card) = hand.get(index) else {
        return Err(DomainError::validation(
            ValidationKind::IndexOutOfRange,
            format!("no card at index {index}"),
        ));
    };
    if let Some(lead) = state.round.trick.lead {
        if card.suit != lead && hand_has_suit(hand, lead) {
            return Err(DomainError::validation(
                ValidationKind::MustFollowSuit,
                format!("must follow {}", lead.name()),
            ));
        }
    }

    state.hands[seat as usize].remove(index);
    if state.round.trick.plays.is_empty() {
        state.round.trick.lead = Some(card.suit);
    }
    state.round.trick.plays.push((seat, card));

    let mut result = PlayResult {
        card,
        trick_completed: false,
        trick_winner: None,
        round_over: false,
    };
    if state.round.trick.plays.len() < SEATS {
        return Ok(result);
    }

    // Resolve the completed trick.
    let lead = state.round.trick.lead.ok_or_else(|| {
        DomainError::validation_other("Invariant violated: completed trick has no led suit")
    })?;
    let hokm = require_hokm(state, "play_card")?;
    let winner = resolve_trick(&state.round.trick.plays, lead, hokm)?;
    let taken: Vec<Card> = state.round.trick.plays.drain(..).map(|(_, c)| c).collect();
    state.round.trick.lead = None;
    let team = state.team_of(winner);
    state.teams[team as usize].collected.push(taken);
    state.round.tricks_played += 1;
    state.round.leader = Some(winner);

    result.trick_completed = true;
    result.trick_winner = Some(winner);
    result.round_over = scoring::check_round_over(state)?.is_some();
    Ok(result)
}

/// Winner of a trick under the given hokm. Pure: the same plays, lead,
/// and hokm always resolve to the same seat, with ties kept by the
/// earliest qualifying play.
pub fn resolve_trick(
    plays: &[(Seat, Card)],
    lead: Suit,
    hokm: Hokm,
) -> Result<Seat, DomainError> {
    let mut iter = plays.iter();
    let &first = iter.next().ok_or_else(|| {
        DomainError::validation_other("Invariant violated: cannot resolve an empty trick")
    })?;
    let mut winner = first;
    for &(seat, card) in iter {
        if play_beats(card, winner.1, lead, hokm) {
            winner = (seat, card);
        }
    }
    Ok(winner.0)
}
