//! Solicit-and-retry loops for each player decision.
//!
//! Invalid input is re-prompted in place with an inline error
//! annotation; the turn does not advance and no state changes until
//! the input is accepted.

use tracing::debug;

use super::GameFlow;
use crate::domain::bidding::{self, BidAction, BidProgress};
use crate::domain::cards_types::{Card, Hokm};
use crate::domain::state::{Phase, Seat};
use crate::domain::tricks::{self, PlayResult};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::session::INVALID_RESPONSE;

impl GameFlow {
    pub(super) async fn solicit_bid(&mut self, seat: Seat) -> Result<BidProgress, AppError> {
        let mut error = String::new();
        loop {
            let hand = render_hand(&self.state.hands[seat as usize]);
            let prompt =
                format!("{error}These are your cards: {hand}\nWhat is your bid? (1-13 or pass)");
            let reply = self.table.solicit(seat, &prompt).await?;
            let Some(action) = parse_bid(&reply) else {
                debug!(seat, reply = %reply, "unparseable bid");
                error = INVALID_RESPONSE.to_owned();
                continue;
            };
            match bidding::record_bid(&mut self.state, seat, action) {
                Ok(progress) => {
                    let name = self.table.name(seat).to_owned();
                    let note = match action {
                        BidAction::Pass => format!("{name} passes"),
                        BidAction::Bid(bid) => format!("{name} bids {bid}"),
                    };
                    self.table.broadcast(&note).await?;
                    return Ok(progress);
                }
                Err(err) => error = self.retry_text(&err),
            }
        }
    }

    pub(super) async fn run_fold_down(&mut self, seat: Seat) -> Result<(), AppError> {
        let mut error = String::new();
        while self.state.round.phase == Phase::FoldDown {
            let hand = render_hand_indexed(&self.state.hands[seat as usize]);
            let prompt = format!("{error}{hand}\nChoose a card to fold");
            let reply = self.table.solicit(seat, &prompt).await?;
            let Some(index) = parse_index(&reply) else {
                error = INVALID_RESPONSE.to_owned();
                continue;
            };
            match bidding::fold_card(&mut self.state, seat, index) {
                Ok(card) => {
                    error.clear();
                    self.table.send(seat, &format!("Folded {card}")).await?;
                }
                Err(err) => error = self.retry_text(&err),
            }
        }
        Ok(())
    }

    pub(super) async fn run_hokm_select(&mut self, seat: Seat, bid: u8) -> Result<Hokm, AppError> {
        let menu = bidding::offered_hokms(bid)
            .iter()
            .enumerate()
            .map(|(index, hokm)| format!("{hokm}:{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let name = self.table.name(seat).to_owned();
        let mut error = String::new();
        loop {
            let prompt = format!("{error}{name} what is your hokm? {menu}");
            let reply = self.table.solicit(seat, &prompt).await?;
            let Some(index) = parse_index(&reply) else {
                error = INVALID_RESPONSE.to_owned();
                continue;
            };
            match bidding::select_hokm(&mut self.state, seat, index) {
                Ok(hokm) => return Ok(hokm),
                Err(err) => error = self.retry_text(&err),
            }
        }
    }

    pub(super) async fn solicit_play(&mut self, seat: Seat) -> Result<PlayResult, AppError> {
        let mut error = String::new();
        loop {
            let name = self.table.name(seat).to_owned();
            let hand = render_hand_indexed(&self.state.hands[seat as usize]);
            let prompt = format!("{error}{name}: {hand}\nChoose a card to play:");
            let reply = self.table.solicit(seat, &prompt).await?;
            let Some(index) = parse_index(&reply) else {
                error = INVALID_RESPONSE.to_owned();
                continue;
            };
            match tricks::play_card(&mut self.state, seat, index) {
                Ok(result) => {
                    self.table
                        .send(seat, &format!("Played {}", result.card))
                        .await?;
                    return Ok(result);
                }
                Err(err) => {
                    debug!(seat, error = %err, "play rejected");
                    error = self.retry_text(&err);
                }
            }
        }
    }

    /// Player-facing retry prefix for a rejected input.
    fn retry_text(&self, err: &DomainError) -> String {
        match err.validation_kind() {
            Some(ValidationKind::MustFollowSuit) => match self.state.round.trick.lead {
                Some(lead) => format!("You have {}!\n", lead.name()),
                None => INVALID_RESPONSE.to_owned(),
            },
            Some(ValidationKind::BidOutOfRange) => {
                "Your bid must be between 1 and 13\n".to_owned()
            }
            _ => INVALID_RESPONSE.to_owned(),
        }
    }
}

fn parse_bid(reply: &str) -> Option<BidAction> {
    if reply.eq_ignore_ascii_case("pass") {
        return Some(BidAction::Pass);
    }
    reply.parse::<u8>().ok().map(BidAction::Bid)
}

fn parse_index(reply: &str) -> Option<usize> {
    reply.parse::<usize>().ok()
}

pub(super) fn render_hand(hand: &[Card]) -> String {
    hand.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub(super) fn render_hand_indexed(hand: &[Card]) -> String {
    hand.iter()
        .enumerate()
        .map(|(index, card)| format!("{card}:{index}"))
        .collect::<Vec<_>>()
        .join(", ")
}
