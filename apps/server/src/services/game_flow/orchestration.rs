//! The match loop: deal → bid → fold → hokm → tricks → score, repeated
//! until a team reaches the target score.

use tracing::info;

use super::player_actions::render_hand;
use super::GameFlow;
use crate::domain::bidding;
use crate::domain::dealing;
use crate::domain::rules::SEATS;
use crate::domain::scoring::{self, RoundResult};
use crate::domain::state::{MatchState, Seat};
use crate::domain::tricks;
use crate::error::AppError;
use crate::session::table::Table;

impl GameFlow {
    pub fn new(table: Table) -> Result<Self, AppError> {
        let state = MatchState::new(table.seat_teams())?;
        Ok(Self { table, state })
    }

    /// Drive rounds until a team reaches the target score.
    pub async fn run(mut self) -> Result<(), AppError> {
        loop {
            if let Some(winner) = scoring::match_winner(&self.state) {
                let team = &self.state.teams[winner as usize];
                info!(team = winner, score = team.score, "match over");
                let note = format!("Winner is {}!", team.name);
                self.table.broadcast(&note).await?;
                return Ok(());
            }
            self.play_round().await?;
        }
    }

    async fn play_round(&mut self) -> Result<(), AppError> {
        self.broadcast_match_scores().await?;
        let (bid_winner, bid) = self.run_bidding().await?;

        let starter = scoring::round_starter(&self.state, bid_winner, bid);
        self.state.starter = Some(starter);
        self.state.round.leader = Some(starter);
        let starter_name = self.table.name(starter).to_owned();
        self.table
            .broadcast(&format!("Starter: {starter_name}"))
            .await?;

        self.run_fold_down(bid_winner).await?;
        let hokm = self.run_hokm_select(bid_winner, bid).await?;
        info!(seat = bid_winner, %hokm, "hokm selected");
        self.table.broadcast(&format!("Hokm: {hokm}")).await?;

        let result = self.run_tricks().await?;
        scoring::apply_round_result(&mut self.state, &result)?;
        let winner_name = self.state.teams[result.winner as usize].name.clone();
        info!(
            round = self.state.round_no,
            team = result.winner,
            points = result.points,
            "round scored"
        );
        self.table
            .broadcast(&format!("Winner of this round is: {winner_name}"))
            .await?;

        dealing::collect_deck(&mut self.state);
        Ok(())
    }

    /// Shuffle, deal, and run bid passes until a bid stands. An
    /// all-pass deal is abandoned and redealt with no score change.
    async fn run_bidding(&mut self) -> Result<(Seat, u8), AppError> {
        loop {
            self.table.broadcast("Shuffling cards...").await?;
            dealing::shuffle(&mut self.state.deck, &mut rand::rng());
            self.table.broadcast("Handing out cards...").await?;
            dealing::deal(&mut self.state)?;
            info!(round = self.state.round_no, "cards dealt");
            for seat in 0..SEATS as Seat {
                self.send_hand(seat).await?;
            }

            for seat in 0..SEATS as Seat {
                let progress = self.solicit_bid(seat).await?;
                if progress.closed {
                    break;
                }
            }
            match bidding::close_bidding(&mut self.state)? {
                Some((winner, bid)) => {
                    info!(seat = winner, bid, "bidding closed");
                    let winner_name = self.table.name(winner).to_owned();
                    self.table
                        .broadcast(&format!("{winner_name} wins with {bid}!"))
                        .await?;
                    // The winner's hand now includes the stock.
                    self.send_hand(winner).await?;
                    return Ok((winner, bid));
                }
                None => {
                    info!("every seat passed; redealing");
                    self.table
                        .broadcast("Everyone passed. Shuffling again...")
                        .await?;
                    dealing::collect_deck(&mut self.state);
                }
            }
        }
    }

    /// Trick play until the round outcome is decided.
    async fn run_tricks(&mut self) -> Result<RoundResult, AppError> {
        loop {
            if let Some(result) = scoring::check_round_over(&mut self.state)? {
                return Ok(result);
            }
            self.broadcast_round_scores().await?;
            self.play_trick().await?;
        }
    }

    async fn play_trick(&mut self) -> Result<(), AppError> {
        for _ in 0..SEATS {
            if !self.state.round.trick.plays.is_empty() {
                self.broadcast_ground().await?;
            }
            let seat = tricks::expected_player(&self.state)?;
            let result = self.solicit_play(seat).await?;
            if let Some(winner) = result.trick_winner {
                info!(
                    seat = winner,
                    tricks_played = self.state.round.tricks_played,
                    "trick taken"
                );
                let winner_name = self.table.name(winner).to_owned();
                self.table
                    .broadcast(&format!("{winner_name} takes the trick"))
                    .await?;
            }
        }
        Ok(())
    }

    async fn send_hand(&mut self, seat: Seat) -> Result<(), AppError> {
        let hand = render_hand(&self.state.hands[seat as usize]);
        self.table
            .send(seat, &format!("These are your cards: {hand}"))
            .await
    }

    async fn broadcast_match_scores(&mut self) -> Result<(), AppError> {
        let lines = self
            .state
            .teams
            .iter()
            .map(|team| format!("{}: {}", team.name, team.score))
            .collect::<Vec<_>>()
            .join("\n");
        self.table.broadcast(&lines).await
    }

    async fn broadcast_round_scores(&mut self) -> Result<(), AppError> {
        let lines = self
            .state
            .teams
            .iter()
            .map(|team| format!("{}: {}", team.name, team.tricks_taken()))
            .collect::<Vec<_>>()
            .join("\n");
        self.table.broadcast(&lines).await
    }

    async fn broadcast_ground(&mut self) -> Result<(), AppError> {
        let plays = self
            .state
            .round
            .trick
            .plays
            .iter()
            .map(|(seat, card)| format!("{}:{card}", self.table.name(*seat)))
            .collect::<Vec<_>>()
            .join(", ");
        self.table.broadcast(&plays).await
    }
}
