//! The seated table: per-player request/response plus fan-out
//! broadcast.
//!
//! `solicit` is the turn gate: exactly one player is prompted and the
//! match task suspends until that player's reply arrives or their
//! connection fails. Connection failures here are fatal to the match.

use futures::{SinkExt, StreamExt};
use tracing::debug;
use uuid::Uuid;

use crate::domain::rules::{SEATS, TEAMS, TEAM_SIZE};
use crate::domain::state::{Seat, TeamId};
use crate::error::AppError;
use crate::session::framing::{self, Channel, Transport};

/// A connected, onboarded player.
pub struct SeatedPlayer {
    pub id: Uuid,
    pub name: String,
    pub team: TeamId,
    pub transport: Transport,
}

/// The four players in field order: the teams are interleaved so turn
/// order alternates between them.
pub struct Table {
    seats: Vec<SeatedPlayer>,
}

impl Table {
    /// Arrange onboarded players into field order.
    pub fn new(players: Vec<SeatedPlayer>) -> Result<Self, AppError> {
        if players.len() != SEATS {
            return Err(AppError::protocol(format!(
                "expected {SEATS} seated players, got {}",
                players.len()
            )));
        }
        let mut by_team: [Vec<SeatedPlayer>; TEAMS] = [Vec::new(), Vec::new()];
        for player in players {
            let team = player.team as usize;
            if team >= TEAMS {
                return Err(AppError::protocol(format!("unknown team {team}")));
            }
            by_team[team].push(player);
        }
        if by_team.iter().any(|members| members.len() != TEAM_SIZE) {
            return Err(AppError::protocol(
                "each team must seat exactly two players",
            ));
        }
        let [team_a, team_b] = by_team;
        let mut seats = Vec::with_capacity(SEATS);
        for (a, b) in team_a.into_iter().zip(team_b) {
            seats.push(a);
            seats.push(b);
        }
        Ok(Self { seats })
    }

    pub fn seat_teams(&self) -> [TeamId; SEATS] {
        let mut teams = [0; SEATS];
        for (seat, player) in self.seats.iter().enumerate() {
            teams[seat] = player.team;
        }
        teams
    }

    pub fn name(&self, seat: Seat) -> &str {
        &self.seats[seat as usize].name
    }

    /// Prompt one seat and suspend until its reply arrives.
    pub async fn solicit(&mut self, seat: Seat, prompt: &str) -> Result<String, AppError> {
        let player = &mut self.seats[seat as usize];
        player
            .transport
            .send(framing::encode(Channel::Demand, prompt))
            .await
            .map_err(|source| AppError::connection("solicit send", source))?;
        let frame = player
            .transport
            .next()
            .await
            .ok_or(AppError::ConnectionClosed)?
            .map_err(|source| AppError::connection("solicit recv", source))?;
        let reply = framing::decode_reply(frame)?;
        debug!(seat, reply = %reply, "player replied");
        Ok(reply)
    }

    /// Send an informational message to a single seat.
    pub async fn send(&mut self, seat: Seat, text: &str) -> Result<(), AppError> {
        self.seats[seat as usize]
            .transport
            .send(framing::encode(Channel::Info, text))
            .await
            .map_err(|source| AppError::connection("send", source))
    }

    /// Fan an informational message out to every seat.
    pub async fn broadcast(&mut self, text: &str) -> Result<(), AppError> {
        for player in self.seats.iter_mut() {
            player
                .transport
                .send(framing::encode(Channel::Info, text))
                .await
                .map_err(|source| AppError::connection("broadcast", source))?;
        }
        Ok(())
    }
}
