//! Pre-match onboarding: accept connections and seat four players on
//! two teams.
//!
//! Each candidate connection runs on its own task so name and team
//! prompts for different candidates proceed in parallel; this is the
//! only concurrent part of the server and it ends when the table is
//! full. Team occupancy is the single piece of cross-task state.

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::rules::{SEATS, TEAMS, TEAM_SIZE};
use crate::domain::state::{team_name, TeamId};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::session::framing::{self, Channel, Transport};
use crate::session::table::SeatedPlayer;
use crate::session::INVALID_RESPONSE;

type TeamSlots = Arc<Mutex<[usize; TEAMS]>>;

/// Accept and onboard candidates until four players are seated.
///
/// A candidate that fails onboarding (closed socket, bad frames) is
/// dropped with a warning; the lobby keeps accepting.
pub async fn seat_players(listener: &TcpListener) -> Result<Vec<SeatedPlayer>, AppError> {
    let slots: TeamSlots = Arc::new(Mutex::new([0; TEAMS]));
    let (seated_tx, mut seated_rx) = mpsc::channel::<SeatedPlayer>(SEATS);
    let mut seated = Vec::with_capacity(SEATS);
    while seated.len() < SEATS {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, addr) = accepted
                    .map_err(|source| AppError::connection("accept", source))?;
                info!(%addr, "candidate connected");
                let slots = Arc::clone(&slots);
                let seated_tx = seated_tx.clone();
                tokio::spawn(async move {
                    if let Err(err) = onboard(stream, slots, seated_tx).await {
                        warn!(error = %err, "onboarding failed; dropping candidate");
                    }
                });
            }
            Some(player) = seated_rx.recv() => {
                info!(name = %player.name, team = player.team, "player seated");
                seated.push(player);
            }
        }
    }
    Ok(seated)
}

async fn onboard(
    stream: TcpStream,
    slots: TeamSlots,
    seated_tx: mpsc::Sender<SeatedPlayer>,
) -> Result<(), AppError> {
    let mut transport = framing::transport(stream);

    let mut error = String::new();
    let name = loop {
        let name = demand(&mut transport, &format!("{error}Choose your name:")).await?;
        if !name.is_empty() {
            break name;
        }
        error = INVALID_RESPONSE.to_owned();
    };

    let mut error = String::new();
    let team = loop {
        let open = open_teams(&slots);
        if open.is_empty() {
            let notice = framing::encode(Channel::Info, "Game is full");
            transport.send(notice).await.ok();
            return Err(AppError::Domain(DomainError::conflict(
                ConflictKind::TableFull,
                "all seats taken",
            )));
        }
        let menu = open
            .iter()
            .map(|&team| format!("{}:{team}", team_name(team)))
            .collect::<Vec<_>>()
            .join(", ");
        let reply = demand(&mut transport, &format!("{error}Choose your team: {menu}")).await?;
        match reply.parse::<TeamId>() {
            Ok(team) if (team as usize) < TEAMS => match claim_slot(&slots, team) {
                Ok(()) => break team,
                Err(_) => error = INVALID_RESPONSE.to_owned(),
            },
            _ => error = INVALID_RESPONSE.to_owned(),
        }
    };

    let player = SeatedPlayer {
        id: Uuid::new_v4(),
        name,
        team,
        transport,
    };
    seated_tx
        .send(player)
        .await
        .map_err(|_| AppError::protocol("lobby closed before seating completed"))
}

fn open_teams(slots: &TeamSlots) -> Vec<TeamId> {
    let slots = slots.lock();
    (0..TEAMS as TeamId)
        .filter(|&team| slots[team as usize] < TEAM_SIZE)
        .collect()
}

fn claim_slot(slots: &TeamSlots, team: TeamId) -> Result<(), DomainError> {
    let mut slots = slots.lock();
    if slots[team as usize] >= TEAM_SIZE {
        return Err(DomainError::conflict(
            ConflictKind::TeamFull,
            format!("{} is full", team_name(team)),
        ));
    }
    slots[team as usize] += 1;
    Ok(())
}

async fn demand(transport: &mut Transport, prompt: &str) -> Result<String, AppError> {
    transport
        .send(framing::encode(Channel::Demand, prompt))
        .await
        .map_err(|source| AppError::connection("onboarding send", source))?;
    let frame = transport
        .next()
        .await
        .ok_or(AppError::ConnectionClosed)?
        .map_err(|source| AppError::connection("onboarding recv", source))?;
    framing::decode_reply(frame)
}
