//! Round outcome detection, score application, starter rotation, and
//! match termination.

use crate::domain::rules::{MAX_BID, TARGET_SCORE, TRICKS_PER_ROUND};
use crate::domain::state::{
    next_seat, opposing_team, require_bid, MatchState, Phase, Seat, TeamId,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// A decided round: which team scores and how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub winner: TeamId,
    pub points: u16,
}

/// Whether the round's outcome is already determined.
///
/// The bidding team wins the moment its taken units (folded pile
/// included) reach the bid; it loses the moment the bid becomes
/// unreachable even if it takes every one of the 12 remaining playable
/// tricks. A met bid scores the bid value, doubled for a 13 sweep; a
/// failed bid scores the opponents double the bid.
pub fn round_result(state: &MatchState) -> Result<Option<RoundResult>, DomainError> {
    let (bid_seat, bid) = require_bid(state, "round_result")?;
    let bid_team = state.team_of(bid_seat);
    let taken = state.teams[bid_team as usize].tricks_taken();
    let remaining = TRICKS_PER_ROUND.saturating_sub(state.round.tricks_played);
    if taken >= bid {
        let points = if bid == MAX_BID { bid as u16 * 2 } else { bid as u16 };
        return Ok(Some(RoundResult {
            winner: bid_team,
            points,
        }));
    }
    if taken + remaining < bid {
        return Ok(Some(RoundResult {
            winner: opposing_team(bid_team),
            points: bid as u16 * 2,
        }));
    }
    Ok(None)
}

/// Check for a decided round and move to the scoring phase if so.
pub fn check_round_over(state: &mut MatchState) -> Result<Option<RoundResult>, DomainError> {
    let result = round_result(state)?;
    if result.is_some() && state.round.phase == Phase::Trick {
        state.round.phase = Phase::Scoring;
    }
    Ok(result)
}

/// Add the round's points to the winning team and complete the round.
pub fn apply_round_result(state: &mut MatchState, result: &RoundResult) -> Result<(), DomainError> {
    if state.round.phase != Phase::Scoring {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "round is not ready to score",
        ));
    }
    state.teams[result.winner as usize].score += result.points;
    state.round.phase = Phase::Complete;
    Ok(())
}

/// First team at or past the target score, if any. Checked only at
/// round boundaries; at most one team can cross per round since only
/// the round winner scores.
pub fn match_winner(state: &MatchState) -> Option<TeamId> {
    state
        .teams
        .iter()
        .position(|team| team.score >= TARGET_SCORE)
        .map(|team| team as TeamId)
}

/// Seat that leads the first trick of the round being set up.
///
/// The first round goes to the bid winner, as does any round won with a
/// bid of 13. Otherwise the carried starter keeps the lead while their
/// team's score is strictly ahead, and rotates one seat along the field
/// when it is not.
pub fn round_starter(state: &MatchState, bid_winner: Seat, bid: u8) -> Seat {
    match state.starter {
        None => bid_winner,
        Some(_) if bid == MAX_BID => bid_winner,
        Some(current) => {
            let team = state.team_of(current);
            let other = opposing_team(team);
            if state.teams[team as usize].score > state.teams[other as usize].score {
                current
            } else {
                next_seat(current)
            }
        }
    }
}
