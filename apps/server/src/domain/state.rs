use crate::domain::cards_types::{Card, Hokm, Suit};
use crate::domain::dealing;
use crate::domain::rules::{SEATS, TEAMS, TEAM_SIZE};
use crate::errors::domain::DomainError;

pub type Seat = u8; // 0..=3, index into field order
pub type TeamId = u8; // 0..=1

/// Round progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Players bid in field order.
    Bidding,
    /// Bid winner discards back down to the common hand size.
    FoldDown,
    /// Bid winner picks the hokm.
    HokmSelect,
    /// Trick play.
    Trick,
    /// Round outcome decided; tally scores.
    Scoring,
    /// Round complete; the deck is rebuilt for the next deal.
    Complete,
}

/// One trick in progress (the "ground").
#[derive(Debug, Clone, Default)]
pub struct Trick {
    /// Ordered plays (who, card).
    pub plays: Vec<(Seat, Card)>,
    /// Suit of the first card played.
    pub lead: Option<Suit>,
}

/// Per-round state; lives only for the duration of one round.
#[derive(Debug, Clone)]
pub struct RoundState {
    pub phase: Phase,
    /// Cards set aside before the deal; handed to the bid winner.
    pub stock: Vec<Card>,
    /// Winning (seat, bid) so far. Later equal bids do not displace it.
    pub bid: Option<(Seat, u8)>,
    /// Cards the bid winner has folded so far this round.
    pub folded: Vec<Card>,
    pub hokm: Option<Hokm>,
    /// Seat leading the current trick.
    pub leader: Option<Seat>,
    pub trick: Trick,
    /// Completed tricks this round, both teams combined.
    pub tricks_played: u8,
}

impl RoundState {
    pub fn empty() -> Self {
        Self {
            phase: Phase::Bidding,
            stock: Vec::with_capacity(4),
            bid: None,
            folded: Vec::with_capacity(4),
            hokm: None,
            leader: None,
            trick: Trick::default(),
            tricks_played: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TeamState {
    pub name: String,
    /// Running score; persists across rounds.
    pub score: u16,
    /// Piles collected this round: the bid winner's folded cards count
    /// as one entry, then one entry per trick won. Cleared when the
    /// deck is rebuilt.
    pub collected: Vec<Vec<Card>>,
    pub seats: [Seat; TEAM_SIZE],
}

impl TeamState {
    /// Trick units toward the bid; the folded pile counts as one.
    pub fn tricks_taken(&self) -> u8 {
        self.collected.len() as u8
    }
}

/// Entire match container, owned by the single match-driving task.
#[derive(Debug, Clone)]
pub struct MatchState {
    pub teams: [TeamState; TEAMS],
    /// Owning team per seat, in field order.
    pub seat_teams: [TeamId; SEATS],
    pub hands: [Vec<Card>; SEATS],
    /// Undealt cards; holds the full deck between rounds.
    pub deck: Vec<Card>,
    /// Seat that leads the first trick; carried across rounds by the
    /// starter-rotation rule.
    pub starter: Option<Seat>,
    /// Deals performed so far, abandoned all-pass deals included.
    pub round_no: u32,
    pub round: RoundState,
}

impl MatchState {
    /// Build a fresh match for the given seat-to-team arrangement.
    ///
    /// Both teams must hold exactly two seats; the arrangement itself
    /// (interleaved or not) is up to the caller.
    pub fn new(seat_teams: [TeamId; SEATS]) -> Result<Self, DomainError> {
        let mut teams = Vec::with_capacity(TEAMS);
        for team in 0..TEAMS as TeamId {
            let seats: Vec<Seat> = (0..SEATS as Seat)
                .filter(|&seat| seat_teams[seat as usize] == team)
                .collect();
            let seats: [Seat; TEAM_SIZE] = seats.try_into().map_err(|_| {
                DomainError::validation_other(format!(
                    "team {team} must hold exactly {TEAM_SIZE} seats"
                ))
            })?;
            teams.push(TeamState {
                name: team_name(team),
                score: 0,
                collected: Vec::new(),
                seats,
            });
        }
        let teams: [TeamState; TEAMS] = teams
            .try_into()
            .map_err(|_| DomainError::validation_other("expected exactly two teams"))?;
        Ok(Self {
            teams,
            seat_teams,
            hands: Default::default(),
            deck: dealing::full_deck(),
            starter: None,
            round_no: 0,
            round: RoundState::empty(),
        })
    }

    pub fn team_of(&self, seat: Seat) -> TeamId {
        self.seat_teams[seat as usize]
    }
}

pub fn team_name(team: TeamId) -> String {
    format!("Team {}", team + 1)
}

pub fn opposing_team(team: TeamId) -> TeamId {
    (team + 1) % TEAMS as TeamId
}

/// Next seat in field order (0 → 1 → 2 → 3 → 0).
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    (seat + 1) % SEATS as Seat
}

/// Seat `n` steps along the field from `start`.
#[inline]
pub fn nth_from(start: Seat, n: u8) -> Seat {
    (start + n) % SEATS as Seat
}

pub fn require_bid(state: &MatchState, ctx: &'static str) -> Result<(Seat, u8), DomainError> {
    state.round.bid.ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: bid must be set ({ctx})"))
    })
}

pub fn require_hokm(state: &MatchState, ctx: &'static str) -> Result<Hokm, DomainError> {
    state.round.hokm.ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: hokm must be set ({ctx})"))
    })
}

pub fn require_leader(state: &MatchState, ctx: &'static str) -> Result<Seat, DomainError> {
    state.round.leader.ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: leader must be set ({ctx})"))
    })
}
