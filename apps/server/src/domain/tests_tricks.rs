use crate::domain::state::{MatchState, Phase, Seat};
use crate::domain::test_support::{card, fresh_match};
use crate::domain::tricks::{self, resolve_trick};
use crate::domain::{Card, Hokm, Rank, Suit};
use crate::errors::domain::ValidationKind;

/// Match state mid-round, ready for trick play with the given hands.
fn trick_ready(hands: [Vec<Card>; 4], leader: Seat, hokm: Hokm) -> MatchState {
    let mut state = fresh_match();
    state.hands = hands;
    state.round.bid = Some((leader, 7));
    state.round.hokm = Some(hokm);
    state.round.leader = Some(leader);
    state.round.phase = Phase::Trick;
    state
}

fn one_card_each(cards: [Card; 4]) -> [Vec<Card>; 4] {
    let [a, b, c, d] = cards;
    [vec![a], vec![b], vec![c], vec![d]]
}

#[test]
fn lead_fixes_the_trick_suit() {
    let mut state = trick_ready(
        one_card_each([
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Two),
            card(Suit::Clubs, Rank::Three),
            card(Suit::Clubs, Rank::Four),
        ]),
        0,
        Hokm::Trump(Suit::Spades),
    );
    let result = tricks::play_card(&mut state, 0, 0).unwrap();
    assert!(!result.trick_completed);
    assert_eq!(state.round.trick.lead, Some(Suit::Hearts));
    assert_eq!(state.round.trick.plays.len(), 1);
}

#[test]
fn follower_holding_the_led_suit_must_play_it() {
    let mut state = trick_ready(
        [
            vec![card(Suit::Hearts, Rank::Ten)],
            vec![card(Suit::Hearts, Rank::Two), card(Suit::Clubs, Rank::Ace)],
            vec![card(Suit::Clubs, Rank::Three)],
            vec![card(Suit::Clubs, Rank::Four)],
        ],
        0,
        Hokm::Trump(Suit::Spades),
    );
    tricks::play_card(&mut state, 0, 0).unwrap();

    let before = state.hands[1].clone();
    let err = tricks::play_card(&mut state, 1, 1).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::MustFollowSuit));
    // Rejection mutates nothing.
    assert_eq!(state.hands[1], before);
    assert_eq!(state.round.trick.plays.len(), 1);

    tricks::play_card(&mut state, 1, 0).unwrap();
    assert_eq!(state.round.trick.plays.len(), 2);
}

#[test]
fn follower_void_in_the_led_suit_may_play_anything() {
    let mut state = trick_ready(
        [
            vec![card(Suit::Hearts, Rank::Ten)],
            vec![card(Suit::Spades, Rank::Two), card(Suit::Clubs, Rank::Ace)],
            vec![card(Suit::Clubs, Rank::Three)],
            vec![card(Suit::Clubs, Rank::Four)],
        ],
        0,
        Hokm::Trump(Suit::Spades),
    );
    tricks::play_card(&mut state, 0, 0).unwrap();
    tricks::play_card(&mut state, 1, 0).unwrap();
    assert_eq!(state.round.trick.plays.len(), 2);
}

#[test]
fn plays_out_of_turn_are_rejected() {
    let mut state = trick_ready(
        one_card_each([
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Two),
            card(Suit::Clubs, Rank::Three),
            card(Suit::Clubs, Rank::Four),
        ]),
        0,
        Hokm::Saras,
    );
    let err = tricks::play_card(&mut state, 2, 0).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfTurn));
}

#[test]
fn completed_trick_moves_to_the_winning_team_and_rotates_the_lead() {
    // Trump is Spades; seat 2 is void in Hearts and trumps in.
    let mut state = trick_ready(
        one_card_each([
            card(Suit::Hearts, Rank::Ace),
            card(Suit::Hearts, Rank::Two),
            card(Suit::Spades, Rank::Three),
            card(Suit::Hearts, Rank::King),
        ]),
        0,
        Hokm::Trump(Suit::Spades),
    );
    for seat in 0..3u8 {
        assert!(!tricks::play_card(&mut state, seat, 0).unwrap().trick_completed);
    }
    let result = tricks::play_card(&mut state, 3, 0).unwrap();
    assert!(result.trick_completed);
    assert_eq!(result.trick_winner, Some(2));
    assert_eq!(state.round.leader, Some(2));
    assert_eq!(state.round.tricks_played, 1);
    let team = state.team_of(2) as usize;
    assert_eq!(state.teams[team].collected.len(), 1);
    assert_eq!(state.teams[team].collected[0].len(), 4);
    assert!(state.round.trick.plays.is_empty());
    assert_eq!(state.round.trick.lead, None);
}

#[test]
fn resolve_trick_is_independent_of_scan_order() {
    let plays: Vec<(Seat, Card)> = vec![
        (0, card(Suit::Hearts, Rank::Ten)),
        (1, card(Suit::Spades, Rank::Two)),
        (2, card(Suit::Hearts, Rank::Ace)),
        (3, card(Suit::Spades, Rank::Nine)),
    ];
    let winner = resolve_trick(&plays, Suit::Hearts, Hokm::Trump(Suit::Spades)).unwrap();
    let mut rotated = plays.clone();
    rotated.rotate_left(2);
    let winner_rotated =
        resolve_trick(&rotated, Suit::Hearts, Hokm::Trump(Suit::Spades)).unwrap();
    assert_eq!(winner, 3);
    assert_eq!(winner, winner_rotated);
}

#[test]
fn resolve_trick_per_mode() {
    let plays: Vec<(Seat, Card)> = vec![
        (0, card(Suit::Hearts, Rank::Ten)),
        (1, card(Suit::Hearts, Rank::Two)),
        (2, card(Suit::Hearts, Rank::Ace)),
        (3, card(Suit::Clubs, Rank::King)),
    ];
    let lead = Suit::Hearts;
    assert_eq!(resolve_trick(&plays, lead, Hokm::Naras).unwrap(), 1);
    assert_eq!(resolve_trick(&plays, lead, Hokm::Saras).unwrap(), 2);
    // Tak Naras: the led suit's Ace overrides the low card.
    assert_eq!(resolve_trick(&plays, lead, Hokm::TakNaras).unwrap(), 2);
    // Suit trump: the off-suit King is a trump and wins outright.
    assert_eq!(
        resolve_trick(&plays, lead, Hokm::Trump(Suit::Clubs)).unwrap(),
        3
    );
    // No trump played: highest of the led suit.
    assert_eq!(
        resolve_trick(&plays, lead, Hokm::Trump(Suit::Diamonds)).unwrap(),
        2
    );
}

#[test]
fn tak_naras_without_an_ace_behaves_like_naras() {
    let plays: Vec<(Seat, Card)> = vec![
        (0, card(Suit::Diamonds, Rank::Nine)),
        (1, card(Suit::Diamonds, Rank::Three)),
        (2, card(Suit::Diamonds, Rank::King)),
        (3, card(Suit::Spades, Rank::Ace)),
    ];
    assert_eq!(resolve_trick(&plays, Suit::Diamonds, Hokm::TakNaras).unwrap(), 1);
}
