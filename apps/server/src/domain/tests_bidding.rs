use crate::domain::bidding::{self, BidAction};
use crate::domain::state::Phase;
use crate::domain::test_support::{dealt_match, match_after_fold};
use crate::domain::Hokm;
use crate::errors::domain::ValidationKind;

#[test]
fn later_equal_bid_does_not_displace_the_leader() {
    let mut state = dealt_match(1);
    bidding::record_bid(&mut state, 0, BidAction::Bid(5)).unwrap();
    let progress = bidding::record_bid(&mut state, 1, BidAction::Bid(5)).unwrap();
    assert_eq!(progress.leader, Some((0, 5)));
    assert!(!progress.closed);
}

#[test]
fn strictly_higher_bid_takes_the_lead() {
    let mut state = dealt_match(1);
    bidding::record_bid(&mut state, 0, BidAction::Bid(5)).unwrap();
    let progress = bidding::record_bid(&mut state, 1, BidAction::Bid(7)).unwrap();
    assert_eq!(progress.leader, Some((1, 7)));
}

#[test]
fn thirteen_closes_bidding_immediately() {
    let mut state = dealt_match(1);
    let progress = bidding::record_bid(&mut state, 2, BidAction::Bid(13)).unwrap();
    assert!(progress.closed);
    assert_eq!(progress.leader, Some((2, 13)));
}

#[test]
fn bids_outside_one_to_thirteen_are_rejected() {
    let mut state = dealt_match(1);
    for bad in [0u8, 14, 200] {
        let err = bidding::record_bid(&mut state, 0, BidAction::Bid(bad)).unwrap_err();
        assert_eq!(err.validation_kind(), Some(&ValidationKind::BidOutOfRange));
    }
    assert_eq!(state.round.bid, None);
}

#[test]
fn all_pass_leaves_no_winner_and_redeal_changes_no_score() {
    let mut state = dealt_match(3);
    for seat in 0..4u8 {
        bidding::record_bid(&mut state, seat, BidAction::Pass).unwrap();
    }
    assert_eq!(bidding::close_bidding(&mut state).unwrap(), None);
    assert_eq!(state.round.phase, Phase::Bidding);

    crate::domain::dealing::collect_deck(&mut state);
    assert_eq!(state.deck.len(), 52);
    crate::domain::dealing::deal(&mut state).unwrap();
    assert!(state.teams.iter().all(|team| team.score == 0));
    assert_eq!(state.round.bid, None);
}

#[test]
fn closing_hands_the_stock_to_the_winner() {
    let mut state = dealt_match(4);
    bidding::record_bid(&mut state, 2, BidAction::Bid(6)).unwrap();
    bidding::close_bidding(&mut state).unwrap();
    assert_eq!(state.hands[2].len(), 16);
    assert!(state.round.stock.is_empty());
    assert_eq!(state.round.phase, Phase::FoldDown);
    let mut sorted = state.hands[2].clone();
    sorted.sort();
    assert_eq!(state.hands[2], sorted);
}

#[test]
fn fold_rejects_bad_index_without_touching_the_hand() {
    let mut state = dealt_match(4);
    bidding::record_bid(&mut state, 2, BidAction::Bid(6)).unwrap();
    bidding::close_bidding(&mut state).unwrap();
    let before = state.hands[2].clone();
    let err = bidding::fold_card(&mut state, 2, 16).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::IndexOutOfRange));
    assert_eq!(state.hands[2], before);
}

#[test]
fn only_the_bid_winner_folds() {
    let mut state = dealt_match(4);
    bidding::record_bid(&mut state, 2, BidAction::Bid(6)).unwrap();
    bidding::close_bidding(&mut state).unwrap();
    let err = bidding::fold_card(&mut state, 0, 0).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfTurn));
}

#[test]
fn folding_four_cards_credits_the_team_and_advances() {
    let state = match_after_fold(4, 2, 6);
    assert_eq!(state.hands[2].len(), 12);
    let team = state.team_of(2) as usize;
    assert_eq!(state.teams[team].collected.len(), 1);
    assert_eq!(state.teams[team].collected[0].len(), 4);
    assert_eq!(state.round.phase, Phase::HokmSelect);
}

#[test]
fn special_hokms_are_offered_only_on_thirteen() {
    assert_eq!(bidding::offered_hokms(6).len(), 4);
    let offered = bidding::offered_hokms(13);
    assert_eq!(offered.len(), 7);
    assert!(offered.contains(&Hokm::Naras));
    assert!(offered.contains(&Hokm::Saras));
    assert!(offered.contains(&Hokm::TakNaras));
}

#[test]
fn special_hokm_index_rejected_for_a_sub_thirteen_bid() {
    let mut state = match_after_fold(4, 2, 6);
    let err = bidding::select_hokm(&mut state, 2, 4).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::HokmNotOffered));
    assert_eq!(state.round.hokm, None);

    let hokm = bidding::select_hokm(&mut state, 2, 3).unwrap();
    assert_eq!(hokm, Hokm::Trump(crate::domain::Suit::Spades));
    assert_eq!(state.round.phase, Phase::Trick);
}

#[test]
fn special_hokm_selectable_on_a_thirteen_bid() {
    let mut state = match_after_fold(8, 1, 13);
    let hokm = bidding::select_hokm(&mut state, 1, 6).unwrap();
    assert_eq!(hokm, Hokm::TakNaras);
}

#[test]
fn only_the_bid_winner_picks_the_hokm() {
    let mut state = match_after_fold(4, 2, 6);
    let err = bidding::select_hokm(&mut state, 1, 0).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfTurn));
}
