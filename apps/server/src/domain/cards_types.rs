//! Core card-related types: Card, Rank, Suit, Hokm

use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn name(self) -> &'static str {
        match self {
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Suit::Clubs => '\u{2663}',
            Suit::Diamonds => '\u{2666}',
            Suit::Hearts => '\u{2665}',
            Suit::Spades => '\u{2660}',
        }
    }
}

impl Display for Suit {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Position in the rank order, 0 (Two) through 12 (Ace).
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

// Note: Ord/Eq on Card is only for stable hand sorting: suit order C<D<H<S then rank order.
// Do not use for trick resolution; that depends on the led suit and the hokm.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.suit.glyph(), self.rank.label())
    }
}

/// Trick-resolution mode picked by the bid winner for the round.
///
/// The three suitless variants are only offered on a bid of 13.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Hokm {
    /// Cards of the chosen suit trump the led suit; the highest trump
    /// played wins the trick.
    Trump(Suit),
    /// Lowest card of the led suit wins; no suit has trump power.
    Naras,
    /// Highest card of the led suit wins; no suit has trump power.
    Saras,
    /// As `Naras`, except the led suit's Ace wins the trick outright.
    TakNaras,
}

impl Display for Hokm {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Hokm::Trump(suit) => f.write_str(suit.name()),
            Hokm::Naras => f.write_str("Naras"),
            Hokm::Saras => f.write_str("Saras"),
            Hokm::TakNaras => f.write_str("Tak Naras"),
        }
    }
}
