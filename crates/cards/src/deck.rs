// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use rand::{
    Rng,
    seq::{IndexedRandom, SliceRandom},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A Poker card.
///
/// Cards are ordered by rank first and by suit second, two cards are equal if
/// they have the same rank and suit.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Create a card given a rank and a suit.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank, self.suit)
    }
}

/// Error returned when parsing a card string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid card {0:?}")]
pub struct ParseCardError(String);

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses a card from its rank and suit characters, for example `"Ah"`,
    /// `"TD"`, or `"10s"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCardError(s.to_string());

        let mut chars = s.chars();
        let suit_char = chars.next_back().ok_or_else(err)?;
        let rank_str = chars.as_str();

        let rank = match rank_str.to_ascii_uppercase().as_str() {
            "2" => Rank::Deuce,
            "3" => Rank::Trey,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" | "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(err()),
        };

        let suit = match suit_char.to_ascii_uppercase() {
            'C' => Suit::Clubs,
            'D' => Suit::Diamonds,
            'H' => Suit::Hearts,
            'S' => Suit::Spades,
            _ => return Err(err()),
        };

        Ok(Card::new(rank, suit))
    }
}

/// Card rank.
///
/// The rank discriminant is its poker value, deuce is 2 and ace is 14.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    /// Deuce
    Deuce = 2,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// Returns all ranks from deuce to ace.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }

    /// The rank value in the range 2..=14.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Returns the rank for a value in the range 2..=14.
    pub fn from_value(value: u8) -> Option<Rank> {
        Rank::ranks().find(|r| r.value() == value)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit.
    Clubs,
    /// Diamonds suit.
    Diamonds,
    /// Hearts suit.
    Hearts,
    /// Spades suit.
    Spades,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }
}

/// The number of standard decks that make up a [Deck].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckVariant {
    /// A standard 52 cards deck.
    #[default]
    Single,
    /// Two standard decks, every card appears twice.
    Double,
}

impl DeckVariant {
    /// Number of standard decks for this variant.
    pub fn copies(&self) -> usize {
        match self {
            DeckVariant::Single => 1,
            DeckVariant::Double => 2,
        }
    }

    /// Number of cards in a full deck of this variant.
    pub fn size(&self) -> usize {
        self.copies() * Deck::SIZE
    }
}

/// Error returned when drawing from an exhausted deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deck is empty")]
pub struct EmptyDeck;

/// A cards Deck.
///
/// The top of the deck is the last element of the cards vector so that a draw
/// is a pop.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in a standard deck.
    pub const SIZE: usize = 52;

    /// Creates a full unshuffled deck for the given variant.
    ///
    /// An unshuffled deck draws clubs first from deuce to ace, then diamonds,
    /// hearts and spades.
    pub fn new(variant: DeckVariant) -> Self {
        let mut cards = (0..variant.copies())
            .flat_map(|_| Suit::suits().flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s))))
            .collect::<Vec<_>>();
        cards.reverse();
        Self { cards }
    }

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng + ?Sized>(variant: DeckVariant, rng: &mut R) -> Self {
        let mut deck = Self::new(variant);
        deck.shuffle(rng);
        deck
    }

    /// Shuffles the remaining cards with a uniform random permutation.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Removes and returns the top card.
    pub fn draw(&mut self) -> Result<Card, EmptyDeck> {
        self.cards.pop().ok_or(EmptyDeck)
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Removes all copies of a card from the deck.
    pub fn remove(&mut self, card: Card) {
        self.cards.retain(|c| c != &card);
    }

    /// Calls the `f` closure for each k-cards combination of the remaining cards.
    ///
    /// Panics if k is not 1 <= k <= 7.
    pub fn for_each<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        assert!((1..=7).contains(&k), "1 <= k <= 7");

        let n = self.cards.len();
        if k > n {
            return;
        }

        let mut idx = (0..k).collect::<Vec<_>>();
        let mut hand = idx.iter().map(|&i| self.cards[i]).collect::<Vec<_>>();

        loop {
            f(&hand);

            // Advance the rightmost index that has room and reset the following.
            let Some(i) = (0..k).rev().find(|&i| idx[i] < n - k + i) else {
                return;
            };

            idx[i] += 1;
            hand[i] = self.cards[idx[i]];
            for j in i + 1..k {
                idx[j] = idx[j - 1] + 1;
                hand[j] = self.cards[idx[j]];
            }
        }
    }

    /// Calls the `f` closure for `n` random k-cards hands sampled without
    /// replacement from the remaining cards.
    pub fn sample<R, F>(&self, n: usize, k: usize, rng: &mut R, mut f: F)
    where
        R: Rng + ?Sized,
        F: FnMut(&[Card]),
    {
        let mut hand = Vec::with_capacity(k);
        for _ in 0..n {
            hand.clear();
            hand.extend(self.cards.choose_multiple(rng, k).copied());
            f(&hand);
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(DeckVariant::Single)
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::iter::Rev<std::vec::IntoIter<Card>>;

    /// Iterates the cards in draw order.
    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::{AHashMap, HashSet};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn card_to_string() {
        let c = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(c.to_string(), "KD");

        let c = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(c.to_string(), "5S");

        let c = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(c.to_string(), "TH");

        let c = Card::new(Rank::Ace, Suit::Clubs);
        assert_eq!(c.to_string(), "AC");
    }

    #[test]
    fn card_parse() {
        assert_eq!("As".parse(), Ok(Card::new(Rank::Ace, Suit::Spades)));
        assert_eq!("td".parse(), Ok(Card::new(Rank::Ten, Suit::Diamonds)));
        assert_eq!("10h".parse(), Ok(Card::new(Rank::Ten, Suit::Hearts)));
        assert_eq!("2C".parse(), Ok(Card::new(Rank::Deuce, Suit::Clubs)));

        assert!("".parse::<Card>().is_err());
        assert!("A".parse::<Card>().is_err());
        assert!("1s".parse::<Card>().is_err());
        assert!("Ax".parse::<Card>().is_err());
        assert!("AAs".parse::<Card>().is_err());
    }

    #[test]
    fn rank_values() {
        assert_eq!(Rank::Deuce.value(), 2);
        assert_eq!(Rank::Jack.value(), 11);
        assert_eq!(Rank::Ace.value(), 14);
        assert_eq!(Rank::ranks().count(), 13);

        for rank in Rank::ranks() {
            assert_eq!(Rank::from_value(rank.value()), Some(rank));
        }

        assert_eq!(Rank::from_value(1), None);
        assert_eq!(Rank::from_value(15), None);
    }

    #[test]
    fn single_deck() {
        let mut deck = Deck::new(DeckVariant::Single);
        assert_eq!(deck.count(), Deck::SIZE);

        // An unshuffled deck draws in canonical order.
        assert_eq!(deck.draw(), Ok(Card::new(Rank::Deuce, Suit::Clubs)));
        assert_eq!(deck.draw(), Ok(Card::new(Rank::Trey, Suit::Clubs)));

        let mut cards = HashSet::default();
        while let Ok(card) = deck.draw() {
            cards.insert(card);
        }

        assert_eq!(cards.len(), Deck::SIZE - 2);
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), Err(EmptyDeck));
    }

    #[test]
    fn double_deck() {
        let deck = Deck::new(DeckVariant::Double);
        assert_eq!(deck.count(), 104);
        assert_eq!(DeckVariant::Double.size(), 104);

        let mut counts = AHashMap::<Card, usize>::default();
        for card in deck {
            *counts.entry(card).or_default() += 1;
        }

        assert_eq!(counts.len(), Deck::SIZE);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let deck = Deck::new_and_shuffled(DeckVariant::Single, &mut rng);
        assert_eq!(deck.count(), Deck::SIZE);

        let shuffled = deck.clone().into_iter().collect::<Vec<_>>();
        let ordered = Deck::default().into_iter().collect::<Vec<_>>();
        assert_ne!(shuffled, ordered);

        let mut sorted = shuffled.clone();
        sorted.sort();
        let mut expected = ordered.clone();
        expected.sort();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn shuffle_top_card_distribution() {
        // Each card should show up on top about 1/52 of the times.
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = AHashMap::<Card, usize>::default();
        let rounds = 52_000;

        for _ in 0..rounds {
            let mut deck = Deck::new_and_shuffled(DeckVariant::Single, &mut rng);
            *counts.entry(deck.draw().unwrap()).or_default() += 1;
        }

        assert_eq!(counts.len(), Deck::SIZE);
        assert!(counts.values().all(|&n| (700..1300).contains(&n)));
    }

    #[test]
    fn deck_for_each() {
        let deck = Deck::default();

        let mut hands = HashSet::default();
        deck.for_each(2, |cards| {
            assert_eq!(cards.len(), 2);
            hands.insert(cards.to_owned());
        });
        assert_eq!(hands.len(), 1_326);

        hands.clear();
        deck.for_each(3, |cards| {
            assert_eq!(cards.len(), 3);
            hands.insert(cards.to_owned());
        });
        assert_eq!(hands.len(), 22_100);

        let mut count = 0;
        deck.for_each(5, |cards| {
            assert_eq!(cards.len(), 5);
            count += 1;
        });
        assert_eq!(count, 2_598_960);
    }

    #[test]
    fn deck_for_each_remove() {
        let mut deck = Deck::default();
        deck.remove(Card::new(Rank::Ace, Suit::Diamonds));
        deck.remove(Card::new(Rank::King, Suit::Diamonds));
        assert_eq!(deck.count(), 50);

        let mut count = 0;
        deck.for_each(4, |_| count += 1);
        assert_eq!(count, 230_300);
    }

    #[test]
    fn deck_sample() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut count = 0;

        Deck::default().sample(100, 7, &mut rng, |hand| {
            assert_eq!(hand.len(), 7);
            let unique = hand.iter().collect::<HashSet<_>>();
            assert_eq!(unique.len(), 7);
            count += 1;
        });

        assert_eq!(count, 100);
    }
}
