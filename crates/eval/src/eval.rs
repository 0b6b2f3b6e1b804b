// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator buckets the cards by rank and by suit and then looks for the
//! best category top down, from royal flush to high card, so the first match is
//! the best hand available. Each category builds the cards that make the hand
//! and the ranks that decide ties within the category, the remaining slots are
//! filled with the highest kickers.
//!
//! The tie-break sequence has a fixed shape for each category:
//!
//! | Category        | Tie-break                              |
//! |-----------------|----------------------------------------|
//! | RoyalFlush      | `[14]`                                 |
//! | StraightFlush   | `[high]` (5 for a wheel)               |
//! | FourOfAKind     | `[quads, kicker]`                      |
//! | FullHouse       | `[trips, pair]`                        |
//! | Flush           | `[r1, r2, r3, r4, r5]`                 |
//! | Straight        | `[high]` (5 for a wheel)               |
//! | ThreeOfAKind    | `[trips, k1, k2]`                      |
//! | TwoPair         | `[high pair, low pair, kicker]`        |
//! | Pair            | `[pair, k1, k2, k3]`                   |
//! | HighCard        | `[r1, r2, r3, r4, r5]`                 |
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use holdem_cards::{Card, Rank, Suit};

/// The number of cards evaluated for a player.
pub const HAND_SIZE: usize = 7;

/// Evaluation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The evaluator was called with a number of cards other than seven.
    #[error("expected {HAND_SIZE} cards got {0}")]
    MalformedHandSize(usize),
}

/// A poker hand category ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    /// No pair.
    HighCard,
    /// One pair.
    Pair,
    /// Two pairs.
    TwoPair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Five consecutive ranks.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four cards of the same rank.
    FourOfAKind,
    /// Five consecutive ranks of the same suit.
    StraightFlush,
    /// Ace high straight flush.
    RoyalFlush,
}

impl HandCategory {
    /// Returns all categories from worst to best.
    pub fn categories() -> impl DoubleEndedIterator<Item = HandCategory> {
        use HandCategory::*;
        [
            HighCard,
            Pair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
            RoyalFlush,
        ]
        .into_iter()
    }

    /// The category label.
    pub fn label(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::Pair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The strength of a poker hand.
///
/// Strengths compare by category first and then by tie-break ranks, two equal
/// strengths are a tie and split the pot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandStrength {
    category: HandCategory,
    tiebreak: Vec<u8>,
}

impl HandStrength {
    /// Creates a hand strength from a category and its tie-break ranks.
    pub fn new(category: HandCategory, tiebreak: Vec<u8>) -> Self {
        Self { category, tiebreak }
    }

    /// The hand category.
    pub fn category(&self) -> HandCategory {
        self.category
    }

    /// The tie-break rank values in decreasing significance.
    pub fn tiebreak(&self) -> &[u8] {
        &self.tiebreak
    }
}

impl fmt::Display for HandStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)?;
        for rank in &self.tiebreak {
            match Rank::from_value(*rank) {
                Some(rank) => write!(f, " {rank}")?,
                None => write!(f, " {rank}")?,
            }
        }

        Ok(())
    }
}

/// Evaluates a seven cards hand.
pub fn evaluate(cards: &[Card]) -> Result<HandStrength, EvalError> {
    evaluate_with_best_hand(cards).map(|(strength, _)| strength)
}

/// Evaluates a seven cards hand and returns the five cards that make the best
/// hand, useful to show the winning hand.
pub fn evaluate_with_best_hand(cards: &[Card]) -> Result<(HandStrength, [Card; 5]), EvalError> {
    if cards.len() != HAND_SIZE {
        return Err(EvalError::MalformedHandSize(cards.len()));
    }

    Ok(Hand::new(cards).best())
}

/// Evaluates a player hole cards with the board cards.
pub fn evaluate_holdem(
    hole: [Card; 2],
    board: &[Card],
) -> Result<(HandStrength, [Card; 5]), EvalError> {
    let mut cards = Vec::with_capacity(HAND_SIZE);
    cards.extend_from_slice(&hole);
    cards.extend_from_slice(board);
    evaluate_with_best_hand(&cards)
}

/// The cards that make a category and the ranks that rank it.
struct Made {
    category: HandCategory,
    cards: Vec<usize>,
    ranks: Vec<u8>,
}

/// Cards sorted by decreasing rank with a rank histogram.
struct Hand {
    cards: Vec<Card>,
    counts: [u8; 15],
}

impl Hand {
    fn new(cards: &[Card]) -> Self {
        let mut cards = cards.to_vec();
        cards.sort_by(|a, b| b.cmp(a));

        let mut counts = [0; 15];
        for card in &cards {
            counts[card.rank().value() as usize] += 1;
        }

        Self { cards, counts }
    }

    /// Finds the best category, needs at least five cards.
    fn best(&self) -> (HandStrength, [Card; 5]) {
        debug_assert!(self.cards.len() >= 5);

        let made = self
            .straight_flush()
            .or_else(|| self.four_of_a_kind())
            .or_else(|| self.full_house())
            .or_else(|| self.flush())
            .or_else(|| self.straight())
            .or_else(|| self.three_of_a_kind())
            .or_else(|| self.two_pair())
            .or_else(|| self.pair())
            .unwrap_or_else(|| self.high_card());

        self.with_kickers(made)
    }

    /// Fills the hand up to five cards with the highest remaining cards.
    fn with_kickers(&self, made: Made) -> (HandStrength, [Card; 5]) {
        let Made {
            category,
            mut cards,
            mut ranks,
        } = made;

        let kickers = (0..self.cards.len())
            .filter(|idx| !cards.contains(idx))
            .take(5 - cards.len())
            .collect::<Vec<_>>();

        for idx in kickers {
            ranks.push(self.rank(idx));
            cards.push(idx);
        }

        let best = std::array::from_fn(|i| self.cards[cards[i]]);
        (HandStrength::new(category, ranks), best)
    }

    fn rank(&self, idx: usize) -> u8 {
        self.cards[idx].rank().value()
    }

    /// Ranks with at least `n` cards from the highest.
    fn ranks_with(&self, n: u8) -> impl Iterator<Item = u8> + '_ {
        (2..=14).rev().filter(move |&r| self.counts[r as usize] >= n)
    }

    /// Indices of the first `n` cards with the given rank.
    fn take_rank(&self, rank: u8, n: usize) -> Vec<usize> {
        (0..self.cards.len())
            .filter(|&idx| self.rank(idx) == rank)
            .take(n)
            .collect()
    }

    /// Indices of the cards in the flush suit if any.
    fn suited(&self) -> Option<Vec<usize>> {
        Suit::suits()
            .map(|suit| {
                (0..self.cards.len())
                    .filter(|&idx| self.cards[idx].suit() == suit)
                    .collect::<Vec<_>>()
            })
            .find(|idx| idx.len() >= 5)
    }

    /// Finds the highest five consecutive ranks among the candidates, the ace
    /// also plays low to complete a five high straight.
    fn run(&self, candidates: &[usize]) -> Option<(u8, Vec<usize>)> {
        let mut by_rank: [Option<usize>; 15] = [None; 15];
        for &idx in candidates {
            by_rank[self.rank(idx) as usize].get_or_insert(idx);
        }
        by_rank[1] = by_rank[14];

        (5..=14u8).rev().find_map(|high| {
            (0..5)
                .map(|d| by_rank[(high - d) as usize])
                .collect::<Option<Vec<_>>>()
                .map(|cards| (high, cards))
        })
    }

    fn straight_flush(&self) -> Option<Made> {
        let suited = self.suited()?;
        let (high, cards) = self.run(&suited)?;
        let category = if high == Rank::Ace.value() {
            HandCategory::RoyalFlush
        } else {
            HandCategory::StraightFlush
        };

        Some(Made {
            category,
            cards,
            ranks: vec![high],
        })
    }

    fn four_of_a_kind(&self) -> Option<Made> {
        let quads = self.ranks_with(4).next()?;
        Some(Made {
            category: HandCategory::FourOfAKind,
            cards: self.take_rank(quads, 4),
            ranks: vec![quads],
        })
    }

    fn full_house(&self) -> Option<Made> {
        let trips = self.ranks_with(3).next()?;
        // A second set of trips plays as the pair.
        let pair = self.ranks_with(2).find(|&r| r != trips)?;

        let mut cards = self.take_rank(trips, 3);
        cards.extend(self.take_rank(pair, 2));

        Some(Made {
            category: HandCategory::FullHouse,
            cards,
            ranks: vec![trips, pair],
        })
    }

    fn flush(&self) -> Option<Made> {
        let mut cards = self.suited()?;
        cards.truncate(5);
        let ranks = cards.iter().map(|&idx| self.rank(idx)).collect();

        Some(Made {
            category: HandCategory::Flush,
            cards,
            ranks,
        })
    }

    fn straight(&self) -> Option<Made> {
        let all = (0..self.cards.len()).collect::<Vec<_>>();
        let (high, cards) = self.run(&all)?;

        Some(Made {
            category: HandCategory::Straight,
            cards,
            ranks: vec![high],
        })
    }

    fn three_of_a_kind(&self) -> Option<Made> {
        let trips = self.ranks_with(3).next()?;
        Some(Made {
            category: HandCategory::ThreeOfAKind,
            cards: self.take_rank(trips, 3),
            ranks: vec![trips],
        })
    }

    fn two_pair(&self) -> Option<Made> {
        let mut pairs = self.ranks_with(2);
        let (high, low) = (pairs.next()?, pairs.next()?);

        let mut cards = self.take_rank(high, 2);
        cards.extend(self.take_rank(low, 2));

        Some(Made {
            category: HandCategory::TwoPair,
            cards,
            ranks: vec![high, low],
        })
    }

    fn pair(&self) -> Option<Made> {
        let pair = self.ranks_with(2).next()?;
        Some(Made {
            category: HandCategory::Pair,
            cards: self.take_rank(pair, 2),
            ranks: vec![pair],
        })
    }

    fn high_card(&self) -> Made {
        Made {
            category: HandCategory::HighCard,
            cards: Vec::new(),
            ranks: Vec::new(),
        }
    }
}
