// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem cards types.
//!
//! This crate defines types to create cards:
//!
//! ```
//! # use holdem_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! assert_eq!(ah.rank().value(), 14);
//! assert_eq!(ah, "Ah".parse().unwrap());
//! ```
//!
//! and a [Deck] type for shuffling, drawing, and iterating cards in the deck. A
//! deck holds one or two standard 52 cards decks depending on the
//! [DeckVariant]:
//!
//! ```
//! # use holdem_cards::{Deck, DeckVariant};
//! let mut deck = Deck::new_and_shuffled(DeckVariant::Double, &mut rand::rng());
//! assert_eq!(deck.count(), 104);
//!
//! let card = deck.draw().unwrap();
//! assert_eq!(deck.count(), 103);
//! ```
//!
//! Drawing from an exhausted deck fails with [EmptyDeck].
//!
//! To iterate through all k-cards hands use [Deck::for_each]:
//!
//! ```no_run
//! # use holdem_cards::Deck;
//! // Iterate through all 7 cards hands (133M hands).
//! let mut counter = 0;
//! Deck::default().for_each(7, |hand| {
//!     counter += 1;
//! });
//! assert_eq!(counter, 133_784_560);
//! ```
//!
//! to sample 10 random 5-cards hands:
//!
//! ```
//! # use holdem_cards::Deck;
//! let mut counter = 0;
//! Deck::default().sample(10, 5, &mut rand::rng(), |hand| {
//!     assert_eq!(hand.len(), 5);
//!     counter += 1;
//! });
//! assert_eq!(counter, 10);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, DeckVariant, EmptyDeck, ParseCardError, Rank, Suit};
