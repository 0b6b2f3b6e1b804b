// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem hand evaluator.
//!
//! Evaluates the best five cards poker hand out of the seven cards available to
//! a Texas Hold'em player (two hole cards and five board cards). The result is a
//! [HandStrength], a comparable key made of a [HandCategory] and a tie-break
//! sequence of ranks, so that comparing two hands is comparing two keys:
//!
//! ```
//! # use holdem_eval::*;
//! let cards = |s: &str| s.split(' ').map(|c| c.parse().unwrap()).collect::<Vec<Card>>();
//!
//! let h1 = evaluate(&cards("As Ad Kc 7h 5s 3d 2c")).unwrap();
//! let h2 = evaluate(&cards("Ah Ac Qc 7h 5s 3d 2c")).unwrap();
//! assert_eq!(h1.category(), HandCategory::Pair);
//! assert!(h1 > h2);
//! ```
//!
//! The [showdown] module ranks any number of evaluated hands and returns all the
//! players that share the best hand.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{
    EvalError, HAND_SIZE, HandCategory, HandStrength, evaluate, evaluate_holdem,
    evaluate_with_best_hand,
};

pub mod showdown;
pub use showdown::resolve;

// Reexport cards types.
pub use holdem_cards::{Card, Deck, DeckVariant, EmptyDeck, Rank, Suit};
