// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Engine errors.
use thiserror::Error;

use holdem_core::poker::{Chips, EmptyDeck, EvalError, PlayerId};
use holdem_core::message::PlayerAction;

/// An error that stops a hand.
#[derive(Debug, Error)]
pub enum HandError {
    /// The deck run out of cards.
    #[error(transparent)]
    EmptyDeck(#[from] EmptyDeck),
    /// A hand with the wrong number of cards was evaluated.
    #[error(transparent)]
    MalformedHandSize(#[from] EvalError),
    /// The table was asked to stop.
    #[error("hand cancelled")]
    Cancelled,
    /// Fewer than two players are seated.
    #[error("not enough players to start a hand")]
    NotEnoughPlayers,
}

impl HandError {
    /// Checks if this error is an internal failure rather than a stop request.
    pub fn is_fatal(&self) -> bool {
        matches!(self, HandError::EmptyDeck(_) | HandError::MalformedHandSize(_))
    }
}

/// A rejected player action, the player is asked again.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    /// The action is not one of the requested actions.
    #[error("action {} is not allowed", action.label())]
    InvalidAction {
        /// The rejected action.
        action: PlayerAction,
    },
    /// The raise is below the minimum raise.
    #[error("raise to {amount} is below the minimum raise to {min_raise}")]
    RaiseTooSmall {
        /// The requested total bet.
        amount: Chips,
        /// The minimum total bet.
        min_raise: Chips,
    },
    /// The raise leaves no room for a following raise.
    #[error("raise to {amount} is above the table limit")]
    RaiseTooLarge {
        /// The requested total bet.
        amount: Chips,
    },
    /// A player responded out of turn.
    #[error("player {0} is not the player to act")]
    NotYourTurn(PlayerId),
}

/// A seating error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeatError {
    /// All seats are taken.
    #[error("table is full")]
    TableFull,
    /// The player is already at the table.
    #[error("player {0} has already joined")]
    AlreadySeated(PlayerId),
    /// The player is not at the table.
    #[error("player {0} is not seated")]
    NotSeated(PlayerId),
}
