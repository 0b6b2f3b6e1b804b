// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Events emitted by a table and the players responses.
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::poker::{Card, Chips, HandStrength, PlayerId, Stage};

/// An event emitted by a table for the presentation layer to relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TableEvent {
    /// A new hand starts with the given seats order.
    StartHand {
        /// The hand number at this table.
        hand_id: u64,
        /// The players in the hand in seat order.
        seats: Vec<PlayerId>,
        /// The player with the button.
        button: PlayerId,
    },
    /// A player posted a forced blind.
    BlindPosted {
        /// The player id.
        player_id: PlayerId,
        /// Small or big blind.
        action: PlayerAction,
        /// The blind amount.
        amount: Chips,
    },
    /// Deal hole cards to a player, these must only be shown to that player.
    DealCards {
        /// The player receiving the cards.
        player_id: PlayerId,
        /// The hole cards.
        cards: [Card; 2],
    },
    /// Reveal the board cards.
    Board {
        /// The stage that dealt the last cards.
        stage: Stage,
        /// All the board cards dealt so far.
        cards: Vec<Card>,
    },
    /// Request an action from a player.
    ActionRequest(ActionRequest),
    /// A player acted.
    PlayerActed {
        /// The player id.
        player_id: PlayerId,
        /// The player action.
        action: PlayerAction,
        /// The player bet in this stage after the action.
        bet: Chips,
    },
    /// A betting stage ended and its bets were moved to the pot.
    StageEnded {
        /// The stage that ended.
        stage: Stage,
        /// The pot after collecting the bets.
        pot: Chips,
    },
    /// Players who reached showdown reveal their hands.
    Showdown {
        /// The revealed hands in seat order starting left of the button.
        hands: Vec<ShowdownHand>,
    },
    /// The hand ended and the pot was paid.
    EndHand {
        /// The pot paid to the winners.
        pot: Chips,
        /// The winners payoffs.
        payoffs: Vec<HandPayoff>,
    },
    /// The hand was aborted and all bets returned.
    HandAborted {
        /// The chips returned to each player.
        refunds: Vec<Refund>,
    },
}

/// A request for a player to act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// The player that should respond with an action.
    pub player_id: PlayerId,
    /// The betting stage.
    pub stage: Stage,
    /// The list of legal actions.
    pub actions: Vec<PlayerAction>,
    /// The bet to call in this stage.
    pub current_bet: Chips,
    /// The player bet in this stage.
    pub player_bet: Chips,
    /// The minimum total bet for a raise.
    pub min_raise: Chips,
    /// The hand big blind.
    pub big_blind: Chips,
    /// Time left to respond before the player is folded.
    pub time_budget: Duration,
}

impl ActionRequest {
    /// The chips needed to call.
    pub fn to_call(&self) -> Chips {
        self.current_bet - self.player_bet
    }

    /// Check if a call action is in the request.
    pub fn can_call(&self) -> bool {
        self.check_action(PlayerAction::Call)
    }

    /// Check if a check action is in the request.
    pub fn can_check(&self) -> bool {
        self.check_action(PlayerAction::Check)
    }

    /// Check if a raise action is in the request.
    pub fn can_raise(&self) -> bool {
        self.check_action(PlayerAction::Raise)
    }

    /// Check if a fold action is in the request.
    pub fn can_fold(&self) -> bool {
        self.check_action(PlayerAction::Fold)
    }

    fn check_action(&self, action: PlayerAction) -> bool {
        self.actions.iter().any(|a| a == &action)
    }
}

/// A player response to an action request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    /// The player who is acting.
    pub player_id: PlayerId,
    /// The action from the player.
    pub action: PlayerAction,
    /// The total stage bet for a raise, ignored for other actions.
    pub amount: Chips,
}

/// A Player action.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// No action.
    #[default]
    None,
    /// Player pays small blind.
    SmallBlind,
    /// Player pays big blind.
    BigBlind,
    /// Player calls.
    Call,
    /// Player checks.
    Check,
    /// Player raises.
    Raise,
    /// Player folds.
    Fold,
}

impl PlayerAction {
    /// The action label.
    pub fn label(&self) -> &'static str {
        match self {
            PlayerAction::SmallBlind => "SB",
            PlayerAction::BigBlind => "BB",
            PlayerAction::Call => "CALL",
            PlayerAction::Check => "CHECK",
            PlayerAction::Raise => "RAISE",
            PlayerAction::Fold => "FOLD",
            PlayerAction::None => "",
        }
    }
}

/// A hand revealed at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownHand {
    /// The player id.
    pub player_id: PlayerId,
    /// The player hole cards.
    pub hole_cards: [Card; 2],
    /// The hand strength.
    pub strength: HandStrength,
    /// The best five cards.
    pub best_hand: Vec<Card>,
}

/// Chips paid to a winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandPayoff {
    /// The player id.
    pub player_id: PlayerId,
    /// The chips won.
    pub chips: Chips,
    /// The winning hand cards, empty if the hand was not contested.
    pub cards: Vec<Card>,
}

/// Chips returned to a player when a hand is aborted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    /// The player id.
    pub player_id: PlayerId,
    /// The chips returned.
    pub chips: Chips,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_actions() {
        let req = ActionRequest {
            player_id: PlayerId::new("alice"),
            stage: Stage::PreFlop,
            actions: vec![PlayerAction::Call, PlayerAction::Raise, PlayerAction::Fold],
            current_bet: Chips::new(20),
            player_bet: Chips::new(5),
            min_raise: Chips::new(40),
            big_blind: Chips::new(20),
            time_budget: Duration::from_secs(15),
        };

        assert!(req.can_call());
        assert!(req.can_raise());
        assert!(req.can_fold());
        assert!(!req.can_check());
        assert_eq!(req.to_call(), Chips::new(15));
    }
}
