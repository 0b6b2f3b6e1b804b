// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A player view of a hand built from table events.
use crate::{
    message::{ActionRequest, PlayerAction, TableEvent},
    poker::{Card, Chips, PlayerCards, PlayerId, Stage},
};

/// A seat as seen by the local player.
#[derive(Debug, Clone)]
pub struct SeatView {
    /// This player id.
    pub player_id: PlayerId,
    /// The player bet in the current stage.
    pub bet: Chips,
    /// This player winning chips.
    pub winning_chips: Chips,
    /// This player winning hand.
    pub winning_cards: Vec<Card>,
    /// The last player action.
    pub action: PlayerAction,
    /// This player cards.
    pub cards: PlayerCards,
    /// The player has the button.
    pub has_button: bool,
    /// The player is active in the hand.
    pub is_active: bool,
}

impl SeatView {
    fn new(player_id: PlayerId, has_button: bool) -> Self {
        Self {
            player_id,
            bet: Chips::ZERO,
            winning_chips: Chips::ZERO,
            winning_cards: Vec::default(),
            action: PlayerAction::None,
            cards: PlayerCards::None,
            has_button,
            is_active: true,
        }
    }
}

/// The hand state as seen by one player.
///
/// Other players hole cards stay covered until showdown.
#[derive(Debug)]
pub struct GameView {
    player_id: PlayerId,
    hand_id: u64,
    stage: Stage,
    players: Vec<SeatView>,
    action_request: Option<ActionRequest>,
    board: Vec<Card>,
    pot: Chips,
}

impl GameView {
    /// Creates a view for the local player.
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            hand_id: 0,
            stage: Stage::Blinds,
            players: Vec::default(),
            action_request: None,
            board: Vec::default(),
            pot: Chips::ZERO,
        }
    }

    /// Handle an incoming table event.
    pub fn handle_event(&mut self, event: &TableEvent) {
        match event {
            TableEvent::StartHand {
                hand_id,
                seats,
                button,
            } => {
                self.hand_id = *hand_id;
                self.stage = Stage::Blinds;
                self.board.clear();
                self.pot = Chips::ZERO;
                self.action_request = None;
                self.players = seats
                    .iter()
                    .map(|id| SeatView::new(id.clone(), id == button))
                    .collect();
            }
            TableEvent::BlindPosted {
                player_id,
                action,
                amount,
            } => {
                if let Some(p) = self.player_mut(player_id) {
                    p.action = *action;
                    p.bet = *amount;
                }
            }
            TableEvent::DealCards { player_id, cards } => {
                let is_local = player_id == &self.player_id;
                if let Some(p) = self.player_mut(player_id) {
                    p.cards = if is_local {
                        PlayerCards::Cards(cards[0], cards[1])
                    } else {
                        PlayerCards::Covered
                    };
                }
            }
            TableEvent::Board { stage, cards } => {
                self.stage = *stage;
                self.board = cards.clone();
            }
            TableEvent::ActionRequest(req) => {
                self.stage = req.stage;
                // Check if the action has been requested for this player.
                if req.player_id == self.player_id {
                    self.action_request = Some(req.clone());
                }
            }
            TableEvent::PlayerActed {
                player_id,
                action,
                bet,
            } => {
                if player_id == &self.player_id {
                    self.action_request = None;
                }

                if let Some(p) = self.player_mut(player_id) {
                    p.action = *action;
                    p.bet = *bet;
                    if *action == PlayerAction::Fold {
                        p.is_active = false;
                        p.cards = PlayerCards::None;
                    }
                }
            }
            TableEvent::StageEnded { pot, .. } => {
                self.pot = *pot;
                for p in &mut self.players {
                    p.bet = Chips::ZERO;
                }
            }
            TableEvent::Showdown { hands } => {
                self.stage = Stage::Showdown;
                for hand in hands {
                    if let Some(p) = self.player_mut(&hand.player_id) {
                        p.cards = PlayerCards::Cards(hand.hole_cards[0], hand.hole_cards[1]);
                    }
                }
            }
            TableEvent::EndHand { payoffs, .. } => {
                self.action_request = None;
                self.pot = Chips::ZERO;

                // Update winnings for each winning player.
                for payoff in payoffs {
                    if let Some(p) = self.player_mut(&payoff.player_id) {
                        p.winning_chips = payoff.chips;
                        p.winning_cards = payoff.cards.clone();
                    }
                }
            }
            TableEvent::HandAborted { .. } => {
                self.action_request = None;
                self.pot = Chips::ZERO;
                for p in &mut self.players {
                    p.bet = Chips::ZERO;
                }
            }
        }
    }

    /// The local player id.
    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    /// The current hand number.
    pub fn hand_id(&self) -> u64 {
        self.hand_id
    }

    /// The last stage seen.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the requested player action if any.
    pub fn action_request(&self) -> Option<&ActionRequest> {
        self.action_request.as_ref()
    }

    /// Reset the action request.
    pub fn reset_action_request(&mut self) {
        self.action_request = None;
    }

    /// Returns a reference to the players.
    pub fn players(&self) -> &[SeatView] {
        &self.players
    }

    /// The local player hole cards.
    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.players
            .iter()
            .find(|p| p.player_id == self.player_id)
            .and_then(|p| p.cards.cards())
    }

    /// The pot collected at the end of the last betting stage.
    pub fn pot(&self) -> Chips {
        self.pot
    }

    /// The board cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// Checks if the local player is still in the hand.
    pub fn is_active(&self) -> bool {
        self.players
            .iter()
            .any(|p| p.player_id == self.player_id && p.is_active)
    }

    fn player_mut(&mut self, player_id: &PlayerId) -> Option<&mut SeatView> {
        self.players.iter_mut().find(|p| &p.player_id == player_id)
    }
}
