// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Automated poker client.
use holdem_core::{
    game_state::GameView,
    message::{ActionRequest, ActionResponse, PlayerAction, TableEvent},
    poker::{Chips, PlayerId},
};

/// A Poker bot strategy.
pub trait Strategy: Send + 'static {
    /// Execute an action given a game view.
    fn execute(&mut self, req: &ActionRequest, view: &GameView) -> (PlayerAction, Chips);
}

/// A bot that tracks the hand from table events and answers its requests.
#[derive(Debug)]
pub struct Client<S> {
    strategy: S,
    view: GameView,
}

impl<S: Strategy> Client<S> {
    /// Creates a new client for the given player.
    pub fn new(player_id: PlayerId, strategy: S) -> Self {
        Self {
            strategy,
            view: GameView::new(player_id),
        }
    }

    /// The client view of the hand.
    pub fn view(&self) -> &GameView {
        &self.view
    }

    /// Handles a table event, returns a response if this client has to act.
    pub fn handle_event(&mut self, event: &TableEvent) -> Option<ActionResponse> {
        self.view.handle_event(event);

        if !matches!(event, TableEvent::ActionRequest(_)) {
            return None;
        }

        let req = self.view.action_request()?.clone();
        let (action, amount) = self.strategy.execute(&req, &self.view);
        self.view.reset_action_request();

        Some(ActionResponse {
            player_id: req.player_id,
            action,
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AlwaysCallOrCheck;
    use holdem_core::poker::Stage;
    use std::time::Duration;

    fn request(player_id: &str, actions: Vec<PlayerAction>) -> TableEvent {
        TableEvent::ActionRequest(ActionRequest {
            player_id: player_id.into(),
            stage: Stage::PreFlop,
            actions,
            current_bet: Chips::new(20),
            player_bet: Chips::ZERO,
            min_raise: Chips::new(40),
            big_blind: Chips::new(20),
            time_budget: Duration::from_secs(1),
        })
    }

    #[test]
    fn answers_own_requests() {
        let mut client = Client::new("alice".into(), AlwaysCallOrCheck);
        client.handle_event(&TableEvent::StartHand {
            hand_id: 1,
            seats: vec!["alice".into(), "bob".into()],
            button: "alice".into(),
        });

        let actions = vec![PlayerAction::Call, PlayerAction::Raise, PlayerAction::Fold];
        assert!(client.handle_event(&request("bob", actions.clone())).is_none());

        let response = client.handle_event(&request("alice", actions)).unwrap();
        assert_eq!(response.player_id.as_str(), "alice");
        assert_eq!(response.action, PlayerAction::Call);
        assert!(client.view().action_request().is_none());

        let actions = vec![PlayerAction::Check, PlayerAction::Raise];
        let response = client.handle_event(&request("alice", actions)).unwrap();
        assert_eq!(response.action, PlayerAction::Check);
    }
}
