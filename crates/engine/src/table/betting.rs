// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Betting round state machine.
use holdem_core::{
    message::PlayerAction,
    poker::{Chips, Stage},
};

use super::player::{Player, PlayersState, clockwise};
use crate::ActionError;

/// The players action order and bets for one betting stage.
///
/// The order holds the seats of players that have not folded, a fold removes
/// the seat so that the next player to act is always at the cursor.
#[derive(Debug)]
pub struct BettingRound {
    stage: Stage,
    order: Vec<usize>,
    cursor: usize,
    current_bet: Chips,
    last_raise: Chips,
    big_blind: Chips,
}

impl BettingRound {
    /// Starts a round with `first` as the first seat to act.
    ///
    /// Bets already on the table, like blinds, set the bet to call.
    pub fn new(stage: Stage, players: &mut PlayersState, first: usize, big_blind: Chips) -> Self {
        let order = clockwise(first, players.count())
            .filter(|&idx| players[idx].is_active())
            .collect();

        for player in players.iter_mut() {
            player.acted = false;
        }

        let current_bet = players.iter().map(|p| p.bet).max().unwrap_or_default();

        Self {
            stage,
            order,
            cursor: 0,
            current_bet,
            last_raise: big_blind,
            big_blind,
        }
    }

    /// The round stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The bet to call.
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    /// The minimum total bet for a raise.
    pub fn min_raise(&self) -> Chips {
        self.current_bet + self.last_raise.max(self.big_blind)
    }

    /// Checks if only one player is left in the hand.
    pub fn is_early_finish(&self) -> bool {
        self.order.len() < 2
    }

    /// Checks if all players in the hand have acted and matched the bet.
    pub fn is_complete(&self, players: &PlayersState) -> bool {
        self.is_early_finish()
            || self
                .order
                .iter()
                .all(|&idx| players[idx].acted && players[idx].bet == self.current_bet)
    }

    /// The seat of the player to act, none if the round is complete.
    pub fn next_to_act(&self, players: &PlayersState) -> Option<usize> {
        if self.is_complete(players) {
            None
        } else {
            self.order.get(self.cursor).copied()
        }
    }

    /// The actions a player can take.
    pub fn allowed_actions(&self, player: &Player) -> Vec<PlayerAction> {
        if player.bet == self.current_bet {
            vec![PlayerAction::Check, PlayerAction::Raise]
        } else {
            vec![PlayerAction::Call, PlayerAction::Raise, PlayerAction::Fold]
        }
    }

    /// Validates an action and returns the chips the player has to pay.
    pub fn validate(
        &self,
        player: &Player,
        action: PlayerAction,
        amount: Chips,
    ) -> Result<Chips, ActionError> {
        if !self.allowed_actions(player).contains(&action) {
            return Err(ActionError::InvalidAction { action });
        }

        match action {
            PlayerAction::Check | PlayerAction::Fold => Ok(Chips::ZERO),
            PlayerAction::Call => Ok(self.current_bet - player.bet),
            PlayerAction::Raise => {
                let min_raise = self.min_raise();
                if amount <= self.current_bet || amount < min_raise {
                    return Err(ActionError::RaiseTooSmall { amount, min_raise });
                }

                // The next minimum raise must fit in the chips range.
                let increment = (amount - self.current_bet).max(self.big_blind);
                if amount.amount().checked_add(increment.amount()).is_none() {
                    return Err(ActionError::RaiseTooLarge { amount });
                }

                Ok(amount - player.bet)
            }
            _ => Err(ActionError::InvalidAction { action }),
        }
    }

    /// Applies a validated action for the player at the cursor.
    pub fn commit(&mut self, players: &mut PlayersState, action: PlayerAction, amount: Chips) {
        let Some(&idx) = self.order.get(self.cursor) else {
            return;
        };

        match action {
            PlayerAction::Fold => {
                self.fold(players);
                return;
            }
            PlayerAction::Call => players[idx].bet = self.current_bet,
            PlayerAction::Raise => {
                self.last_raise = amount - self.current_bet;
                self.current_bet = amount;
                players[idx].bet = amount;

                // Everybody else has to act again.
                for &seat in &self.order {
                    players[seat].acted = false;
                }
            }
            _ => {}
        }

        let player = &mut players[idx];
        player.acted = true;
        player.action = action;

        self.cursor = (self.cursor + 1) % self.order.len();
    }

    /// Folds the player at the cursor.
    pub fn fold(&mut self, players: &mut PlayersState) {
        if self.cursor >= self.order.len() {
            return;
        }

        let idx = self.order.remove(self.cursor);
        players[idx].fold();

        if self.cursor >= self.order.len() {
            self.cursor = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_core::poker::PlayerId;

    const BB: Chips = Chips::new(20);

    // Four players with blinds posted by seats 1 and 2.
    fn preflop() -> (BettingRound, PlayersState) {
        let mut players = PlayersState::default();
        for idx in 0..4 {
            players.join(Player::new(PlayerId::new(format!("p{idx}"))));
        }

        players[1].bet = Chips::new(10);
        players[2].bet = BB;

        let round = BettingRound::new(Stage::PreFlop, &mut players, 3, BB);
        (round, players)
    }

    fn act(round: &mut BettingRound, players: &mut PlayersState, action: PlayerAction, amount: u32) {
        let idx = round.next_to_act(players).unwrap();
        round
            .validate(&players[idx], action, Chips::new(amount))
            .unwrap();
        round.commit(players, action, Chips::new(amount));
    }

    #[test]
    fn preflop_order() {
        let (mut round, mut players) = preflop();
        assert_eq!(round.current_bet(), BB);
        assert_eq!(round.min_raise(), Chips::new(40));

        let mut seen = vec![];
        while let Some(idx) = round.next_to_act(&players) {
            seen.push(idx);
            let action = if players[idx].bet == round.current_bet() {
                PlayerAction::Check
            } else {
                PlayerAction::Call
            };
            act(&mut round, &mut players, action, 0);
        }

        // The big blind acts last.
        assert_eq!(seen, vec![3, 0, 1, 2]);
        assert!(players.iter().all(|p| p.bet == BB));
    }

    #[test]
    fn allowed_actions() {
        let (round, players) = preflop();
        assert_eq!(
            round.allowed_actions(&players[3]),
            vec![PlayerAction::Call, PlayerAction::Raise, PlayerAction::Fold]
        );
        assert_eq!(
            round.allowed_actions(&players[2]),
            vec![PlayerAction::Check, PlayerAction::Raise]
        );

        let err = round
            .validate(&players[3], PlayerAction::Check, Chips::ZERO)
            .unwrap_err();
        assert_eq!(
            err,
            ActionError::InvalidAction {
                action: PlayerAction::Check
            }
        );

        let err = round
            .validate(&players[2], PlayerAction::Fold, Chips::ZERO)
            .unwrap_err();
        assert!(matches!(err, ActionError::InvalidAction { .. }));

        assert_eq!(
            round.validate(&players[1], PlayerAction::Call, Chips::ZERO),
            Ok(Chips::new(10))
        );
    }

    #[test]
    fn raise_rules() {
        let (mut round, mut players) = preflop();

        let err = round
            .validate(&players[3], PlayerAction::Raise, Chips::new(30))
            .unwrap_err();
        assert_eq!(
            err,
            ActionError::RaiseTooSmall {
                amount: Chips::new(30),
                min_raise: Chips::new(40)
            }
        );

        // Raise to 60 is a 40 increment, next raise must be at least to 100.
        act(&mut round, &mut players, PlayerAction::Raise, 60);
        assert_eq!(round.current_bet(), Chips::new(60));
        assert_eq!(round.min_raise(), Chips::new(100));
        assert!(
            round
                .validate(&players[0], PlayerAction::Raise, Chips::new(90))
                .is_err()
        );
    }

    #[test]
    fn huge_raises() {
        let (mut round, mut players) = preflop();

        // A raise to 3B would push the next minimum raise past the chips range.
        let err = round
            .validate(&players[3], PlayerAction::Raise, Chips::new(3_000_000_000))
            .unwrap_err();
        assert_eq!(
            err,
            ActionError::RaiseTooLarge {
                amount: Chips::new(3_000_000_000)
            }
        );

        act(&mut round, &mut players, PlayerAction::Raise, 2_000_000_000);
        assert_eq!(round.min_raise(), Chips::new(3_999_999_980));

        // Raising to the minimum again would overflow.
        let min_raise = round.min_raise();
        assert_eq!(
            round.validate(&players[0], PlayerAction::Raise, min_raise),
            Err(ActionError::RaiseTooLarge { amount: min_raise })
        );
        assert_eq!(
            round.validate(&players[0], PlayerAction::Call, Chips::ZERO),
            Ok(Chips::new(2_000_000_000))
        );
    }

    #[test]
    fn raise_resets_acted() {
        let (mut round, mut players) = preflop();

        act(&mut round, &mut players, PlayerAction::Call, 0);
        act(&mut round, &mut players, PlayerAction::Call, 0);
        act(&mut round, &mut players, PlayerAction::Call, 0);
        assert!(players[3].acted && players[0].acted && players[1].acted);

        // Big blind raises, all the others have to act again.
        act(&mut round, &mut players, PlayerAction::Raise, 60);
        assert!(!players[3].acted && !players[0].acted && !players[1].acted);
        assert!(players[2].acted);
        assert!(!round.is_complete(&players));

        assert_eq!(round.next_to_act(&players), Some(3));
        act(&mut round, &mut players, PlayerAction::Call, 0);
        act(&mut round, &mut players, PlayerAction::Call, 0);
        assert!(!round.is_complete(&players));
        act(&mut round, &mut players, PlayerAction::Call, 0);
        assert!(round.is_complete(&players));

        let total = players.iter().map(|p| p.bet).sum::<Chips>();
        assert_eq!(total, Chips::new(240));
    }

    #[test]
    fn folds_shrink_order() {
        let (mut round, mut players) = preflop();

        act(&mut round, &mut players, PlayerAction::Fold, 0);
        assert_eq!(round.next_to_act(&players), Some(0));
        act(&mut round, &mut players, PlayerAction::Fold, 0);
        assert_eq!(round.next_to_act(&players), Some(1));
        assert!(!round.is_early_finish());
        act(&mut round, &mut players, PlayerAction::Fold, 0);

        assert!(round.is_early_finish());
        assert!(round.is_complete(&players));
        assert_eq!(round.next_to_act(&players), None);
        assert_eq!(players.count_active(), 1);
        assert!(players[2].is_active());
    }

    #[test]
    fn fold_at_end_of_order_wraps() {
        let mut players = PlayersState::default();
        for idx in 0..3 {
            players.join(Player::new(PlayerId::new(format!("p{idx}"))));
        }

        let mut round = BettingRound::new(Stage::River, &mut players, 0, BB);
        act(&mut round, &mut players, PlayerAction::Check, 0);
        act(&mut round, &mut players, PlayerAction::Raise, 40);

        // The last seat in the order folds, the cursor wraps to the first.
        act(&mut round, &mut players, PlayerAction::Fold, 0);
        assert_eq!(round.next_to_act(&players), Some(0));

        act(&mut round, &mut players, PlayerAction::Call, 0);
        assert!(round.is_complete(&players));
        assert_eq!(players.count_active(), 2);
    }

    #[test]
    fn postflop_check_around() {
        let mut players = PlayersState::default();
        for idx in 0..3 {
            players.join(Player::new(PlayerId::new(format!("p{idx}"))));
        }
        players[1].fold();

        let mut round = BettingRound::new(Stage::Turn, &mut players, 1, BB);
        assert_eq!(round.stage(), Stage::Turn);
        assert_eq!(round.current_bet(), Chips::ZERO);
        assert_eq!(round.min_raise(), BB);

        // Folded players are skipped.
        assert_eq!(round.next_to_act(&players), Some(2));
        act(&mut round, &mut players, PlayerAction::Check, 0);
        assert_eq!(round.next_to_act(&players), Some(0));
        act(&mut round, &mut players, PlayerAction::Check, 0);
        assert_eq!(round.next_to_act(&players), None);
    }
}
