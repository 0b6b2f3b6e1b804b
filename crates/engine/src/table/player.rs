// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table player types.
use rand::Rng;
use std::{cmp::Ordering, ops};

use holdem_core::{
    message::PlayerAction,
    poker::{Chips, PlayerCards, PlayerId},
};

/// A table player state.
#[derive(Debug)]
pub struct Player {
    /// The player id.
    pub player_id: PlayerId,
    /// This player private cards.
    pub hole_cards: PlayerCards,
    /// The player bet in the current stage.
    pub bet: Chips,
    /// The last player action.
    pub action: PlayerAction,
    /// The player folded in this hand.
    pub folded: bool,
    /// The player acted since the last raise.
    pub acted: bool,
    /// The player has the button.
    pub has_button: bool,
}

impl Player {
    /// Creates a new player.
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            hole_cards: PlayerCards::None,
            bet: Chips::ZERO,
            action: PlayerAction::None,
            folded: false,
            acted: false,
            has_button: false,
        }
    }

    /// Checks if the player is still in the hand.
    pub fn is_active(&self) -> bool {
        !self.folded
    }

    /// Sets this player in fold state.
    pub fn fold(&mut self) {
        self.folded = true;
        self.action = PlayerAction::Fold;
        self.hole_cards = PlayerCards::None;
    }

    /// Reset state for a new hand.
    fn start_hand(&mut self) {
        self.hole_cards = PlayerCards::None;
        self.bet = Chips::ZERO;
        self.action = PlayerAction::None;
        self.folded = false;
        self.acted = false;
        self.has_button = false;
    }
}

/// Seat indices clockwise starting at `start`.
pub fn clockwise(start: usize, count: usize) -> impl Iterator<Item = usize> {
    (0..count).map(move |i| (start + i) % count)
}

/// The table players state in seat order.
#[derive(Debug, Default)]
pub struct PlayersState {
    players: Vec<Player>,
    button: Option<usize>,
}

impl PlayersState {
    /// Adds a player to the table.
    pub fn join(&mut self, player: Player) {
        self.players.push(player);
    }

    /// Removes a player from the table.
    pub fn leave(&mut self, player_id: &PlayerId) -> Option<Player> {
        let pos = self.position(player_id)?;
        let player = self.players.remove(pos);

        // Keep the button on the same seat so that it moves to the player after
        // the one leaving on the next hand.
        self.button = match self.button {
            _ if self.players.is_empty() => None,
            Some(button) => match pos.cmp(&button) {
                Ordering::Less => Some(button - 1),
                Ordering::Equal => Some((button + self.players.len() - 1) % self.players.len()),
                Ordering::Greater => Some(button),
            },
            None => None,
        };

        Some(player)
    }

    /// Returns total number of players.
    pub fn count(&self) -> usize {
        self.players.len()
    }

    /// Returns the number of players in the hand.
    pub fn count_active(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// Returns a player seat.
    pub fn position(&self, player_id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.player_id == player_id)
    }

    /// Returns an iterator to all players.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Returns a mutable iterator to all players.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// The button seat.
    pub fn button(&self) -> Option<usize> {
        self.button
    }

    /// Set state for a new hand and move the button.
    ///
    /// The first hand button goes to a random seat, then it moves one seat
    /// clockwise every hand. There must be at least one player.
    pub fn start_hand<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        for player in &mut self.players {
            player.start_hand();
        }

        let button = match self.button {
            Some(button) => (button + 1) % self.players.len(),
            None => rng.random_range(0..self.players.len()),
        };

        self.players[button].has_button = true;
        self.button = Some(button);
        button
    }

    /// Returns the small and big blind seats.
    ///
    /// Heads up the button posts the small blind.
    pub fn blind_seats(&self) -> (usize, usize) {
        let count = self.players.len();
        let button = self.button.unwrap_or_default();
        if count == 2 {
            (button, (button + 1) % count)
        } else {
            ((button + 1) % count, (button + 2) % count)
        }
    }

    /// Sets the button so that the next hand starts with the button at `seat`.
    #[cfg(test)]
    pub fn set_next_button(&mut self, seat: usize) {
        let count = self.players.len();
        self.button = Some((seat + count - 1) % count);
    }
}

impl ops::Index<usize> for PlayersState {
    type Output = Player;

    fn index(&self, index: usize) -> &Self::Output {
        &self.players[index]
    }
}

impl ops::IndexMut<usize> for PlayersState {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.players[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn players(count: usize) -> PlayersState {
        let mut state = PlayersState::default();
        for idx in 0..count {
            state.join(Player::new(PlayerId::new(format!("p{idx}"))));
        }
        state
    }

    #[test]
    fn button_rotates() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = players(4);

        let first = state.start_hand(&mut rng);
        assert!(state[first].has_button);

        for hand in 1..8 {
            let button = state.start_hand(&mut rng);
            assert_eq!(button, (first + hand) % 4);
            assert_eq!(state.iter().filter(|p| p.has_button).count(), 1);
        }
    }

    #[test]
    fn blinds_seats() {
        let mut rng = StdRng::seed_from_u64(1);

        let mut state = players(2);
        state.set_next_button(1);
        state.start_hand(&mut rng);
        assert_eq!(state.blind_seats(), (1, 0));

        let mut state = players(5);
        state.set_next_button(3);
        state.start_hand(&mut rng);
        assert_eq!(state.blind_seats(), (4, 0));
    }

    #[test]
    fn leave_keeps_button_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = players(4);
        state.set_next_button(2);
        state.start_hand(&mut rng);

        // Button leaves, next hand button goes to the following player.
        let p2 = PlayerId::new("p2");
        assert!(state.leave(&p2).is_some());
        let button = state.start_hand(&mut rng);
        assert_eq!(state[button].player_id, PlayerId::new("p3"));

        // A player before the button leaves.
        assert!(state.leave(&PlayerId::new("p0")).is_some());
        let button = state.start_hand(&mut rng);
        assert_eq!(state[button].player_id, PlayerId::new("p1"));

        assert!(state.leave(&p2).is_none());
    }

    #[test]
    fn fold_and_reset() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = players(3);
        state.start_hand(&mut rng);

        state[1].fold();
        assert_eq!(state.count_active(), 2);
        assert_eq!(state[1].action, PlayerAction::Fold);

        state.start_hand(&mut rng);
        assert_eq!(state.count_active(), 3);
    }

    #[test]
    fn clockwise_wraps() {
        assert_eq!(clockwise(2, 4).collect::<Vec<_>>(), vec![2, 3, 0, 1]);
        assert_eq!(clockwise(0, 0).count(), 0);
    }
}
