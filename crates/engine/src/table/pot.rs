// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! The hand pot.
use ahash::AHashMap;

use holdem_core::poker::{Chips, PlayerId};

use super::player::PlayersState;

/// A pot that contains players bets.
///
/// The pot keeps how much each player put in so that a hand can be refunded,
/// the pot chips are always the sum of the contributions.
#[derive(Debug, Default)]
pub struct Pot {
    contributions: AHashMap<PlayerId, Chips>,
    chips: Chips,
}

impl Pot {
    /// Moves the players bets into the pot.
    pub fn collect(&mut self, players: &mut PlayersState) {
        for player in players.iter_mut() {
            if player.bet > Chips::ZERO {
                *self
                    .contributions
                    .entry(player.player_id.clone())
                    .or_default() += player.bet;
                self.chips += player.bet;
                player.bet = Chips::ZERO;
            }
        }
    }

    /// The pot chips.
    pub fn chips(&self) -> Chips {
        self.chips
    }

    /// The chips a player put in the pot.
    pub fn contribution(&self, player_id: &PlayerId) -> Chips {
        self.contributions
            .get(player_id)
            .copied()
            .unwrap_or_default()
    }

    /// Empties the pot.
    pub fn clear(&mut self) {
        self.contributions.clear();
        self.chips = Chips::ZERO;
    }

    /// Splits the pot evenly between winners.
    ///
    /// Odd chips go one each to the first winners, callers pass winners
    /// clockwise from the left of the button.
    pub fn split(&self, winners: usize) -> Vec<Chips> {
        if winners == 0 {
            return Vec::new();
        }

        let share = self.chips / winners as u32;
        let odd = (self.chips % winners as u32).amount() as usize;
        (0..winners)
            .map(|idx| {
                if idx < odd {
                    share + Chips::new(1)
                } else {
                    share
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::player::Player;

    fn pot_with(bets: &[u32]) -> (Pot, PlayersState) {
        let mut players = PlayersState::default();
        for (idx, bet) in bets.iter().enumerate() {
            let mut player = Player::new(PlayerId::new(format!("p{idx}")));
            player.bet = Chips::new(*bet);
            players.join(player);
        }

        let mut pot = Pot::default();
        pot.collect(&mut players);
        (pot, players)
    }

    #[test]
    fn collect_bets() {
        let (mut pot, mut players) = pot_with(&[10, 20, 0]);
        assert_eq!(pot.chips(), Chips::new(30));
        assert!(players.iter().all(|p| p.bet == Chips::ZERO));

        players[0].bet = Chips::new(15);
        pot.collect(&mut players);
        assert_eq!(pot.chips(), Chips::new(45));
        assert_eq!(pot.contribution(&PlayerId::new("p0")), Chips::new(25));
        assert_eq!(pot.contribution(&PlayerId::new("p2")), Chips::ZERO);

        let total = players
            .iter()
            .map(|p| pot.contribution(&p.player_id))
            .sum::<Chips>();
        assert_eq!(total, pot.chips());

        pot.clear();
        assert_eq!(pot.chips(), Chips::ZERO);
        assert_eq!(pot.contribution(&PlayerId::new("p0")), Chips::ZERO);
    }

    #[test]
    fn split_odd_chips() {
        let (pot, _) = pot_with(&[51, 50]);
        assert_eq!(pot.split(2), vec![Chips::new(51), Chips::new(50)]);
        assert_eq!(pot.split(1), vec![Chips::new(101)]);
        assert!(pot.split(0).is_empty());

        let (pot, _) = pot_with(&[40, 30, 30]);
        assert_eq!(
            pot.split(3),
            vec![Chips::new(34), Chips::new(33), Chips::new(33)]
        );

        let (pot, _) = pot_with(&[2, 0, 0]);
        assert_eq!(
            pot.split(3),
            vec![Chips::new(1), Chips::new(1), Chips::ZERO]
        );
    }
}
