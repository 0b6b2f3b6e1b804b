// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Player balances used by a table to take bets and pay winners.
use ahash::AHashMap;
use thiserror::Error;

use crate::poker::{Chips, PlayerId};

/// Funds error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FundsError {
    /// The player balance cannot cover the debit.
    #[error("player {player_id} cannot cover {needed} chips")]
    InsufficientFunds {
        /// The player that tried to bet.
        player_id: PlayerId,
        /// The chips requested.
        needed: Chips,
    },
}

/// A source of player chips.
///
/// A table debits bets when they are made and credits payoffs and refunds,
/// the implementation owns the balances.
pub trait Funds {
    /// Takes chips from a player balance, fails without changes if the balance
    /// is too small.
    fn debit(&mut self, player_id: &PlayerId, chips: Chips) -> Result<(), FundsError>;

    /// Adds chips to a player balance.
    fn credit(&mut self, player_id: &PlayerId, chips: Chips);
}

impl<F: Funds + ?Sized> Funds for &mut F {
    fn debit(&mut self, player_id: &PlayerId, chips: Chips) -> Result<(), FundsError> {
        (**self).debit(player_id, chips)
    }

    fn credit(&mut self, player_id: &PlayerId, chips: Chips) {
        (**self).credit(player_id, chips)
    }
}

/// An in memory balances map.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    balances: AHashMap<PlayerId, Chips>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds chips to a player, creating the account if needed.
    pub fn deposit(&mut self, player_id: PlayerId, chips: Chips) {
        *self.balances.entry(player_id).or_default() += chips;
    }

    /// The player balance, zero for unknown players.
    pub fn balance(&self, player_id: &PlayerId) -> Chips {
        self.balances.get(player_id).copied().unwrap_or_default()
    }

    /// The sum of all balances.
    pub fn total(&self) -> Chips {
        self.balances.values().copied().sum()
    }

    /// Iterates over all accounts.
    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, Chips)> {
        self.balances.iter().map(|(id, chips)| (id, *chips))
    }
}

impl Funds for Ledger {
    fn debit(&mut self, player_id: &PlayerId, chips: Chips) -> Result<(), FundsError> {
        if chips == Chips::ZERO {
            return Ok(());
        }

        match self.balances.get_mut(player_id) {
            Some(balance) if *balance >= chips => {
                *balance -= chips;
                Ok(())
            }
            _ => Err(FundsError::InsufficientFunds {
                player_id: player_id.clone(),
                needed: chips,
            }),
        }
    }

    fn credit(&mut self, player_id: &PlayerId, chips: Chips) {
        *self.balances.entry(player_id.clone()).or_default() += chips;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debit_and_credit() {
        let alice = PlayerId::new("alice");
        let mut ledger = Ledger::new();
        ledger.deposit(alice.clone(), Chips::new(100));

        ledger.debit(&alice, Chips::new(40)).unwrap();
        assert_eq!(ledger.balance(&alice), Chips::new(60));

        ledger.credit(&alice, Chips::new(15));
        assert_eq!(ledger.balance(&alice), Chips::new(75));
        assert_eq!(ledger.total(), Chips::new(75));
    }

    #[test]
    fn insufficient_funds() {
        let alice = PlayerId::new("alice");
        let mut ledger = Ledger::new();
        ledger.deposit(alice.clone(), Chips::new(10));

        let err = ledger.debit(&alice, Chips::new(11)).unwrap_err();
        assert_eq!(
            err,
            FundsError::InsufficientFunds {
                player_id: alice.clone(),
                needed: Chips::new(11)
            }
        );
        assert_eq!(ledger.balance(&alice), Chips::new(10));

        let bob = PlayerId::new("bob");
        assert!(ledger.debit(&bob, Chips::new(1)).is_err());
        assert!(ledger.debit(&bob, Chips::ZERO).is_ok());
    }

    #[test]
    fn borrowed_funds() {
        fn take(mut funds: impl Funds, id: &PlayerId) {
            funds.debit(id, Chips::new(5)).unwrap();
        }

        let alice = PlayerId::new("alice");
        let mut ledger = Ledger::new();
        ledger.deposit(alice.clone(), Chips::new(5));
        take(&mut ledger, &alice);
        assert_eq!(ledger.balance(&alice), Chips::ZERO);
    }
}
