// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Bot strategies.
use rand::{Rng, SeedableRng, rngs::StdRng};

use holdem_core::{
    game_state::GameView,
    message::{ActionRequest, PlayerAction},
    poker::Chips,
};

use crate::Strategy;

/// Calls any bet, checks otherwise.
#[derive(Debug, Clone, Copy)]
pub struct AlwaysCallOrCheck;

impl Strategy for AlwaysCallOrCheck {
    fn execute(&mut self, req: &ActionRequest, _view: &GameView) -> (PlayerAction, Chips) {
        if req.can_call() {
            (PlayerAction::Call, Chips::ZERO)
        } else if req.can_check() {
            (PlayerAction::Check, Chips::ZERO)
        } else {
            (PlayerAction::Fold, Chips::ZERO)
        }
    }
}

/// Mostly calls, sometimes folds and raises with pocket pairs.
#[derive(Debug)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// Creates a strategy, seeded for repeatable runs.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self { rng }
    }
}

impl Strategy for RandomStrategy {
    fn execute(&mut self, req: &ActionRequest, view: &GameView) -> (PlayerAction, Chips) {
        // Raise with a pair, a random number of big blinds over the minimum.
        if let Some([c1, c2]) = view.hole_cards() {
            if c1.rank() == c2.rank() && req.can_raise() && self.rng.random_bool(0.5) {
                let extra = req.big_blind * self.rng.random_range(0..3);
                return (PlayerAction::Raise, req.min_raise + extra);
            }
        }

        if req.can_fold() && self.rng.random_bool(0.1) {
            (PlayerAction::Fold, Chips::ZERO)
        } else if req.can_call() {
            (PlayerAction::Call, Chips::ZERO)
        } else {
            (PlayerAction::Check, Chips::ZERO)
        }
    }
}
