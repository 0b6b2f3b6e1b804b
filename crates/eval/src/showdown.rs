// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown resolution.
use crate::HandStrength;

/// Returns all the keys that hold the best hand.
///
/// Keys are returned in input order so that callers passing players in seat
/// order get the winners in seat order. A single hand wins without any
/// comparison and an empty input has no winners.
pub fn resolve<K: Clone>(hands: &[(K, HandStrength)]) -> Vec<K> {
    match hands {
        [] => Vec::new(),
        [(key, _)] => vec![key.clone()],
        _ => {
            let best = hands.iter().map(|(_, hs)| hs).max();
            hands
                .iter()
                .filter(|(_, hs)| Some(hs) == best)
                .map(|(key, _)| key.clone())
                .collect()
        }
    }
}
