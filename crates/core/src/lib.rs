// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem core types shared by the engine and its clients.
//!
//! The engine never performs I/O, it talks to the outside world through the
//! types in this crate: [TableEvent](message::TableEvent)s going out to the
//! presentation layer, [ActionResponse](message::ActionResponse)s coming back,
//! and the [Funds](funds::Funds) boundary for debiting bets and crediting
//! winnings.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod funds;
pub mod game_state;
pub mod message;
pub mod poker;
