// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem table engine.
//!
//! A [Table] seats players, takes bets through a [Funds](holdem_core::funds::Funds)
//! implementation and plays hands, talking to players only through table events
//! and action responses channels.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

mod error;
pub use error::{ActionError, HandError, SeatError};

pub mod table;
pub use table::{Config, HandOutcome, Table};
