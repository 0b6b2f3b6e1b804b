// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem table simulator.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, ensure};
use clap::{Parser, ValueEnum};
use std::time::Duration;

use holdem_bot::{AlwaysCallOrCheck, RandomStrategy};
use holdem_core::poker::{Chips, DeckVariant};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Always call or check.
    Call,
    /// Call most of the time, fold or raise at random.
    Random,
}

#[derive(Debug, Parser)]
struct Cli {
    /// Number of bots at the table.
    #[clap(long, short, default_value_t = 4, value_parser = clap::value_parser!(u8).range(2..=23))]
    players: u8,
    /// Maximum number of hands to play.
    #[clap(long, default_value_t = 100)]
    hands: u64,
    /// The small blind.
    #[clap(long, default_value_t = 10)]
    small_blind: u32,
    /// The big blind.
    #[clap(long, default_value_t = 20)]
    big_blind: u32,
    /// Milliseconds a bot has to act before it is folded.
    #[clap(long, default_value_t = 15_000)]
    timeout_ms: u64,
    /// Chips each bot starts with.
    #[clap(long, default_value_t = 1_000)]
    balance: u32,
    /// Play with two decks shuffled together.
    #[clap(long)]
    double_deck: bool,
    /// Seed for repeatable runs.
    #[clap(long)]
    seed: Option<u64>,
    /// Print each hand outcome as a JSON line.
    #[clap(long)]
    json: bool,
    /// The bots strategy.
    #[clap(long, short, value_enum, default_value_t = Strategy::Call)]
    strategy: Strategy,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    ensure!(
        cli.small_blind > 0 && cli.small_blind <= cli.big_blind,
        "small blind must be positive and not larger than the big blind"
    );

    let players = cli.players as usize;
    let config = holdem_bot::Config {
        players,
        hands: cli.hands,
        balance: Chips::new(cli.balance),
        table: holdem_engine::Config {
            seats: players,
            small_blind: Chips::new(cli.small_blind),
            big_blind: Chips::new(cli.big_blind),
            action_timeout: Duration::from_millis(cli.timeout_ms),
            deck: if cli.double_deck {
                DeckVariant::Double
            } else {
                DeckVariant::Single
            },
        },
        seed: cli.seed,
        json: cli.json,
    };

    match cli.strategy {
        Strategy::Call => holdem_bot::run(config, || AlwaysCallOrCheck).await,
        Strategy::Random => {
            let seed = cli.seed;
            let mut count = 0;
            holdem_bot::run(config, move || {
                count += 1;
                RandomStrategy::new(seed.map(|s| s + count))
            })
            .await
        }
    }
}
