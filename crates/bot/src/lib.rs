// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem bots and a local table simulator.
//!
//! The simulator seats a bot for each player at an engine table and plays
//! hands until the hands budget is spent, fewer than two players can pay the
//! big blind, or Ctrl-C is pressed.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, ensure};
use log::{error, info};
use rand::{SeedableRng, rngs::StdRng};
use tokio::{
    signal,
    sync::{broadcast, mpsc},
};

use holdem_core::{
    funds::Ledger,
    poker::{Chips, PlayerId},
};
use holdem_engine::{HandError, Table};

mod client;
pub use client::{Client, Strategy};

mod strategies;
pub use strategies::{AlwaysCallOrCheck, RandomStrategy};

/// Simulation configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of bots to seat.
    pub players: usize,
    /// Maximum number of hands to play.
    pub hands: u64,
    /// Chips each bot starts with.
    pub balance: Chips,
    /// The table configuration.
    pub table: holdem_engine::Config,
    /// Seed for the table randomness.
    pub seed: Option<u64>,
    /// Print each hand outcome as a JSON line.
    pub json: bool,
}

static NICKNAMES: &[&str] = &["Alice", "Bob", "Carol", "Dave", "Frank", "Mike"];

fn nickname(idx: usize) -> String {
    let name = NICKNAMES[idx % NICKNAMES.len()];
    match idx / NICKNAMES.len() {
        0 => name.to_string(),
        n => format!("{name}{n}"),
    }
}

/// Runs a simulation given a config and a strategy factory called for each bot.
pub async fn run<F, S>(config: Config, factory: F) -> Result<()>
where
    F: FnMut() -> S,
    S: Strategy,
{
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let (shutdown_broadcast_tx, shutdown_broadcast_rx) = broadcast::channel(1);
    let ctrl_c = tokio::spawn(async move {
        let _ = signal::ctrl_c().await;
        info!("Received Ctrl-c signal");
        let _ = shutdown_broadcast_tx.send(());
    });

    let res = play(&config, factory, shutdown_broadcast_rx).await;
    ctrl_c.abort();

    let ledger = res.inspect_err(|err| error!("Simulation failed: {err}"))?;
    let mut balances = ledger.iter().collect::<Vec<_>>();
    balances.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    for (player_id, chips) in balances {
        info!("{player_id:<10} {chips}");
    }

    Ok(())
}

/// Plays hands with the given bots and returns the final balances.
pub async fn play<F, S>(
    config: &Config,
    mut factory: F,
    shutdown_broadcast_rx: broadcast::Receiver<()>,
) -> Result<Ledger>
where
    F: FnMut() -> S,
    S: Strategy,
{
    ensure!(
        config.players >= 2 && config.players <= config.table.seats,
        "players must be between 2 and {}",
        config.table.seats
    );

    let (events_tx, mut events_rx) = mpsc::channel(128);
    let (actions_tx, actions_rx) = mpsc::channel(16);

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut table = Table::with_rng(
        config.table.clone(),
        Ledger::new(),
        events_tx,
        actions_rx,
        shutdown_broadcast_rx,
        rng,
    );

    let mut clients = Vec::with_capacity(config.players);
    for idx in 0..config.players {
        let player_id = PlayerId::new(nickname(idx));
        table.funds_mut().deposit(player_id.clone(), config.balance);
        table.join(player_id.clone())?;
        clients.push(Client::new(player_id, factory()));
    }

    // Every bot sees every event, the view keeps other players cards covered.
    let bots = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            for client in &mut clients {
                if let Some(response) = client.handle_event(&event) {
                    if actions_tx.send(response).await.is_err() {
                        return;
                    }
                }
            }
        }
    });

    let mut played = 0;
    while played < config.hands {
        match table.play_hand().await {
            Ok(outcome) => {
                played += 1;
                if config.json {
                    println!("{}", serde_json::to_string(&outcome)?);
                }
            }
            Err(HandError::Cancelled) => {
                info!("Simulation stopped");
                break;
            }
            Err(err) => return Err(err.into()),
        }

        // Players who cannot pay the big blind leave the table.
        let big_blind = config.table.big_blind;
        let broke = table
            .players()
            .filter(|id| table.funds().balance(id) < big_blind)
            .cloned()
            .collect::<Vec<_>>();
        for player_id in broke {
            table.leave(&player_id)?;
        }

        if table.players().count() < 2 {
            break;
        }
    }

    info!("Played {played} hands");

    let ledger = table.into_funds();
    let _ = bots.await;
    Ok(ledger)
}
