// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table types.
use log::{debug, error, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;
use std::time::Duration;
use tokio::{
    sync::{
        broadcast::{self, error::TryRecvError},
        mpsc,
    },
    time::{self, Instant},
};

use holdem_core::{
    funds::Funds,
    message::{
        ActionRequest, ActionResponse, HandPayoff, PlayerAction, Refund, ShowdownHand, TableEvent,
    },
    poker::{Card, Chips, Deck, DeckVariant, PlayerCards, PlayerId, Stage},
};
use holdem_eval::{evaluate_holdem, resolve};

use crate::{ActionError, HandError, SeatError};

mod betting;
use betting::BettingRound;

mod player;
use player::{Player, PlayersState, clockwise};

mod pot;
use pot::Pot;

/// Table configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of seats, at least two.
    pub seats: usize,
    /// The small blind.
    pub small_blind: Chips,
    /// The big blind, also the minimum raise increment.
    pub big_blind: Chips,
    /// How long a player has to act before folding.
    pub action_timeout: Duration,
    /// The deck used for each hand.
    pub deck: DeckVariant,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seats: 6,
            small_blind: Chips::new(10),
            big_blind: Chips::new(20),
            action_timeout: Duration::from_secs(15),
            deck: DeckVariant::Single,
        }
    }
}

/// The result of a hand.
#[derive(Debug, Clone, Serialize)]
pub struct HandOutcome {
    /// The hand number at this table.
    pub hand_id: u64,
    /// The board cards dealt.
    pub board: Vec<Card>,
    /// The pot paid to winners.
    pub pot: Chips,
    /// The chips paid to each winner.
    pub payoffs: Vec<HandPayoff>,
    /// The hands revealed at showdown, empty if the hand was not contested.
    pub showdown: Vec<ShowdownHand>,
}

impl HandOutcome {
    /// Checks if all players but one folded.
    pub fn is_uncontested(&self) -> bool {
        self.showdown.is_empty()
    }
}

/// A single table that plays one hand at a time.
///
/// Players are reached only through the events channel, their responses come
/// from the actions channel. Sending on the shutdown channel, or dropping its
/// sender, aborts the hand in progress and refunds all bets.
#[derive(Debug)]
pub struct Table<F> {
    config: Config,
    funds: F,
    players: PlayersState,
    deck: Deck,
    board: Vec<Card>,
    pot: Pot,
    stage: Stage,
    hand_id: u64,
    cancelled: bool,
    rng: StdRng,
    /// Channel for sending events to players.
    events_tx: mpsc::Sender<TableEvent>,
    /// Channel for receiving players actions.
    actions_rx: mpsc::Receiver<ActionResponse>,
    /// Channel for listening shutdown notification.
    shutdown_broadcast_rx: broadcast::Receiver<()>,
}

impl<F: Funds> Table<F> {
    /// Creates a new table.
    pub fn new(
        config: Config,
        funds: F,
        events_tx: mpsc::Sender<TableEvent>,
        actions_rx: mpsc::Receiver<ActionResponse>,
        shutdown_broadcast_rx: broadcast::Receiver<()>,
    ) -> Self {
        Self::with_rng(
            config,
            funds,
            events_tx,
            actions_rx,
            shutdown_broadcast_rx,
            StdRng::from_os_rng(),
        )
    }

    /// Creates a new table with user initialized randomness.
    pub fn with_rng(
        config: Config,
        funds: F,
        events_tx: mpsc::Sender<TableEvent>,
        actions_rx: mpsc::Receiver<ActionResponse>,
        shutdown_broadcast_rx: broadcast::Receiver<()>,
        rng: StdRng,
    ) -> Self {
        // There must be at least 2 seats.
        assert!(config.seats > 1);

        Self {
            deck: Deck::new(config.deck),
            config,
            funds,
            players: PlayersState::default(),
            board: Vec::default(),
            pot: Pot::default(),
            stage: Stage::Blinds,
            hand_id: 0,
            cancelled: false,
            rng,
            events_tx,
            actions_rx,
            shutdown_broadcast_rx,
        }
    }

    /// A player sits at the table, the player plays from the next hand.
    pub fn join(&mut self, player_id: PlayerId) -> Result<(), SeatError> {
        if self.players.count() == self.config.seats {
            return Err(SeatError::TableFull);
        }

        if self.players.position(&player_id).is_some() {
            return Err(SeatError::AlreadySeated(player_id));
        }

        info!("Player {player_id} joined the table");
        self.players.join(Player::new(player_id));
        Ok(())
    }

    /// A player leaves the table.
    pub fn leave(&mut self, player_id: &PlayerId) -> Result<(), SeatError> {
        match self.players.leave(player_id) {
            Some(_) => {
                info!("Player {player_id} left the table");
                Ok(())
            }
            None => Err(SeatError::NotSeated(player_id.clone())),
        }
    }

    /// The seated players in seat order.
    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.players.iter().map(|p| &p.player_id)
    }

    /// The player with the button in the last hand.
    pub fn button(&self) -> Option<&PlayerId> {
        self.players
            .button()
            .map(|idx| &self.players[idx].player_id)
    }

    /// The table configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The players funds.
    pub fn funds(&self) -> &F {
        &self.funds
    }

    /// The players funds.
    pub fn funds_mut(&mut self) -> &mut F {
        &mut self.funds
    }

    /// Consumes the table and returns the players funds.
    pub fn into_funds(self) -> F {
        self.funds
    }

    /// Plays a hand with the seated players.
    ///
    /// If the hand fails or is cancelled all the chips put in the pot are
    /// returned to the players before returning the error.
    pub async fn play_hand(&mut self) -> Result<HandOutcome, HandError> {
        if self.is_shutdown() {
            return Err(HandError::Cancelled);
        }

        if self.players.count() < 2 {
            return Err(HandError::NotEnoughPlayers);
        }

        self.hand_id += 1;

        match self.run_hand().await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                if err.is_fatal() {
                    error!("Hand {} failed: {err}", self.hand_id);
                } else {
                    info!("Hand {} stopped: {err}", self.hand_id);
                }

                self.abort().await;
                Err(err)
            }
        }
    }

    async fn run_hand(&mut self) -> Result<HandOutcome, HandError> {
        self.start_hand().await;
        self.post_blinds().await;

        if self.players.count_active() < 2 {
            return Ok(self.award_uncontested().await);
        }

        self.deal_hole_cards().await?;

        // Stage, whether it has betting, and the board cards dealt after betting.
        const STAGES: [(Stage, bool, usize); 4] = [
            (Stage::PreFlop, true, 0),
            (Stage::Flop, false, 3),
            (Stage::Turn, true, 1),
            (Stage::River, true, 1),
        ];

        for (stage, betting, cards) in STAGES {
            self.stage = stage;

            if betting {
                self.betting_round().await?;
                if self.players.count_active() < 2 {
                    return Ok(self.award_uncontested().await);
                }
            }

            if cards > 0 {
                self.deal_board(cards).await?;
            }
        }

        self.showdown().await
    }

    /// Reset players, move the button and get a new deck.
    async fn start_hand(&mut self) {
        self.stage = Stage::Blinds;
        self.board.clear();
        self.pot.clear();
        self.deck = Deck::new_and_shuffled(self.config.deck, &mut self.rng);

        let button = self.players.start_hand(&mut self.rng);
        let button_id = self.players[button].player_id.clone();

        info!(
            "Hand {} started with {} players, button {button_id}",
            self.hand_id,
            self.players.count()
        );

        let seats = self.players().cloned().collect();
        self.send(TableEvent::StartHand {
            hand_id: self.hand_id,
            seats,
            button: button_id,
        })
        .await;
    }

    /// Takes the blinds, a player who cannot pay sits out the hand.
    async fn post_blinds(&mut self) {
        let (sb, bb) = self.players.blind_seats();
        let blinds = [
            (sb, PlayerAction::SmallBlind, self.config.small_blind),
            (bb, PlayerAction::BigBlind, self.config.big_blind),
        ];

        for (idx, action, amount) in blinds {
            let player_id = self.players[idx].player_id.clone();
            match self.funds.debit(&player_id, amount) {
                Ok(()) => {
                    let player = &mut self.players[idx];
                    player.bet = amount;
                    player.action = action;

                    self.send(TableEvent::BlindPosted {
                        player_id,
                        action,
                        amount,
                    })
                    .await;
                }
                Err(err) => {
                    warn!("Player {player_id} sits out the hand: {err}");
                    self.players[idx].fold();

                    self.send(TableEvent::PlayerActed {
                        player_id,
                        action: PlayerAction::Fold,
                        bet: Chips::ZERO,
                    })
                    .await;
                }
            }
        }
    }

    /// Deals two cards to each player starting from the small blind.
    async fn deal_hole_cards(&mut self) -> Result<(), HandError> {
        let (sb, _) = self.players.blind_seats();
        for idx in clockwise(sb, self.players.count()) {
            if !self.players[idx].is_active() {
                continue;
            }

            let cards = [self.deck.draw()?, self.deck.draw()?];
            let player = &mut self.players[idx];
            player.hole_cards = PlayerCards::Cards(cards[0], cards[1]);

            let player_id = player.player_id.clone();
            self.send(TableEvent::DealCards { player_id, cards }).await;
        }

        Ok(())
    }

    async fn deal_board(&mut self, count: usize) -> Result<(), HandError> {
        for _ in 0..count {
            self.board.push(self.deck.draw()?);
        }

        debug!("Hand {} {} board {:?}", self.hand_id, self.stage, self.board);

        self.send(TableEvent::Board {
            stage: self.stage,
            cards: self.board.clone(),
        })
        .await;

        Ok(())
    }

    /// Runs a betting round and moves the bets into the pot.
    async fn betting_round(&mut self) -> Result<(), HandError> {
        // Pre-flop starts left of the big blind, then left of the button.
        let first = if self.stage == Stage::PreFlop {
            self.players.blind_seats().1 + 1
        } else {
            self.players.button().unwrap_or_default() + 1
        };
        let first = first % self.players.count();

        let mut round =
            BettingRound::new(self.stage, &mut self.players, first, self.config.big_blind);

        while let Some(idx) = round.next_to_act(&self.players) {
            self.request_action(&mut round, idx).await?;
        }

        self.pot.collect(&mut self.players);
        self.send(TableEvent::StageEnded {
            stage: self.stage,
            pot: self.pot.chips(),
        })
        .await;

        Ok(())
    }

    /// Asks a player to act until the action is valid, folds the player if
    /// the time runs out or the action cannot be paid.
    async fn request_action(
        &mut self,
        round: &mut BettingRound,
        idx: usize,
    ) -> Result<(), HandError> {
        let player_id = self.players[idx].player_id.clone();
        let deadline = Instant::now() + self.config.action_timeout;

        loop {
            // Drop responses that were not sent for this request.
            while self.actions_rx.try_recv().is_ok() {}

            let player = &self.players[idx];
            let req = ActionRequest {
                player_id: player_id.clone(),
                stage: round.stage(),
                actions: round.allowed_actions(player),
                current_bet: round.current_bet(),
                player_bet: player.bet,
                min_raise: round.min_raise(),
                big_blind: self.config.big_blind,
                time_budget: deadline.saturating_duration_since(Instant::now()),
            };
            self.send(TableEvent::ActionRequest(req)).await;

            let Some(response) = self.recv_action(&player_id, deadline).await? else {
                warn!("Player {player_id} action timed out, folding");
                self.fold_player(round, idx).await;
                return Ok(());
            };

            let debit = match round.validate(&self.players[idx], response.action, response.amount)
            {
                Ok(debit) => debit,
                Err(err) => {
                    warn!("Player {player_id} action rejected: {err}");
                    continue;
                }
            };

            // A player who cannot pay is folded.
            if let Err(err) = self.funds.debit(&player_id, debit) {
                warn!("{err}, folding");
                self.fold_player(round, idx).await;
                return Ok(());
            }

            round.commit(&mut self.players, response.action, response.amount);

            let bet = self.players[idx].bet;
            debug!(
                "Player {player_id} {} bet {bet} in {}",
                response.action.label(),
                self.stage
            );

            self.send(TableEvent::PlayerActed {
                player_id,
                action: response.action,
                bet,
            })
            .await;

            return Ok(());
        }
    }

    /// Folds the player at the round cursor.
    async fn fold_player(&mut self, round: &mut BettingRound, idx: usize) {
        round.fold(&mut self.players);
        self.send(TableEvent::PlayerActed {
            player_id: self.players[idx].player_id.clone(),
            action: PlayerAction::Fold,
            bet: self.players[idx].bet,
        })
        .await;
    }

    /// Waits for a response from a player, none if the deadline expires.
    async fn recv_action(
        &mut self,
        player_id: &PlayerId,
        deadline: Instant,
    ) -> Result<Option<ActionResponse>, HandError> {
        loop {
            tokio::select! {
                // Table is shutting down.
                _ = self.shutdown_broadcast_rx.recv() => {
                    self.cancelled = true;
                    return Err(HandError::Cancelled);
                }
                _ = time::sleep_until(deadline) => return Ok(None),
                res = self.actions_rx.recv() => match res {
                    Some(response) if &response.player_id == player_id => {
                        return Ok(Some(response));
                    }
                    Some(response) => {
                        let err = ActionError::NotYourTurn(response.player_id);
                        debug!("Response ignored: {err}");
                    }
                    // Nobody can respond anymore.
                    None => return Ok(None),
                },
            }
        }
    }

    /// Pays the pot to the last player in the hand.
    async fn award_uncontested(&mut self) -> HandOutcome {
        self.pot.collect(&mut self.players);
        let pot = self.pot.chips();

        let mut payoffs = Vec::new();
        if let Some(winner) = self.players.iter().find(|p| p.is_active()) {
            let player_id = winner.player_id.clone();
            self.funds.credit(&player_id, pot);

            info!("Hand {} won by {player_id} uncontested, pot {pot}", self.hand_id);
            payoffs.push(HandPayoff {
                player_id,
                chips: pot,
                cards: Vec::default(),
            });
        }

        self.end_hand(pot, payoffs, Vec::default()).await
    }

    /// Compares the hands of the players left and pays the winners.
    async fn showdown(&mut self) -> Result<HandOutcome, HandError> {
        self.stage = Stage::Showdown;
        self.pot.collect(&mut self.players);

        // Players in clockwise order from the left of the button, winners get
        // the odd chips in this order.
        let first = self.players.button().unwrap_or_default() + 1;
        let mut hands = Vec::new();
        for idx in clockwise(first % self.players.count(), self.players.count()) {
            let player = &self.players[idx];
            if !player.is_active() {
                continue;
            }

            if let Some(hole_cards) = player.hole_cards.cards() {
                let (strength, best_hand) = evaluate_holdem(hole_cards, &self.board)?;
                hands.push(ShowdownHand {
                    player_id: player.player_id.clone(),
                    hole_cards,
                    strength,
                    best_hand: best_hand.to_vec(),
                });
            }
        }

        self.send(TableEvent::Showdown {
            hands: hands.clone(),
        })
        .await;

        let ranked = hands
            .iter()
            .enumerate()
            .map(|(idx, hand)| (idx, hand.strength.clone()))
            .collect::<Vec<_>>();
        let winners = resolve(&ranked);

        let pot = self.pot.chips();
        let shares = self.pot.split(winners.len());
        let mut payoffs = Vec::with_capacity(winners.len());
        for (idx, chips) in winners.into_iter().zip(shares) {
            let hand = &hands[idx];
            self.funds.credit(&hand.player_id, chips);

            info!(
                "Hand {} won by {} with {}, chips {chips}",
                self.hand_id, hand.player_id, hand.strength
            );

            payoffs.push(HandPayoff {
                player_id: hand.player_id.clone(),
                chips,
                cards: hand.best_hand.clone(),
            });
        }

        Ok(self.end_hand(pot, payoffs, hands).await)
    }

    async fn end_hand(
        &mut self,
        pot: Chips,
        payoffs: Vec<HandPayoff>,
        showdown: Vec<ShowdownHand>,
    ) -> HandOutcome {
        self.pot.clear();

        self.send(TableEvent::EndHand {
            pot,
            payoffs: payoffs.clone(),
        })
        .await;

        HandOutcome {
            hand_id: self.hand_id,
            board: self.board.clone(),
            pot,
            payoffs,
            showdown,
        }
    }

    /// Returns to each player all the chips they put in this hand.
    async fn abort(&mut self) {
        let refunds = self
            .players
            .iter()
            .map(|p| Refund {
                player_id: p.player_id.clone(),
                chips: self.pot.contribution(&p.player_id) + p.bet,
            })
            .filter(|r| r.chips > Chips::ZERO)
            .collect::<Vec<_>>();

        for refund in &refunds {
            self.funds.credit(&refund.player_id, refund.chips);
        }

        for player in self.players.iter_mut() {
            player.bet = Chips::ZERO;
        }

        self.pot.clear();
        self.send(TableEvent::HandAborted { refunds }).await;
    }

    /// Checks if the table has been asked to stop.
    fn is_shutdown(&mut self) -> bool {
        if !self.cancelled {
            self.cancelled = !matches!(
                self.shutdown_broadcast_rx.try_recv(),
                Err(TryRecvError::Empty)
            );
        }

        self.cancelled
    }

    async fn send(&self, event: TableEvent) {
        let _ = self.events_tx.send(event).await;
    }
}
