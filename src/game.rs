use crate::agents::{BetAction, BettingPolicy, MatchAction, SeatView};
use crate::cards::Card;
use crate::config::{ConfigError, TableConfig};
use crate::deck::Deck;
use crate::evaluator::{winners_by_score, EvalError, HandScore};
use crate::hand::{Community, HandError, HoleCards};
use crate::pot::{Payout, Pot, PotError};
use crate::selector::{best_hand, SelectError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace, warn};

/// Where the current hand stands. Each call to [`Table::advance`] performs
/// exactly one transition, in declaration order, wrapping back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Phase {
    Idle,
    Dealt,
    FlopRevealed,
    TurnRevealed,
    RiverRevealed,
    Betting,
    Matching,
    Showdown,
    Payout,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Dealt => "dealt",
            Phase::FlopRevealed => "flop",
            Phase::TurnRevealed => "turn",
            Phase::RiverRevealed => "river",
            Phase::Betting => "betting",
            Phase::Matching => "matching",
            Phase::Showdown => "showdown",
            Phase::Payout => "payout",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("seat {seat} tried to put in {amount} with a balance of {balance}")]
    OverBalance { seat: usize, amount: f64, balance: f64 },
    #[error("deck ran out of cards")]
    DeckExhausted,
    #[error("expected {expected} policies, got {got}")]
    PolicyCount { expected: usize, got: usize },
    #[error("operation not allowed in phase {0}")]
    InvalidPhase(Phase),
    #[error("hand evaluation failed: {0}")]
    Eval(#[from] EvalError),
    #[error("best hand selection failed: {0}")]
    Select(#[from] SelectError),
    #[error("pot accounting failed: {0}")]
    Pot(#[from] PotError),
    #[error("invalid cards: {0}")]
    Hand(#[from] HandError),
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) name: String,
    pub(crate) balance: f64,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) active: bool,
    pub(crate) committed: f64,
}

impl Player {
    fn new(name: String, balance: f64) -> Self {
        Self { name, balance, hole: None, active: true, committed: 0.0 }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Money not yet put into the pot; persists across hands.
    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    /// Still contesting the current hand.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Total put in during the current hand.
    pub fn committed(&self) -> f64 {
        self.committed
    }

    fn view(&self, seat: usize) -> SeatView<'_> {
        SeatView {
            seat,
            name: &self.name,
            balance: self.balance,
            committed: self.committed,
            hole: self.hole,
        }
    }

    fn reset_for_hand(&mut self) {
        self.hole = None;
        self.active = true;
        self.committed = 0.0;
    }
}

/// Result of one completed hand.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct HandOutcome {
    /// Zero-based hand number.
    pub hand: u64,
    /// Winning seats in seat order. Empty when every seat folded without
    /// putting anything in.
    pub winners: Vec<usize>,
    pub payouts: Vec<Payout>,
    /// Pot size before the payout.
    pub pot: f64,
    /// Best hand of every seat that reached a contested showdown.
    pub scores: Vec<(usize, HandScore)>,
    pub community: Vec<Card>,
}

impl HandOutcome {
    /// Won without a hand comparison.
    pub fn is_uncontested(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn is_split(&self) -> bool {
        self.winners.len() > 1
    }

    /// What `seat` received from this pot.
    pub fn payout_for(&self, seat: usize) -> f64 {
        self.payouts.iter().filter(|p| p.seat == seat).map(|p| p.amount).sum()
    }
}

/// One table playing one hand at a time: deal, three reveals, one betting
/// pass, one matching pass, showdown and payout.
#[derive(Debug)]
#[non_exhaustive]
pub struct Table {
    pub(crate) config: TableConfig,
    pub(crate) players: Vec<Player>,
    /// Seat indices in acting order; the front seat moves to the back each hand.
    pub(crate) rotation: Vec<usize>,
    pub(crate) deck: Option<Deck>,
    pub(crate) community: Community,
    pub(crate) pot: Pot,
    pub(crate) highest_bet: f64,
    pub(crate) phase: Phase,
    rng: ChaCha8Rng,
    deals: u64,
    hands_played: u64,
    pending_winners: Vec<usize>,
    pending_scores: Vec<(usize, HandScore)>,
    last_outcome: Option<HandOutcome>,
}

impl Table {
    /// ```
    /// use showdown_rs::config::TableConfig;
    /// use showdown_rs::game::{Phase, Table};
    ///
    /// let table = Table::new(TableConfig::new(3, 100.0).with_seed(1)).unwrap();
    /// assert_eq!(table.phase(), Phase::Idle);
    /// assert_eq!(table.rotation(), &[0, 1, 2]);
    /// ```
    pub fn new(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let players: Vec<Player> = config
            .seat_names()
            .into_iter()
            .map(|name| Player::new(name, config.starting_balance))
            .collect();
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Ok(Self {
            rotation: (0..players.len()).collect(),
            pot: Pot::new(players.len()),
            players,
            config,
            deck: None,
            community: Community::new(),
            highest_bet: 0.0,
            phase: Phase::Idle,
            rng,
            deals: 0,
            hands_played: 0,
            pending_winners: Vec::new(),
            pending_scores: Vec::new(),
            last_outcome: None,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn community(&self) -> &[Card] {
        self.community.as_slice()
    }

    pub fn pot(&self) -> f64 {
        self.pot.total()
    }

    pub fn highest_bet(&self) -> f64 {
        self.highest_bet
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rotation(&self) -> &[usize] {
        &self.rotation
    }

    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }

    pub fn last_outcome(&self) -> Option<&HandOutcome> {
        self.last_outcome.as_ref()
    }

    /// Seats still contesting the current hand, in acting order.
    pub fn active_seats(&self) -> Vec<usize> {
        self.rotation.iter().copied().filter(|&s| self.players[s].active).collect()
    }

    /// Sum of all balances plus the pot. Constant across a hand.
    pub fn total_money(&self) -> f64 {
        self.players.iter().map(|p| p.balance).sum::<f64>() + self.pot.total()
    }

    /// Perform the next transition and return the phase entered.
    ///
    /// Policies are indexed by seat and consulted only on the way into
    /// `Betting` and `Matching`. On error the hand is abandoned: every
    /// contribution is refunded and the table returns to `Idle`.
    pub fn advance(
        &mut self,
        policies: &mut [Box<dyn BettingPolicy>],
    ) -> Result<Phase, RoundError> {
        if policies.len() != self.players.len() {
            return Err(RoundError::PolicyCount {
                expected: self.players.len(),
                got: policies.len(),
            });
        }
        match self.step(policies) {
            Ok(phase) => Ok(phase),
            Err(e) => {
                warn!(hand = self.hands_played, phase = %self.phase, error = %e, "hand aborted");
                self.abort_hand();
                Err(e)
            }
        }
    }

    /// Run transitions from `Idle` until the hand is settled.
    pub fn play_hand(
        &mut self,
        policies: &mut [Box<dyn BettingPolicy>],
    ) -> Result<HandOutcome, RoundError> {
        if self.phase != Phase::Idle {
            return Err(RoundError::InvalidPhase(self.phase));
        }
        while self.advance(policies)? != Phase::Idle {}
        self.last_outcome.clone().ok_or(RoundError::InvalidPhase(self.phase))
    }

    fn step(&mut self, policies: &mut [Box<dyn BettingPolicy>]) -> Result<Phase, RoundError> {
        let next = match self.phase {
            Phase::Idle => {
                self.deal()?;
                Phase::Dealt
            }
            Phase::Dealt => {
                self.reveal(3)?;
                Phase::FlopRevealed
            }
            Phase::FlopRevealed => {
                self.reveal(1)?;
                Phase::TurnRevealed
            }
            Phase::TurnRevealed => {
                self.reveal(1)?;
                Phase::RiverRevealed
            }
            Phase::RiverRevealed => {
                self.take_bets(policies)?;
                Phase::Betting
            }
            Phase::Betting => {
                self.take_matches(policies)?;
                Phase::Matching
            }
            Phase::Matching => {
                self.showdown()?;
                Phase::Showdown
            }
            Phase::Showdown => {
                self.pay_out()?;
                Phase::Payout
            }
            Phase::Payout => {
                self.reset();
                Phase::Idle
            }
        };
        debug!(hand = self.hands_played, from = %self.phase, to = %next, pot = self.pot.total(), "phase");
        self.phase = next;
        Ok(next)
    }

    fn deal(&mut self) -> Result<(), RoundError> {
        if self.deals > 0 {
            self.rotation.rotate_left(1);
        }
        self.deals += 1;
        let mut deck = Deck::shuffled(&mut self.rng);
        for &seat in &self.rotation {
            let cards = deck.draw_n(2);
            if cards.len() < 2 {
                return Err(RoundError::DeckExhausted);
            }
            self.players[seat].hole = Some(HoleCards::from_slice(&cards)?);
        }
        self.deck = Some(deck);
        Ok(())
    }

    fn reveal(&mut self, n: usize) -> Result<(), RoundError> {
        let deck = self.deck.as_mut().ok_or(RoundError::InvalidPhase(self.phase))?;
        let cards = deck.draw_n(n);
        if cards.len() < n {
            return Err(RoundError::DeckExhausted);
        }
        self.community.extend(cards)?;
        trace!(community = ?self.community.as_slice(), "revealed");
        Ok(())
    }

    fn check_affordable(&self, seat: usize, amount: f64) -> Result<(), RoundError> {
        let balance = self.players[seat].balance;
        if amount > balance {
            return Err(RoundError::OverBalance { seat, amount, balance });
        }
        Ok(())
    }

    fn put_in(&mut self, seat: usize, amount: f64) -> Result<(), RoundError> {
        self.pot.contribute(seat, amount)?;
        let p = &mut self.players[seat];
        p.balance -= amount;
        p.committed += amount;
        Ok(())
    }

    fn fold(&mut self, seat: usize) {
        self.players[seat].active = false;
        trace!(seat, "fold");
    }

    fn take_bets(&mut self, policies: &mut [Box<dyn BettingPolicy>]) -> Result<(), RoundError> {
        for seat in self.rotation.clone() {
            if !self.players[seat].active {
                continue;
            }
            let view = self.players[seat].view(seat);
            let action =
                policies[seat].place_bet(&view, self.community.as_slice(), self.highest_bet);
            trace!(seat, policy = policies[seat].name(), ?action, highest = self.highest_bet, "bet");
            match action {
                BetAction::Commit(amount) => {
                    self.check_affordable(seat, amount)?;
                    if amount < self.highest_bet {
                        warn!(seat, amount, highest = self.highest_bet, "bet below highest, folding");
                        self.fold(seat);
                        continue;
                    }
                    self.put_in(seat, amount)?;
                    self.highest_bet = self.highest_bet.max(amount);
                }
                BetAction::Fold => self.fold(seat),
            }
        }
        Ok(())
    }

    fn take_matches(&mut self, policies: &mut [Box<dyn BettingPolicy>]) -> Result<(), RoundError> {
        let epsilon = self.config.epsilon;
        for seat in self.rotation.clone() {
            if !self.players[seat].active {
                continue;
            }
            let owed = self.highest_bet - self.players[seat].committed;
            if owed <= epsilon {
                trace!(seat, "auto-matched");
                continue;
            }
            let view = self.players[seat].view(seat);
            let action =
                policies[seat].match_bet(&view, self.community.as_slice(), self.highest_bet);
            trace!(seat, policy = policies[seat].name(), ?action, owed, "match");
            match action {
                MatchAction::Match(amount) => {
                    let amount = amount.unwrap_or(owed);
                    self.check_affordable(seat, amount)?;
                    if amount < owed - epsilon {
                        warn!(seat, amount, owed, "match below owed amount, folding");
                        self.fold(seat);
                        continue;
                    }
                    if amount > owed + epsilon {
                        warn!(seat, amount, owed, "match above owed amount, taking owed");
                    }
                    self.put_in(seat, owed)?;
                }
                MatchAction::Decline => self.fold(seat),
            }
        }
        Ok(())
    }

    fn showdown(&mut self) -> Result<(), RoundError> {
        let contenders = self.active_seats();
        self.pending_scores.clear();
        self.pending_winners = match contenders.as_slice() {
            [] => Vec::new(),
            [only] => vec![*only],
            _ => {
                let mut seats = contenders.clone();
                seats.sort_unstable();
                let mut scores = Vec::with_capacity(seats.len());
                for &seat in &seats {
                    let best = best_hand(self.players[seat].hole.as_ref(), self.community())?;
                    scores.push(best.score);
                }
                let winners =
                    winners_by_score(&scores)?.into_iter().map(|i| seats[i]).collect();
                self.pending_scores = seats.into_iter().zip(scores).collect();
                winners
            }
        };
        debug!(hand = self.hands_played, winners = ?self.pending_winners, "showdown");
        Ok(())
    }

    fn pay_out(&mut self) -> Result<(), RoundError> {
        let pot = self.pot.total();
        let payouts = if self.pending_winners.is_empty() {
            if pot > self.config.epsilon {
                return Err(PotError::NoWinners(pot).into());
            }
            self.pot.reset();
            Vec::new()
        } else {
            self.pot.split(&self.pending_winners, self.config.epsilon)?
        };
        for p in &payouts {
            self.players[p.seat].balance += p.amount;
        }
        debug!(hand = self.hands_played, pot, ?payouts, "payout");
        self.last_outcome = Some(HandOutcome {
            hand: self.hands_played,
            winners: std::mem::take(&mut self.pending_winners),
            payouts,
            pot,
            scores: std::mem::take(&mut self.pending_scores),
            community: self.community.as_slice().to_vec(),
        });
        Ok(())
    }

    fn reset(&mut self) {
        self.clear_hand();
        self.hands_played += 1;
    }

    fn clear_hand(&mut self) {
        self.deck = None;
        self.community.clear();
        self.pot.reset();
        self.highest_bet = 0.0;
        self.pending_winners.clear();
        self.pending_scores.clear();
        self.players.iter_mut().for_each(Player::reset_for_hand);
    }

    /// Give back what everyone put in and return to `Idle`. The hand does not
    /// count as played but the rotation stays where the deal left it.
    fn abort_hand(&mut self) {
        for (seat, p) in self.players.iter_mut().enumerate() {
            p.balance += self.pot.contribution(seat);
        }
        self.clear_hand();
        self.phase = Phase::Idle;
    }
}
