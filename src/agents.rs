//! Agents: the betting policies that drive each seat.
//!
//! The table only ever talks to [`BettingPolicy`]; concrete strategies
//! (random, heuristic, learned) live behind it. A few reference policies ship
//! here for tests and simple sessions.

use crate::cards::Card;
use crate::hand::HoleCards;

mod bots;

pub use bots::{RandomPolicy, RandomProfile, StrengthPolicy, StrengthProfile};

/// What a policy may see about its own seat when asked to act.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeatView<'a> {
    pub seat: usize,
    pub name: &'a str,
    pub balance: f64,
    /// Amount already put in this hand.
    pub committed: f64,
    pub hole: Option<HoleCards>,
}

impl SeatView<'_> {
    /// What is still needed to reach `highest_bet`.
    pub fn owed(&self, highest_bet: f64) -> f64 {
        (highest_bet - self.committed).max(0.0)
    }
}

/// Answer to the single betting pass.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum BetAction {
    /// Put `amount` in. Below the current highest bet this counts as a fold.
    Commit(f64),
    Fold,
}

impl BetAction {
    /// Build from a `(will_bet, amount)` pair as produced by external
    /// decision code; no amount means no bet.
    pub fn from_parts(will_bet: bool, amount: Option<f64>) -> Self {
        match (will_bet, amount) {
            (true, Some(a)) => BetAction::Commit(a),
            _ => BetAction::Fold,
        }
    }
}

/// Answer to the matching pass.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum MatchAction {
    /// Pay `amount` into the pot; `None` pays exactly what is owed.
    Match(Option<f64>),
    Decline,
}

impl MatchAction {
    pub fn from_parts(will_match: bool, amount: Option<f64>) -> Self {
        if will_match {
            MatchAction::Match(amount)
        } else {
            MatchAction::Decline
        }
    }
}

/// A seat controller. Calls are synchronous and made in seating order.
pub trait BettingPolicy {
    /// Called once per hand for every active seat, after the river.
    fn place_bet(&mut self, view: &SeatView<'_>, community: &[Card], highest_bet: f64)
        -> BetAction;

    /// Called for seats still active whose commitment is below `highest_bet`.
    fn match_bet(
        &mut self,
        view: &SeatView<'_>,
        community: &[Card],
        highest_bet: f64,
    ) -> MatchAction;

    fn name(&self) -> &str {
        "policy"
    }
}

/// Always folds.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldingPolicy;

impl BettingPolicy for FoldingPolicy {
    fn place_bet(&mut self, _: &SeatView<'_>, _: &[Card], _: f64) -> BetAction {
        BetAction::Fold
    }
    fn match_bet(&mut self, _: &SeatView<'_>, _: &[Card], _: f64) -> MatchAction {
        MatchAction::Decline
    }
    fn name(&self) -> &str {
        "folding"
    }
}

/// Commits a fixed stake (or the highest bet, if larger) and matches
/// whatever it can afford.
#[derive(Debug, Clone, Copy)]
pub struct FixedPolicy {
    stake: f64,
}

impl FixedPolicy {
    pub fn new(stake: f64) -> Self {
        Self { stake: stake.max(0.0) }
    }
}

impl BettingPolicy for FixedPolicy {
    fn place_bet(&mut self, view: &SeatView<'_>, _: &[Card], highest_bet: f64) -> BetAction {
        let amount = self.stake.max(highest_bet);
        if amount > view.balance {
            return BetAction::Fold;
        }
        BetAction::Commit(amount)
    }

    fn match_bet(&mut self, view: &SeatView<'_>, _: &[Card], highest_bet: f64) -> MatchAction {
        if view.owed(highest_bet) > view.balance {
            return MatchAction::Decline;
        }
        MatchAction::Match(None)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
