//! A run of hands at one table until a stop condition holds.

use crate::agents::BettingPolicy;
use crate::game::{HandOutcome, RoundError, Table};
use thiserror::Error;
use tracing::{debug, warn};

/// Hands [`Session::run`] plays at most when no [`StopCondition::HandLimit`]
/// is configured.
pub const DEFAULT_HAND_LIMIT: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("observed seat {seat} is not at a table of {seats}")]
    UnknownSeat { seat: usize, seats: usize },
    #[error("expected {expected} policies, got {got}")]
    PolicyCount { expected: usize, got: usize },
}

/// When a session is over. Any satisfied condition ends it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum StopCondition {
    /// This many hands have been played.
    HandLimit(u64),
    /// The observed seat has nothing left.
    Bust,
    /// Some seat holds more than this.
    BalanceAbove(f64),
}

/// What one hand meant for the observed seat.
#[derive(Debug, Clone, PartialEq)]
pub struct HandReport {
    pub outcome: HandOutcome,
    /// Change in the observed seat's balance over the hand.
    pub delta: f64,
    pub finished: bool,
}

pub struct Session {
    table: Table,
    policies: Vec<Box<dyn BettingPolicy>>,
    observed: usize,
    stop: Vec<StopCondition>,
}

impl Session {
    pub fn new(
        table: Table,
        policies: Vec<Box<dyn BettingPolicy>>,
        observed: usize,
    ) -> Result<Self, SessionError> {
        let seats = table.players().len();
        if observed >= seats {
            return Err(SessionError::UnknownSeat { seat: observed, seats });
        }
        if policies.len() != seats {
            return Err(SessionError::PolicyCount { expected: seats, got: policies.len() });
        }
        Ok(Self { table, policies, observed, stop: Vec::new() })
    }

    pub fn with_stop(mut self, condition: StopCondition) -> Self {
        self.stop.push(condition);
        self
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn observed(&self) -> usize {
        self.observed
    }

    fn observed_balance(&self) -> f64 {
        self.table.player(self.observed).map_or(0.0, |p| p.balance())
    }

    pub fn is_finished(&self) -> bool {
        self.stop.iter().any(|c| match *c {
            StopCondition::HandLimit(n) => self.table.hands_played() >= n,
            StopCondition::Bust => self.observed_balance() <= 0.0,
            StopCondition::BalanceAbove(t) => {
                self.table.players().iter().any(|p| p.balance() > t)
            }
        })
    }

    /// Play one hand and report the observed seat's gain or loss.
    pub fn play_hand(&mut self) -> Result<HandReport, RoundError> {
        let before = self.observed_balance();
        let outcome = self.table.play_hand(&mut self.policies)?;
        let delta = self.observed_balance() - before;
        let finished = self.is_finished();
        debug!(hand = outcome.hand, delta, finished, "session hand");
        Ok(HandReport { outcome, delta, finished })
    }

    /// Play until finished and return every report. Without any stop
    /// condition this returns immediately. Without a
    /// [`StopCondition::HandLimit`] the run also ends after
    /// [`DEFAULT_HAND_LIMIT`] hands.
    pub fn run(&mut self) -> Result<Vec<HandReport>, RoundError> {
        let mut reports = Vec::new();
        if self.stop.is_empty() {
            return Ok(reports);
        }
        let capped = !self.stop.iter().any(|c| matches!(c, StopCondition::HandLimit(_)));
        while !self.is_finished() {
            if capped && reports.len() as u64 >= DEFAULT_HAND_LIMIT {
                warn!(hands = reports.len(), "no stop condition held, ending session");
                break;
            }
            reports.push(self.play_hand()?);
        }
        Ok(reports)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.policies.iter().map(|p| p.name()).collect();
        f.debug_struct("Session")
            .field("table", &self.table)
            .field("policies", &names)
            .field("observed", &self.observed)
            .field("stop", &self.stop)
            .finish()
    }
}
