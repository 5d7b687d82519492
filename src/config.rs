//! Table configuration.

use crate::pot::DEFAULT_EPSILON;

/// Largest table a single deck can serve: two hole cards per seat plus a
/// five-card board.
pub const MAX_SEATS: usize = 23;
pub const MIN_SEATS: usize = 2;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("seat count must be between {MIN_SEATS} and {MAX_SEATS}, got {0}")]
    SeatCount(usize),
    #[error("starting balance must be positive and finite, got {0}")]
    StartingBalance(f64),
    #[error("payout tolerance must be non-negative and finite, got {0}")]
    Epsilon(f64),
    #[error("expected {expected} seat names, got {got}")]
    NameCount { expected: usize, got: usize },
}

/// Settings for a [`Table`](crate::game::Table).
///
/// ```
/// use showdown_rs::config::TableConfig;
///
/// let config = TableConfig::new(4, 100.0).with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.seat_names()[3], "P4");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct TableConfig {
    pub seats: usize,
    pub starting_balance: f64,
    /// Seed for deck shuffles; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Largest residual tolerated when the pot is split.
    pub epsilon: f64,
    pub names: Option<Vec<String>>,
}

impl TableConfig {
    pub fn new(seats: usize, starting_balance: f64) -> Self {
        Self { seats, starting_balance, seed: None, epsilon: DEFAULT_EPSILON, names: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&self.seats) {
            return Err(ConfigError::SeatCount(self.seats));
        }
        if !self.starting_balance.is_finite() || self.starting_balance <= 0.0 {
            return Err(ConfigError::StartingBalance(self.starting_balance));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigError::Epsilon(self.epsilon));
        }
        if let Some(names) = &self.names {
            if names.len() != self.seats {
                return Err(ConfigError::NameCount { expected: self.seats, got: names.len() });
            }
        }
        Ok(())
    }

    /// Names in seat order, defaulting to `P1..Pn`.
    pub fn seat_names(&self) -> Vec<String> {
        match &self.names {
            Some(names) => names.clone(),
            None => (1..=self.seats).map(|i| format!("P{i}")).collect(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(4, 100.0)
    }
}
