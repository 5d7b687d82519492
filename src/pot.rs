//! Single shared pot: per-seat contributions and an even split across winners.

/// Largest payout residual tolerated before the split is rejected.
pub const DEFAULT_EPSILON: f64 = 1e-3;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PotError {
    #[error("contribution must be finite and non-negative, got {0}")]
    InvalidAmount(f64),
    #[error("no seat {0} at this pot")]
    UnknownSeat(usize),
    #[error("cannot split a pot of {0} between zero winners")]
    NoWinners(f64),
    #[error("pot of {pot} paid out {paid}, residual {residual} exceeds tolerance")]
    InvariantViolation { pot: f64, paid: f64, residual: f64 },
}

/// Amount credited to one seat at payout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payout {
    pub seat: usize,
    pub amount: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Pot {
    total: f64,
    contributions: Vec<f64>,
}

impl Pot {
    pub fn new(seats: usize) -> Self {
        Self { total: 0.0, contributions: vec![0.0; seats] }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0.0
    }

    /// Everything `seat` has put in this hand.
    pub fn contribution(&self, seat: usize) -> f64 {
        self.contributions.get(seat).copied().unwrap_or(0.0)
    }

    pub fn contribute(&mut self, seat: usize, amount: f64) -> Result<(), PotError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(PotError::InvalidAmount(amount));
        }
        let slot = self.contributions.get_mut(seat).ok_or(PotError::UnknownSeat(seat))?;
        *slot += amount;
        self.total += amount;
        Ok(())
    }

    /// Divide the pot evenly across `winners` and empty it.
    ///
    /// The pot is left untouched when the split fails.
    ///
    /// ```
    /// use showdown_rs::pot::{Pot, DEFAULT_EPSILON};
    ///
    /// let mut pot = Pot::new(3);
    /// pot.contribute(0, 10.0).unwrap();
    /// pot.contribute(1, 10.0).unwrap();
    /// let payouts = pot.split(&[0, 2], DEFAULT_EPSILON).unwrap();
    /// assert_eq!(payouts[1].amount, 10.0);
    /// assert_eq!(pot.total(), 0.0);
    /// ```
    pub fn split(&mut self, winners: &[usize], epsilon: f64) -> Result<Vec<Payout>, PotError> {
        if winners.is_empty() {
            return Err(PotError::NoWinners(self.total));
        }
        if let Some(&seat) = winners.iter().find(|&&s| s >= self.contributions.len()) {
            return Err(PotError::UnknownSeat(seat));
        }

        let share = self.total / winners.len() as f64;
        let payouts: Vec<Payout> =
            winners.iter().map(|&seat| Payout { seat, amount: share }).collect();
        let paid: f64 = payouts.iter().map(|p| p.amount).sum();
        let residual = self.total - paid;
        if residual.abs() > epsilon {
            return Err(PotError::InvariantViolation { pot: self.total, paid, residual });
        }

        self.reset();
        Ok(payouts)
    }

    pub fn reset(&mut self) {
        self.total = 0.0;
        self.contributions.iter_mut().for_each(|c| *c = 0.0);
    }
}
