// Read-only boundary over a running table. Harnesses (training loops, reports,
// sessions) observe the table through this trait instead of its fields. It is
// implemented for the core `Table` type.

use crate::cards::Card;
use crate::game::{HandOutcome, Phase, Table};
use crate::hand::HoleCards;

pub trait TableView {
    // Shared state
    fn community(&self) -> &[Card];
    fn pot(&self) -> f64;
    fn highest_bet(&self) -> f64;
    fn phase(&self) -> Phase;
    fn num_seats(&self) -> usize;
    fn seat_order(&self) -> &[usize];
    fn last_outcome(&self) -> Option<&HandOutcome>;

    // Per seat
    fn name(&self, seat: usize) -> Option<&str>;
    fn hole_cards(&self, seat: usize) -> Option<HoleCards>;
    fn balance(&self, seat: usize) -> Option<f64>;
    fn is_active(&self, seat: usize) -> bool;

    /// Community cards, the seat's hole cards and its balance, flattened as
    /// `rank, suit index` pairs followed by the balance. Missing cards are
    /// simply absent, so the length grows as the board is revealed.
    fn observation(&self, seat: usize) -> Vec<f64> {
        let hole = self.hole_cards(seat);
        let cards = self.community().iter().copied().chain(hole.iter().flat_map(|h| h.as_array()));
        let mut out: Vec<f64> = cards
            .flat_map(|c| [f64::from(c.rank().value()), f64::from(c.suit().index())])
            .collect();
        out.push(self.balance(seat).unwrap_or(0.0));
        out
    }
}

impl TableView for Table {
    fn community(&self) -> &[Card] {
        Table::community(self)
    }
    fn pot(&self) -> f64 {
        Table::pot(self)
    }
    fn highest_bet(&self) -> f64 {
        Table::highest_bet(self)
    }
    fn phase(&self) -> Phase {
        Table::phase(self)
    }
    fn num_seats(&self) -> usize {
        self.players().len()
    }
    fn seat_order(&self) -> &[usize] {
        self.rotation()
    }
    fn last_outcome(&self) -> Option<&HandOutcome> {
        Table::last_outcome(self)
    }

    fn name(&self, seat: usize) -> Option<&str> {
        self.player(seat).map(|p| p.name())
    }
    fn hole_cards(&self, seat: usize) -> Option<HoleCards> {
        self.player(seat).and_then(|p| p.hole())
    }
    fn balance(&self, seat: usize) -> Option<f64> {
        self.player(seat).map(|p| p.balance())
    }
    fn is_active(&self, seat: usize) -> bool {
        self.player(seat).is_some_and(|p| p.is_active())
    }
}
