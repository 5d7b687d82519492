use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// A standard 52-card deck consumed from the front.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// Unshuffled deck, ranks ascending with suits cycling inside each rank.
    ///
    /// ```
    /// use showdown_rs::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = VecDeque::with_capacity(52);
        for r in Rank::ALL {
            for s in Suit::ALL {
                cards.push_back(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// A fresh deck shuffled once with the caller's RNG.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_with(rng);
        deck
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.shuffle_with(&mut rng);
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
    }

    /// Take the card at the front of the deck.
    pub fn draw_next(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Take up to `n` cards from the front, in deck order.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let n = n.min(self.cards.len());
        self.cards.drain(..n).collect()
    }

    /// Look at the front card without consuming it.
    pub fn peek(&self) -> Option<Card> {
        self.cards.front().copied()
    }
}
