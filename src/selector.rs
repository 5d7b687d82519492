//! Best five-card hand from hole cards plus the revealed community cards.
//!
//! The search follows a house rule rather than a generic subset scan.
//! Candidates are visited in this fixed order:
//!
//! 1. the first three community cards plus both hole cards;
//! 2. with five community cards, the community cards alone;
//! 3. with at least four community cards, each hole card (in deal order)
//!    joined to every 4-card community combination;
//! 4. every 3-card community combination plus both hole cards.
//!
//! A later candidate only replaces the current best when it is strictly
//! stronger, so among equals the first one visited is kept. With two hole
//! cards and three to five community cards these stages together cover
//! every 5-card subset; the order only decides which of several equal hands
//! is reported.

use crate::cards::Card;
use crate::evaluator::{classify, EvalError, HandScore};
use crate::hand::{validate_visible, HandError, HoleCards};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectError {
    #[error("invalid cards: {0}")]
    Hand(#[from] HandError),
    #[error("evaluation failed: {0}")]
    Eval(#[from] EvalError),
    #[error("no five-card combination available from {hole} hole and {community} community cards")]
    NoCandidate { hole: usize, community: usize },
}

/// The chosen five cards and their score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestHand {
    pub cards: [Card; 5],
    pub score: HandScore,
}

/// Lexicographic k-combinations of `0..n`, in the same order as a nested
/// ascending loop.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self { n, indices: (0..k).collect(), done: k > n }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let out = self.indices.clone();
        let k = self.indices.len();

        // rightmost index that can still move right
        match (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }
        Some(out)
    }
}

fn pick(cards: &[Card], idx: &[usize]) -> Vec<Card> {
    idx.iter().map(|&i| cards[i]).collect()
}

fn candidates(hole: Option<&HoleCards>, community: &[Card]) -> Vec<Vec<Card>> {
    let mut out = Vec::new();
    let n = community.len();

    if let Some(h) = hole {
        let mut start: Vec<Card> = community.iter().take(3).copied().collect();
        start.extend(h.as_array());
        out.push(start);
    }

    if n == 5 {
        out.push(community.to_vec());
    }

    if let Some(h) = hole {
        if n >= 4 {
            for card in h.as_array() {
                for idx in Combinations::new(n, 4) {
                    let mut c = pick(community, &idx);
                    c.push(card);
                    out.push(c);
                }
            }
        }

        for idx in Combinations::new(n, 3) {
            let mut c = pick(community, &idx);
            c.extend(h.as_array());
            out.push(c);
        }
    }
    out
}

/// Search the house-rule candidates for the strongest hand.
///
/// ```
/// use showdown_rs::cards::parse_cards;
/// use showdown_rs::evaluator::Category;
/// use showdown_rs::hand::HoleCards;
/// use showdown_rs::selector::best_hand;
///
/// let community = parse_cards("2h 7h 9h Jh Kh").unwrap();
/// let hole: HoleCards = "3c 4d".parse().unwrap();
/// let best = best_hand(Some(&hole), &community).unwrap();
/// assert_eq!(best.score.category(), Category::Flush);
/// assert_eq!(best.cards.to_vec(), community);
/// ```
pub fn best_hand(hole: Option<&HoleCards>, community: &[Card]) -> Result<BestHand, SelectError> {
    validate_visible(hole, community)?;

    let mut best: Option<BestHand> = None;
    for cards in candidates(hole, community) {
        let score = classify(&cards)?;
        if best.as_ref().map_or(true, |b| score > b.score) {
            let cards: [Card; 5] =
                cards.try_into().map_err(|v: Vec<Card>| EvalError::CardCount(v.len()))?;
            best = Some(BestHand { cards, score });
        }
    }

    best.ok_or(SelectError::NoCandidate {
        hole: hole.map_or(0, |_| 2),
        community: community.len(),
    })
}
