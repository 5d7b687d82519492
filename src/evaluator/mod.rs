//! Five-card hand ranking and comparison.
//!
//! [`classify`] turns exactly five distinct cards into a [`HandScore`]
//! (category plus tie-break ranks). [`equals`], [`beats`] and [`winners`]
//! are built on top of it.

pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::{Card, Rank};
use core::cmp::Ordering;
use std::fmt;

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
        Category::RoyalFlush,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "high card",
            Category::Pair => "pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
            Category::RoyalFlush => "royal flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category plus category-specific tie-break ranks.
///
/// The derived ordering compares the category first and then the tie-break
/// sequence lexicographically, which is exactly hand strength.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandScore {
    category: Category,
    tiebreak: Vec<Rank>,
}

impl HandScore {
    pub fn new(category: Category, tiebreak: Vec<Rank>) -> Self {
        Self { category, tiebreak }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn tiebreak(&self) -> &[Rank] {
        &self.tiebreak
    }

    /// Tie-break as plain rank numbers (2..=14).
    pub fn tiebreak_values(&self) -> Vec<u8> {
        self.tiebreak.iter().map(|r| r.value()).collect()
    }
}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)?;
        if !self.tiebreak.is_empty() {
            let ranks: Vec<String> = self.tiebreak.iter().map(|r| r.to_string()).collect();
            write!(f, " [{}]", ranks.join(" "))?;
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("a hand needs exactly 5 cards, got {0}")]
    CardCount(usize),
    #[error("duplicate card in hand: {0}")]
    DuplicateCard(Card),
    #[error("hands are of equal value; check `equals` before `beats`")]
    AmbiguousComparison,
    #[error("no hands to compare")]
    NoHands,
}

/// Classify exactly five distinct cards.
///
/// ```
/// use showdown_rs::cards::parse_cards;
/// use showdown_rs::evaluator::{classify, Category};
///
/// let score = classify(&parse_cards("Ah 2d 3c 4s 5h").unwrap()).unwrap();
/// assert_eq!(score.category(), Category::Straight);
/// assert_eq!(score.tiebreak_values(), vec![5]);
/// ```
pub fn classify(cards: &[Card]) -> Result<HandScore, EvalError> {
    use detector::DETECTORS;
    use hand_analysis::HandAnalysis;

    let five: &[Card; 5] = cards.try_into().map_err(|_| EvalError::CardCount(cards.len()))?;
    for (i, a) in five.iter().enumerate() {
        if five[i + 1..].contains(a) {
            return Err(EvalError::DuplicateCard(*a));
        }
    }

    let analysis = HandAnalysis::new(five);
    Ok(DETECTORS
        .iter()
        .find_map(|d| d.score(&analysis))
        .unwrap_or_else(|| analysis.high_card()))
}

/// Total order over two hands; `Equal` means a split.
pub fn compare(a: &[Card], b: &[Card]) -> Result<Ordering, EvalError> {
    Ok(classify(a)?.cmp(&classify(b)?))
}

/// Same category and same tie-break sequence.
pub fn equals(a: &[Card], b: &[Card]) -> Result<bool, EvalError> {
    Ok(compare(a, b)?.is_eq())
}

/// Whether `a` is strictly stronger than `b`.
///
/// Defined only for hands of different value: equal hands yield
/// [`EvalError::AmbiguousComparison`].
///
/// ```
/// use showdown_rs::cards::parse_cards;
/// use showdown_rs::evaluator::{beats, equals, EvalError};
///
/// let a = parse_cards("Ah Kh Qh Jh Th").unwrap();
/// let b = parse_cards("Ad Kd Qd Jd Td").unwrap();
/// assert!(equals(&a, &b).unwrap());
/// assert_eq!(beats(&a, &b), Err(EvalError::AmbiguousComparison));
/// ```
pub fn beats(a: &[Card], b: &[Card]) -> Result<bool, EvalError> {
    score_beats(&classify(a)?, &classify(b)?)
}

pub(crate) fn score_beats(a: &HandScore, b: &HandScore) -> Result<bool, EvalError> {
    match a.cmp(b) {
        Ordering::Greater => Ok(true),
        Ordering::Less => Ok(false),
        Ordering::Equal => Err(EvalError::AmbiguousComparison),
    }
}

/// Indices (ascending, i.e. input order) of every hand that no other hand beats.
///
/// Hands outside the best category are dropped first; among the rest a hand
/// wins if it beats or equals every other candidate. More than one index
/// means a split.
///
/// ```
/// use showdown_rs::cards::parse_cards;
/// use showdown_rs::evaluator::winners;
///
/// let hands = vec![
///     parse_cards("4h 5h 7h Th Jh").unwrap(),
///     parse_cards("4d 5d 7d Td Jd").unwrap(),
///     parse_cards("3c 5c 7c Tc Jc").unwrap(),
/// ];
/// assert_eq!(winners(&hands).unwrap(), vec![0, 1]);
/// ```
pub fn winners<H: AsRef<[Card]>>(hands: &[H]) -> Result<Vec<usize>, EvalError> {
    let scores = hands.iter().map(|h| classify(h.as_ref())).collect::<Result<Vec<_>, _>>()?;
    winners_by_score(&scores)
}

pub(crate) fn winners_by_score(scores: &[HandScore]) -> Result<Vec<usize>, EvalError> {
    let top = scores.iter().map(HandScore::category).max().ok_or(EvalError::NoHands)?;
    let candidates: Vec<usize> =
        (0..scores.len()).filter(|&i| scores[i].category() == top).collect();

    let mut out = Vec::with_capacity(candidates.len());
    for &i in &candidates {
        let mut unbeaten = true;
        for &j in candidates.iter().filter(|&&j| j != i) {
            if scores[i] != scores[j] && !score_beats(&scores[i], &scores[j])? {
                unbeaten = false;
                break;
            }
        }
        if unbeaten {
            out.push(i);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Card, Rank, Suit};

    fn hand(s: &str) -> Vec<Card> {
        parse_cards(s).expect("valid cards")
    }

    fn values(s: &str) -> (u8, Vec<u8>) {
        let score = classify(&hand(s)).unwrap();
        (score.category().ordinal(), score.tiebreak_values())
    }

    #[test]
    fn category_tiebreak_shapes() {
        assert_eq!(values("7h 2h 5h 6h 9h"), (5, vec![9, 7, 6, 5, 2]));
        assert_eq!(values("6c 5d 2h 4s 3c"), (4, vec![6]));
        assert_eq!(values("2c 3d 4h 5s Ac"), (4, vec![5]));
        assert_eq!(values("7h 7d 7c 7s 2h"), (7, vec![7, 2]));
        assert_eq!(values("7h 7d 7c 2s 2c"), (6, vec![7, 2]));
        assert_eq!(values("7h 7d 7c 2h 3c"), (3, vec![7, 3, 2]));
        assert_eq!(values("7h 7d 2c 2s Kc"), (2, vec![7, 2, 13]));
        assert_eq!(values("7h 7d Kc Qh Js"), (1, vec![7, 13, 12, 11]));
        assert_eq!(values("7c 2h Kc Qh Js"), (0, vec![13, 12, 11, 7, 2]));
        assert_eq!(values("Kh Qh Jh Th Ah"), (9, vec![]));
        assert_eq!(values("9s 8s 7s 6s 5s"), (8, vec![9]));
        assert_eq!(values("As 2s 3s 4s 5s"), (8, vec![5]));
    }

    #[test]
    fn rejects_wrong_count_and_duplicates() {
        assert_eq!(classify(&hand("Ah Kh Qh Jh")), Err(EvalError::CardCount(4)));
        assert_eq!(classify(&hand("Ah Kh Qh Jh Th 9h")), Err(EvalError::CardCount(6)));
        let dup = hand("7h 5d 2c 9s 7h");
        assert_eq!(classify(&dup), Err(EvalError::DuplicateCard(Card::new(Rank::Seven, Suit::Hearts))));
    }

    #[test]
    fn higher_flush_wins() {
        let a = hand("5h 4h 3h Qh 7h");
        let b = hand("5d 4d 3d Kd 7d");
        assert_eq!(beats(&a, &b), Ok(false));
        assert_eq!(beats(&b, &a), Ok(true));
    }

    #[test]
    fn high_card_comparison() {
        let a = hand("5h 4h 3h Ad 7h");
        let b = hand("5d 4d 3s Kd 7d");
        assert_eq!(beats(&a, &b), Ok(true));
    }

    #[test]
    fn equal_high_cards_are_ambiguous() {
        let a = hand("4h 5d 7s Tc Jh");
        let b = hand("4c 5s 7d Td Jd");
        assert_eq!(equals(&a, &b), Ok(true));
        assert_eq!(beats(&a, &b), Err(EvalError::AmbiguousComparison));
    }

    #[test]
    fn straights_compare_by_top_rank() {
        let wheel = hand("Ah 2d 3c 4s 5h");
        let six_high = hand("2c 3s 4d 5d 6d");
        let broadway = hand("Ah Qd Kc Ts Jh");
        assert_eq!(beats(&wheel, &six_high), Ok(false));
        assert_eq!(beats(&broadway, &wheel), Ok(true));
    }

    #[test]
    fn winners_three_way_split() {
        let hands = vec![
            hand("7h 8h 9h Th Jh"),
            hand("7d 8d 9d Td Jd"),
            hand("7c 8c 9c Tc Jc"),
        ];
        assert_eq!(winners(&hands).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn winners_single() {
        let hands = vec![
            hand("Ah Kh Qh Th Jh"),
            hand("4d 5d 7d Td Jd"),
            hand("2c 5c 7c Tc Jc"),
        ];
        assert_eq!(winners(&hands).unwrap(), vec![0]);
    }

    #[test]
    fn winners_filters_by_category_first() {
        let hands = vec![
            hand("4d 4h Qh Th Jh"),
            hand("4d 5d 7d 6d 8c"),
            hand("Kc Qs Jc Tc 9c"),
        ];
        assert_eq!(winners(&hands).unwrap(), vec![2]);
    }

    #[test]
    fn winners_of_nothing_is_an_error() {
        let hands: Vec<Vec<Card>> = Vec::new();
        assert_eq!(winners(&hands), Err(EvalError::NoHands));
    }

    #[test]
    fn winners_propagates_invalid_hands() {
        let hands = vec![hand("Ah Kh Qh Th Jh"), hand("2c 3c")];
        assert_eq!(winners(&hands), Err(EvalError::CardCount(2)));
    }

    #[test]
    fn display_lists_tiebreak() {
        let s = classify(&hand("7h 7d Kc Qh Js")).unwrap();
        assert_eq!(s.to_string(), "pair [7 K Q J]");
        let r = classify(&hand("Kh Qh Jh Th Ah")).unwrap();
        assert_eq!(r.to_string(), "royal flush");
    }
}
