use super::hand_analysis::HandAnalysis;
use crate::cards::Rank;
use crate::evaluator::{Category, HandScore};

/// One category rule: yields a score when the hand belongs to the category.
pub trait CategoryDetector {
    fn score(&self, analysis: &HandAnalysis) -> Option<HandScore>;
}

// ============================================================================
// Detectors, strongest first. High card is the caller's fallback.
// ============================================================================

pub struct RoyalFlushDetector;

impl CategoryDetector for RoyalFlushDetector {
    fn score(&self, a: &HandAnalysis) -> Option<HandScore> {
        let royal = a.suit_info.is_flush
            && a.straight_info.is_straight
            && a.lowest_rank() == Rank::Ten;
        royal.then(|| a.score(Category::RoyalFlush, Vec::new()))
    }
}

pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn score(&self, a: &HandAnalysis) -> Option<HandScore> {
        if !a.suit_info.is_flush {
            return None;
        }
        let top = a.straight_info.top_rank?;
        Some(a.score(Category::StraightFlush, vec![top]))
    }
}

pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn score(&self, a: &HandAnalysis) -> Option<HandScore> {
        let quad = a.rank_groups.quad()?;
        let kicker = *a.rank_groups.kickers().first()?;
        Some(a.score(Category::FourOfAKind, vec![quad, kicker]))
    }
}

pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn score(&self, a: &HandAnalysis) -> Option<HandScore> {
        let trips = a.rank_groups.trips()?;
        let pair = *a.rank_groups.pairs().first()?;
        Some(a.score(Category::FullHouse, vec![trips, pair]))
    }
}

pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn score(&self, a: &HandAnalysis) -> Option<HandScore> {
        a.suit_info.is_flush.then(|| a.score(Category::Flush, a.ranks.to_vec()))
    }
}

pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn score(&self, a: &HandAnalysis) -> Option<HandScore> {
        let top = a.straight_info.top_rank?;
        Some(a.score(Category::Straight, vec![top]))
    }
}

pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn score(&self, a: &HandAnalysis) -> Option<HandScore> {
        let trips = a.rank_groups.trips()?;
        match &a.rank_groups.kickers()[..] {
            [hi, lo] => Some(a.score(Category::ThreeOfAKind, vec![trips, *hi, *lo])),
            _ => None,
        }
    }
}

pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn score(&self, a: &HandAnalysis) -> Option<HandScore> {
        match (&a.rank_groups.pairs()[..], &a.rank_groups.kickers()[..]) {
            ([hi, lo], [kicker]) => Some(a.score(Category::TwoPair, vec![*hi, *lo, *kicker])),
            _ => None,
        }
    }
}

pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn score(&self, a: &HandAnalysis) -> Option<HandScore> {
        match (&a.rank_groups.pairs()[..], &a.rank_groups.kickers()[..]) {
            ([pair], [k0, k1, k2]) => Some(a.score(Category::Pair, vec![*pair, *k0, *k1, *k2])),
            _ => None,
        }
    }
}

pub const DETECTORS: [&dyn CategoryDetector; 9] = [
    &RoyalFlushDetector,
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
];
